use std::collections::BTreeMap;

use serde::Serialize;
use xi_rope::Rope;

use crate::parsing::{
    ParsedDoc,
    blocks::{BlockNode, kinds::ListKind},
    inline::{InlineNode, InlineTree, NonTextKind, TextKind},
    parse_inline_for_block,
    rope::{slice::preview, span::Span},
    tree::{DepthTree, NodeId},
};

/// What to include in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapOptions {
    /// Characters of text shown per line or inline node.
    pub preview_width: usize,
    /// Whether to build inline trees for paragraphs and headers.
    pub inline: bool,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            preview_width: 60,
            inline: true,
        }
    }
}

/// Snapshot of a parsed document.
#[derive(Debug, Serialize)]
pub struct Snap {
    /// Root blocks, each with its nested content.
    pub blocks: Vec<BlockSnap>,
    /// Resolved reference definitions in document order.
    pub references: Vec<ReferenceSnap>,
}

/// Snapshot of a single block.
#[derive(Debug, Serialize)]
pub struct BlockSnap {
    /// Block kind (e.g. "Paragraph", "List").
    pub kind: &'static str,
    /// Kind-specific flags and values (e.g. "closed", "level=2").
    pub attrs: Vec<String>,
    /// Named sub-spans (markers, info string, header text).
    pub parts: BTreeMap<String, (usize, usize)>,
    /// Previews of the content lines.
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<Vec<InlineSnap>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockSnap>,
}

/// Snapshot of a single inline node.
#[derive(Debug, Serialize)]
pub struct InlineSnap {
    /// "text", "soft", "code", "em1", "em2", "link" or "image".
    pub kind: String,
    pub span: (usize, usize),
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<InlineSnap>,
}

#[derive(Debug, Serialize)]
pub struct ReferenceSnap {
    pub label: String,
    pub destination: String,
    pub title: Option<String>,
}

pub fn normalize(rope: &Rope, doc: &ParsedDoc) -> Snap {
    normalize_with(rope, doc, &SnapOptions::default())
}

pub fn normalize_with(rope: &Rope, doc: &ParsedDoc, options: &SnapOptions) -> Snap {
    let blocks = doc
        .blocks
        .roots()
        .iter()
        .map(|&id| block_snap(rope, doc, id, options))
        .collect();

    let references = doc
        .references
        .iter()
        .map(|(label, def)| ReferenceSnap {
            label: label.to_string(),
            destination: def.destination.clone(),
            title: def.title.clone(),
        })
        .collect();

    Snap { blocks, references }
}

fn block_snap(rope: &Rope, doc: &ParsedDoc, id: NodeId, options: &SnapOptions) -> BlockSnap {
    let node = doc.blocks.get(id);
    let mut attrs = Vec::new();
    let mut parts = BTreeMap::new();
    let mut lines: &[Span] = &[];

    match node {
        BlockNode::Paragraph(p) => {
            flag(&mut attrs, p.closed, "closed");
            lines = &p.lines;
        }
        BlockNode::Header(h) => {
            attrs.push(format!("level={}", h.level));
            parts.insert("open".into(), pair(h.open_marker));
            if let Some(close) = h.close_marker {
                parts.insert("close".into(), pair(close));
            }
            parts.insert("text".into(), pair(h.text));
            lines = std::slice::from_ref(&h.text);
        }
        BlockNode::Quote(q) => {
            attrs.push(format!("markers={}", q.markers.len()));
            flag(&mut attrs, q.closed, "closed");
            flag(&mut attrs, q.allows_lazy_continuation, "lazy");
            for (i, &m) in q.markers.iter().enumerate() {
                parts.insert(format!("marker{i}"), (m, m + 1));
            }
        }
        BlockNode::List(l) => {
            attrs.push(list_kind_label(l.kind));
            attrs.push(format!("state={:?}", l.state));
            attrs.push(format!("min_indent={}", l.minimum_indent));
            flag(&mut attrs, l.allows_lazy_continuation, "lazy");
        }
        BlockNode::ListItem(item) => {
            parts.insert("marker".into(), pair(item.marker));
        }
        BlockNode::Fence(f) => {
            attrs.push(format!("{:?}", f.kind).to_lowercase());
            attrs.push(format!("level={}", f.level));
            if !f.info.is_empty() {
                attrs.push(format!("info={}", preview(rope, f.info, options.preview_width)));
            }
            flag(&mut attrs, f.closed, "closed");
            parts.insert("open".into(), pair(f.open_marker));
            if let Some(close) = f.close_marker {
                parts.insert("close".into(), pair(close));
            }
            if !f.info.is_empty() {
                parts.insert("info".into(), pair(f.info));
            }
            lines = &f.lines;
        }
        BlockNode::Code(c) => {
            if !c.trailing_empty_lines.is_empty() {
                attrs.push(format!("trailing_empty={}", c.trailing_empty_lines.len()));
            }
            lines = &c.lines;
        }
        BlockNode::ThematicBreak(t) => {
            parts.insert("span".into(), pair(t.span));
        }
        BlockNode::ReferenceDefinition(r) => {
            attrs.push(format!("label={}", r.label));
            attrs.push(format!("dest={}", r.definition.destination));
            parts.insert("span".into(), pair(r.span));
        }
    }

    let inline = if options.inline {
        parse_inline_for_block(rope, doc, id).map(|tree| inline_snaps(rope, &tree, options))
    } else {
        None
    };

    BlockSnap {
        kind: node.name(),
        attrs,
        parts,
        lines: lines
            .iter()
            .map(|&sp| preview(rope, sp, options.preview_width))
            .collect(),
        inline,
        children: doc
            .blocks
            .children(id)
            .iter()
            .map(|&child| block_snap(rope, doc, child, options))
            .collect(),
    }
}

fn inline_snaps(rope: &Rope, tree: &InlineTree, options: &SnapOptions) -> Vec<InlineSnap> {
    fn walk(
        rope: &Rope,
        tree: &DepthTree<InlineNode>,
        ids: &[NodeId],
        options: &SnapOptions,
    ) -> Vec<InlineSnap> {
        ids.iter()
            .map(|&id| {
                let node = tree.get(id);
                let (kind, destination) = match node {
                    InlineNode::Text(t) if t.kind == TextKind::SoftBreak => ("soft".into(), None),
                    InlineNode::Text(_) => ("text".into(), None),
                    InlineNode::NonText(n) => match &n.kind {
                        NonTextKind::Code => ("code".into(), None),
                        NonTextKind::Emphasis { level } => (format!("em{level}"), None),
                        NonTextKind::Link { definition } => {
                            ("link".into(), Some(definition.destination.clone()))
                        }
                        NonTextKind::Image { definition } => {
                            ("image".into(), Some(definition.destination.clone()))
                        }
                    },
                };
                let span = node.span();
                InlineSnap {
                    kind,
                    span: pair(span),
                    text: preview(rope, span, options.preview_width),
                    destination,
                    children: walk(rope, tree, tree.children(id), options),
                }
            })
            .collect()
    }
    walk(rope, tree, tree.roots(), options)
}

fn flag(attrs: &mut Vec<String>, on: bool, name: &str) {
    if on {
        attrs.push(name.to_string());
    }
}

fn list_kind_label(kind: ListKind) -> String {
    match kind {
        ListKind::Bullet(c) => format!("bullet({c})"),
        ListKind::Ordered {
            start, delimiter, ..
        } => format!("ordered({start}{delimiter})"),
    }
}

fn pair(sp: Span) -> (usize, usize) {
    (sp.start, sp.end)
}

/// Renders a snapshot as indented plain text, one block per line with its
/// content lines (`|`) and inline tree (`=`) underneath.
pub fn render(snap: &Snap) -> String {
    let mut out = String::new();
    for block in &snap.blocks {
        render_block(block, 0, &mut out);
    }
    for r in &snap.references {
        let title = r.title.as_deref().map(|t| format!(" \"{t}\"")).unwrap_or_default();
        out.push_str(&format!("[{}]: {}{title}\n", r.label, r.destination));
    }
    out
}

fn render_block(block: &BlockSnap, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    let mut head = format!("{pad}{}", block.kind);
    for attr in &block.attrs {
        head.push(' ');
        head.push_str(attr);
    }
    push_row(out, &head);

    for line in &block.lines {
        push_row(out, &format!("{pad}  | {line}"));
    }
    if let Some(inline) = &block.inline
        && !inline.is_empty()
    {
        push_row(out, &format!("{pad}  = {}", render_inline(inline)));
    }
    for child in &block.children {
        render_block(child, depth + 1, out);
    }
}

fn render_inline(nodes: &[InlineSnap]) -> String {
    nodes
        .iter()
        .map(|n| match n.kind.as_str() {
            "text" => format!("{:?}", n.text),
            "soft" => "soft".to_string(),
            kind => {
                let dest = n
                    .destination
                    .as_deref()
                    .map(|d| format!("<{d}>"))
                    .unwrap_or_default();
                format!("{kind}{dest}({})", render_inline(&n.children))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_row(out: &mut String, row: &str) {
    out.push_str(row.trim_end());
    out.push('\n');
}

/// Indented plain-text rendering of a parsed document.
pub fn dump(rope: &Rope, doc: &ParsedDoc) -> String {
    render(&normalize(rope, doc))
}

pub fn dump_with(rope: &Rope, doc: &ParsedDoc, options: &SnapOptions) -> String {
    render(&normalize_with(rope, doc, options))
}
