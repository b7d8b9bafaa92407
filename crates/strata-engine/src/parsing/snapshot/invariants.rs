use xi_rope::Rope;

use crate::parsing::{
    ParsedDoc,
    blocks::BlockNode,
    inline::{InlineNode, InlineTree},
    inline_lines, parse_inline_for_block,
    rope::span::Span,
    tree::NodeId,
};

/// Asserts structural invariants of a parsed document. Panics with a
/// description of the first violation.
pub fn check(rope: &Rope, doc: &ParsedDoc) {
    let n = rope.len();
    let in_bounds = |sp: Span, what: &str| {
        assert!(
            sp.start <= sp.end && sp.end <= n,
            "{what} span out of bounds: {sp:?} (rope len: {n})"
        );
    };

    for (id, node) in doc.blocks.iter() {
        let parent = doc.blocks.parent(id).map(|p| doc.blocks.get(p));
        match node {
            BlockNode::Paragraph(p) => check_lines(&p.lines, "paragraph", &in_bounds),
            BlockNode::Fence(f) => {
                in_bounds(f.open_marker, "fence marker");
                in_bounds(f.info, "fence info");
                if let Some(close) = f.close_marker {
                    in_bounds(close, "fence close marker");
                    assert!(f.closed, "fence has a close marker but is open");
                }
                check_lines(&f.lines, "fence", &in_bounds);
            }
            BlockNode::Code(c) => check_lines(&c.lines, "code", &in_bounds),
            BlockNode::Header(h) => {
                in_bounds(h.text, "header text");
                assert!(
                    h.open_marker.end <= h.text.start || h.text.is_empty(),
                    "header text {:?} overlaps its marker {:?}",
                    h.text,
                    h.open_marker
                );
            }
            BlockNode::List(l) => {
                assert!(
                    l.minimum_indent > l.kind.width() as isize,
                    "list minimum indent {} does not clear its marker width {}",
                    l.minimum_indent,
                    l.kind.width()
                );
                for &child in doc.blocks.children(id) {
                    assert!(
                        matches!(doc.blocks.get(child), BlockNode::ListItem(_)),
                        "list child {child:?} is not a list item"
                    );
                }
            }
            BlockNode::ListItem(item) => {
                in_bounds(item.marker, "list item marker");
                assert!(
                    matches!(parent, Some(BlockNode::List(_))),
                    "list item {id:?} outside a list"
                );
            }
            BlockNode::ThematicBreak(t) => in_bounds(t.span, "thematic break"),
            BlockNode::ReferenceDefinition(r) => in_bounds(r.span, "reference definition"),
            BlockNode::Quote(q) => {
                assert!(!q.markers.is_empty(), "quote {id:?} without markers");
            }
        }

        if let Some(tree) = parse_inline_for_block(rope, doc, id)
            && let Some(lines) = inline_lines(doc, id)
            && let (Some(first), Some(last)) = (lines.first(), lines.last())
        {
            check_inline(&tree, Span::new(first.start, last.end));
        }
    }
}

fn check_lines(lines: &[Span], what: &str, in_bounds: &impl Fn(Span, &str)) {
    for pair in lines.windows(2) {
        assert!(
            pair[0].end <= pair[1].start,
            "{what} lines out of order: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
    for &sp in lines {
        in_bounds(sp, what);
    }
}

/// The children of every inline ancestor tile its content exactly; the
/// roots tile the block's text.
pub fn check_inline(tree: &InlineTree, whole: Span) {
    check_tiling(tree, tree.roots(), whole);
    for (id, node) in tree.iter() {
        match node {
            InlineNode::NonText(n) => check_tiling(tree, tree.children(id), n.content),
            InlineNode::Text(_) => assert!(
                tree.children(id).is_empty(),
                "text node {id:?} has children"
            ),
        }
    }
}

fn check_tiling(tree: &InlineTree, children: &[NodeId], expected: Span) {
    let mut at = expected.start;
    for &child in children {
        let sp = tree.get(child).span();
        assert_eq!(
            sp.start, at,
            "inline child {sp:?} does not continue at {at} within {expected:?}"
        );
        at = sp.end;
    }
    assert_eq!(at, expected.end, "inline children stop short of {expected:?}");
}
