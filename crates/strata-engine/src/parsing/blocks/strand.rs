//! Strand construction: one line becomes a vertical chain of new blocks.
//!
//! A strand is built outermost first and appended at consecutive depths, so a
//! line like `> - text` yields `Quote` at `d`, `List` at `d + 1`, `ListItem`
//! at `d + 2` and `Paragraph` at `d + 3`.

use crate::parsing::{rope::span::Span, tree::NodeId};

use super::{
    builder::BlockBuilder,
    classify::{CODE_INDENT, Line, LineKind},
    lazy,
    types::{
        BlockNode, CodeNode, FenceNode, HeaderNode, ListItemNode, ListNode, ListState,
        ParagraphNode, QuoteNode, ReferenceDefinitionNode, ThematicBreakNode,
    },
};

impl BlockBuilder {
    /// Builds a strand for `line` starting at `depth` and records which of
    /// its containers accept lazy continuation lines.
    pub(super) fn append_strand(&mut self, line: &Line, depth: usize) -> Vec<NodeId> {
        let mut strand = Vec::new();
        self.build_strand(line, depth, &mut strand);
        lazy::propagate(&mut self.tree, &strand);
        log::debug!(
            "new strand at depth {depth}: {}",
            strand
                .iter()
                .map(|&id| self.tree.get(id).name())
                .collect::<Vec<_>>()
                .join(" > ")
        );
        strand
    }

    fn build_strand(&mut self, line: &Line, depth: usize, strand: &mut Vec<NodeId>) {
        if line.indent.level >= CODE_INDENT {
            let code_line = line.dedented(CODE_INDENT).with_restored_indent();
            strand.push(self.tree.append(
                BlockNode::Code(CodeNode {
                    lines: vec![code_line.span],
                    trailing_empty_lines: vec![],
                }),
                depth,
            ));
            return;
        }

        match &line.kind {
            LineKind::Quote(rest) => {
                strand.push(self.tree.append(
                    BlockNode::Quote(QuoteNode {
                        markers: vec![line.span.start],
                        closed: false,
                        allows_lazy_continuation: false,
                    }),
                    depth,
                ));
                self.build_strand(rest, depth + 1, strand);
            }

            LineKind::Text => {
                strand.push(self.tree.append(
                    BlockNode::Paragraph(ParagraphNode {
                        lines: vec![line.span],
                        closed: false,
                    }),
                    depth,
                ));
            }

            LineKind::Header { text, level } => {
                let start = line.span.start;
                let close = Span::new(text.end.max(start + *level as usize), line.span.end);
                strand.push(self.tree.append(
                    BlockNode::Header(HeaderNode {
                        open_marker: Span::new(start, start + *level as usize),
                        close_marker: (!close.is_empty()).then_some(close),
                        text: *text,
                        level: *level,
                    }),
                    depth,
                ));
            }

            LineKind::List { kind, rest } => {
                let own_indent = line.indent.level.max(0);
                let width = kind.width() as isize;
                let (state, minimum_indent) = if rest.is_empty() {
                    (ListState::FollowedByEmptyLine, own_indent + width + 1)
                } else {
                    (
                        ListState::Normal,
                        own_indent + width + rest.indent.level + 1,
                    )
                };

                let list_id = self.tree.append(
                    BlockNode::List(ListNode {
                        kind: *kind,
                        state,
                        minimum_indent,
                        allows_lazy_continuation: false,
                    }),
                    depth,
                );
                strand.push(list_id);
                strand.push(self.tree.append(
                    BlockNode::ListItem(ListItemNode {
                        marker: Span::new(line.span.start, line.span.start + kind.width()),
                    }),
                    depth + 1,
                ));

                if rest.is_empty() {
                    return;
                }

                let first_content = strand.len();
                self.build_strand(rest, depth + 2, strand);

                // Indented code inside an item only needs the marker column.
                if matches!(self.tree.get(strand[first_content]), BlockNode::Code(_))
                    && let BlockNode::List(list) = self.tree.get_mut(list_id)
                {
                    list.minimum_indent = own_indent + width + 1;
                }
            }

            LineKind::Fence { kind, info, level } => {
                strand.push(self.tree.append(
                    BlockNode::Fence(FenceNode {
                        kind: *kind,
                        open_marker: Span::new(line.span.start, line.span.start + level),
                        close_marker: None,
                        info: *info,
                        lines: vec![],
                        level: *level,
                        indent: line.indent.level.max(0),
                        closed: false,
                    }),
                    depth,
                ));
            }

            LineKind::ThematicBreak => {
                strand.push(self.tree.append(
                    BlockNode::ThematicBreak(ThematicBreakNode { span: line.span }),
                    depth,
                ));
            }

            LineKind::Empty => {
                strand.push(
                    self.tree
                        .append(BlockNode::Paragraph(ParagraphNode::default()), depth),
                );
            }

            LineKind::Reference { label, definition } => {
                strand.push(self.tree.append(
                    BlockNode::ReferenceDefinition(ReferenceDefinitionNode {
                        label: label.clone(),
                        definition: definition.clone(),
                        span: line.span,
                    }),
                    depth,
                ));
            }
        }
    }
}
