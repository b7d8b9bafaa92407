//! Merges the text stream and the non-text stream of one block into an
//! [`InlineTree`].
//!
//! Both streams are consumed front to back with one element of look-ahead
//! each. There is no explicit stack: the enclosing node of the insertion
//! point is always the last node one depth shallower in the output tree.
//! Text is clipped at the content boundaries of its ancestors and at the
//! start of the next non-text node, so delimiters (`*`, `[`, `](url)`) end
//! up outside every content range and are dropped.

use std::iter::Peekable;

use crate::parsing::{rope::span::Span, tree::DepthTree};

use super::types::{InlineNode, InlineTree, NonTextInlineNode, TextInlineNode};

/// Builds the inline tree.
///
/// `texts` must be ordered and non-overlapping. `non_texts` must be sorted by
/// start ascending then end descending, and properly nested: every node lies
/// inside the content of any node that encloses its start.
///
/// When a non-text node starts exactly where pending text starts, the
/// non-text node is emitted first.
pub fn build_inline_tree(
    texts: impl IntoIterator<Item = TextInlineNode>,
    non_texts: impl IntoIterator<Item = NonTextInlineNode>,
) -> InlineTree {
    let mut merge = Merge {
        tree: DepthTree::new(),
        level: 0,
        skip_to: 0,
        non_texts: non_texts.into_iter().peekable(),
    };
    let mut texts = texts.into_iter();
    let mut pending = texts.next();

    loop {
        match pending.take() {
            Some(text) => {
                pending = match merge.step(text) {
                    Some(rest) => Some(rest),
                    None => texts.next(),
                }
            }
            None => match merge.non_texts.next() {
                Some(node) => {
                    let mut at = node.start;
                    let _ = merge.walk_out(&mut at);
                    merge.emit_non_text(node);
                }
                None => break,
            },
        }
    }
    merge.tree
}

struct Merge<N: Iterator<Item = NonTextInlineNode>> {
    tree: InlineTree,
    /// Depth at which the next node is inserted.
    level: usize,
    /// End of the last node walked out of. Text before it belongs to a
    /// closing delimiter, even when the delimiter spans a line break.
    skip_to: usize,
    non_texts: Peekable<N>,
}

/// `(content, end)` of the node enclosing the insertion point.
type Enclosing = (Span, usize);

impl<N: Iterator<Item = NonTextInlineNode>> Merge<N> {
    fn enclosing(&self) -> Option<Enclosing> {
        let depth = self.level.checked_sub(1)?;
        match self.tree.get(self.tree.last_at_depth(depth)?) {
            InlineNode::NonText(n) => Some((n.content, n.end)),
            // Text never gains children, so it is never one level up.
            InlineNode::Text(_) => None,
        }
    }

    /// Moves the insertion point out of every ancestor whose content ends at
    /// or before `pos`, advancing `pos` past each ancestor's closing
    /// delimiter. Returns the innermost ancestor still open.
    fn walk_out(&mut self, pos: &mut usize) -> Option<Enclosing> {
        while let Some((content, end)) = self.enclosing() {
            if *pos < content.end {
                return Some((content, end));
            }
            self.skip_to = self.skip_to.max(end);
            *pos = (*pos).max(end);
            self.level -= 1;
        }
        None
    }

    fn emit_non_text(&mut self, node: NonTextInlineNode) {
        self.tree.append(InlineNode::NonText(node), self.level);
        self.level += 1;
    }

    /// Emits what it can of `text` and returns the part still pending.
    fn step(&mut self, mut text: TextInlineNode) -> Option<TextInlineNode> {
        text.start = text.start.max(self.skip_to);
        let parent = self.walk_out(&mut text.start);
        if text.start >= text.end {
            // Entirely inside closing delimiters.
            return None;
        }

        let next_start = match self.non_texts.peek() {
            Some(node) if node.start <= text.start => {
                if let Some(node) = self.non_texts.next() {
                    self.emit_non_text(node);
                }
                return Some(text);
            }
            Some(node) => node.start,
            None => usize::MAX,
        };

        let (start, end, rest) = match parent {
            Some((content, parent_end)) => (
                text.start.max(content.start),
                text.end.min(content.end).min(next_start),
                next_start.min(parent_end),
            ),
            None => (text.start, text.end.min(next_start), next_start),
        };

        if start < end {
            self.tree.append(
                InlineNode::Text(TextInlineNode {
                    kind: text.kind,
                    start,
                    end,
                }),
                self.level,
            );
        }

        (rest < text.end).then_some(TextInlineNode {
            start: rest,
            ..text
        })
    }
}
