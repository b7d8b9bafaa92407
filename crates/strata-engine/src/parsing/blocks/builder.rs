use crate::parsing::{
    rope::span::Span,
    tree::{DepthTree, NodeId},
};

use super::{
    classify::{CODE_INDENT, Line, LineKind},
    kinds::CodeFence,
    types::{BlockNode, CodeNode, FenceNode, ListItemNode, ListNode, ListState, ParagraphNode},
};

/// Outcome of offering a line to an existing block.
///
/// `Rejected` is a control signal ("this block cannot absorb the line"), never
/// an error: the caller always falls back to starting a new strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Extend {
    Absorbed,
    Rejected,
}

/// Incremental block-tree builder.
///
/// Each pushed line first tries to extend the deepest open structure,
/// starting from the last root block and recursing through containers. When
/// nothing absorbs it, a new strand is started at the depth where extension
/// failed, which retires whatever hung below that depth before.
pub struct BlockBuilder {
    pub(super) tree: DepthTree<BlockNode>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            tree: DepthTree::new(),
        }
    }

    pub fn push(&mut self, line: &Line) {
        log::trace!("push {:?} (indent {})", line.kind, line.indent.level);
        let outcome = self.extend_last_at(line, 0);
        if outcome == Extend::Rejected && !line.is_empty() {
            self.append_strand(line, 0);
        }
    }

    pub fn tree(&self) -> &DepthTree<BlockNode> {
        &self.tree
    }

    pub fn finish(self) -> DepthTree<BlockNode> {
        self.tree
    }

    fn last_leaf_allows_lazy_continuation(&self) -> bool {
        self.tree
            .last_leaf()
            .is_some_and(|id| self.tree.get(id).allows_lazy_continuation())
    }

    fn last_leaf_is_code_block(&self) -> bool {
        self.tree.last_leaf().is_some_and(|id| {
            matches!(self.tree.get(id), BlockNode::Fence(_) | BlockNode::Code(_))
        })
    }

    /// Offers `line` to the last node at `depth`, if there is one.
    fn extend_last_at(&mut self, line: &Line, depth: usize) -> Extend {
        match self.tree.last_at_depth(depth) {
            Some(id) => self.try_extend(line, id, depth),
            None => Extend::Rejected,
        }
    }

    /// Offers `line` to the last node at `depth` and starts a new strand
    /// there if it is rejected. Empty lines never start strands.
    fn extend_or_strand(&mut self, line: &Line, depth: usize) {
        if self.extend_last_at(line, depth) == Extend::Rejected && !line.is_empty() {
            self.append_strand(line, depth);
        }
    }

    /// Dispatches by block kind.
    ///
    /// # Panics
    /// Panics when handed a list item: items only receive content through
    /// their list, two levels down, so reaching one here means the dispatch
    /// itself is broken.
    fn try_extend(&mut self, line: &Line, id: NodeId, depth: usize) -> Extend {
        match self.tree.get_mut(id) {
            BlockNode::Paragraph(paragraph) => extend_paragraph(paragraph, line),
            BlockNode::Fence(fence) => extend_fence(fence, line),
            BlockNode::Code(code) => extend_code(code, line),
            BlockNode::Quote(quote) => {
                if quote.closed {
                    return Extend::Rejected;
                }
                self.extend_quote(line, id, depth)
            }
            BlockNode::List(list) => {
                let list = list.clone();
                self.extend_list(line, id, depth, &list)
            }
            BlockNode::Header(_)
            | BlockNode::ThematicBreak(_)
            | BlockNode::ReferenceDefinition(_) => Extend::Rejected,
            BlockNode::ListItem(_) => panic!(
                "list item {id:?} at depth {depth} was offered a line directly; \
                 item content is only reached through its list"
            ),
        }
    }

    // QUOTE

    fn extend_quote(&mut self, line: &Line, id: NodeId, depth: usize) -> Extend {
        let lazy = self.last_leaf_allows_lazy_continuation();

        if lazy && line.indent.level >= CODE_INDENT {
            self.extend_or_strand(&line.as_text(), depth + 1);
            return Extend::Absorbed;
        }

        match &line.kind {
            LineKind::Empty => {
                if let BlockNode::Quote(quote) = self.tree.get_mut(id) {
                    quote.closed = true;
                }
            }
            LineKind::Quote(rest) => {
                if let BlockNode::Quote(quote) = self.tree.get_mut(id) {
                    quote.markers.push(line.span.start);
                }
                self.extend_or_strand(rest, depth + 1);
            }
            LineKind::Text if lazy => self.extend_or_strand(line, depth + 1),
            _ => return Extend::Rejected,
        }
        Extend::Absorbed
    }

    // LIST

    fn extend_list(&mut self, line: &Line, id: NodeId, depth: usize, list: &ListNode) -> Extend {
        match self.prepare_list_line(line, list) {
            Some(prepared) => {
                self.apply_list_line(&prepared, id, depth, list);
                Extend::Absorbed
            }
            None => Extend::Rejected,
        }
    }

    /// Decides whether `line` belongs to the list at all, and re-expresses its
    /// indentation relative to the list's content column.
    fn prepare_list_line(&self, line: &Line, list: &ListNode) -> Option<Line> {
        if line.is_empty() {
            return Some(line.clone());
        }
        if list.state == ListState::Closed {
            return None;
        }

        let lazy = self.last_leaf_allows_lazy_continuation();
        if lazy && line.indent.level >= list.minimum_indent + CODE_INDENT {
            return Some(line.dedented(list.minimum_indent).as_text());
        }

        let line = line.dedented(list.minimum_indent);
        let well_indented = line.indent.level >= 0;

        let accepted = match &line.kind {
            LineKind::Text => well_indented || (list.state == ListState::Normal && lazy),
            LineKind::List { kind, .. } => well_indented || kind.is_compatible(list.kind),
            LineKind::Quote(_)
            | LineKind::Header { .. }
            | LineKind::Fence { .. }
            | LineKind::Reference { .. } => well_indented,
            LineKind::Empty | LineKind::ThematicBreak => false,
        };
        accepted.then_some(line)
    }

    fn apply_list_line(&mut self, line: &Line, id: NodeId, depth: usize, list: &ListNode) {
        let item_depth = depth + 1;
        let content_depth = depth + 2;

        match &line.kind {
            LineKind::Empty => {
                let state = match list.state {
                    // Feeding the code leaf directly avoids re-walking deep
                    // list and fence nesting for every blank line.
                    ListState::LastLeafIsCodeBlock if self.extend_last_code_leaf(line) => return,
                    ListState::LastLeafIsCodeBlock | ListState::Normal => {
                        self.empty_line_in_item(line, content_depth)
                    }
                    ListState::FollowedByEmptyLine | ListState::Closed => ListState::Closed,
                };
                self.set_list_state(id, state);
            }

            LineKind::List { kind, rest } if line.indent.level < 0 => {
                let widen_by = line.indent.level + kind.width() as isize + 1;
                if let BlockNode::List(list) = self.tree.get_mut(id) {
                    list.state = ListState::Normal;
                    list.minimum_indent += widen_by;
                    log::debug!(
                        "new item widens list at depth {depth} to indent {}",
                        list.minimum_indent
                    );
                }
                let marker = Span::new(line.span.start, line.span.start + kind.width());
                self.tree
                    .append(BlockNode::ListItem(ListItemNode { marker }), item_depth);
                if !rest.is_empty() {
                    self.append_strand(rest, content_depth);
                }
            }

            _ => {
                self.set_list_state(id, ListState::Normal);
                self.extend_or_strand(line, content_depth);
            }
        }
    }

    fn empty_line_in_item(&mut self, line: &Line, content_depth: usize) -> ListState {
        let outcome = self.extend_last_at(line, content_depth);
        if self.last_leaf_is_code_block() {
            ListState::LastLeafIsCodeBlock
        } else if outcome == Extend::Absorbed {
            ListState::FollowedByEmptyLine
        } else {
            ListState::Closed
        }
    }

    /// Returns false when the last leaf is not a code block after all.
    fn extend_last_code_leaf(&mut self, line: &Line) -> bool {
        let Some(leaf) = self.tree.last_leaf() else {
            return false;
        };
        match self.tree.get_mut(leaf) {
            BlockNode::Code(code) => {
                let _ = extend_code(code, line);
                true
            }
            BlockNode::Fence(fence) => {
                let _ = extend_fence(fence, line);
                true
            }
            _ => false,
        }
    }

    fn set_list_state(&mut self, id: NodeId, state: ListState) {
        if let BlockNode::List(list) = self.tree.get_mut(id) {
            list.state = state;
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// PARAGRAPH

fn extend_paragraph(paragraph: &mut ParagraphNode, line: &Line) -> Extend {
    if paragraph.closed {
        return Extend::Rejected;
    }
    match line.kind {
        LineKind::Text | LineKind::Reference { .. } => paragraph.lines.push(line.span),
        LineKind::Empty => paragraph.closed = true,
        _ if line.indent.level >= CODE_INDENT => paragraph.lines.push(line.span),
        _ => return Extend::Rejected,
    }
    Extend::Absorbed
}

// FENCE

fn extend_fence(fence: &mut FenceNode, line: &Line) -> Extend {
    if fence.closed || line.indent.level < 0 {
        return Extend::Rejected;
    }
    let line = line.dedented(fence.indent);

    match line.kind {
        LineKind::Fence { kind, info, level }
            if line.indent.level < CODE_INDENT
                && CodeFence::closes(fence.kind, fence.level, kind, info.len(), level) =>
        {
            fence.close_marker = Some(Span::new(line.span.start, line.span.start + level));
            fence.closed = true;
        }
        _ => fence.lines.push(line.with_restored_indent().span),
    }
    Extend::Absorbed
}

// CODE

fn extend_code(code: &mut CodeNode, line: &Line) -> Extend {
    match line.kind {
        LineKind::Empty => {
            let line = line.dedented(CODE_INDENT).with_restored_indent();
            code.trailing_empty_lines.push(line.span);
        }
        _ if line.indent.level >= CODE_INDENT => {
            let line = line.dedented(CODE_INDENT).with_restored_indent();
            code.lines.append(&mut code.trailing_empty_lines);
            code.lines.push(line.span);
        }
        _ => return Extend::Rejected,
    }
    Extend::Absorbed
}
