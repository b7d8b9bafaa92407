use crate::parsing::rope::span::Span;

use super::kinds::{FenceKind, ListKind, ReferenceDefinition};

/// A block in the depth-addressed block tree.
///
/// Containers (quotes, lists, list items) hold no text themselves; their
/// content lives at deeper depth levels. Leaves store spans into the rope.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockNode {
    Paragraph(ParagraphNode),
    Header(HeaderNode),
    Quote(QuoteNode),
    ListItem(ListItemNode),
    List(ListNode),
    Fence(FenceNode),
    Code(CodeNode),
    ThematicBreak(ThematicBreakNode),
    ReferenceDefinition(ReferenceDefinitionNode),
}

impl BlockNode {
    /// Only an open paragraph lets an enclosing container accept continuation
    /// lines without their marker prefix.
    pub fn allows_lazy_continuation(&self) -> bool {
        matches!(self, BlockNode::Paragraph(p) if !p.closed)
    }

    /// Whether the node has been logically finished before end of input.
    /// Single-line constructs are always closed.
    pub fn is_closed(&self) -> bool {
        match self {
            BlockNode::Paragraph(p) => p.closed,
            BlockNode::Quote(q) => q.closed,
            BlockNode::List(l) => l.state == ListState::Closed,
            BlockNode::Fence(f) => f.closed,
            BlockNode::Code(_) | BlockNode::ListItem(_) => false,
            BlockNode::Header(_)
            | BlockNode::ThematicBreak(_)
            | BlockNode::ReferenceDefinition(_) => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlockNode::Paragraph(_) => "Paragraph",
            BlockNode::Header(_) => "Header",
            BlockNode::Quote(_) => "Quote",
            BlockNode::ListItem(_) => "ListItem",
            BlockNode::List(_) => "List",
            BlockNode::Fence(_) => "Fence",
            BlockNode::Code(_) => "Code",
            BlockNode::ThematicBreak(_) => "ThematicBreak",
            BlockNode::ReferenceDefinition(_) => "ReferenceDefinition",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphNode {
    /// One span per absorbed line. Empty for the placeholder paragraph that
    /// an empty line opens inside a container.
    pub lines: Vec<Span>,
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNode {
    /// The leading `#` run.
    pub open_marker: Span,
    /// Everything after the content (closing `#`s and surrounding blanks).
    pub close_marker: Option<Span>,
    pub text: Span,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteNode {
    /// Byte offset of every `>` consumed by this quote, one per line.
    pub markers: Vec<usize>,
    pub closed: bool,
    pub allows_lazy_continuation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemNode {
    pub marker: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ListState {
    Normal,
    FollowedByEmptyLine,
    Closed,
    /// The list's last leaf is a fence or indented code, which absorbs empty
    /// lines itself.
    LastLeafIsCodeBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub kind: ListKind,
    pub state: ListState,
    /// Columns an item's content must be indented by, relative to the
    /// column the list starts at.
    pub minimum_indent: isize,
    pub allows_lazy_continuation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceNode {
    pub kind: FenceKind,
    pub open_marker: Span,
    pub close_marker: Option<Span>,
    pub info: Span,
    pub lines: Vec<Span>,
    /// Length of the opening marker run.
    pub level: usize,
    /// Indentation of the opening marker; stripped from content lines.
    pub indent: isize,
    pub closed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeNode {
    pub lines: Vec<Span>,
    /// Empty lines seen after the last content line. Committed only if more
    /// content follows.
    pub trailing_empty_lines: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThematicBreakNode {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDefinitionNode {
    /// Normalized label used as the lookup key.
    pub label: String,
    pub definition: ReferenceDefinition,
    pub span: Span,
}
