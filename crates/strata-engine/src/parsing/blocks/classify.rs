use crate::parsing::rope::{lines::LineRef, span::Span};

use super::kinds::{
    BlockQuote, CodeFence, FenceKind, Heading, ListKind, ListMarker, ReferenceDefinition,
    ReferenceLine, ThematicBreak,
};

/// Columns of indentation that turn a line into indented code.
pub const CODE_INDENT: isize = 4;

/// Leading indentation of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    /// Columns of leading whitespace. Goes negative once a container has
    /// subtracted more columns than the line actually has.
    pub level: isize,
    /// Byte offset where the leading whitespace begins.
    pub start: usize,
}

/// One classified line (or the remainder of a line after a container marker).
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub kind: LineKind,
    pub indent: Indent,
    /// Content after the leading indentation, without the line terminator.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Empty,
    Text,
    ThematicBreak,
    /// A `>` marker; the remainder of the line is classified separately.
    Quote(Box<Line>),
    Header {
        text: Span,
        level: u8,
    },
    List {
        kind: ListKind,
        rest: Box<Line>,
    },
    Fence {
        kind: FenceKind,
        info: Span,
        level: usize,
    },
    Reference {
        label: String,
        definition: ReferenceDefinition,
    },
}

impl Line {
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, LineKind::Empty)
    }

    /// Subtracts `columns` from the indentation level.
    pub fn dedented(&self, columns: isize) -> Line {
        let mut line = self.clone();
        line.indent.level -= columns;
        line
    }

    /// Moves whatever indentation is left back into the content span, so
    /// that verbatim blocks (code, fences) keep their relative indentation.
    ///
    /// Columns map to bytes one to one, which is exact for spaces; a tab in
    /// the residual indentation is restored as a whole.
    pub fn with_restored_indent(mut self) -> Line {
        if self.indent.level > 0 {
            let back = self.indent.level as usize;
            self.span.start = self.span.start.saturating_sub(back).max(self.indent.start);
        }
        self
    }

    /// Reinterprets the line as plain text, keeping indentation and span.
    pub fn as_text(&self) -> Line {
        Line {
            kind: LineKind::Text,
            indent: self.indent,
            span: self.span,
        }
    }
}

/// Classifies individual lines for the block parsing phase.
///
/// Classification only looks at the line itself; whether the line continues
/// an open block is decided by the [`BlockBuilder`](super::BlockBuilder).
#[derive(Debug, Clone, Copy)]
pub struct MarkdownLineClassifier {
    pub tab_width: usize,
}

impl Default for MarkdownLineClassifier {
    fn default() -> Self {
        Self { tab_width: 4 }
    }
}

impl MarkdownLineClassifier {
    pub fn new(tab_width: usize) -> Self {
        Self {
            tab_width: tab_width.max(1),
        }
    }

    /// Classifies a line into a [`Line`].
    pub fn classify(&self, lr: &LineRef) -> Line {
        self.scan(&lr.text, lr.content.start)
    }

    /// Scans `s`, which starts at byte offset `base` in the rope.
    pub fn scan(&self, s: &str, base: usize) -> Line {
        let (columns, ws) = self.measure_indent(s);
        let start = base + ws;
        Line {
            kind: self.kind_of(&s[ws..], start),
            indent: Indent {
                level: columns as isize,
                start: base,
            },
            span: Span::new(start, base + s.len()),
        }
    }

    fn measure_indent(&self, s: &str) -> (usize, usize) {
        let mut columns = 0;
        let mut bytes = 0;
        for b in s.bytes() {
            match b {
                b' ' => columns += 1,
                b'\t' => columns += self.tab_width - columns % self.tab_width,
                _ => break,
            }
            bytes += 1;
        }
        (columns, bytes)
    }

    /// Precedence: thematic break beats list markers (`- - -`), headings and
    /// fences beat everything except the break, reference definitions are
    /// only tried once nothing structural matched.
    fn kind_of(&self, s: &str, at: usize) -> LineKind {
        if s.is_empty() {
            return LineKind::Empty;
        }
        if ThematicBreak::matches(s) {
            return LineKind::ThematicBreak;
        }
        if let Some(h) = Heading::scan(s) {
            return LineKind::Header {
                text: Span::new(at + h.text.start, at + h.text.end),
                level: h.level,
            };
        }
        if let Some(sig) = CodeFence::sig(s) {
            return LineKind::Fence {
                kind: sig.kind,
                info: Span::new(at + sig.info.start, at + sig.info.end),
                level: sig.level,
            };
        }
        if let Some(skip) = BlockQuote::strip_marker(s) {
            return LineKind::Quote(Box::new(self.scan(&s[skip..], at + skip)));
        }
        if let Some(kind) = ListMarker::scan(s) {
            let width = kind.width();
            let skip = if s.as_bytes().get(width) == Some(&b' ') {
                width + 1
            } else {
                width
            };
            return LineKind::List {
                kind,
                rest: Box::new(self.scan(&s[skip..], at + skip)),
            };
        }
        if let Some((label, definition)) = ReferenceLine::scan(s) {
            return LineKind::Reference { label, definition };
        }
        LineKind::Text
    }
}
