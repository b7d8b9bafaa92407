use serde::Serialize;

/// The discriminant of a list: which marker its items use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListKind {
    /// `-`, `+` or `*`.
    Bullet(char),
    /// `1.` or `1)`; `width` is the marker length in bytes (digits plus
    /// delimiter).
    Ordered {
        start: u32,
        delimiter: char,
        width: usize,
    },
}

impl ListKind {
    /// Marker width in columns.
    pub fn width(self) -> usize {
        match self {
            ListKind::Bullet(_) => 1,
            ListKind::Ordered { width, .. } => width,
        }
    }

    /// Whether an item with marker `other` continues a list of this kind.
    /// Bullets must use the same character, ordered items the same delimiter.
    pub fn is_compatible(self, other: ListKind) -> bool {
        match (self, other) {
            (ListKind::Bullet(a), ListKind::Bullet(b)) => a == b,
            (
                ListKind::Ordered { delimiter: a, .. },
                ListKind::Ordered { delimiter: b, .. },
            ) => a == b,
            _ => false,
        }
    }
}

pub struct ListMarker;

impl ListMarker {
    pub const BULLETS: [u8; 3] = [b'-', b'+', b'*'];
    pub const DELIMITERS: [u8; 2] = [b'.', b')'];
    pub const MAX_DIGITS: usize = 9;

    /// Detects a list marker at the start of `s` (already stripped of
    /// indentation). The marker must be followed by whitespace or the end of
    /// the line.
    pub fn scan(s: &str) -> Option<ListKind> {
        let b = s.as_bytes();
        let first = *b.first()?;

        let (kind, len) = if Self::BULLETS.contains(&first) {
            (ListKind::Bullet(first as char), 1)
        } else {
            let digits = b.iter().take_while(|c| c.is_ascii_digit()).count();
            if digits == 0 || digits > Self::MAX_DIGITS {
                return None;
            }
            let delimiter = *b.get(digits)?;
            if !Self::DELIMITERS.contains(&delimiter) {
                return None;
            }
            let start = s[..digits].parse().ok()?;
            (
                ListKind::Ordered {
                    start,
                    delimiter: delimiter as char,
                    width: digits + 1,
                },
                digits + 1,
            )
        };

        match b.get(len) {
            None | Some(b' ') | Some(b'\t') => Some(kind),
            _ => None,
        }
    }
}
