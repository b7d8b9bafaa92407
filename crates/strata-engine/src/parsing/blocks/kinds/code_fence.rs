use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// A fence marker found at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    /// Length of the marker run (at least 3).
    pub level: usize,
    /// Byte range of the trimmed info string, local to the scanned text.
    pub info: Range<usize>,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    pub const MIN_LEVEL: usize = 3;

    /// Detects an opening or closing fence marker in `s` (already stripped of
    /// indentation).
    pub fn sig(s: &str) -> Option<FenceSig> {
        let b = s.as_bytes();
        let (kind, ch) = match b.first() {
            Some(&Self::BACKTICK) => (FenceKind::Backticks, Self::BACKTICK),
            Some(&Self::TILDE) => (FenceKind::Tildes, Self::TILDE),
            _ => return None,
        };
        let level = b.iter().take_while(|&&c| c == ch).count();
        if level < Self::MIN_LEVEL {
            return None;
        }

        let rest = &s[level..];
        let lead = rest.len() - rest.trim_start().len();
        let info_text = rest.trim();
        if kind == FenceKind::Backticks && info_text.contains('`') {
            return None;
        }
        let start = level + lead;
        Some(FenceSig {
            kind,
            level,
            info: start..start + info_text.len(),
        })
    }

    /// A closing marker must match the opening kind, carry no info string,
    /// and be at least as long as the opening run.
    pub fn closes(
        open_kind: FenceKind,
        open_level: usize,
        kind: FenceKind,
        info_len: usize,
        level: usize,
    ) -> bool {
        kind == open_kind && info_len == 0 && level >= open_level
    }
}
