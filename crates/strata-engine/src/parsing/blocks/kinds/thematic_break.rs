/// `***`, `---` or `___`, optionally with spaces between the characters.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const CHARS: [u8; 3] = [b'*', b'-', b'_'];
    pub const MIN_COUNT: usize = 3;

    pub fn matches(s: &str) -> bool {
        let b = s.trim_end().as_bytes();
        let Some(&first) = b.first() else {
            return false;
        };
        if !Self::CHARS.contains(&first) {
            return false;
        }
        let mut count = 0;
        for &c in b {
            match c {
                _ if c == first => count += 1,
                b' ' | b'\t' => {}
                _ => return false,
            }
        }
        count >= Self::MIN_COUNT
    }
}
