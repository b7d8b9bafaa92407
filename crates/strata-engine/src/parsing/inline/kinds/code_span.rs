/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones": no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Finds the start of the next backtick run of exactly `len` ticks in
    /// `bytes[from..end]`. Longer or shorter runs are content.
    pub fn closing_run(bytes: &[u8], from: usize, end: usize, len: usize) -> Option<usize> {
        let end = end.min(bytes.len());
        let mut i = from;
        while i < end {
            if bytes[i] != Self::TICK {
                i += 1;
                continue;
            }
            let run = bytes[i..end].iter().take_while(|&&b| b == Self::TICK).count();
            if run == len {
                return Some(i);
            }
            i += run;
        }
        None
    }
}
