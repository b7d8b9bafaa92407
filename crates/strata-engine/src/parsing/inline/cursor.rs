/// A byte cursor over one scope of an inline string.
///
/// Positions are local indices into `s`; the cursor never moves past `end`,
/// which lets link text be scanned as its own scope without slicing.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub s: &'a str,
    /// Current index into `s`.
    pub i: usize,
    /// Exclusive upper bound of the scope.
    pub end: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str, start: usize, end: usize) -> Self {
        Self {
            s,
            i: start,
            end: end.min(s.len()),
        }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.end
    }

    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Peeks `n` bytes ahead without advancing. Stays within the scope.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        let at = self.i + n;
        if at < self.end {
            self.s.as_bytes().get(at).copied()
        } else {
            None
        }
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes, clamped to the scope end.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.end);
    }

    pub fn jump_to(&mut self, pos: usize) {
        self.i = pos.min(self.end);
    }

    /// Length of the run of `b` starting at the cursor.
    pub fn run_of(&self, b: u8) -> usize {
        let mut n = 0;
        while self.peek_at(n) == Some(b) {
            n += 1;
        }
        n
    }

    /// Skips spaces, tabs and line breaks.
    pub fn skip_whitespace(&mut self) {
        while self
            .peek()
            .is_some_and(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
        {
            self.i += 1;
        }
    }

    /// Consumes `b` if it is next.
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.i += 1;
            true
        } else {
            false
        }
    }

    /// The character just before `pos`. Looks past the scope start, since
    /// flanking depends on the real neighbour.
    pub fn char_before(&self, pos: usize) -> Option<char> {
        self.s.get(..pos)?.chars().next_back()
    }

    /// The character at `pos`, if it lies inside the scope.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.end {
            return None;
        }
        self.s.get(pos..)?.chars().next()
    }
}
