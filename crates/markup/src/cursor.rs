//! Position-tracking byte cursor over the input text.
//!
//! Invariant: the cursor only stops at ASCII delimiter bytes (or the end of
//! input), so every slice it hands out starts and ends on a UTF-8 boundary.

use memchr::{memchr, memchr2, memchr3};

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Cursor over `input` that starts at byte `pos`. Positions stay relative
    /// to the start of `input`.
    pub(crate) fn starting_at(input: &'a str, pos: usize) -> Self {
        debug_assert!(input.is_char_boundary(pos));
        Self { input, pos }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn end(&self) -> usize {
        self.input.len()
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub(crate) fn read(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Returns the text before the first byte in `delims` and leaves the
    /// cursor on that byte. `None` when the input ends first; the cursor does
    /// not move in that case.
    pub(crate) fn read_until(&mut self, delims: &[u8]) -> Option<&'a str> {
        debug_assert!(
            delims.iter().all(u8::is_ascii),
            "delimiters must be ASCII to keep slices on char boundaries"
        );
        let rest = &self.input.as_bytes()[self.pos..];
        let rel = match delims {
            &[a] => memchr(a, rest),
            &[a, b] => memchr2(a, b, rest),
            &[a, b, c] => memchr3(a, b, c, rest),
            _ => rest.iter().position(|b| delims.contains(b)),
        }?;
        let start = self.pos;
        self.pos += rel;
        debug_assert!(self.input.is_char_boundary(self.pos));
        Some(&self.input[start..self.pos])
    }

    /// Like `read_until`, but running off the end consumes the rest of the
    /// input instead of failing.
    pub(crate) fn read_until_or_end(&mut self, delims: &[u8]) -> &'a str {
        match self.read_until(delims) {
            Some(text) => text,
            None => {
                let start = self.pos;
                self.pos = self.input.len();
                &self.input[start..]
            }
        }
    }

    pub(crate) fn skip_while(&mut self, set: &[u8]) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && set.contains(&bytes[self.pos]) {
            self.pos += 1;
        }
    }
}
