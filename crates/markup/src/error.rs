//! Parse errors for tag scanning and tree building.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorCode {
    /// Trimmed input is empty or does not start with `<`.
    NotMarkup,
    /// Input ended inside a tag header or with elements still open.
    Incomplete,
    /// A closing tag does not match the innermost open element.
    OpenCloseMismatch,
    /// A closing tag appeared with no element open.
    StackUnderflow,
}

impl ParseErrorCode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotMarkup => "not markup",
            Self::Incomplete => "incomplete",
            Self::OpenCloseMismatch => "open/close mismatch",
            Self::StackUnderflow => "stack underflow",
        }
    }
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First error hit while parsing; no partial tree accompanies it.
///
/// `position` is a byte offset into the caller's input (before trimming).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub position: usize,
}

impl ParseError {
    pub(crate) fn new(code: ParseErrorCode, position: usize) -> Self {
        Self { code, position }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.code, self.position)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_position() {
        let err = ParseError::new(ParseErrorCode::OpenCloseMismatch, 12);
        assert_eq!(err.to_string(), "open/close mismatch at byte 12");
    }

    #[test]
    fn usable_as_boxed_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(ParseError::new(ParseErrorCode::Incomplete, 3));
        assert_eq!(err.to_string(), "incomplete at byte 3");
    }
}
