use thiserror::Error as ThisError;

use crate::view::View;

/// Longest piece of residue shown when an error is displayed.
const SNIPPET_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum Kind {
    #[error("input exhausted")]
    Exhausted,
    #[error("unexpected character, expected {expected:?}")]
    UnexpectedChar { expected: char },
    #[error("unmatched delimiters")]
    UnmatchedDelimiters,
    #[error("escape character can't be used as a delimiter")]
    EscapeIsDelimiter,
    #[error("malformed number")]
    MalformedNumber,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid utf-8")]
    InvalidUtf8,
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
    #[error("unexpected characters after the root value")]
    TrailingCharacters,
    #[error("invalid separator, expected one of {0:?}")]
    InvalidSeparator(&'static str),
}

/// What failed and the unparsed residue at the point of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[error("{kind} at `{}`", snippet(.residue))]
pub struct Error<'a> {
    pub kind: Kind,
    pub residue: &'a [u8],
}

impl<'a> Error<'a> {
    pub fn new(kind: Kind, residue: &'a [u8]) -> Self {
        Self { kind, residue }
    }

    /// Byte offset of the residue inside `source`, if it was cut from it.
    pub fn offset_in(&self, source: &[u8]) -> Option<usize> {
        View::new(self.residue).offset_from(&View::new(source))
    }

    /// Line and column of the residue inside `source`.
    pub fn position_in(&self, source: &[u8]) -> Option<Position> {
        self.offset_in(source)
            .map(|offset| Position::locate(source, offset))
    }
}

/// 1-based line and column, columns counted in UTF-8 characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, col: 1 }
    }
}

impl Position {
    pub fn locate(source: &[u8], offset: usize) -> Self {
        let consumed = &source[..offset.min(source.len())];

        if consumed.is_empty() {
            return Self::default();
        }

        let lines = bytecount::count(consumed, b'\n');
        let line_start = memchr::memrchr(b'\n', consumed).map_or(0, |i| i + 1);

        Self {
            line: lines + 1,
            col: bytecount::num_chars(&consumed[line_start..]) + 1,
        }
    }
}

fn snippet(residue: &[u8]) -> String {
    let shown = &residue[..residue.len().min(SNIPPET_LEN)];
    let mut out = String::from_utf8_lossy(shown).into_owned();

    if residue.len() > SNIPPET_LEN {
        out.push_str("...");
    }

    out
}
