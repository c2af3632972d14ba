use std::iter::FusedIterator;

use tracing::trace;

use crate::{
    char_view::{is_space, CharView},
    error::{Error, Kind},
};

/// Delimiter, bracket pair and escape used when splitting a view into fields.
///
/// Inside an `open`..`close` region the delimiter is not a separator. The
/// escape character neutralizes the character after it, in or out of a
/// region. Using the same character for `open` and `close` gives quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    pub delimiter: u8,
    pub open: Option<u8>,
    pub close: Option<u8>,
    pub escape: Option<u8>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl SplitOptions {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            open: None,
            close: None,
            escape: None,
        }
    }

    pub fn brackets(mut self, open: u8, close: u8) -> Self {
        self.open = Some(open);
        self.close = Some(close);
        self
    }

    pub fn quoted(self, quote: u8) -> Self {
        self.brackets(quote, quote)
    }

    pub fn escape(mut self, escape: u8) -> Self {
        self.escape = Some(escape);
        self
    }

    fn escape_is_delimiter(&self) -> bool {
        self.escape.is_some_and(|e| {
            e == self.delimiter || Some(e) == self.open || Some(e) == self.close
        })
    }
}

/// Return the field up to the first delimiter outside any bracketed region and
/// advance `v` past that delimiter. Without a delimiter the whole view is the
/// field and `v` is left empty.
///
/// On unbalanced brackets `v` is flagged and left where it was.
pub fn split<'a>(v: &mut CharView<'a>, options: &SplitOptions) -> Result<CharView<'a>, Error<'a>> {
    v.check()?;

    if options.escape_is_delimiter() {
        return Err(v.fail(Kind::EscapeIsDelimiter));
    }

    let bytes = v.as_bytes();
    let mut level = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];

        if Some(c) == options.escape {
            i += 2;
            continue;
        }

        if level == 0 && c == options.delimiter {
            break;
        }

        // close first so that open == close quotes
        if level > 0 && Some(c) == options.close {
            level -= 1;
        } else if Some(c) == options.open {
            level += 1;
        } else if Some(c) == options.close {
            trace!(at = i, "close without open");
            return Err(v.fail(Kind::UnmatchedDelimiters));
        }

        i += 1;
    }

    if level != 0 {
        trace!(level, "open region at end of input");
        return Err(v.fail(Kind::UnmatchedDelimiters));
    }

    let i = i.min(bytes.len());
    let field = CharView::new(&bytes[..i]);
    *v = CharView::new(&bytes[(i + 1).min(bytes.len())..]);

    Ok(field)
}

/// Return the content between `open` and its matching `close` and advance `v`
/// past the close.
///
/// `{da\}ta}...` chops to `da\}ta` and leaves `...`.
pub fn chop<'a>(
    v: &mut CharView<'a>,
    open: u8,
    close: u8,
    escape: u8,
) -> Result<CharView<'a>, Error<'a>> {
    v.check()?;

    if escape == open || escape == close {
        return Err(v.fail(Kind::EscapeIsDelimiter));
    }

    let start = *v;
    v.eat(open)?;

    let bytes = v.as_bytes();
    let mut level = 1usize;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];

        if c == escape {
            i += 2;
            continue;
        }

        if c == close {
            level -= 1;
            if level == 0 {
                break;
            }
        } else if c == open {
            level += 1;
        }

        i += 1;
    }

    if level != 0 {
        *v = start;
        return Err(v.fail(Kind::UnmatchedDelimiters));
    }

    let token = CharView::new(&bytes[..i]);
    *v = CharView::new(&bytes[i + 1..]);

    Ok(token)
}

/// Iterator over the fields of a view.
///
/// Fields are trimmed of surrounding white space unless the bracket characters
/// are white space themselves. Interior empty fields are yielded, also with a
/// white space delimiter such as tab. Iteration ends when the remainder is
/// exhausted, and after an error it yields nothing.
#[derive(Debug, Clone)]
pub struct Splitter<'a> {
    rest: CharView<'a>,
    current: CharView<'a>,
    options: SplitOptions,
    trim: bool,
    done: bool,
}

impl<'a> Splitter<'a> {
    pub fn new(v: impl Into<CharView<'a>>, options: SplitOptions) -> Self {
        Self {
            rest: v.into(),
            current: CharView::default(),
            options,
            trim: true,
            done: false,
        }
    }

    /// Unsplit remainder.
    pub fn remaining(&self) -> CharView<'a> {
        self.rest
    }

    /// Last field produced.
    pub fn current(&self) -> CharView<'a> {
        self.current
    }
}

impl<'a> Iterator for Splitter<'a> {
    type Item = Result<CharView<'a>, Error<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // a white space delimiter must survive until it is split on
        if self.trim
            && !self.options.open.is_some_and(is_space)
            && !is_space(self.options.delimiter)
        {
            self.rest.ws_trim();
        }

        if self.rest.is_empty() {
            self.done = true;
            self.current = self.rest;
            return None;
        }

        match split(&mut self.rest, &self.options) {
            Ok(mut field) => {
                if self.trim && !self.options.open.is_some_and(is_space) {
                    field.ws_trim();
                }
                if self.trim && !self.options.close.is_some_and(is_space) {
                    field.trim_ws();
                }
                self.current = field;

                Some(Ok(field))
            }
            Err(e) => {
                self.done = true;

                Some(Err(e))
            }
        }
    }
}

impl<'a> FusedIterator for Splitter<'a> {}

/// Iterator over records, each yielded as a [`Splitter`] over its fields.
///
/// Records are split on `record` with the same brackets and escape as the
/// fields, so a quoted field may contain the record delimiter.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    records: Splitter<'a>,
    fields: SplitOptions,
}

impl<'a> Records<'a> {
    pub fn new(v: impl Into<CharView<'a>>, record: u8, fields: SplitOptions) -> Self {
        let records = SplitOptions {
            delimiter: record,
            ..fields
        };

        // records stay untrimmed so a white space field delimiter at either
        // end still separates an empty field
        let records = Splitter {
            trim: false,
            ..Splitter::new(v, records)
        };

        Self { records, fields }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Splitter<'a>, Error<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let fields = self.fields;

        self.records
            .next()
            .map(|record| record.map(|r| Splitter::new(r, fields)))
    }
}

impl<'a> FusedIterator for Records<'a> {}
