use std::{
    ffi::CStr,
    fmt,
    iter::{Copied, Enumerate},
    ops::{Range, RangeFrom, RangeFull, RangeTo},
    slice,
    str::{FromStr, Utf8Error},
};

use nom::{
    error::{ErrorKind, ParseError},
    CompareResult, IResult, Parser,
};
use tracing::trace;

use crate::{
    error::{Error, Kind},
    number::Numeric,
    view::View,
};

/// JSON whitespace plus vertical tab and form feed.
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// View of contiguous characters that can be eaten, trimmed and converted.
///
/// Every consuming operation either advances the view and returns `Ok`, or
/// flags the view as an error and returns `Err`. A flagged view keeps the
/// content it had before the failed attempt, so `error_view()` shows exactly
/// what could not be consumed. Consuming operations on a flagged view fail
/// with the same error until [`CharView::recover`] is called.
#[derive(Clone, Copy, Default)]
pub struct CharView<'a> {
    view: View<'a, u8>,
    error: Option<Kind>,
}

impl<'a> CharView<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            view: View::new(data),
            error: None,
        }
    }

    /// View up to, not including, the first NUL.
    pub fn from_nul_terminated(data: &'a [u8]) -> Self {
        let end = memchr::memchr(0, data).unwrap_or(data.len());

        Self::new(&data[..end])
    }

    pub const fn len(&self) -> usize {
        self.view.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// True when not flagged and at least one character is left.
    pub fn is_valid(&self) -> bool {
        self.error.is_none() && self.view.is_valid()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error_kind(&self) -> Option<Kind> {
        self.error
    }

    pub const fn as_bytes(&self) -> &'a [u8] {
        self.view.as_slice()
    }

    pub const fn as_view(&self) -> View<'a, u8> {
        self.view
    }

    pub fn as_str(&self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    pub fn front(&self) -> Option<u8> {
        self.view.front().copied()
    }

    pub fn back(&self) -> Option<u8> {
        self.view.back().copied()
    }

    pub fn advance(&mut self) -> Option<u8> {
        self.view.advance().copied()
    }

    pub fn drop(&mut self, n: isize) -> &mut Self {
        self.view.drop(n);
        self
    }

    pub fn take(&mut self, n: isize) -> &mut Self {
        self.view.take(n);
        self
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.view.ptr_eq(&other.view)
    }

    /// Copy of this view flagged with `kind`.
    pub fn error(&self, kind: Kind) -> Self {
        Self {
            view: self.view,
            error: Some(kind),
        }
    }

    /// The content of a flagged view, unflagged.
    pub fn error_view(&self) -> Self {
        Self::new(self.as_bytes())
    }

    /// Clear the error flag so another parse can be attempted.
    pub fn recover(&mut self) -> &mut Self {
        self.error = None;
        self
    }

    pub fn check(&self) -> Result<(), Error<'a>> {
        match self.error {
            Some(kind) => Err(Error::new(kind, self.as_bytes())),
            None => Ok(()),
        }
    }

    /// Flag the view and return the matching error.
    pub fn fail(&mut self, kind: Kind) -> Error<'a> {
        trace!(%kind, remaining = self.len(), "view flagged");

        self.error = Some(kind);

        Error::new(kind, self.as_bytes())
    }

    pub fn eat(&mut self, c: u8) -> Result<(), Error<'a>> {
        self.check()?;

        match self.front() {
            Some(front) if front == c => {
                self.view.drop(1);
                Ok(())
            }
            Some(_) => Err(self.fail(Kind::UnexpectedChar {
                expected: char::from(c),
            })),
            None => Err(self.fail(Kind::Exhausted)),
        }
    }

    /// Eat all of `literal` or nothing at all.
    pub fn eat_literal(&mut self, literal: impl AsRef<[u8]>) -> Result<(), Error<'a>> {
        self.check()?;

        let mut attempt = *self;
        for &c in literal.as_ref() {
            if let Err(e) = attempt.eat(c) {
                return Err(self.fail(e.kind));
            }
        }

        *self = attempt;

        Ok(())
    }

    /// Run a nom parser on the view, advancing past what it consumed.
    pub fn eat_with<O, P>(&mut self, mut parser: P, kind: Kind) -> Result<O, Error<'a>>
    where
        P: Parser<CharView<'a>, O, nom::error::Error<CharView<'a>>>,
    {
        self.check()?;

        match parser.parse(*self) {
            Ok((rest, out)) => {
                *self = rest;
                Ok(out)
            }
            Err(_) => Err(self.fail(kind)),
        }
    }

    /// Remove leading white space.
    pub fn ws_trim(&mut self) -> &mut Self {
        if !self.is_error() {
            while self.front().is_some_and(is_space) {
                self.view.drop(1);
            }
        }

        self
    }

    /// Remove trailing white space.
    pub fn trim_ws(&mut self) -> &mut Self {
        if !self.is_error() {
            while self.back().is_some_and(is_space) {
                self.view.drop(-1);
            }
        }

        self
    }

    pub fn trim(&mut self) -> &mut Self {
        self.ws_trim().trim_ws()
    }

    /// Convert the longest numeric prefix and advance past it.
    pub fn to<X: Numeric>(&mut self) -> Result<X, Error<'a>> {
        let start = *self;
        let lexeme = self.eat_with(|i: CharView<'a>| X::lex(i), Kind::MalformedNumber)?;

        match lexeme.as_str().ok().and_then(X::convert) {
            Some(x) => Ok(x),
            None => {
                *self = start;
                Err(self.fail(Kind::MalformedNumber))
            }
        }
    }
}

impl<'a> fmt::Debug for CharView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharView")
            .field("data", &String::from_utf8_lossy(self.as_bytes()))
            .field("error", &self.error)
            .finish()
    }
}

impl<'a> fmt::Display for CharView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl<'a> From<&'a str> for CharView<'a> {
    fn from(data: &'a str) -> Self {
        Self::new(data.as_bytes())
    }
}

impl<'a> From<&'a String> for CharView<'a> {
    fn from(data: &'a String) -> Self {
        Self::new(data.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for CharView<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for CharView<'a> {
    fn from(data: &'a [u8; N]) -> Self {
        Self::new(data)
    }
}

impl<'a> From<&'a CStr> for CharView<'a> {
    fn from(data: &'a CStr) -> Self {
        Self::new(data.to_bytes())
    }
}

impl<'a> From<View<'a, u8>> for CharView<'a> {
    fn from(view: View<'a, u8>) -> Self {
        Self { view, error: None }
    }
}

impl<'a, 'b> PartialEq<CharView<'b>> for CharView<'a> {
    fn eq(&self, other: &CharView<'b>) -> bool {
        self.error == other.error && self.as_bytes() == other.as_bytes()
    }
}

impl<'a> Eq for CharView<'a> {}

impl<'a> PartialEq<[u8]> for CharView<'a> {
    fn eq(&self, other: &[u8]) -> bool {
        !self.is_error() && self.as_bytes() == other
    }
}

impl<'a, 'b> PartialEq<&'b [u8]> for CharView<'a> {
    fn eq(&self, other: &&'b [u8]) -> bool {
        *self == **other
    }
}

impl<'a> PartialEq<str> for CharView<'a> {
    fn eq(&self, other: &str) -> bool {
        *self == *other.as_bytes()
    }
}

impl<'a, 'b> PartialEq<&'b str> for CharView<'a> {
    fn eq(&self, other: &&'b str) -> bool {
        *self == *other.as_bytes()
    }
}

impl<'a> IntoIterator for CharView<'a> {
    type Item = u8;

    type IntoIter = Copied<slice::Iter<'a, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_bytes().iter().copied()
    }
}

impl<'a> nom::InputLength for CharView<'a> {
    fn input_len(&self) -> usize {
        self.len()
    }
}

impl<'a> nom::InputTake for CharView<'a> {
    fn take(&self, count: usize) -> Self {
        Self::new(&self.as_bytes()[..count])
    }

    fn take_split(&self, count: usize) -> (Self, Self) {
        let (prefix, suffix) = self.as_bytes().split_at(count);

        (Self::new(suffix), Self::new(prefix))
    }
}

impl<'a> nom::InputIter for CharView<'a> {
    type Item = u8;

    type Iter = Enumerate<Copied<slice::Iter<'a, u8>>>;

    type IterElem = Copied<slice::Iter<'a, u8>>;

    fn iter_indices(&self) -> Self::Iter {
        self.as_bytes().iter().copied().enumerate()
    }

    fn iter_elements(&self) -> Self::IterElem {
        self.as_bytes().iter().copied()
    }

    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.as_bytes().iter().position(|c| predicate(*c))
    }

    fn slice_index(&self, count: usize) -> Result<usize, nom::Needed> {
        if self.len() >= count {
            Ok(count)
        } else {
            Err(nom::Needed::new(count - self.len()))
        }
    }
}

impl<'a> nom::InputTakeAtPosition for CharView<'a> {
    type Item = u8;

    fn split_at_position<P, E: ParseError<Self>>(&self, predicate: P) -> IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.as_bytes().iter().position(|c| predicate(*c)) {
            Some(n) => Ok(nom::InputTake::take_split(self, n)),
            None => Err(nom::Err::Incomplete(nom::Needed::new(1))),
        }
    }

    fn split_at_position1<P, E: ParseError<Self>>(
        &self,
        predicate: P,
        e: ErrorKind,
    ) -> IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.as_bytes().iter().position(|c| predicate(*c)) {
            Some(0) => Err(nom::Err::Error(E::from_error_kind(*self, e))),
            Some(n) => Ok(nom::InputTake::take_split(self, n)),
            None => Err(nom::Err::Incomplete(nom::Needed::new(1))),
        }
    }

    fn split_at_position_complete<P, E: ParseError<Self>>(
        &self,
        predicate: P,
    ) -> IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        let n = self
            .as_bytes()
            .iter()
            .position(|c| predicate(*c))
            .unwrap_or(self.len());

        Ok(nom::InputTake::take_split(self, n))
    }

    fn split_at_position1_complete<P, E: ParseError<Self>>(
        &self,
        predicate: P,
        e: ErrorKind,
    ) -> IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.as_bytes().iter().position(|c| predicate(*c)) {
            Some(0) => Err(nom::Err::Error(E::from_error_kind(*self, e))),
            Some(n) => Ok(nom::InputTake::take_split(self, n)),
            None if self.is_empty() => Err(nom::Err::Error(E::from_error_kind(*self, e))),
            None => Ok(nom::InputTake::take_split(self, self.len())),
        }
    }
}

impl<'a, 'b> nom::Compare<&'b str> for CharView<'a> {
    fn compare(&self, t: &'b str) -> CompareResult {
        nom::Compare::compare(&self.as_bytes(), t)
    }

    fn compare_no_case(&self, t: &'b str) -> CompareResult {
        nom::Compare::compare_no_case(&self.as_bytes(), t)
    }
}

impl<'a, 'b> nom::Compare<&'b [u8]> for CharView<'a> {
    fn compare(&self, t: &'b [u8]) -> CompareResult {
        nom::Compare::compare(&self.as_bytes(), t)
    }

    fn compare_no_case(&self, t: &'b [u8]) -> CompareResult {
        nom::Compare::compare_no_case(&self.as_bytes(), t)
    }
}

impl<'a> nom::AsBytes for CharView<'a> {
    fn as_bytes(&self) -> &[u8] {
        self.view.as_slice()
    }
}

impl<'a> nom::FindToken<u8> for CharView<'a> {
    fn find_token(&self, token: u8) -> bool {
        memchr::memchr(token, self.view.as_slice()).is_some()
    }
}

impl<'a, 'b> nom::FindSubstring<&'b str> for CharView<'a> {
    fn find_substring(&self, substr: &'b str) -> Option<usize> {
        memchr::memmem::find(self.view.as_slice(), substr.as_bytes())
    }
}

impl<'a, R: FromStr> nom::ParseTo<R> for CharView<'a> {
    fn parse_to(&self) -> Option<R> {
        self.as_str().ok()?.parse().ok()
    }
}

impl<'a> nom::Offset for CharView<'a> {
    fn offset(&self, second: &Self) -> usize {
        second.as_bytes().as_ptr() as usize - self.as_bytes().as_ptr() as usize
    }
}

impl<'a> nom::Slice<Range<usize>> for CharView<'a> {
    fn slice(&self, range: Range<usize>) -> Self {
        Self::new(&self.as_bytes()[range])
    }
}

impl<'a> nom::Slice<RangeTo<usize>> for CharView<'a> {
    fn slice(&self, range: RangeTo<usize>) -> Self {
        Self::new(&self.as_bytes()[range])
    }
}

impl<'a> nom::Slice<RangeFrom<usize>> for CharView<'a> {
    fn slice(&self, range: RangeFrom<usize>) -> Self {
        Self::new(&self.as_bytes()[range])
    }
}

impl<'a> nom::Slice<RangeFull> for CharView<'a> {
    fn slice(&self, _range: RangeFull) -> Self {
        Self::new(self.as_bytes())
    }
}
