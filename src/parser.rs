use tracing::{debug, trace};

use crate::{
    char_view::{is_space, CharView},
    error::{Error, Kind},
    number::json_number_lexeme,
    value::{Array, Object, Value},
};

pub type ParseResult<'a, T> = Result<T, Error<'a>>;

const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest nesting of objects and arrays accepted.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Characters that may follow a keyword or a number.
fn is_boundary(c: u8) -> bool {
    is_space(c) || matches!(c, b'{' | b'}' | b'[' | b']' | b',' | b':')
}

fn at_boundary(v: &CharView<'_>) -> bool {
    v.front().map_or(true, is_boundary)
}

/// Eat `word` only if a boundary follows it, so `nullfoo` is not `null`.
fn keyword(v: &mut CharView<'_>, word: &str) -> bool {
    let mut attempt = *v;

    if attempt.eat_literal(word).is_ok() && at_boundary(&attempt) {
        *v = attempt;
        true
    } else {
        false
    }
}

fn owned<'a>(v: &mut CharView<'a>, raw: CharView<'a>) -> ParseResult<'a, String> {
    match raw.as_str() {
        Ok(s) => Ok(s.to_owned()),
        Err(_) => {
            *v = raw;
            Err(v.fail(Kind::InvalidUtf8))
        }
    }
}

/// Raw content of a string whose opening quote was already eaten. Each
/// backslash escapes the next character; escapes are not decoded. `v` is left
/// on the closing quote.
pub fn parse_string<'a>(v: &mut CharView<'a>) -> ParseResult<'a, CharView<'a>> {
    v.check()?;

    let bytes = v.as_bytes();
    let mut i = 0;

    while let Some(at) = memchr::memchr2(b'"', b'\\', &bytes[i..]) {
        let at = i + at;

        if bytes[at] == b'"' {
            *v = CharView::new(&bytes[at..]);
            return Ok(CharView::new(&bytes[..at]));
        }

        i = (at + 2).min(bytes.len());
    }

    Err(v.fail(Kind::UnterminatedString))
}

/// JSON number followed by white space, a structural character or the end.
pub fn parse_number<'a>(v: &mut CharView<'a>) -> ParseResult<'a, f64> {
    let start = *v;
    let lexeme = v.eat_with(json_number_lexeme, Kind::MalformedNumber)?;

    let number = if at_boundary(v) {
        lexeme.as_str().ok().and_then(|s| s.parse().ok())
    } else {
        None
    };

    number.ok_or_else(|| {
        *v = start;
        v.fail(Kind::MalformedNumber)
    })
}

/// Recursive descent JSON parser over a [`CharView`].
///
/// Every method takes the view by mutable reference, consumes a prefix and
/// leaves the view on the remainder. On failure the view is flagged at the
/// point where parsing stopped.
#[derive(Debug, Default, Clone)]
pub struct Parser {
    options: ParserOptions,
    depth: usize,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Parse a whole document: one value and nothing but white space after it.
    pub fn parse<'a>(&mut self, mut v: CharView<'a>) -> ParseResult<'a, Value> {
        debug!(len = v.len(), "parsing json");

        self.depth = 0;
        let value = self.value(&mut v)?;

        if !v.ws_trim().is_empty() {
            return Err(v.fail(Kind::TrailingCharacters));
        }

        debug!(kind = ?value.kind(), "parsed json");

        Ok(value)
    }

    /// An empty view is `null`.
    pub fn value<'a>(&mut self, v: &mut CharView<'a>) -> ParseResult<'a, Value> {
        v.ws_trim().check()?;

        match v.front() {
            None => Ok(Value::Null),
            Some(b'{') => {
                v.eat(b'{')?;
                let object = self.nested(v, Self::object)?;
                v.ws_trim().eat(b'}')?;

                Ok(Value::Object(object))
            }
            Some(b'[') => {
                v.eat(b'[')?;
                let array = self.nested(v, Self::array)?;
                v.ws_trim().eat(b']')?;

                Ok(Value::Array(array))
            }
            Some(b'"') => {
                v.eat(b'"')?;
                let raw = parse_string(v)?;
                let string = owned(v, raw)?;
                v.eat(b'"')?;

                Ok(Value::String(string))
            }
            Some(_) if keyword(v, "null") => Ok(Value::Null),
            Some(_) if keyword(v, "true") => Ok(Value::Bool(true)),
            Some(_) if keyword(v, "false") => Ok(Value::Bool(false)),
            Some(_) => parse_number(v).map(Value::Number),
        }
    }

    pub fn member<'a>(&mut self, v: &mut CharView<'a>) -> ParseResult<'a, (String, Value)> {
        v.ws_trim().eat(b'"')?;
        let raw = parse_string(v)?;
        let key = owned(v, raw)?;
        v.eat(b'"')?;
        v.ws_trim().eat(b':')?;
        let value = self.value(v)?;

        Ok((key, value))
    }

    /// Members after `{`, up to but not including `}`. The first of duplicate
    /// keys is kept.
    pub fn object<'a>(&mut self, v: &mut CharView<'a>) -> ParseResult<'a, Object> {
        let mut object = Object::new();

        if v.ws_trim().front() == Some(b'}') {
            return Ok(object);
        }

        loop {
            let (key, value) = self.member(v)?;

            if object.contains_key(&key) {
                trace!(%key, "duplicate key ignored");
            } else {
                object.insert(key, value);
            }

            if v.ws_trim().front() != Some(b',') {
                break;
            }
            v.eat(b',')?;
        }

        Ok(object)
    }

    /// Values after `[`, up to but not including `]`.
    pub fn array<'a>(&mut self, v: &mut CharView<'a>) -> ParseResult<'a, Array> {
        let mut array = Array::new();

        if v.ws_trim().front() == Some(b']') {
            return Ok(array);
        }

        loop {
            array.push(self.value(v)?);

            if v.ws_trim().front() != Some(b',') {
                break;
            }
            v.eat(b',')?;
        }

        Ok(array)
    }

    fn nested<'a, T>(
        &mut self,
        v: &mut CharView<'a>,
        parse: fn(&mut Self, &mut CharView<'a>) -> ParseResult<'a, T>,
    ) -> ParseResult<'a, T> {
        if self.depth >= self.options.max_depth {
            return Err(v.fail(Kind::TooDeep(self.options.max_depth)));
        }

        self.depth += 1;
        let result = parse(self, v);
        self.depth -= 1;

        result
    }
}

pub fn parse(input: &str) -> ParseResult<'_, Value> {
    Parser::default().parse(CharView::from(input))
}

pub fn parse_bytes(input: &[u8]) -> ParseResult<'_, Value> {
    Parser::default().parse(CharView::from(input))
}

pub fn parse_value<'a>(v: &mut CharView<'a>) -> ParseResult<'a, Value> {
    Parser::default().value(v)
}

pub fn parse_member<'a>(v: &mut CharView<'a>) -> ParseResult<'a, (String, Value)> {
    Parser::default().member(v)
}

pub fn parse_object<'a>(v: &mut CharView<'a>) -> ParseResult<'a, Object> {
    Parser::default().object(v)
}

pub fn parse_array<'a>(v: &mut CharView<'a>) -> ParseResult<'a, Array> {
    Parser::default().array(v)
}
