use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    sequence::{pair, tuple},
    IResult,
};

use crate::char_view::CharView;

/// Types a [`CharView`] can be converted to with [`CharView::to`].
///
/// `lex` recognizes the longest prefix in the type's textual grammar and
/// `convert` turns that prefix into a value, failing on overflow.
pub trait Numeric: Sized {
    fn lex(input: CharView<'_>) -> IResult<CharView<'_>, CharView<'_>>;

    fn convert(lexeme: &str) -> Option<Self>;
}

/// `-?[0-9]+`
pub fn integer_lexeme(input: CharView<'_>) -> IResult<CharView<'_>, CharView<'_>> {
    recognize(pair(opt(char('-')), digit1))(input)
}

/// `-?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?`
///
/// A dangling exponent marker is left unconsumed, so `1.5em` lexes as `1.5`.
pub fn float_lexeme(input: CharView<'_>) -> IResult<CharView<'_>, CharView<'_>> {
    recognize(tuple((
        opt(char('-')),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

/// JSON number: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
///
/// A `.` or exponent marker without digits is left unconsumed; the caller
/// decides whether what follows is acceptable.
pub fn json_number_lexeme(input: CharView<'_>) -> IResult<CharView<'_>, CharView<'_>> {
    recognize(tuple((
        opt(char('-')),
        alt((tag("0"), recognize(pair(one_of("123456789"), digit0)))),
        opt(pair(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

macro_rules! integer {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn lex(input: CharView<'_>) -> IResult<CharView<'_>, CharView<'_>> {
                    integer_lexeme(input)
                }

                fn convert(lexeme: &str) -> Option<Self> {
                    lexeme.parse().ok()
                }
            }
        )*
    };
}

macro_rules! float {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn lex(input: CharView<'_>) -> IResult<CharView<'_>, CharView<'_>> {
                    float_lexeme(input)
                }

                fn convert(lexeme: &str) -> Option<Self> {
                    lexeme.parse().ok()
                }
            }
        )*
    };
}

integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float!(f32, f64);
