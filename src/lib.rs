#![forbid(unsafe_code)]
#![warn(clippy::all)]
//! Zero-copy views over character buffers, with the eat/split/parse protocol
//! built on them and a JSON value parser as its main consumer.
//!
//! Nothing is copied while parsing: the remaining input and every parse result
//! are sub-ranges of the caller's buffer. Only JSON strings are copied out, into
//! the owned [`Value`] tree.
//!
//! ## Views
//!
//! A [`CharView`] is a cursor. Operations take it by mutable reference, consume
//! a prefix and leave it on the remainder. A failed operation flags the view and
//! keeps its content where it was, so the caller can inspect what failed or try
//! another parse after [`CharView::recover`].
//!
//! ```rust
//! use charview::CharView;
//!
//! let mut v = CharView::from("123abc");
//!
//! assert_eq!(v.to::<i32>().unwrap(), 123);
//! assert_eq!(v, "abc");
//!
//! assert!(v.eat(b'x').is_err());
//! assert!(v.is_error());
//! assert_eq!(v.error_view(), "abc");
//! ```
//!
//! ## Splitting
//!
//! ```rust
//! use charview::{SplitOptions, Splitter};
//!
//! let fields: Vec<_> = Splitter::new("a{,}b,c ", SplitOptions::new(b',').brackets(b'{', b'}'))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(fields[0], "a{,}b");
//! assert_eq!(fields[1], "c");
//! ```
//!
//! ## JSON
//!
//! ```rust
//! use charview::parse;
//!
//! let value = parse(r#"{"a": 1.5, "b": [true, false, "x"]}"#).unwrap();
//!
//! assert_eq!(value["a"], 1.5);
//! assert_eq!(value["b"][2], "x");
//! ```
//!
//! A failed parse reports what went wrong and the residue where it happened;
//! [`Error::position_in`] turns the residue into a line and column.

mod char_view;
mod number;
mod parser;
mod ser;
mod split;
mod view;

pub mod date;
pub mod error;
pub mod value;

pub use char_view::{is_space, CharView};
pub use error::{Error, Kind, Position};
pub use number::{float_lexeme, integer_lexeme, json_number_lexeme, Numeric};
pub use parser::{
    parse, parse_array, parse_bytes, parse_member, parse_number, parse_object, parse_string,
    parse_value, ParseResult, Parser, ParserOptions,
};
pub use split::{chop, split, Records, SplitOptions, Splitter};
pub use value::{Array, Object, Type, Value};
pub use view::View;
