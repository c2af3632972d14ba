use std::ffi::CStr;

use charview::{CharView, Kind};

#[test]
fn construction() {
    let v = CharView::from("abc");
    assert_eq!(v.len(), 3);

    let v = CharView::from_nul_terminated(b"abc\0def");
    assert_eq!(v, "abc");

    let v = CharView::from_nul_terminated(b"abc");
    assert_eq!(v, "abc");

    let v = CharView::from(CStr::from_bytes_with_nul(b"xyz\0").unwrap());
    assert_eq!(v, "xyz");
}

mod eat {
    use charview::{CharView, Kind};

    #[test]
    fn eat_char() {
        let mut v = CharView::from("abc");

        assert!(v.eat(b'a').is_ok());
        assert!(!v.is_error());
        assert_eq!(v, "bc");
    }

    #[test]
    fn eat_wrong_char_keeps_content() {
        let mut v = CharView::from("abc");

        let err = v.eat(b'x').unwrap_err();

        assert_eq!(err.kind, Kind::UnexpectedChar { expected: 'x' });
        assert_eq!(err.residue, b"abc");
        assert!(v.is_error());
        assert!(!v.is_valid());
        assert_eq!(v.error_view(), "abc");
    }

    #[test]
    fn eat_from_empty_is_exhausted() {
        let mut v = CharView::from("");

        assert_eq!(v.eat(b'a').unwrap_err().kind, Kind::Exhausted);
    }

    #[test]
    fn errors_are_sticky_until_recovered() {
        let mut v = CharView::from("abc");

        assert!(v.eat(b'b').is_err());
        assert!(v.eat(b'a').is_err());
        assert_eq!(v.error_view(), "abc");

        v.recover();
        assert!(v.eat(b'a').is_ok());
        assert_eq!(v, "bc");
    }

    #[test]
    fn eat_literal() {
        let mut v = CharView::from("abc");

        assert!(v.eat_literal("ab").is_ok());
        assert_eq!(v, "c");
    }

    #[test]
    fn eat_literal_is_atomic() {
        let mut v = CharView::from("abc");

        assert!(v.eat_literal("ac").is_err());
        assert_eq!(v.error_view(), "abc");

        let mut v = CharView::from("ab");

        let err = v.eat_literal("abc").unwrap_err();
        assert_eq!(err.kind, Kind::Exhausted);
        assert_eq!(v.error_view(), "ab");
    }

    #[test]
    fn eat_counted_prefix() {
        let mut v = CharView::from("abc");

        assert!(v.eat_literal(&"ac".as_bytes()[..1]).is_ok());
        assert_eq!(v, "bc");
    }

    #[test]
    fn error_copy_keeps_content() {
        let v = CharView::from("abc");
        let e = v.error(Kind::Exhausted);

        assert!(!v.is_error());
        assert!(e.is_error());
        assert_eq!(e.error_kind(), Some(Kind::Exhausted));
        assert_eq!(e.error_view(), v);
    }
}

mod trim {
    use charview::CharView;

    #[test]
    fn leading_and_trailing() {
        let mut v = CharView::from(" \tabc\n");

        v.ws_trim();
        assert_eq!(v, "abc\n");
        v.ws_trim();
        assert_eq!(v, "abc\n");
        v.trim_ws();
        assert_eq!(v, "abc");
        v.trim_ws();
        assert_eq!(v, "abc");
    }

    #[test]
    fn vertical_tab_and_form_feed() {
        let mut v = CharView::from("\x0b\x0c a \r\x0c");

        v.trim();
        assert_eq!(v, "a");
    }

    #[test]
    fn all_white_space() {
        let mut v = CharView::from(" \n\t ");

        v.trim();
        assert!(v.is_empty());
        assert!(!v.is_error());
    }
}

mod to {
    use charview::{CharView, Kind};

    #[test]
    fn integer_prefix() {
        let mut v = CharView::from("123abc");

        assert_eq!(v.to::<i32>().unwrap(), 123);
        assert_eq!(v, "abc");
    }

    #[test]
    fn negative_integer() {
        let mut v = CharView::from("-42,");

        assert_eq!(v.to::<i64>().unwrap(), -42);
        assert_eq!(v, ",");
    }

    #[test]
    fn float_prefix() {
        let mut v = CharView::from("1.23abc");

        assert_eq!(v.to::<f64>().unwrap(), 1.23);
        assert_eq!(v, "abc");
    }

    #[test]
    fn float_with_exponent() {
        let mut v = CharView::from("-1.25E-2 x");

        assert_eq!(v.to::<f64>().unwrap(), -1.25e-2);
        assert_eq!(v, " x");
    }

    #[test]
    fn dangling_exponent_is_not_consumed() {
        let mut v = CharView::from("1.5em");

        assert_eq!(v.to::<f64>().unwrap(), 1.5);
        assert_eq!(v, "em");
    }

    #[test]
    fn no_digits_fails_in_place() {
        let mut v = CharView::from("abc");

        let err = v.to::<i32>().unwrap_err();

        assert_eq!(err.kind, Kind::MalformedNumber);
        assert!(v.is_error());
        assert_eq!(v.error_view(), "abc");
    }

    #[test]
    fn overflow_fails_in_place() {
        let mut v = CharView::from("300 rest");

        assert!(v.to::<u8>().is_err());
        assert_eq!(v.error_view(), "300 rest");
    }

    #[test]
    fn leading_plus_is_not_a_number() {
        let mut v = CharView::from("+5x");

        assert_eq!(v.to::<i32>().unwrap_err().kind, Kind::MalformedNumber);
        assert_eq!(v.error_view(), "+5x");

        let mut v = CharView::from("+1.5");

        assert!(v.to::<f64>().is_err());
        assert_eq!(v.error_view(), "+1.5");
    }

    #[test]
    fn unsigned_rejects_sign() {
        let mut v = CharView::from("-1");

        assert!(v.to::<u32>().is_err());
        assert_eq!(v.error_view(), "-1");
    }
}

mod nom_input {
    use charview::{integer_lexeme, CharView};
    use nom::{bytes::complete::tag, character::complete::alpha1, sequence::pair, Parser};

    #[test]
    fn nom_combinators_run_on_views() {
        let input = CharView::from("key=42;");

        let (rest, (key, _)) = pair(alpha1::<_, nom::error::Error<_>>, tag("="))
            .parse(input)
            .unwrap();

        assert_eq!(key, "key");
        assert_eq!(rest, "42;");

        let (rest, digits) = integer_lexeme(rest).unwrap();
        assert_eq!(digits, "42");
        assert_eq!(rest, ";");
    }

    #[test]
    fn take_at_position() {
        use nom::{
            character::complete::{digit1, space0},
            error::ErrorKind,
        };

        let (rest, spaces) = space0::<_, nom::error::Error<_>>(CharView::from("  7")).unwrap();
        assert_eq!(spaces, "  ");
        assert_eq!(rest, "7");

        let (rest, spaces) = space0::<_, nom::error::Error<_>>(rest).unwrap();
        assert!(spaces.is_empty());
        assert_eq!(rest, "7");

        let (rest, digits) = digit1::<_, nom::error::Error<_>>(rest).unwrap();
        assert_eq!(digits, "7");
        assert!(rest.is_empty());

        let err = digit1::<_, nom::error::Error<_>>(rest).unwrap_err();
        assert!(matches!(err, nom::Err::Error(e) if e.code == ErrorKind::Digit));

        let err = alpha1::<_, nom::error::Error<_>>(CharView::from("1a")).unwrap_err();
        assert!(matches!(err, nom::Err::Error(e) if e.input == "1a"));
    }

    #[test]
    fn searching_traits() {
        use nom::{bytes::complete::take_until, FindToken, ParseTo};

        let input = CharView::from("width=640");

        let (rest, key) = take_until::<_, _, nom::error::Error<_>>("=")(input).unwrap();
        assert_eq!(key, "width");
        assert!(rest.find_token(b'='));
        assert!(!key.find_token(b'='));

        let mut value = rest;
        value.drop(1);
        let number: Option<u32> = value.parse_to();
        assert_eq!(number, Some(640));
    }

    #[test]
    fn slices_point_into_the_buffer() {
        let data = "key=42";
        let input = CharView::from(data);

        let (_, (key, _)) = pair(alpha1::<_, nom::error::Error<_>>, tag("="))
            .parse(input)
            .unwrap();

        assert!(key.as_bytes().as_ptr() == data.as_ptr());
    }
}

#[test]
fn eat_with_flags_on_failure() {
    let mut v = CharView::from("x1");

    let err = v
        .eat_with(charview::integer_lexeme, Kind::MalformedNumber)
        .unwrap_err();

    assert_eq!(err.kind, Kind::MalformedNumber);
    assert_eq!(v.error_view(), "x1");
}
