use charview::{CharView, SplitOptions, Splitter, View};
use quickcheck::{QuickCheck, TestResult};
use quickcheck_macros::quickcheck;

#[quickcheck]
fn trim_is_idempotent(s: String) -> bool {
    let mut once = CharView::from(&s);
    once.ws_trim();
    let mut twice = once;
    twice.ws_trim();

    let mut back_once = CharView::from(&s);
    back_once.trim_ws();
    let mut back_twice = back_once;
    back_twice.trim_ws();

    once.ptr_eq(&twice) && back_once.ptr_eq(&back_twice)
}

#[quickcheck]
fn failed_literal_consumes_nothing(s: String, literal: String) -> bool {
    let mut v = CharView::from(&s);

    match v.eat_literal(&literal) {
        Ok(()) => s.starts_with(literal.as_str()) && v == &s[literal.len()..],
        Err(e) => v.error_view() == s.as_str() && e.residue == s.as_bytes(),
    }
}

#[quickcheck]
fn take_and_drop_partition_the_view(data: Vec<u8>, n: isize) -> bool {
    let v = View::new(&data);
    let len = data.len() as isize;
    let n = if len == 0 { 0 } else { n % (len + 1) };

    let taken = v.taken(n);
    let dropped = v.dropped(n);

    let joined: Vec<u8> = if n >= 0 {
        taken.iter().chain(dropped.iter()).copied().collect()
    } else {
        dropped.iter().chain(taken.iter()).copied().collect()
    };

    taken.len() + dropped.len() == data.len() && joined == data
}

#[test]
fn displayed_floats_convert_back() {
    fn prop(x: f64) -> TestResult {
        if !x.is_finite() {
            return TestResult::discard();
        }

        let s = x.to_string();
        let mut v = CharView::from(&s);

        TestResult::from_bool(v.to::<f64>() == Ok(x) && v.is_empty())
    }

    QuickCheck::new()
        .tests(1000)
        .quickcheck(prop as fn(f64) -> TestResult);
}

#[test]
fn split_recovers_the_joined_fields() {
    fn prop(fields: Vec<String>) -> TestResult {
        let fields: Vec<String> = fields
            .into_iter()
            .map(|f| f.chars().filter(char::is_ascii_alphanumeric).collect())
            .collect();

        // a trailing empty field leaves nothing after the last delimiter
        if fields.last().map_or(true, String::is_empty) {
            return TestResult::discard();
        }

        let joined = fields.join(",");
        let split: Result<Vec<String>, _> = Splitter::new(&joined, SplitOptions::new(b','))
            .map(|f| f.map(|f| f.to_string()))
            .collect();

        TestResult::from_bool(split.map_or(false, |split| split == fields))
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Vec<String>) -> TestResult);
}
