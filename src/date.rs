//! ISO 8601 style date and time tokens.
//!
//! Each function eats its token from the front of the view and leaves the
//! rest, e.g. `2001-01-02T12:34:56.7-01:30`.

use std::fmt;

use nom::character::complete::one_of;

use crate::{
    char_view::CharView,
    error::{Error, Kind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ymd {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hms {
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

/// Offset from UTC. Both parts carry the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub hours: i32,
    pub minutes: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DateTime {
    pub date: Ymd,
    pub time: Hms,
    pub offset: Offset,
}

impl fmt::Display for Ymd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:06.3}", self.hour, self.minute, self.second)
    }
}

/// `+HH:MM` or `-HH:MM`. The sign comes from either part, so `-00:30` keeps it.
impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.hours < 0 || self.minutes < 0 {
            '-'
        } else {
            '+'
        };

        write!(
            f,
            "{}{:02}:{:02}",
            sign,
            self.hours.unsigned_abs(),
            self.minutes.unsigned_abs()
        )
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}{}", self.date, self.time, self.offset)
    }
}

fn separator<'a>(v: &mut CharView<'a>, expected: &'static str) -> Result<char, Error<'a>> {
    v.eat_with(one_of(expected), Kind::InvalidSeparator(expected))
}

/// `Y-M-D` or `Y/M/D`; both separators must be the same.
pub fn to_ymd<'a>(v: &mut CharView<'a>) -> Result<Ymd, Error<'a>> {
    let year = v.to()?;
    let first = separator(v, "-/")?;
    let month = v.to()?;
    separator(v, if first == '-' { "-" } else { "/" })?;
    let day = v.to()?;

    Ok(Ymd { year, month, day })
}

/// `H:M:S` with optional fractional seconds.
pub fn to_hms<'a>(v: &mut CharView<'a>) -> Result<Hms, Error<'a>> {
    let hour = v.to()?;
    separator(v, ":")?;
    let minute = v.to()?;
    separator(v, ":")?;
    let second = v.to()?;

    Ok(Hms {
        hour,
        minute,
        second,
    })
}

/// `Z` or `+H:M` / `-H:M`.
pub fn to_offset<'a>(v: &mut CharView<'a>) -> Result<Offset, Error<'a>> {
    v.check()?;

    if v.front() == Some(b'Z') {
        v.eat(b'Z')?;
        return Ok(Offset::default());
    }

    let sign = separator(v, "+-")?;
    let hours: i32 = v.to()?;
    separator(v, ":")?;
    let minutes: i32 = v.to()?;

    Ok(match sign {
        '-' => Offset {
            hours: -hours,
            minutes: -minutes,
        },
        _ => Offset { hours, minutes },
    })
}

/// Date, `T` or a space, time and an optional offset.
pub fn to_datetime<'a>(v: &mut CharView<'a>) -> Result<DateTime, Error<'a>> {
    let date = to_ymd(v)?;
    separator(v, "T ")?;
    let time = to_hms(v)?;
    let offset = if v.is_empty() {
        Offset::default()
    } else {
        to_offset(v)?
    };

    Ok(DateTime { date, time, offset })
}
