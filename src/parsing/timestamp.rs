//! Timestamp normalization.
//!
//! Converts the raw date and time text of an entry marker into a naive
//! [`NaiveDateTime`] and its canonical `YYYY-MM-DD HH:MM:SS` rendering.
//! No timezone conversion is applied.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::DateOrder;
use crate::error::{ChatscopeError, Result};
use crate::message::DISPLAY_FORMAT;

/// A normalized entry timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub instant: NaiveDateTime,
    pub display: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Normalizes `date` (`D/M/YYYY` or `M/D/YYYY` per `order`) and `time`
/// (`H:MM[:SS]`, optionally followed by AM/PM).
///
/// # Example
///
/// ```
/// use chatscope::config::DateOrder;
/// use chatscope::parsing::timestamp::normalize;
///
/// let ts = normalize("19/10/2020", "6:15 PM", DateOrder::DayMonthYear)?;
/// assert_eq!(ts.display, "2020-10-19 18:15:00");
/// # Ok::<(), chatscope::ChatscopeError>(())
/// ```
///
/// # Errors
///
/// Returns [`ChatscopeError::MalformedTimestamp`] if a component is not a
/// number or the resulting date or time does not exist.
pub fn normalize(date: &str, time: &str, order: DateOrder) -> Result<Timestamp> {
    let fail = |reason: &str| ChatscopeError::malformed_timestamp(date, time, reason);

    let fields: Vec<&str> = date.trim().split('/').collect();
    let [first, second, year] = fields.as_slice() else {
        return Err(fail("expected three date fields"));
    };
    let first = number(first).ok_or_else(|| fail("non-numeric date field"))?;
    let second = number(second).ok_or_else(|| fail("non-numeric date field"))?;
    let year = number(year)
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| fail("non-numeric year"))?;
    let (day, month) = match order {
        DateOrder::DayMonthYear => (first, second),
        DateOrder::MonthDayYear => (second, first),
    };
    let day_of = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| fail("date out of range"))?;

    let (clock, meridiem) = split_meridiem(time.trim());
    let fields: Vec<&str> = clock.split(':').collect();
    let (hour, minute, second) = match fields.as_slice() {
        [h, m] => (number(h), number(m), Some(0)),
        [h, m, s] => (number(h), number(m), number(s)),
        _ => return Err(fail("expected H:MM or H:MM:SS")),
    };
    let (Some(mut hour), Some(minute), Some(second)) = (hour, minute, second) else {
        return Err(fail("non-numeric time field"));
    };

    match meridiem {
        Some(Meridiem::Pm) if hour < 12 => hour += 12,
        Some(Meridiem::Am) if hour == 12 => hour = 0,
        _ => {}
    }

    let instant = day_of
        .and_hms_opt(hour, minute, second)
        .ok_or_else(|| fail("time out of range"))?;

    Ok(Timestamp {
        instant,
        display: instant.format(DISPLAY_FORMAT).to_string(),
    })
}

/// Parses a run of ASCII digits.
fn number(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn split_meridiem(time: &str) -> (&str, Option<Meridiem>) {
    let Some(split) = time.len().checked_sub(2).filter(|&i| time.is_char_boundary(i)) else {
        return (time, None);
    };
    let (clock, suffix) = time.split_at(split);
    let meridiem = if suffix.eq_ignore_ascii_case("am") {
        Meridiem::Am
    } else if suffix.eq_ignore_ascii_case("pm") {
        Meridiem::Pm
    } else {
        return (time, None);
    };
    (clock.trim_end(), Some(meridiem))
}
