use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::schema::WindowError;

/// Heading of a date block, e.g. `Monday October 19, 2026`.
pub const BLOCK_DATE_FORMAT: &str = "%A %B %d, %Y";
/// Slot link text, e.g. `7:00 PM`.
pub const SLOT_TIME_FORMAT: &str = "%I:%M %p";
/// Date as sent in the query string.
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a time of day given either as `HH` or as `HH:MM`.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, WindowError> {
    let invalid = || WindowError::InvalidTimeOfDay(s.to_owned());
    let captures = regex!(r"^(\d{1,2})(?::(\d{1,2}))?$")
        .captures(s)
        .ok_or_else(invalid)?;
    let hour = captures[1].parse().map_err(|_| invalid())?;
    let minute = match captures.get(2) {
        Some(m) => m.as_str().parse().map_err(|_| invalid())?,
        None => 0,
    };
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Parses a heading such as `Monday October 19, 2026`.
/// The weekday has to be there but is not matched against the date.
pub fn parse_block_date(text: &str) -> chrono::ParseResult<NaiveDate> {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((weekday, date)) if weekday.parse::<Weekday>().is_ok() => {
            NaiveDate::parse_from_str(date.trim_start(), "%B %d, %Y")
        }
        _ => NaiveDate::parse_from_str(text, BLOCK_DATE_FORMAT),
    }
}

pub fn parse_slot_time(text: &str) -> chrono::ParseResult<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), SLOT_TIME_FORMAT)
}
