use crate::error::AdminError;
use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// 1-based, January is 1.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn of(date: NaiveDate) -> Self {
        // NaiveDate::month() is always within 1..=12
        MONTHS[date.month0() as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = AdminError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        MONTHS
            .iter()
            .copied()
            .find(|month| month.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AdminError::InvalidMonth(value.to_string()))
    }
}

pub fn previous_month(month: Month, year: i32) -> (Month, i32) {
    match month {
        Month::January => (Month::December, year - 1),
        Month::February => (Month::January, year),
        Month::March => (Month::February, year),
        Month::April => (Month::March, year),
        Month::May => (Month::April, year),
        Month::June => (Month::May, year),
        Month::July => (Month::June, year),
        Month::August => (Month::July, year),
        Month::September => (Month::August, year),
        Month::October => (Month::September, year),
        Month::November => (Month::October, year),
        Month::December => (Month::November, year),
    }
}

pub fn next_month(month: Month, year: i32) -> (Month, i32) {
    match month {
        Month::January => (Month::February, year),
        Month::February => (Month::March, year),
        Month::March => (Month::April, year),
        Month::April => (Month::May, year),
        Month::May => (Month::June, year),
        Month::June => (Month::July, year),
        Month::July => (Month::August, year),
        Month::August => (Month::September, year),
        Month::September => (Month::October, year),
        Month::October => (Month::November, year),
        Month::November => (Month::December, year),
        Month::December => (Month::January, year + 1),
    }
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    if (4..=20).contains(&day) {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Renders a booking date as e.g. "21st March".
pub fn format_booking_date(date: NaiveDate) -> String {
    let day = date.day();
    format!("{day}{} {}", ordinal_suffix(day), Month::of(date))
}

/// Reduces a date reported by the booking service to its calendar day.
///
/// The service answers either with plain `YYYY-MM-DD` values or with full
/// RFC 3339 timestamps. A timestamp keeps the day at the offset it was sent
/// with, so `2025-06-14T00:00:00+01:00` is the 14th.
pub fn parse_calendar_day(value: &str) -> Result<NaiveDate, AdminError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|datetime| datetime.date_naive())
        .map_err(|_| AdminError::InvalidDate(value.to_string()))
}

pub(crate) fn calendar_day<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_calendar_day(&value).map_err(serde::de::Error::custom)
}
