//! Calendar date check and day-of-week derivation.

use chrono::{Datelike, NaiveDate};

/// Day-of-week used when the form holds an impossible date.
pub const DEFAULT_DAY_OF_WEEK: u32 = 0;

pub const INVALID_DATE_WARNING: &str =
    "Invalid date. Please check the year, month, and day values.";

/// Outcome of building a date from the form's year/month/day.
///
/// An invalid date never blocks a prediction; it only substitutes
/// `DEFAULT_DAY_OF_WEEK` and carries a warning for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    Valid { date: NaiveDate, day_of_week: u32 },
    Invalid { day_of_week: u32 },
}

impl DateCheck {
    /// Monday = 0 ... Sunday = 6.
    pub fn day_of_week(&self) -> u32 {
        match *self {
            DateCheck::Valid { day_of_week, .. } | DateCheck::Invalid { day_of_week } => {
                day_of_week
            }
        }
    }

    pub fn warning(&self) -> Option<&'static str> {
        match self {
            DateCheck::Valid { .. } => None,
            DateCheck::Invalid { .. } => Some(INVALID_DATE_WARNING),
        }
    }
}

pub fn check_date(year: u32, month: u32, day: u32) -> DateCheck {
    let date = i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, day));

    match date {
        Some(date) => DateCheck::Valid {
            date,
            day_of_week: date.weekday().num_days_from_monday(),
        },
        None => DateCheck::Invalid {
            day_of_week: DEFAULT_DAY_OF_WEEK,
        },
    }
}

/// Short weekday name for an index produced by `check_date`.
pub fn weekday_name(day_of_week: u32) -> &'static str {
    match day_of_week {
        0 => "Mon",
        1 => "Tue",
        2 => "Wed",
        3 => "Thu",
        4 => "Fri",
        5 => "Sat",
        6 => "Sun",
        _ => "?",
    }
}
