//! Shared domain types.
//!
//! These types are intentionally small and `Copy` where possible: a `RawInput`
//! is rebuilt from the form on every key press and thrown away afterwards.

use std::path::PathBuf;

use thiserror::Error;

/// Inclusive range accepted by a numeric form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    pub min: u32,
    pub max: u32,
}

impl FieldRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(self, value: i64) -> u32 {
        value.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }
}

pub const STORE_RANGE: FieldRange = FieldRange::new(1, 45);
pub const DEPT_RANGE: FieldRange = FieldRange::new(1, 81);
pub const YEAR_RANGE: FieldRange = FieldRange::new(2000, 2030);
pub const MONTH_RANGE: FieldRange = FieldRange::new(1, 12);
pub const DAY_RANGE: FieldRange = FieldRange::new(1, 31);

/// Form fields, in the order they are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Store,
    Dept,
    Holiday,
    Year,
    Month,
    Day,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Store,
        Field::Dept,
        Field::Holiday,
        Field::Year,
        Field::Month,
        Field::Day,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Store => "Store (1–45)",
            Field::Dept => "Department (1–81)",
            Field::Holiday => "Is it a holiday?",
            Field::Year => "Year",
            Field::Month => "Month",
            Field::Day => "Day",
        }
    }

    /// Numeric range, or `None` for the binary holiday choice.
    pub fn range(self) -> Option<FieldRange> {
        match self {
            Field::Store => Some(STORE_RANGE),
            Field::Dept => Some(DEPT_RANGE),
            Field::Holiday => None,
            Field::Year => Some(YEAR_RANGE),
            Field::Month => Some(MONTH_RANGE),
            Field::Day => Some(DAY_RANGE),
        }
    }
}

/// Holiday flag as presented in the form ("No" / "Yes").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HolidayFlag {
    #[default]
    No,
    Yes,
}

impl HolidayFlag {
    pub fn as_feature(self) -> u32 {
        match self {
            HolidayFlag::No => 0,
            HolidayFlag::Yes => 1,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HolidayFlag::No => "No",
            HolidayFlag::Yes => "Yes",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            HolidayFlag::No => HolidayFlag::Yes,
            HolidayFlag::Yes => HolidayFlag::No,
        }
    }
}

impl From<bool> for HolidayFlag {
    fn from(value: bool) -> Self {
        if value { HolidayFlag::Yes } else { HolidayFlag::No }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} must be between {} and {}, got {value}", .field.label(), .range.min, .range.max)]
pub struct InputError {
    pub field: Field,
    pub range: FieldRange,
    pub value: u32,
}

/// The six raw values of one prediction request.
///
/// Each value is range-checked on its own. Cross-field validity (e.g. 31
/// February) is left to `features::date::check_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInput {
    pub store: u32,
    pub dept: u32,
    pub holiday: HolidayFlag,
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl RawInput {
    pub fn new(
        store: u32,
        dept: u32,
        holiday: HolidayFlag,
        year: u32,
        month: u32,
        day: u32,
    ) -> Result<Self, InputError> {
        let input = Self {
            store,
            dept,
            holiday,
            year,
            month,
            day,
        };
        for field in Field::ALL {
            let (Some(range), Some(value)) = (field.range(), input.numeric(field)) else {
                continue;
            };
            if !range.contains(value) {
                return Err(InputError { field, range, value });
            }
        }
        Ok(input)
    }

    /// Current value of a numeric field (`None` for the holiday flag).
    pub fn numeric(&self, field: Field) -> Option<u32> {
        match field {
            Field::Store => Some(self.store),
            Field::Dept => Some(self.dept),
            Field::Holiday => None,
            Field::Year => Some(self.year),
            Field::Month => Some(self.month),
            Field::Day => Some(self.day),
        }
    }

    /// Set a numeric field, clamping into its range. No-op for the holiday flag.
    pub fn set_numeric(&mut self, field: Field, value: i64) {
        let Some(range) = field.range() else {
            return;
        };
        let value = range.clamp(value);
        match field {
            Field::Store => self.store = value,
            Field::Dept => self.dept = value,
            Field::Holiday => {}
            Field::Year => self.year = value,
            Field::Month => self.month = value,
            Field::Day => self.day = value,
        }
    }
}

impl Default for RawInput {
    /// Form defaults: store 1, dept 1, not a holiday, 2012-05-15.
    fn default() -> Self {
        Self {
            store: STORE_RANGE.min,
            dept: DEPT_RANGE.min,
            holiday: HolidayFlag::No,
            year: 2012,
            month: 5,
            day: 15,
        }
    }
}

/// A full run's configuration as understood by the application.
///
/// This is derived from CLI flags, environment variables and `.env`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub columns_path: PathBuf,
    /// TUI only: where to write logs while the terminal is in raw mode.
    pub log_file: Option<PathBuf>,
}
