//! Single-row record assembly and indicator (one-hot) encoding.
//!
//! Column names follow pandas `get_dummies` naming (`Store_20`, `Dept_5`) and the
//! `drop_first` convention: the first level of each category is the implicit
//! baseline and gets no column. The training side must have used the same
//! convention, otherwise the baseline columns will mismatch without any error;
//! see `io::TrainingSchema::convention_notices`.

use crate::domain::{DEPT_RANGE, FieldRange, RawInput, STORE_RANGE};
use crate::features::date::DateCheck;

/// Columns copied through without encoding, in record order.
pub const PASSTHROUGH_COLUMNS: [&str; 5] = ["IsHoliday", "year", "month", "day", "DayOfWeek"];

/// Indicator expansion for one categorical column over a known integer domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalEncoding {
    pub column: &'static str,
    pub levels: FieldRange,
}

pub const STORE_ENCODING: CategoricalEncoding = CategoricalEncoding {
    column: "Store",
    levels: STORE_RANGE,
};

pub const DEPT_ENCODING: CategoricalEncoding = CategoricalEncoding {
    column: "Dept",
    levels: DEPT_RANGE,
};

impl CategoricalEncoding {
    /// The dropped first level.
    pub fn baseline(&self) -> u32 {
        self.levels.min
    }

    pub fn indicator_name(&self, level: u32) -> String {
        format!("{}_{level}", self.column)
    }

    /// Indicator column set to 1 for `level`, or `None` for the baseline.
    pub fn encode(&self, level: u32) -> Option<String> {
        (level != self.baseline()).then(|| self.indicator_name(level))
    }

    /// Every indicator column this encoding can emit, in level order.
    pub fn indicator_columns(&self) -> impl Iterator<Item = String> + '_ {
        (self.levels.min..=self.levels.max)
            .filter(|&level| level != self.baseline())
            .map(|level| self.indicator_name(level))
    }
}

/// An ordered single-row record: column names with their numeric values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. A repeated name overwrites the earlier value in place.
    pub fn push(&mut self, column: impl Into<String>, value: f64) {
        let column = column.into();
        match self.columns.iter().position(|c| *c == column) {
            Some(idx) => self.values[idx] = value,
            None => {
                self.columns.push(column);
                self.values.push(value);
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FeatureRow {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut row = FeatureRow::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}

/// Build the record `Store, Dept, IsHoliday, year, month, day, DayOfWeek` and
/// expand `Store` and `Dept` into indicator columns.
///
/// Output order: passthrough columns, then the store indicator, then the
/// department indicator (the same order `get_dummies` produces).
pub fn encode_features(input: &RawInput, date: &DateCheck) -> FeatureRow {
    let passthrough = [
        input.holiday.as_feature(),
        input.year,
        input.month,
        input.day,
        date.day_of_week(),
    ];

    let mut row: FeatureRow = PASSTHROUGH_COLUMNS
        .iter()
        .zip(passthrough)
        .map(|(name, value)| (*name, f64::from(value)))
        .collect();

    for (encoding, level) in [(STORE_ENCODING, input.store), (DEPT_ENCODING, input.dept)] {
        if let Some(column) = encoding.encode(level) {
            row.push(column, 1.0);
        }
    }

    row
}
