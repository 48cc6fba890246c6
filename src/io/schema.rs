//! Read the training-time column list.
//!
//! The artifact is a JSON array of column names, written by the training
//! notebook right after it one-hot encoded the training frame:
//!
//! ```json
//! ["IsHoliday", "year", "month", "day", "DayOfWeek", "Store_2", ..., "Dept_81"]
//! ```

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::features::{CategoricalEncoding, DEPT_ENCODING, STORE_ENCODING};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(
        "Missing file '{}'. Save the training column list from the training notebook to that path.",
        .path.display()
    )]
    Missing { path: PathBuf },
    #[error("Failed to read column list '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid column list JSON '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid column list '{}': {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: SchemaDefect,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaDefect {
    #[error("the column list is empty")]
    Empty,
    #[error("column {0} has an empty name")]
    EmptyName(usize),
    #[error("column '{0}' appears more than once")]
    Duplicate(String),
}

/// Ordered, immutable list of the feature columns the model was fit on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSchema {
    columns: Vec<String>,
}

impl TrainingSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, SchemaDefect> {
        if columns.is_empty() {
            return Err(SchemaDefect::Empty);
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(SchemaDefect::EmptyName(idx));
            }
            if !seen.insert(column.as_str()) {
                return Err(SchemaDefect::Duplicate(column.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Signs that the training side encoded categories differently from
    /// `features::encode`.
    ///
    /// A baseline column such as `Store_1` means the first level was not
    /// dropped, so rows for that level will never set it. No indicator columns
    /// at all means the category has no effect on the prediction.
    pub fn convention_notices(&self) -> Vec<String> {
        let mut notices = Vec::new();
        for encoding in [STORE_ENCODING, DEPT_ENCODING] {
            notices.extend(self.encoding_notice(&encoding));
        }
        notices
    }

    fn encoding_notice(&self, encoding: &CategoricalEncoding) -> Option<String> {
        let baseline = encoding.indicator_name(encoding.baseline());
        if self.contains(&baseline) {
            return Some(format!(
                "Column list contains '{baseline}': training did not drop the first {} level, \
                 so rows for {} {} leave that column at 0.",
                encoding.column,
                encoding.column,
                encoding.baseline(),
            ));
        }

        let has_any = encoding.indicator_columns().any(|c| self.contains(&c));
        if !has_any {
            return Some(format!(
                "Column list has no {col}_* indicator columns; \
                 the {col} input will not affect predictions.",
                col = encoding.column,
            ));
        }
        None
    }
}

/// Read and validate a column list JSON file.
pub fn read_schema_json(path: &Path) -> Result<TrainingSchema, SchemaError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SchemaError::Missing {
            path: path.to_path_buf(),
        },
        _ => SchemaError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let columns: Vec<String> = serde_json::from_str(&text).map_err(|e| SchemaError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    TrainingSchema::new(columns).map_err(|e| SchemaError::Invalid {
        path: path.to_path_buf(),
        source: e,
    })
}
