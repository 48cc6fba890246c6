//! Reindex an encoded row against the training column schema.
//!
//! Equivalent to `DataFrame.reindex(columns=..., fill_value=0)` for one row:
//! schema columns missing from the row become 0, row columns the schema does not
//! know are dropped, and the result follows the schema's order.

use std::collections::{HashMap, HashSet};

use crate::features::encode::FeatureRow;

/// Fill value for schema columns the encoded row does not carry.
pub const FILL_VALUE: f64 = 0.0;

/// A row whose columns equal a training schema exactly, in order.
///
/// Only `align` constructs this type.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl AlignedRow {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-zero features (handy for status lines).
    pub fn active_count(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }

    pub fn to_feature_row(&self) -> FeatureRow {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
            .collect()
    }
}

/// Result of `align`: the aligned row plus what had to change to get there.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub row: AlignedRow,
    /// Schema columns absent from the input row (set to `FILL_VALUE`).
    pub filled: Vec<String>,
    /// Input columns absent from the schema.
    pub dropped: Vec<String>,
}

pub fn align(row: &FeatureRow, schema: &[String]) -> Alignment {
    let lookup: HashMap<&str, f64> = row.iter().collect();

    let mut filled = Vec::new();
    let values = schema
        .iter()
        .map(|column| match lookup.get(column.as_str()) {
            Some(value) => *value,
            None => {
                filled.push(column.clone());
                FILL_VALUE
            }
        })
        .collect();

    let known: HashSet<&str> = schema.iter().map(String::as_str).collect();
    let dropped = row
        .columns()
        .iter()
        .filter(|c| !known.contains(c.as_str()))
        .cloned()
        .collect();

    Alignment {
        row: AlignedRow {
            columns: schema.to_vec(),
            values,
        },
        filled,
        dropped,
    }
}
