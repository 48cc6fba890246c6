//! Shared prediction pipeline used by both the CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! date check -> encode -> align -> predict
//!
//! `prepare` runs on every form change (it is cheap and never fails);
//! `predict` runs only on an explicit submit.

use thiserror::Error;

use crate::domain::RawInput;
use crate::features::{AlignedRow, DateCheck, FeatureRow, align, check_date, encode_features};
use crate::io::ArtifactContext;
use crate::models::PredictError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The column list failed to load; carries the loader's guidance message.
    #[error("{0}")]
    MissingSchema(String),
    #[error("Prediction error: {0}")]
    Inference(#[from] PredictError),
}

/// Everything derived from one set of form values before inference.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub input: RawInput,
    pub date: DateCheck,
    pub encoded: FeatureRow,
    /// `None` when the column list is unavailable.
    pub aligned: Option<AlignedRow>,
}

impl Prepared {
    pub fn warning(&self) -> Option<&'static str> {
        self.date.warning()
    }
}

/// A successful prediction and the inputs that produced it.
#[derive(Debug, Clone)]
pub struct PredictionOutput {
    pub prepared: Prepared,
    pub weekly_sales: f64,
}

/// Derive the day of week, encode, and align (if the column list loaded).
pub fn prepare(ctx: &ArtifactContext, input: &RawInput) -> Prepared {
    let date = check_date(input.year, input.month, input.day);
    let encoded = encode_features(input, &date);

    let aligned = ctx.schema().ok().map(|schema| {
        let alignment = align(&encoded, schema.columns());
        tracing::debug!(
            filled = alignment.filled.len(),
            dropped = ?alignment.dropped,
            "aligned feature row"
        );
        alignment.row
    });

    Prepared {
        input: *input,
        date,
        encoded,
        aligned,
    }
}

/// Run one prediction request end to end.
pub fn predict(ctx: &ArtifactContext, input: &RawInput) -> Result<PredictionOutput, PipelineError> {
    let prepared = prepare(ctx, input);
    predict_prepared(ctx, prepared)
}

pub fn predict_prepared(
    ctx: &ArtifactContext,
    prepared: Prepared,
) -> Result<PredictionOutput, PipelineError> {
    if let Some(warning) = prepared.warning() {
        tracing::warn!(
            year = prepared.input.year,
            month = prepared.input.month,
            day = prepared.input.day,
            "{warning}"
        );
    }

    let Some(row) = &prepared.aligned else {
        let reason = match ctx.schema() {
            Err(err) => err.to_string(),
            Ok(_) => "Feature row was prepared without a column list.".to_string(),
        };
        return Err(PipelineError::MissingSchema(reason));
    };

    match ctx.model().predict(row) {
        Ok(weekly_sales) => {
            tracing::info!(
                store = prepared.input.store,
                dept = prepared.input.dept,
                weekly_sales,
                "prediction"
            );
            Ok(PredictionOutput {
                prepared,
                weekly_sales,
            })
        }
        Err(err) => {
            tracing::error!(error = %err, "prediction failed");
            Err(err.into())
        }
    }
}
