//! Load the trained model and column list once per process.
//!
//! `ArtifactContext` is built at startup by `app::run` and handed by reference
//! to the TUI or the one-shot command. It is never mutated afterwards, so no
//! prediction re-reads disk.
//!
//! The two artifacts fail differently:
//! - no model means nothing can work, so `ArtifactContext::load` returns an error
//! - a missing column list is kept as a `SchemaError` inside the context; the
//!   form stays usable and explains what to fix

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::AppConfig;
use crate::io::schema::{SchemaError, TrainingSchema, read_schema_json};
use crate::models::{ModelArtifact, ModelDefect};

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Missing model file '{}'. Export the trained model to that path.", .path.display())]
    Missing { path: PathBuf },
    #[error("Failed to read model '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid model JSON '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Inconsistent model '{}': {source}", .path.display())]
    Invalid { path: PathBuf, source: ModelDefect },
}

/// Read, parse and validate a model artifact.
pub fn read_model_json(path: &Path) -> Result<ModelArtifact, ModelLoadError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ModelLoadError::Missing {
            path: path.to_path_buf(),
        },
        _ => ModelLoadError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let model: ModelArtifact = serde_json::from_str(&text).map_err(|e| ModelLoadError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    model.validate().map_err(|e| ModelLoadError::Invalid {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(model)
}

/// The process-wide, read-only artifacts.
#[derive(Debug)]
pub struct ArtifactContext {
    model: ModelArtifact,
    model_path: PathBuf,
    schema: Result<TrainingSchema, SchemaError>,
    notices: Vec<String>,
}

impl ArtifactContext {
    pub fn load(config: &AppConfig) -> Result<Self, ModelLoadError> {
        let model = read_model_json(&config.model_path)?;
        tracing::info!(
            path = %config.model_path.display(),
            kind = model.display_name(),
            n_features = model.n_features(),
            "loaded model"
        );

        let schema = read_schema_json(&config.columns_path);
        Ok(Self::from_parts(model, config.model_path.clone(), schema))
    }

    /// Assemble a context from already-loaded parts.
    pub fn from_parts(
        model: ModelArtifact,
        model_path: PathBuf,
        schema: Result<TrainingSchema, SchemaError>,
    ) -> Self {
        let mut notices = Vec::new();
        match &schema {
            Ok(schema) => {
                tracing::info!(columns = schema.len(), "loaded training column list");
                notices = schema.convention_notices();
                if schema.len() != model.n_features() {
                    notices.push(format!(
                        "Column list has {} columns but the model expects {} features.",
                        schema.len(),
                        model.n_features(),
                    ));
                }
                for notice in &notices {
                    tracing::warn!("{notice}");
                }
            }
            Err(err) => tracing::warn!(error = %err, "training column list unavailable"),
        }

        Self {
            model,
            model_path,
            schema,
            notices,
        }
    }

    pub fn model(&self) -> &ModelArtifact {
        &self.model
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn schema(&self) -> Result<&TrainingSchema, &SchemaError> {
        self.schema.as_ref()
    }

    /// Non-fatal observations about how the artifacts fit together.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}
