//! Process-level error type.
//!
//! Component errors (`SchemaError`, `ModelLoadError`, `PredictError`, ...) are
//! typed enums close to where they are raised. At the top they collapse into an
//! `AppError`: a user-facing message plus the exit code `main` returns.

use crate::app::pipeline::PipelineError;
use crate::domain::InputError;
use crate::io::{ModelLoadError, SchemaError};

/// Out-of-range form values; matches the code clap exits with on usage errors.
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_ARTIFACT: u8 = 3;
pub const EXIT_TERMINAL: u8 = 4;
pub const EXIT_PREDICTION: u8 = 5;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(EXIT_TERMINAL, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ModelLoadError> for AppError {
    fn from(err: ModelLoadError) -> Self {
        Self::new(EXIT_ARTIFACT, err.to_string())
    }
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        Self::new(EXIT_ARTIFACT, err.to_string())
    }
}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        Self::new(EXIT_USAGE, err.to_string())
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let code = match err {
            PipelineError::MissingSchema(_) => EXIT_ARTIFACT,
            PipelineError::Inference(_) => EXIT_PREDICTION,
        };
        Self::new(code, err.to_string())
    }
}
