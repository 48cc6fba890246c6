//! Command-line parsing for the weekly sales predictor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the feature/model code.

use std::path::PathBuf;

use clap::builder::RangedI64ValueParser;
use clap::{Args, Parser, Subcommand};

use crate::domain::{DAY_RANGE, DEPT_RANGE, FieldRange, MONTH_RANGE, STORE_RANGE, YEAR_RANGE};

pub const DEFAULT_MODEL_PATH: &str = "best_xgb_model.json";
pub const DEFAULT_COLUMNS_PATH: &str = "train_columns.json";

/// Rejects values outside a form field's range before the pipeline sees them.
fn ranged(range: FieldRange) -> RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(i64::from(range.min)..=i64::from(range.max))
}

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wsp", version, about = "Weekly sales prediction from a trained regression model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive prediction form.
    Tui(TuiArgs),
    /// Predict weekly sales once and print the result.
    Predict(PredictArgs),
    /// Summarize the loaded model and training column list.
    Inspect(ArtifactArgs),
}

/// Where to find the two training artifacts.
#[derive(Debug, Args, Clone)]
pub struct ArtifactArgs {
    /// Trained model JSON.
    #[arg(long, env = "WSP_MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Training column list JSON.
    #[arg(long, env = "WSP_COLUMNS_PATH", default_value = DEFAULT_COLUMNS_PATH)]
    pub columns: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Append logs to this file (the terminal is busy while the form runs).
    #[arg(long, env = "WSP_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Store id (1-45).
    #[arg(long, value_parser = ranged(STORE_RANGE))]
    pub store: u32,

    /// Department id (1-81).
    #[arg(long, value_parser = ranged(DEPT_RANGE))]
    pub dept: u32,

    /// The week contains a holiday.
    #[arg(long)]
    pub holiday: bool,

    /// Year (2000-2030).
    #[arg(long, default_value_t = 2012, value_parser = ranged(YEAR_RANGE))]
    pub year: u32,

    /// Month (1-12).
    #[arg(long, default_value_t = 5, value_parser = ranged(MONTH_RANGE))]
    pub month: u32,

    /// Day of month (1-31). Impossible dates fall back to Monday with a warning.
    #[arg(long, default_value_t = 15, value_parser = ranged(DAY_RANGE))]
    pub day: u32,
}
