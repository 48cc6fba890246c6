//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (and `.env`)
//! - sets up logging
//! - loads the artifacts once
//! - dispatches to the form or a one-shot command

use clap::Parser;

use crate::cli::{ArtifactArgs, Command, PredictArgs, TuiArgs};
use crate::domain::{AppConfig, HolidayFlag, RawInput};
use crate::error::AppError;
use crate::io::ArtifactContext;

pub mod pipeline;

/// Entry point for the `wsp` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // We want `wsp` and `wsp --model m.json` to behave like `wsp tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Predict(args) => handle_predict(args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.artifacts, args.log_file.clone());
    if let Some(path) = &config.log_file {
        crate::logging::init_file(path)?;
    }

    let ctx = ArtifactContext::load(&config)?;
    crate::tui::run(&ctx)
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    crate::logging::init_stderr();
    let config = config_from_args(&args.artifacts, None);
    let ctx = ArtifactContext::load(&config)?;

    let input = RawInput::new(
        args.store,
        args.dept,
        HolidayFlag::from(args.holiday),
        args.year,
        args.month,
        args.day,
    )?;

    // Date warnings and schema notices reach stderr through the warn-level log.
    let prepared = pipeline::prepare(&ctx, &input);
    let output = pipeline::predict_prepared(&ctx, prepared)?;
    print!("{}", crate::report::format_prediction(&output));
    Ok(())
}

fn handle_inspect(args: ArtifactArgs) -> Result<(), AppError> {
    crate::logging::init_stderr();
    let config = config_from_args(&args, None);
    let ctx = ArtifactContext::load(&config)?;
    print!("{}", crate::report::format_artifact_summary(&ctx));
    Ok(())
}

pub fn config_from_args(args: &ArtifactArgs, log_file: Option<std::path::PathBuf>) -> AppConfig {
    AppConfig {
        model_path: args.model.clone(),
        columns_path: args.columns.clone(),
        log_file,
    }
}

/// Rewrite argv so `wsp` defaults to `wsp tui`.
///
/// Rules:
/// - `wsp`                       -> `wsp tui`
/// - `wsp --model m.json ...`    -> `wsp tui --model m.json ...`
/// - `wsp --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "predict" | "inspect");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_the_form() {
        assert_eq!(rewrite_args(args(&["wsp"])), args(&["wsp", "tui"]));
        assert_eq!(
            rewrite_args(args(&["wsp", "--model", "m.json"])),
            args(&["wsp", "tui", "--model", "m.json"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        let predict = args(&["wsp", "predict", "--store", "3"]);
        assert_eq!(rewrite_args(predict.clone()), predict);
        assert_eq!(rewrite_args(args(&["wsp", "--help"])), args(&["wsp", "--help"]));
    }
}
