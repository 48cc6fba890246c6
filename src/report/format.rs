//! Text formatting for predictions and artifacts.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays free of presentation details
//! - the CLI and the TUI show numbers the same way

use crate::app::pipeline::PredictionOutput;
use crate::domain::RawInput;
use crate::features::{DateCheck, weekday_name};
use crate::io::ArtifactContext;

/// Columns listed by `format_artifact_summary` before eliding the rest.
const SUMMARY_COLUMNS: usize = 12;

/// Format a value as US dollars with thousands separators and two decimals.
///
/// `1234567.891` -> `$1,234,567.89`, `-50.0` -> `-$50.00`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc();
    let frac = (cents - whole * 100.0) as u64;

    let digits = format!("{whole:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// One-line description of the form values.
pub fn format_input(input: &RawInput, date: &DateCheck) -> String {
    let day = match date {
        DateCheck::Valid { date, day_of_week } => {
            format!("{date} ({})", weekday_name(*day_of_week))
        }
        DateCheck::Invalid { day_of_week } => format!(
            "{}-{:02}-{:02} (invalid, using {})",
            input.year,
            input.month,
            input.day,
            weekday_name(*day_of_week)
        ),
    };
    format!(
        "store {} | dept {} | holiday {} | {day}",
        input.store,
        input.dept,
        input.holiday.display_name(),
    )
}

/// Summary printed by `wsp predict`.
pub fn format_prediction(output: &PredictionOutput) -> String {
    let prepared = &output.prepared;
    let mut out = String::new();
    out.push_str(&format!("{}\n", format_input(&prepared.input, &prepared.date)));
    if let Some(row) = &prepared.aligned {
        out.push_str(&format!(
            "features: {} columns, {} non-zero\n",
            row.len(),
            row.active_count()
        ));
    }
    out.push_str(&format!(
        "Predicted Weekly Sales: {}\n",
        format_currency(output.weekly_sales)
    ));
    out
}

/// Overview printed by `wsp inspect`.
pub fn format_artifact_summary(ctx: &ArtifactContext) -> String {
    let mut out = String::new();
    let model = ctx.model();

    out.push_str("=== wsp - Weekly Sales Predictor ===\n");
    out.push_str(&format!("Model: {} ({})\n", ctx.model_path().display(), model.display_name()));
    out.push_str(&format!("- features: {}\n", model.n_features()));
    out.push_str(&format!(
        "- feature names: {}\n",
        if model.feature_names().is_some() { "embedded" } else { "not embedded" }
    ));

    match ctx.schema() {
        Ok(schema) => {
            out.push_str(&format!("Columns: {}\n", schema.len()));
            out.push_str(&format!("- {}\n", fmt_columns(schema.columns())));
        }
        Err(err) => out.push_str(&format!("Columns: unavailable\n- {err}\n")),
    }

    if !ctx.notices().is_empty() {
        out.push_str("\nNotices:\n");
        for notice in ctx.notices() {
            out.push_str(&format!("- {notice}\n"));
        }
    }

    out
}

fn fmt_columns(columns: &[String]) -> String {
    let shown: Vec<&str> = columns.iter().take(SUMMARY_COLUMNS).map(String::as_str).collect();
    let rest = columns.len().saturating_sub(SUMMARY_COLUMNS);
    if rest == 0 {
        format!("[{}]", shown.join(", "))
    } else {
        format!("[{}, ... +{rest} more]", shown.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HolidayFlag;
    use crate::features::check_date;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.994), "$999.99");
        assert_eq!(format_currency(999.996), "$1,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(15_320.5), "$15,320.50");
    }

    #[test]
    fn currency_negative_sign_precedes_symbol() {
        assert_eq!(format_currency(-1234.5), "-$1,234.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn input_line_mentions_invalid_dates() {
        let input = RawInput::new(3, 9, HolidayFlag::Yes, 2021, 2, 30).unwrap();
        let line = format_input(&input, &check_date(2021, 2, 30));
        assert_eq!(line, "store 3 | dept 9 | holiday Yes | 2021-02-30 (invalid, using Mon)");
    }

    #[test]
    fn long_column_lists_are_elided() {
        let cols: Vec<String> = (0..15).map(|i| format!("c{i}")).collect();
        assert!(fmt_columns(&cols).ends_with("c11, ... +3 more]"));
        assert_eq!(fmt_columns(&cols[..2]), "[c0, c1]");
    }
}
