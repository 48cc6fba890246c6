//! End-to-end checks: artifacts on disk -> load once -> encode/align/predict.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use weekly_sales::app::pipeline::{self, PipelineError};
use weekly_sales::domain::{AppConfig, DEPT_RANGE, HolidayFlag, RawInput, STORE_RANGE};
use weekly_sales::features::{DEPT_ENCODING, PASSTHROUGH_COLUMNS, STORE_ENCODING, align};
use weekly_sales::io::ArtifactContext;
use weekly_sales::report::format_currency;

fn training_columns() -> Vec<String> {
    PASSTHROUGH_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(STORE_ENCODING.indicator_columns())
        .chain(DEPT_ENCODING.indicator_columns())
        .collect()
}

fn write_json(path: &Path, value: &serde_json::Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Linear model: 10k baseline, +100 per store level, +10 per dept level,
/// +2500 on holidays.
fn write_linear_model(path: &Path, columns: &[String]) {
    let coefficients: Vec<f64> = columns
        .iter()
        .map(|c| {
            if c == "IsHoliday" {
                2500.0
            } else if let Some(level) = c.strip_prefix("Store_") {
                100.0 * level.parse::<f64>().unwrap()
            } else if let Some(level) = c.strip_prefix("Dept_") {
                10.0 * level.parse::<f64>().unwrap()
            } else {
                0.0
            }
        })
        .collect();
    write_json(
        path,
        &serde_json::json!({
            "kind": "linear",
            "intercept": 10000.0,
            "coefficients": coefficients,
            "feature_names": columns,
        }),
    );
}

struct Fixture {
    _dir: tempfile::TempDir,
    config: AppConfig,
}

fn fixture(write_columns: bool) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let columns = training_columns();
    let config = AppConfig {
        model_path: dir.path().join("best_xgb_model.json"),
        columns_path: dir.path().join("train_columns.json"),
        log_file: None,
    };
    write_linear_model(&config.model_path, &columns);
    if write_columns {
        write_json(&config.columns_path, &serde_json::json!(columns));
    }
    Fixture { _dir: dir, config }
}

#[test]
fn store_20_dept_5_predicts_a_currency_value() {
    let fx = fixture(true);
    let ctx = ArtifactContext::load(&fx.config).unwrap();
    assert!(ctx.notices().is_empty());

    let input = RawInput::new(20, 5, HolidayFlag::No, 2012, 5, 15).unwrap();
    let out = pipeline::predict(&ctx, &input).unwrap();

    assert_eq!(out.prepared.date.day_of_week(), 1);
    assert!((out.weekly_sales - 12_050.0).abs() < 1e-6);
    assert_eq!(format_currency(out.weekly_sales), "$12,050.00");
}

#[test]
fn every_store_and_dept_aligns_to_the_schema() {
    let fx = fixture(true);
    let ctx = ArtifactContext::load(&fx.config).unwrap();
    let schema = ctx.schema().unwrap();

    let baseline: HashSet<String> = [
        STORE_ENCODING.indicator_name(STORE_ENCODING.baseline()),
        DEPT_ENCODING.indicator_name(DEPT_ENCODING.baseline()),
    ]
    .into_iter()
    .collect();

    for store in STORE_RANGE.min..=STORE_RANGE.max {
        for dept in DEPT_RANGE.min..=DEPT_RANGE.max {
            let input = RawInput::new(store, dept, HolidayFlag::No, 2012, 5, 15).unwrap();
            let prepared = pipeline::prepare(&ctx, &input);

            for column in prepared.encoded.columns() {
                assert!(schema.contains(column) || baseline.contains(column), "{column}");
            }

            let aligned = prepared.aligned.as_ref().unwrap();
            assert_eq!(aligned.columns(), schema.columns());

            // Aligning again changes nothing.
            let again = align(&aligned.to_feature_row(), schema.columns());
            assert_eq!(&again.row, aligned);
        }
    }
}

#[test]
fn invalid_date_substitutes_monday_and_predicts() {
    let fx = fixture(true);
    let ctx = ArtifactContext::load(&fx.config).unwrap();

    let input = RawInput::new(1, 1, HolidayFlag::Yes, 2021, 2, 30).unwrap();
    let out = pipeline::predict(&ctx, &input).unwrap();
    assert!(out.prepared.warning().is_some());
    assert_eq!(out.prepared.date.day_of_week(), 0);
    assert!((out.weekly_sales - 12_500.0).abs() < 1e-6);
}

#[test]
fn missing_schema_keeps_running_and_names_the_file() {
    let fx = fixture(false);
    let ctx = ArtifactContext::load(&fx.config).unwrap();
    assert!(ctx.schema().is_err());

    let input = RawInput::default();
    let err = pipeline::predict(&ctx, &input).unwrap_err();
    assert!(matches!(err, PipelineError::MissingSchema(_)));
    assert!(err.to_string().contains("train_columns.json"));

    // A second request behaves the same way; nothing was cached as broken.
    assert!(pipeline::predict(&ctx, &input).is_err());
}

#[test]
fn schema_model_mismatch_is_a_contained_prediction_error() {
    let fx = fixture(true);
    // Column list from a different training run: departments renamed.
    let drifted: Vec<String> = training_columns()
        .into_iter()
        .map(|c| c.replace("Dept_", "Department_"))
        .collect();
    write_json(&fx.config.columns_path, &serde_json::json!(drifted));

    let ctx = ArtifactContext::load(&fx.config).unwrap();
    let input = RawInput::new(20, 5, HolidayFlag::No, 2012, 5, 15).unwrap();

    let err = pipeline::predict(&ctx, &input).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("Prediction error:"), "{msg}");
    assert!(msg.contains("Dept_2"), "{msg}");

    // The context is still usable for further requests.
    assert!(pipeline::predict(&ctx, &RawInput::default()).is_err());
    assert!(!ctx.notices().is_empty());
}

#[test]
fn baseline_column_in_schema_raises_a_notice() {
    let fx = fixture(true);
    let mut columns = training_columns();
    columns.insert(PASSTHROUGH_COLUMNS.len(), "Store_1".to_string());
    write_json(&fx.config.columns_path, &serde_json::json!(columns));
    write_linear_model(&fx.config.model_path, &columns);

    let ctx = ArtifactContext::load(&fx.config).unwrap();
    assert_eq!(ctx.notices().len(), 1);
    assert!(ctx.notices()[0].contains("Store_1"));

    // Store 1 never sets its own column, which is exactly the risk flagged.
    let input = RawInput::new(1, 1, HolidayFlag::No, 2012, 5, 15).unwrap();
    let prepared = pipeline::prepare(&ctx, &input);
    let aligned = prepared.aligned.unwrap();
    assert_eq!(aligned.values()[PASSTHROUGH_COLUMNS.len()], 0.0);
}

#[test]
fn bundled_demo_artifacts_load_and_predict() {
    let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("demo");
    let config = AppConfig {
        model_path: demo.join("best_xgb_model.json"),
        columns_path: demo.join("train_columns.json"),
        log_file: None,
    };
    let ctx = ArtifactContext::load(&config).unwrap();
    assert!(ctx.notices().is_empty(), "{:?}", ctx.notices());

    let input = RawInput::new(20, 5, HolidayFlag::No, 2012, 5, 15).unwrap();
    let out = pipeline::predict(&ctx, &input).unwrap();
    assert!(out.weekly_sales.is_finite());
    assert!(format_currency(out.weekly_sales).starts_with('$'));
}
