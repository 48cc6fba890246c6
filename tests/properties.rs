//! Properties that must hold for every input, not just the hand-picked cases
//! in the unit tests.

use proptest::prelude::*;

use weekly_sales::domain::{DEPT_RANGE, HolidayFlag, RawInput, STORE_RANGE};
use weekly_sales::features::{
    DEPT_ENCODING, DateCheck, FILL_VALUE, FeatureRow, PASSTHROUGH_COLUMNS, STORE_ENCODING, align,
    check_date, encode_features,
};

/// Column names drawn from a small alphabet so rows and schemas overlap often.
fn column() -> impl Strategy<Value = String> {
    "[a-f][0-2]"
}

fn feature_row() -> impl Strategy<Value = FeatureRow> {
    prop::collection::vec((column(), -1.0e6_f64..1.0e6), 0..12)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// An ordered schema without duplicate names.
fn schema() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(column(), 0..12).prop_map(|names| {
        let mut unique: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        unique
    })
}

fn is_leap(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Sakamoto's weekday formula, shifted to Monday = 0.
fn weekday_from_monday(year: i64, month: i64, day: i64) -> u32 {
    const OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 3 { year - 1 } else { year };
    let sunday_based = (y + y / 4 - y / 100 + y / 400 + OFFSETS[(month - 1) as usize] + day)
        .rem_euclid(7);
    ((sunday_based + 6) % 7) as u32
}

proptest! {
    #[test]
    fn aligned_columns_equal_the_schema(row in feature_row(), cols in schema()) {
        let aligned = align(&row, &cols);
        prop_assert_eq!(aligned.row.columns(), cols.as_slice());
        prop_assert_eq!(aligned.row.len(), cols.len());
    }

    #[test]
    fn alignment_fills_and_drops_exactly_the_difference(row in feature_row(), cols in schema()) {
        let aligned = align(&row, &cols);

        for (column, value) in cols.iter().zip(aligned.row.values()) {
            prop_assert_eq!(*value, row.get(column).unwrap_or(FILL_VALUE));
        }

        let filled: Vec<String> = cols.iter().filter(|c| row.get(c).is_none()).cloned().collect();
        prop_assert_eq!(aligned.filled, filled);

        let dropped: Vec<String> =
            row.columns().iter().filter(|c| !cols.contains(c)).cloned().collect();
        prop_assert_eq!(aligned.dropped, dropped);
    }

    #[test]
    fn alignment_is_idempotent(row in feature_row(), cols in schema()) {
        let once = align(&row, &cols);
        let twice = align(&once.row.to_feature_row(), &cols);
        prop_assert_eq!(&once.row, &twice.row);
        prop_assert!(twice.filled.is_empty());
        prop_assert!(twice.dropped.is_empty());
    }

    #[test]
    fn check_date_matches_the_calendar(year in 1u32..=9999, month in 0u32..=13, day in 0u32..=32) {
        let (y, m, d) = (i64::from(year), i64::from(month), i64::from(day));
        let check = check_date(year, month, day);

        if d >= 1 && d <= days_in_month(y, m) {
            prop_assert!(matches!(check, DateCheck::Valid { .. }), "{year}-{month}-{day}");
            prop_assert_eq!(check.day_of_week(), weekday_from_monday(y, m, d));
            prop_assert_eq!(check.warning(), None);
        } else {
            prop_assert_eq!(check, DateCheck::Invalid { day_of_week: 0 });
            prop_assert!(check.warning().is_some());
        }
    }

    #[test]
    fn encoded_form_sets_only_its_own_indicators(
        store in STORE_RANGE.min..=STORE_RANGE.max,
        dept in DEPT_RANGE.min..=DEPT_RANGE.max,
        holiday in any::<bool>(),
        year in 2000u32..=2030,
        month in 1u32..=12,
        day in 1u32..=31
    ) {
        let input = RawInput::new(store, dept, HolidayFlag::from(holiday), year, month, day)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let encoded = encode_features(&input, &check_date(year, month, day));

        let cols: Vec<String> = PASSTHROUGH_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(STORE_ENCODING.indicator_columns())
            .chain(DEPT_ENCODING.indicator_columns())
            .collect();
        let aligned = align(&encoded, &cols);
        prop_assert!(aligned.dropped.is_empty());

        let expected_on: Vec<String> = STORE_ENCODING
            .encode(store)
            .into_iter()
            .chain(DEPT_ENCODING.encode(dept))
            .collect();
        for (column, value) in aligned.row.columns().iter().zip(aligned.row.values()) {
            if column.starts_with("Store_") || column.starts_with("Dept_") {
                let expected = if expected_on.contains(column) { 1.0 } else { 0.0 };
                prop_assert_eq!(*value, expected, "{}", column);
            }
        }
    }
}
