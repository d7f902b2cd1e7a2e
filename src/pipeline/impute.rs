//! Missing value imputation
//!
//! Statistics are fitted on the training set only and then applied to
//! every record set, so the held-out set never influences its own fill values.

use std::collections::BTreeMap;

use polars::prelude::*;

use super::error::{PrepError, PrepResult};
use super::schema::{float_values, text_values, with_column, AGE, CABIN, EMBARKED};

/// Default sentinel written into missing Cabin values
pub const DEFAULT_CABIN_FILL: &str = "Unknown";

/// Median of the non-missing values of `column` in the training set.
///
/// Even-length inputs average the two middle values.
pub fn fit_median(train: &DataFrame, column: &str) -> PrepResult<f64> {
    let mut values: Vec<f64> = float_values(train, column)?.into_iter().flatten().collect();

    if values.is_empty() {
        return Err(PrepError::data(format!(
            "median of '{}' is undefined: training set has no non-missing values",
            column
        )));
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };
    Ok(median)
}

/// Most frequent non-missing value of a text column in the training set.
///
/// Ties resolve to the lexically smallest value so repeated runs agree.
pub fn fit_mode(train: &DataFrame, column: &str) -> PrepResult<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for value in text_values(train, column)?.into_iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }

    // BTreeMap iterates lexically; keep the first value reaching the max count
    let mut best: Option<(String, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value).ok_or_else(|| {
        PrepError::data(format!(
            "mode of '{}' is undefined: training set has no non-missing values",
            column
        ))
    })
}

/// Fill missing values of a numeric column with `value`. The column becomes Float64.
pub fn fill_numeric(df: &DataFrame, column: &str, value: f64) -> PrepResult<DataFrame> {
    let filled: Vec<f64> = float_values(df, column)?
        .into_iter()
        .map(|v| v.unwrap_or(value))
        .collect();
    with_column(df, Column::new(column.into(), filled))
}

/// Fill missing values of a text column with `value`.
pub fn fill_text(df: &DataFrame, column: &str, value: &str) -> PrepResult<DataFrame> {
    let filled: Vec<String> = text_values(df, column)?
        .into_iter()
        .map(|v| v.unwrap_or_else(|| value.to_string()))
        .collect();
    with_column(df, Column::new(column.into(), filled))
}

/// Stage 1: fill missing Age with the training median
pub fn impute_age(df: &DataFrame, median: f64) -> PrepResult<DataFrame> {
    fill_numeric(df, AGE, median)
}

/// Stage 2: fill missing Cabin with a sentinel category
pub fn impute_cabin(df: &DataFrame, sentinel: &str) -> PrepResult<DataFrame> {
    fill_text(df, CABIN, sentinel)
}

/// Stage 3: fill missing Embarked with the training mode
pub fn impute_embarked(df: &DataFrame, mode: &str) -> PrepResult<DataFrame> {
    fill_text(df, EMBARKED, mode)
}

/// Count missing values in a column (NaN counts as missing for floats)
pub fn count_missing(df: &DataFrame, column: &str) -> PrepResult<usize> {
    let col = df.column(column)?;
    if col.dtype().is_float() {
        Ok(float_values(df, column)?.iter().filter(|v| v.is_none()).count())
    } else {
        Ok(col.null_count())
    }
}
