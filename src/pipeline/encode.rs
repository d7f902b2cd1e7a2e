//! One-hot encoding of categorical columns
//!
//! Categories are fitted on the union of the training and held-out sets so
//! that both sets receive exactly the same indicator columns.

use std::collections::BTreeSet;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::{PrepError, PrepResult};
use super::schema::text_values;

/// Fitted indicator layout for one categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalEncoding {
    /// Source column, removed by the encoding
    pub column: String,
    /// Baseline category that gets no indicator column (lexically first)
    pub reference: Option<String>,
    /// Categories that receive an indicator column, in lexical order
    pub categories: Vec<String>,
}

impl CategoricalEncoding {
    /// Build an encoding from the observed category set, dropping the first as baseline
    pub fn from_categories(column: &str, observed: BTreeSet<String>) -> Self {
        let mut categories = observed.into_iter();
        let reference = categories.next();
        Self {
            column: column.to_string(),
            reference,
            categories: categories.collect(),
        }
    }

    /// Output column names, in order
    pub fn indicator_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|value| indicator_name(&self.column, value))
            .collect()
    }
}

/// Name of the indicator column for `value` of `column`, e.g. `Sex_male`
pub fn indicator_name(column: &str, value: &str) -> String {
    format!("{}_{}", column, value)
}

fn observed_categories(df: &DataFrame, column: &str) -> PrepResult<BTreeSet<String>> {
    Ok(text_values(df, column)?.into_iter().flatten().collect())
}

/// Fit the encoding of `column` over the union of both record sets
pub fn fit_encoding(
    train: &DataFrame,
    holdout: &DataFrame,
    column: &str,
) -> PrepResult<CategoricalEncoding> {
    let mut observed = observed_categories(train, column)?;
    observed.extend(observed_categories(holdout, column)?);
    Ok(CategoricalEncoding::from_categories(column, observed))
}

/// Fit encodings for every column in `columns`, preserving their order
pub fn fit_encodings(
    train: &DataFrame,
    holdout: &DataFrame,
    columns: &[&str],
) -> PrepResult<Vec<CategoricalEncoding>> {
    columns
        .iter()
        .map(|column| fit_encoding(train, holdout, column))
        .collect()
}

/// Replace the source column with its indicator columns, appended at the end.
///
/// Missing values and the reference category set no indicator.
pub fn apply_encoding(df: &DataFrame, encoding: &CategoricalEncoding) -> PrepResult<DataFrame> {
    let values = text_values(df, &encoding.column)?;
    let mut out = df.drop(&encoding.column)?;

    for (value, name) in encoding.categories.iter().zip(encoding.indicator_names()) {
        if out.column(&name).is_ok() {
            return Err(PrepError::schema(format!(
                "indicator column '{}' for '{}' clashes with an existing column",
                name, encoding.column
            )));
        }

        let flags: Vec<bool> = values
            .iter()
            .map(|v| v.as_deref() == Some(value.as_str()))
            .collect();
        out.with_column(Column::new(name.into(), flags))?;
    }

    Ok(out)
}

/// Stage 7: apply all fitted encodings in order
pub fn encode_categoricals(
    df: &DataFrame,
    encodings: &[CategoricalEncoding],
) -> PrepResult<DataFrame> {
    encodings
        .iter()
        .try_fold(df.clone(), |acc, encoding| apply_encoding(&acc, encoding))
}
