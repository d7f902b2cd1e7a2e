//! Passenger manifest schema: column names, validation and typed column access

use std::collections::BTreeSet;

use polars::prelude::*;

use super::error::{PrepError, PrepResult};

pub const NAME: &str = "Name";
pub const AGE: &str = "Age";
pub const SIBSP: &str = "SibSp";
pub const PARCH: &str = "Parch";
pub const SEX: &str = "Sex";
pub const EMBARKED: &str = "Embarked";
pub const CABIN: &str = "Cabin";

/// Derived columns
pub const TITLE: &str = "Title";
pub const FAMILY_SIZE: &str = "FamilySize";
pub const IS_ALONE: &str = "IsAlone";

/// Default name of the training label
pub const DEFAULT_TARGET: &str = "Survived";

/// Categorical columns replaced by indicator columns, in output order
pub const ENCODED_COLUMNS: [&str; 3] = [SEX, EMBARKED, TITLE];

/// Expected kind of a required column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Any numeric type; an all-missing column is accepted
    Numeric,
    /// Integer type, or a float type holding only whole numbers.
    /// Missing values are rejected downstream.
    Integer,
    /// String type; an all-missing column is accepted
    Text,
}

impl ColumnKind {
    fn accepts(&self, dtype: &DataType) -> bool {
        match self {
            ColumnKind::Numeric => dtype.is_primitive_numeric() || *dtype == DataType::Null,
            ColumnKind::Integer => dtype.is_integer() || dtype.is_float(),
            ColumnKind::Text => matches!(dtype, DataType::String | DataType::Null),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Integer => "integer",
            ColumnKind::Text => "text",
        }
    }
}

/// Columns every record set must provide
pub const REQUIRED_COLUMNS: [(&str, ColumnKind); 7] = [
    (NAME, ColumnKind::Text),
    (AGE, ColumnKind::Numeric),
    (SIBSP, ColumnKind::Integer),
    (PARCH, ColumnKind::Integer),
    (SEX, ColumnKind::Text),
    (EMBARKED, ColumnKind::Text),
    (CABIN, ColumnKind::Text),
];

/// Check that a single record set carries the required columns with usable types.
///
/// `label` names the set in error messages ("training" / "held-out").
pub fn validate_record_set(df: &DataFrame, label: &str) -> PrepResult<()> {
    for (name, kind) in REQUIRED_COLUMNS {
        let column = df.column(name).map_err(|_| {
            PrepError::schema(format!(
                "{} set is missing required column '{}'",
                label, name
            ))
        })?;

        if !kind.accepts(column.dtype()) {
            return Err(PrepError::schema(format!(
                "column '{}' in {} set must be {}, found {}",
                name,
                label,
                kind.describe(),
                column.dtype()
            )));
        }

        if kind == ColumnKind::Integer && column.dtype().is_float() {
            check_whole_numbers(df, name, label)?;
        }
    }
    Ok(())
}

/// Float columns standing in for integers must hold whole, finite values only
fn check_whole_numbers(df: &DataFrame, name: &str, label: &str) -> PrepResult<()> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    let fractional = column
        .f64()?
        .into_iter()
        .enumerate()
        .find(|(_, v)| v.is_some_and(|x| !x.is_finite() || x.fract() != 0.0));

    match fractional {
        Some((row, Some(value))) => Err(PrepError::schema(format!(
            "column '{}' in {} set must hold whole numbers, found {} at row {}",
            name, label, value, row
        ))),
        _ => Ok(()),
    }
}

/// Two dtypes can describe the same column: equal, one side all-missing, or both numeric
fn dtypes_compatible(a: &DataType, b: &DataType) -> bool {
    a == b
        || *a == DataType::Null
        || *b == DataType::Null
        || (a.is_primitive_numeric() && b.is_primitive_numeric())
}

/// Validate both record sets and check they share the same columns.
///
/// The training set must contain `target`; the held-out set may omit it.
pub fn validate_inputs(train: &DataFrame, holdout: &DataFrame, target: &str) -> PrepResult<()> {
    validate_record_set(train, "training")?;
    validate_record_set(holdout, "held-out")?;

    if train.column(target).is_err() {
        return Err(PrepError::schema(format!(
            "training set is missing target column '{}'",
            target
        )));
    }

    let train_cols = column_set(train, target);
    let holdout_cols = column_set(holdout, target);
    if train_cols != holdout_cols {
        let only_train: Vec<&String> = train_cols.difference(&holdout_cols).collect();
        let only_holdout: Vec<&String> = holdout_cols.difference(&train_cols).collect();
        return Err(PrepError::schema(format!(
            "record sets have different columns (training only: {:?}, held-out only: {:?})",
            only_train, only_holdout
        )));
    }

    for name in &train_cols {
        let train_dtype = train.column(name)?.dtype();
        let holdout_dtype = holdout.column(name)?.dtype();
        if !dtypes_compatible(train_dtype, holdout_dtype) {
            return Err(PrepError::schema(format!(
                "column '{}' has type {} in training set but {} in held-out set",
                name, train_dtype, holdout_dtype
            )));
        }
    }

    Ok(())
}

fn column_set(df: &DataFrame, target: &str) -> BTreeSet<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|s| s != target)
        .collect()
}

/// Read a text column as owned optional strings. All-null columns yield all `None`.
pub fn text_values(df: &DataFrame, name: &str) -> PrepResult<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Read a numeric column as optional `f64`; NaN is reported as missing.
pub fn float_values(df: &DataFrame, name: &str) -> PrepResult<Vec<Option<f64>>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Read a required integer column; any missing value is a schema violation.
pub fn required_int_values(df: &DataFrame, name: &str) -> PrepResult<Vec<i64>> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    column
        .i64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.ok_or_else(|| {
                PrepError::schema(format!(
                    "required column '{}' has a missing value at row {}",
                    name, row
                ))
            })
        })
        .collect()
}

/// Replace (or append) a column, returning a new frame.
pub fn with_column(df: &DataFrame, column: Column) -> PrepResult<DataFrame> {
    let mut out = df.clone();
    out.with_column(column)?;
    Ok(out)
}
