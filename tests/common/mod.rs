//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Small training manifest with known characteristics:
/// - `Age`: [22, -, 38, -, 35, 54] → median 36.5
/// - `Embarked`: S ×3, C ×1, one missing → mode "S"
/// - `Cabin`: four missing
/// - one name without a title
pub fn create_train_dataframe() -> DataFrame {
    df! {
        "PassengerId" => [1i64, 2, 3, 4, 5, 6],
        "Survived" => [0i64, 1, 1, 1, 0, 0],
        "Pclass" => [3i64, 1, 3, 1, 3, 1],
        "Name" => [
            "Braund, Mr. Owen Harris",
            "Cumings, Mrs. John Bradley (Florence Briggs Thayer)",
            "Heikkinen, Miss. Laina",
            "Futrelle, Mrs. Jacques Heath (Lily May Peel)",
            "Allen, Mr. William Henry",
            "Unusual Name Without Title",
        ],
        "Sex" => ["male", "female", "female", "female", "male", "male"],
        "Age" => [Some(22.0f64), None, Some(38.0), None, Some(35.0), Some(54.0)],
        "SibSp" => [1i64, 1, 0, 1, 0, 0],
        "Parch" => [0i64, 0, 0, 0, 0, 0],
        "Fare" => [7.25f64, 71.2833, 7.925, 53.1, 8.05, 51.8625],
        "Cabin" => [None, Some("C85"), None, Some("C123"), None, None],
        "Embarked" => [Some("S"), Some("C"), Some("S"), None, Some("S"), Some("S")],
    }
    .unwrap()
}

/// Held-out manifest sharing the training columns minus `Survived`.
///
/// Includes categories absent from training (`Embarked` "Q", title "Master")
/// and lacks training categories (`Embarked` "C", title "Mrs").
pub fn create_holdout_dataframe() -> DataFrame {
    df! {
        "PassengerId" => [892i64, 893, 894],
        "Pclass" => [3i64, 3, 2],
        "Name" => [
            "Kelly, Mr. James",
            "Palsson, Master. Gosta Leonard",
            "Myles, Miss. Margaret",
        ],
        "Sex" => ["male", "male", "female"],
        "Age" => [None, Some(2.0f64), Some(62.0)],
        "SibSp" => [0i64, 3, 0],
        "Parch" => [0i64, 1, 0],
        "Fare" => [7.8292f64, 21.075, 9.6875],
        "Cabin" => [None::<&str>, None, None],
        "Embarked" => [Some("Q"), None, Some("S")],
    }
    .unwrap()
}

const TITLED_NAMES: [&str; 6] = [
    "Smith, Mr. John",
    "Jones, Mrs. Mary",
    "Brown, Miss. Alice",
    "Taylor, Master. Tom",
    "Wilson, Dr. Henry",
    "Nameless Passenger",
];

/// Generate a random manifest. With `with_target` the frame carries `Survived`.
pub fn create_random_manifest(rows: usize, seed: u64, with_target: bool) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let names: Vec<&str> = (0..rows)
        .map(|_| TITLED_NAMES[rng.gen_range(0..TITLED_NAMES.len())])
        .collect();
    let sex: Vec<&str> = (0..rows)
        .map(|_| if rng.gen_bool(0.5) { "male" } else { "female" })
        .collect();
    let age: Vec<Option<f64>> = (0..rows)
        .map(|_| {
            if rng.gen_bool(0.2) {
                None
            } else {
                Some(rng.gen_range(1..80) as f64)
            }
        })
        .collect();
    let sibsp: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..4)).collect();
    let parch: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..3)).collect();
    let cabin: Vec<Option<String>> = (0..rows)
        .map(|i| {
            if rng.gen_bool(0.7) {
                None
            } else {
                Some(format!("C{}", i))
            }
        })
        .collect();
    let ports = ["S", "C", "Q"];
    let embarked: Vec<Option<&str>> = (0..rows)
        .map(|_| {
            if rng.gen_bool(0.05) {
                None
            } else {
                Some(ports[rng.gen_range(0..ports.len())])
            }
        })
        .collect();

    let mut columns = vec![
        Column::new("Name".into(), names),
        Column::new("Sex".into(), sex),
        Column::new("Age".into(), age),
        Column::new("SibSp".into(), sibsp),
        Column::new("Parch".into(), parch),
        Column::new("Cabin".into(), cabin),
        Column::new("Embarked".into(), embarked),
    ];
    if with_target {
        let survived: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
        columns.push(Column::new("Survived".into(), survived));
    }

    DataFrame::new(columns).unwrap()
}

/// Write a DataFrame as CSV to `path`
pub fn write_csv(df: &mut DataFrame, path: &Path) {
    let mut file = std::fs::File::create(path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();
}

/// Create a temporary directory with a CSV file of the given name
pub fn create_temp_csv_named(df: &mut DataFrame, name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join(name);
    write_csv(df, &csv_path);
    (temp_dir, csv_path)
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    create_temp_csv_named(df, "test_data.csv")
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

pub fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn i64_values(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn bool_values(df: &DataFrame, name: &str) -> Vec<Option<bool>> {
    df.column(name).unwrap().bool().unwrap().into_iter().collect()
}

pub fn str_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect()
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols = column_names(df);
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols = column_names(df);
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
