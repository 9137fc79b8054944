//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small labelled DataFrame with known characteristics
///
/// This DataFrame includes:
/// - `class`: String class column ("low" / "high")
/// - `step`: Feature whose class flips at 5.0 (two clean divisions)
/// - `count`: Integer feature following the same split
/// - `noise`: Feature with no relation to the class
/// - `sparse`: Feature with missing values
/// - `name`: Non-numeric column that must be left untouched
pub fn create_test_dataframe() -> DataFrame {
    df! {
        "class" => ["low", "low", "low", "low", "low", "high", "high", "high", "high", "high"],
        "step" => [0.0f64, 1.0, 2.0, 3.0, 4.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        "count" => [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10],
        "noise" => [5.0f64, 1.0, 8.0, 2.0, 9.0, 3.0, 7.0, 4.0, 6.0, 0.0],
        "sparse" => [Some(1.0f64), None, Some(2.0), None, Some(3.0), Some(8.0), None, Some(9.0), None, Some(10.0)],
        "name" => ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"],
    }
    .unwrap()
}

/// Create a step-function DataFrame: class "A" below 5.0, "B" above.
///
/// Three samples sit in every 0.1-wide bucket so each initial bucket has a
/// clear dominant class.
pub fn create_step_dataframe() -> DataFrame {
    let mut x = vec![0.0f64];
    let mut class = vec!["A"];
    for k in 0..100 {
        for offset in [0.02, 0.05, 0.08] {
            let v = k as f64 / 10.0 + offset;
            x.push(v);
            class.push(if v < 5.0 { "A" } else { "B" });
        }
    }
    x.push(10.0);
    class.push("B");
    df! {
        "x" => x,
        "class" => class,
    }
    .unwrap()
}

/// Create a larger random DataFrame for performance/stress tests
pub fn create_large_test_dataframe(rows: usize, cols: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let mut columns: Vec<Column> = Vec::with_capacity(cols + 1);

    let class: Vec<&str> = (0..rows)
        .map(|_| if rng.gen_bool(0.5) { "yes" } else { "no" })
        .collect();
    columns.push(Column::new("class".into(), class));

    for i in 0..cols {
        let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>() * 100.0).collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Collect a string column into owned values
pub fn string_values(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}
