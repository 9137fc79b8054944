//! Unit tests for dataset loader

use lucs_dn::pipeline::{get_column_names, load_dataset_with_progress, save_dataset};
use polars::prelude::*;
use std::io::Write;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,class").unwrap();
    writeln!(file, "1,2.5,yes").unwrap();
    writeln!(file, "4,5.5,no").unwrap();
    drop(file);

    let (df, rows, cols, mem_mb) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 2, "Should have 2 data rows");
    assert_eq!(cols, 3, "Should have 3 columns");
    assert_eq!(df.get_column_names(), &["a", "b", "class"]);
    assert!(mem_mb >= 0.0, "Memory estimate should be non-negative");
}

#[test]
fn test_load_parquet_file() {
    let mut df = common::create_test_dataframe();
    let (_temp_dir, parquet_path) = common::create_temp_parquet(&mut df);

    let (loaded_df, rows, cols, _mem) = load_dataset_with_progress(&parquet_path, 100).unwrap();

    assert_eq!(rows, 10);
    assert_eq!(cols, 6);
    assert_eq!(loaded_df.get_column_names(), df.get_column_names());
}

#[test]
fn test_get_column_names_csv() {
    let mut df = common::create_test_dataframe();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    let columns = get_column_names(&csv_path).unwrap();

    assert_eq!(columns, vec!["class", "step", "count", "noise", "sparse", "name"]);
}

#[test]
fn test_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let bad_path = temp_dir.path().join("test.xlsx");
    std::fs::File::create(&bad_path).unwrap();

    let result = load_dataset_with_progress(&bad_path, 100);

    assert!(result.is_err(), "Unsupported format should return error");
    let err_msg = result.unwrap_err().to_string();
    assert!(
        err_msg.contains("Unsupported"),
        "Error message should mention unsupported format: {}",
        err_msg
    );
}

#[test]
fn test_nonexistent_file() {
    let path = std::path::Path::new("/nonexistent/path/to/file.csv");

    let result = load_dataset_with_progress(path, 100);

    assert!(result.is_err(), "Nonexistent file should return error");
}

#[test]
fn test_csv_with_missing_values() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("missing.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,class").unwrap();
    writeln!(file, "1,,x").unwrap();
    writeln!(file, ",2,").unwrap();
    writeln!(file, "4,5,y").unwrap();
    drop(file);

    let (df, rows, _, _) = load_dataset_with_progress(&csv_path, 100).unwrap();

    assert_eq!(rows, 3);
    let null_counts: Vec<usize> = df.get_columns().iter().map(|c| c.null_count()).collect();
    assert_eq!(null_counts, vec![1, 1, 1]);
}

#[test]
fn test_save_dataset_csv_and_parquet() {
    let temp_dir = TempDir::new().unwrap();
    let mut df = common::create_test_dataframe();

    for name in ["out.csv", "out.parquet"] {
        let path = temp_dir.path().join(name);
        save_dataset(&mut df, &path).unwrap();

        let (loaded, rows, cols, _) = load_dataset_with_progress(&path, 100).unwrap();
        assert_eq!((rows, cols), (10, 6), "shape mismatch for {}", name);
        assert_eq!(
            common::string_values(&loaded, "class"),
            common::string_values(&df, "class")
        );
    }
}

#[test]
fn test_save_dataset_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let mut df = common::create_test_dataframe();

    let result = save_dataset(&mut df, &temp_dir.path().join("out.json"));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unsupported output format"));
}
