//! Basic conversion pipeline tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::sample_statement;
use crate::config::ConvertConfig;
use crate::processor::BatchProcessor;

fn create_source(temp_dir: &TempDir, accounts: &[&str]) -> PathBuf {
    let source = temp_dir.path().join("src");
    fs::create_dir_all(&source).unwrap();
    for account in accounts {
        fs::write(
            source.join(format!("{account}.txt")),
            sample_statement(account),
        )
        .unwrap();
    }
    source
}

fn destination_files(destination: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(destination)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_basic_conversion_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_source(&temp_dir, &["10012345"]);
    let destination = temp_dir.path().join("dst");

    let processor = BatchProcessor::new(source, destination.clone());
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.tables_written, 3);

    let names = destination_files(&destination);
    assert_eq!(names.len(), 3);
    assert!(names[0].starts_with("10012345_WANDA_SHBalances_"));
    assert!(names[1].starts_with("10012345_WANDA_SHPos_"));
    assert!(names[2].starts_with("10012345_WANDA_SHTrades_"));
}

#[tokio::test]
async fn test_balances_table_contents() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_source(&temp_dir, &["10012345"]);
    let destination = temp_dir.path().join("dst");

    BatchProcessor::new(source, destination.clone())
        .process()
        .await
        .unwrap();

    let names = destination_files(&destination);
    let rows = read_csv(&destination.join(&names[0]));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "Account");
    assert_eq!(rows[1][0], "10012345");
    assert_eq!(rows[1][3], "1234.50");
    assert_eq!(rows[1][8], "25.00");
    assert_eq!(rows[1][12], "-1500.00");
    assert_eq!(rows[1][13], "99709.50");
    assert_eq!(rows[1][16], "12/13/2018");
}

#[tokio::test]
async fn test_positions_and_trades_tables() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_source(&temp_dir, &["10012345"]);
    let destination = temp_dir.path().join("dst");

    BatchProcessor::new(source, destination.clone())
        .process()
        .await
        .unwrap();

    let names = destination_files(&destination);
    let positions = read_csv(&destination.join(&names[1]));
    let trades = read_csv(&destination.join(&names[2]));

    // Header plus the two data rows; boundary rows excluded.
    assert_eq!(positions.len(), 3);
    assert_eq!(positions[1][1], "2018-12-12");
    assert_eq!(positions[1][2], "2");
    assert_eq!(positions[2][3], "1");

    assert_eq!(trades.len(), 3);
    assert_eq!(trades[1][2], "2");
    assert_eq!(trades[1][3], "0");
    assert_eq!(trades[2][2], "0");
    assert_eq!(trades[2][3], "1");
    assert_eq!(trades[1][21], "12/12/2018");
}

#[tokio::test]
async fn test_multiple_statements_converted() {
    let temp_dir = TempDir::new().unwrap();
    let source = create_source(&temp_dir, &["10012345", "20045678", "30098765"]);
    let destination = temp_dir.path().join("dst");

    let processor = BatchProcessor::new(source, destination.clone())
        .with_config(ConvertConfig::default().with_workers(2));
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 3);
    assert_eq!(stats.tables_written, 9);
    assert_eq!(destination_files(&destination).len(), 9);
}

#[tokio::test]
async fn test_empty_source_folder() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    fs::create_dir_all(&source).unwrap();
    let destination = temp_dir.path().join("dst");

    let stats = BatchProcessor::new(source, destination.clone())
        .process()
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 0);
    assert_eq!(stats.files_failed, 0);
    // Nothing to convert: the destination is never created.
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_gbk_encoded_statement() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("src");
    fs::create_dir_all(&source).unwrap();
    let statement = sample_statement("10012345");
    let (encoded, _, _) = encoding_rs::GB18030.encode(&statement);
    fs::write(source.join("10012345.txt"), encoded.as_ref()).unwrap();
    let destination = temp_dir.path().join("dst");

    let stats = BatchProcessor::new(source, destination)
        .process()
        .await
        .unwrap();

    assert_eq!(stats.files_processed, 1);
}
