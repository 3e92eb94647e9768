//! End-to-end pipeline tests against a real store file.
//!
//! These exercise the full library API: input files on disk, a SQLite-backed
//! store in a temp directory, and the complete run from ingestion to the
//! transformed target table.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use table_transfer::scan::scan_column;
use table_transfer::store::{Column, StoreConnection};
use table_transfer::{run_pipeline, Config, PipelineError, SourceError};

fn write_input(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).expect("failed to write input fixture");
}

fn test_config(dir: &TempDir, files: &[&str]) -> Config {
    Config {
        files: files.iter().map(PathBuf::from).collect(),
        data_dir: dir.path().to_path_buf(),
        store_path: dir.path().join("store.db"),
        ..Default::default()
    }
}

async fn scan_table(store_path: &Path, table: &str) -> BTreeMap<String, String> {
    let connection = StoreConnection::open(store_path).await.unwrap();
    let handle = connection.table(table).await.unwrap();
    let data = scan_column(&handle, &Column::new("cf", "q")).await.unwrap();
    handle.close();
    connection.close().await;
    data
}

#[tokio::test]
async fn test_full_run_transforms_into_target_table() {
    let dir = TempDir::new().unwrap();
    write_input(&dir, "db_in_1.csv", "k1,v1\nk2,v2\nk1,v3\n");
    write_input(&dir, "db_in_2.csv", "k4,hello world\n");

    let config = test_config(&dir, &["db_in_1.csv", "db_in_2.csv"]);
    let store_path = config.store_path.clone();
    let report = run_pipeline(config).await.unwrap();

    assert_eq!(report.files_ingested, 2);
    // k1 appears twice in the first file; last write wins, so three
    // distinct records land in the source table (3 loaded from file 1
    // counts the deduplicated mapping, not the raw lines).
    assert_eq!(report.records_loaded, 3);
    assert_eq!(report.records_transformed, 3);

    let source = scan_table(&store_path, "t1").await;
    let expected_source: BTreeMap<String, String> = [
        ("k1".to_string(), "v3".to_string()),
        ("k2".to_string(), "v2".to_string()),
        ("k4".to_string(), "hello world".to_string()),
    ]
    .into();
    assert_eq!(source, expected_source);

    let target = scan_table(&store_path, "t2").await;
    let expected_target: BTreeMap<String, String> = [
        ("k1".to_string(), "V3".to_string()),
        ("k2".to_string(), "V2".to_string()),
        ("k4".to_string(), "HELLO WORLD".to_string()),
    ]
    .into();
    assert_eq!(target, expected_target);
}

#[tokio::test]
async fn test_last_write_wins_scenario() {
    let dir = TempDir::new().unwrap();
    write_input(&dir, "in.csv", "k1,v1\nk2,v2\nk1,v3\n");

    let config = test_config(&dir, &["in.csv"]);
    let store_path = config.store_path.clone();
    run_pipeline(config).await.unwrap();

    let target = scan_table(&store_path, "t2").await;
    let expected: BTreeMap<String, String> = [
        ("k1".to_string(), "V3".to_string()),
        ("k2".to_string(), "V2".to_string()),
    ]
    .into();
    assert_eq!(target, expected);
}

#[tokio::test]
async fn test_malformed_file_aborts_run() {
    let dir = TempDir::new().unwrap();
    write_input(&dir, "good.csv", "k1,v1\n");
    write_input(&dir, "bad.csv", "onlykey\n");

    let config = test_config(&dir, &["good.csv", "bad.csv"]);
    let store_path = config.store_path.clone();
    let err = run_pipeline(config).await.unwrap_err();

    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::Source(SourceError::Parse { line_number, .. })) => {
            assert_eq!(*line_number, 1);
        }
        other => panic!("expected a source parse error, got {other:?}"),
    }

    // The earlier file was already loaded; the malformed file contributed
    // nothing, and the run aborted before the target table was provisioned.
    let source = scan_table(&store_path, "t1").await;
    assert_eq!(source.len(), 1);
    assert_eq!(source.get("k1").unwrap(), "v1");

    let connection = StoreConnection::open(&store_path).await.unwrap();
    assert!(!connection.admin().table_exists("t2").await.unwrap());
    connection.close().await;
}

#[tokio::test]
async fn test_missing_input_file_aborts_run() {
    let dir = TempDir::new().unwrap();

    let config = test_config(&dir, &["absent.csv"]);
    let err = run_pipeline(config).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::Source(SourceError::Read { .. }))
    ));
}

#[tokio::test]
async fn test_rerun_against_existing_tables_succeeds() {
    let dir = TempDir::new().unwrap();
    write_input(&dir, "in.csv", "k1,v1\n");

    let config = test_config(&dir, &["in.csv"]);
    run_pipeline(config.clone()).await.unwrap();
    // Both tables exist now; the create path is idempotent, so a second
    // run over the same store succeeds.
    run_pipeline(config.clone()).await.unwrap();

    let target = scan_table(&config.store_path, "t2").await;
    assert_eq!(target.get("k1").unwrap(), "V1");
}

#[tokio::test]
async fn test_run_without_input_files_fails_fast() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir, &[]);
    assert!(run_pipeline(config).await.is_err());
}

#[tokio::test]
async fn test_custom_delimiter_and_tables() {
    let dir = TempDir::new().unwrap();
    write_input(&dir, "in.txt", "k1;left;right\n");

    let config = Config {
        delimiter: ';',
        source_table: "staging".to_string(),
        target_table: "final".to_string(),
        ..test_config(&dir, &["in.txt"])
    };
    let store_path = config.store_path.clone();
    run_pipeline(config).await.unwrap();

    // Only the first delimiter splits; the value keeps the rest.
    let target = scan_table(&store_path, "final").await;
    assert_eq!(target.get("k1").unwrap(), "LEFT;RIGHT");
}
