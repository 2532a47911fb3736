//! Error handling integration tests

use crate::config::ArrivalsConfig;
use crate::error::ArrivalsError;
use crate::processor::ArrivalsProcessor;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_nonexistent_input() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.csv");

    let result = ArrivalsProcessor::new([missing.to_string_lossy()], temp_dir.path().join("out"));

    match result.unwrap_err() {
        ArrivalsError::InputNotFound { path } => assert_eq!(path, missing),
        _ => panic!("Expected InputNotFound error"),
    }
}

#[tokio::test]
async fn test_empty_input_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("empty");
    fs::create_dir_all(&input_dir).unwrap();

    let result = ArrivalsProcessor::new([input_dir.to_string_lossy()], temp_dir.path().join("out"));

    assert!(matches!(result, Err(ArrivalsError::InputNotFound { .. })));
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("arrivals.csv");
    fs::write(&input, "Series,2024Jan\nTotal,1\n").unwrap();

    let processor = ArrivalsProcessor::new([input.to_string_lossy()], temp_dir.path().join("out"))
        .unwrap()
        .with_config(ArrivalsConfig::default().without_csv().without_parquet());

    match processor.process().await {
        Err(ArrivalsError::Configuration { message }) => {
            assert!(message.contains("output"));
        }
        other => panic!("Expected Configuration error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failing_file_is_counted_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("input");
    fs::create_dir_all(&input_dir).unwrap();
    fs::write(input_dir.join("good.csv"), "Series,2024Jan\nTotal,1\n").unwrap();
    // Invalid UTF-8 cannot be decoded by the CSV reader
    fs::write(input_dir.join("bad.csv"), b"Series,2024Jan\n\xff\xfe,1\n").unwrap();

    let processor = ArrivalsProcessor::new([input_dir.to_string_lossy()], temp_dir.path().join("out"))
        .unwrap()
        .with_config(ArrivalsConfig::default().without_progress());
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.output_paths, vec![temp_dir.path().join("out").join("good")]);
}

#[tokio::test]
async fn test_header_only_file_writes_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("arrivals.csv");
    fs::write(&input, "Series,2024Jan\n").unwrap();

    let processor = ArrivalsProcessor::new([input.to_string_lossy()], temp_dir.path().join("out"))
        .unwrap()
        .with_config(ArrivalsConfig::default().without_progress());
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.series_written, 0);
    assert_eq!(stats.observations_written, 0);
}
