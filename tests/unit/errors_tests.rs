/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use subshot::errors::{AppError, ExtractionError, SubtitleError};

#[test]
fn test_subtitleError_missingSubtitle_shouldListBothPaths() {
    let error = SubtitleError::MissingSubtitle {
        srt: PathBuf::from("/v/movie.srt"),
        ass: PathBuf::from("/v/movie.ass"),
    };
    let display = error.to_string();
    assert!(display.contains("/v/movie.srt"));
    assert!(display.contains("/v/movie.ass"));
}

#[test]
fn test_subtitleError_unparseableTimecode_shouldQuoteInput() {
    let error = SubtitleError::UnparseableTimecode("12:xx".to_string());
    assert_eq!(error.to_string(), "Unparseable timecode: \"12:xx\"");
}

#[test]
fn test_extractionError_failed_shouldDisplayStatus() {
    let error = ExtractionError::Failed { status: Some(69), stderr: "boom".to_string() };
    let display = error.to_string();
    assert!(display.contains("69"));
    assert!(display.contains("boom"));

    let error = ExtractionError::Failed { status: None, stderr: String::new() };
    assert!(error.to_string().contains("unknown"));
}

#[test]
fn test_extractionError_exitCode_shouldPropagateToolStatus() {
    assert_eq!(ExtractionError::Failed { status: Some(69), stderr: String::new() }.exit_code(), 69);
    assert_eq!(ExtractionError::Failed { status: None, stderr: String::new() }.exit_code(), 1);
    assert_eq!(ExtractionError::Failed { status: Some(0), stderr: String::new() }.exit_code(), 1);

    let spawn = ExtractionError::Spawn {
        program: "ffmpeg".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    };
    assert_eq!(spawn.exit_code(), 1);
}

#[test]
fn test_appError_fromExtraction_shouldKeepExitCode() {
    let error: AppError = ExtractionError::Failed { status: Some(3), stderr: String::new() }.into();
    assert_eq!(error.exit_code(), 3);
    assert!(error.to_string().starts_with("Extraction error"));
}

#[test]
fn test_appError_fromSubtitleAndIo_shouldUseGenericExitCode() {
    let error: AppError = SubtitleError::InvalidOutputTimestamp("x".to_string()).into();
    assert_eq!(error.exit_code(), 1);
    assert!(error.to_string().starts_with("Subtitle error"));

    let error: AppError = std::io::Error::other("disk full").into();
    assert!(matches!(error, AppError::File(ref msg) if msg.contains("disk full")));

    let error: AppError = anyhow::anyhow!("odd").into();
    assert!(matches!(error, AppError::Unknown(_)));
}
