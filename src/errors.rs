/*!
 * Error types for the subshot application.
 *
 * This module contains custom error types for the different stages of a run,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading subtitles and computing timestamps
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timecode matched neither the SRT nor the ASS layout
    #[error("Unparseable timecode: {0:?}")]
    UnparseableTimecode(String),

    /// Neither subtitle sibling exists next to the video
    #[error("No subtitle file found: tried {} and {}", .srt.display(), .ass.display())]
    MissingSubtitle {
        /// Candidate SRT path
        srt: PathBuf,
        /// Candidate ASS path
        ass: PathBuf,
    },

    /// A string is not in the H-MM-SS-mmm output layout
    #[error("Invalid output timestamp: {0:?}")]
    InvalidOutputTimestamp(String),
}

/// Errors that can occur when invoking the frame extraction tool
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The tool could not be started at all
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and exited unsuccessfully
    #[error("Frame extraction failed (exit status {}): {stderr}", .status.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    Failed {
        /// Exit code, if the process exited normally
        status: Option<i32>,
        /// Filtered stderr output
        stderr: String,
    },
}

impl ExtractionError {
    /// Process exit code to report for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Failed { status: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the extraction tool
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Process exit code to report for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Extraction(e) => e.exit_code(),
            _ => 1,
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
