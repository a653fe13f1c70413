/*!
 * # subshot - subtitle-aligned screenshots
 *
 * A Rust library for capturing one still frame per subtitle cue, with the
 * cue burned in by ffmpeg.
 *
 * ## Features
 *
 * - Read SRT or ASS subtitles sitting next to a video
 * - Sample each cue at its midpoint, with a per-format offset
 * - Name frames by a sortable, filesystem-safe `H-MM-SS-mmm` timestamp
 * - Pluggable frame extraction backend (ffmpeg, dry run, test doubles)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Timecode parsing and timestamp formatting
 * - `subtitle_processor`: Subtitle formats, cue splitting and scheduling
 * - `frame_extractor`: External frame capture tool
 * - `file_utils`: Subtitle lookup and output paths
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod frame_extractor;
pub mod subtitle_processor;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, ExtractionError, SubtitleError};
pub use frame_extractor::{FfmpegExtractor, FrameExtractor, FrameRequest};
pub use subtitle_processor::{Cue, CueScheduler, SampleRequest, SubtitleFormat};
