use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::SubtitleError;
use crate::subtitle_processor::SubtitleFormat;

// @module: File and directory utilities

/// Subtitle file chosen for a video
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleSource {
    /// Format whose timings drive the run
    pub format: SubtitleFormat,
    /// File the cue timings are read from
    pub timing_path: PathBuf,
    /// File handed to the burn-in filter
    pub burn_in_path: PathBuf,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed, fine if it already exists
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    // @returns: File name of the video without its extension
    pub fn video_stem<P: AsRef<Path>>(video_path: P) -> String {
        video_path.as_ref()
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    // @returns: Sibling of the video with the same stem and another extension
    pub fn sibling_with_extension<P: AsRef<Path>>(video_path: P, extension: &str) -> PathBuf {
        let video_path = video_path.as_ref();
        let dir = video_path.parent().unwrap_or(Path::new(""));
        dir.join(format!("{}.{}", Self::video_stem(video_path), extension))
    }

    /// Pick the subtitle file for a video.
    ///
    /// The `.srt` sibling wins when present, otherwise the `.ass` sibling is
    /// used. The burn-in filter always prefers the `.ass` file when it exists,
    /// since it carries styling the SRT lacks.
    pub fn locate_subtitles<P: AsRef<Path>>(video_path: P) -> Result<SubtitleSource, SubtitleError> {
        let video_path = video_path.as_ref();
        let srt = Self::sibling_with_extension(video_path, SubtitleFormat::Srt.extension());
        let ass = Self::sibling_with_extension(video_path, SubtitleFormat::Ass.extension());

        let ass_exists = Self::file_exists(&ass);
        if Self::file_exists(&srt) {
            let burn_in_path = if ass_exists { ass } else { srt.clone() };
            Ok(SubtitleSource {
                format: SubtitleFormat::Srt,
                timing_path: srt,
                burn_in_path,
            })
        } else if ass_exists {
            Ok(SubtitleSource {
                format: SubtitleFormat::Ass,
                timing_path: ass.clone(),
                burn_in_path: ass,
            })
        } else {
            Err(SubtitleError::MissingSubtitle { srt, ass })
        }
    }

    // @returns: Directory beside the video named after its stem
    pub fn output_dir_for<P: AsRef<Path>>(video_path: P) -> PathBuf {
        let video_path = video_path.as_ref();
        let dir = video_path.parent().unwrap_or(Path::new(""));
        dir.join(Self::video_stem(video_path))
    }

    // @generates: Output path for one captured frame
    // @params: output_dir, video_stem, timestamp, extension
    pub fn generate_frame_path<P: AsRef<Path>>(
        output_dir: P,
        video_stem: &str,
        timestamp: &str,
        extension: &str,
    ) -> PathBuf {
        output_dir.as_ref().join(format!("{}-{}.{}", video_stem, timestamp, extension))
    }
}
