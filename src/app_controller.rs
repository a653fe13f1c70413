use log::{info, warn};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{FileManager, SubtitleSource};
use crate::frame_extractor::{FfmpegExtractor, FrameExtractor, FrameRequest};
use crate::subtitle_processor::{CueScheduler, SampleRequest};

// @module: Application controller for screenshot extraction

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of frames written
    pub frames_written: usize,
    /// Directory holding the frames
    pub output_dir: PathBuf,
}

/// Main application controller: one video in, one frame per cue out
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Frame capture backend
    extractor: Box<dyn FrameExtractor>,

    // @field: Draw a progress bar while capturing
    show_progress: bool,
}

impl Controller {
    // @method: Create a controller backed by ffmpeg
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let extractor = FfmpegExtractor::new(config.ffmpeg_path.clone());
        Self::with_extractor(config, Box::new(extractor))
    }

    // @method: Create a controller with a custom extractor
    pub fn with_extractor(config: Config, extractor: Box<dyn FrameExtractor>) -> Result<Self, AppError> {
        config.validate().map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            config,
            extractor,
            show_progress: false,
        })
    }

    /// Enable or disable the progress bar
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute the sample requests for a video without capturing anything
    pub fn plan<P: AsRef<Path>>(&self, video_path: P) -> Result<Vec<SampleRequest>, AppError> {
        let source = FileManager::locate_subtitles(video_path)?;
        self.schedule(&source)
    }

    fn schedule(&self, source: &SubtitleSource) -> Result<Vec<SampleRequest>, AppError> {
        let content = FileManager::read_to_string(&source.timing_path)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;

        let scheduler = CueScheduler::with_offset(
            source.format,
            self.config.offset_for(source.format),
            self.config.timecode_parser(),
        );
        Ok(scheduler.schedule(&content)?)
    }

    /// Run the main workflow for one video file.
    ///
    /// Stops at the first failed capture; frames written before it are kept.
    pub fn run<P: AsRef<Path>>(&self, video_path: P) -> Result<RunSummary, AppError> {
        let start_time = std::time::Instant::now();
        let video_path = video_path.as_ref();

        if !FileManager::file_exists(video_path) {
            return Err(AppError::File(format!("Input file does not exist: {:?}", video_path)));
        }

        let source = FileManager::locate_subtitles(video_path)?;
        info!(
            "Using {} timings from {:?} (burn-in: {:?})",
            source.format, source.timing_path, source.burn_in_path
        );

        let requests = self.schedule(&source)?;
        if requests.is_empty() {
            warn!("No cues found in {:?}", source.timing_path);
        }

        let output_dir = FileManager::output_dir_for(video_path);
        FileManager::ensure_dir(&output_dir)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        let video_stem = FileManager::video_stem(video_path);

        let progress_bar = self.create_progress_bar(requests.len() as u64);

        for request in &requests {
            progress_bar.set_message(request.timestamp.clone());

            let frame = FrameRequest {
                seek_seconds: request.instant,
                video_path: video_path.to_path_buf(),
                subtitle_path: source.burn_in_path.clone(),
                output_path: FileManager::generate_frame_path(
                    &output_dir,
                    &video_stem,
                    &request.timestamp,
                    &self.config.image_extension,
                ),
            };

            let result = progress_bar.suspend(|| self.extractor.extract_frame(&frame));
            if let Err(e) = result {
                progress_bar.abandon();
                return Err(e.into());
            }
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        info!(
            "Wrote {} frame(s) to {:?} in {}",
            requests.len(),
            output_dir,
            Self::format_duration(start_time.elapsed())
        );

        Ok(RunSummary {
            frames_written: requests.len(),
            output_dir,
        })
    }

    fn create_progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
