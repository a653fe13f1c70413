use std::fmt;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::timecode::{self, TimecodeParser};

// @module: Subtitle cue splitting and sample scheduling

// @const: SRT cue block regex
static SRT_CUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^[0-9]+\r?\n([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}) --> ([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})\r?\n(.+)").unwrap()
});

// @const: ASS dialogue line regex
static ASS_DIALOGUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Dialogue:\s*[0-9]+,\s*([0-9]+:[0-9]+:[0-9]+\.[0-9]+),\s*([0-9]+:[0-9]+:[0-9]+\.[0-9]+),(.+)").unwrap()
});

// @const: Blank line separating SRT blocks
static SRT_BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r?\n\r?\n").unwrap()
});

/// Subtitle layout driving a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip: blank-line separated blocks, comma milliseconds
    Srt,
    /// Advanced SubStation Alpha: one `Dialogue:` line per cue
    Ass,
}

impl SubtitleFormat {
    /// File extension for this format, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Ass => "ass",
        }
    }

    /// Midpoint correction applied when no offset is configured
    pub fn default_offset(&self) -> f64 {
        match self {
            Self::Srt => 0.0,
            Self::Ass => 0.4,
        }
    }

    /// Split a document into candidate cue records
    pub fn split_records<'a>(&self, content: &'a str) -> Vec<&'a str> {
        let content = content.trim_start_matches('\u{feff}').trim();
        if content.is_empty() {
            return Vec::new();
        }

        match self {
            Self::Srt => SRT_BLOCK_SEPARATOR.split(content).collect(),
            Self::Ass => content.split('\n').collect(),
        }
    }

    /// Extract start and end timecodes plus text from one record
    fn match_record<'a>(&self, record: &'a str) -> Option<(&'a str, &'a str, &'a str)> {
        let regex = match self {
            Self::Srt => &SRT_CUE_REGEX,
            Self::Ass => &ASS_DIALOGUE_REGEX,
        };
        let caps = regex.captures(record)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3)?.as_str()))
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Srt => write!(f, "SRT"),
            Self::Ass => write!(f, "ASS"),
        }
    }
}

// @struct: Single timed subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Position among well-formed cues, starting at 1
    pub index: usize,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Cue text
    pub text: String,
}

/// One frame to capture
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRequest {
    /// Cue the frame belongs to
    pub cue: Cue,

    /// Seek position in seconds
    pub instant: f64,

    /// `H-MM-SS-mmm` form of `instant`
    pub timestamp: String,
}

impl fmt::Display for SampleRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{} {:.3}s ({})", self.cue.index, self.instant, self.timestamp)
    }
}

/// Turns subtitle documents into ordered sample requests
#[derive(Debug, Clone)]
pub struct CueScheduler {
    format: SubtitleFormat,
    offset: f64,
    parser: TimecodeParser,
}

impl CueScheduler {
    /// Create a scheduler using the format's default offset
    pub fn new(format: SubtitleFormat) -> Self {
        Self::with_offset(format, format.default_offset(), TimecodeParser::default())
    }

    pub fn with_offset(format: SubtitleFormat, offset: f64, parser: TimecodeParser) -> Self {
        Self { format, offset, parser }
    }

    pub fn format(&self) -> SubtitleFormat {
        self.format
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Parse the cues of a document, skipping records that don't match
    pub fn parse_cues(&self, content: &str) -> Result<Vec<Cue>, SubtitleError> {
        let mut cues = Vec::new();

        for (record_num, record) in self.format.split_records(content).into_iter().enumerate() {
            let Some((start, end, text)) = self.format.match_record(record) else {
                trace!("Skipping {} record {}: no cue", self.format, record_num + 1);
                continue;
            };

            let cue = Cue {
                index: cues.len() + 1,
                start: self.parser.parse(start)?,
                end: self.parser.parse(end)?,
                text: text.trim_end().to_string(),
            };

            if cue.end < cue.start {
                debug!("Cue {} ends before it starts ({} > {})", cue.index, start, end);
            }
            cues.push(cue);
        }

        Ok(cues)
    }

    /// Compute one sample request per well-formed cue, in document order
    pub fn schedule(&self, content: &str) -> Result<Vec<SampleRequest>, SubtitleError> {
        let requests: Vec<SampleRequest> = self
            .parse_cues(content)?
            .into_iter()
            .map(|cue| self.request_for(cue))
            .collect();

        debug!(
            "Scheduled {} frame(s) from {} subtitles with offset {}s",
            requests.len(), self.format, self.offset
        );
        Ok(requests)
    }

    fn request_for(&self, cue: Cue) -> SampleRequest {
        let instant = timecode::sample_instant(cue.start, cue.end, self.offset);
        SampleRequest {
            timestamp: timecode::format_output_timestamp(instant),
            instant,
            cue,
        }
    }
}
