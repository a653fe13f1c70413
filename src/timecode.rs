/*!
 * Timecode parsing and formatting.
 *
 * Converts subtitle timecodes into seconds and sample instants back into
 * the hyphenated `H-MM-SS-mmm` form used in output file names.
 *
 * Two input layouts are recognized:
 * - SRT: `HH:MM:SS,mmm`
 * - ASS: `H:MM:SS.cc` (hours of any width)
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;

// @const: SRT timecode regex
static SRT_TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}$").unwrap()
});

// @const: ASS timecode regex
static ASS_TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+:[0-9]+:[0-9]+\.[0-9]+$").unwrap()
});

// @const: Legacy SRT dispatch, shape checked at the start only
static SRT_TIMECODE_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}").unwrap()
});

// @const: Legacy ASS dispatch, shape checked at the start only
static ASS_TIMECODE_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+:[0-9]+:[0-9]+\.[0-9]+").unwrap()
});

// @const: Output timestamp regex
static OUTPUT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)-([0-9]{2})-([0-9]{2})-([0-9]{3})$").unwrap()
});

/// Value substituted for an unparseable timecode in legacy mode
pub const LEGACY_SENTINEL_SECONDS: f64 = 1.0;

/// How the fractional part of an ASS timecode is scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionScale {
    /// Fraction digits are divided by 1000 (`.50` is 50 ms)
    #[default]
    Millis,
    /// Fraction digits are read as a decimal fraction (`.50` is 500 ms)
    Decimal,
}

/// Parse an SRT timecode (`HH:MM:SS,mmm`) into seconds
pub fn parse_srt_timecode(timecode: &str) -> Result<f64, SubtitleError> {
    let parts = split_components(timecode, &[':', ','])?;
    let invalid = || SubtitleError::UnparseableTimecode(timecode.to_string());

    let mut values = [0u64; 4];
    for (value, part) in values.iter_mut().zip(parts.iter()) {
        *value = part.parse().map_err(|_| invalid())?;
    }
    let [hours, minutes, seconds, millis] = values;

    let whole_seconds = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(invalid)?;

    Ok(whole_seconds as f64 + millis as f64 / 1000.0)
}

/// Parse an ASS timecode (`H:MM:SS.cc`) into seconds
pub fn parse_ass_timecode(timecode: &str, scale: FractionScale) -> Result<f64, SubtitleError> {
    let parts = split_components(timecode, &[':', '.'])?;
    let invalid = || SubtitleError::UnparseableTimecode(timecode.to_string());

    let hours: f64 = parts[0].parse().map_err(|_| invalid())?;
    let minutes: f64 = parts[1].parse().map_err(|_| invalid())?;
    let seconds: f64 = parts[2].parse().map_err(|_| invalid())?;
    let fraction: f64 = parts[3].parse().map_err(|_| invalid())?;

    let fraction = match scale {
        FractionScale::Millis => fraction / 1000.0,
        FractionScale::Decimal => fraction / 10f64.powi(parts[3].len() as i32),
    };

    Ok(hours * 3600.0 + minutes * 60.0 + seconds + fraction)
}

/// Parse a timecode in either layout, picking the parser by its shape
pub fn parse_timecode(timecode: &str) -> Result<f64, SubtitleError> {
    TimecodeParser::default().parse(timecode)
}

fn split_components<'a>(timecode: &'a str, separators: &[char]) -> Result<Vec<&'a str>, SubtitleError> {
    let parts: Vec<&str> = timecode.split(separators).collect();
    if parts.len() != 4 {
        return Err(SubtitleError::UnparseableTimecode(timecode.to_string()));
    }
    Ok(parts)
}

/// Timecode parser configured for one run
#[derive(Debug, Clone, Copy, Default)]
pub struct TimecodeParser {
    /// Scaling of ASS fraction digits
    pub fraction_scale: FractionScale,

    /// Substitute `LEGACY_SENTINEL_SECONDS` instead of failing on bad input
    pub legacy_fallback: bool,
}

impl TimecodeParser {
    pub fn new(fraction_scale: FractionScale, legacy_fallback: bool) -> Self {
        Self { fraction_scale, legacy_fallback }
    }

    /// Convert a timecode into seconds.
    ///
    /// Legacy mode only checks the start of the string when picking a layout,
    /// so `00:00:01,2500` is read as SRT with 2500 ms.
    pub fn parse(&self, timecode: &str) -> Result<f64, SubtitleError> {
        let (srt_shape, ass_shape) = if self.legacy_fallback {
            (&*SRT_TIMECODE_PREFIX_REGEX, &*ASS_TIMECODE_PREFIX_REGEX)
        } else {
            (&*SRT_TIMECODE_REGEX, &*ASS_TIMECODE_REGEX)
        };

        let result = if srt_shape.is_match(timecode) {
            parse_srt_timecode(timecode)
        } else if ass_shape.is_match(timecode) {
            parse_ass_timecode(timecode, self.fraction_scale)
        } else {
            Err(SubtitleError::UnparseableTimecode(timecode.to_string()))
        };

        match result {
            Err(e) if self.legacy_fallback => {
                warn!("{}, using {}s instead", e, LEGACY_SENTINEL_SECONDS);
                Ok(LEGACY_SENTINEL_SECONDS)
            }
            other => other,
        }
    }
}

/// Instant to sample a cue at: its midpoint shifted by `offset`.
///
/// Callers pass `start <= end`; swapped bounds are not rejected.
pub fn sample_instant(start: f64, end: f64, offset: f64) -> f64 {
    (start + end) / 2.0 + offset
}

/// Format seconds as `H-MM-SS-mmm`, rounded to the nearest millisecond
pub fn format_output_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{}-{:02}-{:02}-{:03}", hours, minutes, secs, millis)
}

/// Parse an `H-MM-SS-mmm` string back into seconds
pub fn parse_output_timestamp(timestamp: &str) -> Result<f64, SubtitleError> {
    let invalid = || SubtitleError::InvalidOutputTimestamp(timestamp.to_string());
    let caps = OUTPUT_TIMESTAMP_REGEX.captures(timestamp).ok_or_else(invalid)?;

    let field = |i: usize| -> Result<u64, SubtitleError> {
        caps[i].parse().map_err(|_| invalid())
    };
    let (hours, minutes, secs, millis) = (field(1)?, field(2)?, field(3)?, field(4)?);

    if minutes >= 60 || secs >= 60 {
        return Err(invalid());
    }

    let total_ms = hours * 3_600_000 + minutes * 60_000 + secs * 1_000 + millis;
    Ok(total_ms as f64 / 1000.0)
}
