/*!
 * Tests for timecode parsing and timestamp formatting
 */

use subshot::errors::SubtitleError;
use subshot::timecode::{
    self, FractionScale, TimecodeParser, LEGACY_SENTINEL_SECONDS,
    format_output_timestamp, parse_ass_timecode, parse_output_timestamp,
    parse_srt_timecode, parse_timecode, sample_instant,
};

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
}

#[test]
fn test_parseSrtTimecode_withFullComponents_shouldSumExactly() {
    assert_eq!(parse_srt_timecode("01:02:03,500").unwrap(), 3723.5);
    assert_eq!(parse_srt_timecode("00:00:00,000").unwrap(), 0.0);
    assert_close(parse_srt_timecode("10:59:59,999").unwrap(), 39599.999);
}

#[test]
fn test_parseAssTimecode_withCentiseconds_shouldUseMillisecondDivisor() {
    assert_close(parse_ass_timecode("0:01:02.50", FractionScale::Millis).unwrap(), 62.05);
}

#[test]
fn test_parseAssTimecode_withDecimalScale_shouldReadDecimalFraction() {
    assert_close(parse_ass_timecode("0:01:02.50", FractionScale::Decimal).unwrap(), 62.5);
    assert_close(parse_ass_timecode("0:00:00.125", FractionScale::Decimal).unwrap(), 0.125);
}

#[test]
fn test_parseAssTimecode_withWideHours_shouldAcceptThem() {
    assert_close(parse_ass_timecode("100:00:00.00", FractionScale::Millis).unwrap(), 360000.0);
}

#[test]
fn test_parseTimecode_withEachLayout_shouldDispatch() {
    assert_eq!(parse_timecode("01:02:03,500").unwrap(), 3723.5);
    assert_close(parse_timecode("0:01:02.50").unwrap(), 62.05);
}

#[test]
fn test_parseTimecode_withUnknownLayout_shouldReturnError() {
    for input in ["", "garbage", "01:02:03", "1:2:3,4", "01-02-03,500", "0:01:02.", "a:01:02.50"] {
        match parse_timecode(input) {
            Err(SubtitleError::UnparseableTimecode(s)) => assert_eq!(s, input),
            other => panic!("expected unparseable timecode for {:?}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_timecodeParser_withLegacyFallback_shouldReturnSentinel() {
    let parser = TimecodeParser::new(FractionScale::Millis, true);
    assert_eq!(parser.parse("nonsense").unwrap(), LEGACY_SENTINEL_SECONDS);
    assert_eq!(parser.parse("00:00:05,000").unwrap(), 5.0);
}

#[test]
fn test_timecodeParser_withLegacyFallback_shouldDispatchOnPrefix() {
    let legacy = TimecodeParser::new(FractionScale::Millis, true);
    // 1s plus 2500 ms
    assert_close(legacy.parse("00:00:01,2500").unwrap(), 3.5);
    assert_close(legacy.parse("0:00:01.50trailing").unwrap(), LEGACY_SENTINEL_SECONDS);

    assert!(TimecodeParser::default().parse("00:00:01,2500").is_err());
}

#[test]
fn test_parseSrtTimecode_withOverflowingHours_shouldReturnError() {
    let input = "10000000000000000:00:00,000";
    match parse_srt_timecode(input) {
        Err(SubtitleError::UnparseableTimecode(s)) => assert_eq!(s, input),
        other => panic!("expected unparseable timecode, got {:?}", other),
    }
}

#[test]
fn test_parseTimecode_withNonAsciiDigits_shouldReturnError() {
    assert!(parse_timecode("٠٠:٠٠:١٠,٠٠٠").is_err());
    assert!(parse_timecode("０:00:01.00").is_err());
}

#[test]
fn test_timecodeParser_default_shouldNotFallBack() {
    let parser = TimecodeParser::default();
    assert!(!parser.legacy_fallback);
    assert_eq!(parser.fraction_scale, FractionScale::Millis);
    assert!(parser.parse("nonsense").is_err());
}

#[test]
fn test_sampleInstant_withOffset_shouldAddToMidpoint() {
    assert_eq!(sample_instant(10.0, 12.0, 0.0), 11.0);
    assert_eq!(sample_instant(20.0, 30.0, 0.0), 25.0);
    assert_close(sample_instant(1.0, 3.0, 0.4), 2.4);
}

/// start <= end is a caller precondition; swapped bounds still produce a value
#[test]
fn test_sampleInstant_withSwappedBounds_shouldNotPanic() {
    assert_eq!(sample_instant(12.0, 10.0, 0.0), 11.0);
}

#[test]
fn test_formatOutputTimestamp_withVariousInstants_shouldPadFields() {
    assert_eq!(format_output_timestamp(11.0), "0-00-11-000");
    assert_eq!(format_output_timestamp(25.0), "0-00-25-000");
    assert_eq!(format_output_timestamp(3723.5), "1-02-03-500");
    assert_eq!(format_output_timestamp(0.007), "0-00-00-007");
    assert_eq!(format_output_timestamp(36000.0), "10-00-00-000");
}

#[test]
fn test_formatOutputTimestamp_withInexactFloat_shouldRoundToMillisecond() {
    // 62.05 is not representable exactly; truncation would give 049
    assert_eq!(format_output_timestamp(62.05), "0-01-02-050");
    assert_eq!(format_output_timestamp(0.9996), "0-00-01-000");
}

#[test]
fn test_outputTimestamp_roundTrip_shouldBeStableOnCanonicalStrings() {
    for s in ["0-00-11-000", "0-01-02-050", "1-02-03-500", "12-59-59-999", "0-00-00-001"] {
        let seconds = parse_output_timestamp(s).unwrap();
        assert_eq!(timecode::format_output_timestamp(seconds), s);
    }
}

#[test]
fn test_parseOutputTimestamp_withInvalidStrings_shouldFail() {
    for s in ["", "0-0-11-000", "0-00-11-00", "0-60-00-000", "0-00-60-000", "00:00:11,000"] {
        assert!(
            matches!(parse_output_timestamp(s), Err(SubtitleError::InvalidOutputTimestamp(_))),
            "{:?} should be rejected", s
        );
    }
}
