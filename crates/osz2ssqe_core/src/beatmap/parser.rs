//! Field, section, and timing extraction from beatmap description text.
//!
//! None of the operations here return errors: a malformed field degrades to
//! its default value (logged at `warn`) and the conversion carries on.

use super::types::{BeatmapMetadata, TimingPoint};

/// Extract title and artist from the description text.
///
/// Scans every line. A line contributes a value when it starts with the
/// exact prefix `Title:` or `Artist:` at column zero (case-sensitive, no
/// leading whitespace); the value is everything after the first `:`,
/// trimmed. When a key occurs more than once, the last occurrence wins.
pub fn extract_metadata(text: &str) -> BeatmapMetadata {
    let mut metadata = BeatmapMetadata::default();

    for line in text.lines() {
        if let Some(value) = line.strip_prefix("Title:") {
            metadata.title = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("Artist:") {
            metadata.artist = value.trim().to_string();
        }
    }

    metadata
}

/// Extract the preview start time in milliseconds.
///
/// The first `PreviewTime:` line decides the result: its trimmed value
/// parsed as an integer, or 0 when the parse fails. Scanning stops at the
/// first match either way. No match yields 0.
pub fn extract_preview_time(text: &str) -> i64 {
    for line in text.lines() {
        if let Some(value) = line.strip_prefix("PreviewTime:") {
            return match value.trim().parse() {
                Ok(time) => time,
                Err(_) => {
                    tracing::warn!("Unparsable preview time '{}', using 0", value.trim());
                    0
                }
            };
        }
    }

    0
}

/// Extract the body lines of a named section.
///
/// The opener is the line whose trimmed form equals `[{name}]`. Body lines
/// are trimmed, blank lines dropped. Collection stops at the first following
/// line whose raw form starts with `[` and ends with `]`; an indented header
/// does not terminate the section and is collected as body text. A missing
/// section yields an empty vector.
pub fn extract_section(text: &str, name: &str) -> Vec<String> {
    let header = format!("[{}]", name);
    let mut lines = text.lines();

    if !lines.by_ref().any(|line| line.trim() == header) {
        return Vec::new();
    }

    let mut body = Vec::new();
    for line in lines {
        if line.starts_with('[') && line.ends_with(']') {
            break;
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            body.push(trimmed.to_string());
        }
    }

    body
}

/// Extract the first timing point from the `TimingPoints` section.
///
/// The first body line is split on `,` and needs at least two fields:
/// field 0 is the offset in milliseconds (float, floored to an integer),
/// field 1 the beat interval in milliseconds (float). BPM is
/// `60000 / interval` rounded to the nearest whole number, ties to even;
/// an interval of exactly 0 maps to BPM 0 instead of dividing. An empty
/// section, unparsable numbers, or a negative or non-finite interval all
/// yield `None`.
pub fn extract_first_timing(text: &str) -> Option<TimingPoint> {
    let section = extract_section(text, "TimingPoints");
    let line = section.first()?;

    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 2 {
        tracing::warn!("Malformed timing line '{}', no timing used", line);
        return None;
    }

    let offset: f64 = match parts[0].trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("Unparsable timing offset '{}', no timing used", parts[0]);
            return None;
        }
    };
    let interval: f64 = match parts[1].trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("Unparsable beat interval '{}', no timing used", parts[1]);
            return None;
        }
    };

    if !offset.is_finite() || !interval.is_finite() || interval < 0.0 {
        tracing::warn!("Unusable timing line '{}', no timing used", line);
        return None;
    }

    let bpm = if interval == 0.0 {
        0
    } else {
        (60_000.0 / interval).round_ties_even() as i64
    };

    Some(TimingPoint {
        offset_ms: offset.floor() as i64,
        bpm,
    })
}
