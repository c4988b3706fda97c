//! Beatmap description parsing.
//!
//! The beatmap description is an INI-like text format with `[Section]`
//! headers and `Key:value` lines. Only the handful of fields the project
//! descriptor needs are extracted; everything here is best-effort and
//! degrades to defaults on malformed input.

mod parser;
mod types;

pub use parser::{
    extract_first_timing, extract_metadata, extract_preview_time, extract_section,
};
pub use types::{BeatmapMetadata, TimingPoint};
