//! Data parsed out of a beatmap description.

/// Title and artist lines of a beatmap.
///
/// Both fields default to the empty string when the description does not
/// carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeatmapMetadata {
    pub title: String,
    pub artist: String,
}

impl BeatmapMetadata {
    /// Create metadata from raw values.
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Derive the bundle name: `{artist} - {title}` trimmed of surrounding
    /// whitespace.
    ///
    /// No further sanitization is applied; with both fields empty this is
    /// the literal `-`.
    pub fn bundle_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
            .trim()
            .to_string()
    }
}

/// One timing point: where the song's beat grid starts and how fast it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingPoint {
    /// Offset of the first beat from the start of the song, in milliseconds.
    pub offset_ms: i64,
    /// Beats per minute, rounded to a whole number.
    pub bpm: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_name_joins_artist_and_title() {
        let metadata = BeatmapMetadata::new("Freedom Dive", "xi");
        assert_eq!(metadata.bundle_name(), "xi - Freedom Dive");
    }

    #[test]
    fn bundle_name_trims_surrounding_whitespace() {
        let metadata = BeatmapMetadata::new("Title", "");
        assert_eq!(metadata.bundle_name(), "- Title");
    }

    #[test]
    fn bundle_name_of_empty_metadata_is_dash() {
        let metadata = BeatmapMetadata::default();
        assert_eq!(metadata.bundle_name(), "-");
    }
}
