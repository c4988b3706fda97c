//! Project descriptor consumed by the downstream editor.
//!
//! The field set is fixed and all fields are always present in the output,
//! serialized in declaration order. A conversion only ever overwrites
//! `songName`, `songArtist`, `previewStartTime`, `timings`, and `cover`;
//! every other field keeps its default and is never inferred.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::beatmap::{BeatmapMetadata, TimingPoint};

/// The full project record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    /// `[bpm, startMs]` pairs; a conversion emits zero or one.
    pub timings: Vec<[i64; 2]>,
    pub bookmarks: Vec<serde_json::Value>,
    pub vfx_objects: Vec<serde_json::Value>,
    pub special_objects: Vec<serde_json::Value>,
    pub note_data: Vec<serde_json::Value>,
    pub current_time: i64,
    pub beat_divisor: i64,
    pub export_offset: i64,
    pub mappers: String,
    pub song_name: String,
    pub difficulty: String,
    pub use_cover: bool,
    /// Written cover path with every backslash doubled (the editor's own
    /// escaping convention); empty when the archive had no image.
    pub cover: String,
    pub custom_difficulty: String,
    pub song_offset: i64,
    pub song_title: String,
    pub song_artist: String,
    pub map_creator: String,
    pub map_creator_personal_link: String,
    pub preview_start_time: i64,
    pub preview_duration: i64,
    pub nova_cover: String,
    pub nova_icon: String,
    pub rating: i64,
    pub use_video: bool,
    pub video: String,
}

impl Default for ProjectDescriptor {
    fn default() -> Self {
        Self {
            timings: Vec::new(),
            bookmarks: Vec::new(),
            vfx_objects: Vec::new(),
            special_objects: Vec::new(),
            note_data: Vec::new(),
            current_time: 0,
            beat_divisor: 1,
            export_offset: 0,
            mappers: String::new(),
            song_name: String::new(),
            difficulty: String::new(),
            use_cover: true,
            cover: String::new(),
            custom_difficulty: String::new(),
            song_offset: 0,
            song_title: String::new(),
            song_artist: String::new(),
            map_creator: String::new(),
            map_creator_personal_link: String::new(),
            preview_start_time: 0,
            preview_duration: 20,
            nova_cover: String::new(),
            nova_icon: String::new(),
            rating: 0,
            use_video: false,
            video: String::new(),
        }
    }
}

impl ProjectDescriptor {
    /// Build a descriptor from the facts parsed out of a beatmap.
    ///
    /// `songName`/`songArtist` take the metadata (`songTitle` stays empty),
    /// `previewStartTime` the preview value, and `timings` the single
    /// `[bpm, startMs]` pair when a timing point was found.
    pub fn from_beatmap(
        metadata: &BeatmapMetadata,
        preview_start_time: i64,
        timing: Option<TimingPoint>,
    ) -> Self {
        let timings = match timing {
            Some(timing) => vec![[timing.bpm, timing.offset_ms]],
            None => Vec::new(),
        };

        Self {
            timings,
            song_name: metadata.title.clone(),
            song_artist: metadata.artist.clone(),
            preview_start_time,
            ..Self::default()
        }
    }

    /// Record the written cover image path.
    ///
    /// Backslashes are doubled per the editor's escaping convention; on
    /// forward-slash platforms the stored value is the path unchanged.
    pub fn set_cover(&mut self, written_path: &Path) {
        self.cover = written_path.to_string_lossy().replace('\\', "\\\\");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_touches_only_parsed_fields() {
        let metadata = BeatmapMetadata::new("Song", "Artist");
        let timing = TimingPoint {
            offset_ms: 1000,
            bpm: 120,
        };
        let descriptor = ProjectDescriptor::from_beatmap(&metadata, 4500, Some(timing));

        assert_eq!(descriptor.song_name, "Song");
        assert_eq!(descriptor.song_artist, "Artist");
        assert_eq!(descriptor.preview_start_time, 4500);
        assert_eq!(descriptor.timings, vec![[120, 1000]]);

        // Everything else must be the default.
        assert_eq!(descriptor.song_title, "");
        assert_eq!(descriptor.difficulty, "");
        assert_eq!(descriptor.beat_divisor, 1);
        assert_eq!(descriptor.preview_duration, 20);
        assert!(descriptor.use_cover);
        assert!(!descriptor.use_video);
    }

    #[test]
    fn missing_timing_leaves_timings_empty() {
        let descriptor =
            ProjectDescriptor::from_beatmap(&BeatmapMetadata::default(), 0, None);
        assert!(descriptor.timings.is_empty());
    }

    #[test]
    fn cover_doubles_backslashes() {
        let mut descriptor = ProjectDescriptor::default();
        descriptor.set_cover(Path::new("out\\bundle\\bg.jpg"));
        assert_eq!(descriptor.cover, "out\\\\bundle\\\\bg.jpg");
    }

    #[test]
    fn cover_keeps_forward_slash_paths_unchanged() {
        let mut descriptor = ProjectDescriptor::default();
        descriptor.set_cover(Path::new("/out/bundle/bg.jpg"));
        assert_eq!(descriptor.cover, "/out/bundle/bg.jpg");
    }
}
