//! Text encoding of the descriptor and the sidecar file.
//!
//! The editor's project file carries an `.ini` extension but holds
//! JSON-shaped text. Encoding is pretty-printed JSON followed by one
//! fix-up: every run of four consecutive backslashes collapses to two.
//! The `cover` value is stored with doubled backslashes, which the JSON
//! encoder escapes to four per original separator; the collapse restores
//! the doubled form in the written text.

use crate::beatmap::BeatmapMetadata;

use super::descriptor::ProjectDescriptor;

/// Encode a descriptor to the exact text written to `<bundle>.ini`.
pub fn encode_descriptor(descriptor: &ProjectDescriptor) -> Result<String, serde_json::Error> {
    let encoded = serde_json::to_string_pretty(descriptor)?;
    Ok(encoded.replace(r"\\\\", r"\\"))
}

/// Contents of the `<bundle>.txt` sidecar: `{artist} - {title},` verbatim,
/// untrimmed even when the bundle name was trimmed.
pub fn sidecar_text(metadata: &BeatmapMetadata) -> String {
    format!("{} - {},", metadata.artist, metadata.title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_descriptor_encodes_every_field_in_order() {
        let text = encode_descriptor(&ProjectDescriptor::default()).unwrap();
        let expected = r#"{
  "timings": [],
  "bookmarks": [],
  "vfxObjects": [],
  "specialObjects": [],
  "noteData": [],
  "currentTime": 0,
  "beatDivisor": 1,
  "exportOffset": 0,
  "mappers": "",
  "songName": "",
  "difficulty": "",
  "useCover": true,
  "cover": "",
  "customDifficulty": "",
  "songOffset": 0,
  "songTitle": "",
  "songArtist": "",
  "mapCreator": "",
  "mapCreatorPersonalLink": "",
  "previewStartTime": 0,
  "previewDuration": 20,
  "novaCover": "",
  "novaIcon": "",
  "rating": 0,
  "useVideo": false,
  "video": ""
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn doubled_cover_separators_collapse_to_a_valid_escape() {
        let mut descriptor = ProjectDescriptor::default();
        descriptor.set_cover(std::path::Path::new("C:\\out\\bg.jpg"));

        let text = encode_descriptor(&descriptor).unwrap();
        // Two backslash characters per separator in the written text.
        assert!(text.contains(r#""cover": "C:\\out\\bg.jpg""#));

        // The written text decodes to the real path, one separator each.
        let parsed: ProjectDescriptor = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.cover, "C:\\out\\bg.jpg");
    }

    #[test]
    fn encoding_without_backslashes_is_untouched() {
        let mut descriptor = ProjectDescriptor::default();
        descriptor.set_cover(std::path::Path::new("/out/bundle/bg.jpg"));

        let text = encode_descriptor(&descriptor).unwrap();
        assert!(text.contains(r#""cover": "/out/bundle/bg.jpg""#));
    }

    #[test]
    fn timing_pair_is_bpm_then_start() {
        let descriptor = ProjectDescriptor {
            timings: vec![[120, 1000]],
            ..ProjectDescriptor::default()
        };
        let text = encode_descriptor(&descriptor).unwrap();
        assert!(text.contains("120,\n      1000"));
    }

    #[test]
    fn sidecar_is_untrimmed_with_trailing_comma() {
        let metadata = BeatmapMetadata::new("Song", "Artist");
        assert_eq!(sidecar_text(&metadata), "Artist - Song,");

        let empty = BeatmapMetadata::default();
        assert_eq!(sidecar_text(&empty), " - ,");
    }
}
