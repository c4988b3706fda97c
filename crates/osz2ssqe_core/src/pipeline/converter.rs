//! The converter: one archive in, one project bundle out.
//!
//! `Converter` holds the two output roots and runs the fixed conversion
//! sequence. Batch conversion is a sequential loop over that sequence with
//! per-item failure isolation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::BeatmapArchive;
use crate::assets;
use crate::beatmap;
use crate::project::{self, ProjectDescriptor};

use super::errors::{ConvertError, ConvertResult};
use super::types::{BatchOutcome, ConvertedBundle, ProgressCallback};

/// Converts beatmap archives into project bundles.
///
/// Bundles land under `output_root`; the audio cache copy lands under
/// `{cache_root}/cached`. Both roots are explicit and owned by the caller;
/// the converter reads no ambient state.
pub struct Converter {
    output_root: PathBuf,
    cache_root: PathBuf,
}

impl Converter {
    /// Create a converter writing bundles under `output_root` and audio
    /// cache copies under `cache_root`.
    pub fn new(output_root: impl Into<PathBuf>, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            cache_root: cache_root.into(),
        }
    }

    /// Convert one archive to a project bundle.
    ///
    /// The sequence: open the archive, select the beatmap description (the
    /// last `.osu` entry in listing order), parse it, derive the bundle
    /// name, create the bundle directory, extract audio and image, then
    /// write the descriptor and sidecar. An unreadable archive or a missing
    /// beatmap entry fails before anything is written; a missing asset is
    /// skipped without error; parse degradations fall back to defaults.
    /// Re-converting into the same roots overwrites in place.
    pub fn convert_archive(&self, archive_path: &Path) -> ConvertResult<ConvertedBundle> {
        let mut archive = BeatmapArchive::open(archive_path)?;

        // Selection happens before anything touches the disk, so a map-less
        // archive leaves no output directory behind.
        let beatmap_entry = archive.find_beatmap_entry()?.to_string();
        let text = archive.read_text(&beatmap_entry)?;

        tracing::debug!(
            "Converting '{}' from {}",
            beatmap_entry,
            archive_path.display()
        );

        let metadata = beatmap::extract_metadata(&text);
        let preview_start_time = beatmap::extract_preview_time(&text);
        let timing = beatmap::extract_first_timing(&text);

        let bundle_name = metadata.bundle_name();
        let mut descriptor =
            ProjectDescriptor::from_beatmap(&metadata, preview_start_time, timing);

        let bundle_dir = self.output_root.join(&bundle_name);
        fs::create_dir_all(&bundle_dir).map_err(|e| {
            ConvertError::io_error(format!("creating {}", bundle_dir.display()), e)
        })?;

        let audio_entry = assets::find_audio_entry(archive.entry_names()).map(str::to_string);
        let audio_path = match audio_entry {
            Some(entry) => Some(assets::extract_audio(
                &mut archive,
                &entry,
                &bundle_dir,
                &bundle_name,
                &self.cache_root,
            )?),
            None => {
                tracing::warn!(
                    "No audio entry in {}, skipping audio",
                    archive_path.display()
                );
                None
            }
        };

        let image_entry = assets::find_image_entry(archive.entry_names()).map(str::to_string);
        let image_path = match image_entry {
            Some(entry) => {
                let written = assets::extract_image(&mut archive, &entry, &bundle_dir)?;
                descriptor.set_cover(&written);
                Some(written)
            }
            None => {
                tracing::debug!(
                    "No image entry in {}, cover stays empty",
                    archive_path.display()
                );
                None
            }
        };

        let descriptor_path = bundle_dir.join(format!("{}.ini", bundle_name));
        let descriptor_text = project::encode_descriptor(&descriptor)?;
        fs::write(&descriptor_path, descriptor_text).map_err(|e| {
            ConvertError::io_error(format!("writing {}", descriptor_path.display()), e)
        })?;

        let sidecar_path = bundle_dir.join(format!("{}.txt", bundle_name));
        fs::write(&sidecar_path, project::sidecar_text(&metadata)).map_err(|e| {
            ConvertError::io_error(format!("writing {}", sidecar_path.display()), e)
        })?;

        tracing::info!(
            "Converted {} to {}",
            archive_path.display(),
            bundle_dir.display()
        );

        Ok(ConvertedBundle {
            bundle_name,
            bundle_dir,
            descriptor_path,
            audio_path,
            image_path,
            sidecar_path,
        })
    }

    /// Convert a batch of archives sequentially.
    ///
    /// A failed item is recorded in its outcome and the loop continues
    /// with the next; the outcome vector always has one element per input,
    /// in input order. `progress` fires after every item, success or
    /// failure.
    pub fn convert_batch(
        &self,
        archives: &[PathBuf],
        progress: Option<ProgressCallback>,
    ) -> Vec<BatchOutcome> {
        let total = archives.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, archive_path) in archives.iter().enumerate() {
            tracing::info!(
                "Converting archive {}/{}: {}",
                index + 1,
                total,
                archive_path.display()
            );

            let result = self.convert_archive(archive_path);
            if let Err(e) = &result {
                tracing::warn!("Conversion of {} failed: {}", archive_path.display(), e);
            }

            outcomes.push(BatchOutcome {
                archive: archive_path.clone(),
                result,
            });

            if let Some(callback) = &progress {
                callback(index + 1, total, archive_path);
            }
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        if failed > 0 {
            tracing::warn!("Batch finished: {}/{} archives failed", failed, total);
        } else {
            tracing::info!("Batch finished: {} archives converted", total);
        }

        outcomes
    }
}
