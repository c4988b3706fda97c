//! Result types and callbacks for the pipeline.

use std::path::{Path, PathBuf};

use super::errors::ConvertError;

/// What one successful conversion produced.
#[derive(Debug, Clone)]
pub struct ConvertedBundle {
    /// `{artist} - {title}` after trimming; names the directory and files.
    pub bundle_name: String,
    /// Directory all bundle files were written into.
    pub bundle_dir: PathBuf,
    /// The `.ini` descriptor file.
    pub descriptor_path: PathBuf,
    /// Extracted audio, `None` when the archive had no audio entry.
    pub audio_path: Option<PathBuf>,
    /// Extracted cover image, `None` when the archive had no image entry.
    pub image_path: Option<PathBuf>,
    /// The `.txt` sidecar file.
    pub sidecar_path: PathBuf,
}

/// Outcome of one batch item. Failures are carried here instead of
/// aborting the batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Archive this item converted.
    pub archive: PathBuf,
    /// The item's conversion result.
    pub result: Result<ConvertedBundle, ConvertError>,
}

impl BatchOutcome {
    /// Whether the item converted successfully.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Callback fired after each batch item completes, success or failure:
/// (items done, total items, archive just finished).
pub type ProgressCallback = Box<dyn Fn(usize, usize, &Path) + Send + Sync>;
