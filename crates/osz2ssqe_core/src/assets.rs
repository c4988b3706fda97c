//! Asset selection and extraction.
//!
//! Audio and cover image are picked from the archive listing by file
//! extension and copied out byte-for-byte. Nothing here decodes or
//! validates the asset contents.

use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::BeatmapArchive;
use crate::pipeline::ConvertError;

/// Audio extensions recognized for extraction, matched case-insensitively.
const AUDIO_EXTENSIONS: [&str; 2] = [".ogg", ".mp3"];

/// Image extensions recognized for the cover, matched case-insensitively.
const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".png", ".jpeg", ".bmp"];

/// First entry in listing order with a recognized audio extension.
pub fn find_audio_entry(names: &[String]) -> Option<&str> {
    find_by_extension(names, &AUDIO_EXTENSIONS)
}

/// First entry in listing order with a recognized image extension.
pub fn find_image_entry(names: &[String]) -> Option<&str> {
    find_by_extension(names, &IMAGE_EXTENSIONS)
}

fn find_by_extension<'a>(names: &'a [String], extensions: &[&str]) -> Option<&'a str> {
    names.iter().map(String::as_str).find(|name| {
        let lower = name.to_lowercase();
        extensions.iter().any(|ext| lower.ends_with(ext))
    })
}

/// Extract the audio entry to the bundle and to the cache.
///
/// The bundle copy is `{bundle_dir}/{bundle_name}{ext}` with the entry's
/// extension kept verbatim (original casing, leading dot included). The
/// cache copy is `{cache_root}/cached/{bundle_name}.asset`, with the
/// `cached` directory created on demand. Both writes must succeed; partial
/// writes are not rolled back. Returns the bundle-side path.
pub fn extract_audio(
    archive: &mut BeatmapArchive,
    entry: &str,
    bundle_dir: &Path,
    bundle_name: &str,
    cache_root: &Path,
) -> Result<PathBuf, ConvertError> {
    let bytes = archive.read_bytes(entry)?;

    let audio_path = bundle_dir.join(format!("{}{}", bundle_name, extension_of(entry)));
    fs::write(&audio_path, &bytes)
        .map_err(|e| ConvertError::io_error(format!("writing {}", audio_path.display()), e))?;

    let cache_dir = cache_root.join("cached");
    fs::create_dir_all(&cache_dir)
        .map_err(|e| ConvertError::io_error(format!("creating {}", cache_dir.display()), e))?;

    let asset_path = cache_dir.join(format!("{}.asset", bundle_name));
    fs::write(&asset_path, &bytes)
        .map_err(|e| ConvertError::io_error(format!("writing {}", asset_path.display()), e))?;

    tracing::info!(
        "Extracted audio '{}' to {} and {}",
        entry,
        audio_path.display(),
        asset_path.display()
    );

    Ok(audio_path)
}

/// Extract the image entry to the bundle under its own base name.
pub fn extract_image(
    archive: &mut BeatmapArchive,
    entry: &str,
    bundle_dir: &Path,
) -> Result<PathBuf, ConvertError> {
    let bytes = archive.read_bytes(entry)?;

    let image_path = bundle_dir.join(basename_of(entry));
    fs::write(&image_path, &bytes)
        .map_err(|e| ConvertError::io_error(format!("writing {}", image_path.display()), e))?;

    tracing::info!("Extracted image '{}' to {}", entry, image_path.display());

    Ok(image_path)
}

/// Entry name after the last `/`. Zip entries always separate with
/// forward slashes.
fn basename_of(name: &str) -> &str {
    match name.rsplit_once('/') {
        Some((_, base)) => base,
        None => name,
    }
}

/// Extension of the entry's base name, leading dot included, original
/// casing preserved. A base name that is nothing but an extension (a
/// dotfile) has none.
fn extension_of(name: &str) -> &str {
    let basename = basename_of(name);
    match basename.rfind('.') {
        Some(index) if index > 0 => &basename[index..],
        _ => "",
    }
}
