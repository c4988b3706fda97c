//! Beatmap archive access.
//!
//! A beatmap archive (`.osz`) is a plain zip container. This module wraps
//! read access to one archive: the entry listing in central-directory order,
//! lossy text reads, and raw byte reads.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

/// Errors that can occur while reading a beatmap archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The container could not be opened or read as a zip file.
    #[error("Failed to open archive {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    /// A named entry could not be located in the container.
    #[error("Failed to read entry '{name}': {source}")]
    Entry {
        name: String,
        #[source]
        source: ZipError,
    },

    /// A named entry exists but its contents could not be read.
    #[error("I/O error reading entry '{name}': {source}")]
    EntryIo {
        name: String,
        #[source]
        source: io::Error,
    },

    /// The container holds no beatmap description entry.
    #[error("No beatmap description (.osu) found in {}", .path.display())]
    NoBeatmap { path: PathBuf },
}

impl ArchiveError {
    /// Create an open error for an archive path.
    pub fn open(path: impl Into<PathBuf>, source: ZipError) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Create an entry lookup error.
    pub fn entry(name: impl Into<String>, source: ZipError) -> Self {
        Self::Entry {
            name: name.into(),
            source,
        }
    }

    /// Create an entry read error.
    pub fn entry_io(name: impl Into<String>, source: io::Error) -> Self {
        Self::EntryIo {
            name: name.into(),
            source,
        }
    }
}

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Open read handle over one beatmap archive.
///
/// The entry listing is captured once at open time, in the order the
/// container's central directory lists the entries. No sorting or
/// normalization is applied to entry names.
#[derive(Debug)]
pub struct BeatmapArchive {
    path: PathBuf,
    zip: ZipArchive<File>,
    entry_names: Vec<String>,
}

impl BeatmapArchive {
    /// Open an archive file and capture its entry listing.
    pub fn open(path: impl AsRef<Path>) -> ArchiveResult<Self> {
        let path = path.as_ref();

        let file =
            File::open(path).map_err(|e| ArchiveError::open(path, ZipError::Io(e)))?;
        let mut zip = ZipArchive::new(file).map_err(|e| ArchiveError::open(path, e))?;

        let mut entry_names = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let entry = zip
                .by_index(index)
                .map_err(|e| ArchiveError::open(path, e))?;
            entry_names.push(entry.name().to_string());
        }

        tracing::debug!(
            "Opened archive {} with {} entries",
            path.display(),
            entry_names.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            zip,
            entry_names,
        })
    }

    /// Path the archive was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full names of all entries, in central-directory order.
    pub fn entry_names(&self) -> &[String] {
        &self.entry_names
    }

    /// Find the beatmap description entry to convert.
    ///
    /// The last entry in listing order whose name ends case-insensitively in
    /// `.osu` wins; archives carrying multiple difficulties convert the last
    /// one listed.
    pub fn find_beatmap_entry(&self) -> ArchiveResult<&str> {
        self.entry_names
            .iter()
            .rev()
            .find(|name| name.to_lowercase().ends_with(".osu"))
            .map(String::as_str)
            .ok_or_else(|| ArchiveError::NoBeatmap {
                path: self.path.clone(),
            })
    }

    /// Read an entry's raw bytes.
    pub fn read_bytes(&mut self, name: &str) -> ArchiveResult<Vec<u8>> {
        let mut entry = self
            .zip
            .by_name(name)
            .map_err(|e| ArchiveError::entry(name, e))?;

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| ArchiveError::entry_io(name, e))?;

        Ok(bytes)
    }

    /// Read an entry as text.
    ///
    /// Decoding is lossy: invalid UTF-8 sequences become replacement
    /// characters, never an error.
    pub fn read_text(&mut self, name: &str) -> ArchiveResult<String> {
        let bytes = self.read_bytes(name)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
