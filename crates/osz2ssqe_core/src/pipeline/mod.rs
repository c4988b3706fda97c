//! The conversion pipeline and batch runner.
//!
//! One conversion is synchronous and single-threaded: blocking archive and
//! file I/O, run to completion or failure. Callers wanting cancellation
//! drive `convert_archive` one item at a time instead of using the batch
//! loop; nothing in here checks for it.

mod converter;
mod errors;
mod types;

pub use converter::Converter;
pub use errors::{ConvertError, ConvertResult};
pub use types::{BatchOutcome, ConvertedBundle, ProgressCallback};
