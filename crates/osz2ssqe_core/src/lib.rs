//! osz2ssqe Core - conversion logic for beatmap archives
//!
//! This crate contains all conversion logic with zero terminal dependencies.
//! It can be used by the CLI front-end or embedded in another tool.

pub mod archive;
pub mod assets;
pub mod beatmap;
pub mod config;
pub mod pipeline;
pub mod project;

/// Version of the core library, taken from the crate metadata.
///
/// The CLI reports this as its own version so the two never drift.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!version().is_empty());
    }
}
