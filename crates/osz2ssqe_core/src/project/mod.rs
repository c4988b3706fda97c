//! The project descriptor and its on-disk text representation.

mod descriptor;
mod ini;

pub use descriptor::ProjectDescriptor;
pub use ini::{encode_descriptor, sidecar_text};
