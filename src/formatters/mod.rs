pub mod json;
pub mod requirements;

pub use json::JsonFormatter;
pub use requirements::RequirementsFormatter;

use crate::core::Manifest;

/// Renders a reconciled manifest into the text written to disk.
pub trait ManifestFormatter {
    fn render(&self, manifest: &Manifest) -> String;

    /// Conventional file extension for this format, without the dot.
    fn extension(&self) -> &'static str;
}
