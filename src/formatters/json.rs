use super::requirements::LINE_ENDING;
use super::ManifestFormatter;
use crate::core::Manifest;

/// JSON object keyed by package name; unconstrained packages map to `null`.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestFormatter for JsonFormatter {
    fn render(&self, manifest: &Manifest) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(manifest)
        } else {
            serde_json::to_string(manifest)
        };
        // Maps of strings cannot fail to serialize.
        let mut output = rendered.unwrap_or_else(|_| "{}".to_string());
        output.push_str(LINE_ENDING);
        output
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
