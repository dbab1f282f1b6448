use super::ManifestFormatter;
use crate::core::Manifest;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Plain `requirements.txt`: one `name[<op><version>]` per line, sorted,
/// every line terminated. Comments are never written.
pub struct RequirementsFormatter;

impl RequirementsFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RequirementsFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestFormatter for RequirementsFormatter {
    fn render(&self, manifest: &Manifest) -> String {
        let lines = manifest.lines();
        let mut output = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
        for line in lines {
            output.push_str(&line);
            output.push_str(LINE_ENDING);
        }
        output
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}
