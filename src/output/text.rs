//! Human-readable text report.
//!
//! Every line carries the same timestamp and `INFO` prefix as the log, so a
//! run reads as one stream:
//!
//! ```text
//! Mon Oct 19 2026 14:02:11 INFO  duplicate found [af1349b9...] (2):
//! Mon Oct 19 2026 14:02:11 INFO  /photos/a.jpg
//! Mon Oct 19 2026 14:02:11 INFO  /photos/copy/a.jpg
//! Mon Oct 19 2026 14:02:11 INFO  found 1 duplicate(s)
//! ```

use std::io::{self, Write};

use crate::duplicates::{ScanOutcome, ScanResult};
use crate::logging;

/// Text rendering of a completed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOutput {
    lines: Vec<String>,
}

impl TextOutput {
    /// Build the report lines for `result`.
    #[must_use]
    pub fn new(result: &ScanResult) -> Self {
        let mut lines = Vec::new();
        match result.outcome {
            ScanOutcome::NoFiles => lines.push("no files found".to_string()),
            ScanOutcome::NoDuplicates => lines.push("no duplicates found".to_string()),
            ScanOutcome::Duplicates(count) => {
                for group in &result.report.groups {
                    lines.push(format!(
                        "duplicate found [{}] ({}):",
                        group.digest_hex(),
                        group.len()
                    ));
                    lines.extend(group.files.iter().map(|f| f.display().to_string()));
                }
                lines.push(format!("found {count} duplicate(s)"));
            }
        }
        Self { lines }
    }

    /// Report lines without the timestamp prefix.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write every line with a timestamp and `INFO` prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let ts = logging::timestamp();
        for line in &self.lines {
            writeln!(writer, "{ts} INFO  {line}")?;
        }
        writer.flush()
    }
}
