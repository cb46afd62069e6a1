//! JSON output adapter.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use clap::ValueEnum;
use plant_scan_core::{QualityReport, ResultOutput};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Writes quality reports as JSON.
///
/// JSON Lines are streamed as each report arrives. A JSON array is held
/// back until `flush`, which closes the batch.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    format: OutputFormat,
    pretty: bool,
    pending: Mutex<Vec<QualityReport>>,
}

impl JsonOutput {
    /// Creates an output writing to `writer`. `pretty` only affects arrays.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
            pretty,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Creates an output writing to stdout.
    #[must_use]
    pub fn stdout(format: OutputFormat, pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), format, pretty)
    }

    fn write_line(&self, json: &str) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, report: &QualityReport) -> Result<()> {
        match self.format {
            OutputFormat::Jsonl => self.write_line(&serde_json::to_string(report)?),
            OutputFormat::Json => {
                self.pending
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(report.clone());
                Ok(())
            }
        }
    }

    fn flush(&self) -> Result<()> {
        if self.format == OutputFormat::Json {
            let reports =
                std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner));
            let json = if self.pretty {
                serde_json::to_string_pretty(&reports)?
            } else {
                serde_json::to_string(&reports)?
            };
            self.write_line(&json)?;
        }
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use plant_scan_core::{ImageQuality, Issue, IssueType, Resolution};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn report(path: &str, issues: Vec<Issue>) -> QualityReport {
        QualityReport {
            path: path.into(),
            timestamp: "2024-05-01T08:00:00Z".into(),
            quality: ImageQuality::new(Resolution::new(800, 600), 120.0, 35.0, issues),
            exif: None,
        }
    }

    #[test]
    fn test_jsonl_streams_each_report() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), OutputFormat::Jsonl, true);

        output.write(&report("a.png", vec![])).unwrap();
        assert_eq!(buf.text().lines().count(), 1);
        output
            .write(&report("b.png", vec![Issue::new(IssueType::Blurry)]))
            .unwrap();
        output.flush().unwrap();

        let lines: Vec<serde_json::Value> = buf
            .text()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["is_acceptable"], true);
        assert_eq!(lines[1]["issues"][0]["type"], "blurry");
    }

    #[test]
    fn test_json_array_is_written_on_flush() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), OutputFormat::Json, false);

        output.write(&report("a.png", vec![])).unwrap();
        output.write(&report("b.png", vec![])).unwrap();
        assert!(buf.text().is_empty());

        output.flush().unwrap();
        let value: serde_json::Value = serde_json::from_str(&buf.text()).unwrap();
        let paths: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_empty_json_batch_is_empty_array() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()), OutputFormat::Json, false);
        output.flush().unwrap();
        assert_eq!(buf.text(), "[]\n");
    }
}
