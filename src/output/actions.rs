//! GitHub Actions output rendering
//!
//! Writes workflow commands to a stream and step outputs to the file named
//! by `GITHUB_OUTPUT`. Without an output file, outputs are printed as
//! `key=value` lines instead.

use crate::error::OutputError;
use crate::output::{is_multiline, OutputSink};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Sink for a GitHub Actions step
pub struct ActionsOutput<W: Write> {
    /// Log stream (stdout in the binary)
    writer: W,
    /// Step output file
    output_file: Option<PathBuf>,
}

impl<W: Write> ActionsOutput<W> {
    /// Create a new sink
    pub fn new(writer: W, output_file: Option<PathBuf>) -> Self {
        Self {
            writer,
            output_file,
        }
    }

    /// Consume the sink and return the log stream
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, key: &str, line: &str) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", line).map_err(|e| OutputError::write(key, e))
    }
}

/// Escape data for a workflow command (`%`, CR and LF)
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

impl<W: Write> OutputSink for ActionsOutput<W> {
    fn info(&mut self, message: &str) -> Result<(), OutputError> {
        self.write_line("info", message)
    }

    fn start_group(&mut self, title: &str) -> Result<(), OutputError> {
        self.write_line("group", &format!("::group::{}", escape_data(title)))
    }

    fn end_group(&mut self) -> Result<(), OutputError> {
        self.write_line("group", "::endgroup::")
    }

    fn set_output(&mut self, key: &str, value: &str) -> Result<(), OutputError> {
        self.set_outputs(&[(key, value)])
    }

    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<(), OutputError> {
        if let Some((key, _)) = outputs.iter().find(|(_, value)| is_multiline(value)) {
            return Err(OutputError::MultilineValue {
                key: key.to_string(),
            });
        }

        let Some(path) = self.output_file.clone() else {
            for (key, value) in outputs {
                self.write_line(key, &format!("{}={}", key, value))?;
            }
            return Ok(());
        };

        let first_key = outputs.first().map(|(key, _)| *key).unwrap_or_default();
        let content: String = outputs
            .iter()
            .map(|(key, value)| format!("{}={}\n", key, value))
            .collect();

        // All lines in a single write
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| OutputError::write(first_key, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| OutputError::write(first_key, e))
    }

    fn set_failed(&mut self, message: &str) -> Result<(), OutputError> {
        self.write_line("error", &format!("::error::{}", escape_data(message)))
    }
}
