//! File sink

use crate::core::config::EngineConfig;
use crate::core::engine::LogEngine;
use crate::core::error::Result;
use crate::core::record::LogRecord;
use crate::core::render;
use crate::core::severity::Severity;
use crate::core::sink::Sink;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Category the sink reports its own failures under.
const SELF_CATEGORY: &str = "log.sink.file";

/// Reference text sink writing rendered lines to a file.
///
/// Construction creates missing parent directories and opens the path
/// for write, truncating existing content. An open failure is reported
/// once as a warning through the engine; the sink then stays inert and
/// silently discards records for the rest of its life; it never errors
/// into the emission path.
pub struct FileSink {
    config: Arc<EngineConfig>,
    threshold: Option<Severity>,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, engine: &LogEngine) -> Self {
        let path = path.into();
        let writer = match Self::open(&path) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(err) => {
                engine.emit(
                    Severity::Warning,
                    SELF_CATEGORY,
                    &format!("cannot open {}: {}", path.display(), err),
                    file!(),
                    module_path!(),
                    line!(),
                );
                None
            }
        };

        Self {
            config: engine.config_handle(),
            threshold: None,
            writer,
        }
    }

    fn open(path: &Path) -> std::io::Result<File> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        File::create(path)
    }

    /// Override the shared threshold for this sink only.
    #[must_use]
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Whether the sink failed to open its file and discards everything.
    pub fn is_inert(&self) -> bool {
        self.writer.is_none()
    }

    fn effective_threshold(&self) -> Severity {
        self.threshold.unwrap_or_else(|| self.config.verbosity())
    }
}

impl Sink for FileSink {
    fn consume(&mut self, record: &LogRecord) -> Result<()> {
        let threshold = self.effective_threshold();
        let context = self.config.context();
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        if record.severity > threshold {
            return Ok(());
        }

        let line = render::render_line(record, context);
        writer.write_all(line.as_bytes())?;
        // One flush per line, so a crash loses at most the current record.
        writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
