//! Console sink

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::record::LogRecord;
use crate::core::render;
use crate::core::severity::Severity;
use crate::core::sink::Sink;
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;

/// Reference text sink writing rendered lines to stderr.
///
/// Renders with the engine-wide context selector and filters against the
/// engine-wide threshold unless a per-sink override is set.
pub struct ConsoleSink {
    config: Arc<EngineConfig>,
    threshold: Option<Severity>,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            config,
            threshold: None,
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Override the shared threshold for this sink only.
    #[must_use]
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = Some(threshold);
        self
    }

    fn effective_threshold(&self) -> Severity {
        self.threshold.unwrap_or_else(|| self.config.verbosity())
    }
}

impl Sink for ConsoleSink {
    fn consume(&mut self, record: &LogRecord) -> Result<()> {
        if record.severity > self.effective_threshold() {
            return Ok(());
        }

        let line = render::render_line(record, self.config.context());
        let mut stderr = std::io::stderr().lock();
        if self.use_colors {
            let tag = record.severity.tag();
            let colored_tag = tag.color(record.severity.color_code());
            write!(stderr, "{}{}", colored_tag, &line[tag.len()..])?;
        } else {
            write!(stderr, "{}", line)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr().lock().flush()?;
        Ok(())
    }
}
