//! Severity levels and their text/numeric/keyword mappings.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ordered logging severity.
///
/// Discriminants run from the most urgent (`Silent` = 0) to the least
/// urgent (`Debug` = 6). A text sink renders a record iff
/// `record.severity <= effective_threshold` — numerically, a smaller value
/// is more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Silent = 0,
    Fatal = 1,
    Error = 2,
    Warning = 3,
    Info = 4,
    Verbose = 5,
    Debug = 6,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

impl Severity {
    /// Fixed bracketed tag, exactly six characters wide.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Silent => "[SILENT]",
            Severity::Fatal => "[FATAL]",
            Severity::Error => "[ERROR]",
            Severity::Warning => "[WARN ]",
            Severity::Info => "[INFO ]",
            Severity::Verbose => "[VERB ]",
            Severity::Debug => "[DEBUG]",
        }
    }

    /// Map a numeric level to a severity, saturating out-of-range values:
    /// `< 0` → `Silent`, `> 6` → `Debug`, otherwise the exact level.
    pub fn from_level(level: i32) -> Self {
        match level {
            i if i < 0 => Severity::Silent,
            0 => Severity::Silent,
            1 => Severity::Fatal,
            2 => Severity::Error,
            3 => Severity::Warning,
            4 => Severity::Info,
            5 => Severity::Verbose,
            6 => Severity::Debug,
            _ => Severity::Debug,
        }
    }

    /// Terminal color used for the severity tag when the `console` feature
    /// renders with color.
    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color;
        match self {
            Severity::Silent => Color::BrightBlack,
            Severity::Fatal => Color::Magenta,
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
            Severity::Info => Color::Green,
            Severity::Verbose => Color::Cyan,
            Severity::Debug => Color::Blue,
        }
    }
}

impl FromStr for Severity {
    type Err = std::convert::Infallible;

    /// Keyword mapping from the original `stringToLogLevel`; any
    /// unrecognized keyword falls back to `Info`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let severity = match s.trim().to_ascii_lowercase().as_str() {
            "silent" => Severity::Silent,
            "fatal" => Severity::Fatal,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            "info" => Severity::Info,
            "verbose" => Severity::Verbose,
            "debug" => Severity::Debug,
            _ => Severity::Info,
        };
        Ok(severity)
    }
}
