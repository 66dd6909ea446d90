//! Log records and the bounded-copy rules used to populate them

use super::severity::Severity;
use super::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Byte budget for the category field, one byte reserved for a terminator.
pub const CATEGORY_MAX: usize = 64;
/// Byte budget for the source file field.
pub const FILE_MAX: usize = 128;
/// Byte budget for the source function field.
pub const FUNCTION_MAX: usize = 64;
/// Byte budget for the message, trailing newline included.
pub const MESSAGE_MAX: usize = 2048;

/// One logging event.
///
/// Records live in the engine's fixed pool and are overwritten in place:
/// [`LogRecord::populate`] clears and refills the string buffers so a
/// recycled slot reuses its allocations instead of making new ones.
/// The message always ends with exactly one line terminator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub severity: Severity,
    pub category: String,
    pub file: String,
    pub function: String,
    pub line: u32,
    pub message: String,
    pub timestamp: Timestamp,
}

impl Default for LogRecord {
    fn default() -> Self {
        Self {
            severity: Severity::default(),
            category: String::new(),
            file: String::new(),
            function: String::new(),
            line: 0,
            message: String::new(),
            timestamp: Timestamp::default(),
        }
    }
}

impl LogRecord {
    /// Overwrite every field of this record.
    ///
    /// String fields are truncated to their byte budget without splitting
    /// a UTF-8 character; the message is newline-normalized.
    #[allow(clippy::too_many_arguments)]
    pub fn populate(
        &mut self,
        severity: Severity,
        category: &str,
        message: &str,
        file: &str,
        function: &str,
        line: u32,
        timestamp: Timestamp,
    ) {
        self.severity = severity;
        self.line = line;
        self.timestamp = timestamp;
        copy_bounded(&mut self.category, category, CATEGORY_MAX - 1);
        copy_bounded(&mut self.file, file, FILE_MAX - 1);
        copy_bounded(&mut self.function, function, FUNCTION_MAX - 1);
        copy_message(&mut self.message, message);
    }
}

/// Truncate to at most `max` bytes without splitting a UTF-8 character.
fn truncated(src: &str, max: usize) -> &str {
    if src.len() <= max {
        return src;
    }
    let mut end = max;
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    &src[..end]
}

pub(crate) fn copy_bounded(dst: &mut String, src: &str, max: usize) {
    dst.clear();
    dst.push_str(truncated(src, max));
}

/// Copy a message enforcing the newline contract: the stored message ends
/// with a line terminator, and a terminator already present survives
/// truncation.
pub(crate) fn copy_message(dst: &mut String, src: &str) {
    dst.clear();
    if src.ends_with('\n') && src.len() <= MESSAGE_MAX - 1 {
        dst.push_str(src);
    } else {
        let body = src.strip_suffix('\n').unwrap_or(src);
        dst.push_str(truncated(body, MESSAGE_MAX - 2));
        dst.push('\n');
    }
}
