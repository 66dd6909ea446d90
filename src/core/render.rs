//! Text rendering contract shared by the reference sinks

use super::record::LogRecord;

/// Width of the fixed category column.
pub const CATEGORY_COLUMN: usize = 16;

/// Render the fixed-width category column.
///
/// Short categories are right-padded with spaces. Categories of 16
/// characters or more keep their most specific suffix: three filler dots
/// followed by the last 13 characters.
pub fn cut_category(category: &str) -> String {
    let chars: Vec<char> = category.chars().collect();
    if chars.len() < CATEGORY_COLUMN {
        let mut out = String::with_capacity(CATEGORY_COLUMN);
        out.push_str(category);
        for _ in chars.len()..CATEGORY_COLUMN {
            out.push(' ');
        }
        out
    } else {
        let keep = CATEGORY_COLUMN - 3;
        let tail: String = chars[chars.len() - keep..].iter().collect();
        format!("...{}", tail)
    }
}

/// Render the context fields selected by `context`, trailing separator
/// included. Selectors outside 1..=7 contribute nothing.
pub fn context_fields(record: &LogRecord, context: i32) -> String {
    let ts = &record.timestamp;
    match context {
        1 => format!("{}: ", cut_category(&record.category)),
        2 => format!("{} ", ts),
        3 => format!("{}({}) ", record.file, record.line),
        4 => format!("{} {}: ", ts, cut_category(&record.category)),
        5 => format!("{} {}({}) ", ts, record.file, record.line),
        6 => format!(
            "{}: {}({}) ",
            cut_category(&record.category),
            record.file,
            record.line
        ),
        7 => format!(
            "{} {}: {}({}) {} ",
            ts,
            cut_category(&record.category),
            record.file,
            record.line,
            record.function
        ),
        _ => String::new(),
    }
}

/// Render one full line: `<TAG> <context-fields><message>`.
///
/// The severity tag and message body appear regardless of context. The
/// message carries its own terminator; nothing is appended here.
pub fn render_line(record: &LogRecord, context: i32) -> String {
    format!(
        "{} {}{}",
        record.severity.tag(),
        context_fields(record, context),
        record.message
    )
}
