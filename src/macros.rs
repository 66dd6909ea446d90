//! Logging macros capturing the call site.
//!
//! These macros forward to the process-wide engine with automatic
//! `format!`-style message formatting and `file!()` / `line!()` /
//! `module_path!()` capture.
//!
//! # Examples
//!
//! ```
//! use log_relay::core::severity::Severity;
//! use log_relay::{global, relay_info, relay_warning};
//!
//! global::init(Severity::Info, 0, false);
//!
//! relay_info!("core.net", "listening on port {}", 8080);
//! relay_warning!("core.net", "connection dropped");
//!
//! global::destroy();
//! ```

/// Emit a record at an explicit severity.
#[macro_export]
macro_rules! relay_log {
    ($severity:expr, $category:expr, $($arg:tt)+) => {
        $crate::global::emit(
            $severity,
            $category,
            &format!($($arg)+),
            file!(),
            module_path!(),
            line!(),
        )
    };
}

/// Emit a fatal record.
#[macro_export]
macro_rules! relay_fatal {
    ($category:expr, $($arg:tt)+) => {
        $crate::relay_log!($crate::core::severity::Severity::Fatal, $category, $($arg)+)
    };
}

/// Emit an error record.
#[macro_export]
macro_rules! relay_error {
    ($category:expr, $($arg:tt)+) => {
        $crate::relay_log!($crate::core::severity::Severity::Error, $category, $($arg)+)
    };
}

/// Emit a warning record.
#[macro_export]
macro_rules! relay_warning {
    ($category:expr, $($arg:tt)+) => {
        $crate::relay_log!($crate::core::severity::Severity::Warning, $category, $($arg)+)
    };
}

/// Emit an info record.
#[macro_export]
macro_rules! relay_info {
    ($category:expr, $($arg:tt)+) => {
        $crate::relay_log!($crate::core::severity::Severity::Info, $category, $($arg)+)
    };
}

/// Emit a verbose record.
#[macro_export]
macro_rules! relay_verbose {
    ($category:expr, $($arg:tt)+) => {
        $crate::relay_log!($crate::core::severity::Severity::Verbose, $category, $($arg)+)
    };
}

/// Emit a debug record.
#[macro_export]
macro_rules! relay_debug {
    ($category:expr, $($arg:tt)+) => {
        $crate::relay_log!($crate::core::severity::Severity::Debug, $category, $($arg)+)
    };
}
