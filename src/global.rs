//! Process-wide engine handle.
//!
//! The explicit [`LogEngine`](crate::core::engine::LogEngine) object
//! carries the pipeline; this module keeps the single process-wide
//! instance behind a handle so that logging stays a safe no-op before
//! `init` and after `destroy`, from any code path including teardown.

use crate::core::engine::LogEngine;
use crate::core::severity::Severity;
use crate::core::sink::Sink;
#[cfg(feature = "console")]
use crate::sinks::ConsoleSink;
use parking_lot::RwLock;
use std::sync::Arc;

static ENGINE: RwLock<Option<Arc<LogEngine>>> = RwLock::new(None);

/// Name the default console sink is registered under at `init`.
pub const CONSOLE_SINK_NAME: &str = "console";

fn current() -> Option<Arc<LogEngine>> {
    ENGINE.read().clone()
}

/// Install a fresh engine, tearing down and replacing any existing one.
///
/// Registers the default console sink under [`CONSOLE_SINK_NAME`]. The
/// `VERBOSE` and `CONTEXT` environment variables override the supplied
/// threshold and context selector.
pub fn init(verbosity: Severity, context: i32, synchronous: bool) {
    destroy();

    let engine = Arc::new(
        LogEngine::builder()
            .verbosity(verbosity)
            .context(context)
            .synchronous(synchronous)
            .build(),
    );
    #[cfg(feature = "console")]
    engine.register_sink(
        CONSOLE_SINK_NAME,
        Box::new(ConsoleSink::new(engine.config_handle())),
    );

    *ENGINE.write() = Some(engine);
}

/// Flush pending records, stop the dispatcher and release every sink.
/// Safe to call when not initialized; idempotent.
pub fn destroy() {
    let engine = ENGINE.write().take();
    if let Some(engine) = engine {
        engine.shutdown();
    }
}

/// Deliver everything enqueued so far. No-op when uninitialized.
pub fn flush() {
    if let Some(engine) = current() {
        engine.flush();
    }
}

/// Emit one record through the process-wide engine. No-op when
/// uninitialized or destroyed; otherwise always enqueued or dispatched
/// regardless of severity.
pub fn emit(
    severity: Severity,
    category: &str,
    message: &str,
    file: &str,
    function: &str,
    line: u32,
) {
    if let Some(engine) = current() {
        engine.emit(severity, category, message, file, function, line);
    }
}

/// Insert or replace a sink. No-op when uninitialized.
pub fn register_sink(name: impl Into<String>, sink: Box<dyn Sink>) {
    if let Some(engine) = current() {
        engine.register_sink(name, sink);
    }
}

/// Remove a sink by name. No-op when uninitialized or when absent.
pub fn unregister_sink(name: &str) {
    if let Some(engine) = current() {
        engine.unregister_sink(name);
    }
}

/// Change the severity threshold; the `VERBOSE` environment variable wins
/// when set. No-op when uninitialized.
pub fn set_verbosity(verbosity: Severity) {
    if let Some(engine) = current() {
        engine.set_verbosity(verbosity);
    }
}

/// Current threshold, or the default when uninitialized.
pub fn verbosity() -> Severity {
    current().map_or(Severity::Info, |engine| engine.verbosity())
}

/// Change the context selector; the `CONTEXT` environment variable wins
/// when set. No-op when uninitialized.
pub fn set_context(context: i32) {
    if let Some(engine) = current() {
        engine.set_context(context);
    }
}

/// Current context selector, or 0 when uninitialized.
pub fn context() -> i32 {
    current().map_or(0, |engine| engine.context())
}

/// Whether a process-wide engine is installed.
pub fn is_initialized() -> bool {
    ENGINE.read().is_some()
}
