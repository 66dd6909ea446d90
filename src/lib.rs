//! # Log Relay
//!
//! A low-overhead, thread-safe in-process logging engine: producers emit
//! severity-tagged, categorized records from any thread; the engine
//! buffers them in a fixed pool and delivers them to named, pluggable
//! sinks without blocking producers.
//!
//! ## Features
//!
//! - **Bounded Memory**: records live in a fixed-capacity pool of
//!   recycled slots, so the engine never grows under load
//! - **Two Delivery Modes**: a background dispatcher (asynchronous) or
//!   inline delivery on the emitting thread (synchronous)
//! - **Deterministic Ordering**: global FIFO delivery, sinks invoked in
//!   name order
//! - **Pluggable Sinks**: console, file, and custom sinks filtered by a
//!   shared or per-sink severity threshold

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        DispatcherState, EngineBuilder, EngineConfig, EngineError, EngineMetrics, LogEngine,
        LogRecord, RecordPool, Result, Severity, Sink, SinkRegistry, Timestamp,
        DEFAULT_POOL_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
}

pub use crate::core::{
    DispatcherState, EngineBuilder, EngineConfig, EngineError, EngineMetrics, LogEngine,
    LogRecord, RecordPool, Result, Severity, Sink, SinkRegistry, Timestamp,
    DEFAULT_POOL_CAPACITY, DEFAULT_SHUTDOWN_TIMEOUT,
};
#[cfg(feature = "console")]
pub use crate::sinks::ConsoleSink;
#[cfg(feature = "file")]
pub use crate::sinks::FileSink;
