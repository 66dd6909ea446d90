//! Core engine types

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod pool;
pub(crate) mod queue;
pub mod record;
pub mod registry;
pub mod render;
pub mod severity;
pub mod sink;
pub mod timestamp;

pub use config::EngineConfig;
pub use engine::{DispatcherState, EngineBuilder, LogEngine, DEFAULT_SHUTDOWN_TIMEOUT};
pub use error::{EngineError, Result};
pub use metrics::EngineMetrics;
pub use pool::{RecordPool, DEFAULT_POOL_CAPACITY};
pub use record::{LogRecord, CATEGORY_MAX, FILE_MAX, FUNCTION_MAX, MESSAGE_MAX};
pub use registry::SinkRegistry;
pub use severity::Severity;
pub use sink::Sink;
pub use timestamp::Timestamp;
