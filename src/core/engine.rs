//! Engine assembly: configuration, record pool, delivery queue, sink
//! registry and the background dispatcher.

use super::config::EngineConfig;
use super::metrics::EngineMetrics;
use super::pool::{RecordPool, DEFAULT_POOL_CAPACITY};
use super::queue::{DeliveryQueue, Signal};
use super::registry::SinkRegistry;
use super::severity::Severity;
use super::sink::Sink;
use super::timestamp::Timestamp;
use crossbeam_channel::{bounded, Sender};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Upper bound on waiting for the dispatcher's final drain during
/// shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Dispatcher lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Stopped = 0,
    Running = 1,
    Draining = 2,
}

impl DispatcherState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => DispatcherState::Running,
            2 => DispatcherState::Draining,
            _ => DispatcherState::Stopped,
        }
    }
}

/// The delivery pipeline.
///
/// Producers emit from any thread; records land in the fixed pool and are
/// delivered to every registered sink either by the background dispatcher
/// (asynchronous mode) or inline on the emitting thread (synchronous
/// mode). Construction starts the dispatcher; [`LogEngine::shutdown`]
/// drains everything still queued and stops it. After shutdown, and once
/// the engine is dropped, `emit` is a silent no-op.
pub struct LogEngine {
    config: Arc<EngineConfig>,
    pool: Arc<RecordPool>,
    registry: Arc<SinkRegistry>,
    metrics: Arc<EngineMetrics>,
    sender: RwLock<Option<Sender<Signal>>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    state: Arc<AtomicU8>,
    stopped: AtomicBool,
}

impl LogEngine {
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    fn start(config: Arc<EngineConfig>, pool_capacity: usize) -> Self {
        let pool = Arc::new(RecordPool::new(pool_capacity));
        let registry = Arc::new(SinkRegistry::new());
        let metrics = Arc::new(EngineMetrics::new());
        let state = Arc::new(AtomicU8::new(DispatcherState::Stopped as u8));

        let (sender, worker) = if config.synchronous() {
            (None, None)
        } else {
            let (sender, queue) = DeliveryQueue::channel();
            state.store(DispatcherState::Running as u8, Ordering::SeqCst);
            let handle = Self::spawn_dispatcher(
                queue,
                Arc::clone(&pool),
                Arc::clone(&registry),
                Arc::clone(&metrics),
                Arc::clone(&state),
            );
            (Some(sender), Some(handle))
        };

        Self {
            config,
            pool,
            registry,
            metrics,
            sender: RwLock::new(sender),
            worker: Mutex::new(worker),
            state,
            stopped: AtomicBool::new(false),
        }
    }

    fn spawn_dispatcher(
        queue: DeliveryQueue,
        pool: Arc<RecordPool>,
        registry: Arc<SinkRegistry>,
        metrics: Arc<EngineMetrics>,
        state: Arc<AtomicU8>,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            // Block for the next signal, then drain the backlog without
            // blocking. `wait` keeps yielding queued signals after the
            // sender side is gone, so a stop request drains until empty.
            while let Some(signal) = queue.wait() {
                Self::handle_signal(signal, &pool, &registry, &metrics);
                while let Some(signal) = queue.try_next() {
                    Self::handle_signal(signal, &pool, &registry, &metrics);
                }
            }

            registry.flush_all();
            state.store(DispatcherState::Stopped as u8, Ordering::SeqCst);
        })
    }

    fn handle_signal(
        signal: Signal,
        pool: &RecordPool,
        registry: &SinkRegistry,
        metrics: &EngineMetrics,
    ) {
        match signal {
            Signal::Record(index) => {
                let snapshot = pool.snapshot(index);
                let failures = registry.dispatch(&snapshot);
                metrics.record_delivered();
                metrics.record_sink_failures(failures as u64);
            }
            Signal::Flush(ack) => {
                // Everything enqueued before this signal has already been
                // delivered: the queue is FIFO.
                registry.flush_all();
                let _ = ack.send(());
            }
        }
    }

    /// Emit one record.
    ///
    /// Never blocks on sink IO in asynchronous mode and never filters:
    /// severity thresholds are applied by sinks at render time. A no-op
    /// once the engine has been shut down.
    pub fn emit(
        &self,
        severity: Severity,
        category: &str,
        message: &str,
        file: &str,
        function: &str,
        line: u32,
    ) {
        if self.config.synchronous() {
            self.emit_sync(severity, category, message, file, function, line);
            return;
        }

        let guard = self.sender.read();
        let Some(sender) = guard.as_ref() else {
            return;
        };

        let index = self.pool.acquire();
        self.pool.slot(index).lock().populate(
            severity,
            category,
            message,
            file,
            function,
            line,
            Timestamp::now(),
        );

        if sender.send(Signal::Record(index)).is_ok() {
            self.metrics.record_emitted();
        }
    }

    fn emit_sync(
        &self,
        severity: Severity,
        category: &str,
        message: &str,
        file: &str,
        function: &str,
        line: u32,
    ) {
        if self.stopped.load(Ordering::Acquire) {
            return;
        }

        let index = self.pool.acquire();
        let snapshot = {
            let mut slot = self.pool.slot(index).lock();
            slot.populate(
                severity,
                category,
                message,
                file,
                function,
                line,
                Timestamp::now(),
            );
            slot.clone()
        };

        // Same exclusion lock as register/unregister: registry mutation
        // cannot race an inline delivery.
        let failures = self.registry.dispatch(&snapshot);
        self.metrics.record_emitted();
        self.metrics.record_delivered();
        self.metrics.record_sink_failures(failures as u64);
    }

    /// Deliver everything enqueued so far, then return.
    ///
    /// Must not be called from inside a sink: the calling thread waits for
    /// the dispatcher, and the dispatcher would be waiting on the sink.
    pub fn flush(&self) {
        if self.config.synchronous() {
            self.registry.flush_all();
            return;
        }

        let ack = {
            let guard = self.sender.read();
            let Some(sender) = guard.as_ref() else {
                return;
            };
            let (ack_tx, ack_rx) = bounded(1);
            if sender.send(Signal::Flush(ack_tx)).is_err() {
                return;
            }
            ack_rx
        };

        self.metrics.record_flush();
        let _ = ack.recv();
    }

    /// Stop accepting records, drain everything queued, stop the
    /// dispatcher and flush the sinks. Idempotent.
    pub fn shutdown(&self) {
        self.stopped.store(true, Ordering::Release);

        let sender = self.sender.write().take();
        if sender.is_some() {
            self.state
                .store(DispatcherState::Draining as u8, Ordering::SeqCst);
        }
        // Disconnects the queue: the dispatcher drains the backlog until
        // empty, flushes the sinks and exits.
        drop(sender);

        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            let start = std::time::Instant::now();
            loop {
                if handle.is_finished() {
                    if handle.join().is_err() {
                        eprintln!("[ENGINE ERROR] dispatcher thread panicked during shutdown");
                    }
                    break;
                }
                if start.elapsed() >= DEFAULT_SHUTDOWN_TIMEOUT {
                    eprintln!(
                        "[ENGINE WARNING] dispatcher did not finish within {:?}; records may be lost",
                        DEFAULT_SHUTDOWN_TIMEOUT
                    );
                    break;
                }
                thread::sleep(Duration::from_millis(10));
            }
        } else if self.config.synchronous() {
            self.registry.flush_all();
        }
    }

    /// Insert or replace a sink under `name`.
    pub fn register_sink(&self, name: impl Into<String>, sink: Box<dyn Sink>) {
        self.registry.register(name, sink);
    }

    /// Remove the sink under `name`, if present. Once this returns, the
    /// sink is dropped and will never be invoked again.
    pub fn unregister_sink(&self, name: &str) {
        self.registry.unregister(name);
    }

    pub fn sink_count(&self) -> usize {
        self.registry.len()
    }

    pub fn verbosity(&self) -> Severity {
        self.config.verbosity()
    }

    pub fn set_verbosity(&self, verbosity: Severity) {
        self.config.set_verbosity(verbosity);
    }

    pub fn context(&self) -> i32 {
        self.config.context()
    }

    pub fn set_context(&self, context: i32) {
        self.config.set_context(context);
    }

    pub fn is_synchronous(&self) -> bool {
        self.config.synchronous()
    }

    pub fn pool_capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Current dispatcher state. A synchronous engine has no dispatcher
    /// and always reports `Stopped`.
    pub fn dispatcher_state(&self) -> DispatcherState {
        DispatcherState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared configuration handle for sinks that render with the
    /// engine-wide threshold and context selector.
    pub fn config_handle(&self) -> Arc<EngineConfig> {
        Arc::clone(&self.config)
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }
}

impl Drop for LogEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Builder for constructing a [`LogEngine`].
///
/// # Example
/// ```
/// use log_relay::core::engine::LogEngine;
/// use log_relay::core::severity::Severity;
///
/// let engine = LogEngine::builder()
///     .verbosity(Severity::Debug)
///     .context(4)
///     .synchronous(false)
///     .build();
/// engine.emit(Severity::Info, "core.boot", "up\n", file!(), module_path!(), line!());
/// engine.flush();
/// ```
pub struct EngineBuilder {
    verbosity: Severity,
    context: i32,
    synchronous: bool,
    pool_capacity: usize,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            verbosity: Severity::Info,
            context: 0,
            synchronous: false,
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }

    /// Set the severity threshold consulted by sinks.
    #[must_use = "builder methods return a new value"]
    pub fn verbosity(mut self, verbosity: Severity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the context selector (0-7) for the reference text sinks.
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: i32) -> Self {
        self.context = context;
        self
    }

    /// Choose synchronous delivery: sinks run inline on the emitting
    /// thread and no dispatcher is started.
    #[must_use = "builder methods return a new value"]
    pub fn synchronous(mut self, synchronous: bool) -> Self {
        self.synchronous = synchronous;
        self
    }

    /// Override the record pool capacity.
    #[must_use = "builder methods return a new value"]
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    pub fn build(self) -> LogEngine {
        let config = Arc::new(EngineConfig::new(
            self.verbosity,
            self.context,
            self.synchronous,
        ));
        LogEngine::start(config, self.pool_capacity)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::core::record::LogRecord;

    struct CaptureSink {
        records: Arc<Mutex<Vec<LogRecord>>>,
    }

    impl CaptureSink {
        fn pair() -> (Self, Arc<Mutex<Vec<LogRecord>>>) {
            let records = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    records: Arc::clone(&records),
                },
                records,
            )
        }
    }

    impl Sink for CaptureSink {
        fn consume(&mut self, record: &LogRecord) -> Result<()> {
            self.records.lock().push(record.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_builder_defaults() {
        let engine = LogEngine::builder().build();
        assert_eq!(engine.pool_capacity(), DEFAULT_POOL_CAPACITY);
        assert!(!engine.is_synchronous());
        assert_eq!(engine.dispatcher_state(), DispatcherState::Running);
    }

    #[test]
    fn test_async_emit_reaches_sink_after_flush() {
        let engine = LogEngine::builder().build();
        let (sink, records) = CaptureSink::pair();
        engine.register_sink("capture", Box::new(sink));

        engine.emit(Severity::Info, "core.test", "hello\n", "f.rs", "f", 1);
        engine.flush();

        let records = records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "core.test");
        assert_eq!(records[0].message, "hello\n");
    }

    #[test]
    fn test_sync_emit_delivers_before_return() {
        let engine = LogEngine::builder().synchronous(true).build();
        let (sink, records) = CaptureSink::pair();
        engine.register_sink("capture", Box::new(sink));

        engine.emit(Severity::Warning, "sync", "inline", "f.rs", "f", 2);
        assert_eq!(records.lock().len(), 1);
        assert_eq!(records.lock()[0].message, "inline\n");
    }

    #[test]
    fn test_emit_is_never_filtered_at_the_queue() {
        // Threshold Silent would filter everything at render time, but the
        // capture sink applies no threshold: the record must arrive.
        let engine = LogEngine::builder().verbosity(Severity::Silent).build();
        let (sink, records) = CaptureSink::pair();
        engine.register_sink("capture", Box::new(sink));

        engine.emit(Severity::Debug, "deep", "still queued\n", "f.rs", "f", 3);
        engine.flush();
        assert_eq!(records.lock().len(), 1);
    }

    #[test]
    fn test_shutdown_drains_backlog() {
        let engine = LogEngine::builder().build();
        let (sink, records) = CaptureSink::pair();
        engine.register_sink("capture", Box::new(sink));

        for i in 0..50 {
            engine.emit(Severity::Info, "drain", &format!("m{}", i), "f.rs", "f", i);
        }
        engine.shutdown();

        assert_eq!(records.lock().len(), 50);
        assert_eq!(engine.dispatcher_state(), DispatcherState::Stopped);
    }

    #[test]
    fn test_emit_after_shutdown_is_noop() {
        let engine = LogEngine::builder().build();
        let (sink, records) = CaptureSink::pair();
        engine.register_sink("capture", Box::new(sink));

        engine.emit(Severity::Info, "pre", "one\n", "f.rs", "f", 1);
        engine.shutdown();
        engine.emit(Severity::Info, "post", "two\n", "f.rs", "f", 2);
        engine.flush();

        assert_eq!(records.lock().len(), 1);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let engine = LogEngine::builder().synchronous(true).build();
        engine.shutdown();
        engine.shutdown();
        assert_eq!(engine.dispatcher_state(), DispatcherState::Stopped);
    }

    #[test]
    fn test_unregistered_sink_is_not_invoked_again() {
        let engine = LogEngine::builder().synchronous(true).build();
        let (sink, records) = CaptureSink::pair();
        engine.register_sink("capture", Box::new(sink));

        engine.emit(Severity::Info, "a", "first\n", "f.rs", "f", 1);
        engine.unregister_sink("capture");
        engine.emit(Severity::Info, "a", "second\n", "f.rs", "f", 2);

        assert_eq!(records.lock().len(), 1);
        assert_eq!(engine.sink_count(), 0);
    }

    #[test]
    fn test_metrics_track_delivery() {
        let engine = LogEngine::builder().synchronous(true).build();
        let (sink, _records) = CaptureSink::pair();
        engine.register_sink("capture", Box::new(sink));

        engine.emit(Severity::Info, "m", "x", "f.rs", "f", 1);
        engine.emit(Severity::Info, "m", "y", "f.rs", "f", 2);

        assert_eq!(engine.metrics().emitted_count(), 2);
        assert_eq!(engine.metrics().delivered_count(), 2);
        assert_eq!(engine.metrics().sink_failure_count(), 0);
    }
}
