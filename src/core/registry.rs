//! Named sink registry with deterministic dispatch order

use super::record::LogRecord;
use super::sink::Sink;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Mapping from sink name to sink, iterated in ascending name order.
///
/// `register`, `unregister` and `dispatch` are mutually exclusive: a sink
/// that has been removed is never invoked again, and a delivery pass sees
/// a stable sink set.
pub struct SinkRegistry {
    sinks: RwLock<BTreeMap<String, Box<dyn Sink>>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self {
            sinks: RwLock::new(BTreeMap::new()),
        }
    }

    /// Insert or replace the sink registered under `name`.
    pub fn register(&self, name: impl Into<String>, sink: Box<dyn Sink>) {
        self.sinks.write().insert(name.into(), sink);
    }

    /// Remove and drop the sink under `name`. Absent names are ignored.
    pub fn unregister(&self, name: &str) {
        self.sinks.write().remove(name);
    }

    pub fn len(&self) -> usize {
        self.sinks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.read().is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.sinks.read().keys().cloned().collect()
    }

    /// Deliver one record to every sink, in name order.
    ///
    /// Each invocation is isolated: a sink that errors or panics is
    /// reported on stderr and skipped, and the remaining sinks still run.
    /// Returns the number of failed invocations.
    pub fn dispatch(&self, record: &LogRecord) -> usize {
        let mut sinks = self.sinks.write();
        let mut failures = 0;

        for (name, sink) in sinks.iter_mut() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink.consume(record)
            }));

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[ENGINE ERROR] sink '{}' failed: {}", name, e);
                    failures += 1;
                }
                Err(panic) => {
                    let message = if let Some(s) = panic.downcast_ref::<&str>() {
                        (*s).to_string()
                    } else if let Some(s) = panic.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    eprintln!(
                        "[ENGINE CRITICAL] sink '{}' panicked: {}. Remaining sinks continue.",
                        name, message
                    );
                    failures += 1;
                }
            }
        }

        failures
    }

    /// Flush every sink's buffered output, with the same isolation as
    /// `dispatch`. Returns the number of failed flushes.
    pub fn flush_all(&self) -> usize {
        let mut sinks = self.sinks.write();
        let mut failures = 0;

        for (name, sink) in sinks.iter_mut() {
            let outcome =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.flush()));

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[ENGINE ERROR] sink '{}' flush failed: {}", name, e);
                    failures += 1;
                }
                Err(_) => {
                    eprintln!(
                        "[ENGINE CRITICAL] sink '{}' panicked during flush. Remaining sinks continue.",
                        name
                    );
                    failures += 1;
                }
            }
        }

        failures
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{EngineError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct OrderSink {
        tag: &'static str,
        order: Arc<parking_lot::Mutex<Vec<&'static str>>>,
    }

    impl Sink for OrderSink {
        fn consume(&mut self, _record: &LogRecord) -> Result<()> {
            self.order.lock().push(self.tag);
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
    }

    struct FailingSink;

    impl Sink for FailingSink {
        fn consume(&mut self, _record: &LogRecord) -> Result<()> {
            Err(EngineError::other("simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
    }

    struct PanickingSink;

    impl Sink for PanickingSink {
        fn consume(&mut self, _record: &LogRecord) -> Result<()> {
            panic!("sink blew up");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
    }

    struct CountingSink {
        invocations: Arc<AtomicUsize>,
    }

    impl Sink for CountingSink {
        fn consume(&mut self, _record: &LogRecord) -> Result<()> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_follows_name_order() {
        let registry = SinkRegistry::new();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        registry.register(
            "zeta",
            Box::new(OrderSink {
                tag: "zeta",
                order: Arc::clone(&order),
            }),
        );
        registry.register(
            "alpha",
            Box::new(OrderSink {
                tag: "alpha",
                order: Arc::clone(&order),
            }),
        );
        registry.register(
            "mid",
            Box::new(OrderSink {
                tag: "mid",
                order: Arc::clone(&order),
            }),
        );

        registry.dispatch(&LogRecord::default());
        assert_eq!(*order.lock(), vec!["alpha", "mid", "zeta"]);
        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let registry = SinkRegistry::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        registry.register(
            "out",
            Box::new(CountingSink {
                invocations: Arc::clone(&first),
            }),
        );
        registry.register(
            "out",
            Box::new(CountingSink {
                invocations: Arc::clone(&second),
            }),
        );

        registry.dispatch(&LogRecord::default());
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_absent_is_noop() {
        let registry = SinkRegistry::new();
        registry.unregister("never-registered");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failing_sink_does_not_stop_the_pass() {
        let registry = SinkRegistry::new();
        let invocations = Arc::new(AtomicUsize::new(0));

        // "bad" sorts before "tail": the failure happens first.
        registry.register("bad", Box::new(FailingSink));
        registry.register(
            "tail",
            Box::new(CountingSink {
                invocations: Arc::clone(&invocations),
            }),
        );

        let failures = registry.dispatch(&LogRecord::default());
        assert_eq!(failures, 1);
        assert_eq!(invocations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_sink_is_isolated() {
        let registry = SinkRegistry::new();
        let invocations = Arc::new(AtomicUsize::new(0));

        registry.register("boom", Box::new(PanickingSink));
        registry.register(
            "tail",
            Box::new(CountingSink {
                invocations: Arc::clone(&invocations),
            }),
        );

        let failures = registry.dispatch(&LogRecord::default());
        assert_eq!(failures, 1);
        assert_eq!(invocations.load(Ordering::SeqCst), 1);

        // The registry stays usable afterwards.
        registry.dispatch(&LogRecord::default());
        assert_eq!(invocations.load(Ordering::SeqCst), 2);
    }
}
