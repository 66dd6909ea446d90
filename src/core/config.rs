//! Process-wide engine configuration

use super::severity::Severity;
use parking_lot::RwLock;

/// Environment variable overriding the severity threshold (numeric level).
pub const VERBOSITY_ENV: &str = "VERBOSE";
/// Environment variable overriding the context selector.
pub const CONTEXT_ENV: &str = "CONTEXT";

/// Shared runtime configuration, read by sinks at render time.
///
/// Environment overrides are consulted when a setter runs, not
/// continuously: `VERBOSE` and `CONTEXT` win over the supplied values at
/// `init` / `set_verbosity` / `set_context` time. The synchronous flag is
/// fixed for the engine's lifetime.
pub struct EngineConfig {
    verbosity: RwLock<Severity>,
    context: RwLock<i32>,
    synchronous: bool,
}

impl EngineConfig {
    pub fn new(verbosity: Severity, context: i32, synchronous: bool) -> Self {
        let config = Self {
            verbosity: RwLock::new(verbosity),
            context: RwLock::new(context),
            synchronous,
        };
        config.set_verbosity(verbosity);
        config.set_context(context);
        config
    }

    pub fn verbosity(&self) -> Severity {
        *self.verbosity.read()
    }

    /// Set the severity threshold, letting a numeric `VERBOSE` environment
    /// value win over the argument.
    pub fn set_verbosity(&self, verbosity: Severity) {
        let effective = match env_level(VERBOSITY_ENV) {
            Some(level) => Severity::from_level(level),
            None => verbosity,
        };
        *self.verbosity.write() = effective;
    }

    pub fn context(&self) -> i32 {
        *self.context.read()
    }

    /// Set the context selector, letting a numeric `CONTEXT` environment
    /// value win over the argument.
    pub fn set_context(&self, context: i32) {
        let effective = env_level(CONTEXT_ENV).unwrap_or(context);
        *self.context.write() = effective;
    }

    pub fn synchronous(&self) -> bool {
        self.synchronous
    }
}

fn env_level(var: &str) -> Option<i32> {
    std::env::var(var).ok().and_then(|raw| raw.trim().parse().ok())
}
