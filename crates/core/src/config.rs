//! Engine-wide tuning knobs
//!
//! The configuration is installed at most once per process, before the first
//! element-wise operation. Without an explicit install the defaults apply.

use std::sync::OnceLock;
use tracing::{debug, warn};

/// Number of elements above which element-wise loops run on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Tuning parameters for the vector engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Vectors longer than this are processed in parallel (with the `parallel` feature)
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with a custom parallel threshold
    #[must_use]
    pub const fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Install this configuration for the rest of the process
    ///
    /// # Errors
    /// Returns the rejected configuration if one was already installed (or the
    /// default was already read by an operation).
    pub fn install(self) -> Result<(), EngineConfig> {
        match ENGINE_CONFIG.set(self) {
            Ok(()) => {
                debug!(parallel_threshold = self.parallel_threshold, "Engine configuration installed");
                Ok(())
            }
            Err(rejected) => {
                warn!(
                    requested = rejected.parallel_threshold,
                    active = Self::current().parallel_threshold,
                    "Engine configuration already fixed, install ignored"
                );
                Err(rejected)
            }
        }
    }

    /// Active configuration (the default if none was installed)
    pub fn current() -> &'static EngineConfig {
        ENGINE_CONFIG.get_or_init(EngineConfig::default)
    }

    /// Whether a loop over `len` elements should be split across threads
    #[inline]
    #[must_use]
    pub fn is_parallel(&self, len: usize) -> bool {
        cfg!(feature = "parallel") && len > self.parallel_threshold
    }
}
