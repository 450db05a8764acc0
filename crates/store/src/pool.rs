//! Bounded connection pool.
//!
//! An explicit object owned by the top-level caller and injected into
//! each mapper at construction. Every checked-out [`Conn`] returns its
//! permit when dropped, so release happens exactly once on every exit
//! path, including panics and early `?` returns.

use parking_lot::{Condvar, Mutex};
use redmap_core::{RedmapError, Result};
use serde::Deserialize;
use std::ops::Deref;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::store::Store;

/// Pool tuning knobs.
///
/// Defaults mirror the reference deployment: 20 handles, 5 second wait.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum handles checked out at once.
    pub max_conns: usize,
    /// How long `acquire` waits for a free handle before failing.
    pub acquire_timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            max_conns: 20,
            acquire_timeout_ms: 5_000,
        }
    }
}

impl PoolConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| RedmapError::invalid_input(format!("pool config: {e}")))
    }
}

struct PoolInner {
    store: Arc<dyn Store>,
    /// Free permits.
    free: Mutex<usize>,
    freed: Condvar,
    config: PoolConfig,
}

/// Bounded pool of store handles.
///
/// Cloning is cheap (shared inner); all clones draw on the same
/// permits. A mapper checks one handle out for its lifetime; nested
/// mappers check out their own, so capacity must cover the deepest
/// reference nesting in use.
#[derive(Clone)]
pub struct Pool {
    inner: Arc<PoolInner>,
}

impl Pool {
    /// Build a pool over a store client.
    pub fn new(store: Arc<dyn Store>, config: PoolConfig) -> Self {
        let free = config.max_conns;
        Pool {
            inner: Arc::new(PoolInner {
                store,
                free: Mutex::new(free),
                freed: Condvar::new(),
                config,
            }),
        }
    }

    /// Build a pool with default configuration.
    pub fn with_defaults(store: Arc<dyn Store>) -> Self {
        Self::new(store, PoolConfig::default())
    }

    /// Check out a handle, waiting up to the configured timeout for a
    /// free permit.
    pub fn acquire(&self) -> Result<Conn> {
        let timeout = Duration::from_millis(self.inner.config.acquire_timeout_ms);
        let deadline = Instant::now() + timeout;
        let mut free = self.inner.free.lock();
        while *free == 0 {
            if self.inner.freed.wait_until(&mut free, deadline).timed_out() {
                return Err(RedmapError::PoolTimeout {
                    waited_ms: self.inner.config.acquire_timeout_ms,
                });
            }
        }
        *free -= 1;
        debug!(free = *free, "checked out store handle");
        Ok(Conn {
            inner: self.inner.clone(),
        })
    }

    /// Permits currently free.
    pub fn available(&self) -> usize {
        *self.inner.free.lock()
    }

    /// The pool's configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.inner.config
    }
}

/// A checked-out store handle.
///
/// Derefs to the underlying [`Store`] client; the permit returns to the
/// pool on drop.
pub struct Conn {
    inner: Arc<PoolInner>,
}

impl Deref for Conn {
    type Target = dyn Store;

    fn deref(&self) -> &(dyn Store + 'static) {
        self.inner.store.as_ref()
    }
}

impl Drop for Conn {
    fn drop(&mut self) {
        let mut free = self.inner.free.lock();
        *free += 1;
        self.inner.freed.notify_one();
    }
}

impl std::fmt::Debug for Conn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conn").finish_non_exhaustive()
    }
}
