//! Process environment snapshot.
//!
//! The snapshot is captured once at startup and handed to each adapter by
//! `Arc`, replacing hidden global state with an explicit read-only object.
//! Resolution still consults the live process environment first; the
//! snapshot is the tier below it.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Immutable map of environment variables, captured at a single point in
/// time. Keys iterate in stable order.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// An empty snapshot, for hosts that want resolution to ignore the
    /// startup environment entirely (and for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture and wrap in an [`Arc`] ready to share across adapters.
    #[must_use]
    pub fn capture_shared() -> Arc<Self> {
        Arc::new(Self::capture())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl FromIterator<(String, String)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}
