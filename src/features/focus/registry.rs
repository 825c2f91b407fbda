//! Observer callbacks, at most one per session id.

use std::collections::HashMap;
use std::sync::Arc;

/// Observer invoked on every tick with `(time_left_seconds, is_complete)`.
pub type SessionCallback = Arc<dyn Fn(u64, bool) + Send + Sync>;

/// Maps session ids to their observer. Last registration wins.
#[derive(Default)]
pub(crate) struct CallbackRegistry {
    callbacks: HashMap<String, SessionCallback>,
}

impl CallbackRegistry {
    /// Register or replace the observer for `id`.
    ///
    /// Returns true if an earlier observer was replaced.
    pub fn register(&mut self, id: &str, callback: SessionCallback) -> bool {
        self.callbacks.insert(id.to_string(), callback).is_some()
    }

    /// A clone of the observer for `id`, to be invoked outside any lock.
    pub fn get(&self, id: &str) -> Option<SessionCallback> {
        self.callbacks.get(id).cloned()
    }

    pub fn remove(&mut self, id: &str) -> Option<SessionCallback> {
        self.callbacks.remove(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}
