//! Shared session state.
//!
//! One handle, cloned into the gesture thread and the network task. Every
//! access takes the lock for a single read or write and releases it before
//! returning; callers never hold it across I/O.

use handcue_core::{ServerDirective, SessionState};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to the one session state.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionState>>,
}

impl SharedSession {
    /// A fresh session starting in `initial`.
    pub fn new(initial: SessionState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // The value is Copy and written in one store, so a poisoned lock still
        // holds a whole state.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> SessionState {
        *self.lock()
    }

    /// Overwrite the state, returning the previous one.
    pub fn set(&self, state: SessionState) -> SessionState {
        std::mem::replace(&mut *self.lock(), state)
    }

    /// Apply a server directive. Returns the new state if it changed, `None`
    /// when the session was already there.
    pub fn apply(&self, directive: ServerDirective) -> Option<SessionState> {
        let target = directive.target_state();
        let mut state = self.lock();
        if *state == target {
            return None;
        }
        *state = target;
        Some(target)
    }
}
