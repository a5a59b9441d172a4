//! Serialized access to a shared table session
//!
//! The pipeline is single-threaded, but presentation callbacks may be held by
//! several owners. `SessionSlot` hands them one shared handle: events run one
//! at a time under a mutex, and using the slot before a session is installed
//! is a wiring mistake reported as `SessionNotInitialized`.

use crate::error::ApiError;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::error;

/// Shared, possibly-empty home for a session
pub struct SessionSlot<T> {
    inner: Arc<Mutex<Option<T>>>,
}

impl<T> SessionSlot<T> {
    /// Create a slot with no session installed
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a slot holding `session`
    pub fn new(session: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(session))),
        }
    }

    /// Install a session, returning the one it replaced
    pub fn install(&self, session: T) -> Option<T> {
        self.inner.lock().replace(session)
    }

    /// Remove and return the installed session
    pub fn take(&self) -> Option<T> {
        self.inner.lock().take()
    }

    pub fn is_installed(&self) -> bool {
        self.inner.lock().is_some()
    }

    /// Run `f` against the installed session while holding the lock.
    ///
    /// Fails fast with `SessionNotInitialized` when the slot is empty.
    pub fn with<R>(
        &self,
        f: impl FnOnce(&mut T) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let mut guard = self.inner.lock();
        match guard.as_mut() {
            Some(session) => f(session),
            None => {
                error!("Table session used before it was installed");
                Err(ApiError::SessionNotInitialized)
            }
        }
    }
}

impl<T> Clone for SessionSlot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for SessionSlot<T> {
    fn default() -> Self {
        Self::empty()
    }
}
