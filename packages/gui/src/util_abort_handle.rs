//! Cooperative cancellation for background tasks.
//!
//! Nothing is ever killed. A task is handed an `AbortHandle` and is expected
//! to check it between steps; whoever started the task holds the connected
//! `AbortGuard` and flips it when the user cancels or the screen goes away.

use std::sync::{
    Arc,
    atomic::{
        AtomicBool,
        Ordering,
    },
};


/// Shared abort flag. Really just a `Arc<AtomicBool>`.
#[derive(Default, Debug, Clone)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    /// Construct not aborted.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}


/// Owning side of an abort flag, which aborts when dropped.
#[derive(Default, Debug)]
#[must_use]
pub struct AbortGuard(AbortHandle);

impl AbortGuard {
    /// Construct not aborted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone a new connected `AbortHandle`, for the task side.
    pub fn new_handle(&self) -> AbortHandle {
        self.0.clone()
    }

    pub fn is_aborted(&self) -> bool {
        self.0.is_aborted()
    }

    /// Mark as aborted (which is also done when dropped).
    pub fn abort(&self) {
        self.0.abort();
    }
}

impl Drop for AbortGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}


#[test]
fn test_guard_drop_aborts_handles() {
    let guard = AbortGuard::new();
    let handle = guard.new_handle();
    assert!(!handle.is_aborted());
    drop(guard);
    assert!(handle.is_aborted());
}
