//! Shutdown flag for the daily scheduler loop.
//!
//! The CLI sets the token from its Ctrl-C handler; the wait loop checks it
//! between polls and exits cleanly. An interrupt that lands during an
//! active capture is not handled here (the process is simply terminated).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cheaply clonable process-wide shutdown flag.
#[derive(Clone, Default)]
pub struct ShutdownToken {
    flag: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown; the wait loop exits at its next tick.
    pub fn request(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
