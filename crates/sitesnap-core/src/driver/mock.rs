//! Scripted driver double for tests.
//!
//! Sessions share an observation log with the driver that launched them,
//! so a test can assert on navigation attempts, scroll commands, and
//! session release after the capture under test has finished.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{BrowserDriver, BrowserOptions, DriverError, PageSession, ScrollBehavior};

/// Everything a [`MockDriver`] and its sessions record.
#[derive(Default)]
pub struct MockLog {
    /// Sessions launched.
    pub launches: AtomicUsize,
    /// Navigation attempts across all sessions.
    pub nav_attempts: AtomicUsize,
    /// Sessions released (dropped).
    pub drops: AtomicUsize,
    /// Scroll commands in issue order.
    pub scrolls: Mutex<Vec<(u32, ScrollBehavior)>>,
    /// Screenshot paths in write order.
    pub screenshots: Mutex<Vec<PathBuf>>,
}

impl MockLog {
    pub fn scrolls(&self) -> Vec<(u32, ScrollBehavior)> {
        self.scrolls.lock().unwrap().clone()
    }

    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.screenshots.lock().unwrap().clone()
    }
}

/// Driver double with fixed page geometry and a configurable number of
/// leading navigation failures.
pub struct MockDriver {
    page_height: u32,
    viewport_height: u32,
    fail_navigations: usize,
    log: Arc<MockLog>,
}

impl MockDriver {
    pub fn new(page_height: u32, viewport_height: u32) -> Self {
        Self {
            page_height,
            viewport_height,
            fail_navigations: 0,
            log: Arc::new(MockLog::default()),
        }
    }

    /// The first `n` navigation attempts, counted across all sessions,
    /// fail with a simulated load error.
    pub fn fail_first_navigations(mut self, n: usize) -> Self {
        self.fail_navigations = n;
        self
    }

    pub fn log(&self) -> Arc<MockLog> {
        Arc::clone(&self.log)
    }
}

impl BrowserDriver for MockDriver {
    fn launch(&self, _options: &BrowserOptions) -> Result<Box<dyn PageSession>, DriverError> {
        self.log.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            page_height: self.page_height,
            viewport_height: self.viewport_height,
            fail_navigations: self.fail_navigations,
            log: Arc::clone(&self.log),
        }))
    }
}

struct MockSession {
    page_height: u32,
    viewport_height: u32,
    fail_navigations: usize,
    log: Arc<MockLog>,
}

impl PageSession for MockSession {
    fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<(), DriverError> {
        let attempt = self.log.nav_attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.fail_navigations {
            return Err(DriverError::Navigation(format!(
                "simulated load failure for {url} (attempt {attempt})"
            )));
        }
        Ok(())
    }

    fn page_height(&mut self) -> Result<u32, DriverError> {
        Ok(self.page_height)
    }

    fn viewport_height(&mut self) -> Result<u32, DriverError> {
        Ok(self.viewport_height)
    }

    fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior) -> Result<(), DriverError> {
        self.log.scrolls.lock().unwrap().push((offset, behavior));
        Ok(())
    }

    fn save_screenshot(&mut self, path: &Path) -> Result<(), DriverError> {
        std::fs::write(path, b"\x89PNG\r\n\x1a\n")?;
        self.log.screenshots.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        self.log.drops.fetch_add(1, Ordering::SeqCst);
    }
}
