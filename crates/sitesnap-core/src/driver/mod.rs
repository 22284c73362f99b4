//! Browser driver seam.
//!
//! The capture engine treats the browser as an opaque capability behind
//! these traits: launch a session, navigate, query geometry, scroll, and
//! save a screenshot. [`ChromeDriver`] drives headless Chrome; the
//! [`mock`] module ships a scripted double for tests.

mod chrome;
pub mod mock;

pub use chrome::ChromeDriver;

use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::config::CaptureConfig;

/// Errors surfaced by a browser session.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("script evaluation failed: {0}")]
    Script(String),

    #[error("screenshot capture failed: {0}")]
    Screenshot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// How a scroll command is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animated scroll; gives lazy-loaded content a chance to trigger.
    Smooth,
    /// Immediate jump; corrects an unfinished smooth scroll.
    Instant,
}

/// Launch parameters for a browser session.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub window_width: u32,
    pub window_height: u32,
    pub user_agent: String,
}

impl From<&CaptureConfig> for BrowserOptions {
    fn from(cfg: &CaptureConfig) -> Self {
        Self {
            window_width: cfg.window_width,
            window_height: cfg.window_height,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// One exclusively-owned browser session.
///
/// Dropping the session releases the underlying browser. Release is bound
/// to scope exit, so it happens on every path out of a capture — normal
/// return or propagated failure — and is safe after a prior error.
pub trait PageSession {
    /// Navigates to `url`, waiting at most `timeout` for the load.
    fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), DriverError>;

    /// Total scrollable height: the max of the document's scroll height
    /// and its client height.
    fn page_height(&mut self) -> Result<u32, DriverError>;

    /// Height of the visible viewport.
    fn viewport_height(&mut self) -> Result<u32, DriverError>;

    /// Scrolls the window to a vertical offset.
    fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior) -> Result<(), DriverError>;

    /// Writes a PNG screenshot of the current viewport to `path`.
    fn save_screenshot(&mut self, path: &Path) -> Result<(), DriverError>;
}

/// Launches browser sessions.
pub trait BrowserDriver {
    fn launch(&self, options: &BrowserOptions) -> Result<Box<dyn PageSession>, DriverError>;
}
