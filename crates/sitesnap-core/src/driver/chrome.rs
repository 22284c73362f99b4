//! Headless Chrome implementation of the driver seam.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, Tab};

use super::{BrowserDriver, BrowserOptions, DriverError, PageSession, ScrollBehavior};

/// Launches headless Chrome with a fixed window size, sandboxing disabled,
/// relaxed TLS checks, and a desktop user agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeDriver;

struct ChromeSession {
    tab: Arc<Tab>,
    // Dropping the browser terminates the Chrome process; keeping it after
    // the tab preserves that order on scope exit.
    _browser: Browser,
}

impl BrowserDriver for ChromeDriver {
    fn launch(&self, options: &BrowserOptions) -> Result<Box<dyn PageSession>, DriverError> {
        let launch_err = |e: &dyn std::fmt::Display| DriverError::Launch(e.to_string());

        let launch = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((options.window_width, options.window_height)))
            .ignore_certificate_errors(true)
            .args(vec![
                OsStr::new("--disable-gpu"),
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--allow-running-insecure-content"),
            ])
            .build()
            .map_err(|e| launch_err(&e))?;

        let browser = Browser::new(launch).map_err(|e| launch_err(&e))?;
        let tab = browser.new_tab().map_err(|e| launch_err(&e))?;
        tab.set_user_agent(&options.user_agent, None, None)
            .map_err(|e| launch_err(&e))?;

        Ok(Box::new(ChromeSession {
            tab,
            _browser: browser,
        }))
    }
}

impl ChromeSession {
    fn eval_u32(&self, script: &str) -> Result<u32, DriverError> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| DriverError::Script(e.to_string()))?;
        let value = result
            .value
            .ok_or_else(|| DriverError::Script(format!("no value from script: {script}")))?;
        value
            .as_f64()
            .map(|v| v as u32)
            .ok_or_else(|| DriverError::Script(format!("non-numeric value from script: {value}")))
    }
}

impl PageSession for ChromeSession {
    fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        self.tab.set_default_timeout(timeout);
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| DriverError::Navigation(e.to_string()))?;
        Ok(())
    }

    fn page_height(&mut self) -> Result<u32, DriverError> {
        self.eval_u32(
            "Math.max(document.documentElement.scrollHeight, document.documentElement.clientHeight)",
        )
    }

    fn viewport_height(&mut self) -> Result<u32, DriverError> {
        self.eval_u32("window.innerHeight")
    }

    fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior) -> Result<(), DriverError> {
        let script = match behavior {
            ScrollBehavior::Smooth => {
                format!("window.scrollTo({{top: {offset}, behavior: 'smooth'}})")
            }
            ScrollBehavior::Instant => format!("window.scrollTo(0, {offset})"),
        };
        self.tab
            .evaluate(&script, false)
            .map_err(|e| DriverError::Script(e.to_string()))?;
        Ok(())
    }

    fn save_screenshot(&mut self, path: &Path) -> Result<(), DriverError> {
        let png = self
            .tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| DriverError::Screenshot(e.to_string()))?;
        fs::write(path, png)?;
        Ok(())
    }
}
