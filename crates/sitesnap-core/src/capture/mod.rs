//! Per-site capture pipeline.
//!
//! One browser session per site: navigate with bounded retry, wait for the
//! page to settle, then scroll and shoot each planned offset. Failures are
//! contained to the site so a batch always continues, and the session is
//! released on every exit path.

mod output;

pub use output::{shot_filename, site_output_dir};

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::thread;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{CaptureConfig, CAPTURE_TZ};
use crate::driver::{BrowserDriver, BrowserOptions, DriverError, PageSession, ScrollBehavior};
use crate::planner;
use crate::registry::Website;

/// Error that aborts one site's capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("page failed to load after {attempts} attempts: {last}")]
    NavigationExhausted {
        attempts: u32,
        #[source]
        last: DriverError,
    },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("could not create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What happened to one site, reported to the operator.
#[derive(Debug)]
pub enum CaptureOutcome {
    /// Screenshot files written for this site.
    Captured(Vec<PathBuf>),
    /// This site failed; the batch continues with the next one.
    Failed(CaptureError),
}

impl CaptureOutcome {
    pub fn is_captured(&self) -> bool {
        matches!(self, CaptureOutcome::Captured(_))
    }
}

/// Drives one browser session per site.
pub struct CaptureEngine<'a> {
    driver: &'a dyn BrowserDriver,
    config: &'a CaptureConfig,
}

impl<'a> CaptureEngine<'a> {
    pub fn new(driver: &'a dyn BrowserDriver, config: &'a CaptureConfig) -> Self {
        Self { driver, config }
    }

    /// Captures one site. Never propagates an error: failures are logged
    /// and folded into the returned outcome.
    pub fn capture(&self, site: &Website, output_root: &Path) -> CaptureOutcome {
        info!(url = %site.url, "loading site");
        match self.try_capture(site, output_root) {
            Ok(files) => {
                info!(url = %site.url, shots = files.len(), "capture complete");
                CaptureOutcome::Captured(files)
            }
            Err(err) => {
                warn!(url = %site.url, error = %err, "capture failed");
                CaptureOutcome::Failed(err)
            }
        }
    }

    fn try_capture(
        &self,
        site: &Website,
        output_root: &Path,
    ) -> Result<Vec<PathBuf>, CaptureError> {
        // One Eastern timestamp per run: it names the date folder and is
        // shared by every shot's filename.
        let started = Utc::now().with_timezone(&CAPTURE_TZ);
        let output_dir = output::site_output_dir(output_root, started, &site.url);
        std::fs::create_dir_all(&output_dir).map_err(|source| CaptureError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

        // The session box drops at the end of this scope — normal return or
        // error — which releases the browser.
        let mut session = self.driver.launch(&BrowserOptions::from(self.config))?;

        self.navigate_with_retry(session.as_mut(), &site.url)?;
        thread::sleep(self.config.settle_delay());

        let total_height = session.page_height()?;
        let viewport_height = session.viewport_height()?;
        let offsets = planner::plan_scroll_offsets(total_height, viewport_height, site.pages);

        let mut files = Vec::with_capacity(offsets.len());
        for (index, offset) in offsets.into_iter().enumerate() {
            session.scroll_to(offset, ScrollBehavior::Smooth)?;
            thread::sleep(self.config.scroll_delay());

            // Smooth scrolling does not always finish; force the position.
            session.scroll_to(offset, ScrollBehavior::Instant)?;
            thread::sleep(self.config.scroll_correct_delay());

            let path = output_dir.join(output::shot_filename(index + 1, started));
            session.save_screenshot(&path)?;
            info!(path = %path.display(), "screenshot saved");
            files.push(path);
        }

        Ok(files)
    }

    fn navigate_with_retry(
        &self,
        session: &mut dyn PageSession,
        url: &str,
    ) -> Result<(), CaptureError> {
        let attempts = self.config.nav_attempts.max(1);
        let mut last = None;
        for attempt in 1..=attempts {
            match session.navigate(url, self.config.nav_timeout()) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    warn!(url, attempt, attempts, error = %err, "navigation attempt failed");
                    last = Some(err);
                    if attempt < attempts {
                        thread::sleep(self.config.nav_retry_delay());
                    }
                }
            }
        }
        Err(CaptureError::NavigationExhausted {
            attempts,
            last: last.expect("at least one attempt was made"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::mock::MockDriver;
    use crate::registry::PageCount;
    use std::sync::atomic::Ordering;
    use tempfile::tempdir;

    fn fast_config() -> CaptureConfig {
        CaptureConfig {
            nav_retry_delay_secs: 0,
            settle_delay_secs: 0,
            scroll_delay_secs: 0,
            scroll_correct_delay_secs: 0,
            ..CaptureConfig::default()
        }
    }

    fn site(pages: PageCount) -> Website {
        Website {
            url: "https://site.test".to_string(),
            pages,
        }
    }

    #[test]
    fn capture_scrolls_and_shoots_each_planned_offset() {
        let dir = tempdir().unwrap();
        let driver = MockDriver::new(4000, 1080);
        let config = fast_config();
        let engine = CaptureEngine::new(&driver, &config);

        let outcome = engine.capture(&site(PageCount::Two), dir.path());
        assert!(outcome.is_captured());

        let log = driver.log();
        assert_eq!(
            log.scrolls(),
            vec![
                (0, ScrollBehavior::Smooth),
                (0, ScrollBehavior::Instant),
                (864, ScrollBehavior::Smooth),
                (864, ScrollBehavior::Instant),
            ]
        );

        let files = match outcome {
            CaptureOutcome::Captured(files) => files,
            CaptureOutcome::Failed(err) => panic!("capture failed: {err}"),
        };
        assert_eq!(files.len(), 2);
        for file in &files {
            assert!(file.exists());
        }
        assert_eq!(log.drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn single_page_site_gets_one_shot_at_the_top() {
        let dir = tempdir().unwrap();
        let driver = MockDriver::new(4000, 1080);
        let config = fast_config();
        let engine = CaptureEngine::new(&driver, &config);

        let outcome = engine.capture(&site(PageCount::One), dir.path());
        assert!(outcome.is_captured());
        assert_eq!(driver.log().screenshots().len(), 1);
        assert_eq!(
            driver.log().scrolls(),
            vec![(0, ScrollBehavior::Smooth), (0, ScrollBehavior::Instant)]
        );
    }

    #[test]
    fn navigation_recovers_within_the_attempt_budget() {
        let dir = tempdir().unwrap();
        let driver = MockDriver::new(4000, 1080).fail_first_navigations(2);
        let config = fast_config();
        let engine = CaptureEngine::new(&driver, &config);

        let outcome = engine.capture(&site(PageCount::Two), dir.path());
        assert!(outcome.is_captured());

        let log = driver.log();
        assert_eq!(log.nav_attempts.load(Ordering::SeqCst), 3);
        assert_eq!(log.screenshots().len(), 2);
    }

    #[test]
    fn exhausted_navigation_fails_the_site_and_releases_the_session() {
        let dir = tempdir().unwrap();
        let driver = MockDriver::new(4000, 1080).fail_first_navigations(3);
        let config = fast_config();
        let engine = CaptureEngine::new(&driver, &config);

        let outcome = engine.capture(&site(PageCount::Two), dir.path());
        let err = match outcome {
            CaptureOutcome::Failed(err) => err,
            CaptureOutcome::Captured(_) => panic!("expected failure"),
        };
        assert!(matches!(
            err,
            CaptureError::NavigationExhausted { attempts: 3, .. }
        ));

        let log = driver.log();
        assert_eq!(log.nav_attempts.load(Ordering::SeqCst), 3);
        assert!(log.screenshots().is_empty());
        assert!(log.scrolls().is_empty());
        assert_eq!(log.drops.load(Ordering::SeqCst), 1);
    }
}
