//! Immediate and daily capture scheduling.
//!
//! The immediate pass runs every registered site sequentially; a failed
//! site never blocks the rest. The daily mode wraps the immediate pass in
//! a cooperative poll loop: check the shutdown token, run when the Eastern
//! trigger time fires, sleep one tick, repeat.

mod clock;
mod trigger;

pub use clock::{Clock, SystemClock};
pub use trigger::next_trigger;

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::capture::CaptureEngine;
use crate::config::CaptureConfig;
use crate::control::ShutdownToken;
use crate::driver::BrowserDriver;
use crate::registry::WebsiteRegistry;

/// Counts reported to the operator after an immediate pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub captured: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.captured + self.failed
    }
}

/// Runs one capture pass over every registered site, in registry order.
///
/// An empty registry is a no-op; the zero summary lets the caller report
/// it. Only a registry load failure is an error — per-site capture
/// failures are contained by the engine and counted.
pub fn run_all(
    driver: &dyn BrowserDriver,
    config: &CaptureConfig,
    registry: &WebsiteRegistry,
    output_root: &Path,
) -> Result<RunSummary> {
    let sites = registry.load()?;
    if sites.is_empty() {
        info!("no websites configured; nothing to capture");
        return Ok(RunSummary::default());
    }

    let engine = CaptureEngine::new(driver, config);
    let mut summary = RunSummary::default();
    for site in &sites {
        if engine.capture(site, output_root).is_captured() {
            summary.captured += 1;
        } else {
            summary.failed += 1;
        }
    }
    Ok(summary)
}

/// Runs the daily capture loop until `shutdown` is requested.
///
/// The loop polls `clock` once per configured tick, so a shutdown request
/// takes effect between polls rather than interrupting anything mid-write.
pub fn run_daily(
    driver: &dyn BrowserDriver,
    config: &CaptureConfig,
    registry: &WebsiteRegistry,
    output_root: &Path,
    shutdown: &ShutdownToken,
    clock: &dyn Clock,
) -> Result<()> {
    anyhow::ensure!(
        config.daily_hour < 24 && config.daily_minute < 60,
        "invalid daily trigger time {:02}:{:02}",
        config.daily_hour,
        config.daily_minute
    );

    let mut next = next_trigger(clock.now(), config.daily_hour, config.daily_minute);
    info!(next = %next, "daily capture scheduled");

    while !shutdown.is_requested() {
        if clock.now() >= next {
            let summary = run_all(driver, config, registry, output_root)?;
            info!(
                captured = summary.captured,
                failed = summary.failed,
                "daily pass finished"
            );
            next = next_trigger(clock.now(), config.daily_hour, config.daily_minute);
            info!(next = %next, "next daily capture scheduled");
        }
        clock.sleep(config.tick());
    }

    info!("shutdown requested; daily loop exiting");
    Ok(())
}
