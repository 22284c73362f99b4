//! `sitesnap schedule` – daily capture loop at a fixed Eastern time.

use anyhow::{Context, Result};
use sitesnap_core::config::CaptureConfig;
use sitesnap_core::control::ShutdownToken;
use sitesnap_core::driver::ChromeDriver;
use sitesnap_core::registry::WebsiteRegistry;
use sitesnap_core::scheduler::{self, SystemClock};
use std::path::Path;

pub fn run_schedule(
    cfg: &CaptureConfig,
    registry: &WebsiteRegistry,
    output_root: &Path,
    at: Option<&str>,
) -> Result<()> {
    let mut cfg = cfg.clone();
    if let Some(at) = at {
        let (hour, minute) = parse_trigger(at)?;
        cfg.daily_hour = hour;
        cfg.daily_minute = minute;
    }

    let sites = registry.load()?;
    if sites.is_empty() {
        println!("No websites configured. Add one with `sitesnap add <url>`.");
        return Ok(());
    }

    let shutdown = ShutdownToken::new();
    let handler_token = shutdown.clone();
    ctrlc::set_handler(move || handler_token.request())
        .context("could not install Ctrl-C handler")?;

    println!(
        "Scheduled daily screenshots for {} website(s) at {:02}:{:02} Eastern:",
        sites.len(),
        cfg.daily_hour,
        cfg.daily_minute
    );
    for site in &sites {
        println!("- {}", site.url);
    }
    println!("Press Ctrl+C to stop.");

    let driver = ChromeDriver;
    scheduler::run_daily(
        &driver,
        &cfg,
        registry,
        output_root,
        &shutdown,
        &SystemClock,
    )?;

    println!("Stopping scheduled screenshots.");
    Ok(())
}

/// Parses an `HH:MM` trigger override.
fn parse_trigger(s: &str) -> Result<(u32, u32)> {
    let (h, m) = s.split_once(':').context("trigger time must be HH:MM")?;
    let hour: u32 = h.trim().parse().context("trigger hour is not a number")?;
    let minute: u32 = m.trim().parse().context("trigger minute is not a number")?;
    anyhow::ensure!(hour < 24 && minute < 60, "trigger time out of range: {s}");
    Ok((hour, minute))
}
