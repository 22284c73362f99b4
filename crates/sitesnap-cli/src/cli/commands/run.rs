//! `sitesnap run` – capture every registered website now.

use anyhow::Result;
use sitesnap_core::config::CaptureConfig;
use sitesnap_core::driver::ChromeDriver;
use sitesnap_core::registry::WebsiteRegistry;
use sitesnap_core::scheduler;
use std::path::Path;

pub fn run_capture(
    cfg: &CaptureConfig,
    registry: &WebsiteRegistry,
    output_root: &Path,
) -> Result<()> {
    let driver = ChromeDriver;
    let summary = scheduler::run_all(&driver, cfg, registry, output_root)?;
    if summary.total() == 0 {
        println!("No websites configured. Add one with `sitesnap add <url>`.");
    } else {
        println!(
            "Captured {} site(s), {} failed.",
            summary.captured, summary.failed
        );
    }
    Ok(())
}
