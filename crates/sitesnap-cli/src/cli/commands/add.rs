//! `sitesnap add <url>` – register a website for capture.

use anyhow::Result;
use sitesnap_core::registry::{PageCount, WebsiteRegistry};

pub fn run_add(registry: &WebsiteRegistry, url: &str, pages: PageCount) -> Result<()> {
    let site = registry.add(url, pages)?;
    println!("Added {} ({})", site.url, site.pages.describe());
    Ok(())
}
