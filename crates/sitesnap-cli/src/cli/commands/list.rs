//! `sitesnap list` – show registered websites and their page settings.

use anyhow::Result;
use sitesnap_core::registry::WebsiteRegistry;

pub fn run_list(registry: &WebsiteRegistry) -> Result<()> {
    let sites = registry.load()?;
    if sites.is_empty() {
        println!("No websites configured.");
        return Ok(());
    }

    for (i, site) in sites.iter().enumerate() {
        println!("{}. {} ({})", i + 1, site.url, site.pages.describe());
    }
    Ok(())
}
