//! `sitesnap remove <index>` – remove a website by its listing number.

use anyhow::Result;
use sitesnap_core::registry::WebsiteRegistry;

pub fn run_remove(registry: &WebsiteRegistry, index: usize) -> Result<()> {
    let removed = registry.remove(index)?;
    println!("Removed {}", removed.url);
    Ok(())
}
