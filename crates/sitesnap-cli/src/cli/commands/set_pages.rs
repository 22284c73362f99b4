//! `sitesnap set-pages <index> <pages>` – change a website's page count.

use anyhow::Result;
use sitesnap_core::registry::{PageCount, WebsiteRegistry};

pub fn run_set_pages(registry: &WebsiteRegistry, index: usize, pages: PageCount) -> Result<()> {
    let site = registry.set_pages(index, pages)?;
    println!("Updated {} ({})", site.url, site.pages.describe());
    Ok(())
}
