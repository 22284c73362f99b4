//! URL normalization and output-folder naming.
//!
//! Registered URLs always carry a scheme; screenshot folders are named by
//! the site's bare domain (no scheme, no leading `www.`, no path).

/// Folder name when a URL yields no usable host at all.
const DEFAULT_DOMAIN: &str = "site";

/// Returns `raw` with `https://` prefixed when no scheme is present.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Derives the folder-name domain for a site: the host with any leading
/// `www.` stripped.
pub fn derive_domain(url: &str) -> String {
    let host = match url::Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(str::to_string),
        Err(_) => host_by_stripping(url),
    };

    let host = match host.or_else(|| host_by_stripping(url)) {
        Some(h) if !h.is_empty() => h,
        _ => return DEFAULT_DOMAIN.to_string(),
    };

    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

/// Fallback for inputs the `url` crate rejects: drop a known scheme prefix
/// and cut at the first `/`.
fn host_by_stripping(url: &str) -> Option<String> {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let host = without_scheme.split('/').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
