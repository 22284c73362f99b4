//! Persisted website registry.
//!
//! A JSON array on disk is the sole source of truth; every mutating
//! operation is one read-modify-write cycle that persists immediately.
//! Legacy files hold bare URL strings — these upgrade to structured
//! entries on load and are never written back in the legacy shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::url_model;

/// Number of scroll positions captured for a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PageCount {
    One,
    Two,
}

impl PageCount {
    pub fn shots(self) -> usize {
        match self {
            PageCount::One => 1,
            PageCount::Two => 2,
        }
    }

    /// Listing wording shown to the operator.
    pub fn describe(self) -> &'static str {
        match self {
            PageCount::One => "first page only",
            PageCount::Two => "first and second pages",
        }
    }
}

impl TryFrom<u8> for PageCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PageCount::One),
            2 => Ok(PageCount::Two),
            other => Err(format!("page count must be 1 or 2, got {other}")),
        }
    }
}

impl From<PageCount> for u8 {
    fn from(value: PageCount) -> Self {
        match value {
            PageCount::One => 1,
            PageCount::Two => 2,
        }
    }
}

impl fmt::Display for PageCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

impl FromStr for PageCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .parse()
            .map_err(|_| format!("page count must be 1 or 2, got {s:?}"))?;
        PageCount::try_from(value)
    }
}

/// A capture target: normalized URL plus how many pages to shoot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub url: String,
    pub pages: PageCount,
}

/// On-disk entry: current object shape or a legacy bare URL string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Current { url: String, pages: PageCount },
    Legacy(String),
}

impl From<RawEntry> for Website {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Current { url, pages } => Website { url, pages },
            // Legacy entries captured two pages.
            RawEntry::Legacy(url) => Website {
                url,
                pages: PageCount::Two,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("could not access registry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("registry {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("website already exists in the registry: {url}")]
    Duplicate { url: String },

    #[error("no website at index {index} (registry holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Registry of capture targets backed by one JSON file.
pub struct WebsiteRegistry {
    path: PathBuf,
}

impl WebsiteRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default registry location: `~/.config/sitesnap/websites.json`.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("sitesnap")?;
        Ok(xdg_dirs.place_config_file("websites.json")?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all registered websites. A missing file is an empty registry,
    /// not an error; malformed JSON is fatal since there is no safe default.
    pub fn load(&self) -> Result<Vec<Website>, RegistryError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(RegistryError::Io {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        let raw: Vec<RawEntry> =
            serde_json::from_str(&data).map_err(|source| RegistryError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        Ok(raw.into_iter().map(Website::from).collect())
    }

    /// Overwrites the file with the full list, pretty-printed.
    pub fn save(&self, sites: &[Website]) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| RegistryError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(sites).map_err(|source| {
            RegistryError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Registers a new website. The URL is normalized to carry a scheme;
    /// an already-registered URL is rejected without mutating the file.
    pub fn add(&self, url: &str, pages: PageCount) -> Result<Website, RegistryError> {
        let url = url_model::normalize_url(url);
        let mut sites = self.load()?;
        if sites.iter().any(|site| site.url == url) {
            return Err(RegistryError::Duplicate { url });
        }

        let site = Website { url, pages };
        sites.push(site.clone());
        self.save(&sites)?;
        Ok(site)
    }

    /// Removes the website at a 1-based listing index.
    pub fn remove(&self, index: usize) -> Result<Website, RegistryError> {
        let mut sites = self.load()?;
        let slot = checked_slot(index, sites.len())?;
        let removed = sites.remove(slot);
        self.save(&sites)?;
        Ok(removed)
    }

    /// Changes the page count of the website at a 1-based listing index.
    pub fn set_pages(&self, index: usize, pages: PageCount) -> Result<Website, RegistryError> {
        let mut sites = self.load()?;
        let slot = checked_slot(index, sites.len())?;
        sites[slot].pages = pages;
        let updated = sites[slot].clone();
        self.save(&sites)?;
        Ok(updated)
    }
}

fn checked_slot(index: usize, len: usize) -> Result<usize, RegistryError> {
    if index == 0 || index > len {
        return Err(RegistryError::IndexOutOfRange { index, len });
    }
    Ok(index - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn registry_in(dir: &tempfile::TempDir) -> WebsiteRegistry {
        WebsiteRegistry::new(dir.path().join("websites.json"))
    }

    #[test]
    fn missing_file_is_an_empty_registry() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        assert!(registry.load().unwrap().is_empty());
    }

    #[test]
    fn legacy_bare_strings_upgrade_to_two_pages() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        fs::write(registry.path(), r#"["https://a.com", "https://b.com"]"#).unwrap();

        let sites = registry.load().unwrap();
        assert_eq!(
            sites,
            vec![
                Website {
                    url: "https://a.com".into(),
                    pages: PageCount::Two
                },
                Website {
                    url: "https://b.com".into(),
                    pages: PageCount::Two
                },
            ]
        );
    }

    #[test]
    fn mixed_legacy_and_current_entries_load() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        fs::write(
            registry.path(),
            r#"["https://old.com", {"url": "https://new.com", "pages": 1}]"#,
        )
        .unwrap();

        let sites = registry.load().unwrap();
        assert_eq!(sites[0].pages, PageCount::Two);
        assert_eq!(sites[1].url, "https://new.com");
        assert_eq!(sites[1].pages, PageCount::One);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        fs::write(
            registry.path(),
            r#"["https://a.com", {"url": "https://b.com", "pages": 1}]"#,
        )
        .unwrap();

        let loaded = registry.load().unwrap();
        registry.save(&loaded).unwrap();
        assert_eq!(registry.load().unwrap(), loaded);
    }

    #[test]
    fn malformed_json_is_a_fatal_load_error() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        fs::write(registry.path(), "{not json").unwrap();
        assert!(matches!(
            registry.load(),
            Err(RegistryError::Malformed { .. })
        ));
    }

    #[test]
    fn invalid_page_count_is_rejected_on_load() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        fs::write(registry.path(), r#"[{"url": "https://a.com", "pages": 3}]"#).unwrap();
        assert!(registry.load().is_err());
    }

    #[test]
    fn add_normalizes_the_scheme() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        let site = registry.add("example.com", PageCount::One).unwrap();
        assert_eq!(site.url, "https://example.com");
        assert_eq!(registry.load().unwrap(), vec![site]);
    }

    #[test]
    fn add_rejects_duplicates_without_mutating() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        registry.add("https://example.com", PageCount::Two).unwrap();

        let err = registry.add("example.com", PageCount::One).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));
        let sites = registry.load().unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].pages, PageCount::Two);
    }

    #[test]
    fn remove_out_of_range_leaves_the_registry_unchanged() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        registry.add("https://a.com", PageCount::Two).unwrap();

        for index in [0, 2, 99] {
            let err = registry.remove(index).unwrap_err();
            assert!(matches!(err, RegistryError::IndexOutOfRange { .. }));
        }
        assert_eq!(registry.load().unwrap().len(), 1);
    }

    #[test]
    fn remove_persists_immediately() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        registry.add("https://a.com", PageCount::Two).unwrap();
        registry.add("https://b.com", PageCount::One).unwrap();

        let removed = registry.remove(1).unwrap();
        assert_eq!(removed.url, "https://a.com");

        let sites = registry.load().unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].url, "https://b.com");
    }

    #[test]
    fn set_pages_updates_and_persists() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        registry.add("https://a.com", PageCount::Two).unwrap();

        let updated = registry.set_pages(1, PageCount::One).unwrap();
        assert_eq!(updated.pages, PageCount::One);
        assert_eq!(registry.load().unwrap()[0].pages, PageCount::One);

        let err = registry.set_pages(5, PageCount::Two).unwrap_err();
        assert!(matches!(err, RegistryError::IndexOutOfRange { .. }));
    }

    #[test]
    fn saved_files_never_contain_the_legacy_shape() {
        let dir = tempdir().unwrap();
        let registry = registry_in(&dir);
        fs::write(registry.path(), r#"["https://a.com"]"#).unwrap();

        let loaded = registry.load().unwrap();
        registry.save(&loaded).unwrap();

        let data = fs::read_to_string(registry.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert!(parsed[0].is_object());
        assert_eq!(parsed[0]["pages"], 2);
    }
}
