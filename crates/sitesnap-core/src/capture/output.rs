//! Output layout: `<root>/<MM-DD>/<domain>/page<N>_<HHMMSS>.png`.

use chrono::DateTime;
use chrono_tz::Tz;
use std::path::{Path, PathBuf};

use crate::url_model;

/// Directory for one site's shots on one day: `<root>/<MM-DD>/<domain>`.
pub fn site_output_dir(root: &Path, at: DateTime<Tz>, url: &str) -> PathBuf {
    root.join(at.format("%m-%d").to_string())
        .join(url_model::derive_domain(url))
}

/// Filename for one shot. `index` is 1-based; the timestamp is the capture
/// start time, shared by every shot of the run.
pub fn shot_filename(index: usize, at: DateTime<Tz>) -> String {
    format!("page{index}_{}.png", at.format("%H%M%S"))
}
