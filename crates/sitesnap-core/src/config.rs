use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Time zone all dates, timestamps, and daily triggers are computed in.
pub const CAPTURE_TZ: chrono_tz::Tz = chrono_tz::US::Eastern;

/// Global configuration loaded from `~/.config/sitesnap/config.toml`.
///
/// Everything the capture pipeline treats as a fixed parameter lives here
/// rather than in code, so tests can run the engine with zeroed waits and
/// a scripted driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Root directory screenshots are written under.
    pub output_root: PathBuf,
    /// Browser window width in pixels.
    pub window_width: u32,
    /// Browser window height in pixels.
    pub window_height: u32,
    /// Desktop user-agent string the browser session reports.
    pub user_agent: String,
    /// Page navigation timeout per attempt, in seconds.
    pub nav_timeout_secs: u64,
    /// Maximum navigation attempts per site (including the first).
    pub nav_attempts: u32,
    /// Wait between failed navigation attempts, in seconds.
    pub nav_retry_delay_secs: u64,
    /// Settle wait after a successful navigation, in seconds.
    pub settle_delay_secs: u64,
    /// Wait after issuing a smooth scroll, in seconds.
    pub scroll_delay_secs: u64,
    /// Wait after the instant correction scroll, in seconds.
    pub scroll_correct_delay_secs: u64,
    /// Daily trigger hour in Eastern local time (0-23).
    pub daily_hour: u32,
    /// Daily trigger minute (0-59).
    pub daily_minute: u32,
    /// Scheduler poll tick, in milliseconds.
    pub tick_millis: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("screenshots"),
            window_width: 1920,
            window_height: 1080,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            nav_timeout_secs: 30,
            nav_attempts: 3,
            nav_retry_delay_secs: 5,
            settle_delay_secs: 10,
            scroll_delay_secs: 3,
            scroll_correct_delay_secs: 1,
            daily_hour: 6,
            daily_minute: 0,
            tick_millis: 1000,
        }
    }
}

impl CaptureConfig {
    pub fn nav_timeout(&self) -> Duration {
        Duration::from_secs(self.nav_timeout_secs)
    }

    pub fn nav_retry_delay(&self) -> Duration {
        Duration::from_secs(self.nav_retry_delay_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_secs(self.scroll_delay_secs)
    }

    pub fn scroll_correct_delay(&self) -> Duration {
        Duration::from_secs(self.scroll_correct_delay_secs)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sitesnap")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CaptureConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CaptureConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CaptureConfig = toml::from_str(&data)?;
    Ok(cfg)
}
