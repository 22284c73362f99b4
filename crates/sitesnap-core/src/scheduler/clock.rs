//! Time source seam for the daily loop.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::time::Duration;

use crate::config::CAPTURE_TZ;

/// Wall-clock reads and cooperative sleeps, injectable so tests can run
/// the daily loop against a fake clock.
pub trait Clock {
    fn now(&self) -> DateTime<Tz>;
    fn sleep(&self, duration: Duration);
}

/// Real wall clock in the fixed capture time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&CAPTURE_TZ)
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
