//! Daily trigger computation in the fixed capture time zone.

use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::Tz;

/// First occurrence of `hour:minute` strictly after `now`, in `now`'s zone.
///
/// A wall time made ambiguous by a DST transition resolves to its earliest
/// instant; a wall time that does not exist that day (spring-forward gap)
/// pushes the trigger to the next day.
pub fn next_trigger(now: DateTime<Tz>, hour: u32, minute: u32) -> DateTime<Tz> {
    debug_assert!(hour < 24 && minute < 60);

    let tz = now.timezone();
    let mut date = now.date_naive();
    loop {
        if let Some(naive) = date.and_hms_opt(hour, minute, 0) {
            if let Some(candidate) = tz.from_local_datetime(&naive).earliest() {
                if candidate > now {
                    return candidate;
                }
            }
        }
        date += Duration::days(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CAPTURE_TZ;

    fn eastern(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Tz> {
        CAPTURE_TZ.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn fires_later_the_same_day_when_still_ahead() {
        let now = eastern(2026, 1, 15, 4, 30, 0);
        assert_eq!(next_trigger(now, 6, 0), eastern(2026, 1, 15, 6, 0, 0));
    }

    #[test]
    fn rolls_to_tomorrow_once_the_time_has_passed() {
        let now = eastern(2026, 1, 15, 9, 0, 0);
        assert_eq!(next_trigger(now, 6, 0), eastern(2026, 1, 16, 6, 0, 0));
    }

    #[test]
    fn an_exact_hit_schedules_the_next_day() {
        let now = eastern(2026, 1, 15, 6, 0, 0);
        assert_eq!(next_trigger(now, 6, 0), eastern(2026, 1, 16, 6, 0, 0));
    }

    #[test]
    fn rolls_across_month_boundaries() {
        let now = eastern(2026, 1, 31, 23, 59, 0);
        assert_eq!(next_trigger(now, 6, 0), eastern(2026, 2, 1, 6, 0, 0));
    }

    #[test]
    fn spring_forward_gap_skips_to_the_next_day() {
        // 2026-03-08 02:30 does not exist in US Eastern.
        let now = eastern(2026, 3, 8, 1, 0, 0);
        assert_eq!(next_trigger(now, 2, 30), eastern(2026, 3, 9, 2, 30, 0));
    }
}
