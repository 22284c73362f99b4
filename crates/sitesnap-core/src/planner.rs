//! Scroll position planning.
//!
//! Pure geometry: given page and viewport heights and the configured page
//! count, produce the ordered scroll offsets to capture.

use crate::registry::PageCount;

/// Vertical overlap between two captured viewports, as a fraction of the
/// viewport height.
const VIEWPORT_OVERLAP: f64 = 0.2;

/// Computes the ordered scroll offsets for one capture run.
///
/// One page captures the top of the page only. Two pages capture the top
/// plus a second stop at 80% of the viewport height. The second stop is
/// anchored to the viewport rather than `_total_height`, so tall pages are
/// not covered proportionally.
pub fn plan_scroll_offsets(
    _total_height: u32,
    viewport_height: u32,
    pages: PageCount,
) -> Vec<u32> {
    match pages {
        PageCount::One => vec![0],
        PageCount::Two => {
            let second = (f64::from(viewport_height) * (1.0 - VIEWPORT_OVERLAP)).round() as u32;
            vec![0, second]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_page_is_the_top_of_the_page() {
        assert_eq!(plan_scroll_offsets(5000, 1080, PageCount::One), vec![0]);
        assert_eq!(plan_scroll_offsets(700, 1080, PageCount::One), vec![0]);
        assert_eq!(plan_scroll_offsets(1, 1, PageCount::One), vec![0]);
    }

    #[test]
    fn two_pages_overlap_by_twenty_percent_of_the_viewport() {
        assert_eq!(plan_scroll_offsets(4000, 1080, PageCount::Two), vec![0, 864]);
        assert_eq!(plan_scroll_offsets(4000, 1000, PageCount::Two), vec![0, 800]);
    }

    #[test]
    fn second_offset_ignores_total_page_height() {
        for total in [1080, 5000, 100_000] {
            assert_eq!(
                plan_scroll_offsets(total, 1080, PageCount::Two),
                vec![0, 864]
            );
        }
    }

    #[test]
    fn second_offset_rounds_to_the_nearest_pixel() {
        // 1083 * 0.8 = 866.4
        assert_eq!(plan_scroll_offsets(4000, 1083, PageCount::Two), vec![0, 866]);
        // 1084 * 0.8 = 867.2
        assert_eq!(plan_scroll_offsets(4000, 1084, PageCount::Two), vec![0, 867]);
    }
}
