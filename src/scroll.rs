const SCROLLED_THRESHOLD: f64 = 50.0;
const HIDE_HEADER_THRESHOLD: f64 = 100.0;
const SCROLL_TOP_THRESHOLD: f64 = 20.0;
const MOBILE_BREAKPOINT: f64 = 768.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollView {
    pub scrolled: bool,
    pub header_hidden: bool,
    pub progress_percent: f64,
    pub show_scroll_top: bool,
}

/// Derives header, progress bar and back-to-top state from scroll events.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    last_scroll_top: f64,
}

impl ScrollTracker {
    pub fn observe(&mut self, scroll_top: f64, viewport_width: f64, scrollable_height: f64) -> ScrollView {
        let scrolling_down = scroll_top > self.last_scroll_top;
        let header_hidden =
            viewport_width < MOBILE_BREAKPOINT && scrolling_down && scroll_top > HIDE_HEADER_THRESHOLD;
        self.last_scroll_top = scroll_top;

        ScrollView {
            scrolled: scroll_top > SCROLLED_THRESHOLD,
            header_hidden,
            progress_percent: progress_percent(scroll_top, scrollable_height),
            show_scroll_top: scroll_top > SCROLL_TOP_THRESHOLD,
        }
    }
}

fn progress_percent(scroll_top: f64, scrollable_height: f64) -> f64 {
    if scrollable_height <= 0.0 {
        return 0.0;
    }

    (scroll_top / scrollable_height * 100.0).clamp(0.0, 100.0)
}

/// The nav `href` that should be active while `section_id` is in view.
pub fn active_link(section_id: &str) -> Option<String> {
    let id = section_id.trim();
    if id.is_empty() {
        return None;
    }
    Some(format!("#{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_marks_scrolled_past_threshold() {
        let mut tracker = ScrollTracker::default();
        assert!(!tracker.observe(50.0, 1280.0, 2000.0).scrolled);
        assert!(tracker.observe(51.0, 1280.0, 2000.0).scrolled);
    }

    #[test]
    fn mobile_header_hides_when_scrolling_down_and_returns_on_scroll_up() {
        let mut tracker = ScrollTracker::default();

        assert!(!tracker.observe(80.0, 400.0, 2000.0).header_hidden);
        assert!(tracker.observe(150.0, 400.0, 2000.0).header_hidden);
        assert!(!tracker.observe(140.0, 400.0, 2000.0).header_hidden);
    }

    #[test]
    fn desktop_header_never_hides() {
        let mut tracker = ScrollTracker::default();
        tracker.observe(100.0, 1280.0, 2000.0);
        assert!(!tracker.observe(900.0, 1280.0, 2000.0).header_hidden);
    }

    #[test]
    fn progress_is_clamped_and_safe_on_short_pages() {
        let mut tracker = ScrollTracker::default();
        assert_eq!(tracker.observe(500.0, 1280.0, 1000.0).progress_percent, 50.0);
        assert_eq!(tracker.observe(1500.0, 1280.0, 1000.0).progress_percent, 100.0);
        assert_eq!(tracker.observe(0.0, 1280.0, 0.0).progress_percent, 0.0);
    }

    #[test]
    fn scroll_top_button_appears_after_small_offset() {
        let mut tracker = ScrollTracker::default();
        assert!(!tracker.observe(20.0, 1280.0, 1000.0).show_scroll_top);
        assert!(tracker.observe(21.0, 1280.0, 1000.0).show_scroll_top);
    }

    #[test]
    fn active_link_targets_section_anchor() {
        assert_eq!(active_link("skills").as_deref(), Some("#skills"));
        assert_eq!(active_link("  "), None);
    }
}
