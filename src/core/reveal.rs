use super::panels::{panel_layout, AnimatedPanel};
use super::scroll::ScrollState;

/// Per-tick fraction of the remaining distance each panel covers.
pub const EASING_FACTOR: f32 = 0.1;

/// Width of one panel's reveal window within the scroll range.
#[must_use]
pub fn window_width(max_scroll: f32, panel_count: usize) -> f32 {
    max_scroll / panel_count as f32
}

/// Local reveal progress in [0, 1] for the panel at `index`.
///
/// Panel `i` only starts moving once global progress passes `i * width`
/// and completes exactly at `(i + 1) * width`; adjacent windows tile the
/// scroll range with no gap or overlap.
#[must_use]
pub fn local_progress(progress: f32, index: usize, window_width: f32) -> f32 {
    (progress - index as f32 * window_width).clamp(0.0, window_width) / window_width
}

/// Owns the animation state: the panels, the scroll accumulator and the
/// running flag. Input handlers feed `adjust_scroll`; the frame driver
/// calls `tick` once per display refresh.
pub struct Reveal {
    panels: Vec<AnimatedPanel>,
    scroll: ScrollState,
    running: bool,
}

impl Reveal {
    #[must_use]
    pub fn new() -> Self {
        Self {
            panels: panel_layout().into_iter().map(AnimatedPanel::new).collect(),
            scroll: ScrollState::new(),
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.scroll.current_progress()
    }

    pub fn adjust_scroll(&mut self, delta: f32) {
        self.scroll.adjust(delta);
    }

    #[must_use]
    pub fn panels(&self) -> &[AnimatedPanel] {
        &self.panels
    }

    /// Ease every panel toward its mapped target. No-op once stopped, so
    /// embedding contexts can terminate the animation deterministically.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        let width = window_width(self.scroll.max_scroll(), self.panels.len());
        let progress = self.scroll.current_progress();
        for (index, panel) in self.panels.iter_mut().enumerate() {
            let target = panel.target_y(local_progress(progress, index, width));
            panel.ease_toward(target, EASING_FACTOR);
        }
    }
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MAX_SCROLL, PANEL_COUNT};

    #[test]
    fn test_window_width_tiles_range() {
        let width = window_width(MAX_SCROLL, PANEL_COUNT);
        assert_eq!(width, 20.0);
        assert_eq!(width * PANEL_COUNT as f32, MAX_SCROLL);
    }

    #[test]
    fn test_local_progress_endpoints() {
        let width = window_width(MAX_SCROLL, PANEL_COUNT);
        for index in 0..PANEL_COUNT {
            assert_eq!(local_progress(0.0, index, width), 0.0);
            assert_eq!(local_progress(MAX_SCROLL, index, width), 1.0);
        }
    }

    #[test]
    fn test_windows_are_staggered() {
        let width = window_width(MAX_SCROLL, PANEL_COUNT);
        // At the boundary between windows i and i+1, panel i has just
        // finished and panel i+1 has not started.
        for index in 0..PANEL_COUNT - 1 {
            let boundary = (index + 1) as f32 * width;
            assert_eq!(local_progress(boundary, index, width), 1.0);
            assert_eq!(local_progress(boundary, index + 1, width), 0.0);
        }
    }

    #[test]
    fn test_local_progress_monotonic() {
        let width = window_width(MAX_SCROLL, PANEL_COUNT);
        for index in 0..PANEL_COUNT {
            let mut previous = local_progress(0.0, index, width);
            let mut p = 0.0;
            while p <= MAX_SCROLL {
                let current = local_progress(p, index, width);
                assert!(current >= previous);
                previous = current;
                p += 1.0;
            }
        }
    }

    #[test]
    fn test_midway_scenario() {
        let width = window_width(MAX_SCROLL, PANEL_COUNT);
        // progress = 10: panel 0 halfway through its window, rest untouched
        assert_eq!(local_progress(10.0, 0, width), 0.5);
        for index in 1..PANEL_COUNT {
            assert_eq!(local_progress(10.0, index, width), 0.0);
        }
        // progress = 90: panels 0-3 done, panel 4 halfway
        for index in 0..PANEL_COUNT - 1 {
            assert_eq!(local_progress(90.0, index, width), 1.0);
        }
        assert_eq!(local_progress(90.0, 4, width), 0.5);
    }

    #[test]
    fn test_tick_moves_panels_toward_rest() {
        let mut reveal = Reveal::new();
        reveal.start();
        reveal.adjust_scroll(MAX_SCROLL);
        for _ in 0..300 {
            reveal.tick();
        }
        for panel in reveal.panels() {
            let gap = (panel.rest_y - panel.position.y).abs();
            assert!(gap < 0.01, "panel should be close to rest, gap {gap}");
        }
    }

    #[test]
    fn test_tick_is_noop_when_stopped() {
        let mut reveal = Reveal::new();
        reveal.start();
        reveal.adjust_scroll(MAX_SCROLL);
        reveal.tick();
        reveal.stop();

        let positions: Vec<f32> = reveal.panels().iter().map(|p| p.position.y).collect();
        reveal.tick();
        let after: Vec<f32> = reveal.panels().iter().map(|p| p.position.y).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_scroll_stays_bounded() {
        let mut reveal = Reveal::new();
        reveal.start();
        reveal.adjust_scroll(-500.0);
        assert_eq!(reveal.progress(), 0.0);
        reveal.adjust_scroll(10_000.0);
        assert_eq!(reveal.progress(), MAX_SCROLL);
    }
}
