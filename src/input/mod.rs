use winit::event::MouseScrollDelta;

/// Pixels per line for wheel devices that report line deltas.
const LINE_HEIGHT: f32 = 20.0;

struct TouchAnchor {
    id: u64,
    y: f32,
}

/// Tracks pointer input and converts it into scroll deltas.
///
/// Wheel and touch carry their own sensitivity constants; the scroll
/// accumulator receives deltas already scaled by them.
pub struct InputState {
    touch_anchor: Option<TouchAnchor>,
    wheel_sensitivity: f32,
    touch_sensitivity: f32,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            touch_anchor: None,
            wheel_sensitivity: 0.1,
            touch_sensitivity: 0.1,
        }
    }

    /// Vertical wheel movement in pixels, positive when scrolling down.
    #[must_use]
    pub fn wheel_delta(&self, delta: MouseScrollDelta) -> f32 {
        match delta {
            // winit reports scrolling down as negative; flip so that
            // scrolling down advances the reveal.
            MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
            MouseScrollDelta::PixelDelta(position) => -position.y as f32,
        }
    }

    pub fn touch_started(&mut self, id: u64, y: f32) {
        self.touch_anchor = Some(TouchAnchor { id, y });
    }

    /// Vertical drag distance since the last touch point, positive when
    /// dragging up. Returns `None` for moves without a matching anchor
    /// (stray fingers, moves before any touch-start), which are ignored.
    pub fn touch_moved(&mut self, id: u64, y: f32) -> Option<f32> {
        let anchor = self.touch_anchor.as_mut()?;
        if anchor.id != id {
            return None;
        }
        let delta = anchor.y - y;
        anchor.y = y;
        Some(delta)
    }

    pub fn touch_ended(&mut self, id: u64) {
        if let Some(anchor) = &self.touch_anchor {
            if anchor.id == id {
                self.touch_anchor = None;
            }
        }
    }

    #[must_use]
    pub fn wheel_sensitivity(&self) -> f32 {
        self.wheel_sensitivity
    }

    #[must_use]
    pub fn touch_sensitivity(&self) -> f32 {
        self.touch_sensitivity
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_wheel_pixel_delta_flips_sign() {
        let input = InputState::new();
        let delta = input.wheel_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(
            0.0, -50.0,
        )));
        assert_eq!(delta, 50.0);
    }

    #[test]
    fn test_wheel_line_delta_scales_to_pixels() {
        let input = InputState::new();
        let delta = input.wheel_delta(MouseScrollDelta::LineDelta(0.0, -2.0));
        assert_eq!(delta, 2.0 * LINE_HEIGHT);
    }

    #[test]
    fn test_touch_drag_produces_deltas() {
        let mut input = InputState::new();
        input.touch_started(7, 400.0);
        assert_eq!(input.touch_moved(7, 390.0), Some(10.0));
        // Anchor follows the finger; successive moves yield incremental deltas
        assert_eq!(input.touch_moved(7, 395.0), Some(-5.0));
    }

    #[test]
    fn test_touch_move_without_anchor_is_ignored() {
        let mut input = InputState::new();
        assert_eq!(input.touch_moved(1, 100.0), None);

        input.touch_started(1, 100.0);
        // A different finger does not disturb the tracked one
        assert_eq!(input.touch_moved(2, 50.0), None);
        assert_eq!(input.touch_moved(1, 90.0), Some(10.0));
    }

    #[test]
    fn test_touch_end_clears_anchor() {
        let mut input = InputState::new();
        input.touch_started(1, 100.0);
        input.touch_ended(2);
        assert_eq!(input.touch_moved(1, 90.0), Some(10.0));
        input.touch_ended(1);
        assert_eq!(input.touch_moved(1, 80.0), None);
    }
}
