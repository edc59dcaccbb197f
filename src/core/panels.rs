use crate::math::{Vec2, Vec3};

/// Number of panels in the layout. The panel's index also selects its
/// scroll window, so the order of `panel_layout` is significant.
pub const PANEL_COUNT: usize = 5;

/// Vertical distance below the rest position where every panel starts.
pub const START_OFFSET: f32 = 20.0;

/// Static description of one panel: box dimensions and where it comes to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelDescriptor {
    pub dimensions: Vec3,
    pub rest_position: Vec2,
    pub start_offset: f32,
}

impl PanelDescriptor {
    #[must_use]
    pub const fn new(dimensions: Vec3, rest_position: Vec2) -> Self {
        Self {
            dimensions,
            rest_position,
            start_offset: START_OFFSET,
        }
    }
}

/// The fixed five-panel layout, ordered top-left to bottom-right.
#[must_use]
pub fn panel_layout() -> [PanelDescriptor; PANEL_COUNT] {
    [
        PanelDescriptor::new(Vec3::new(4.0, 6.0, 0.5), Vec2::new(-10.25, 3.25)), // Top left
        PanelDescriptor::new(Vec3::new(20.0, 2.0, 0.5), Vec2::new(2.25, 5.25)),  // Top right
        PanelDescriptor::new(Vec3::new(4.0, 4.0, 0.5), Vec2::new(-6.25, -2.25)), // Left
        PanelDescriptor::new(Vec3::new(6.0, 4.0, 0.5), Vec2::new(1.25, -2.25)),  // Bottom middle
        PanelDescriptor::new(Vec3::new(2.0, 4.0, 0.5), Vec2::new(5.75, -2.25)),  // Bottom right
    ]
}

/// A panel's live animation state. Created once at startup and mutated
/// every frame; panels are never added or removed during a session.
pub struct AnimatedPanel {
    pub descriptor: PanelDescriptor,
    pub position: Vec3,
    pub start_y: f32,
    pub rest_y: f32,
}

impl AnimatedPanel {
    #[must_use]
    pub fn new(descriptor: PanelDescriptor) -> Self {
        let rest_y = descriptor.rest_position.y;
        let start_y = rest_y - descriptor.start_offset;
        Self {
            descriptor,
            position: Vec3::new(descriptor.rest_position.x, start_y, 0.0),
            start_y,
            rest_y,
        }
    }

    /// Target height for a local reveal progress in [0, 1].
    #[must_use]
    pub fn target_y(&self, local_progress: f32) -> f32 {
        self.start_y + (self.rest_y - self.start_y) * local_progress
    }

    /// Exponential approach toward `target_y`. Never snaps onto the target;
    /// the remaining distance shrinks by `factor` each call.
    pub fn ease_toward(&mut self, target_y: f32, factor: f32) {
        self.position.y += (target_y - self.position.y) * factor;
    }
}
