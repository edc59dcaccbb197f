use scroll_reveal::core::{
    local_progress, panel_layout, window_width, AnimatedPanel, Reveal, ScrollState, MAX_SCROLL,
    PANEL_COUNT,
};
use scroll_reveal::math::{Mat4, Vec3, Vec4};
use scroll_reveal::scene::{Camera, Mesh};

#[test]
fn test_camera_matrices() {
    let camera = Camera::new(
        Vec3::new(0.0, 0.0, 15.0),
        Vec3::new(0.0, 0.0, 0.0),
        16.0 / 9.0,
    );

    // Test that matrices are not identity
    assert_ne!(camera.view_matrix(), Mat4::identity());
    assert_ne!(camera.projection_matrix(), Mat4::identity());

    // Test that view projection is calculated
    let view_proj = camera.view_projection_matrix();
    assert_ne!(view_proj, Mat4::identity());

    // A point at the origin sits 15 units in front of this camera
    let origin = view_proj.multiply_vec4(&Vec4::new(0.0, 0.0, 0.0, 1.0));
    assert_eq!(origin.w, 15.0);
    assert_eq!(origin.x, 0.0);
    assert_eq!(origin.y, 0.0);
}

#[test]
fn test_aspect_ratio_update_is_idempotent() {
    let mut camera = Camera::new(
        Vec3::new(0.0, 0.0, 15.0),
        Vec3::new(0.0, 0.0, 0.0),
        16.0 / 9.0,
    );

    camera.set_aspect_ratio(4.0 / 3.0);
    let first = camera.projection_matrix();
    camera.set_aspect_ratio(4.0 / 3.0);
    let second = camera.projection_matrix();

    // Applying the same viewport twice must not drift the projection
    assert_eq!(first, second);

    // A different aspect ratio does change it
    camera.set_aspect_ratio(1.0);
    assert_ne!(camera.projection_matrix(), first);
}

#[test]
fn test_panel_mesh_creation() {
    let fill = Mesh::panel(4.0, 6.0, 0.5);
    assert_eq!(fill.vertices.len(), 8);
    assert_eq!(fill.indices.len(), 36);

    let outline = Mesh::panel_outline(4.0, 6.0, 0.5);
    assert_eq!(outline.vertices.len(), 8);
    assert_eq!(outline.indices.len(), 24);

    // Corners lie on the half-extents of the box
    for vertex in &fill.vertices {
        assert_eq!(vertex.position.x.abs(), 2.0);
        assert_eq!(vertex.position.y.abs(), 3.0);
        assert_eq!(vertex.position.z.abs(), 0.25);
    }

    // Every index addresses a corner
    for &index in fill.indices.iter().chain(&outline.indices) {
        assert!((index as usize) < fill.vertices.len());
    }
}

#[test]
fn test_translation_matrix() {
    let matrix = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
    let point = Vec4::new(1.0, 0.0, 0.0, 1.0);
    let result = matrix.multiply_vec4(&point);

    assert_eq!(result.x, 2.0);
    assert_eq!(result.y, 2.0);
    assert_eq!(result.z, 3.0);
    assert_eq!(result.w, 1.0);
}

#[test]
fn test_staggered_reveal_targets() {
    let width = window_width(MAX_SCROLL, PANEL_COUNT);
    let panels: Vec<AnimatedPanel> = panel_layout().into_iter().map(AnimatedPanel::new).collect();

    // progress = 10: panel 0 is halfway up its window, the rest wait
    let panel = &panels[0];
    let halfway = panel.target_y(local_progress(10.0, 0, width));
    assert_eq!(halfway, (panel.start_y + panel.rest_y) / 2.0);

    for (index, panel) in panels.iter().enumerate().skip(1) {
        assert_eq!(panel.target_y(local_progress(10.0, index, width)), panel.start_y);
    }

    // progress = 90: panels 0-3 fully at rest, panel 4 halfway
    for (index, panel) in panels.iter().enumerate().take(PANEL_COUNT - 1) {
        assert_eq!(panel.target_y(local_progress(90.0, index, width)), panel.rest_y);
    }
    let last = &panels[PANEL_COUNT - 1];
    assert_eq!(
        last.target_y(local_progress(90.0, PANEL_COUNT - 1, width)),
        (last.start_y + last.rest_y) / 2.0
    );
}

#[test]
fn test_full_scroll_brings_panels_to_rest() {
    let mut reveal = Reveal::new();
    reveal.start();
    reveal.adjust_scroll(MAX_SCROLL);

    for _ in 0..400 {
        reveal.tick();
    }

    for panel in reveal.panels() {
        assert!((panel.rest_y - panel.position.y).abs() < 1e-3);
        // x and z never move
        assert_eq!(panel.position.x, panel.descriptor.rest_position.x);
        assert_eq!(panel.position.z, 0.0);
    }
}

#[test]
fn test_easing_never_overshoots() {
    let mut reveal = Reveal::new();
    reveal.start();
    reveal.adjust_scroll(MAX_SCROLL);

    let mut previous: Vec<f32> = reveal.panels().iter().map(|p| p.position.y).collect();
    for _ in 0..200 {
        reveal.tick();
        for (panel, prev) in reveal.panels().iter().zip(&previous) {
            assert!(panel.position.y >= *prev);
            assert!(panel.position.y < panel.rest_y);
        }
        previous = reveal.panels().iter().map(|p| p.position.y).collect();
    }
}

#[test]
fn test_wheel_scenario_through_scroll_state() {
    let mut scroll = ScrollState::new();

    // deltaY = 50 at sensitivity 0.1 advances progress by 5
    scroll.adjust(50.0 * 0.1);
    assert_eq!(scroll.current_progress(), 5.0);

    // and stays clamped at the boundaries
    scroll.adjust(-1000.0);
    assert_eq!(scroll.current_progress(), 0.0);
    scroll.adjust(1000.0);
    assert_eq!(scroll.current_progress(), MAX_SCROLL);
}
