use crate::math::{Mat4, Vec3};

pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    fov_y: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl Camera {
    #[must_use]
    pub fn new(position: Vec3, target: Vec3, aspect_ratio: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_y: 50.0_f32.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 1000.0,
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(&self.position, &self.target, &self.up)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix().multiply(&self.view_matrix())
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
}

/// Indexed geometry. Panels use two meshes over the same eight corners:
/// a triangle-list fill and a line-list outline.
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    fn panel_corners(width: f32, height: f32, depth: f32) -> Vec<Vertex> {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let hd = depth / 2.0;

        // Front face corners first (counter-clockwise from bottom left),
        // then the back face in the same order.
        vec![
            Vertex {
                position: Vec3::new(-hw, -hh, hd),
            },
            Vertex {
                position: Vec3::new(hw, -hh, hd),
            },
            Vertex {
                position: Vec3::new(hw, hh, hd),
            },
            Vertex {
                position: Vec3::new(-hw, hh, hd),
            },
            Vertex {
                position: Vec3::new(-hw, -hh, -hd),
            },
            Vertex {
                position: Vec3::new(hw, -hh, -hd),
            },
            Vertex {
                position: Vec3::new(hw, hh, -hd),
            },
            Vertex {
                position: Vec3::new(-hw, hh, -hd),
            },
        ]
    }

    /// Solid box for one panel: 8 corners, 12 triangles.
    #[must_use]
    pub fn panel(width: f32, height: f32, depth: f32) -> Self {
        let vertices = Self::panel_corners(width, height, depth);

        let indices = vec![
            // Front face
            0, 1, 2, 0, 2, 3, // Back face
            5, 4, 7, 5, 7, 6, // Top face
            3, 2, 6, 3, 6, 7, // Bottom face
            4, 5, 1, 4, 1, 0, // Right face
            1, 5, 6, 1, 6, 2, // Left face
            4, 0, 3, 4, 3, 7,
        ];

        Self { vertices, indices }
    }

    /// Border of one panel as a line list: the 12 box edges.
    #[must_use]
    pub fn panel_outline(width: f32, height: f32, depth: f32) -> Self {
        let vertices = Self::panel_corners(width, height, depth);

        let indices = vec![
            // Front ring
            0, 1, 1, 2, 2, 3, 3, 0, // Back ring
            4, 5, 5, 6, 6, 7, 7, 4, // Connecting edges
            0, 4, 1, 5, 2, 6, 3, 7,
        ];

        Self { vertices, indices }
    }
}
