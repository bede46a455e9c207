//! Perspective camera, screen rays and GPU uniforms
//!
//! The scene frame is right-handed with +Z as the reference-plane normal, so
//! the default `up` is `DVec3::Z`.

use glam::{DMat4, DVec2, DVec3, Mat4};
use serde::{Deserialize, Serialize};

/// Position and look-target of a camera
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: DVec3,
    pub target: DVec3,
}

impl CameraPose {
    pub fn new(position: DVec3, target: DVec3) -> Self {
        Self { position, target }
    }

    /// Linear interpolation of both position and target
    pub fn lerp(&self, other: &CameraPose, t: f64) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }

    pub fn distance(&self) -> f64 {
        self.position.distance(self.target)
    }
}

/// Half-line in world space; `direction` is unit length
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Orbit-style perspective camera
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    /// Vertical field of view (radians)
    pub fov_y: f64,
    pub near: f64,
    pub far: f64,
    /// Viewport size in pixels
    pub viewport: DVec2,
}

impl Camera {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            position: pose.position,
            target: pose.target,
            up: DVec3::Z,
            fov_y: 50.0_f64.to_radians(),
            near: 0.01,
            far: 1e7,
            viewport: DVec2::new(1280.0, 720.0),
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.position = pose.position;
        self.target = pose.target;
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.viewport = DVec2::new(width, height);
        }
    }

    pub fn aspect(&self) -> f64 {
        self.viewport.x / self.viewport.y.max(1.0)
    }

    /// Forward direction; falls back to -Y when position equals target
    pub fn forward(&self) -> DVec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(DVec3::NEG_Y)
    }

    pub fn right(&self) -> DVec3 {
        let forward = self.forward();
        forward
            .cross(self.up)
            .try_normalize()
            .unwrap_or_else(|| forward.any_orthonormal_vector())
    }

    /// Camera-space up, orthogonal to forward
    pub fn true_up(&self) -> DVec3 {
        self.right().cross(self.forward())
    }

    /// Distance along the view axis
    pub fn depth_of(&self, world: DVec3) -> f64 {
        (world - self.position).dot(self.forward())
    }

    /// Screen pixels covered by one world unit at the given depth
    pub fn pixels_per_unit(&self, depth: f64) -> f64 {
        let depth = depth.max(self.near);
        self.viewport.y / (2.0 * depth * (self.fov_y / 2.0).tan())
    }

    /// Ray through a pixel; origin at the camera, (0,0) is top-left
    pub fn screen_ray(&self, pointer: DVec2) -> Ray {
        let ndc_x = 2.0 * pointer.x / self.viewport.x.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * pointer.y / self.viewport.y.max(1.0);
        let half_h = (self.fov_y / 2.0).tan();
        let half_w = half_h * self.aspect();

        let direction = (self.forward()
            + self.right() * (ndc_x * half_w)
            + self.true_up() * (ndc_y * half_h))
            .normalize();

        Ray { origin: self.position, direction }
    }

    /// Project a world point to pixels; None behind the camera
    pub fn project(&self, world: DVec3) -> Option<DVec2> {
        let rel = world - self.position;
        let depth = rel.dot(self.forward());
        if depth <= self.near {
            return None;
        }
        let half_h = (self.fov_y / 2.0).tan();
        let half_w = half_h * self.aspect();
        let ndc_x = rel.dot(self.right()) / (depth * half_w);
        let ndc_y = rel.dot(self.true_up()) / (depth * half_h);
        Some(DVec2::new(
            (ndc_x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc_y) * 0.5 * self.viewport.y,
        ))
    }

    /// Rotate the camera around its target (drag input)
    pub fn orbit(&mut self, yaw: f64, pitch: f64) {
        let offset = self.position - self.target;
        let r = offset.length();
        if r <= f64::EPSILON {
            return;
        }
        let mut azimuth = offset.y.atan2(offset.x) + yaw;
        let elevation = ((offset.z / r).clamp(-1.0, 1.0).asin() + pitch)
            .clamp(-89.0_f64.to_radians(), 89.0_f64.to_radians());
        azimuth = azimuth.rem_euclid(std::f64::consts::TAU);
        self.position = self.target
            + DVec3::new(
                r * elevation.cos() * azimuth.cos(),
                r * elevation.cos() * azimuth.sin(),
                r * elevation.sin(),
            );
    }

    /// Scale distance to target; factor < 1 moves closer
    pub fn zoom(&mut self, factor: f64, min_distance: f64, max_distance: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let offset = self.position - self.target;
        let r = (offset.length() * factor).clamp(min_distance, max_distance);
        if let Some(dir) = offset.try_normalize() {
            self.position = self.target + dir * r;
        }
    }

    /// View matrix (world to camera)
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }
}

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad0: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        let view = camera.view_matrix().as_mat4();
        let proj = camera.projection_matrix().as_mat4();
        let view_proj: Mat4 = proj * view;

        Self {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            view_proj: view_proj.to_cols_array_2d(),
            position: camera.position.as_vec3().to_array(),
            _pad0: 0.0,
        }
    }
}
