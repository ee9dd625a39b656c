use glam::{Mat3, Vec3};

use super::projection::{self, ProjectedPoint, Viewport};

/// Orbit camera for a single view.
///
/// Each independently controlled view (main, picture-in-picture) owns its
/// own camera; two interactive views never share one.
pub struct Camera {
    /// View-space offset applied after rotation: x/y pan in the screen
    /// plane, z distance from the model origin
    pub position: Vec3,
    /// Horizontal rotation angle (radians), applied first
    pub yaw: f32,
    /// Vertical rotation angle (radians), clamped to avoid gimbal flip
    pub pitch: f32,
    /// Screen-plane rotation angle (radians), applied last
    pub roll: f32,
    /// Projection scale factor: screen pixels per mesh unit at distance 1
    pub fov: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 6.0),
            yaw: 0.6,
            pitch: 0.4,
            roll: 0.0,
            fov: 600.0,
        }
    }

    /// World-to-view rotation. Fixed order: yaw, then pitch, then roll.
    pub fn view_rotation(&self) -> Mat3 {
        Mat3::from_rotation_z(self.roll)
            * Mat3::from_rotation_x(self.pitch)
            * Mat3::from_rotation_y(self.yaw)
    }

    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(
            -std::f32::consts::FRAC_PI_2,
            std::f32::consts::FRAC_PI_2,
        );
    }

    /// Pan in the screen plane (view-space x/y).
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Exponential zoom: each unit of `delta` scales the distance, so the
    /// step feels constant regardless of how far out the camera is.
    pub fn zoom(&mut self, delta: f32, min_zoom: f32, max_zoom: f32) {
        self.position.z = (self.position.z * (1.0 - delta)).clamp(min_zoom, max_zoom);
    }

    /// Distance from the model origin.
    pub fn distance(&self) -> f32 {
        self.position.z
    }

    /// Project a mesh-space point for overlay drawing (labels, HUDs).
    pub fn project(&self, point: Vec3, viewport: &Viewport) -> ProjectedPoint {
        projection::project(point, self, viewport)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_clamped() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.rotate(0.0, 0.3);
        }
        assert!(camera.pitch <= std::f32::consts::FRAC_PI_2);
        for _ in 0..200 {
            camera.rotate(0.0, -0.3);
        }
        assert!(camera.pitch >= -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = Camera::new();
        for _ in 0..50 {
            camera.zoom(0.5, 1.5, 30.0);
        }
        assert!((camera.distance() - 1.5).abs() < 1e-6);
        for _ in 0..50 {
            camera.zoom(-0.5, 1.5, 30.0);
        }
        assert!((camera.distance() - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation_is_identity() {
        let mut camera = Camera::new();
        camera.yaw = 0.0;
        camera.pitch = 0.0;
        camera.roll = 0.0;
        let m = camera.view_rotation();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!((m * p - p).length() < 1e-6);
    }
}
