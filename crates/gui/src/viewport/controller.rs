//! Camera interaction state machine: drag-rotate, pan, zoom, inertia,
//! idle auto-rotation.
//!
//! The controller is UI-toolkit-free: the viewport panel translates pointer
//! events inside its rect into these calls, so the same machine runs under
//! the headless test harness. Events outside a view's rect never reach it.

use glam::Vec2;

use super::camera::Camera;
use crate::state::settings::ControlSettings;

/// Current drag state of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// No button held; inertia and auto-rotate may run
    Idle,
    Rotating,
    Panning,
}

/// Per-view transient interaction state. One controller per camera.
pub struct CameraController {
    mode: DragMode,
    last_pos: Vec2,
    /// Residual rotational velocity (yaw/pitch per frame) carried after a
    /// drag ends
    velocity: Vec2,
    auto_rotate: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            mode: DragMode::Idle,
            last_pos: Vec2::ZERO,
            velocity: Vec2::ZERO,
            auto_rotate: true,
        }
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn auto_rotate_enabled(&self) -> bool {
        self.auto_rotate
    }

    /// Explicit reset path — nothing re-enables auto-rotate automatically.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// A drag begins. `panning` when a modifier key or secondary button is
    /// held. Velocity resets and user control wins over auto-rotate.
    pub fn pointer_down(&mut self, pos: Vec2, panning: bool) {
        self.mode = if panning {
            DragMode::Panning
        } else {
            DragMode::Rotating
        };
        self.last_pos = pos;
        self.velocity = Vec2::ZERO;
        self.auto_rotate = false;
    }

    pub fn pointer_move(&mut self, pos: Vec2, camera: &mut Camera, settings: &ControlSettings) {
        let delta = pos - self.last_pos;
        self.last_pos = pos;

        match self.mode {
            DragMode::Rotating => {
                let d = delta * settings.rotate_speed;
                camera.rotate(d.x, d.y);
                self.velocity = d;
            }
            DragMode::Panning => {
                // Scaled by distance so panning feels constant at any zoom
                let k = settings.pan_speed * camera.distance();
                camera.pan(delta.x * k, -delta.y * k);
            }
            DragMode::Idle => {}
        }
    }

    /// Drag ends; the last per-frame rotation carries on as inertia.
    pub fn pointer_up(&mut self) {
        self.mode = DragMode::Idle;
    }

    pub fn wheel(&mut self, scroll: f32, camera: &mut Camera, settings: &ControlSettings) {
        camera.zoom(
            scroll * settings.zoom_speed,
            settings.min_zoom,
            settings.max_zoom,
        );
    }

    /// Per-frame idle step: apply and decay inertia, then auto-rotate once
    /// the residual velocity is fully gone. Velocity snaps to exactly zero
    /// below the epsilon so there is no asymptotic drift.
    pub fn update(&mut self, camera: &mut Camera, settings: &ControlSettings) {
        if self.mode != DragMode::Idle {
            return;
        }

        if self.velocity != Vec2::ZERO {
            camera.rotate(self.velocity.x, self.velocity.y);
            self.velocity *= settings.damping;
            if self.velocity.length() < settings.velocity_epsilon {
                self.velocity = Vec2::ZERO;
            }
        } else if self.auto_rotate {
            camera.rotate(settings.auto_rotate_step, 0.0);
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(
        ctrl: &mut CameraController,
        camera: &mut Camera,
        settings: &ControlSettings,
        from: Vec2,
        to: Vec2,
        panning: bool,
    ) {
        ctrl.pointer_down(from, panning);
        ctrl.pointer_move(to, camera, settings);
        ctrl.pointer_up();
    }

    #[test]
    fn test_drag_rotates_by_delta_times_speed() {
        let mut ctrl = CameraController::new();
        let mut camera = Camera::new();
        camera.yaw = 0.0;
        let settings = ControlSettings {
            rotate_speed: 0.005,
            ..Default::default()
        };
        drag(
            &mut ctrl,
            &mut camera,
            &settings,
            Vec2::new(10.0, 10.0),
            Vec2::new(110.0, 10.0),
            false,
        );
        assert!((camera.yaw - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_drag_start_zeroes_velocity_and_disables_auto_rotate() {
        let mut ctrl = CameraController::new();
        assert!(ctrl.auto_rotate_enabled());
        ctrl.pointer_down(Vec2::ZERO, false);
        assert_eq!(ctrl.velocity(), Vec2::ZERO);
        assert!(!ctrl.auto_rotate_enabled());
        ctrl.pointer_up();
        // Stays off until explicitly reset
        assert!(!ctrl.auto_rotate_enabled());
        ctrl.set_auto_rotate(true);
        assert!(ctrl.auto_rotate_enabled());
    }

    #[test]
    fn test_inertia_decays_to_exact_zero() {
        let mut ctrl = CameraController::new();
        let mut camera = Camera::new();
        let settings = ControlSettings {
            rotate_speed: 0.005,
            damping: 0.95,
            velocity_epsilon: 1e-4,
            auto_rotate_step: 0.0,
            ..Default::default()
        };
        // Drag fast enough to leave velocity 0.5 rad/frame
        ctrl.pointer_down(Vec2::ZERO, false);
        ctrl.pointer_move(Vec2::new(100.0, 0.0), &mut camera, &settings);
        ctrl.pointer_up();
        assert!((ctrl.velocity().x - 0.5).abs() < 1e-6);

        // 0.5 * 0.95^n < 1e-4 within ceil(ln(2e-4)/ln(0.95)) = 167 frames
        let mut frames = 0;
        let mut last = ctrl.velocity().length();
        while ctrl.velocity() != Vec2::ZERO {
            ctrl.update(&mut camera, &settings);
            let len = ctrl.velocity().length();
            assert!(len < last || len == 0.0, "velocity must strictly decrease");
            last = len;
            frames += 1;
            assert!(frames < 200, "inertia failed to settle");
        }
        assert_eq!(ctrl.velocity(), Vec2::ZERO);
        assert!(frames >= 100, "decayed suspiciously fast: {frames} frames");
    }

    #[test]
    fn test_auto_rotate_waits_for_inertia() {
        let mut ctrl = CameraController::new();
        let mut camera = Camera::new();
        camera.yaw = 0.0;
        let settings = ControlSettings {
            auto_rotate_step: 0.01,
            ..Default::default()
        };
        // Fresh controller with no velocity: idle frames add yaw
        ctrl.update(&mut camera, &settings);
        assert!((camera.yaw - 0.01).abs() < 1e-6);

        // After a drag, auto-rotate is off even when velocity has settled
        ctrl.pointer_down(Vec2::ZERO, false);
        ctrl.pointer_up();
        let yaw = camera.yaw;
        ctrl.update(&mut camera, &settings);
        assert_eq!(camera.yaw, yaw);
    }

    #[test]
    fn test_pan_moves_position_not_rotation() {
        let mut ctrl = CameraController::new();
        let mut camera = Camera::new();
        camera.yaw = 0.0;
        camera.pitch = 0.0;
        let settings = ControlSettings::default();
        drag(
            &mut ctrl,
            &mut camera,
            &settings,
            Vec2::ZERO,
            Vec2::new(50.0, -20.0),
            true,
        );
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
        assert!(camera.position.x > 0.0);
        assert!(camera.position.y > 0.0);
    }

    #[test]
    fn test_pan_speed_scales_with_distance() {
        let settings = ControlSettings::default();
        let mut near_cam = Camera::new();
        near_cam.position.z = 2.0;
        let mut far_cam = Camera::new();
        far_cam.position.z = 20.0;

        let mut ctrl = CameraController::new();
        drag(
            &mut ctrl,
            &mut near_cam,
            &settings,
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            true,
        );
        let mut ctrl = CameraController::new();
        drag(
            &mut ctrl,
            &mut far_cam,
            &settings,
            Vec2::ZERO,
            Vec2::new(100.0, 0.0),
            true,
        );
        assert!((far_cam.position.x / near_cam.position.x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_wheel_zoom_is_exponential() {
        let mut ctrl = CameraController::new();
        let mut camera = Camera::new();
        let settings = ControlSettings::default();
        let d0 = camera.distance();
        ctrl.wheel(10.0, &mut camera, &settings);
        let d1 = camera.distance();
        ctrl.wheel(10.0, &mut camera, &settings);
        let d2 = camera.distance();
        // Equal steps multiply the distance by the same factor
        assert!((d1 / d0 - d2 / d1).abs() < 1e-4);
    }
}
