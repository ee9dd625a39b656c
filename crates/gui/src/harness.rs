//! Headless harness for driving one view of the rendering pipeline.
//!
//! Runs the controller state machine and the geometry stages of the render
//! pass without a window, so integration tests can feed synthetic pointer
//! streams and inspect camera state and paint order.

use glam::{Vec2, Vec3};
use shared::ModelDescription;

use crate::state::settings::AppSettings;
use crate::viewport::camera::Camera;
use crate::viewport::controller::CameraController;
use crate::viewport::mesh::AnatomyMesh;
use crate::viewport::picking::{self, PickHit};
use crate::viewport::projection::{self, ProjectedPoint, Viewport};
use crate::viewport::render::{self, FaceRecord};

/// One headless view: mesh + camera + controller + settings.
pub struct ViewHarness {
    pub mesh: AnatomyMesh,
    pub camera: Camera,
    pub controller: CameraController,
    pub settings: AppSettings,
    width: f32,
    height: f32,
}

impl ViewHarness {
    /// Build a harness over a model description. Fails like model load
    /// fails: all-or-nothing.
    pub fn new(desc: &ModelDescription) -> Result<Self, String> {
        Ok(Self {
            mesh: AnatomyMesh::build(desc)?,
            camera: Camera::new(),
            controller: CameraController::new(),
            settings: AppSettings::default(),
            width: 800.0,
            height: 600.0,
        })
    }

    /// Axis-aligned camera at the given distance, no rotation.
    pub fn with_straight_camera(mut self, distance: f32) -> Self {
        self.camera.yaw = 0.0;
        self.camera.pitch = 0.0;
        self.camera.roll = 0.0;
        self.camera.position = Vec3::new(0.0, 0.0, distance);
        self
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.width,
            self.height,
            self.settings.viewport.near,
            self.settings.viewport.far,
        )
    }

    // ── Input ────────────────────────────────────────────────

    pub fn begin_drag(&mut self, pos: Vec2, panning: bool) {
        self.controller.pointer_down(pos, panning);
    }

    pub fn drag_to(&mut self, pos: Vec2) {
        self.controller
            .pointer_move(pos, &mut self.camera, &self.settings.controls);
    }

    pub fn end_drag(&mut self) {
        self.controller.pointer_up();
    }

    /// A complete rotate drag from the view center by `(dx, dy)` pixels.
    pub fn drag_by(&mut self, dx: f32, dy: f32) {
        let start = Vec2::new(self.width * 0.5, self.height * 0.5);
        self.begin_drag(start, false);
        self.drag_to(start + Vec2::new(dx, dy));
        self.end_drag();
    }

    /// A complete pan drag from the view center by `(dx, dy)` pixels.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        let start = Vec2::new(self.width * 0.5, self.height * 0.5);
        self.begin_drag(start, true);
        self.drag_to(start + Vec2::new(dx, dy));
        self.end_drag();
    }

    pub fn wheel(&mut self, scroll: f32) {
        self.controller
            .wheel(scroll, &mut self.camera, &self.settings.controls);
    }

    /// Advance idle frames (inertia decay, auto-rotation).
    pub fn step_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.controller
                .update(&mut self.camera, &self.settings.controls);
        }
    }

    // ── Pipeline reads ───────────────────────────────────────

    /// Faces surviving culling, sorted back-to-front.
    pub fn visible_faces(&self) -> Vec<FaceRecord> {
        render::build_face_records(&self.mesh, &self.camera, &self.viewport())
    }

    pub fn project(&self, point: Vec3) -> ProjectedPoint {
        projection::project(point, &self.camera, &self.viewport())
    }

    pub fn pick_at(&self, x: f32, y: f32) -> Option<PickHit> {
        picking::pick(
            Vec2::new(x, y),
            &self.camera,
            &self.viewport(),
            &self.mesh,
            &self.settings.picking.to_params(),
        )
    }
}
