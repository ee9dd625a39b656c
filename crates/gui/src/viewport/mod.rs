//! 3D viewport: software-rendered model view with camera control.
//!
//! Each `ViewportPanel` owns an isolated camera/controller pair; the main
//! view and the picture-in-picture inset never share state, and a drag
//! started in one must not affect the other.

pub mod camera;
pub mod controller;
pub mod lighting;
pub mod mesh;
pub mod overlays;
pub mod picking;
pub mod projection;
pub mod render;

use egui::{Rect, Sense, Ui};
use glam::Vec2;

use crate::state::selection::Target;
use crate::state::AppState;
use camera::Camera;
use controller::CameraController;
use mesh::AnatomyMesh;
use projection::Viewport;
use render::{FrameInputs, PaintStats};

pub struct ViewportPanel {
    pub camera: Camera,
    pub controller: CameraController,
    /// Id salt so multiple panels coexist in one Ui
    label: &'static str,
    /// Smaller views skip the HUD overlays
    pub show_hud: bool,
}

impl ViewportPanel {
    pub fn new(label: &'static str) -> Self {
        Self {
            camera: Camera::new(),
            controller: CameraController::new(),
            label,
            show_hud: true,
        }
    }

    /// Reset to the home view; the explicit reset also re-arms auto-rotate.
    pub fn reset_camera(&mut self) {
        self.camera = Camera::new();
        self.controller = CameraController::new();
    }

    pub fn toggle_auto_rotate(&mut self) {
        let enabled = self.controller.auto_rotate_enabled();
        self.controller.set_auto_rotate(!enabled);
    }

    /// Handle input inside `rect`, advance the controller one frame, and
    /// repaint the view.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        rect: Rect,
        state: &mut AppState,
        mesh: &AnatomyMesh,
        region_colors: &[shared::Rgba],
    ) -> PaintStats {
        let response = ui.interact(rect, ui.id().with(self.label), Sense::click_and_drag());
        let local =
            |pos: egui::Pos2| -> Vec2 { Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y) };

        // ── Pointer → controller ─────────────────────────────
        let panning = response.dragged_by(egui::PointerButton::Secondary)
            || response.drag_started_by(egui::PointerButton::Secondary)
            || ui.input(|i| i.modifiers.shift);
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.controller.pointer_down(local(pos), panning);
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.controller
                    .pointer_move(local(pos), &mut self.camera, &state.settings.controls);
            }
        }
        if response.drag_stopped() {
            self.controller.pointer_up();
        }

        // ── Scroll / pinch zoom ─────────────────────────────
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.controller
                    .wheel(scroll, &mut self.camera, &state.settings.controls);
            }
            let pinch = ui.input(|i| i.zoom_delta());
            if (pinch - 1.0).abs() > 1e-3 {
                let controls = &state.settings.controls;
                self.camera.position.z =
                    (self.camera.position.z / pinch).clamp(controls.min_zoom, controls.max_zoom);
            }
        }

        // ── Inertia / auto-rotate step ─────────────────────────────
        self.controller
            .update(&mut self.camera, &state.settings.controls);

        // ── Hover and click picking ─────────────────────────────
        let viewport = Viewport::new(
            rect.width(),
            rect.height(),
            state.settings.viewport.near,
            state.settings.viewport.far,
        );
        let pick_params = state.settings.picking.to_params();
        if let Some(pos) = response.hover_pos() {
            let hit = picking::pick(local(pos), &self.camera, &viewport, mesh, &pick_params);
            state
                .selection
                .set_hovered(hit.as_ref().map(Target::from_hit));
        }
        if response.clicked() {
            let hit = response
                .interact_pointer_pos()
                .and_then(|pos| picking::pick(local(pos), &self.camera, &viewport, mesh, &pick_params));
            match hit {
                Some(hit) => state.selection.toggle(Target::from_hit(&hit)),
                None => state.selection.clear(),
            }
        }

        if !ui.is_rect_visible(rect) {
            return PaintStats::default();
        }

        // ── Paint ─────────────────────────────
        let painter = ui.painter_at(rect);
        let bg = state.settings.viewport.background_color;
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(bg[0], bg[1], bg[2]));

        let inputs = FrameInputs {
            region_colors,
            active_region: resolve_region(state, mesh),
            active_marker: resolve_marker(state, mesh),
        };
        let stats = render::paint_model(
            &painter,
            rect,
            &self.camera,
            mesh,
            &inputs,
            &state.settings,
        );

        // ── Overlays ─────────────────────────────
        if self.show_hud {
            if state.settings.viewport.show_orientation_labels {
                overlays::draw_orientation_labels(
                    &painter,
                    rect,
                    &self.camera,
                    &viewport,
                    mesh.bounding_radius(),
                );
            }
            if state.settings.viewport.show_camera_info {
                overlays::draw_camera_info(&painter, rect, &self.camera);
            }
        }

        stats
    }
}

fn resolve_region(state: &AppState, mesh: &AnatomyMesh) -> Option<usize> {
    state.selection.active().and_then(|t| match t.kind {
        picking::TargetKind::Region => mesh.region_by_key(&t.key),
        picking::TargetKind::Marker => None,
    })
}

fn resolve_marker(state: &AppState, mesh: &AnatomyMesh) -> Option<usize> {
    state.selection.active().and_then(|t| match t.kind {
        picking::TargetKind::Marker => mesh.marker_by_id(&t.key),
        picking::TargetKind::Region => None,
    })
}
