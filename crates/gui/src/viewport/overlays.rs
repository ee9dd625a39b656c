//! Viewport overlay drawing (orientation labels, camera info box).
//!
//! Overlays align with the model through the same `project` API the render
//! pass uses; nothing here touches render state.

use egui::{Color32, Painter, Pos2, Rect};
use glam::Vec3;

use super::camera::Camera;
use super::projection::Viewport;

/// Draw anatomical orientation labels at the axis extremes: R/L on ±X,
/// S/I on ±Y, A/P on ±Z.
pub fn draw_orientation_labels(
    painter: &Painter,
    rect: Rect,
    camera: &Camera,
    viewport: &Viewport,
    radius: f32,
) {
    let d = radius * 1.25;
    let labels = [
        (Vec3::new(d, 0.0, 0.0), "R", Color32::from_rgb(220, 90, 90)),
        (Vec3::new(-d, 0.0, 0.0), "L", Color32::from_rgb(220, 90, 90)),
        (Vec3::new(0.0, d, 0.0), "S", Color32::from_rgb(90, 200, 90)),
        (Vec3::new(0.0, -d, 0.0), "I", Color32::from_rgb(90, 200, 90)),
        (Vec3::new(0.0, 0.0, d), "A", Color32::from_rgb(90, 130, 220)),
        (Vec3::new(0.0, 0.0, -d), "P", Color32::from_rgb(90, 130, 220)),
    ];

    for (pos, label, color) in &labels {
        let pp = camera.project(*pos, viewport);
        if !pp.visible() || !pp.is_finite() {
            continue;
        }
        let screen = Pos2::new(pp.x, pp.y) + rect.min.to_vec2();
        if rect.contains(screen) {
            painter.text(
                screen,
                egui::Align2::CENTER_CENTER,
                *label,
                egui::FontId::monospace(12.0),
                *color,
            );
        }
    }
}

/// Camera readout in the view corner.
pub fn draw_camera_info(painter: &Painter, rect: Rect, camera: &Camera) {
    let overlay_rect = Rect::from_min_size(
        Pos2::new(rect.right() - 140.0, rect.top() + 4.0),
        egui::vec2(136.0, 44.0),
    );
    painter.rect_filled(
        overlay_rect,
        4.0,
        Color32::from_rgba_premultiplied(0, 0, 0, 140),
    );
    painter.text(
        overlay_rect.min + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        format!(
            "Dist: {:.1}\nYaw: {:.0}  Pitch: {:.0}",
            camera.distance(),
            camera.yaw.to_degrees(),
            camera.pitch.to_degrees(),
        ),
        egui::FontId::monospace(10.0),
        Color32::from_rgb(160, 160, 170),
    );
}
