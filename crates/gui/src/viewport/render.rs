//! Painter's-algorithm render pass: project, cull, sort, shade, paint.
//!
//! Depth handling is back-to-front sorting only — adequate for sparse,
//! mostly-convex anatomical meshes; intersecting geometry can show sorting
//! artifacts. The sort runs fully every frame since depth order changes
//! continuously while the camera moves.

use egui::{Color32, Painter, Pos2, Shape, Stroke};
use glam::Vec3;
use shared::Rgba;

use super::camera::Camera;
use super::lighting::{self, LightRig};
use super::mesh::AnatomyMesh;
use super::projection::{self, Fog, ProjectedPoint, Viewport};
use crate::state::settings::AppSettings;

/// Per-frame inputs from outside the rendering core. The pass reads a
/// snapshot; it never reaches into simulation or UI internals.
pub struct FrameInputs<'a> {
    /// Current color per region, parallel to `mesh.regions()`
    pub region_colors: &'a [Rgba],
    /// Region painted with the fixed highlight override
    pub active_region: Option<usize>,
    pub active_marker: Option<usize>,
}

/// A face that survived culling, ready to paint (view-local coordinates).
pub struct FaceRecord {
    pub face_index: usize,
    pub points: [Pos2; 3],
    /// Mean of the three projected vertex depths
    pub depth: f32,
    /// Object-space face normal
    pub normal: Vec3,
    pub region: usize,
}

/// Counters for the status bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaintStats {
    pub faces_painted: usize,
    pub faces_culled: usize,
    pub boundary_edges_drawn: usize,
}

/// Geometry stages: project every vertex once, discard behind-camera,
/// non-finite, and back-facing faces, then sort back-to-front.
pub fn build_face_records(
    mesh: &AnatomyMesh,
    camera: &Camera,
    viewport: &Viewport,
) -> Vec<FaceRecord> {
    let projected: Vec<ProjectedPoint> = mesh
        .vertices()
        .iter()
        .map(|v| projection::project(v.position, camera, viewport))
        .collect();

    let mut records = Vec::with_capacity(mesh.faces().len() / 2);
    for (face_index, face) in mesh.faces().iter().enumerate() {
        let a = projected[face.indices[0] as usize];
        let b = projected[face.indices[1] as usize];
        let c = projected[face.indices[2] as usize];

        if !a.visible() || !b.visible() || !c.visible() {
            continue;
        }
        if !a.is_finite() || !b.is_finite() || !c.is_finite() {
            continue;
        }

        // Signed area in Y-down screen space. Front faces wind counter-
        // clockwise in mesh space seen from outside, which is clockwise on
        // screen: negative area. Zero-area degenerates are culled too.
        let area = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
        if area >= 0.0 {
            continue;
        }

        records.push(FaceRecord {
            face_index,
            points: [Pos2::new(a.x, a.y), Pos2::new(b.x, b.y), Pos2::new(c.x, c.y)],
            depth: (a.depth + b.depth + c.depth) / 3.0,
            normal: face.normal,
            region: face.region,
        });
    }

    // Painter's algorithm: farthest first
    records.sort_by(|p, q| q.depth.total_cmp(&p.depth));
    records
}

fn region_color(inputs: &FrameInputs<'_>, mesh: &AnatomyMesh, region: usize) -> Rgba {
    inputs
        .region_colors
        .get(region)
        .copied()
        .unwrap_or(mesh.regions()[region].base_color)
}

/// Full render pass for one view, painting into `rect`.
pub fn paint_model(
    painter: &Painter,
    rect: egui::Rect,
    camera: &Camera,
    mesh: &AnatomyMesh,
    inputs: &FrameInputs<'_>,
    settings: &AppSettings,
) -> PaintStats {
    let viewport = Viewport::new(
        rect.width(),
        rect.height(),
        settings.viewport.near,
        settings.viewport.far,
    );
    let origin = rect.min.to_vec2();
    let light = LightRig::from_settings(&settings.lighting);
    let fog = settings.fog.to_fog();

    let records = build_face_records(mesh, camera, &viewport);
    let mut stats = PaintStats {
        faces_painted: records.len(),
        faces_culled: mesh.faces().len() - records.len(),
        boundary_edges_drawn: 0,
    };

    for record in &records {
        let alpha = fog_alpha(1.0, record.depth, fog);
        let fill = if inputs.active_region == Some(record.region) {
            lighting::highlight_color(alpha)
        } else {
            let base = region_color(inputs, mesh, record.region);
            lighting::shade_face(base, record.normal, &light, alpha)
        };
        let points = record.points.iter().map(|p| *p + origin).collect();
        painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
    }

    if settings.overlay.show_boundaries {
        stats.boundary_edges_drawn =
            paint_region_boundaries(painter, rect, camera, &viewport, mesh, settings, fog);
    }
    if settings.overlay.show_links {
        paint_marker_links(painter, rect, camera, &viewport, mesh, fog);
    }
    if settings.overlay.show_markers {
        paint_markers(painter, rect, camera, &viewport, mesh, inputs, settings, fog);
    }
    if settings.overlay.show_labels {
        paint_region_labels(painter, rect, camera, &viewport, mesh, settings);
    }

    stats
}

fn fog_alpha(base: f32, depth: f32, fog: Option<Fog>) -> f32 {
    match fog {
        Some(fog) => projection::apply_depth_fog(base, depth, fog),
        None => base,
    }
}

/// Stroke dashed edges between regions, skipping edges whose midpoint is
/// deeper than the configured limit so they do not ghost through from the
/// far side of the mesh.
fn paint_region_boundaries(
    painter: &Painter,
    rect: egui::Rect,
    camera: &Camera,
    viewport: &Viewport,
    mesh: &AnatomyMesh,
    settings: &AppSettings,
    fog: Option<Fog>,
) -> usize {
    let origin = rect.min.to_vec2();
    let color = settings.overlay.boundary_color;
    let mut drawn = 0;

    for edge in mesh.boundary_edges() {
        let pa = camera.project(mesh.vertices()[edge.a as usize].position, viewport);
        let pb = camera.project(mesh.vertices()[edge.b as usize].position, viewport);
        if !pa.visible() || !pb.visible() || !pa.is_finite() || !pb.is_finite() {
            continue;
        }
        let mid_depth = (pa.depth + pb.depth) * 0.5;
        if mid_depth > settings.overlay.boundary_depth_limit {
            continue;
        }
        let alpha = fog_alpha(0.9, mid_depth, fog);
        let stroke = Stroke::new(
            1.0,
            Color32::from_rgba_unmultiplied(color[0], color[1], color[2], (alpha * 255.0) as u8),
        );
        draw_dashed_line(
            painter,
            Pos2::new(pa.x, pa.y) + origin,
            Pos2::new(pb.x, pb.y) + origin,
            stroke,
            6.0,
        );
        drawn += 1;
    }
    drawn
}

fn paint_marker_links(
    painter: &Painter,
    rect: egui::Rect,
    camera: &Camera,
    viewport: &Viewport,
    mesh: &AnatomyMesh,
    fog: Option<Fog>,
) {
    let origin = rect.min.to_vec2();
    for &(from, to) in mesh.links() {
        let pa = camera.project(mesh.markers()[from].position, viewport);
        let pb = camera.project(mesh.markers()[to].position, viewport);
        if !pa.visible() || !pb.visible() || !pa.is_finite() || !pb.is_finite() {
            continue;
        }
        let alpha = fog_alpha(0.7, (pa.depth + pb.depth) * 0.5, fog);
        let stroke = Stroke::new(
            1.0,
            Color32::from_rgba_unmultiplied(160, 190, 220, (alpha * 255.0) as u8),
        );
        painter.line_segment([Pos2::new(pa.x, pa.y) + origin, Pos2::new(pb.x, pb.y) + origin], stroke);
    }
}

fn paint_markers(
    painter: &Painter,
    rect: egui::Rect,
    camera: &Camera,
    viewport: &Viewport,
    mesh: &AnatomyMesh,
    inputs: &FrameInputs<'_>,
    settings: &AppSettings,
    fog: Option<Fog>,
) {
    let origin = rect.min.to_vec2();
    for (i, marker) in mesh.markers().iter().enumerate() {
        let pp = camera.project(marker.position, viewport);
        if !pp.visible() || !pp.is_finite() {
            continue;
        }
        // Dot radius follows the foreshortening scale, like every other
        // screen-space size
        let radius = (settings.overlay.marker_radius * pp.scale).max(1.5);
        let alpha = fog_alpha(1.0, pp.depth, fog);
        let center = Pos2::new(pp.x, pp.y) + origin;

        let fill = if inputs.active_marker == Some(i) {
            lighting::highlight_color(alpha)
        } else {
            let base = marker
                .region
                .map(|r| region_color(inputs, mesh, r))
                .unwrap_or([200, 220, 245, 255]);
            Color32::from_rgba_unmultiplied(base[0], base[1], base[2], (alpha * 255.0) as u8)
        };
        painter.circle_filled(center, radius, fill);
        if inputs.active_marker == Some(i) {
            painter.circle_stroke(center, radius + 2.0, Stroke::new(1.5, Color32::WHITE));
        }
    }
}

fn paint_region_labels(
    painter: &Painter,
    rect: egui::Rect,
    camera: &Camera,
    viewport: &Viewport,
    mesh: &AnatomyMesh,
    settings: &AppSettings,
) {
    let origin = rect.min.to_vec2();
    // Scale factor 1.0 at the model origin's distance
    let reference_scale = camera.fov / camera.distance();

    for (i, region) in mesh.regions().iter().enumerate() {
        if region.vertices.is_empty() {
            continue;
        }
        let pp = camera.project(mesh.centroid_of(i), viewport);
        if !pp.visible() || !pp.is_finite() || pp.depth > settings.overlay.boundary_depth_limit {
            continue;
        }
        let size =
            (settings.overlay.label_font_size * pp.scale / reference_scale).clamp(7.0, 16.0);
        painter.text(
            Pos2::new(pp.x, pp.y) + origin,
            egui::Align2::CENTER_CENTER,
            &region.name,
            egui::FontId::proportional(size),
            Color32::from_rgba_unmultiplied(235, 235, 240, 220),
        );
    }
}

/// Draw a dashed line in screen space.
fn draw_dashed_line(painter: &Painter, start: Pos2, end: Pos2, stroke: Stroke, dash_length: f32) {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = (dx * dx + dy * dy).sqrt();

    if length < 0.1 {
        return;
    }

    let dir_x = dx / length;
    let dir_y = dy / length;
    let gap_length = dash_length * 0.6;

    let mut pos = 0.0;
    let mut drawing = true;

    while pos < length {
        if drawing {
            let segment_end = (pos + dash_length).min(length);
            let p1 = Pos2::new(start.x + dir_x * pos, start.y + dir_y * pos);
            let p2 = Pos2::new(start.x + dir_x * segment_end, start.y + dir_y * segment_end);
            painter.line_segment([p1, p2], stroke);
            pos = segment_end;
        } else {
            pos += gap_length;
        }
        drawing = !drawing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::viewport::mesh::AnatomyMesh;

    fn straight_on_camera(distance: f32) -> Camera {
        let mut camera = Camera::new();
        camera.yaw = 0.0;
        camera.pitch = 0.0;
        camera.roll = 0.0;
        camera.position = Vec3::new(0.0, 0.0, distance);
        camera
    }

    fn test_viewport() -> Viewport {
        Viewport::new(800.0, 600.0, 0.5, 40.0)
    }

    #[test]
    fn test_cube_culls_back_faces() {
        let mesh = AnatomyMesh::build(&fixtures::unit_cube()).unwrap();
        let camera = straight_on_camera(6.0);
        let records = build_face_records(&mesh, &camera, &test_viewport());
        // Straight on, exactly one cube side (2 triangles) faces the camera
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_closed_convex_mesh_never_over_half_visible() {
        let mesh = AnatomyMesh::build(&fixtures::unit_cube()).unwrap();
        let mut camera = Camera::new();
        camera.position = Vec3::new(0.0, 0.0, 6.0);
        for yaw_step in 0..8 {
            for pitch_step in -2..=2 {
                camera.yaw = yaw_step as f32 * 0.7;
                camera.pitch = pitch_step as f32 * 0.6;
                let records = build_face_records(&mesh, &camera, &test_viewport());
                assert!(!records.is_empty());
                assert!(
                    records.len() <= mesh.faces().len() / 2,
                    "more than half of a closed convex mesh visible"
                );
            }
        }
    }

    #[test]
    fn test_records_sorted_back_to_front() {
        let mesh = AnatomyMesh::build(&fixtures::lobed_shell(8, 12, 4)).unwrap();
        let mut camera = Camera::new();
        camera.position = Vec3::new(0.0, 0.0, 6.0);
        let records = build_face_records(&mesh, &camera, &test_viewport());
        assert!(records.len() > 4);
        for pair in records.windows(2) {
            assert!(pair[0].depth >= pair[1].depth, "paint order not back-to-front");
        }
    }

    #[test]
    fn test_single_front_facing_triangle_survives() {
        // Triangle at z=5, camera at the origin looking down +z
        let mesh = AnatomyMesh::build(&fixtures::single_triangle()).unwrap();
        let mut camera = straight_on_camera(0.0);
        camera.fov = 600.0;
        let viewport = Viewport::new(800.0, 600.0, 1.0, 100.0);
        let records = build_face_records(&mesh, &camera, &viewport);
        assert_eq!(records.len(), 1);
        assert!((records[0].points[0].x - viewport.center_x()).abs() < 1e-3);
    }

    #[test]
    fn test_mesh_behind_camera_fully_culled() {
        let mesh = AnatomyMesh::build(&fixtures::unit_cube()).unwrap();
        let camera = straight_on_camera(-6.0);
        let records = build_face_records(&mesh, &camera, &test_viewport());
        assert!(records.is_empty());
    }

    #[test]
    fn test_degenerate_camera_produces_no_records() {
        let mesh = AnatomyMesh::build(&fixtures::unit_cube()).unwrap();
        let mut camera = straight_on_camera(6.0);
        camera.fov = f32::NAN;
        let records = build_face_records(&mesh, &camera, &test_viewport());
        assert!(records.is_empty(), "non-finite faces must be filtered");
    }
}
