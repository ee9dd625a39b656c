//! Screen-space picking against projected region centroids and markers.
//!
//! Uses the same projection as drawing, so what you see is what you hit.
//! Pure read: callable on every pointer move without touching render state.

use glam::Vec2;

use super::camera::Camera;
use super::mesh::AnatomyMesh;
use super::projection::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Region,
    Marker,
}

/// The single nearest interactive target under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit {
    pub kind: TargetKind,
    /// Index into `mesh.regions()` or `mesh.markers()` depending on `kind`
    pub index: usize,
    /// Stable external id: region key or marker id
    pub id: String,
    pub screen_distance: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct PickParams {
    /// Hit radius at scale 1.0; the effective screen radius is
    /// `base_radius * scale`, so targets get proportionally harder to hit
    /// as they recede
    pub base_radius: f32,
    /// Targets deeper than this are not facing the camera and cannot be
    /// picked through the mesh
    pub facing_depth_limit: f32,
}

/// Find the nearest target within its scale-adjusted radius, or none.
/// `pointer` is in view-local pixels.
pub fn pick(
    pointer: Vec2,
    camera: &Camera,
    viewport: &Viewport,
    mesh: &AnatomyMesh,
    params: &PickParams,
) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;

    for (i, region) in mesh.regions().iter().enumerate() {
        if region.vertices.is_empty() {
            continue;
        }
        consider(
            &mut best,
            TargetKind::Region,
            i,
            &region.key,
            mesh.centroid_of(i),
            pointer,
            camera,
            viewport,
            params,
        );
    }
    for (i, marker) in mesh.markers().iter().enumerate() {
        consider(
            &mut best,
            TargetKind::Marker,
            i,
            &marker.id,
            marker.position,
            pointer,
            camera,
            viewport,
            params,
        );
    }

    best
}

#[allow(clippy::too_many_arguments)]
fn consider(
    best: &mut Option<PickHit>,
    kind: TargetKind,
    index: usize,
    id: &str,
    position: glam::Vec3,
    pointer: Vec2,
    camera: &Camera,
    viewport: &Viewport,
    params: &PickParams,
) {
    let pp = camera.project(position, viewport);
    // Behind-camera targets are never pickable
    if !pp.visible() || !pp.is_finite() {
        return;
    }
    if pp.depth > params.facing_depth_limit {
        return;
    }
    let distance = (Vec2::new(pp.x, pp.y) - pointer).length();
    if distance > params.base_radius * pp.scale {
        return;
    }
    let closer = best
        .as_ref()
        .map(|b| distance < b.screen_distance)
        .unwrap_or(true);
    if closer {
        *best = Some(PickHit {
            kind,
            index,
            id: id.to_string(),
            screen_distance: distance,
            depth: pp.depth,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use glam::Vec3;

    fn straight_on_camera(distance: f32) -> Camera {
        let mut camera = Camera::new();
        camera.yaw = 0.0;
        camera.pitch = 0.0;
        camera.roll = 0.0;
        camera.position = Vec3::new(0.0, 0.0, distance);
        camera
    }

    fn params() -> PickParams {
        PickParams {
            base_radius: 0.12,
            facing_depth_limit: 0.6,
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0, 0.5, 40.0)
    }

    #[test]
    fn test_pick_marker_at_projected_position() {
        let mesh = AnatomyMesh::build(&fixtures::marker_pair()).unwrap();
        let camera = straight_on_camera(6.0);
        let vp = viewport();
        let pp = camera.project(mesh.markers()[0].position, &vp);
        let hit = pick(Vec2::new(pp.x, pp.y), &camera, &vp, &mesh, &params())
            .expect("marker under pointer");
        assert_eq!(hit.kind, TargetKind::Marker);
        assert_eq!(hit.id, mesh.markers()[0].id);
    }

    #[test]
    fn test_miss_outside_radius() {
        let mesh = AnatomyMesh::build(&fixtures::marker_pair()).unwrap();
        let camera = straight_on_camera(6.0);
        let vp = viewport();
        let pp = camera.project(mesh.markers()[0].position, &vp);
        let radius = params().base_radius * pp.scale;
        let hit = pick(
            Vec2::new(pp.x + radius * 3.0, pp.y + radius * 3.0),
            &camera,
            &vp,
            &mesh,
            &params(),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_radius_shrinks_with_distance() {
        let mesh = AnatomyMesh::build(&fixtures::marker_pair()).unwrap();
        let vp = viewport();
        let p = params();

        let near_cam = straight_on_camera(4.0);
        let far_cam = straight_on_camera(8.0);
        let near_pp = near_cam.project(mesh.markers()[0].position, &vp);
        let far_pp = far_cam.project(mesh.markers()[0].position, &vp);
        // Twice as far -> half the scale -> half the pick radius
        assert!((near_pp.scale / far_pp.scale - 2.0).abs() < 1e-3);

        let offset = p.base_radius * near_pp.scale * 0.75;
        let near_hit = pick(
            Vec2::new(near_pp.x + offset, near_pp.y),
            &near_cam,
            &vp,
            &mesh,
            &p,
        );
        assert!(near_hit.is_some());
        let far_hit = pick(
            Vec2::new(far_pp.x + offset, far_pp.y),
            &far_cam,
            &vp,
            &mesh,
            &p,
        );
        assert!(far_hit.is_none(), "same pixel offset must miss at distance");
    }

    #[test]
    fn test_depth_limit_rejects_far_side() {
        let mesh = AnatomyMesh::build(&fixtures::marker_pair()).unwrap();
        let vp = viewport();
        // Far enough out that both markers pass in front of the limit,
        // then pull the limit down to cut the rear one
        let camera = straight_on_camera(6.0);
        let rear = mesh
            .markers()
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| {
                let da = camera.project(a.position, &vp).depth;
                let db = camera.project(b.position, &vp).depth;
                da.total_cmp(&db)
            })
            .map(|(i, _)| i)
            .unwrap();
        let pp = camera.project(mesh.markers()[rear].position, &vp);
        let strict = PickParams {
            base_radius: 0.12,
            facing_depth_limit: pp.depth - 0.01,
        };
        let hit = pick(Vec2::new(pp.x, pp.y), &camera, &vp, &mesh, &strict);
        assert!(
            hit.map(|h| h.index != rear).unwrap_or(true),
            "target beyond the facing limit must not be picked"
        );
    }

    #[test]
    fn test_behind_camera_never_pickable() {
        let mesh = AnatomyMesh::build(&fixtures::marker_pair()).unwrap();
        let camera = straight_on_camera(-10.0);
        let vp = viewport();
        let hit = pick(Vec2::new(400.0, 300.0), &camera, &vp, &mesh, &params());
        assert!(hit.is_none());
    }

    #[test]
    fn test_nearest_of_overlapping_targets_wins() {
        let mesh = AnatomyMesh::build(&fixtures::marker_pair()).unwrap();
        let camera = straight_on_camera(6.0);
        let vp = viewport();
        let a = camera.project(mesh.markers()[0].position, &vp);
        let b = camera.project(mesh.markers()[1].position, &vp);
        // Slightly toward marker 0 from the midpoint
        let probe = Vec2::new(a.x * 0.6 + b.x * 0.4, a.y * 0.6 + b.y * 0.4);
        let loose = PickParams {
            base_radius: 10.0,
            facing_depth_limit: 1.0,
        };
        let hit = pick(probe, &camera, &vp, &mesh, &loose).expect("hit");
        assert_eq!(hit.index, 0);
    }
}
