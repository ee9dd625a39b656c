//! Pure projection math shared by the render pass, picking, and overlays.
//!
//! One fixed convention everywhere: mesh space is right-handed with Y up,
//! the camera orbits the model origin, and the projector performs the single
//! Y negation into screen space (Y down). Callers never flip Y themselves.

use glam::Vec3;

use super::camera::Camera;

/// Per-view projection parameters: output size and clip range.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Camera-space z at or below which a point is invisible
    pub near: f32,
    /// Camera-space z mapped to depth 1.0
    pub far: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self {
            width,
            height,
            near,
            far,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.width * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.height * 0.5
    }
}

/// A point mapped to the screen.
///
/// `scale == 0.0` is the sentinel for "invisible": the point is at or behind
/// the near plane. Callers must check [`ProjectedPoint::visible`] before
/// drawing or hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Screen x in view-local pixels
    pub x: f32,
    /// Screen y in view-local pixels (down is positive)
    pub y: f32,
    /// Normalized distance in `[0, 1]` over `[near, far]`; ordering and fog
    /// only, never true occlusion
    pub depth: f32,
    /// Foreshortening multiplier; also sizes screen-space radii and labels
    pub scale: f32,
}

impl ProjectedPoint {
    /// Sentinel for a point at or behind the near plane.
    pub fn invisible() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            depth: 1.0,
            scale: 0.0,
        }
    }

    pub fn visible(&self) -> bool {
        self.scale > 0.0
    }

    /// Degenerate camera state can produce NaN/inf coordinates; such points
    /// are dropped face-by-face rather than corrupting the frame.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.depth.is_finite()
    }
}

/// Project a mesh-space point to the screen.
///
/// Camera-space position is `view_rotation * point + camera.position`, where
/// `camera.position` is a view-space offset (x/y pan in the screen plane,
/// z distance from the origin) applied after rotation, so panning always
/// moves parallel to the screen regardless of orientation.
pub fn project(point: Vec3, camera: &Camera, viewport: &Viewport) -> ProjectedPoint {
    let c = camera.view_rotation() * point + camera.position;
    if c.z <= viewport.near {
        return ProjectedPoint::invisible();
    }

    let scale = camera.fov / c.z;
    let depth = ((c.z - viewport.near) / (viewport.far - viewport.near)).clamp(0.0, 1.0);

    ProjectedPoint {
        x: viewport.center_x() + c.x * scale,
        y: viewport.center_y() - c.y * scale,
        depth,
        scale,
    }
}

/// Depth fog parameters: linear alpha fade over `[start, end]` down to
/// `floor * base_alpha`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub start: f32,
    pub end: f32,
    /// Fraction of the base alpha remaining at `end` and beyond
    pub floor: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            start: 0.7,
            end: 1.0,
            floor: 0.25,
        }
    }
}

/// Attenuate `base_alpha` by depth so distant geometry fades instead of
/// popping. Non-increasing in `depth`, always within `[0, base_alpha]`.
pub fn apply_depth_fog(base_alpha: f32, depth: f32, fog: Fog) -> f32 {
    if depth <= fog.start {
        return base_alpha;
    }
    let span = fog.end - fog.start;
    let t = if span <= 0.0 {
        1.0
    } else {
        ((depth - fog.start) / span).clamp(0.0, 1.0)
    };
    let floor = fog.floor.clamp(0.0, 1.0);
    (base_alpha * (1.0 - t * (1.0 - floor))).clamp(0.0, base_alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_viewport() -> Viewport {
        Viewport::new(800.0, 600.0, 1.0, 100.0)
    }

    fn identity_camera() -> Camera {
        let mut camera = Camera::new();
        camera.yaw = 0.0;
        camera.pitch = 0.0;
        camera.roll = 0.0;
        camera.position = Vec3::ZERO;
        camera
    }

    #[test]
    fn test_point_on_axis_projects_to_center() {
        let camera = identity_camera();
        let vp = test_viewport();
        let p = project(Vec3::new(0.0, 0.0, 5.0), &camera, &vp);
        assert!(p.visible());
        assert_eq!(p.x, vp.center_x());
        assert_eq!(p.y, vp.center_y());
        assert_eq!(p.scale, camera.fov / 5.0);
    }

    #[test]
    fn test_scale_strictly_decreases_with_depth() {
        let camera = identity_camera();
        let vp = test_viewport();
        let mut last_scale = f32::INFINITY;
        for z in [2.0, 3.0, 5.0, 10.0, 50.0, 99.0] {
            let p = project(Vec3::new(1.0, 1.0, z), &camera, &vp);
            assert!(p.visible());
            assert!(p.scale < last_scale, "scale not decreasing at z={z}");
            last_scale = p.scale;
        }
    }

    #[test]
    fn test_behind_camera_is_invisible() {
        let camera = identity_camera();
        let vp = test_viewport();
        for z in [-5.0, 0.0, 0.5, 1.0] {
            let p = project(Vec3::new(0.0, 0.0, z), &camera, &vp);
            assert_eq!(p.scale, 0.0, "z={z} should be behind the near plane");
            assert!(!p.visible());
        }
    }

    #[test]
    fn test_depth_is_monotonic_and_clamped() {
        let camera = identity_camera();
        let vp = test_viewport();
        let near = project(Vec3::new(0.0, 0.0, 1.5), &camera, &vp);
        let mid = project(Vec3::new(0.0, 0.0, 50.0), &camera, &vp);
        let far = project(Vec3::new(0.0, 0.0, 500.0), &camera, &vp);
        assert!(near.depth < mid.depth);
        assert!(mid.depth < far.depth || far.depth == 1.0);
        assert!((0.0..=1.0).contains(&near.depth));
        assert_eq!(far.depth, 1.0);
    }

    #[test]
    fn test_mesh_up_is_screen_up() {
        // Y-up point must land above the viewport center (screen Y is down)
        let camera = identity_camera();
        let vp = test_viewport();
        let p = project(Vec3::new(0.0, 1.0, 5.0), &camera, &vp);
        assert!(p.y < vp.center_y());
    }

    #[test]
    fn test_pan_offset_shifts_screen_position() {
        let mut camera = identity_camera();
        camera.position = Vec3::new(2.0, 0.0, 0.0);
        let vp = test_viewport();
        let p = project(Vec3::new(0.0, 0.0, 5.0), &camera, &vp);
        assert!(p.x > vp.center_x());
    }

    #[test]
    fn test_fog_identity_below_start() {
        let fog = Fog::default();
        assert_eq!(apply_depth_fog(0.8, 0.0, fog), 0.8);
        assert_eq!(apply_depth_fog(0.8, 0.7, fog), 0.8);
    }

    #[test]
    fn test_fog_non_increasing_and_bounded() {
        let fog = Fog::default();
        let base = 0.9;
        let mut last = base;
        for i in 0..=20 {
            let depth = i as f32 / 20.0;
            let a = apply_depth_fog(base, depth, fog);
            assert!(a <= last + 1e-6, "fog increased at depth={depth}");
            assert!((0.0..=base).contains(&a));
            last = a;
        }
        // Floor is respected at full depth
        let at_end = apply_depth_fog(base, 1.0, fog);
        assert!((at_end - base * fog.floor).abs() < 1e-6);
    }

    #[test]
    fn test_fog_degenerate_span() {
        let fog = Fog {
            start: 0.5,
            end: 0.5,
            floor: 0.2,
        };
        let a = apply_depth_fog(1.0, 0.6, fog);
        assert!((a - 0.2).abs() < 1e-6);
    }
}
