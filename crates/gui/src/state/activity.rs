//! Demo activity driver.
//!
//! Stands in for the external simulation that feeds per-region colors.
//! The render pass never reads this directly: each frame the app takes a
//! snapshot of colors (`region_colors`) and passes it in as an explicit
//! parameter.

use shared::Rgba;

use crate::viewport::mesh::AnatomyMesh;

/// Per-region activity levels oscillating on deterministic phases.
pub struct ActivityState {
    time: f32,
    pub running: bool,
}

impl ActivityState {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            running: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.running {
            self.time += dt;
        }
    }

    /// Activity level of a region in `[0, 1]`.
    pub fn level(&self, region_index: usize) -> f32 {
        let phase = region_index as f32 * 1.7;
        0.5 + 0.5 * (self.time * 0.9 + phase).sin()
    }

    /// Snapshot of current region colors, parallel to `mesh.regions()`:
    /// the base color brightened by activity.
    pub fn region_colors(&self, mesh: &AnatomyMesh) -> Vec<Rgba> {
        mesh.regions()
            .iter()
            .enumerate()
            .map(|(i, region)| modulate(region.base_color, self.level(i)))
            .collect()
    }
}

impl Default for ActivityState {
    fn default() -> Self {
        Self::new()
    }
}

fn modulate(base: Rgba, level: f32) -> Rgba {
    let k = 0.6 + 0.4 * level.clamp(0.0, 1.0);
    [
        (base[0] as f32 * k) as u8,
        (base[1] as f32 * k) as u8,
        (base[2] as f32 * k) as u8,
        base[3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_levels_stay_in_range() {
        let mut activity = ActivityState::new();
        for _ in 0..200 {
            activity.update(0.016);
            for i in 0..8 {
                let level = activity.level(i);
                assert!((0.0..=1.0).contains(&level));
            }
        }
    }

    #[test]
    fn test_snapshot_parallel_to_regions() {
        let mesh = AnatomyMesh::build(&fixtures::two_region_cube()).unwrap();
        let activity = ActivityState::new();
        let colors = activity.region_colors(&mesh);
        assert_eq!(colors.len(), mesh.regions().len());
    }

    #[test]
    fn test_paused_driver_is_static() {
        let mut activity = ActivityState::new();
        activity.running = false;
        let before = activity.level(3);
        activity.update(1.0);
        assert_eq!(activity.level(3), before);
    }

    #[test]
    fn test_modulation_preserves_alpha() {
        let c = modulate([100, 150, 200, 128], 0.0);
        assert_eq!(c[3], 128);
        assert!(c[0] < 100);
    }
}
