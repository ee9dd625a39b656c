//! Flat per-face shading: one directional light, an ambient floor, and a
//! cheap power-curve specular highlight.

use egui::Color32;
use glam::Vec3;
use shared::Rgba;

use crate::state::settings::LightingSettings;

/// Resolved light parameters for one frame.
#[derive(Debug, Clone, Copy)]
pub struct LightRig {
    /// Unit vector from the surface toward the light
    pub direction: Vec3,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl LightRig {
    pub fn from_settings(settings: &LightingSettings) -> Self {
        let direction = Vec3::from(settings.direction);
        Self {
            direction: if direction.length_squared() > 0.0 {
                direction.normalize()
            } else {
                Vec3::Z
            },
            ambient: settings.ambient,
            diffuse: settings.diffuse,
            specular: settings.specular,
            shininess: settings.shininess,
        }
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::from_settings(&LightingSettings::default())
    }
}

/// Shade a face: region base color modulated by the diffuse term with an
/// ambient floor, plus an additive specular term. `alpha` is the already
/// fog-attenuated opacity in `[0, 1]`.
pub fn shade_face(base: Rgba, normal: Vec3, rig: &LightRig, alpha: f32) -> Color32 {
    let diffuse = normal.dot(rig.direction).max(0.0);
    let lum = (rig.ambient + rig.diffuse * diffuse).min(1.0);
    let spec = if rig.specular > 0.0 {
        diffuse.powf(rig.shininess) * rig.specular
    } else {
        0.0
    };

    let channel = |c: u8| -> u8 { (c as f32 * lum + 255.0 * spec).min(255.0) as u8 };
    let a = (base[3] as f32 * alpha.clamp(0.0, 1.0)) as u8;
    Color32::from_rgba_unmultiplied(channel(base[0]), channel(base[1]), channel(base[2]), a)
}

/// Fixed high-visibility fill for the externally designated active region.
/// Bypasses normal lighting so the highlight reads at any angle; fog still
/// applies.
pub fn highlight_color(alpha: f32) -> Color32 {
    let a = (255.0 * alpha.clamp(0.0, 1.0)) as u8;
    Color32::from_rgba_unmultiplied(255, 214, 64, a)
}
