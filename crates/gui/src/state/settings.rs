//! Application settings

use serde::{Deserialize, Serialize};

use crate::viewport::picking::PickParams;
use crate::viewport::projection::Fog;

/// Viewport display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Camera-space near clip
    pub near: f32,
    /// Camera-space far clip (depth 1.0)
    pub far: f32,
    /// Show the camera info box in the corner
    pub show_camera_info: bool,
    /// Show anatomical orientation labels (A/P, L/R, S/I)
    pub show_orientation_labels: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [24, 24, 30],
            near: 0.5,
            far: 12.0,
            show_camera_info: true,
            show_orientation_labels: true,
        }
    }
}

/// Directional light parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingSettings {
    /// Direction from surfaces toward the light (normalized on use)
    pub direction: [f32; 3],
    /// Ambient floor so unlit faces stay readable
    pub ambient: f32,
    /// Diffuse strength
    pub diffuse: f32,
    /// Specular strength; 0 disables the highlight term
    pub specular: f32,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            direction: [-0.4, 0.7, -0.6],
            ambient: 0.35,
            diffuse: 0.65,
            specular: 0.20,
            shininess: 8.0,
        }
    }
}

/// Depth fog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FogSettings {
    pub enabled: bool,
    /// Depth where fading begins
    pub start: f32,
    /// Depth where the floor is reached
    pub end: f32,
    /// Fraction of alpha remaining at the far end
    pub floor: f32,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            start: 0.7,
            end: 1.0,
            floor: 0.25,
        }
    }
}

impl FogSettings {
    pub fn to_fog(&self) -> Option<Fog> {
        self.enabled.then_some(Fog {
            start: self.start,
            end: self.end,
            floor: self.floor,
        })
    }
}

/// Camera interaction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlSettings {
    /// Radians of rotation per pixel of drag
    pub rotate_speed: f32,
    /// Pan units per pixel, multiplied by the current distance
    pub pan_speed: f32,
    /// Zoom factor per scroll unit
    pub zoom_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Inertia velocity multiplier per idle frame
    pub damping: f32,
    /// Velocity below this snaps to exactly zero
    pub velocity_epsilon: f32,
    /// Idle yaw increment per frame while auto-rotate is on
    pub auto_rotate_step: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005,
            pan_speed: 0.0018,
            zoom_speed: 0.0015,
            min_zoom: 1.5,
            max_zoom: 10.0,
            damping: 0.95,
            velocity_epsilon: 1e-4,
            auto_rotate_step: 0.004,
        }
    }
}

/// Overlay settings (boundaries, markers, labels)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlaySettings {
    /// Stroke region-boundary edges
    pub show_boundaries: bool,
    /// Boundary edges deeper than this are skipped (keeps the far side
    /// from ghosting through)
    pub boundary_depth_limit: f32,
    /// Boundary stroke color RGB
    pub boundary_color: [u8; 3],
    pub show_markers: bool,
    /// Marker dot radius in mesh units (scaled by projection)
    pub marker_radius: f32,
    pub show_links: bool,
    pub show_labels: bool,
    pub label_font_size: f32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            show_boundaries: true,
            boundary_depth_limit: 0.5,
            boundary_color: [230, 230, 235],
            show_markers: true,
            marker_radius: 0.05,
            show_links: true,
            show_labels: false,
            label_font_size: 11.0,
        }
    }
}

/// Picking settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickingSettings {
    /// Hit radius in mesh units at scale 1.0
    pub base_radius: f32,
    /// Targets deeper than this are facing away and not pickable
    pub facing_depth_limit: f32,
}

impl Default for PickingSettings {
    fn default() -> Self {
        Self {
            base_radius: 0.12,
            facing_depth_limit: 0.55,
        }
    }
}

impl PickingSettings {
    pub fn to_params(&self) -> PickParams {
        PickParams {
            base_radius: self.base_radius,
            facing_depth_limit: self.facing_depth_limit,
        }
    }
}

/// Picture-in-picture inset view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipSettings {
    pub enabled: bool,
    /// Inset size as a fraction of the main view's shorter side
    pub fraction: f32,
}

impl Default for PipSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            fraction: 0.28,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    pub font_size: f32,
    pub show_region_panel: bool,
    pub show_inspector: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            show_region_panel: true,
            show_inspector: true,
        }
    }
}

/// All application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub lighting: LightingSettings,
    #[serde(default)]
    pub fog: FogSettings,
    #[serde(default)]
    pub controls: ControlSettings,
    #[serde(default)]
    pub overlay: OverlaySettings,
    #[serde(default)]
    pub picking: PickingSettings,
    #[serde(default)]
    pub pip: PipSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "somaview", "somaview") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    return settings;
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "somaview", "somaview") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    let _ = std::fs::write(config_path, json);
                }
            }
        }
    }
}
