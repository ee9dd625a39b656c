pub mod activity;
pub mod selection;
pub mod settings;

use std::sync::Arc;

pub use activity::ActivityState;
pub use selection::{SelectionState, Target};
pub use settings::AppSettings;

use crate::viewport::mesh::AnatomyMesh;

/// Combined application state
pub struct AppState {
    /// Current model; `None` until a load succeeds
    pub mesh: Option<Arc<AnatomyMesh>>,
    pub selection: SelectionState,
    pub settings: AppSettings,
    pub activity: ActivityState,
    /// Last model load error, shown in the status bar
    pub load_error: Option<String>,
    /// Show settings window
    pub show_settings_window: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mesh: None,
            selection: SelectionState::default(),
            settings: AppSettings::load(),
            activity: ActivityState::default(),
            load_error: None,
            show_settings_window: false,
        }
    }
}

impl AppState {
    /// Build and install a mesh from a model description. On failure the
    /// previous model stays and the error is surfaced.
    pub fn load_model(&mut self, desc: &shared::ModelDescription) {
        match AnatomyMesh::build(desc) {
            Ok(mesh) => {
                tracing::info!("loaded model '{}'", mesh.name());
                self.mesh = Some(Arc::new(mesh));
                self.selection.clear();
                self.selection.set_hovered(None);
                self.load_error = None;
            }
            Err(err) => {
                tracing::error!("model load failed: {err}");
                self.load_error = Some(err);
            }
        }
    }
}
