//! Application menu bar and settings window

use eframe::egui;

use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button("File", |ui| {
        if ui.button("Open model…").clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title("Open model")
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                match std::fs::read_to_string(&path) {
                    Ok(json) => match serde_json::from_str::<shared::ModelDescription>(&json) {
                        Ok(desc) => {
                            state.load_model(&desc);
                            tracing::info!("Opened model from {}", path.display());
                        }
                        Err(e) => {
                            tracing::error!("Failed to parse model: {e}");
                            state.load_error = Some(format!("parse error: {e}"));
                        }
                    },
                    Err(e) => {
                        tracing::error!("Failed to read file: {e}");
                        state.load_error = Some(format!("read error: {e}"));
                    }
                }
            }
        }
        if ui.button("Reload demo model").clicked() {
            ui.close_menu();
            state.load_model(&crate::fixtures::demo_model());
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut AppState, main_view: &mut ViewportPanel) {
    ui.menu_button("View", |ui| {
        if ui.button("Reset camera").clicked() {
            main_view.reset_camera();
            ui.close_menu();
        }

        let mut auto = main_view.controller.auto_rotate_enabled();
        if ui.checkbox(&mut auto, "Auto-rotate").changed() {
            main_view.controller.set_auto_rotate(auto);
        }

        ui.checkbox(&mut state.settings.pip.enabled, "Picture-in-picture");
        ui.separator();
        ui.checkbox(&mut state.settings.ui.show_region_panel, "Region panel");
        ui.checkbox(&mut state.settings.ui.show_inspector, "Inspector");
        ui.checkbox(
            &mut state.settings.viewport.show_orientation_labels,
            "Orientation labels",
        );
        ui.checkbox(&mut state.settings.viewport.show_camera_info, "Camera info");
        ui.separator();
        if ui.button("Settings…").clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

/// Settings window (opened from the view menu)
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_settings_window {
        return;
    }
    let mut open = state.show_settings_window;
    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add(
                egui::Slider::new(&mut state.settings.ui.font_size, 10.0..=20.0).text("Font size"),
            );
            ui.add(
                egui::Slider::new(&mut state.settings.viewport.far, 5.0..=50.0)
                    .text("Far clip"),
            );
            ui.horizontal(|ui| {
                ui.label("Background:");
                let c = &mut state.settings.viewport.background_color;
                let mut color = egui::Color32::from_rgb(c[0], c[1], c[2]);
                if ui.color_edit_button_srgba(&mut color).changed() {
                    *c = [color.r(), color.g(), color.b()];
                }
            });
            ui.separator();
            if ui.button("Restore defaults").clicked() {
                state.settings = crate::state::AppSettings::default();
            }
        });
    state.show_settings_window = open;
}
