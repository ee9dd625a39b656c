//! Keyboard shortcut handling

use eframe::egui;

use crate::state::AppState;
use crate::viewport::ViewportPanel;

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    main_view: &mut ViewportPanel,
    pip_view: &mut ViewportPanel,
) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        // R — reset cameras to the home view
        if i.key_pressed(egui::Key::R) {
            main_view.reset_camera();
            pip_view.reset_camera();
        }
        // Space — toggle auto-rotation of the main view
        if i.key_pressed(egui::Key::Space) {
            main_view.toggle_auto_rotate();
        }
        // P — toggle the picture-in-picture inset
        if i.key_pressed(egui::Key::P) {
            state.settings.pip.enabled = !state.settings.pip.enabled;
        }
        // B — toggle region boundary overlay
        if i.key_pressed(egui::Key::B) {
            state.settings.overlay.show_boundaries = !state.settings.overlay.show_boundaries;
        }
        // Escape — clear selection
        if i.key_pressed(egui::Key::Escape) {
            state.selection.clear();
        }
    });
}
