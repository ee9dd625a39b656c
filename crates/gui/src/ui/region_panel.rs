//! Region list panel: one row per region with a color swatch, the live
//! activity bar, and click-to-select.

use egui::{Color32, Ui};

use crate::state::selection::Target;
use crate::state::AppState;
use crate::viewport::mesh::AnatomyMesh;
use crate::viewport::picking::TargetKind;

pub fn show(ui: &mut Ui, state: &mut AppState, mesh: &AnatomyMesh) {
    ui.heading("Regions");
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (i, region) in mesh.regions().iter().enumerate() {
            if region.vertices.is_empty() {
                continue;
            }
            let selected = state.selection.is_active(TargetKind::Region, &region.key);
            let activity = state.activity.level(i);

            ui.horizontal(|ui| {
                let c = region.base_color;
                let (swatch, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(
                    swatch,
                    2.0,
                    Color32::from_rgb(c[0], c[1], c[2]),
                );

                if ui.selectable_label(selected, &region.name).clicked() {
                    state.selection.toggle(Target::region(&region.key));
                }

                // Activity bar fills the remaining row width
                let (bar, _) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width().max(24.0), 8.0),
                    egui::Sense::hover(),
                );
                ui.painter()
                    .rect_filled(bar, 2.0, Color32::from_gray(45));
                let fill = egui::Rect::from_min_size(
                    bar.min,
                    egui::vec2(bar.width() * activity, bar.height()),
                );
                ui.painter().rect_filled(
                    fill,
                    2.0,
                    Color32::from_rgb(110, 190, 140),
                );
            });
        }

        if !mesh.markers().is_empty() {
            ui.add_space(8.0);
            ui.heading("Markers");
            ui.separator();
            for marker in mesh.markers() {
                let selected = state.selection.is_active(TargetKind::Marker, &marker.id);
                if ui.selectable_label(selected, &marker.label).clicked() {
                    state.selection.toggle(Target::marker(&marker.id));
                }
            }
        }
    });
}
