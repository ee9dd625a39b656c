use egui::Ui;

use crate::state::AppState;
use crate::viewport::picking::TargetKind;
use crate::viewport::render::PaintStats;

pub fn show(ui: &mut Ui, state: &AppState, stats: &PaintStats) {
    ui.horizontal(|ui| {
        match &state.mesh {
            Some(mesh) => {
                ui.weak(format!(
                    "{}: {} vertices, {} faces",
                    mesh.name(),
                    mesh.vertices().len(),
                    mesh.faces().len()
                ));
            }
            None => {
                ui.weak("No model loaded");
            }
        }

        ui.separator();
        ui.weak(format!(
            "painted {} / culled {}",
            stats.faces_painted, stats.faces_culled
        ));

        if let Some(err) = &state.load_error {
            ui.separator();
            ui.colored_label(egui::Color32::from_rgb(220, 90, 90), err);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            match state.selection.hovered() {
                Some(target) => {
                    let kind = match target.kind {
                        TargetKind::Region => "region",
                        TargetKind::Marker => "marker",
                    };
                    ui.weak(format!("{kind}: {}", target.key));
                }
                None => {
                    ui.weak("drag to rotate · shift-drag / right-drag to pan · wheel to zoom");
                }
            }
        });
    });
}
