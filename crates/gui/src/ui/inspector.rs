//! Inspector panel: details of the active target plus lighting, fog, and
//! control sliders.

use egui::Ui;

use crate::state::AppState;
use crate::viewport::mesh::AnatomyMesh;
use crate::viewport::picking::TargetKind;

pub fn show(ui: &mut Ui, state: &mut AppState, mesh: &AnatomyMesh) {
    ui.heading("Inspector");
    ui.separator();

    match state.selection.active().cloned() {
        Some(target) => match target.kind {
            TargetKind::Region => show_region(ui, state, mesh, &target.key),
            TargetKind::Marker => show_marker(ui, mesh, &target.key),
        },
        None => {
            ui.weak("Nothing selected");
            ui.weak("Click a region or marker in the view");
        }
    }

    ui.add_space(10.0);
    show_render_settings(ui, state);
}

fn show_region(ui: &mut Ui, state: &AppState, mesh: &AnatomyMesh, key: &str) {
    let Some(index) = mesh.region_by_key(key) else {
        ui.weak(format!("Region '{key}' not in this model"));
        return;
    };
    let region = &mesh.regions()[index];
    let centroid = mesh.centroid_of(index);

    ui.strong(&region.name);
    ui.label(format!("Key: {}", region.key));
    ui.label(format!("Vertices: {}", region.vertices.len()));
    ui.label(format!(
        "Centroid: ({:.2}, {:.2}, {:.2})",
        centroid.x, centroid.y, centroid.z
    ));
    ui.label(format!("Activity: {:.0}%", state.activity.level(index) * 100.0));
}

fn show_marker(ui: &mut Ui, mesh: &AnatomyMesh, id: &str) {
    let Some(index) = mesh.marker_by_id(id) else {
        ui.weak(format!("Marker '{id}' not in this model"));
        return;
    };
    let marker = &mesh.markers()[index];

    ui.strong(&marker.label);
    ui.label(format!("Id: {}", marker.id));
    ui.label(format!(
        "Position: ({:.2}, {:.2}, {:.2})",
        marker.position.x, marker.position.y, marker.position.z
    ));
    if let Some(region) = marker.region {
        ui.label(format!("Region: {}", mesh.regions()[region].name));
    }
    let degree = mesh
        .links()
        .iter()
        .filter(|&&(a, b)| a == index || b == index)
        .count();
    ui.label(format!("Links: {degree}"));
}

fn show_render_settings(ui: &mut Ui, state: &mut AppState) {
    egui::CollapsingHeader::new("Lighting")
        .default_open(false)
        .show(ui, |ui| {
            let lighting = &mut state.settings.lighting;
            ui.add(egui::Slider::new(&mut lighting.ambient, 0.0..=1.0).text("Ambient"));
            ui.add(egui::Slider::new(&mut lighting.diffuse, 0.0..=1.0).text("Diffuse"));
            ui.add(egui::Slider::new(&mut lighting.specular, 0.0..=1.0).text("Specular"));
            ui.add(egui::Slider::new(&mut lighting.shininess, 1.0..=64.0).text("Shininess"));
        });

    egui::CollapsingHeader::new("Depth fog")
        .default_open(false)
        .show(ui, |ui| {
            let fog = &mut state.settings.fog;
            ui.checkbox(&mut fog.enabled, "Enabled");
            ui.add(egui::Slider::new(&mut fog.start, 0.0..=1.0).text("Start"));
            ui.add(egui::Slider::new(&mut fog.end, 0.0..=1.0).text("End"));
            ui.add(egui::Slider::new(&mut fog.floor, 0.0..=1.0).text("Floor"));
            if fog.end < fog.start {
                fog.end = fog.start;
            }
        });

    egui::CollapsingHeader::new("Overlays")
        .default_open(false)
        .show(ui, |ui| {
            let overlay = &mut state.settings.overlay;
            ui.checkbox(&mut overlay.show_boundaries, "Region boundaries");
            ui.checkbox(&mut overlay.show_markers, "Markers");
            ui.checkbox(&mut overlay.show_links, "Marker links");
            ui.checkbox(&mut overlay.show_labels, "Region labels");
        });

    egui::CollapsingHeader::new("Controls")
        .default_open(false)
        .show(ui, |ui| {
            let controls = &mut state.settings.controls;
            ui.add(
                egui::Slider::new(&mut controls.rotate_speed, 0.001..=0.02)
                    .logarithmic(true)
                    .text("Rotate speed"),
            );
            ui.add(egui::Slider::new(&mut controls.damping, 0.5..=0.99).text("Inertia damping"));
            ui.add(
                egui::Slider::new(&mut controls.auto_rotate_step, 0.0..=0.02)
                    .text("Auto-rotate speed"),
            );
        });
}
