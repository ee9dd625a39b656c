mod app;
mod ui;

// Re-export library modules so that `crate::state`, `crate::viewport`,
// etc. resolve to the lib crate types everywhere in the binary.
pub use somaview_gui_lib::fixtures;
pub use somaview_gui_lib::harness;
pub use somaview_gui_lib::state;
pub use somaview_gui_lib::viewport;

use app::SomaApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "somaview_gui=info".into()),
        )
        .init();

    // Parse --model <path> argument
    let initial_model = parse_model_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("somaview — anatomical model viewer")
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "somaview-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(SomaApp::new(cc, initial_model)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_model_arg() -> Option<shared::ModelDescription> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--model" && i + 1 < args.len() {
            let path = &args[i + 1];
            match std::fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<shared::ModelDescription>(&json) {
                    Ok(model) => {
                        tracing::info!(
                            "Loaded model from {path} ({} vertices, {} faces)",
                            model.vertex_count(),
                            model.face_count()
                        );
                        return Some(model);
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse model JSON from {path}: {e}");
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to read model file {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
