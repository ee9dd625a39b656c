//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{inspector, region_panel, status_bar};
use crate::viewport::render::PaintStats;
use crate::viewport::ViewportPanel;

/// Main application
pub struct SomaApp {
    state: AppState,
    main_view: ViewportPanel,
    pip_view: ViewportPanel,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// Stats from the last main-view paint, for the status bar
    last_stats: PaintStats,
}

impl SomaApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        initial_model: Option<shared::ModelDescription>,
    ) -> Self {
        let mut state = AppState::default();

        // CLI argument takes priority, then the built-in demo model
        match initial_model {
            Some(desc) => state.load_model(&desc),
            None => state.load_model(&crate::fixtures::demo_model()),
        }

        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let main_view = ViewportPanel::new("main-view");
        let mut pip_view = ViewportPanel::new("pip-view");
        // The inset starts on the opposite side of the model and stays lean
        pip_view.camera.yaw += std::f32::consts::PI;
        pip_view.show_hud = false;

        let last_font_size = state.settings.ui.font_size;

        Self {
            state,
            main_view,
            pip_view,
            last_font_size,
            last_stats: PaintStats::default(),
        }
    }

    fn pip_rect(&self, central: egui::Rect) -> egui::Rect {
        let side = central.width().min(central.height()) * self.state.settings.pip.fraction;
        egui::Rect::from_min_size(
            egui::pos2(central.right() - side - 12.0, central.bottom() - side - 12.0),
            egui::vec2(side, side),
        )
    }
}

impl eframe::App for SomaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        // Advance the demo activity driver; the render pass only ever sees
        // the per-frame color snapshot taken below
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        self.state.activity.update(dt);

        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.main_view, &mut self.pip_view);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.main_view);
            });
        });

        // ── Status bar ────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar::show(ui, &self.state, &self.last_stats);
        });

        let mesh = self.state.mesh.clone();

        // ── Side panels ───────────────────────────────────────
        if let Some(mesh) = &mesh {
            if self.state.settings.ui.show_region_panel {
                egui::SidePanel::left("region_panel")
                    .default_width(220.0)
                    .show(ctx, |ui| {
                        region_panel::show(ui, &mut self.state, mesh);
                    });
            }
            if self.state.settings.ui.show_inspector {
                egui::SidePanel::right("inspector")
                    .default_width(240.0)
                    .show(ctx, |ui| {
                        inspector::show(ui, &mut self.state, mesh);
                    });
            }
        }

        // ── Central viewport + picture-in-picture ─────────────
        // Hover is re-derived by whichever view is under the pointer
        self.state.selection.set_hovered(None);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let Some(mesh) = &mesh else {
                    ui.centered_and_justified(|ui| {
                        ui.heading("No model loaded — File → Open model…");
                    });
                    return;
                };

                let colors = self.state.activity.region_colors(mesh);
                let central = ui.max_rect();
                self.last_stats =
                    self.main_view
                        .show(ui, central, &mut self.state, mesh, &colors);

                if self.state.settings.pip.enabled {
                    let pip = self.pip_rect(central);
                    self.pip_view.show(ui, pip, &mut self.state, mesh, &colors);
                    ui.painter().rect_stroke(
                        pip,
                        2.0,
                        egui::Stroke::new(1.0, egui::Color32::from_gray(90)),
                        egui::StrokeKind::Outside,
                    );
                }
            });

        menus::settings_window(ctx, &mut self.state);

        // Inertia and auto-rotation keep moving without input events
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.settings.save();
        tracing::info!("settings saved");
    }
}
