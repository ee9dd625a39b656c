//! Application style configuration

use eframe::egui;

/// Configure initial application styles with given font size
pub fn configure_styles(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();

    // Dark theme
    style.visuals = egui::Visuals::dark();

    // Rounding
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(4);
    for widget in [
        &mut style.visuals.widgets.noninteractive,
        &mut style.visuals.widgets.inactive,
        &mut style.visuals.widgets.hovered,
        &mut style.visuals.widgets.active,
    ] {
        widget.corner_radius = egui::CornerRadius::same(3);
    }

    // Spacing
    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(6.0, 3.0);
    style.spacing.menu_margin = egui::Margin::same(4);

    // Panels slightly darker than the viewport background
    style.visuals.panel_fill = egui::Color32::from_rgb(26, 26, 31);
    style.visuals.window_fill = egui::Color32::from_rgb(32, 32, 38);

    // Selection highlight
    style.visuals.selection.bg_fill = egui::Color32::from_rgb(50, 90, 130);

    apply_text_styles(&mut style, font_size);

    ctx.set_style(style);
}

/// Apply font size to all text styles
pub fn apply_font_size(ctx: &egui::Context, font_size: f32) {
    let mut style = (*ctx.style()).clone();
    apply_text_styles(&mut style, font_size);
    ctx.set_style(style);
}

fn apply_text_styles(style: &mut egui::Style, font_size: f32) {
    use egui::{FontId, TextStyle};

    let sizes = [
        (TextStyle::Body, font_size, false),
        (TextStyle::Button, font_size, false),
        (TextStyle::Small, font_size * 0.85, false),
        (TextStyle::Heading, font_size * 1.3, false),
        (TextStyle::Monospace, font_size, true),
    ];
    for (text_style, size, monospace) in sizes {
        let font = if monospace {
            FontId::monospace(size)
        } else {
            FontId::proportional(size)
        };
        style.text_styles.insert(text_style, font);
    }
}
