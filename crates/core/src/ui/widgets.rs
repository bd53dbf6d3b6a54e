//! Small building blocks shared by the scenes and the player card

use std::f32::consts::{FRAC_PI_2, TAU};

use egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, Ui};

use super::theme::{BRAND_GREEN, BRAND_PURPLE, MUTED};
use super::WrapPlatform;

/// Uppercase caption in brand purple
pub fn caption(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text.to_uppercase()).small().color(BRAND_PURPLE));
}

/// Bordered tile with a caption and a large value
pub fn stat_tile(ui: &mut Ui, label: &str, value: &str, accent: Color32) {
    egui::Frame::new()
        .stroke(Stroke::new(2.0, BRAND_PURPLE.gamma_multiply(0.4)))
        .corner_radius(12.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_min_width(140.0);
            caption(ui, label);
            ui.label(RichText::new(value).size(22.0).strong().color(accent));
        });
}

/// Circular avatar, or the name's initial when there is no image
pub fn avatar<P: WrapPlatform>(
    ui: &mut Ui,
    platform: &P,
    url: Option<&str>,
    name: &str,
    size: f32,
) {
    if let Some(url) = url {
        ui.add(
            egui::Image::new(platform.avatar_source(url))
                .fit_to_exact_size(egui::vec2(size, size))
                .corner_radius(size / 2.0),
        );
        return;
    }

    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), Sense::hover());
    let painter = ui.painter_at(rect);
    let radius = size / 2.0 - 1.0;
    painter.circle_filled(rect.center(), radius, Color32::from_white_alpha(16));
    painter.circle_stroke(rect.center(), radius, Stroke::new(2.0, BRAND_PURPLE));
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "N".to_string());
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        initial,
        FontId::proportional(size * 0.45),
        ui.visuals().strong_text_color(),
    );
}

/// Ring filled clockwise from twelve o'clock by `degrees`, with text inside
pub fn progress_ring(ui: &mut Ui, degrees: f64, size: f32, value: &str, unit: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let width = 10.0;
    let radius = size / 2.0 - width;

    painter.circle_stroke(center, radius, Stroke::new(width, MUTED.gamma_multiply(0.25)));

    let sweep = (degrees.clamp(0.0, 360.0) as f32 / 360.0) * TAU;
    if sweep > 0.0 {
        let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
        let points: Vec<egui::Pos2> = (0..=steps)
            .map(|i| {
                let angle = -FRAC_PI_2 + sweep * i as f32 / steps as f32;
                center + egui::vec2(angle.cos(), angle.sin()) * radius
            })
            .collect();
        painter.add(egui::Shape::line(points, Stroke::new(width, BRAND_GREEN)));
    }

    painter.text(
        center - egui::vec2(0.0, 8.0),
        Align2::CENTER_CENTER,
        value,
        FontId::proportional(size * 0.2),
        BRAND_GREEN,
    );
    painter.text(
        center + egui::vec2(0.0, size * 0.14),
        Align2::CENTER_CENTER,
        unit,
        FontId::proportional(12.0),
        BRAND_GREEN,
    );
}

/// Name on the left, muted value on the right
pub fn list_row(ui: &mut Ui, name: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(name).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(value).color(MUTED));
        });
    });
}
