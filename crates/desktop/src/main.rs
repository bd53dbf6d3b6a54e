// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod app;
mod avatar_cache;
mod config;
mod ui;

use app::NexusApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

const ICON_SIZE: u32 = 64;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nexus_desktop=debug,nexus_core=debug")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([640.0, 480.0])
            .with_icon(window_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "Nexus Wrap",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(NexusApp::new(&cc.egui_ctx)))
        }),
    )
}

/// Brand ring on a transparent square: purple outside, green inner edge
fn window_icon() -> egui::IconData {
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let outer = ICON_SIZE as f32 / 2.0;
    let inner = outer * 0.55;
    let icon = image::RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let distance = ((x as f32 - center).powi(2) + (y as f32 - center).powi(2)).sqrt();
        if distance > outer || distance < inner {
            image::Rgba([0, 0, 0, 0])
        } else if distance < inner + 4.0 {
            image::Rgba([74, 222, 128, 255])
        } else {
            image::Rgba([139, 92, 246, 255])
        }
    });
    egui::IconData {
        rgba: icon.into_raw(),
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}
