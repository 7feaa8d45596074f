// main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result {
    init_logging();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 820.0])
            .with_min_inner_size([640.0, 480.0]),
        centered: true,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        multiangle::host::PLUGIN_NAME,
        options,
        Box::new(|cc| Ok(Box::new(multiangle::app::HelperApp::new(cc)))),
    )
}
