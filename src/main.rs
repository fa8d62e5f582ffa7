// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod config;
mod engine;
mod gui;
mod indicators;
mod telemetry;
mod types;
mod visualizer;
use eframe::egui;
// 入口函数
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = config::global()?.clone();
    log::info!(
        "Ground station: {:.1}s run, generator {}ms, refresher {}ms",
        config.total_duration_secs,
        config.generator_period_ms,
        config.refresher_period_ms
    );
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1400.0, 700.0])
        .with_min_inner_size([900.0, 500.0])
        .with_title("Ground Station");
    let app = gui::GroundStationApp::new(config)?;
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Ground Station",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("failed to start the window: {err}"))
}
