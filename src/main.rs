use clap::Parser;
use dinamo_transfers::app::TransferDashboardApp;
use dinamo_transfers::config::{Cli, DashboardConfig};
use dinamo_transfers::data::loader;
use dinamo_transfers::state::AppState;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let dataset = match &cli.data {
        Some(path) => loader::load_file(path)?,
        None => loader::load_bundled()?,
    };
    let state = AppState::new(dataset, DashboardConfig::from(&cli));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dinamo Zagreb – Transfers",
        options,
        Box::new(|_cc| Ok(Box::new(TransferDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
