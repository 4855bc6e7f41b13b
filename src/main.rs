mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::PortfolioDashboardApp;
use clap::Parser;
use config::Cli;
use data::aggregate::build_view;
use data::normalize::load_portfolio;
use eframe::egui;
use env_logger::Env;
use state::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();

    // The snapshot set is loaded once here; any bad file aborts startup.
    let accounts = cli
        .account_categories()
        .context("loading account categories")?;
    let dataset = load_portfolio(&cli.data_dir, &accounts)
        .with_context(|| format!("loading snapshots from {}", cli.data_dir.display()))?;
    let selection = cli.selection(&dataset);

    if cli.json {
        let view = build_view(&dataset, &selection);
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let state = AppState::new(Arc::new(dataset), selection, cli.data_dir.clone(), accounts);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Portfolio Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(PortfolioDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
