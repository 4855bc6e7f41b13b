use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PortfolioDashboardApp {
    pub state: AppState,
}

impl PortfolioDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PortfolioDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: latest data ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart above table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let chart_height = ui.available_height() * 0.55;
            plot::value_plot(ui, &self.state, chart_height);
            ui.separator();
            table::summary_table(ui, &mut self.state);
        });
    }
}
