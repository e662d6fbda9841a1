use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TransferDashboardApp {
    pub state: AppState,
}

impl TransferDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for TransferDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: season selector and charts ----
        egui::SidePanel::right("chart_panel")
            .default_width(480.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::chart_panel(ui, &mut self.state);
            });

        // ---- Left side panel: transfers of the season ----
        egui::SidePanel::left("transfer_panel")
            .default_width(360.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::transfer_panel(ui, &self.state);
            });

        // ---- Central panel: globe ----
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(crate::color::GLOBE_BACKGROUND))
            .show(ctx, |ui| {
                plot::transfer_map(ui, &self.state);
            });
    }
}
