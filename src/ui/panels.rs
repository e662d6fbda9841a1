use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::series::{format_eur, Endpoint};
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Right side panel – season selector and charts
// ---------------------------------------------------------------------------

/// Render the season selector above the two season charts.
pub fn chart_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            season_selector(ui, state);
            ui.strong("Season");
        });
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            plot::fee_chart(ui, state);
            ui.add_space(12.0);
            plot::direction_chart(ui, state);
        });
}

fn season_selector(ui: &mut Ui, state: &mut AppState) {
    // Clone what we need so we can mutate state inside the combo box.
    let options = state.controller.season_options().to_vec();
    let current = state.controller.selected_season().unwrap_or("—").to_string();

    egui::ComboBox::from_id_salt("season_select")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for season in &options {
                if ui.selectable_label(current == *season, season).clicked() {
                    state.select_season(season);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Left side panel – legend and transfers of the season
// ---------------------------------------------------------------------------

/// Render the legend and the table of the selected season's transfers.
pub fn transfer_panel(ui: &mut Ui, state: &AppState) {
    let controller = &state.controller;
    let season = controller.selected_season().unwrap_or("—");
    ui.heading(format!("Transfers {season}"));
    ui.separator();

    for (endpoint, label) in [(Endpoint::Origin, "Club from"), (Endpoint::Destination, "Club to")] {
        ui.label(RichText::new(format!("● {label}")).color(color::endpoint_color(endpoint)));
    }
    ui.separator();

    let records = controller.selected_records();
    if records.is_empty() {
        ui.label("No transfers this season.");
        return;
    }

    let reference = controller.reference_club();
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Player", "From", "To", "Fee"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for r in &records {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(&r.player_name);
                    });
                    row.col(|ui: &mut Ui| {
                        club_label(ui, &r.club_from, reference);
                    });
                    row.col(|ui: &mut Ui| {
                        club_label(ui, &r.club_to, reference);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_eur(r.fee));
                    });
                });
            }
        });
}

fn club_label(ui: &mut Ui, club: &str, reference: &str) {
    if club == reference {
        ui.label(RichText::new(club).strong());
    } else {
        ui.label(club);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let controller = &state.controller;
        ui.label(format!(
            "{} transfers loaded, {} in {}",
            controller.dataset().len(),
            controller.view().transfer_count,
            controller.selected_season().unwrap_or("—"),
        ));

        ui.separator();

        if ui
            .selectable_label(state.shade_by_fee, "Shade arcs by fee")
            .clicked()
        {
            state.shade_by_fee = !state.shade_by_fee;
        }
        if ui.button("Reset view").clicked() {
            state.reset_map_view();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open transfer data")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
