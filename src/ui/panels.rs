use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use trade_map::data::commodity::CommodityDescription;
use trade_map::data::query::ViewMode;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- View granularity ----
            ui.strong("View");
            let mut mode = state.selection.mode;
            ui.horizontal(|ui: &mut Ui| {
                ui.radio_value(&mut mode, ViewMode::Monthly, "Monthly");
                ui.radio_value(&mut mode, ViewMode::Annual, "Annual");
            });
            if mode != state.selection.mode {
                state.set_mode(mode);
            }
            ui.separator();

            // ---- Commodity ----
            ui.strong("Commodity (HS code)");
            if let Some(code) = choice(
                ui,
                "cmdcode",
                &state.selection.commodity_code,
                &dataset.commodity_codes,
            ) {
                state.set_commodity(code);
            }
            match state.description() {
                CommodityDescription::Known(text) => {
                    ui.label(RichText::new(text).italics());
                }
                CommodityDescription::Unknown => {
                    ui.label(
                        RichText::new(format!(
                            "HS code {}: no description available",
                            state.selection.commodity_code
                        ))
                        .color(Color32::YELLOW),
                    );
                }
            }
            ui.separator();

            // ---- Reporter ----
            ui.strong("Reporter");
            let reporters = &dataset.reporters;
            if let Some(reporter) = choice(ui, "reporter", &state.selection.reporter, reporters) {
                state.set_reporter(reporter);
            }
            ui.separator();

            // ---- Period / year ----
            match state.selection.mode {
                ViewMode::Monthly => {
                    ui.strong("Period (YYYYMM)");
                    let periods = &dataset.periods;
                    if let Some(period) = choice(ui, "period", &state.selection.period, periods) {
                        state.set_period(period);
                    }
                }
                ViewMode::Annual => {
                    ui.strong("Year (YYYY)");
                    if let Some(year) = choice(ui, "year", &state.selection.year, &dataset.years) {
                        state.set_year(year);
                    }
                }
            }
            ui.separator();

            // ---- Colour legend ----
            if let Some(scale) = &state.color_scale {
                ui.strong("log₁₀(net weight)");
                for (value, color) in scale.legend_entries(5) {
                    ui.label(RichText::new(format!("■ {value:.2}")).color(color));
                }
            }
        });
}

/// Combo box over `values`; returns the newly picked value, if any.
fn choice(ui: &mut Ui, id: &str, current: &str, values: &BTreeSet<String>) -> Option<String> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for value in values {
                if ui.selectable_label(current == value, value).clicked() && current != value {
                    picked = Some(value.clone());
                }
            }
        });
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records from {} ({} rows dropped), {} shown",
                ds.len(),
                state.cache.source(),
                ds.stats.dropped(),
                state.rows.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open trade data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_path(path);
    }
}
