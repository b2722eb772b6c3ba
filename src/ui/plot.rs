use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Volume chart (central panel)
// ---------------------------------------------------------------------------

/// Render the selection title, the log10 bar chart and the partner table.
pub fn volume_view(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No trade data loaded  (File → Open CSV… or Reload)");
        });
        return;
    }

    ui.heading(state.selection.title());

    if state.rows.is_empty() {
        ui.label(RichText::new("No data for this selection.").color(Color32::YELLOW));
        return;
    }

    let bars: Vec<Bar> = state
        .display
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let color = state
                .color_scale
                .map(|scale| scale.color_for(row.log_weight))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, row.log_weight)
                .name(format!("{} ({})", row.partner, row.partner_iso3))
                .fill(color)
                .width(0.8)
        })
        .collect();

    let plot_height = (ui.available_height() * 0.55).max(150.0);
    Plot::new("volume_plot")
        .height(plot_height)
        .y_axis_label("log₁₀(net weight)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });

    ui.separator();
    partner_table(ui, state);
}

fn partner_table(ui: &mut Ui, state: &AppState) {
    let max_height = (ui.available_height() - 24.0).max(60.0);
    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(max_height)
        .column(Column::auto())
        .column(Column::auto().at_least(160.0))
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("");
            });
            header.col(|ui| {
                ui.strong("Partner");
            });
            header.col(|ui| {
                ui.strong("ISO3");
            });
            header.col(|ui| {
                ui.strong("Net weight");
            });
        })
        .body(|mut body| {
            for row in &state.rows {
                let swatch = trade_map::data::display::log_volume(row.net_weight)
                    .zip(state.color_scale)
                    .map(|(v, scale)| scale.color_for(v));
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| match swatch {
                        Some(color) => {
                            ui.colored_label(color, "■");
                        }
                        None => {
                            ui.weak("–");
                        }
                    });
                    table_row.col(|ui| {
                        ui.label(&row.partner);
                    });
                    table_row.col(|ui| {
                        ui.label(&row.partner_iso3);
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.0}", row.net_weight));
                    });
                });
            }
        });
}
