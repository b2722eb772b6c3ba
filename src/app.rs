use eframe::egui::{self, RichText};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TradeMapApp {
    pub state: AppState,
    /// Title last pushed to the native window.
    window_title: String,
}

impl TradeMapApp {
    /// Build the app and perform the one-time dataset load.
    pub fn new(mut state: AppState) -> Self {
        state.load();
        Self {
            state,
            window_title: String::new(),
        }
    }

    /// F5 / Ctrl+R refetch the configured source.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let reload = ctx.input(|i| {
            i.key_pressed(egui::Key::F5) || (i.modifiers.command && i.key_pressed(egui::Key::R))
        });
        if reload {
            log::info!("Reloading {}", self.state.cache.source());
            self.state.reload();
        }
    }

    /// Keep the native window title in step with the selection.
    fn sync_window_title(&mut self, ctx: &egui::Context) {
        let title = match &self.state.dataset {
            Some(_) => format!("Trade Map – {}", self.state.selection.title()),
            None => "Trade Map – Lithium & Cobalt".to_string(),
        };
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }
}

impl eframe::App for TradeMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        self.sync_window_title(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom status bar: data provenance ----
        egui::TopBottomPanel::bottom("source_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Source: UN COMTRADE Database").small().weak());
                if let Some(ds) = &self.state.dataset {
                    ui.separator();
                    ui.label(
                        RichText::new(format!(
                            "{} rows read, {} unresolved partners, {} invalid weights",
                            ds.stats.rows_read,
                            ds.stats.unresolved_partner,
                            ds.stats.invalid_net_weight
                        ))
                        .small()
                        .weak(),
                    );
                }
            });
        });

        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            plot::volume_view(ui, &self.state);
        });
    }
}
