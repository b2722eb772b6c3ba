mod app;
mod color;
mod state;
mod ui;

use app::TradeMapApp;
use clap::Parser;
use eframe::egui;
use state::AppState;
use trade_map::config::SourceArgs;

#[derive(Parser, Debug)]
#[command(name = "trade-map")]
#[command(about = "Lithium and cobalt international trade viewer")]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(cli.source.data_source());

    eframe::run_native(
        "Trade Map – Lithium & Cobalt",
        options,
        Box::new(move |_cc| Ok(Box::new(TradeMapApp::new(state)))),
    )
}
