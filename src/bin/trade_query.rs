//! Headless access to the trade data: print the rows the viewer would plot.
//!
//! Usage:
//!   trade-query --cmdcode 283691 --reporter "Korea, Rep." --period 202301
//!   trade-query --mode annual --cmdcode 283691 --reporter Japan --period 2023 --json
//!   trade-query --list

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use trade_map::config::SourceArgs;
use trade_map::data::commodity::describe;
use trade_map::data::country::CountryResolver;
use trade_map::data::loader;
use trade_map::data::model::TradeDataset;
use trade_map::data::query::{query, Selection, ViewMode};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Monthly,
    Annual,
}

impl From<Mode> for ViewMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Monthly => ViewMode::Monthly,
            Mode::Annual => ViewMode::Annual,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "trade-query")]
#[command(about = "Query lithium/cobalt trade volumes by partner")]
struct Args {
    #[command(flatten)]
    source: SourceArgs,

    /// Time granularity
    #[arg(long, value_enum, default_value = "monthly")]
    mode: Mode,

    /// HS commodity code
    #[arg(long)]
    cmdcode: Option<String>,

    /// Reporting country, as spelled in the dataset
    #[arg(long)]
    reporter: Option<String>,

    /// YYYYMM in monthly mode, YYYY in annual mode
    #[arg(long)]
    period: Option<String>,

    /// Emit rows as JSON instead of a text table
    #[arg(long, default_value = "false")]
    json: bool,

    /// List the selectable commodity codes, reporters, periods and years
    #[arg(long, default_value = "false")]
    list: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        log::error!("trade-query failed: {e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {

    let source = args.source.data_source();
    let dataset = loader::load(&source, &CountryResolver::default())
        .with_context(|| format!("loading trade data from {source}"))?;

    if args.list {
        print_choices(&dataset);
        return Ok(());
    }

    let (Some(cmdcode), Some(reporter), Some(period)) = (args.cmdcode, args.reporter, args.period)
    else {
        bail!("--cmdcode, --reporter and --period are required unless --list is given");
    };

    let mode = ViewMode::from(args.mode);
    let selection = selection_for(mode, &cmdcode, &reporter, &period);

    let rows = query(&dataset, &selection);

    if args.json {
        let out = serde_json::json!({
            "title": selection.title(),
            "mode": mode,
            "description": describe(&selection.commodity_code).to_string(),
            "rows": rows,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", selection.title());
    println!("HS {}: {}", selection.commodity_code, describe(&selection.commodity_code));
    println!();
    if rows.is_empty() {
        println!("No data for this selection.");
        return Ok(());
    }
    println!("{:<40} {:<5} {:>18}", "partner", "iso3", "net weight");
    for row in &rows {
        println!("{:<40} {:<5} {:>18.0}", row.partner, row.partner_iso3, row.net_weight);
    }
    Ok(())
}

/// `when` is a `YYYYMM` period in monthly mode and a `YYYY` year in annual mode.
fn selection_for(mode: ViewMode, cmdcode: &str, reporter: &str, when: &str) -> Selection {
    let when = when.trim().to_string();
    let (period, year) = match mode {
        ViewMode::Monthly => (when, String::new()),
        ViewMode::Annual => (String::new(), when),
    };
    Selection {
        mode,
        commodity_code: cmdcode.trim().to_string(),
        reporter: reporter.trim().to_string(),
        period,
        year,
    }
}

fn print_choices(dataset: &TradeDataset) {
    let join = |set: &std::collections::BTreeSet<String>| {
        set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    };
    println!("records:         {}", dataset.len());
    println!("commodity codes: {}", join(&dataset.commodity_codes));
    println!("reporters:       {}", join(&dataset.reporters));
    println!("periods:         {}", join(&dataset.periods));
    println!("years:           {}", join(&dataset.years));
}
