//! Command-line / environment configuration shared by the binaries.

use std::time::Duration;

use clap::Args;

use crate::data::source::DataSource;

/// Published monthly import dataset.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/sooinkim/trade-map-keei/main/netwgt_import_monthly.csv";

/// Where the trade CSV comes from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Local CSV path or http(s) URL of the trade dataset
    #[arg(long, env = "TRADE_MAP_SOURCE", default_value = DEFAULT_SOURCE_URL)]
    pub source: String,

    /// Timeout for remote fetches, in seconds
    #[arg(long, env = "TRADE_MAP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl SourceArgs {
    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.source, Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        source: SourceArgs,
    }

    #[test]
    fn test_default_points_at_remote_dataset() {
        let cli = Cli::parse_from(["trade-map"]);
        assert!(matches!(cli.source.data_source(), DataSource::Remote { .. }));
        assert_eq!(cli.source.timeout_secs, 30);
    }

    #[test]
    fn test_local_source_override() {
        let cli = Cli::parse_from([
            "trade-map",
            "--source",
            "data/trade.csv",
            "--timeout-secs",
            "5",
        ]);
        match cli.source.data_source() {
            DataSource::Local(path) => assert_eq!(path.to_str(), Some("data/trade.csv")),
            other => panic!("expected local source, got {other}"),
        }
    }
}
