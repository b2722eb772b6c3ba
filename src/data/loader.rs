use std::collections::BTreeSet;

use csv::{ReaderBuilder, StringRecord};

use super::country::CountryResolver;
use super::model::{LoadStats, TradeDataset, TradeRecord};
use super::source::DataSource;
use crate::error::{Result, TradeError};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch the CSV from `source` and normalize it.
pub fn load(source: &DataSource, resolver: &CountryResolver) -> Result<TradeDataset> {
    log::info!("Loading trade data from {source}");
    let bytes = source.fetch()?;
    let dataset = parse_csv(&bytes, resolver)?;
    log::info!(
        "Loaded {} trade records from {source} ({} of {} rows dropped)",
        dataset.len(),
        dataset.stats.dropped(),
        dataset.stats.rows_read
    );
    Ok(dataset)
}

/// Normalize raw CSV bytes into a [`TradeDataset`].
///
/// Expected header (case-insensitive, surrounding whitespace and a leading
/// byte-order mark are ignored): `period`, `cmdcode`, `reporter`, `partner`,
/// `netwgt`. Other columns are ignored.
///
/// Rows are kept only when the partner resolves to an ISO3 code and `netwgt`
/// parses to a finite, non-negative number. The result depends on nothing but
/// `bytes` and the resolver, so loading the same bytes twice gives the same
/// dataset.
pub fn parse_csv(bytes: &[u8], resolver: &CountryResolver) -> Result<TradeDataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns = Columns::locate(reader.headers()?)?;

    let mut records = Vec::new();
    let mut stats = LoadStats::default();
    let mut unresolved: BTreeSet<String> = BTreeSet::new();

    for (row_no, result) in reader.records().enumerate() {
        stats.rows_read += 1;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("Skipping malformed CSV row {row_no}: {e}");
                stats.malformed += 1;
                continue;
            }
        };

        let partner = columns.field(&row, columns.partner);
        let Some(partner_iso3) = resolver.resolve(partner) else {
            stats.unresolved_partner += 1;
            unresolved.insert(partner.to_string());
            continue;
        };

        let Some(net_weight) = parse_net_weight(columns.field(&row, columns.netwgt)) else {
            stats.invalid_net_weight += 1;
            continue;
        };

        records.push(TradeRecord {
            period: columns.field(&row, columns.period).to_string(),
            commodity_code: columns.field(&row, columns.cmdcode).to_string(),
            reporter: columns.field(&row, columns.reporter).to_string(),
            partner: partner.to_string(),
            partner_iso3,
            net_weight,
        });
    }

    if !unresolved.is_empty() {
        log::debug!("Partners without ISO3 code: {unresolved:?}");
    }

    Ok(TradeDataset::from_records(records, stats))
}

// ---------------------------------------------------------------------------
// Header handling
// ---------------------------------------------------------------------------

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    period: usize,
    cmdcode: usize,
    reporter: usize,
    partner: usize,
    netwgt: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |wanted: &'static str| {
            names
                .iter()
                .position(|h| h == wanted)
                .ok_or(TradeError::MissingColumn(wanted))
        };

        Ok(Columns {
            period: find("period")?,
            cmdcode: find("cmdcode")?,
            reporter: find("reporter")?,
            partner: find("partner")?,
            netwgt: find("netwgt")?,
        })
    }

    /// Trimmed field, empty when the row is short.
    fn field<'r>(&self, row: &'r StringRecord, idx: usize) -> &'r str {
        row.get(idx).unwrap_or("").trim()
    }
}

fn normalize_header(h: &str) -> String {
    h.trim_matches(|c: char| c == '\u{feff}' || c.is_whitespace())
        .to_lowercase()
}

/// Coerce a `netwgt` cell. Empty, non-numeric, non-finite and negative values
/// give `None`.
fn parse_net_weight(s: &str) -> Option<f64> {
    let v = s.trim().parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0).then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::country::CountryLookup;

    struct NoLookup;

    impl CountryLookup for NoLookup {
        fn lookup(&self, name: &str) -> Option<String> {
            match name {
                "Chile" => Some("CHL".to_string()),
                "Argentina" => Some("ARG".to_string()),
                _ => None,
            }
        }
    }

    fn resolver() -> CountryResolver {
        CountryResolver::new(Box::new(NoLookup))
    }

    const SAMPLE: &str = "\u{feff} Period ,CmdCode, REPORTER ,Partner,NetWgt,extra\n\
        201305,283691,\"Korea, Rep.\",Chile,100,x\n\
        201306,283691,\"Korea, Rep.\",Argentina,250,x\n\
        201306,283691,\"Korea, Rep.\",World,900,x\n";

    #[test]
    fn test_normalizes_headers_and_fields() {
        let csv = "\u{feff} Period ,CmdCode, REPORTER ,Partner,NetWgt,extra\n\
                   \" 201305 \", 283691 ,\" Korea, Rep. \", Chile ,\" 100.5 \",x\n";
        let ds = parse_csv(csv.as_bytes(), &resolver()).unwrap();
        assert_eq!(ds.len(), 1);
        let rec = &ds.records[0];
        assert_eq!(rec.period, "201305");
        assert_eq!(rec.year(), "2013");
        assert_eq!(rec.commodity_code, "283691");
        assert_eq!(rec.reporter, "Korea, Rep.");
        assert_eq!(rec.partner, "Chile");
        assert_eq!(rec.partner_iso3, "CHL");
        assert_eq!(rec.net_weight, 100.5);
    }

    #[test]
    fn test_drops_unusable_rows() {
        let csv = "period,cmdcode,reporter,partner,netwgt\n\
                   202301,283691,Japan,Chile,100\n\
                   202301,283691,Japan,Other Asia, nes,50\n\
                   202301,283691,Japan,Argentina,\n\
                   202301,283691,Japan,Argentina,abc\n\
                   202301,283691,Japan,Argentina,-5\n\
                   202301,283691,Japan,Argentina,NaN\n\
                   202301,283691,Japan,Viet Nam,0\n";
        let ds = parse_csv(csv.as_bytes(), &resolver()).unwrap();

        let partners: Vec<&str> = ds.records.iter().map(|r| r.partner.as_str()).collect();
        assert_eq!(partners, vec!["Chile", "Viet Nam"]);
        assert!(ds
            .records
            .iter()
            .all(|r| r.partner_iso3.len() == 3 && r.net_weight.is_finite() && r.net_weight >= 0.0));
        assert_eq!(ds.stats.rows_read, 7);
        assert_eq!(ds.stats.unresolved_partner, 1);
        assert_eq!(ds.stats.invalid_net_weight, 4);
    }

    #[test]
    fn test_unquoted_comma_partner_is_unresolved() {
        // "Other Asia, nes" unquoted shifts the columns: partner = "Other Asia".
        let csv = "period,cmdcode,reporter,partner,netwgt\n\
                   202301,283691,Japan,Other Asia, nes,50\n";
        let ds = parse_csv(csv.as_bytes(), &resolver()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.stats.unresolved_partner, 1);
    }

    #[test]
    fn test_quoted_aggregate_partner_is_dropped() {
        let csv = "period,cmdcode,reporter,partner,netwgt\n\
                   202301,283691,Japan,\"Other Asia, nes\",50\n";
        let ds = parse_csv(csv.as_bytes(), &resolver()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.stats.unresolved_partner, 1);
    }

    #[test]
    fn test_short_row_counts_as_invalid_weight() {
        let csv = "period,cmdcode,reporter,partner,netwgt\n202301,283691,Japan,Chile\n";
        let ds = parse_csv(csv.as_bytes(), &resolver()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.stats.invalid_net_weight, 1);
    }

    #[test]
    fn test_missing_column() {
        let csv = "period,cmdcode,reporter,partner\n202301,283691,Japan,Chile\n";
        let err = parse_csv(csv.as_bytes(), &resolver()).unwrap_err();
        assert!(matches!(err, TradeError::MissingColumn("netwgt")));
    }

    #[test]
    fn test_empty_input_is_missing_column() {
        let err = parse_csv(b"", &resolver()).unwrap_err();
        assert!(matches!(err, TradeError::MissingColumn(_)));
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let ds = parse_csv(b"period,cmdcode,reporter,partner,netwgt\n", &resolver()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.stats, LoadStats::default());
    }

    #[test]
    fn test_loading_twice_is_identical() {
        let r = resolver();
        let first = parse_csv(SAMPLE.as_bytes(), &r).unwrap();
        let second = parse_csv(SAMPLE.as_bytes(), &r).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_from_local_source() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"period,cmdcode,reporter,partner,netwgt\n202301,283691,Japan,Chile,7\n")
            .unwrap();
        let source = DataSource::Local(file.path().to_path_buf());

        let ds = load(&source, &resolver()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].net_weight, 7.0);
    }

    #[test]
    fn test_parse_net_weight() {
        assert_eq!(parse_net_weight(" 12 "), Some(12.0));
        assert_eq!(parse_net_weight("1e3"), Some(1000.0));
        assert_eq!(parse_net_weight("0"), Some(0.0));
        assert_eq!(parse_net_weight("-1"), None);
        assert_eq!(parse_net_weight("inf"), None);
        assert_eq!(parse_net_weight(""), None);
    }
}
