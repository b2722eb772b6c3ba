use std::collections::BTreeSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// TradeRecord – one normalized row of the source CSV
// ---------------------------------------------------------------------------

/// A single monthly trade observation that survived normalization.
///
/// `year` is not stored; it is always derived from `period`.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    /// `YYYYMM`, trimmed.
    pub period: String,
    /// HS commodity code, trimmed.
    pub commodity_code: String,
    pub reporter: String,
    /// Free-text partner name as it appears in the source.
    pub partner: String,
    /// ISO 3166-1 alpha-3 code resolved from `partner`.
    pub partner_iso3: String,
    /// Finite, non-negative net weight.
    pub net_weight: f64,
}

impl TradeRecord {
    /// First four characters of `period`.
    pub fn year(&self) -> &str {
        year_of(&self.period)
    }
}

/// Character-safe four-character prefix of a period string.
pub fn year_of(period: &str) -> &str {
    match period.char_indices().nth(4) {
        Some((idx, _)) => &period[..idx],
        None => period,
    }
}

// ---------------------------------------------------------------------------
// LoadStats – what normalization threw away
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows read from the CSV (excluding the header).
    pub rows_read: usize,
    /// Rows the CSV reader could not parse.
    pub malformed: usize,
    /// Rows whose partner had no ISO3 code.
    pub unresolved_partner: usize,
    /// Rows whose net weight was missing, non-numeric, non-finite or negative.
    pub invalid_net_weight: usize,
}

impl LoadStats {
    pub fn dropped(&self) -> usize {
        self.malformed + self.unresolved_partner + self.invalid_net_weight
    }
}

// ---------------------------------------------------------------------------
// TradeDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The normalized dataset plus the distinct values offered as selections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeDataset {
    /// Records in source order.
    pub records: Vec<TradeRecord>,
    pub commodity_codes: BTreeSet<String>,
    pub reporters: BTreeSet<String>,
    pub periods: BTreeSet<String>,
    pub years: BTreeSet<String>,
    pub stats: LoadStats,
}

impl TradeDataset {
    /// Build the selection indices from the normalized records.
    pub fn from_records(records: Vec<TradeRecord>, stats: LoadStats) -> Self {
        let mut commodity_codes = BTreeSet::new();
        let mut reporters = BTreeSet::new();
        let mut periods = BTreeSet::new();
        let mut years = BTreeSet::new();

        for rec in &records {
            commodity_codes.insert(rec.commodity_code.clone());
            reporters.insert(rec.reporter.clone());
            periods.insert(rec.period.clone());
            years.insert(rec.year().to_string());
        }

        TradeDataset {
            records,
            commodity_codes,
            reporters,
            periods,
            years,
            stats,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PartnerVolume – one row handed to the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerVolume {
    pub partner: String,
    pub partner_iso3: String,
    pub net_weight: f64,
}
