use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use super::model::{PartnerVolume, TradeDataset};

// ---------------------------------------------------------------------------
// Selection – what the user picked
// ---------------------------------------------------------------------------

/// Time granularity of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One row per source record for a `YYYYMM` period.
    #[default]
    Monthly,
    /// Monthly rows summed per partner over a `YYYY` year.
    Annual,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Monthly => write!(f, "monthly"),
            ViewMode::Annual => write!(f, "annual"),
        }
    }
}

/// A complete user selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub mode: ViewMode,
    pub commodity_code: String,
    pub reporter: String,
    /// Period to show in monthly mode.
    pub period: String,
    /// Year to show in annual mode.
    pub year: String,
}

impl Selection {
    /// Initial selection: the first value of every dimension, monthly view.
    pub fn default_for(dataset: &TradeDataset) -> Self {
        let first = |set: &BTreeSet<String>| set.iter().next().cloned().unwrap_or_default();
        Selection {
            mode: ViewMode::Monthly,
            commodity_code: first(&dataset.commodity_codes),
            reporter: first(&dataset.reporters),
            period: first(&dataset.periods),
            year: first(&dataset.years),
        }
    }

    /// The period or year that applies to the current mode.
    pub fn period_or_year(&self) -> &str {
        match self.mode {
            ViewMode::Monthly => &self.period,
            ViewMode::Annual => &self.year,
        }
    }

    /// Human-readable chart title for this selection.
    pub fn title(&self) -> String {
        let span = match self.mode {
            ViewMode::Monthly => format!("period: {}", self.period),
            ViewMode::Annual => format!("year: {}", self.year),
        };
        format!(
            "{} imports of {} ({span}) [log10(net weight)]",
            self.reporter, self.commodity_code
        )
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Rows to render for `selection`.
///
/// Monthly: records whose period, commodity and reporter match exactly, in
/// dataset order, weights unchanged.
///
/// Annual: records whose year, commodity and reporter match, summed per
/// (`partner`, `partner_iso3`) and emitted in first-seen order.
///
/// No match is an empty vector, not an error.
pub fn query(dataset: &TradeDataset, selection: &Selection) -> Vec<PartnerVolume> {
    let key = selection.period_or_year();
    let matching = dataset.records.iter().filter(|rec| {
        rec.commodity_code == selection.commodity_code
            && rec.reporter == selection.reporter
            && match selection.mode {
                ViewMode::Monthly => rec.period == key,
                ViewMode::Annual => rec.year() == key,
            }
    });

    match selection.mode {
        ViewMode::Monthly => matching
            .map(|rec| PartnerVolume {
                partner: rec.partner.clone(),
                partner_iso3: rec.partner_iso3.clone(),
                net_weight: rec.net_weight,
            })
            .collect(),
        ViewMode::Annual => {
            let mut rows: Vec<PartnerVolume> = Vec::new();
            let mut slot: HashMap<(&str, &str), usize> = HashMap::new();
            for rec in matching {
                let group = (rec.partner.as_str(), rec.partner_iso3.as_str());
                match slot.get(&group) {
                    Some(&i) => rows[i].net_weight += rec.net_weight,
                    None => {
                        slot.insert(group, rows.len());
                        rows.push(PartnerVolume {
                            partner: rec.partner.clone(),
                            partner_iso3: rec.partner_iso3.clone(),
                            net_weight: rec.net_weight,
                        });
                    }
                }
            }
            rows
        }
    }
}
