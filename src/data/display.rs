use super::model::PartnerVolume;

/// A query row ready for the colour axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub partner: String,
    pub partner_iso3: String,
    pub net_weight: f64,
    /// `log10(net_weight)`.
    pub log_weight: f64,
}

/// `log10` of a volume; `None` for non-positive or non-finite input.
pub fn log_volume(net_weight: f64) -> Option<f64> {
    (net_weight.is_finite() && net_weight > 0.0).then(|| net_weight.log10())
}

/// Attach the log10 transform, dropping rows that have no defined colour.
pub fn display_rows(rows: &[PartnerVolume]) -> Vec<DisplayRow> {
    rows.iter()
        .filter_map(|row| {
            let log_weight = log_volume(row.net_weight)?;
            Some(DisplayRow {
                partner: row.partner.clone(),
                partner_iso3: row.partner_iso3.clone(),
                net_weight: row.net_weight,
                log_weight,
            })
        })
        .collect()
}

/// (min, max) of the log values, `None` when empty.
pub fn log_range(rows: &[DisplayRow]) -> Option<(f64, f64)> {
    rows.iter().map(|r| r.log_weight).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(partner: &str, w: f64) -> PartnerVolume {
        PartnerVolume {
            partner: partner.to_string(),
            partner_iso3: "CHL".to_string(),
            net_weight: w,
        }
    }

    #[test]
    fn test_log_volume() {
        assert_eq!(log_volume(1000.0), Some(3.0));
        assert_eq!(log_volume(1.0), Some(0.0));
        assert_eq!(log_volume(0.0), None);
        assert_eq!(log_volume(-10.0), None);
        assert_eq!(log_volume(f64::NAN), None);
    }

    #[test]
    fn test_display_rows_drop_non_positive() {
        let rows = display_rows(&[row("a", 100.0), row("b", 0.0), row("c", 10.0)]);
        let names: Vec<&str> = rows.iter().map(|r| r.partner.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(rows[0].log_weight, 2.0);
        assert_eq!(log_range(&rows), Some((1.0, 2.0)));
    }

    #[test]
    fn test_empty_range() {
        assert_eq!(log_range(&[]), None);
    }
}
