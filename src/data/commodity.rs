use std::fmt;

/// HS codes covered by the dataset and their official short descriptions.
pub const HS_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "253090",
        "Arsenic sulfides, alunite, pozzuolana, earth colours and other mineral substances, n.e.s.",
    ),
    ("283691", "Lithium carbonates"),
    ("282520", "Lithium oxide and hydroxide"),
    (
        "282739",
        "Chlorides (excl. ammonium, calcium, magnesium, aluminium, nickel, and mercury chloride)",
    ),
    (
        "282690",
        "Fluorosilicates, fluoroaluminates and other complex fluorine salts (excl. sodium hexafluoroaluminate \"synthetic cryolite\" and inorganic or organic compounds of mercury)",
    ),
    ("282619", "Fluorides (excl. of aluminium and mercury)"),
    ("260500", "Cobalt ores and concentrates"),
    ("282200", "Cobalt oxides and hydroxides; commercial cobalt oxides"),
    (
        "810520",
        "Cobalt mattes and other intermediate products of cobalt metallurgy; unwrought cobalt; cobalt powders",
    ),
];

/// Result of a description lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommodityDescription {
    Known(&'static str),
    /// Informational: the code is valid data, we just have no text for it.
    Unknown,
}

impl CommodityDescription {
    pub fn is_known(&self) -> bool {
        matches!(self, CommodityDescription::Known(_))
    }
}

impl fmt::Display for CommodityDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommodityDescription::Known(text) => write!(f, "{text}"),
            CommodityDescription::Unknown => write!(f, "no description available"),
        }
    }
}

/// Look up the description of an HS commodity code.
pub fn describe(code: &str) -> CommodityDescription {
    let code = code.trim();
    HS_DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(CommodityDescription::Unknown, |(_, text)| {
            CommodityDescription::Known(text)
        })
}
