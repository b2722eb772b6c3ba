/// Data layer: core types, loading, and querying.
///
/// Architecture:
/// ```text
///   local file / URL
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  fetch raw CSV bytes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  loader   │ ──▶ │ country   │  partner name → ISO3
///   └──────────┘     └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ TradeDataset  │  Vec<TradeRecord>, distinct values  (memoized by cache)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  selection → (partner, iso3, net weight) rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  display  │  log10 transform for the colour axis
///   └──────────┘
/// ```

pub mod cache;
pub mod commodity;
pub mod country;
pub mod display;
pub mod loader;
pub mod model;
pub mod query;
pub mod source;
