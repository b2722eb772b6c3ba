use isocountry::CountryCode;

// ---------------------------------------------------------------------------
// Exception table – checked before any generic lookup
// ---------------------------------------------------------------------------

/// Trade-data spellings that the ISO 3166 names do not match, plus
/// aggregate / non-sovereign entries that must never land on the map.
///
/// `None` means "known, deliberately unmapped".
pub const COUNTRY_EXCEPTIONS: &[(&str, Option<&str>)] = &[
    ("Korea, Rep.", Some("KOR")),
    ("Republic of Korea", Some("KOR")),
    ("Rep. of Korea", Some("KOR")),
    ("United States", Some("USA")),
    ("USA", Some("USA")),
    ("Russian Federation", Some("RUS")),
    ("Russia", Some("RUS")),
    ("Viet Nam", Some("VNM")),
    ("Iran (Islamic Republic of)", Some("IRN")),
    ("Lao People's Democratic Republic", Some("LAO")),
    ("Lao People's Dem. Rep.", Some("LAO")),
    ("Czechia", Some("CZE")),
    ("Dominican Rep.", Some("DOM")),
    ("China", Some("CHN")),
    ("China, Hong Kong SAR", Some("HKG")),
    ("China, Macao SAR", Some("MAC")),
    ("United Kingdom", Some("GBR")),
    ("Türkiye", Some("TUR")),
    ("Turkey", Some("TUR")),
    ("Bolivia (Plurinational State of)", Some("BOL")),
    ("Bolivia", Some("BOL")),
    ("Venezuela", Some("VEN")),
    ("Venezuela (Bolivarian Republic of)", Some("VEN")),
    ("United Rep. of Tanzania", Some("TZA")),
    ("Tanzania", Some("TZA")),
    ("Iran", Some("IRN")),
    ("Syria", Some("SYR")),
    ("Syrian Arab Republic", Some("SYR")),
    ("North Macedonia", Some("MKD")),
    ("Bosnia Herzegovina", Some("BIH")),
    ("Bosnia and Herzegovina", Some("BIH")),
    ("Netherlands (Kingdom of the)", Some("NLD")),
    ("Netherlands", Some("NLD")),
    ("Dem. Rep. of the Congo", Some("COD")),
    ("Democratic Republic of the Congo", Some("COD")),
    ("Congo", Some("COG")),
    ("Rep. of Moldova", Some("MDA")),
    ("Moldova", Some("MDA")),
    ("Laos", Some("LAO")),
    ("Cabo Verde", Some("CPV")),
    ("Eswatini", Some("SWZ")),
    ("State of Palestine", Some("PSE")),
    ("Micronesia (Federated States of)", Some("FSM")),
    ("Taiwan", Some("TWN")),
    ("Other Asia, nes", None),
    ("World", None),
    ("Areas, nes", None),
    ("Bunkers", None),
    ("Free Zones", None),
    ("Special Categories", None),
    ("Other Europe, nes", None),
    ("Other Africa, nes", None),
    ("EU-28", None),
    ("European Union", None),
];

// ---------------------------------------------------------------------------
// Generic lookup seam
// ---------------------------------------------------------------------------

/// Name → ISO3 lookup against a full country list.
pub trait CountryLookup: Send + Sync {
    /// Return the alpha-3 code for `name`, or `None` on no or ambiguous match.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// [`CountryLookup`] over the ISO 3166 table shipped with `isocountry`.
///
/// Matches alpha-2, alpha-3 or the English short name. Comparison ignores
/// case, punctuation and repeated whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct IsoCountryLookup;

impl CountryLookup for IsoCountryLookup {
    fn lookup(&self, name: &str) -> Option<String> {
        let wanted = fold_name(name);
        if wanted.is_empty() {
            return None;
        }

        let mut found: Option<&'static str> = None;
        for code in CountryCode::iter() {
            let hit = code.alpha3().eq_ignore_ascii_case(&wanted)
                || code.alpha2().eq_ignore_ascii_case(&wanted)
                || fold_name(code.name()) == wanted;
            if !hit {
                continue;
            }
            match found {
                Some(prev) if prev != code.alpha3() => return None,
                _ => found = Some(code.alpha3()),
            }
        }
        found.map(str::to_string)
    }
}

/// Lowercase, drop punctuation, collapse whitespace.
fn fold_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// CountryResolver
// ---------------------------------------------------------------------------

/// Maps free-text partner names to ISO3 codes: exception table first, then
/// the generic lookup.
pub struct CountryResolver {
    exceptions: &'static [(&'static str, Option<&'static str>)],
    lookup: Box<dyn CountryLookup>,
}

impl Default for CountryResolver {
    fn default() -> Self {
        Self::new(Box::new(IsoCountryLookup))
    }
}

impl CountryResolver {
    pub fn new(lookup: Box<dyn CountryLookup>) -> Self {
        Self {
            exceptions: COUNTRY_EXCEPTIONS,
            lookup,
        }
    }

    /// Resolve `name` to an alpha-3 code. Never fails; unknown names and
    /// aggregate regions give `None`.
    pub fn resolve(&self, name: &str) -> Option<String> {
        let name = name.trim();
        if let Some((_, code)) = self.exceptions.iter().find(|(alias, _)| *alias == name) {
            return code.map(str::to_string);
        }
        self.lookup.lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lookup that answers the same code for every name.
    struct Everything(&'static str);

    impl CountryLookup for Everything {
        fn lookup(&self, _name: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    struct Nothing;

    impl CountryLookup for Nothing {
        fn lookup(&self, _name: &str) -> Option<String> {
            None
        }
    }

    #[test]
    fn test_exceptions_take_precedence_over_lookup() {
        let resolver = CountryResolver::new(Box::new(Everything("ZZZ")));
        for (alias, code) in COUNTRY_EXCEPTIONS {
            assert_eq!(resolver.resolve(alias).as_deref(), *code, "alias {alias}");
        }
    }

    #[test]
    fn test_known_aliases() {
        let resolver = CountryResolver::new(Box::new(Nothing));
        assert_eq!(resolver.resolve("Korea, Rep.").as_deref(), Some("KOR"));
        assert_eq!(resolver.resolve("Republic of Korea").as_deref(), Some("KOR"));
        assert_eq!(resolver.resolve("Viet Nam").as_deref(), Some("VNM"));
        assert_eq!(resolver.resolve("  Czechia ").as_deref(), Some("CZE"));
    }

    #[test]
    fn test_aggregates_resolve_to_none() {
        let resolver = CountryResolver::new(Box::new(Everything("ZZZ")));
        assert_eq!(resolver.resolve("Other Asia, nes"), None);
        assert_eq!(resolver.resolve("World"), None);
    }

    #[test]
    fn test_falls_back_to_lookup() {
        let resolver = CountryResolver::new(Box::new(Everything("DEU")));
        assert_eq!(resolver.resolve("Germany").as_deref(), Some("DEU"));

        let resolver = CountryResolver::new(Box::new(Nothing));
        assert_eq!(resolver.resolve("Germany"), None);
    }

    #[test]
    fn test_iso_lookup_by_name_and_code() {
        let lookup = IsoCountryLookup;
        assert_eq!(lookup.lookup("Germany").as_deref(), Some("DEU"));
        assert_eq!(lookup.lookup("germany").as_deref(), Some("DEU"));
        assert_eq!(lookup.lookup("DEU").as_deref(), Some("DEU"));
        assert_eq!(lookup.lookup("de").as_deref(), Some("DEU"));
        assert_eq!(lookup.lookup("Chile").as_deref(), Some("CHL"));
    }

    #[test]
    fn test_iso_lookup_unknown() {
        let lookup = IsoCountryLookup;
        assert_eq!(lookup.lookup("Atlantis"), None);
        assert_eq!(lookup.lookup(""), None);
        assert_eq!(lookup.lookup("Other Asia, nes"), None);
    }

    #[test]
    fn test_default_resolver_end_to_end() {
        let resolver = CountryResolver::default();
        assert_eq!(resolver.resolve("Japan").as_deref(), Some("JPN"));
        assert_eq!(resolver.resolve("Korea, Rep.").as_deref(), Some("KOR"));
        assert_eq!(resolver.resolve("Other Asia, nes"), None);
    }

    #[test]
    fn test_common_comtrade_spellings_resolve() {
        let resolver = CountryResolver::default();
        let cases = [
            ("Bolivia", "BOL"),
            ("Russia", "RUS"),
            ("Bosnia Herzegovina", "BIH"),
            ("North Macedonia", "MKD"),
            ("Syria", "SYR"),
            ("Syrian Arab Republic", "SYR"),
            ("Moldova", "MDA"),
            ("Rep. of Moldova", "MDA"),
            ("Netherlands (Kingdom of the)", "NLD"),
            ("Netherlands", "NLD"),
            ("Tanzania", "TZA"),
        ];
        for (name, code) in cases {
            assert_eq!(resolver.resolve(name).as_deref(), Some(code), "partner {name}");
        }
    }

    #[test]
    fn test_fold_name() {
        assert_eq!(fold_name("  Korea,   Rep. "), "korea rep");
    }
}
