/// Friendly names the legacy frontend suggests, mapped to their Yahoo listings.
/// An alias match wins over any market argument.
pub const SUGGESTED_SYMBOLS: &[(&str, &str)] = &[
    ("FEMSA", "KOFUBL.MX"),
    ("WALMEX", "WALMEX.MX"),
    ("BIMBO", "BIMBOA.MX"),
    ("TLEVISA", "TLEVISACPO.MX"),
    ("AMX", "AMXB.MX"),
    ("CEMEX", "CEMEXCPO.MX"),
    ("GFNORTE", "GFNORTEO.MX"),
    ("GMXT", "GMXT.MX"),
    ("ORBIA", "ORBIA.MX"),
    ("ELEKTRA", "ELEKTRA.MX"),
];

/// Suffix Yahoo expects per exchange code. US listings need none.
const MARKET_SUFFIXES: &[(&str, &str)] = &[
    ("BMV", ".MX"),
    ("NYSE", ""),
    ("NASDAQ", ""),
    ("LON", ".L"),
    ("TSX", ".TO"),
];

/// Turn a user-supplied ticker plus optional market code into the form the
/// provider resolves. Never fails; at worst the trimmed upper-cased input
/// comes back unchanged.
pub fn format_symbol(raw: &str, market: Option<&str>) -> String {
    let symbol = raw.trim().to_uppercase();

    if let Some((_, listing)) = SUGGESTED_SYMBOLS.iter().find(|(alias, _)| *alias == symbol) {
        return (*listing).to_string();
    }

    let market = match market {
        Some(m) if !m.is_empty() => m.to_uppercase(),
        _ => return symbol,
    };

    let suffix = MARKET_SUFFIXES
        .iter()
        .find(|(code, _)| *code == market)
        .map(|(_, suffix)| *suffix)
        .unwrap_or("");

    format!("{}{}", symbol, suffix)
}
