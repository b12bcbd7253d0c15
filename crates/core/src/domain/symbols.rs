//! Static lookups between the chart service's point/sign names and display glyphs or
//! chart-library identifiers.

/// Position-row name of the ascendant angle point.
pub const ASCENDANT: &str = "上升";
/// Position-row name of the midheaven angle point.
pub const MIDHEAVEN: &str = "天頂";

/// Identifier the radial-chart library uses for the ascendant.
pub const CHART_ASCENDANT_ID: &str = "Ascendant";

/// Appended to a sign name in formatted positions.
pub const SIGN_SUFFIX: &str = "座";

/// Zodiac signs in ecliptic order with their glyphs.
pub const SIGN_GLYPHS: [(&str, &str); 12] = [
    ("牡羊", "♈"),
    ("金牛", "♉"),
    ("雙子", "♊"),
    ("巨蟹", "♋"),
    ("獅子", "♌"),
    ("處女", "♍"),
    ("天秤", "♎"),
    ("天蠍", "♏"),
    ("射手", "♐"),
    ("魔羯", "♑"),
    ("水瓶", "♒"),
    ("雙魚", "♓"),
];

/// Service planet names mapped to chart-library identifiers, Sun through Pluto.
pub const CHART_PLANET_IDS: [(&str, &str); 10] = [
    ("太陽", "Sun"),
    ("月亮", "Moon"),
    ("水星", "Mercury"),
    ("金星", "Venus"),
    ("火星", "Mars"),
    ("木星", "Jupiter"),
    ("土星", "Saturn"),
    ("天王星", "Uranus"),
    ("海王星", "Neptune"),
    ("冥王星", "Pluto"),
];

/// Glyph for a sign name, or `""` when the name is not a zodiac sign.
pub fn sign_glyph(sign: &str) -> &'static str {
    SIGN_GLYPHS
        .iter()
        .find(|(name, _)| *name == sign)
        .map(|(_, glyph)| *glyph)
        .unwrap_or("")
}

/// Chart-library identifier for a service planet name. Unknown names yield `None` and are
/// left out of the chart model.
pub fn chart_planet_id(name: &str) -> Option<&'static str> {
    CHART_PLANET_IDS
        .iter()
        .find(|(service_name, _)| *service_name == name)
        .map(|(_, id)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn every_sign_has_a_distinct_glyph() {
        let glyphs: BTreeSet<_> = SIGN_GLYPHS.iter().map(|(s, _)| sign_glyph(s)).collect();
        assert!(!glyphs.contains(""));
        assert_eq!(glyphs.len(), 12);
        assert_eq!(sign_glyph("牡羊"), "♈");
        assert_eq!(sign_glyph("雙魚"), "♓");
    }

    #[test]
    fn unknown_sign_yields_empty_glyph() {
        assert_eq!(sign_glyph(""), "");
        assert_eq!(sign_glyph("Aries"), "");
    }

    #[test]
    fn planet_ids_cover_classical_planets_only() {
        assert_eq!(chart_planet_id("太陽"), Some("Sun"));
        assert_eq!(chart_planet_id("冥王星"), Some("Pluto"));
        assert_eq!(chart_planet_id("北交點"), None);
        assert_eq!(chart_planet_id(ASCENDANT), None);
    }
}
