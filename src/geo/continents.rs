/// ISO 3166-1 alpha-2 country codes grouped by continent code.
const AFRICA: &[&str] = &[
    "AO", "BF", "BI", "BJ", "BW", "CD", "CF", "CG", "CI", "CM", "CV", "DJ", "DZ", "EG", "ER",
    "ET", "GA", "GH", "GM", "GN", "GQ", "GW", "KE", "KM", "LR", "LS", "LY", "MA", "MG", "ML",
    "MR", "MU", "MW", "MZ", "NA", "NE", "NG", "RW", "SC", "SD", "SL", "SN", "SO", "SS", "ST",
    "SZ", "TD", "TG", "TN", "TZ", "UG", "ZA", "ZM", "ZW",
];
const ANTARCTICA: &[&str] = &["AQ", "BV", "GS", "HM", "TF"];
const ASIA: &[&str] = &[
    "AE", "AF", "AM", "AZ", "BD", "BH", "BN", "BT", "CN", "CY", "GE", "HK", "ID", "IL", "IN",
    "IQ", "IR", "JO", "JP", "KG", "KH", "KP", "KR", "KW", "KZ", "LA", "LB", "LK", "MM", "MN",
    "MO", "MV", "MY", "NP", "OM", "PH", "PK", "PS", "QA", "SA", "SG", "SY", "TH", "TJ", "TL",
    "TM", "TR", "TW", "UZ", "VN", "YE",
];
const EUROPE: &[&str] = &[
    "AD", "AL", "AT", "BA", "BE", "BG", "BY", "CH", "CZ", "DE", "DK", "EE", "ES", "FI", "FO",
    "FR", "GB", "GG", "GI", "GR", "HR", "HU", "IE", "IM", "IS", "IT", "JE", "LI", "LT", "LU",
    "LV", "MC", "MD", "ME", "MK", "MT", "NL", "NO", "PL", "PT", "RO", "RS", "RU", "SE", "SI",
    "SK", "SM", "UA", "VA", "XK",
];
const NORTH_AMERICA: &[&str] = &[
    "AG", "BB", "BM", "BS", "BZ", "CA", "CR", "CU", "DM", "DO", "GD", "GL", "GT", "HN", "HT",
    "JM", "KN", "KY", "LC", "MX", "NI", "PA", "PR", "SV", "TT", "US", "VC", "VG", "VI",
];
const OCEANIA: &[&str] = &[
    "AS", "AU", "CK", "FJ", "FM", "GU", "KI", "MH", "MP", "NC", "NR", "NZ", "PF", "PG", "PW",
    "SB", "TO", "TV", "VU", "WS",
];
const SOUTH_AMERICA: &[&str] = &[
    "AR", "BO", "BR", "CL", "CO", "EC", "FK", "GF", "GY", "PE", "PY", "SR", "UY", "VE",
];

const CONTINENTS: [(&str, &[&str]); 7] = [
    ("AF", AFRICA),
    ("AN", ANTARCTICA),
    ("AS", ASIA),
    ("EU", EUROPE),
    ("NA", NORTH_AMERICA),
    ("OC", OCEANIA),
    ("SA", SOUTH_AMERICA),
];

/// Continent code for an uppercase alpha-2 country code, if known.
#[must_use]
pub fn continent_for(country_code: &str) -> Option<&'static str> {
    CONTINENTS
        .iter()
        .find(|(_, countries)| countries.contains(&country_code))
        .map(|(code, _)| *code)
}

#[must_use]
pub fn continent_name(code: &str) -> &'static str {
    match code {
        "AF" => "Africa",
        "AN" => "Antarctica",
        "AS" => "Asia",
        "EU" => "Europe",
        "NA" => "North America",
        "OC" => "Oceania",
        "SA" => "South America",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(continent_for("DE"), Some("EU"));
        assert_eq!(continent_for("US"), Some("NA"));
        assert_eq!(continent_for("JP"), Some("AS"));
        assert_eq!(continent_for("BR"), Some("SA"));
        assert_eq!(continent_for("AU"), Some("OC"));
        assert_eq!(continent_for("ZA"), Some("AF"));
    }

    #[test]
    fn unknown_codes_do_not_resolve() {
        assert_eq!(continent_for("ZZ"), None);
        assert_eq!(continent_for(""), None);
    }

    #[test]
    fn every_continent_has_a_name() {
        for (code, _) in CONTINENTS {
            assert_ne!(continent_name(code), "Unknown");
        }
        assert_eq!(continent_name("XX"), "Unknown");
    }
}
