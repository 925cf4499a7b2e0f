//! ISO 3166-1 country table (English names).
//!
//! `name` is the canonical form stored on company records. It never contains a
//! comma or parentheses, so feeding a stored country back through
//! `normalize_country` resolves to the same entry.

use std::collections::HashMap;

use lazy_static::lazy_static;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub alpha2: &'static str,
    pub alpha3: &'static str,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

const fn c(
    alpha2: &'static str,
    alpha3: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
) -> Country {
    Country {
        alpha2,
        alpha3,
        name,
        aliases,
    }
}

pub static COUNTRIES: &[Country] = &[
    c("AF", "AFG", "Afghanistan", &[]),
    c("AX", "ALA", "Åland Islands", &["Aland Islands", "Aland"]),
    c("AL", "ALB", "Albania", &[]),
    c("DZ", "DZA", "Algeria", &[]),
    c("AS", "ASM", "American Samoa", &[]),
    c("AD", "AND", "Andorra", &[]),
    c("AO", "AGO", "Angola", &[]),
    c("AI", "AIA", "Anguilla", &[]),
    c("AQ", "ATA", "Antarctica", &[]),
    c("AG", "ATG", "Antigua and Barbuda", &["Antigua"]),
    c("AR", "ARG", "Argentina", &[]),
    c("AM", "ARM", "Armenia", &[]),
    c("AW", "ABW", "Aruba", &[]),
    c("AU", "AUS", "Australia", &[]),
    c("AT", "AUT", "Austria", &[]),
    c("AZ", "AZE", "Azerbaijan", &[]),
    c("BS", "BHS", "Bahamas", &["The Bahamas"]),
    c("BH", "BHR", "Bahrain", &[]),
    c("BD", "BGD", "Bangladesh", &[]),
    c("BB", "BRB", "Barbados", &[]),
    c("BY", "BLR", "Belarus", &[]),
    c("BE", "BEL", "Belgium", &[]),
    c("BZ", "BLZ", "Belize", &[]),
    c("BJ", "BEN", "Benin", &[]),
    c("BM", "BMU", "Bermuda", &[]),
    c("BT", "BTN", "Bhutan", &[]),
    c("BO", "BOL", "Bolivia", &["Plurinational State of Bolivia"]),
    c(
        "BQ",
        "BES",
        "Caribbean Netherlands",
        &["Bonaire", "Bonaire Sint Eustatius and Saba"],
    ),
    c("BA", "BIH", "Bosnia and Herzegovina", &["Bosnia"]),
    c("BW", "BWA", "Botswana", &[]),
    c("BV", "BVT", "Bouvet Island", &[]),
    c("BR", "BRA", "Brazil", &["Brasil"]),
    c("IO", "IOT", "British Indian Ocean Territory", &[]),
    c("BN", "BRN", "Brunei Darussalam", &["Brunei"]),
    c("BG", "BGR", "Bulgaria", &[]),
    c("BF", "BFA", "Burkina Faso", &[]),
    c("BI", "BDI", "Burundi", &[]),
    c("CV", "CPV", "Cabo Verde", &["Cape Verde"]),
    c("KH", "KHM", "Cambodia", &[]),
    c("CM", "CMR", "Cameroon", &[]),
    c("CA", "CAN", "Canada", &[]),
    c("KY", "CYM", "Cayman Islands", &[]),
    c("CF", "CAF", "Central African Republic", &[]),
    c("TD", "TCD", "Chad", &[]),
    c("CL", "CHL", "Chile", &[]),
    c("CN", "CHN", "China", &["People's Republic of China", "PRC"]),
    c("CX", "CXR", "Christmas Island", &[]),
    c("CC", "CCK", "Cocos Islands", &["Keeling Islands", "Cocos Keeling Islands"]),
    c("CO", "COL", "Colombia", &[]),
    c("KM", "COM", "Comoros", &[]),
    c(
        "CG",
        "COG",
        "Republic of the Congo",
        &["Congo", "Congo-Brazzaville"],
    ),
    c(
        "CD",
        "COD",
        "Democratic Republic of the Congo",
        &["DR Congo", "DRC", "Congo-Kinshasa"],
    ),
    c("CK", "COK", "Cook Islands", &[]),
    c("CR", "CRI", "Costa Rica", &[]),
    c("CI", "CIV", "Côte d'Ivoire", &["Cote d'Ivoire", "Ivory Coast"]),
    c("HR", "HRV", "Croatia", &["Hrvatska"]),
    c("CU", "CUB", "Cuba", &[]),
    c("CW", "CUW", "Curaçao", &["Curacao"]),
    c("CY", "CYP", "Cyprus", &[]),
    c("CZ", "CZE", "Czechia", &["Czech Republic"]),
    c("DK", "DNK", "Denmark", &[]),
    c("DJ", "DJI", "Djibouti", &[]),
    c("DM", "DMA", "Dominica", &[]),
    c("DO", "DOM", "Dominican Republic", &[]),
    c("EC", "ECU", "Ecuador", &[]),
    c("EG", "EGY", "Egypt", &[]),
    c("SV", "SLV", "El Salvador", &[]),
    c("GQ", "GNQ", "Equatorial Guinea", &[]),
    c("ER", "ERI", "Eritrea", &[]),
    c("EE", "EST", "Estonia", &[]),
    c("SZ", "SWZ", "Eswatini", &["Swaziland"]),
    c("ET", "ETH", "Ethiopia", &[]),
    c("FK", "FLK", "Falkland Islands", &["Malvinas"]),
    c("FO", "FRO", "Faroe Islands", &[]),
    c("FJ", "FJI", "Fiji", &[]),
    c("FI", "FIN", "Finland", &[]),
    c("FR", "FRA", "France", &[]),
    c("GF", "GUF", "French Guiana", &[]),
    c("PF", "PYF", "French Polynesia", &[]),
    c("TF", "ATF", "French Southern Territories", &[]),
    c("GA", "GAB", "Gabon", &[]),
    c("GM", "GMB", "Gambia", &["The Gambia"]),
    c("GE", "GEO", "Georgia", &[]),
    c("DE", "DEU", "Germany", &["Deutschland"]),
    c("GH", "GHA", "Ghana", &[]),
    c("GI", "GIB", "Gibraltar", &[]),
    c("GR", "GRC", "Greece", &[]),
    c("GL", "GRL", "Greenland", &[]),
    c("GD", "GRD", "Grenada", &[]),
    c("GP", "GLP", "Guadeloupe", &[]),
    c("GU", "GUM", "Guam", &[]),
    c("GT", "GTM", "Guatemala", &[]),
    c("GG", "GGY", "Guernsey", &[]),
    c("GN", "GIN", "Guinea", &[]),
    c("GW", "GNB", "Guinea-Bissau", &[]),
    c("GY", "GUY", "Guyana", &[]),
    c("HT", "HTI", "Haiti", &[]),
    c("HM", "HMD", "Heard Island and McDonald Islands", &[]),
    c(
        "VA",
        "VAT",
        "Holy See",
        &["Vatican", "Vatican City", "Vatican City State"],
    ),
    c("HN", "HND", "Honduras", &[]),
    c("HK", "HKG", "Hong Kong", &[]),
    c("HU", "HUN", "Hungary", &[]),
    c("IS", "ISL", "Iceland", &[]),
    c("IN", "IND", "India", &[]),
    c("ID", "IDN", "Indonesia", &[]),
    c("IR", "IRN", "Iran", &["Islamic Republic of Iran"]),
    c("IQ", "IRQ", "Iraq", &[]),
    c("IE", "IRL", "Ireland", &["Republic of Ireland"]),
    c("IM", "IMN", "Isle of Man", &[]),
    c("IL", "ISR", "Israel", &[]),
    c("IT", "ITA", "Italy", &["Italia"]),
    c("JM", "JAM", "Jamaica", &[]),
    c("JP", "JPN", "Japan", &[]),
    c("JE", "JEY", "Jersey", &[]),
    c("JO", "JOR", "Jordan", &[]),
    c("KZ", "KAZ", "Kazakhstan", &[]),
    c("KE", "KEN", "Kenya", &[]),
    c("KI", "KIR", "Kiribati", &[]),
    c(
        "KP",
        "PRK",
        "North Korea",
        &["Democratic People's Republic of Korea", "DPRK"],
    ),
    c("KR", "KOR", "South Korea", &["Republic of Korea", "Korea"]),
    c("XK", "XKX", "Kosovo", &[]),
    c("KW", "KWT", "Kuwait", &[]),
    c("KG", "KGZ", "Kyrgyzstan", &[]),
    c("LA", "LAO", "Laos", &["Lao People's Democratic Republic"]),
    c("LV", "LVA", "Latvia", &[]),
    c("LB", "LBN", "Lebanon", &[]),
    c("LS", "LSO", "Lesotho", &[]),
    c("LR", "LBR", "Liberia", &[]),
    c("LY", "LBY", "Libya", &[]),
    c("LI", "LIE", "Liechtenstein", &[]),
    c("LT", "LTU", "Lithuania", &[]),
    c("LU", "LUX", "Luxembourg", &[]),
    c("MO", "MAC", "Macao", &["Macau"]),
    c("MK", "MKD", "North Macedonia", &["Macedonia"]),
    c("MG", "MDG", "Madagascar", &[]),
    c("MW", "MWI", "Malawi", &[]),
    c("MY", "MYS", "Malaysia", &[]),
    c("MV", "MDV", "Maldives", &[]),
    c("ML", "MLI", "Mali", &[]),
    c("MT", "MLT", "Malta", &[]),
    c("MH", "MHL", "Marshall Islands", &[]),
    c("MQ", "MTQ", "Martinique", &[]),
    c("MR", "MRT", "Mauritania", &[]),
    c("MU", "MUS", "Mauritius", &[]),
    c("YT", "MYT", "Mayotte", &[]),
    c("MX", "MEX", "Mexico", &["México"]),
    c(
        "FM",
        "FSM",
        "Micronesia",
        &["Federated States of Micronesia"],
    ),
    c("MD", "MDA", "Moldova", &["Republic of Moldova"]),
    c("MC", "MCO", "Monaco", &[]),
    c("MN", "MNG", "Mongolia", &[]),
    c("ME", "MNE", "Montenegro", &[]),
    c("MS", "MSR", "Montserrat", &[]),
    c("MA", "MAR", "Morocco", &[]),
    c("MZ", "MOZ", "Mozambique", &[]),
    c("MM", "MMR", "Myanmar", &["Burma"]),
    c("NA", "NAM", "Namibia", &[]),
    c("NR", "NRU", "Nauru", &[]),
    c("NP", "NPL", "Nepal", &[]),
    c(
        "NL",
        "NLD",
        "Netherlands",
        &["The Netherlands", "Holland", "Nederland"],
    ),
    c("NC", "NCL", "New Caledonia", &[]),
    c("NZ", "NZL", "New Zealand", &[]),
    c("NI", "NIC", "Nicaragua", &[]),
    c("NE", "NER", "Niger", &[]),
    c("NG", "NGA", "Nigeria", &[]),
    c("NU", "NIU", "Niue", &[]),
    c("NF", "NFK", "Norfolk Island", &[]),
    c("MP", "MNP", "Northern Mariana Islands", &[]),
    c("NO", "NOR", "Norway", &[]),
    c("OM", "OMN", "Oman", &[]),
    c("PK", "PAK", "Pakistan", &[]),
    c("PW", "PLW", "Palau", &[]),
    c("PS", "PSE", "Palestine", &["State of Palestine"]),
    c("PA", "PAN", "Panama", &[]),
    c("PG", "PNG", "Papua New Guinea", &[]),
    c("PY", "PRY", "Paraguay", &[]),
    c("PE", "PER", "Peru", &[]),
    c("PH", "PHL", "Philippines", &[]),
    c("PN", "PCN", "Pitcairn", &["Pitcairn Islands"]),
    c("PL", "POL", "Poland", &["Polska"]),
    c("PT", "PRT", "Portugal", &[]),
    c("PR", "PRI", "Puerto Rico", &[]),
    c("QA", "QAT", "Qatar", &[]),
    c("RE", "REU", "Réunion", &["Reunion"]),
    c("RO", "ROU", "Romania", &[]),
    c("RU", "RUS", "Russia", &["Russian Federation"]),
    c("RW", "RWA", "Rwanda", &[]),
    c("BL", "BLM", "Saint Barthélemy", &["Saint Barthelemy", "St Barts"]),
    c("SH", "SHN", "Saint Helena", &[]),
    c("KN", "KNA", "Saint Kitts and Nevis", &["St Kitts and Nevis"]),
    c("LC", "LCA", "Saint Lucia", &["St Lucia"]),
    c("MF", "MAF", "Saint Martin", &["St Martin"]),
    c("PM", "SPM", "Saint Pierre and Miquelon", &[]),
    c(
        "VC",
        "VCT",
        "Saint Vincent and the Grenadines",
        &["St Vincent and the Grenadines"],
    ),
    c("WS", "WSM", "Samoa", &[]),
    c("SM", "SMR", "San Marino", &[]),
    c("ST", "STP", "Sao Tome and Principe", &["São Tomé and Príncipe"]),
    c("SA", "SAU", "Saudi Arabia", &["KSA"]),
    c("SN", "SEN", "Senegal", &[]),
    c("RS", "SRB", "Serbia", &[]),
    c("SC", "SYC", "Seychelles", &[]),
    c("SL", "SLE", "Sierra Leone", &[]),
    c("SG", "SGP", "Singapore", &[]),
    c("SX", "SXM", "Sint Maarten", &[]),
    c("SK", "SVK", "Slovakia", &["Slovak Republic"]),
    c("SI", "SVN", "Slovenia", &[]),
    c("SB", "SLB", "Solomon Islands", &[]),
    c("SO", "SOM", "Somalia", &[]),
    c("ZA", "ZAF", "South Africa", &[]),
    c(
        "GS",
        "SGS",
        "South Georgia and the South Sandwich Islands",
        &[],
    ),
    c("SS", "SSD", "South Sudan", &[]),
    c("ES", "ESP", "Spain", &["España", "Espana"]),
    c("LK", "LKA", "Sri Lanka", &[]),
    c("SD", "SDN", "Sudan", &[]),
    c("SR", "SUR", "Suriname", &[]),
    c("SJ", "SJM", "Svalbard and Jan Mayen", &[]),
    c("SE", "SWE", "Sweden", &[]),
    c("CH", "CHE", "Switzerland", &["Schweiz", "Suisse"]),
    c("SY", "SYR", "Syria", &["Syrian Arab Republic"]),
    c("TW", "TWN", "Taiwan", &[]),
    c("TJ", "TJK", "Tajikistan", &[]),
    c("TZ", "TZA", "Tanzania", &["United Republic of Tanzania"]),
    c("TH", "THA", "Thailand", &[]),
    c("TL", "TLS", "Timor-Leste", &["East Timor"]),
    c("TG", "TGO", "Togo", &[]),
    c("TK", "TKL", "Tokelau", &[]),
    c("TO", "TON", "Tonga", &[]),
    c("TT", "TTO", "Trinidad and Tobago", &["Trinidad"]),
    c("TN", "TUN", "Tunisia", &[]),
    c("TR", "TUR", "Turkey", &["Türkiye", "Turkiye"]),
    c("TM", "TKM", "Turkmenistan", &[]),
    c("TC", "TCA", "Turks and Caicos Islands", &[]),
    c("TV", "TUV", "Tuvalu", &[]),
    c("UG", "UGA", "Uganda", &[]),
    c("UA", "UKR", "Ukraine", &[]),
    c("AE", "ARE", "United Arab Emirates", &["UAE", "Emirates"]),
    c(
        "GB",
        "GBR",
        "United Kingdom",
        &[
            "UK",
            "U.K.",
            "Great Britain",
            "Britain",
            "England",
            "Scotland",
            "Wales",
            "Northern Ireland",
        ],
    ),
    c(
        "US",
        "USA",
        "United States of America",
        &["United States", "USA", "U.S.A.", "US", "U.S."],
    ),
    c("UM", "UMI", "United States Minor Outlying Islands", &[]),
    c("UY", "URY", "Uruguay", &[]),
    c("UZ", "UZB", "Uzbekistan", &[]),
    c("VU", "VUT", "Vanuatu", &[]),
    c("VE", "VEN", "Venezuela", &[]),
    c("VN", "VNM", "Vietnam", &["Viet Nam"]),
    c("VG", "VGB", "British Virgin Islands", &[]),
    c(
        "VI",
        "VIR",
        "United States Virgin Islands",
        &["US Virgin Islands"],
    ),
    c("WF", "WLF", "Wallis and Futuna", &[]),
    c("EH", "ESH", "Western Sahara", &[]),
    c("YE", "YEM", "Yemen", &[]),
    c("ZM", "ZMB", "Zambia", &[]),
    c("ZW", "ZWE", "Zimbabwe", &[]),
];

lazy_static! {
    static ref BY_ALPHA2: HashMap<&'static str, &'static Country> =
        COUNTRIES.iter().map(|c| (c.alpha2, c)).collect();
    static ref BY_ALPHA3: HashMap<&'static str, &'static Country> =
        COUNTRIES.iter().map(|c| (c.alpha3, c)).collect();
    static ref BY_NAME: HashMap<String, &'static Country> = {
        let mut index = HashMap::new();
        for country in COUNTRIES {
            for label in std::iter::once(&country.name).chain(country.aliases.iter()) {
                index.entry(name_key(label)).or_insert(country);
            }
        }
        index
    };
}

/// Folds a country label for lookup: lowercase, `.`/`_`/`-` runs become a
/// space, whitespace collapsed.
fn name_key(label: &str) -> String {
    label
        .to_lowercase()
        .split(|ch: char| ch.is_whitespace() || ch == '.' || ch == '_' || ch == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn by_alpha2(code: &str) -> Option<&'static Country> {
    BY_ALPHA2.get(code.to_ascii_uppercase().as_str()).copied()
}

pub fn by_alpha3(code: &str) -> Option<&'static Country> {
    BY_ALPHA3.get(code.to_ascii_uppercase().as_str()).copied()
}

/// Case-insensitive lookup by canonical name or alias.
pub fn by_name(name: &str) -> Option<&'static Country> {
    let key = name_key(name);
    if key.is_empty() {
        return None;
    }
    BY_NAME.get(&key).copied()
}

/// Resolves a 2- or 3-letter code, any case.
pub fn by_code(code: &str) -> Option<&'static Country> {
    match code.len() {
        2 => by_alpha2(code),
        3 => by_alpha3(code),
        _ => None,
    }
}

/// Canonical names of every country, sorted.
pub fn country_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = COUNTRIES.iter().map(|c| c.name).collect();
    names.sort_unstable();
    names
}
