//! Country catalog: the fixed, ordered list of countries the quiz draws from,
//! plus region filtering and lookup.
//!
//! The list is static data; nothing here allocates except the filtered views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Continent-based partition of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
  Africa,
  Asia,
  Europe,
  #[serde(rename = "North America")]
  NorthAmerica,
  #[serde(rename = "South America")]
  SouthAmerica,
  Oceania,
}

impl Region {
  pub const ALL: [Region; 6] = [
    Region::Africa,
    Region::Asia,
    Region::Europe,
    Region::NorthAmerica,
    Region::SouthAmerica,
    Region::Oceania,
  ];

  /// Wire and display name ("North America", not "NorthAmerica").
  pub fn name(self) -> &'static str {
    match self {
      Region::Africa => "Africa",
      Region::Asia => "Asia",
      Region::Europe => "Europe",
      Region::NorthAmerica => "North America",
      Region::SouthAmerica => "South America",
      Region::Oceania => "Oceania",
    }
  }
}

impl fmt::Display for Region {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Region selection of a game: every country, or a single region.
/// Serialized as `"all"` or the region's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RegionFilter {
  #[default]
  All,
  Only(Region),
}

impl RegionFilter {
  pub fn matches(self, region: Region) -> bool {
    match self {
      RegionFilter::All => true,
      RegionFilter::Only(r) => r == region,
    }
  }

  /// Stable identifier used by the setup form ("all", "Africa", ...).
  pub fn id(self) -> &'static str {
    match self {
      RegionFilter::All => "all",
      RegionFilter::Only(r) => r.name(),
    }
  }

  pub fn display_name(self) -> &'static str {
    match self {
      RegionFilter::All => "All Countries",
      RegionFilter::Only(r) => r.name(),
    }
  }
}

impl fmt::Display for RegionFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.id())
  }
}

impl FromStr for RegionFilter {
  type Err = QuizError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("all") {
      return Ok(RegionFilter::All);
    }
    Region::ALL
      .iter()
      .find(|r| r.name().eq_ignore_ascii_case(s))
      .map(|r| RegionFilter::Only(*r))
      .ok_or_else(|| QuizError::UnknownRegion(s.to_string()))
  }
}

impl TryFrom<String> for RegionFilter {
  type Error = QuizError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<RegionFilter> for String {
  fn from(value: RegionFilter) -> Self {
    value.id().to_string()
  }
}

impl From<Region> for RegionFilter {
  fn from(value: Region) -> Self {
    RegionFilter::Only(value)
  }
}

/// A single catalog entry. Immutable; lives for the whole process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
  pub name: &'static str,
  /// ISO 3166-1 alpha-2, lower-case.
  pub code: &'static str,
  pub region: Region,
  pub alternate_names: &'static [&'static str],
}

impl Country {
  const fn new(name: &'static str, code: &'static str, region: Region) -> Self {
    Self { name, code, region, alternate_names: &[] }
  }

  const fn with_alternates(self, alternate_names: &'static [&'static str]) -> Self {
    Self { alternate_names, ..self }
  }

  /// Flag image location, flagcdn layout: `{base}/w{width}/{code}.png`.
  pub fn flag_url(&self, base: &str, width: u32) -> String {
    format!("{}/w{}/{}.png", base.trim_end_matches('/'), width, self.code)
  }
}

/// Every country in catalog order.
pub fn list_all() -> &'static [Country] {
  &COUNTRIES
}

/// Countries of one region, in catalog order. `All` yields the full list.
pub fn list_by_region(filter: RegionFilter) -> Vec<&'static Country> {
  COUNTRIES.iter().filter(|c| filter.matches(c.region)).collect()
}

pub fn count_of(filter: RegionFilter) -> usize {
  match filter {
    RegionFilter::All => COUNTRIES.len(),
    RegionFilter::Only(r) => COUNTRIES.iter().filter(|c| c.region == r).count(),
  }
}

/// Case-insensitive lookup by country code.
pub fn find_by_code(code: &str) -> Option<&'static Country> {
  let code = code.trim();
  COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Region filters in setup-form order: "all" first, then each region.
pub fn region_filters() -> Vec<RegionFilter> {
  std::iter::once(RegionFilter::All)
    .chain(Region::ALL.iter().map(|r| RegionFilter::Only(*r)))
    .collect()
}

static COUNTRIES: [Country; 195] = [
  // Africa
  Country::new("Algeria", "dz", Region::Africa),
  Country::new("Angola", "ao", Region::Africa),
  Country::new("Benin", "bj", Region::Africa),
  Country::new("Botswana", "bw", Region::Africa),
  Country::new("Burkina Faso", "bf", Region::Africa),
  Country::new("Burundi", "bi", Region::Africa),
  Country::new("Cameroon", "cm", Region::Africa),
  Country::new("Cape Verde", "cv", Region::Africa).with_alternates(&["Cabo Verde"]),
  Country::new("Central African Republic", "cf", Region::Africa).with_alternates(&["CAR"]),
  Country::new("Chad", "td", Region::Africa),
  Country::new("Comoros", "km", Region::Africa),
  Country::new("Democratic Republic of the Congo", "cd", Region::Africa).with_alternates(&["DRC", "DR Congo", "Congo-Kinshasa", "Congo Kinshasa"]),
  Country::new("Republic of the Congo", "cg", Region::Africa).with_alternates(&["Congo", "Congo-Brazzaville", "Congo Brazzaville"]),
  Country::new("Ivory Coast", "ci", Region::Africa).with_alternates(&["Cote d'Ivoire", "Côte d'Ivoire"]),
  Country::new("Djibouti", "dj", Region::Africa),
  Country::new("Egypt", "eg", Region::Africa),
  Country::new("Equatorial Guinea", "gq", Region::Africa),
  Country::new("Eritrea", "er", Region::Africa),
  Country::new("Eswatini", "sz", Region::Africa).with_alternates(&["Swaziland"]),
  Country::new("Ethiopia", "et", Region::Africa),
  Country::new("Gabon", "ga", Region::Africa),
  Country::new("Gambia", "gm", Region::Africa).with_alternates(&["The Gambia"]),
  Country::new("Ghana", "gh", Region::Africa),
  Country::new("Guinea", "gn", Region::Africa),
  Country::new("Guinea-Bissau", "gw", Region::Africa),
  Country::new("Kenya", "ke", Region::Africa),
  Country::new("Lesotho", "ls", Region::Africa),
  Country::new("Liberia", "lr", Region::Africa),
  Country::new("Libya", "ly", Region::Africa),
  Country::new("Madagascar", "mg", Region::Africa),
  Country::new("Malawi", "mw", Region::Africa),
  Country::new("Mali", "ml", Region::Africa),
  Country::new("Mauritania", "mr", Region::Africa),
  Country::new("Mauritius", "mu", Region::Africa),
  Country::new("Morocco", "ma", Region::Africa),
  Country::new("Mozambique", "mz", Region::Africa),
  Country::new("Namibia", "na", Region::Africa),
  Country::new("Niger", "ne", Region::Africa),
  Country::new("Nigeria", "ng", Region::Africa),
  Country::new("Rwanda", "rw", Region::Africa),
  Country::new("Sao Tome and Principe", "st", Region::Africa).with_alternates(&["São Tomé and Príncipe"]),
  Country::new("Senegal", "sn", Region::Africa),
  Country::new("Seychelles", "sc", Region::Africa),
  Country::new("Sierra Leone", "sl", Region::Africa),
  Country::new("Somalia", "so", Region::Africa),
  Country::new("South Africa", "za", Region::Africa),
  Country::new("South Sudan", "ss", Region::Africa),
  Country::new("Sudan", "sd", Region::Africa),
  Country::new("Tanzania", "tz", Region::Africa),
  Country::new("Togo", "tg", Region::Africa),
  Country::new("Tunisia", "tn", Region::Africa),
  Country::new("Uganda", "ug", Region::Africa),
  Country::new("Zambia", "zm", Region::Africa),
  Country::new("Zimbabwe", "zw", Region::Africa),

  // Asia
  Country::new("Afghanistan", "af", Region::Asia),
  Country::new("Armenia", "am", Region::Asia),
  Country::new("Azerbaijan", "az", Region::Asia),
  Country::new("Bahrain", "bh", Region::Asia),
  Country::new("Bangladesh", "bd", Region::Asia),
  Country::new("Bhutan", "bt", Region::Asia),
  Country::new("Brunei", "bn", Region::Asia).with_alternates(&["Brunei Darussalam"]),
  Country::new("Cambodia", "kh", Region::Asia),
  Country::new("China", "cn", Region::Asia).with_alternates(&["People's Republic of China", "PRC"]),
  Country::new("Cyprus", "cy", Region::Asia),
  Country::new("Georgia", "ge", Region::Asia),
  Country::new("India", "in", Region::Asia),
  Country::new("Indonesia", "id", Region::Asia),
  Country::new("Iran", "ir", Region::Asia).with_alternates(&["Islamic Republic of Iran", "Persia"]),
  Country::new("Iraq", "iq", Region::Asia),
  Country::new("Israel", "il", Region::Asia),
  Country::new("Japan", "jp", Region::Asia),
  Country::new("Jordan", "jo", Region::Asia),
  Country::new("Kazakhstan", "kz", Region::Asia),
  Country::new("Kuwait", "kw", Region::Asia),
  Country::new("Kyrgyzstan", "kg", Region::Asia),
  Country::new("Laos", "la", Region::Asia).with_alternates(&["Lao People's Democratic Republic", "Lao PDR"]),
  Country::new("Lebanon", "lb", Region::Asia),
  Country::new("Malaysia", "my", Region::Asia),
  Country::new("Maldives", "mv", Region::Asia),
  Country::new("Mongolia", "mn", Region::Asia),
  Country::new("Myanmar", "mm", Region::Asia).with_alternates(&["Burma"]),
  Country::new("Nepal", "np", Region::Asia),
  Country::new("North Korea", "kp", Region::Asia).with_alternates(&["Democratic People's Republic of Korea", "DPRK"]),
  Country::new("Oman", "om", Region::Asia),
  Country::new("Pakistan", "pk", Region::Asia),
  Country::new("Palestine", "ps", Region::Asia).with_alternates(&["State of Palestine"]),
  Country::new("Philippines", "ph", Region::Asia),
  Country::new("Qatar", "qa", Region::Asia),
  Country::new("Saudi Arabia", "sa", Region::Asia),
  Country::new("Singapore", "sg", Region::Asia),
  Country::new("South Korea", "kr", Region::Asia).with_alternates(&["Republic of Korea", "Korea"]),
  Country::new("Sri Lanka", "lk", Region::Asia),
  Country::new("Syria", "sy", Region::Asia).with_alternates(&["Syrian Arab Republic"]),
  Country::new("Tajikistan", "tj", Region::Asia),
  Country::new("Thailand", "th", Region::Asia),
  Country::new("Timor-Leste", "tl", Region::Asia).with_alternates(&["East Timor"]),
  Country::new("Turkey", "tr", Region::Asia).with_alternates(&["Türkiye", "Turkiye"]),
  Country::new("Turkmenistan", "tm", Region::Asia),
  Country::new("United Arab Emirates", "ae", Region::Asia).with_alternates(&["UAE", "Emirates"]),
  Country::new("Uzbekistan", "uz", Region::Asia),
  Country::new("Vietnam", "vn", Region::Asia).with_alternates(&["Viet Nam"]),
  Country::new("Yemen", "ye", Region::Asia),

  // Europe
  Country::new("Albania", "al", Region::Europe),
  Country::new("Andorra", "ad", Region::Europe),
  Country::new("Austria", "at", Region::Europe),
  Country::new("Belarus", "by", Region::Europe),
  Country::new("Belgium", "be", Region::Europe),
  Country::new("Bosnia and Herzegovina", "ba", Region::Europe).with_alternates(&["Bosnia"]),
  Country::new("Bulgaria", "bg", Region::Europe),
  Country::new("Croatia", "hr", Region::Europe),
  Country::new("Czech Republic", "cz", Region::Europe).with_alternates(&["Czechia"]),
  Country::new("Denmark", "dk", Region::Europe),
  Country::new("Estonia", "ee", Region::Europe),
  Country::new("Finland", "fi", Region::Europe),
  Country::new("France", "fr", Region::Europe),
  Country::new("Germany", "de", Region::Europe),
  Country::new("Greece", "gr", Region::Europe),
  Country::new("Hungary", "hu", Region::Europe),
  Country::new("Iceland", "is", Region::Europe),
  Country::new("Ireland", "ie", Region::Europe),
  Country::new("Italy", "it", Region::Europe),
  Country::new("Latvia", "lv", Region::Europe),
  Country::new("Liechtenstein", "li", Region::Europe),
  Country::new("Lithuania", "lt", Region::Europe),
  Country::new("Luxembourg", "lu", Region::Europe),
  Country::new("Malta", "mt", Region::Europe),
  Country::new("Moldova", "md", Region::Europe),
  Country::new("Monaco", "mc", Region::Europe),
  Country::new("Montenegro", "me", Region::Europe),
  Country::new("Netherlands", "nl", Region::Europe).with_alternates(&["Holland"]),
  Country::new("North Macedonia", "mk", Region::Europe).with_alternates(&["Macedonia"]),
  Country::new("Norway", "no", Region::Europe),
  Country::new("Poland", "pl", Region::Europe),
  Country::new("Portugal", "pt", Region::Europe),
  Country::new("Romania", "ro", Region::Europe),
  Country::new("Russia", "ru", Region::Europe).with_alternates(&["Russian Federation"]),
  Country::new("San Marino", "sm", Region::Europe),
  Country::new("Serbia", "rs", Region::Europe),
  Country::new("Slovakia", "sk", Region::Europe),
  Country::new("Slovenia", "si", Region::Europe),
  Country::new("Spain", "es", Region::Europe),
  Country::new("Sweden", "se", Region::Europe),
  Country::new("Switzerland", "ch", Region::Europe),
  Country::new("Ukraine", "ua", Region::Europe),
  Country::new("United Kingdom", "gb", Region::Europe).with_alternates(&["UK", "Britain", "Great Britain", "England"]),
  Country::new("Vatican City", "va", Region::Europe).with_alternates(&["Holy See", "Vatican"]),

  // North America
  Country::new("Antigua and Barbuda", "ag", Region::NorthAmerica),
  Country::new("Bahamas", "bs", Region::NorthAmerica).with_alternates(&["The Bahamas"]),
  Country::new("Barbados", "bb", Region::NorthAmerica),
  Country::new("Belize", "bz", Region::NorthAmerica),
  Country::new("Canada", "ca", Region::NorthAmerica),
  Country::new("Costa Rica", "cr", Region::NorthAmerica),
  Country::new("Cuba", "cu", Region::NorthAmerica),
  Country::new("Dominica", "dm", Region::NorthAmerica),
  Country::new("Dominican Republic", "do", Region::NorthAmerica),
  Country::new("El Salvador", "sv", Region::NorthAmerica),
  Country::new("Grenada", "gd", Region::NorthAmerica),
  Country::new("Guatemala", "gt", Region::NorthAmerica),
  Country::new("Haiti", "ht", Region::NorthAmerica),
  Country::new("Honduras", "hn", Region::NorthAmerica),
  Country::new("Jamaica", "jm", Region::NorthAmerica),
  Country::new("Mexico", "mx", Region::NorthAmerica),
  Country::new("Nicaragua", "ni", Region::NorthAmerica),
  Country::new("Panama", "pa", Region::NorthAmerica),
  Country::new("Saint Kitts and Nevis", "kn", Region::NorthAmerica).with_alternates(&["St Kitts and Nevis", "St. Kitts and Nevis"]),
  Country::new("Saint Lucia", "lc", Region::NorthAmerica).with_alternates(&["St Lucia", "St. Lucia"]),
  Country::new("Saint Vincent and the Grenadines", "vc", Region::NorthAmerica).with_alternates(&["St Vincent and the Grenadines", "St. Vincent and the Grenadines"]),
  Country::new("Trinidad and Tobago", "tt", Region::NorthAmerica),
  Country::new("United States", "us", Region::NorthAmerica).with_alternates(&["USA", "US", "United States of America", "America"]),

  // South America
  Country::new("Argentina", "ar", Region::SouthAmerica),
  Country::new("Bolivia", "bo", Region::SouthAmerica),
  Country::new("Brazil", "br", Region::SouthAmerica),
  Country::new("Chile", "cl", Region::SouthAmerica),
  Country::new("Colombia", "co", Region::SouthAmerica),
  Country::new("Ecuador", "ec", Region::SouthAmerica),
  Country::new("Guyana", "gy", Region::SouthAmerica),
  Country::new("Paraguay", "py", Region::SouthAmerica),
  Country::new("Peru", "pe", Region::SouthAmerica),
  Country::new("Suriname", "sr", Region::SouthAmerica),
  Country::new("Uruguay", "uy", Region::SouthAmerica),
  Country::new("Venezuela", "ve", Region::SouthAmerica),

  // Oceania
  Country::new("Australia", "au", Region::Oceania),
  Country::new("Fiji", "fj", Region::Oceania),
  Country::new("Kiribati", "ki", Region::Oceania),
  Country::new("Marshall Islands", "mh", Region::Oceania),
  Country::new("Micronesia", "fm", Region::Oceania).with_alternates(&["Federated States of Micronesia", "FSM"]),
  Country::new("Nauru", "nr", Region::Oceania),
  Country::new("New Zealand", "nz", Region::Oceania),
  Country::new("Palau", "pw", Region::Oceania),
  Country::new("Papua New Guinea", "pg", Region::Oceania).with_alternates(&["PNG"]),
  Country::new("Samoa", "ws", Region::Oceania),
  Country::new("Solomon Islands", "sb", Region::Oceania),
  Country::new("Tonga", "to", Region::Oceania),
  Country::new("Tuvalu", "tv", Region::Oceania),
  Country::new("Vanuatu", "vu", Region::Oceania),
];
