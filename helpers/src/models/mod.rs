//! Domain models for the country dataset.
//!
//! - [`CountryRecord`] - One raw country object, fields kept in input order
//! - [`LanguageEntry`] - Placeholder language record produced by the normalizer
//! - [`FlagCode`] - The `cca2`/`flag` pair carried over by the merger
//! - [`CountryData`] - Typed view of a fully prepared record
//! - [`Country`], [`Language`], [`Statistics`] - Static map entries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One country, as a JSON object.
///
/// Unknown fields are carried through untouched; key order is preserved.
pub type CountryRecord = Map<String, Value>;

/// Read `name.common` from a record.
pub fn common_name(record: &CountryRecord) -> Option<&str> {
    record
        .get("name")
        .and_then(|n| n.get("common"))
        .and_then(|c| c.as_str())
}

// =============================================================================
// Language Entry
// =============================================================================

/// A language spoken in a country.
///
/// `percentage` and `notes` start out null and are filled in by hand later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub language: String,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl LanguageEntry {
    /// Entry with no percentage or notes yet.
    pub fn placeholder(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            percentage: None,
            notes: None,
        }
    }

    /// Share of the population speaking the language, 0 when unknown.
    pub fn share(&self) -> f64 {
        self.percentage.unwrap_or(0.0)
    }
}

// =============================================================================
// Flag and Code
// =============================================================================

/// Country code and flag taken from the secondary dataset.
///
/// `None` means the field was absent (or null) in the source record. Present
/// values are kept verbatim, whatever their JSON type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlagCode {
    pub cca2: Option<Value>,
    pub flag: Option<Value>,
}

impl FlagCode {
    pub fn from_record(record: &CountryRecord) -> Self {
        let field = |key: &str| record.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            cca2: field("cca2"),
            flag: field("flag"),
        }
    }

    /// The flag as text, if it is a string.
    pub fn flag_str(&self) -> Option<&str> {
        self.flag.as_ref().and_then(|v| v.as_str())
    }

    /// True when the country code is absent, null, empty or `false`.
    pub fn cca2_is_missing(&self) -> bool {
        match &self.cca2 {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Bool(b)) => !b,
            Some(Value::Array(a)) => a.is_empty(),
            Some(Value::Object(o)) => o.is_empty(),
            Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        }
    }

    /// Write both fields into a record; absent values become `null`.
    pub fn apply_to(&self, record: &mut CountryRecord) {
        record.insert("cca2".to_string(), self.cca2.clone().unwrap_or(Value::Null));
        record.insert("flag".to_string(), self.flag.clone().unwrap_or(Value::Null));
    }
}

// =============================================================================
// Prepared Country Data
// =============================================================================

/// Country names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: Option<String>,
}

/// Typed view of a record after normalization and merge.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryData {
    #[serde(default)]
    pub ccn3: Option<String>,
    #[serde(default)]
    pub cca2: Option<String>,
    pub name: CountryName,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub independent: Option<bool>,
    #[serde(default)]
    pub un_member: bool,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub languages: Vec<LanguageEntry>,
}

// =============================================================================
// Static Map Entries
// =============================================================================

/// A country as written to the country map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166-1 numeric
    pub country_id: Option<String>,
    /// ISO 3166-1 alpha-2
    pub cca2: Option<String>,
    pub common_name: String,
    pub official_name: Option<String>,
    pub flag: Option<String>,
    pub independent: Option<bool>,
    pub un_member: bool,
    pub population: u64,
    pub languages: Vec<LanguageEntry>,
}

impl From<CountryData> for Country {
    fn from(data: CountryData) -> Self {
        Self {
            country_id: data.ccn3,
            cca2: data.cca2,
            common_name: data.name.common,
            official_name: data.name.official,
            flag: data.flag,
            independent: data.independent,
            un_member: data.un_member,
            population: data.population,
            languages: data.languages,
        }
    }
}

impl Country {
    /// Number of speakers of a language in this country (case-insensitive).
    pub fn speakers(&self, language: &str) -> f64 {
        let wanted = language.to_lowercase();
        self.languages
            .iter()
            .find(|l| l.language.to_lowercase() == wanted)
            .map(|l| l.share() * self.population as f64)
            .unwrap_or(0.0)
    }
}

/// World population used for percentages.
pub const WORLD_POPULATION: f64 = 8_085_627_000.0;

/// Speaker totals for one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(rename = "totalUNSpeakers")]
    pub total_un_speakers: f64,
    #[serde(rename = "numberOfUNCountries")]
    pub number_of_un_countries: u32,
    pub total_speakers: f64,
    pub number_of_countries: u32,
}

impl Statistics {
    /// Speakers as a percentage of the world population.
    pub fn world_percentage(&self, un_member: bool) -> f64 {
        self.speakers(un_member) * 100.0 / WORLD_POPULATION
    }

    pub fn speakers(&self, un_member: bool) -> f64 {
        if un_member {
            self.total_un_speakers
        } else {
            self.total_speakers
        }
    }

    pub fn countries(&self, un_member: bool) -> u32 {
        if un_member {
            self.number_of_un_countries
        } else {
            self.number_of_countries
        }
    }

    pub fn has_non_un_countries(&self) -> bool {
        self.number_of_countries > self.number_of_un_countries
    }
}

/// A language with its statistics and the countries that speak it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub statistics: Statistics,
    pub countries: Vec<Country>,
}

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statistics: Statistics::default(),
            countries: Vec::new(),
        }
    }

    /// Whether a country with this ISO numeric id speaks the language.
    pub fn has_country_by_id(&self, country_id: &str) -> bool {
        self.countries
            .iter()
            .any(|c| c.country_id.as_deref() == Some(country_id))
    }
}
