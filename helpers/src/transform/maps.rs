//! Build the static country and language maps read by the map front-end.
//!
//! # Output Format
//!
//! Both maps are written as JSON arrays of `[key, value]` pairs so the
//! front-end can rebuild an ordered map from them directly:
//!
//! - `countryMap.json`: `[["France", { "commonName": "France", ... }], ...]`
//! - `languageMap.json`: `[["french", { "name": "french", "statistics": ..., "countries": [...] }], ...]`

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Country, CountryData, Language};

/// Insertion-ordered map serialized as a list of `[key, value]` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    positions: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.positions.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    /// Get the value for `key`, inserting `make()` first if missing.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let i = match self.positions.get(key) {
            Some(&i) => i,
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), make()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, v)| v)
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            seq.serialize_element(&(key, value))?;
        }
        seq.end()
    }
}

/// Countries keyed by common name.
pub type CountryMap = OrderedMap<Country>;

/// Languages keyed by lower-cased name.
pub type LanguageMap = OrderedMap<Language>;

/// Both static maps, built together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticMaps {
    pub countries: CountryMap,
    pub languages: LanguageMap,
}

/// Build the country map and the per-language statistics in one pass.
///
/// Each record is stored under its common name (a repeated name replaces the
/// earlier value but keeps its position), then every language entry of that
/// record adds `population * percentage` to the language totals (a null
/// percentage adds nothing) and counts the country once; UN members also
/// count towards the UN totals. The country pushed onto a language is the one
/// stored at that record's step, so an earlier duplicate keeps its own data.
/// Countries are then sorted by common name within each language.
pub fn build_static_maps(countries: &[CountryData]) -> StaticMaps {
    let mut maps = StaticMaps::default();

    for data in countries {
        let name = data.name.common.as_str();
        maps.countries.insert(name, Country::from(data.clone()));
        let Some(country) = maps.countries.get(name) else {
            continue;
        };

        for entry in &data.languages {
            let key = entry.language.to_lowercase();
            let language = maps
                .languages
                .get_or_insert_with(&key, || Language::new(key.clone()));
            let speakers = data.population as f64 * entry.share();

            if data.un_member {
                language.statistics.total_un_speakers += speakers;
                language.statistics.number_of_un_countries += 1;
            }
            language.statistics.total_speakers += speakers;
            language.statistics.number_of_countries += 1;
            language.countries.push(country.clone());
        }
    }

    for language in maps.languages.values_mut() {
        language
            .countries
            .sort_by_cached_key(|c| (collation_key(&c.common_name), c.common_name.clone()));
    }

    maps
}

/// Sort key that ignores case and accents ("Åland Islands" sorts with "a").
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
