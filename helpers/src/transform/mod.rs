//! Dataset transformations.
//!
//! - Languages: `languages` mapping to an array of language records
//! - Flags: join country codes and flag emoji by common name
//! - Maps: static country and language maps for the front-end
//! - Pipeline: file-level entry points

pub mod flags;
pub mod languages;
pub mod maps;
pub mod pipeline;

pub use flags::{merge_flags_and_codes, FlagCodeIndex, MergeReport, MergeWarning};
pub use languages::{convert_languages, ConvertSummary};
pub use maps::{build_static_maps, CountryMap, LanguageMap, OrderedMap, StaticMaps};
pub use pipeline::*;
