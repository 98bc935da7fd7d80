//! # langmap-helpers - data preparation for the world language map
//!
//! One-shot transformations over the JSON country dataset behind the map.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  countries   │──▶│  Languages   │──▶│ Flags/codes  │──▶│ Static maps  │
//! │   (JSON)     │   │  (mapping →  │   │ (join on     │   │ (country +   │
//! │              │   │   array)     │   │  name.common)│   │  language)   │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! Each stage is independent: it reads files, runs one pass and writes a
//! file. Stages are chained by hand.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use langmap_helpers::{run_convert, Logger, RunOptions};
//! use std::path::Path;
//!
//! let mut logger = Logger::new();
//! run_convert(
//!     Path::new("countries.json"),
//!     Path::new("countries_converted.json"),
//!     &RunOptions::default(),
//!     &mut logger,
//! )?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`logs`] - Console diagnostics
//! - [`config`] - Environment configuration
//! - [`models`] - Country records and map entries
//! - [`dataset`] - Dataset file I/O
//! - [`validation`] - Presence checks and flag emoji check
//! - [`transform`] - Languages, flags, maps and file-level entry points

// Core modules
pub mod error;
pub mod logs;
pub mod config;
pub mod models;

// I/O and checks
pub mod dataset;
pub mod validation;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Errors and configuration
// =============================================================================

pub use error::{CommandError, ConfigError, DatasetError, DatasetResult};
pub use config::{HelperConfig, MergePaths};
pub use logs::{LogEntry, LogLevel, Logger, Stream};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    common_name,
    Country,
    CountryData,
    CountryRecord,
    FlagCode,
    Language,
    LanguageEntry,
    Statistics,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid_flag_emoji, validate_country_record, validate_prepared_country};

// =============================================================================
// Re-exports - Transformations
// =============================================================================

pub use transform::{
    build_static_maps,
    convert_languages,
    merge_flags_and_codes,
    ConvertSummary,
    FlagCodeIndex,
    MergeReport,
    MergeWarning,
    StaticMaps,
};

pub use transform::pipeline::{
    run_build_maps,
    run_convert,
    run_merge,
    MapSummary,
    RunOptions,
};
