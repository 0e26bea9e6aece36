// In: src/config.rs

//! The single source of truth for all sensory encoding configuration.
//!
//! This module defines the unified `EncodingConfig` struct, which is designed
//! to be created once at the application boundary and then passed down through
//! the encoder and normalizer. Vocabulary growth is an explicit mode here,
//! never a hidden side effect of a lookup.

use serde::{Deserialize, Serialize};

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Controls how the encoder treats tokens that are missing from a vocabulary.
///
/// This is the primary knob of the encoder: the same `encode_record` call either
/// grows its vocabularies as it discovers new keys and strings, or treats them
/// as read-only and degrades unknown entries to the invalid sentinel triple.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VocabMode {
    /// **Default:** Unseen keys and string values are appended to the
    /// vocabularies during encoding. Use this while building a dataset.
    #[default]
    AutoRegister,

    /// Vocabularies are read-only. Unknown keys produce the invalid sentinel
    /// triple and a diagnostic log line; unknown strings encode as the `-1`
    /// not-found id. Use this when encoding against frozen vocabularies.
    Lookup,
}

//==================================================================================
// II. The Unified EncodingConfig
//==================================================================================

/// The single, unified configuration for the encode/normalize pipeline.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct EncodingConfig {
    /// How the encoder treats tokens missing from a vocabulary.
    #[serde(default)]
    pub mode: VocabMode,

    /// The number of decimal digits normalized values are rounded to.
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// The upper bound of the type-tag range used when normalizing the tag
    /// component. Must match the largest quantization precision in use.
    #[serde(default = "default_max_type_precision")]
    pub max_type_precision: i64,

    /// If true, millisecond-epoch timestamp fields are detected and encoded
    /// as cyclical (day, sin, cos) triples instead of plain numbers.
    #[serde(default = "default_true")]
    pub detect_timestamps: bool,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            mode: VocabMode::default(),
            precision: default_precision(),
            max_type_precision: default_max_type_precision(),
            detect_timestamps: true,
        }
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

/// Helper for `serde` to provide the default normalization precision.
fn default_precision() -> u32 {
    6
}

/// Helper for `serde` to provide the default type-tag upper bound.
fn default_max_type_precision() -> i64 {
    18
}
