//! This file is the root of the `sensory_codec` Rust crate.
//!
//! The crate converts nested JSON records into flat, numeric, fixed-shape
//! triples suitable as neural-network input, and exactly reverses the trip:
//!
//! 1. `flatten` turns a nested value into a dotted-path record.
//! 2. `vocabulary` assigns dense integer ids to keys and string values.
//! 3. `codec` packs each field into a typed `[key, value, type]` triple,
//!    quantizing decimals and expanding timestamps into cyclical components.
//! 4. `normalize` maps whole datasets of triples into [0,1] against shared
//!    min/max statistics, and back.
//! 5. `bridge` composes the stages into a stateless, JSON-in/JSON-out API.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod codec;
pub mod config;
pub mod flatten;
pub mod kernels;
pub mod normalize;
pub mod types;
pub mod vocabulary;

mod error;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use bridge::{decode_value, encode_dataset, encode_value, encode_value_with, remove_keys};
pub use config::{EncodingConfig, VocabMode};
pub use error::SensoryError;
pub use types::{FlatRecord, Scalar, Triple};
pub use vocabulary::Vocabulary;

/// Turns on verbose diagnostics (lookup misses, skipped triples) for ad-hoc
/// debugging. Logging is a side channel only; no caller may depend on it for
/// correctness.
pub fn enable_verbose_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
