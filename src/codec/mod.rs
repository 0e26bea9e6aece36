//! The triple codec: flattened records in, typed numeric triples out, and back.
//!
//! Encoding resolves each key and string value through the vocabularies,
//! quantizes decimals per the precision policy, and expands timestamp-like
//! fields into cyclical (day, sin, cos) component triples. Decoding reverses
//! each step and recombines timestamp components. Per-entry failures degrade
//! to the sentinel triple or NaN so batch output always stays positionally
//! aligned with its input.

pub mod decoder;
pub mod encoder;

pub use decoder::{decode_record, decode_record_entries};
pub use encoder::{encode_record, encode_record_auto, encode_triple};
