// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing composition of the sensory pipeline. It
// wires the pure stages together so a caller can go from a parsed JSON value
// to normalized triples and back without touching the stages directly.
//
// Data Flow (Encoding):
//
//   1. [Stateless API (encode_value)]     -> Receives `&serde_json::Value`
//         |
//         `-> a. Calls `flatten` to produce a `FlatRecord`
//         |
//         `-> b. Calls the triple encoder with the caller's (or fresh) vocabularies
//         |
//         `-> Returns `Vec<Triple>` (+ vocabularies in auto-build mode)
//
//   2. [Normalizer (normalize_dataset)]   -> Shares one `MinMaxIndex` across records
//
// Data Flow (Decoding):
//
//   1. [Normalizer (denormalize_dataset)] -> Same `MinMaxIndex` as normalization
//         |
//   2. [Stateless API (decode_value)]     -> Receives `&[Triple]`
//         |
//         `-> a. Calls the triple decoder (timestamp groups recombine here)
//         |
//         `-> b. Calls `unflatten` and returns the rebuilt `serde_json::Value`
//
// ====================================================================================
pub mod stateless_api;

pub use stateless_api::{
    decode_value, encode_dataset, encode_value, encode_value_with, remove_keys,
};
