//! This module defines the core, strongly-typed data representations used
//! throughout the sensory encode/decode pipeline.
//!
//! It includes the canonical `Scalar` enum, which replaces repeated runtime
//! type inspection of JSON values with a closed sum type decided once during
//! flattening, plus the `Triple` wire format and the `FlatRecord` container
//! that carries flattened records between pipeline stages.

pub mod record;
pub mod scalar;
pub mod triple;

// Re-export the main types for easier access.
pub use record::FlatRecord;
pub use scalar::Scalar;
pub use triple::{
    is_malformed, is_sentinel, Triple, SENTINEL, TAG_RAW, TAG_STRING, TAG_TIMESTAMP,
    TRIPLE_FORMAT_VERSION,
};
