//! Min/max statistics and [0,1] normalization over triple arrays.
//!
//! Normalization needs one [`MinMaxIndex`] shared by every record of a
//! dataset: the index is the only full-dataset barrier in the pipeline, and
//! the same instance used to normalize MUST be supplied to denormalize.
//! Everything else here is a pure per-triple transform.

use crate::error::SensoryError;
use crate::kernels::quantize::round_to;
use crate::types::Triple;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

//==================================================================================
// 1. The Min/Max Index
//==================================================================================

/// A running minimum/maximum pair.
///
/// The default is the merge identity (`+inf`/`-inf`), which is also what an
/// empty dataset produces; the degenerate-range guard in
/// [`normalize_value`] maps anything measured against it to 0.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl Default for MinMax {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl MinMax {
    fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

/// Per-key value bounds plus the global key-id bounds, built by scanning one
/// or many triple arrays. Serialized form:
/// `{ "keys": {min,max}, "values": { "<id>": {min,max} } }`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MinMaxIndex {
    pub keys: MinMax,
    pub values: BTreeMap<i64, MinMax>,
}

/// Folds a single `(key, value)` observation into the index.
pub fn update_min_max_index(index: &mut MinMaxIndex, key: i64, value: f64) {
    index.keys.observe(key as f64);
    index.values.entry(key).or_default().observe(value);
}

/// Builds a shared index across a dataset of triple arrays, grouping values
/// by key id and tracking the global key range.
pub fn merge_triple_arrays_and_find_min_max(arrays: &[Vec<Triple>]) -> MinMaxIndex {
    let mut index = MinMaxIndex::default();
    for triples in arrays {
        scan_triples(triples, &mut index);
    }
    index
}

/// Builds an index from a single triple array.
pub fn find_min_max(triples: &[Triple]) -> MinMaxIndex {
    let mut index = MinMaxIndex::default();
    scan_triples(triples, &mut index);
    index
}

fn scan_triples(triples: &[Triple], index: &mut MinMaxIndex) {
    for triple in triples {
        match triple_key(triple) {
            Some(key) => update_min_max_index(index, key, triple[1]),
            None => log::warn!(
                "Skipping triple with non-integral key {} in min/max scan",
                triple[0]
            ),
        }
    }
}

fn triple_key(triple: &Triple) -> Option<i64> {
    let raw = triple[0];
    if raw.is_finite() && raw.fract() == 0.0 {
        Some(raw as i64)
    } else {
        None
    }
}

//==================================================================================
// 2. Scalar Normalization
//==================================================================================

/// Maps a value into [0,1] against a min/max range. Returns exactly 0 when
/// any input is non-finite or when the range is degenerate (`min == max`).
pub fn normalize_value(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() || !min.is_finite() || !max.is_finite() {
        return 0.0;
    }
    if min == max {
        return 0.0;
    }
    (value - min) / (max - min)
}

/// The exact algebraic inverse of [`normalize_value`].
pub fn denormalize_value(value: f64, min: f64, max: f64) -> f64 {
    value * (max - min) + min
}

//==================================================================================
// 3. Triple-Array Normalization
//==================================================================================

/// Normalizes every component of every triple into [0,1]: the value against
/// its key's recorded range, the key against the global key range, and the
/// type tag against the fixed `[-1, max_type_precision]` range; all three
/// rounded to `precision` decimal digits.
///
/// A key id with no entry in the index violates the dataset-wide invariant
/// and aborts the whole call.
pub fn normalize(
    triples: &[Triple],
    index: &MinMaxIndex,
    precision: u32,
    max_type_precision: i64,
) -> Result<Vec<Triple>, SensoryError> {
    triples
        .iter()
        .map(|triple| {
            let key = triple_key(triple).ok_or_else(|| {
                SensoryError::InternalError(format!(
                    "cannot normalize triple with non-integral key {}",
                    triple[0]
                ))
            })?;
            let bounds = index
                .values
                .get(&key)
                .ok_or(SensoryError::MinMaxKeyMiss(key))?;
            let value = round_to(normalize_value(triple[1], bounds.min, bounds.max), precision);
            let key = round_to(
                normalize_value(triple[0], index.keys.min, index.keys.max),
                precision,
            );
            let tag = round_to(
                normalize_value(triple[2], -1.0, max_type_precision as f64),
                precision,
            );
            Ok([key, value, tag])
        })
        .collect()
}

/// The inverse of [`normalize`]. The denormalized key is rounded to the
/// nearest integer before its range is looked up again; a recovered key with
/// no entry in the index is fatal, since the dataset cannot be rebuilt
/// without its bounds.
pub fn denormalize(
    triples: &[Triple],
    index: &MinMaxIndex,
    precision: u32,
    max_type_precision: i64,
) -> Result<Vec<Triple>, SensoryError> {
    triples
        .iter()
        .map(|triple| {
            let key = round_to(
                denormalize_value(triple[0], index.keys.min, index.keys.max),
                0,
            );
            if !key.is_finite() {
                return Err(SensoryError::InternalError(format!(
                    "denormalized key {} is not a valid id",
                    key
                )));
            }
            let key_id = key as i64;
            let bounds = index
                .values
                .get(&key_id)
                .ok_or(SensoryError::MinMaxKeyMiss(key_id))?;
            let value = round_to(
                denormalize_value(triple[1], bounds.min, bounds.max),
                precision,
            );
            let tag = round_to(
                denormalize_value(triple[2], -1.0, max_type_precision as f64),
                precision,
            );
            Ok([key, value, tag])
        })
        .collect()
}

//==================================================================================
// 4. Dataset Variants
//==================================================================================

/// Normalizes a dataset of triple arrays against one shared index, so values
/// stay comparable across records. When no index is supplied, one is built by
/// merging the whole dataset first.
pub fn normalize_dataset(
    dataset: &[Vec<Triple>],
    index: Option<&MinMaxIndex>,
    precision: u32,
    max_type_precision: i64,
) -> Result<Vec<Vec<Triple>>, SensoryError> {
    let built;
    let index = match index {
        Some(index) => index,
        None => {
            built = merge_triple_arrays_and_find_min_max(dataset);
            &built
        }
    };
    dataset
        .iter()
        .map(|triples| normalize(triples, index, precision, max_type_precision))
        .collect()
}

/// Denormalizes a dataset using the same index that normalized it.
pub fn denormalize_dataset(
    dataset: &[Vec<Triple>],
    index: &MinMaxIndex,
    precision: u32,
    max_type_precision: i64,
) -> Result<Vec<Vec<Triple>>, SensoryError> {
    dataset
        .iter()
        .map(|triples| denormalize(triples, index, precision, max_type_precision))
        .collect()
}

//==================================================================================
// 5. Unit Tests
//==================================================================================
