//! Decoding of typed numeric triples back into flattened records.

use crate::kernels::{quantize, timestamp};
use crate::types::{
    is_malformed, is_sentinel, FlatRecord, Scalar, Triple, TAG_RAW, TAG_STRING, TAG_TIMESTAMP,
};
use crate::vocabulary::Vocabulary;

//==================================================================================
// 1. Record Decoding
//==================================================================================

/// Decodes an array of triples into a flattened record using the same
/// vocabularies that encoded it.
///
/// Per-entry failures never abort the batch: a malformed triple decodes to
/// NaN at its positional index, the invalid sentinel and unresolvable keys
/// decode to null at their positional index. After the main pass, timestamp
/// component groups (`<base>.day`/`.sin`/`.cos`) recombine into `<base>` as
/// epoch milliseconds.
pub fn decode_record(triples: &[Triple], keys: &Vocabulary, strings: &Vocabulary) -> FlatRecord {
    let mut record = FlatRecord::new();
    for (index, triple) in triples.iter().enumerate() {
        if is_malformed(triple) {
            record.insert(index.to_string(), Scalar::Number(f64::NAN));
            continue;
        }
        if is_sentinel(triple) {
            record.insert(index.to_string(), Scalar::Null);
            continue;
        }
        match resolve_key(triple[0], keys) {
            Some(key) => {
                let value = decode_value(triple, strings);
                record.insert(key, value);
            }
            None => record.insert(index.to_string(), Scalar::Null),
        }
    }
    recombine_timestamps(&mut record);
    record
}

/// Decodes triples into `(key, value)` pairs in wire order, without timestamp
/// recombination. The sentinel yields `(None, Null)`, a malformed triple
/// `(None, NaN)`, and an unresolvable key `(None, value)`.
pub fn decode_record_entries(
    triples: &[Triple],
    keys: &Vocabulary,
    strings: &Vocabulary,
) -> Vec<(Option<String>, Scalar)> {
    triples
        .iter()
        .map(|triple| {
            if is_sentinel(triple) {
                return (None, Scalar::Null);
            }
            if is_malformed(triple) {
                return (None, Scalar::Number(f64::NAN));
            }
            match resolve_key(triple[0], keys) {
                Some(key) => (Some(key), decode_value(triple, strings)),
                None => (None, Scalar::Number(triple[1])),
            }
        })
        .collect()
}

fn resolve_key(raw: f64, keys: &Vocabulary) -> Option<String> {
    if !raw.is_finite() || raw.fract() != 0.0 {
        return None;
    }
    keys.reverse_lookup(raw as i64).map(str::to_string)
}

fn decode_value(triple: &Triple, strings: &Vocabulary) -> Scalar {
    let [_, value, tag] = *triple;
    // Tags are integral on the wire; a denormalization round trip leaves
    // sub-precision residue on them, so recover the integer first.
    let tag = tag.round();
    if tag == TAG_STRING {
        return decode_string(value, strings);
    }
    if tag == TAG_RAW || tag == TAG_TIMESTAMP {
        // Timestamp components pass through raw, pending recombination.
        return Scalar::Number(value);
    }
    if tag > 0.0 {
        return Scalar::Number(quantize::unquantize(value, tag as i32));
    }
    Scalar::Null
}

fn decode_string(value: f64, strings: &Vocabulary) -> Scalar {
    // String ids round for the same reason keys and tags do.
    match strings.reverse_lookup(value.round() as i64) {
        Some(token) => Scalar::Text(token.to_string()),
        None => Scalar::Null,
    }
}

//==================================================================================
// 2. Timestamp Recombination
//==================================================================================

fn recombine_timestamps(record: &mut FlatRecord) {
    let bases: Vec<String> = record
        .keys()
        .filter_map(|key| key.strip_suffix(".sin"))
        .map(str::to_string)
        .collect();

    for base in bases {
        let day_key = format!("{}.day", base);
        let sin_key = format!("{}.sin", base);
        let cos_key = format!("{}.cos", base);

        let (Some(&Scalar::Number(day)), Some(&Scalar::Number(sin)), Some(&Scalar::Number(cos))) = (
            record.get(&day_key),
            record.get(&sin_key),
            record.get(&cos_key),
        ) else {
            continue;
        };

        let ms = timestamp::decode_timestamp(day, sin, cos);
        let position = record.position(&day_key).unwrap_or(record.len());
        record.remove(&day_key);
        record.remove(&sin_key);
        record.remove(&cos_key);
        record.insert_at(position, base, Scalar::Number(ms));
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
