//! Encoding of flattened records into typed numeric triples.

use crate::config::{EncodingConfig, VocabMode};
use crate::kernels::{quantize, timestamp};
use crate::types::{FlatRecord, Scalar, Triple, SENTINEL, TAG_STRING, TAG_TIMESTAMP};
use crate::vocabulary::Vocabulary;

//==================================================================================
// 1. Triple Construction
//==================================================================================

/// Encodes one `(key, value, precision)` observation into a triple.
///
/// `precision` doubles as the type tag: `0` means an unquantized number,
/// `> 0` a quantized number with that many decimal digits, and any negative
/// value tags the value as a string-vocabulary id. Numeric strings coerce to
/// numbers; null, booleans, and non-finite numbers are unencodable and
/// produce the sentinel triple.
pub fn encode_triple(key: f64, value: &Scalar, precision: i64) -> Triple {
    let number = match value {
        Scalar::Number(n) => *n,
        Scalar::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => return SENTINEL,
        },
        Scalar::Null | Scalar::Bool(_) => return SENTINEL,
    };
    if !key.is_finite() || !number.is_finite() {
        return SENTINEL;
    }
    let tag = if precision > 0 {
        precision as f64
    } else if precision == 0 {
        0.0
    } else {
        TAG_STRING
    };
    [key, number, tag]
}

/// Counts decimal digits in the canonical shortest string form of a number.
fn decimal_digits(value: f64) -> usize {
    if !value.is_finite() {
        return 0;
    }
    let text = format!("{}", value);
    match text.find('.') {
        Some(dot) => text.len() - dot - 1,
        None => 0,
    }
}

/// The precision policy: exactly 2 decimal digits quantize at 2, more than 2
/// quantize at 18, otherwise the value travels unquantized.
fn select_precision(value: f64) -> i64 {
    match decimal_digits(value) {
        2 => 2,
        digits if digits > 2 => 18,
        _ => 0,
    }
}

//==================================================================================
// 2. Record Encoding
//==================================================================================

/// Encodes a flattened record into an array of triples using the supplied
/// vocabularies.
///
/// In [`VocabMode::AutoRegister`] unseen keys and strings are appended to the
/// vocabularies; in [`VocabMode::Lookup`] the vocabularies are read-only and
/// a missing key degrades the entry to the sentinel triple (with a log
/// diagnostic, never an error). Timestamp-like fields expand into three
/// component triples whose compound keys are always auto-registered.
pub fn encode_record(
    record: &FlatRecord,
    keys: &mut Vocabulary,
    strings: &mut Vocabulary,
    config: &EncodingConfig,
) -> Vec<Triple> {
    let mut triples = Vec::with_capacity(record.len());
    for (key, value) in record.iter() {
        if config.detect_timestamps {
            if let Scalar::Number(n) = value {
                if timestamp::is_timestamp(key, *n) {
                    encode_timestamp_components(key, *n, keys, &mut triples);
                    continue;
                }
            }
        }

        let key_id = match resolve_key(key, keys, config.mode) {
            Some(id) => id,
            None => {
                log::warn!("Key {} not found in key vocabulary", key);
                triples.push(SENTINEL);
                continue;
            }
        };

        let triple = match value {
            Scalar::Number(n) => encode_number(key_id, *n, key),
            Scalar::Text(s) => encode_string(key_id, s, strings, config.mode),
            Scalar::Bool(b) => encode_string(key_id, &b.to_string(), strings, config.mode),
            Scalar::Null => {
                log::warn!("Invalid value null for key {}", key);
                SENTINEL
            }
        };
        triples.push(triple);
    }
    triples
}

/// Auto-build mode: encodes against fresh vocabularies and returns them
/// alongside the triples. Ids are assigned in record enumeration order.
pub fn encode_record_auto(
    record: &FlatRecord,
    config: &EncodingConfig,
) -> (Vec<Triple>, Vocabulary, Vocabulary) {
    let mut keys = Vocabulary::new();
    let mut strings = Vocabulary::new();
    let auto = EncodingConfig {
        mode: VocabMode::AutoRegister,
        ..config.clone()
    };
    let triples = encode_record(record, &mut keys, &mut strings, &auto);
    (triples, keys, strings)
}

fn resolve_key(key: &str, keys: &mut Vocabulary, mode: VocabMode) -> Option<i64> {
    match mode {
        VocabMode::AutoRegister => Some(keys.insert(key)),
        // Collapsed retry lets array instances resolve against a vocabulary
        // built from a uniform-array record.
        VocabMode::Lookup => keys.lookup_collapsed(key),
    }
}

fn encode_timestamp_components(
    key: &str,
    ms: f64,
    keys: &mut Vocabulary,
    triples: &mut Vec<Triple>,
) {
    let (day, sin, cos) = timestamp::encode_timestamp(ms);
    for (suffix, component) in [("day", day), ("sin", sin), ("cos", cos)] {
        let id = keys.insert(&format!("{}.{}", key, suffix));
        triples.push([id as f64, component, TAG_TIMESTAMP]);
    }
}

fn encode_number(key_id: i64, value: f64, key: &str) -> Triple {
    if !value.is_finite() {
        log::warn!("Invalid value {} for key {}", value, key);
        return SENTINEL;
    }
    let precision = select_precision(value);
    if precision > 0 {
        let quantized = quantize::quantize(value, precision as i32);
        encode_triple(key_id as f64, &Scalar::Number(quantized), precision)
    } else {
        encode_triple(key_id as f64, &Scalar::Number(value), 0)
    }
}

fn encode_string(key_id: i64, token: &str, strings: &mut Vocabulary, mode: VocabMode) -> Triple {
    let string_id = match mode {
        VocabMode::AutoRegister => strings.insert(token),
        VocabMode::Lookup => match strings.lookup(token) {
            Some(id) => id,
            None => {
                log::warn!("Value {} not found in string vocabulary", token);
                // The embedded not-found id decodes to null downstream.
                -1
            }
        },
    };
    [key_id as f64, string_id as f64, TAG_STRING]
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{is_sentinel, TAG_RAW};

    fn config(mode: VocabMode) -> EncodingConfig {
        EncodingConfig {
            mode,
            ..EncodingConfig::default()
        }
    }

    #[test]
    fn test_encode_triple_coerces_numeric_strings() {
        assert_eq!(
            encode_triple(1.0, &Scalar::Text("2".to_string()), 0),
            [1.0, 2.0, 0.0]
        );
    }

    #[test]
    fn test_encode_triple_rejects_unencodable_values() {
        assert!(is_sentinel(&encode_triple(1.0, &Scalar::Null, 0)));
        assert!(is_sentinel(&encode_triple(1.0, &Scalar::Bool(true), 0)));
        assert!(is_sentinel(&encode_triple(
            1.0,
            &Scalar::Text("abc".to_string()),
            0
        )));
        assert!(is_sentinel(&encode_triple(
            1.0,
            &Scalar::Number(f64::NAN),
            0
        )));
    }

    #[test]
    fn test_encode_triple_tags_follow_precision() {
        assert_eq!(encode_triple(1.0, &Scalar::Number(2.0), 0), [1.0, 2.0, 0.0]);
        assert_eq!(encode_triple(1.0, &Scalar::Number(2.0), 2), [1.0, 2.0, 2.0]);
        assert_eq!(
            encode_triple(1.0, &Scalar::Number(2.0), -1),
            [1.0, 2.0, -1.0]
        );
    }

    #[test]
    fn test_precision_policy() {
        assert_eq!(select_precision(3.0), 0);
        assert_eq!(select_precision(3.5), 0);
        assert_eq!(select_precision(1.23), 2);
        assert_eq!(select_precision(1.2345), 18);
    }

    #[test]
    fn test_encode_record_quantizes_two_decimals() {
        let mut record = FlatRecord::new();
        record.insert("key1", Scalar::Number(1.23));
        record.insert("key2", Scalar::Text("value2".to_string()));

        let (triples, keys, strings) = encode_record_auto(&record, &EncodingConfig::default());
        assert_eq!(triples, vec![[0.0, 123.0, 2.0], [1.0, 0.0, -1.0]]);
        assert_eq!(keys.lookup("key1"), Some(0));
        assert_eq!(strings.lookup("value2"), Some(0));
    }

    #[test]
    fn test_encode_record_high_precision_path() {
        let mut record = FlatRecord::new();
        record.insert("ratio", Scalar::Number(0.1234567));

        let (triples, _, _) = encode_record_auto(&record, &EncodingConfig::default());
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0][2], 18.0);
        assert!((triples[0][1] * 1e-18 - 0.1234567).abs() < 1e-9);
    }

    #[test]
    fn test_encode_record_lookup_mode_sentinels_unknown_keys() {
        let mut record = FlatRecord::new();
        record.insert("known", Scalar::Number(1.0));
        record.insert("unknown", Scalar::Number(2.0));

        let mut keys = Vocabulary::new();
        keys.insert("known");
        let mut strings = Vocabulary::new();

        let triples = encode_record(&record, &mut keys, &mut strings, &config(VocabMode::Lookup));
        assert_eq!(triples, vec![[0.0, 1.0, TAG_RAW], SENTINEL]);
        // Read-only mode must not have grown the vocabulary.
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_encode_record_lookup_mode_embeds_string_miss() {
        let mut record = FlatRecord::new();
        record.insert("color", Scalar::Text("mauve".to_string()));

        let mut keys = Vocabulary::new();
        keys.insert("color");
        let mut strings = Vocabulary::new();

        let triples = encode_record(&record, &mut keys, &mut strings, &config(VocabMode::Lookup));
        assert_eq!(triples, vec![[0.0, -1.0, TAG_STRING]]);
    }

    #[test]
    fn test_encode_record_coerces_booleans_to_strings() {
        let mut record = FlatRecord::new();
        record.insert("active", Scalar::Bool(true));

        let (triples, _, strings) = encode_record_auto(&record, &EncodingConfig::default());
        assert_eq!(triples, vec![[0.0, 0.0, TAG_STRING]]);
        assert_eq!(strings.lookup("true"), Some(0));
    }

    #[test]
    fn test_encode_record_expands_timestamps() {
        let mut record = FlatRecord::new();
        record.insert("created_at", Scalar::Number(1_672_531_200_000.0));
        record.insert("count", Scalar::Number(7.0));

        let (triples, keys, _) = encode_record_auto(&record, &EncodingConfig::default());
        assert_eq!(triples.len(), 4);
        assert_eq!(keys.lookup("created_at.day"), Some(0));
        assert_eq!(keys.lookup("created_at.sin"), Some(1));
        assert_eq!(keys.lookup("created_at.cos"), Some(2));
        assert_eq!(keys.lookup("count"), Some(3));

        assert_eq!(triples[0], [0.0, 19358.0, TAG_TIMESTAMP]);
        assert_eq!(triples[1][2], TAG_TIMESTAMP);
        assert_eq!(triples[2][2], TAG_TIMESTAMP);
        assert_eq!(triples[3], [3.0, 7.0, TAG_RAW]);
    }

    #[test]
    fn test_encode_record_timestamp_detection_can_be_disabled() {
        let mut record = FlatRecord::new();
        record.insert("created_at", Scalar::Number(1_672_531_200_000.0));

        let cfg = EncodingConfig {
            detect_timestamps: false,
            ..EncodingConfig::default()
        };
        let (triples, keys, _) = encode_record_auto(&record, &cfg);
        assert_eq!(triples, vec![[0.0, 1_672_531_200_000.0, TAG_RAW]]);
        assert_eq!(keys.lookup("created_at"), Some(0));
    }

    #[test]
    fn test_encode_record_null_becomes_sentinel() {
        let mut record = FlatRecord::new();
        record.insert("gone", Scalar::Null);

        let (triples, _, _) = encode_record_auto(&record, &EncodingConfig::default());
        assert_eq!(triples, vec![SENTINEL]);
    }
}
