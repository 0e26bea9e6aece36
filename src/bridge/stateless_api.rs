// In: src/bridge/stateless_api.rs

use serde_json::Value;

use crate::codec::{decode_record, encode_record, encode_record_auto};
use crate::config::EncodingConfig;
use crate::flatten::{flatten, unflatten};
use crate::types::Triple;
use crate::vocabulary::Vocabulary;

/// Encodes a parsed JSON value into triples, building fresh vocabularies.
/// This is the one-shot entry point: the returned vocabularies are required
/// to decode the triples later.
pub fn encode_value(value: &Value, config: &EncodingConfig) -> (Vec<Triple>, Vocabulary, Vocabulary) {
    let record = flatten(value);
    encode_record_auto(&record, config)
}

/// Encodes a parsed JSON value against caller-supplied vocabularies. Whether
/// unseen tokens grow the vocabularies or degrade to the sentinel is decided
/// by `config.mode`.
pub fn encode_value_with(
    value: &Value,
    keys: &mut Vocabulary,
    strings: &mut Vocabulary,
    config: &EncodingConfig,
) -> Vec<Triple> {
    let record = flatten(value);
    encode_record(&record, keys, strings, config)
}

/// Encodes a whole dataset with one shared pair of vocabularies, so key and
/// string ids stay comparable across records.
pub fn encode_dataset(
    records: &[Value],
    config: &EncodingConfig,
) -> (Vec<Vec<Triple>>, Vocabulary, Vocabulary) {
    let mut keys = Vocabulary::new();
    let mut strings = Vocabulary::new();
    let auto = EncodingConfig {
        mode: crate::config::VocabMode::AutoRegister,
        ..config.clone()
    };
    let triples = records
        .iter()
        .map(|record| encode_record(&flatten(record), &mut keys, &mut strings, &auto))
        .collect();
    (triples, keys, strings)
}

/// Decodes triples back into a nested JSON value using the vocabularies that
/// encoded them.
pub fn decode_value(triples: &[Triple], keys: &Vocabulary, strings: &Vocabulary) -> Value {
    let record = decode_record(triples, keys, strings);
    unflatten(&record)
}

/// Returns a copy of the value with the named top-level fields removed.
/// Non-object values pass through unchanged.
pub fn remove_keys(value: &Value, keys_to_remove: &[&str]) -> Value {
    let mut out = value.clone();
    if let Value::Object(map) = &mut out {
        for key in keys_to_remove {
            map.remove(*key);
        }
    }
    out
}
