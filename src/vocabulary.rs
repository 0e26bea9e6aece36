//! Token ↔ id vocabularies for flattened keys and string values.
//!
//! A vocabulary assigns dense, insertion-ordered integer ids to tokens so a
//! record can travel as pure numbers. The forward map is backed by a hash
//! index and the ids double as positions in a token arena, which makes
//! `reverse_lookup` O(1) instead of a linear scan over the map.
//!
//! The same vocabulary instance used for encoding MUST be supplied for
//! decoding; ids are only meaningful against the arena that issued them.

use crate::error::SensoryError;
use crate::flatten::is_index_segment;
use crate::types::FlatRecord;
use hashbrown::HashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

//==================================================================================
// 1. The Vocabulary
//==================================================================================

/// An insertion-ordered mapping from tokens to dense non-negative ids.
///
/// Ids start at 0, increase monotonically, and never have gaps. Serialized
/// form is a plain JSON map in id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    index: HashMap<String, i64>,
    tokens: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the id for a token, registering it with the next dense id if
    /// it has not been seen before.
    pub fn insert(&mut self, token: &str) -> i64 {
        if let Some(&id) = self.index.get(token) {
            return id;
        }
        let id = self.tokens.len() as i64;
        self.index.insert(token.to_string(), id);
        self.tokens.push(token.to_string());
        id
    }

    /// Finds the id for a token; `None` is the not-found sentinel.
    pub fn lookup(&self, token: &str) -> Option<i64> {
        self.index.get(token).copied()
    }

    /// Tolerant lookup for uniform-array paths: on a miss, retries with every
    /// per-instance numeric index segment collapsed to the reserved `-1`
    /// segment, so any array instance resolves against a single compacted
    /// vocabulary entry.
    pub fn lookup_collapsed(&self, token: &str) -> Option<i64> {
        if let Some(id) = self.lookup(token) {
            return Some(id);
        }
        let collapsed = collapse_index_segments(token);
        if collapsed == token {
            return None;
        }
        self.lookup(&collapsed)
    }

    /// Finds the token for an id.
    pub fn reverse_lookup(&self, id: i64) -> Option<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|pos| self.tokens.get(pos))
            .map(String::as_str)
    }

    /// Iterates `(token, id)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(pos, token)| (token.as_str(), pos as i64))
    }
}

/// Rewrites every numeric index segment of a dotted path to the reserved
/// `-1` segment: `"items.3.name"` becomes `"items.-1.name"`.
pub fn collapse_index_segments(key: &str) -> String {
    key.split('.')
        .map(|segment| {
            if is_index_segment(segment) {
                "-1"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

//==================================================================================
// 2. Builders
//==================================================================================

/// Assigns an id to each key of a flattened record, in enumeration order.
pub fn generate_key_vocabulary(record: &FlatRecord) -> Vocabulary {
    let mut vocabulary = Vocabulary::new();
    for key in record.keys() {
        vocabulary.insert(key);
    }
    vocabulary
}

/// Assigns an id to each distinct string value of a flattened record, in
/// first-seen order. Booleans participate in their string form; there is no
/// need to register numbers, since they quantize and normalize directly.
pub fn generate_string_vocabulary(record: &FlatRecord) -> Vocabulary {
    let mut vocabulary = Vocabulary::new();
    for (_, value) in record.iter() {
        if let Some(token) = value.as_vocab_token() {
            vocabulary.insert(&token);
        }
    }
    vocabulary
}

/// Builds both vocabularies for a flattened record.
pub fn generate_vocabularies(record: &FlatRecord) -> (Vocabulary, Vocabulary) {
    (
        generate_key_vocabulary(record),
        generate_string_vocabulary(record),
    )
}

//==================================================================================
// 3. Serde (plain ordered map on the wire)
//==================================================================================

impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (token, id) in self.iter() {
            map.serialize_entry(token, &id)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VocabularyVisitor;

        impl<'de> Visitor<'de> for VocabularyVisitor {
            type Value = Vocabulary;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from token to dense integer id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs: Vec<(String, i64)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(pair) = access.next_entry()? {
                    pairs.push(pair);
                }
                pairs.sort_by_key(|&(_, id)| id);

                let mut vocabulary = Vocabulary::new();
                for (pos, (token, id)) in pairs.into_iter().enumerate() {
                    if id != pos as i64 {
                        return Err(serde::de::Error::custom(format!(
                            "vocabulary ids must be dense from 0; saw id {} at position {}",
                            id, pos
                        )));
                    }
                    vocabulary.insert(&token);
                }
                Ok(vocabulary)
            }
        }

        deserializer.deserialize_map(VocabularyVisitor)
    }
}

/// Reads a vocabulary from its persisted JSON map form.
pub fn vocabulary_from_json(json: &str) -> Result<Vocabulary, SensoryError> {
    Ok(serde_json::from_str(json)?)
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
