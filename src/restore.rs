//! Restoring enumerants from their JSON wire form
//!
//! The input tree is walked once. A mapping node is rehydrated when it has
//! the enumerant shape: a string `id`, a string `predicateName` and an array
//! `predicateSet`. Any other mapping is recursed into. Arrays are kept as
//! plain data unless `descend_into_sequences` is set.

use std::ops::Index;

use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::RestoreConfig;
use crate::enumerant::{Enumerant, ID_FIELD, PREDICATE_NAME_FIELD, PREDICATE_SET_FIELD};
use crate::error::{EnumError, Result};

/// Encoded data accepted by [`restore`]
#[derive(Debug, Clone)]
pub enum Encoded<'a> {
    /// JSON text
    Text(&'a str),
    /// An already parsed tree
    Tree(Value),
}

impl<'a> From<&'a str> for Encoded<'a> {
    fn from(s: &'a str) -> Self {
        Encoded::Text(s)
    }
}

impl<'a> From<&'a String> for Encoded<'a> {
    fn from(s: &'a String) -> Self {
        Encoded::Text(s)
    }
}

impl From<Value> for Encoded<'_> {
    fn from(v: Value) -> Self {
        Encoded::Tree(v)
    }
}

/// A tree with enumerant behavior restored
#[derive(Debug, Clone, PartialEq)]
pub enum Restored {
    /// A rehydrated enumerant
    Enumerant(Enumerant),
    /// A mapping, in source order
    Mapping(Vec<(String, Restored)>),
    /// An array walked for enumerants
    Sequence(Vec<Restored>),
    /// Anything left as plain data
    Plain(Value),
}

impl Restored {
    /// Child of a mapping node
    pub fn get(&self, key: &str) -> Option<&Restored> {
        match self {
            Restored::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_enumerant(&self) -> Option<&Enumerant> {
        match self {
            Restored::Enumerant(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_plain(&self) -> Option<&Value> {
        match self {
            Restored::Plain(v) => Some(v),
            _ => None,
        }
    }

    /// Every restored enumerant with its dotted path from the root
    pub fn enumerants(&self) -> Vec<(String, &Enumerant)> {
        let mut found = Vec::new();
        self.collect_enumerants(String::new(), &mut found);
        found
    }

    fn collect_enumerants<'a>(&'a self, path: String, found: &mut Vec<(String, &'a Enumerant)>) {
        match self {
            Restored::Enumerant(e) => found.push((path, e)),
            Restored::Mapping(entries) => {
                for (key, child) in entries {
                    child.collect_enumerants(child_path(&path, key), found);
                }
            }
            Restored::Sequence(items) => {
                for (i, child) in items.iter().enumerate() {
                    child.collect_enumerants(child_path(&path, &i.to_string()), found);
                }
            }
            Restored::Plain(_) => {}
        }
    }
}

fn child_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}

impl Index<&str> for Restored {
    type Output = Restored;

    fn index(&self, key: &str) -> &Restored {
        match self.get(key) {
            Some(child) => child,
            None => panic!("no entry {:?} in restored tree", key),
        }
    }
}

impl Serialize for Restored {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Restored::Enumerant(e) => e.serialize(serializer),
            Restored::Plain(v) => v.serialize(serializer),
            Restored::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Restored::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Whether a mapping node carries the enumerant fields
fn has_enumerant_shape(map: &Map<String, Value>) -> bool {
    matches!(map.get(ID_FIELD), Some(Value::String(_)))
        && matches!(map.get(PREDICATE_NAME_FIELD), Some(Value::String(_)))
        && matches!(map.get(PREDICATE_SET_FIELD), Some(Value::Array(_)))
}

fn rehydrate(map: Map<String, Value>) -> Result<Enumerant> {
    let text = |field: &str| match map.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(EnumError::MalformedEnumerant(format!("missing {}", field))),
    };
    let id = text(ID_FIELD)?;
    let predicate_name = text(PREDICATE_NAME_FIELD)?;
    let predicate_names = match map.get(PREDICATE_SET_FIELD) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(EnumError::MalformedEnumerant(format!(
                    "predicate set of {} holds {}",
                    id, other
                ))),
            })
            .collect::<Result<Vec<_>>>()?,
        _ => return Err(EnumError::MalformedEnumerant(format!("missing {}", PREDICATE_SET_FIELD))),
    };
    Enumerant::rehydrate(id, predicate_name, predicate_names)
}

struct Walker<'c> {
    config: &'c RestoreConfig,
    restored: usize,
}

impl Walker<'_> {
    fn visit(&mut self, value: Value) -> Result<Restored> {
        match value {
            Value::Object(map) if has_enumerant_shape(&map) => {
                let enumerant = rehydrate(map)?;
                trace!(id = enumerant.id(), "rehydrated enumerant");
                self.restored += 1;
                Ok(Restored::Enumerant(enumerant))
            }
            Value::Object(map) => {
                let entries = map
                    .into_iter()
                    .map(|(key, child)| self.visit(child).map(|v| (key, v)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Restored::Mapping(entries))
            }
            Value::Array(items) if self.config.descend_into_sequences => {
                let items = items
                    .into_iter()
                    .map(|child| self.visit(child))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Restored::Sequence(items))
            }
            other => Ok(Restored::Plain(other)),
        }
    }
}

/// Restore enumerant behavior in encoded data
pub fn restore<'a>(data: impl Into<Encoded<'a>>) -> Result<Restored> {
    restore_with(data, &RestoreConfig::default())
}

/// Restore enumerant behavior with explicit options
pub fn restore_with<'a>(data: impl Into<Encoded<'a>>, config: &RestoreConfig) -> Result<Restored> {
    let tree = match data.into() {
        Encoded::Text(text) => serde_json::from_str(text)?,
        Encoded::Tree(tree) => tree,
    };
    let mut walker = Walker { config, restored: 0 };
    let restored = walker.visit(tree)?;
    debug!(enumerants = walker.restored, "restored tree");
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key1() -> Value {
        json!({"id": "Key1", "predicateName": "isKey1", "predicateSet": ["isKey1", "isKey2"]})
    }

    #[test]
    fn test_restore_nested() {
        let text = json!({"flag": key1(), "name": "foo", "deep": {"inner": key1()}}).to_string();
        let restored = restore(text.as_str()).unwrap();

        let flag = restored["flag"].as_enumerant().unwrap();
        assert_eq!(flag.name(), "Key1");
        assert!(flag.matches("isKey1"));
        assert!(!flag.matches("isKey2"));
        assert_eq!(restored["name"].as_plain(), Some(&json!("foo")));
        assert!(restored["deep"]["inner"].as_enumerant().is_some());
        assert_eq!(restored.enumerants().len(), 2);
    }

    #[test]
    fn test_root_enumerant() {
        let restored = restore(key1()).unwrap();
        assert_eq!(restored.as_enumerant().unwrap().to_string(), "Key1");
    }

    #[test]
    fn test_sequences_kept_plain_by_default() {
        let data = json!({"list": [key1()]});
        let plain = restore(data.clone()).unwrap();
        assert_eq!(plain["list"].as_plain(), Some(&json!([key1()])));

        let config = RestoreConfig { descend_into_sequences: true };
        let walked = restore_with(data, &config).unwrap();
        assert_eq!(walked.enumerants()[0].0, "list.0");
    }

    #[test]
    fn test_partial_shape_is_plain() {
        let restored = restore(json!({"x": {"id": "Key1"}})).unwrap();
        assert_eq!(restored["x"]["id"].as_plain(), Some(&json!("Key1")));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(restore("{not json"), Err(EnumError::MalformedInput(_))));
        let bad = json!({"id": "Key1", "predicateName": "isKey3", "predicateSet": ["isKey1"]});
        assert!(matches!(restore(bad), Err(EnumError::MalformedEnumerant(_))));
        let bad_set = json!({"id": "Key1", "predicateName": "isKey1", "predicateSet": ["isKey1", 2]});
        assert!(matches!(restore(bad_set), Err(EnumError::MalformedEnumerant(_))));
    }

    #[test]
    fn test_predicate_must_follow_id() {
        let forged = json!({"id": "red", "predicateName": "isBlue", "predicateSet": ["isBlue", "isRed"]});
        assert!(matches!(restore(forged), Err(EnumError::MalformedEnumerant(_))));

        let nested = json!({"flag": {"id": "red", "predicateName": "isBlue", "predicateSet": ["isBlue", "isRed"]}});
        assert!(matches!(restore(nested), Err(EnumError::MalformedEnumerant(_))));
    }

    #[test]
    fn test_repeated_predicate_set_is_malformed() {
        let repeated = json!({"id": "a", "predicateName": "isA", "predicateSet": ["isA", "isA"]});
        assert!(matches!(restore(repeated), Err(EnumError::MalformedEnumerant(_))));
    }

    #[test]
    fn test_serialize_round_trip() {
        let data = json!({"flag": key1(), "n": 3});
        let restored = restore(data.clone()).unwrap();
        assert_eq!(serde_json::to_value(&restored).unwrap(), data);
    }
}
