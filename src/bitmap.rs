//! Bitmaps: every key maps to a boolean
//!
//! An optional leading boolean sets the default for every key. When the
//! keys come from an object, a boolean value on a key overrides the default.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::config::DuplicatePolicy;
use crate::enumeration::dedup_keys;
use crate::error::Result;
use crate::input::{extract_keys, Input, IntoInput};
use crate::seal::{seal, Guarantee, Sealable, Sealed};

/// An insertion-ordered key to boolean mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    entries: Vec<(String, bool)>,
}

impl Bitmap {
    /// Build from positional arguments, the first one optionally a boolean default
    pub fn from_args(mut args: Vec<Value>) -> Result<Sealed<Bitmap>> {
        let default = args.first().and_then(Value::as_bool);
        if default.is_some() {
            args.remove(0);
        }
        Self::build(default.unwrap_or(false), Input::from_args(args)?, DuplicatePolicy::default())
    }

    fn build(default: bool, input: Input, duplicates: DuplicatePolicy) -> Result<Sealed<Bitmap>> {
        let keys = dedup_keys(extract_keys(&input)?, duplicates)?;
        let values = input.key_values();
        let entries = keys
            .into_iter()
            .map(|key| {
                let bit = values
                    .and_then(|map| map.get(&key))
                    .and_then(Value::as_bool)
                    .unwrap_or(default);
                (key, bit)
            })
            .collect();
        Ok(seal(Bitmap { entries }))
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, b)| *b)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, b)| (k.as_str(), *b))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Bitmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, bit) in &self.entries {
            map.serialize_entry(key, bit)?;
        }
        map.end()
    }
}

impl Sealable for Bitmap {
    const GUARANTEE: Guarantee = Guarantee::Enforced;
}

/// Build a sealed bitmap with every key defaulting to false
pub fn make_bitmap(input: impl IntoInput) -> Result<Sealed<Bitmap>> {
    make_bitmap_with_default(false, input)
}

/// Build a sealed bitmap with an explicit default
pub fn make_bitmap_with_default(default: bool, input: impl IntoInput) -> Result<Sealed<Bitmap>> {
    Bitmap::build(default, input.into_input()?, DuplicatePolicy::default())
}

/// Build a sealed bitmap with an explicit default and duplicate policy
pub fn make_bitmap_with(
    default: bool,
    input: impl IntoInput,
    duplicates: DuplicatePolicy,
) -> Result<Sealed<Bitmap>> {
    Bitmap::build(default, input.into_input()?, duplicates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnumError;
    use serde_json::json;

    #[test]
    fn test_default_false() {
        let b = make_bitmap("Key1, Key2").unwrap();
        assert_eq!(b.get("Key1"), Some(false));
        assert_eq!(b.get("Key2"), Some(false));
    }

    #[test]
    fn test_explicit_default() {
        let b = make_bitmap_with_default(true, "Key1, Key2").unwrap();
        assert_eq!(b.iter().collect::<Vec<_>>(), vec![("Key1", true), ("Key2", true)]);
    }

    #[test]
    fn test_object_values_override_default() {
        let b = make_bitmap_with_default(true, json!({"Key1": false, "Key2": true, "Key3": "x"})).unwrap();
        assert_eq!(b.get("Key1"), Some(false));
        assert_eq!(b.get("Key2"), Some(true));
        assert_eq!(b.get("Key3"), Some(true));
    }

    #[test]
    fn test_from_args_leading_bool() {
        let b = Bitmap::from_args(vec![json!(true), json!("Key1, Key2")]).unwrap();
        assert_eq!(b.get("Key2"), Some(true));

        let b = Bitmap::from_args(vec![json!("Key1"), json!("Key2")]).unwrap();
        assert_eq!(serde_json::to_string(&b).unwrap(), r#"{"Key1":false,"Key2":false}"#);
    }

    #[test]
    fn test_bitmap_errors() {
        assert!(matches!(Bitmap::from_args(vec![json!(true)]), Err(EnumError::InvalidInput(_))));
        assert!(matches!(make_bitmap(json!(["Foo", 5])), Err(EnumError::InvalidKey(_))));
    }
}
