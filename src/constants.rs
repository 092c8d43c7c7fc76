//! Constant sets: every key maps to itself

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::config::DuplicatePolicy;
use crate::enumeration::dedup_keys;
use crate::error::Result;
use crate::input::{extract_keys, IntoInput};
use crate::seal::{seal, Guarantee, Sealable, Sealed};

/// An insertion-ordered set of string constants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constants {
    keys: Vec<String>,
}

impl Constants {
    /// The constant for a key, which is the key itself
    pub fn get(&self, key: &str) -> Option<&str> {
        self.keys.iter().find(|k| *k == key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Serialize for Constants {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.keys.len()))?;
        for key in &self.keys {
            map.serialize_entry(key, key)?;
        }
        map.end()
    }
}

impl Sealable for Constants {
    const GUARANTEE: Guarantee = Guarantee::Enforced;
}

/// Build a sealed constant set
pub fn make_constants(input: impl IntoInput) -> Result<Sealed<Constants>> {
    make_constants_with(input, DuplicatePolicy::default())
}

/// Build a sealed constant set with an explicit duplicate policy
pub fn make_constants_with(input: impl IntoInput, duplicates: DuplicatePolicy) -> Result<Sealed<Constants>> {
    let input = input.into_input()?;
    let keys = dedup_keys(extract_keys(&input)?, duplicates)?;
    Ok(seal(Constants { keys }))
}
