//! Enumerations and the enumerant builder

use std::collections::{HashMap, HashSet};
use std::ops::Index;
use std::sync::Arc;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::debug;

use crate::config::{BuildConfig, DuplicatePolicy};
use crate::enumerant::Enumerant;
use crate::error::{EnumError, Result};
use crate::input::{extract_keys, IntoInput};
use crate::names;
use crate::seal::{seal, Guarantee, Sealable, Sealed};

/// An insertion-ordered, read-only set of enumerants keyed by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    members: Vec<Enumerant>,
    index: HashMap<String, usize>,
    predicate_names: Arc<[String]>,
}

impl Enumeration {
    /// Look up an enumerant by key
    pub fn get(&self, key: &str) -> Option<&Enumerant> {
        self.index.get(key).map(|&i| &self.members[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Whether an enumerant is a member of this enumeration
    pub fn lookup(&self, enumerant: &Enumerant) -> bool {
        self.get(enumerant.id())
            .map(|own| own.predicate_name() == enumerant.predicate_name())
            .unwrap_or(false)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(Enumerant::id)
    }

    /// Enumerants in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Enumerant> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Predicate names of every member, in key order
    pub fn predicate_names(&self) -> &[String] {
        &self.predicate_names
    }
}

impl Index<&str> for Enumeration {
    type Output = Enumerant;

    fn index(&self, key: &str) -> &Enumerant {
        match self.get(key) {
            Some(e) => e,
            None => panic!("no enumerant {:?} in enumeration", key),
        }
    }
}

impl<'a> IntoIterator for &'a Enumeration {
    type Item = &'a Enumerant;
    type IntoIter = std::slice::Iter<'a, Enumerant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl Serialize for Enumeration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.members.len()))?;
        for member in &self.members {
            map.serialize_entry(member.id(), member)?;
        }
        map.end()
    }
}

impl Sealable for Enumeration {
    const GUARANTEE: Guarantee = Guarantee::Enforced;
}

/// Collapse a key list according to the duplicate policy.
///
/// Under `LastWins` a repeated key keeps the slot of its first occurrence.
pub(crate) fn dedup_keys(keys: Vec<String>, policy: DuplicatePolicy) -> Result<Vec<String>> {
    let mut seen = HashSet::with_capacity(keys.len());
    let mut unique = Vec::with_capacity(keys.len());
    for key in keys {
        if seen.contains(&key) {
            match policy {
                DuplicatePolicy::Reject => return Err(EnumError::DuplicateKey(key)),
                DuplicatePolicy::LastWins => {
                    debug!(key = %key, "duplicate key replaces earlier occurrence");
                    continue;
                }
            }
        }
        seen.insert(key.clone());
        unique.push(key);
    }
    Ok(unique)
}

/// Builds enumerations from any accepted input
#[derive(Debug, Clone, Default)]
pub struct EnumBuilder {
    duplicates: DuplicatePolicy,
    opaque: bool,
}

impl EnumBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            duplicates: config.duplicates,
            opaque: !config.serializable,
        }
    }

    /// Set the duplicate key policy
    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Embed predicate metadata in the wire form (the default)
    pub fn serializable(mut self, serializable: bool) -> Self {
        self.opaque = !serializable;
        self
    }

    /// Extract keys from the input and build a sealed enumeration
    pub fn build(&self, input: impl IntoInput) -> Result<Sealed<Enumeration>> {
        let input = input.into_input()?;
        let keys = extract_keys(&input)?;
        self.build_keys(keys)
    }

    /// Build a sealed enumeration from already extracted keys
    pub fn build_keys(&self, keys: Vec<String>) -> Result<Sealed<Enumeration>> {
        let keys = dedup_keys(keys, self.duplicates)?;

        let mut owners: HashMap<String, &str> = HashMap::with_capacity(keys.len());
        let mut predicate_names = Vec::with_capacity(keys.len());
        for key in &keys {
            let predicate = names::predicate_name(key);
            if let Some(first) = owners.get(&predicate) {
                return Err(EnumError::PredicateCollision {
                    predicate,
                    first: first.to_string(),
                    second: key.clone(),
                });
            }
            owners.insert(predicate.clone(), key);
            predicate_names.push(predicate);
        }
        let predicate_names: Arc<[String]> = predicate_names.into();

        let mut index = HashMap::with_capacity(keys.len());
        let mut members = Vec::with_capacity(keys.len());
        for key in keys {
            index.insert(key.clone(), members.len());
            members.push(Enumerant::attach(key, predicate_names.clone(), !self.opaque));
        }

        debug!(members = members.len(), serializable = !self.opaque, "built enumeration");

        Ok(seal(Enumeration {
            members,
            index,
            predicate_names,
        }))
    }
}
