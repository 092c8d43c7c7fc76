//! Enumerant values and their attached behavior
//!
//! An [`Enumerant`] is one named member of an enumeration. Instead of one
//! closure per predicate, every enumerant carries the shared list of
//! predicate names of its enumeration plus its own predicate name, and
//! answers [`Enumerant::matches`] by comparing names.
//!
//! ## Wire form
//!
//! ```json
//! {"id": "blue", "predicateName": "isBlue", "predicateSet": ["isBlue", "isRed"]}
//! ```
//!
//! Opaque enumerants (built with `serializable = false`) encode as
//! `{"id": "blue"}` and cannot be restored.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{EnumError, Result};
use crate::input::ensure_valid_key;
use crate::names;

/// Wire field holding the enumerant id
pub const ID_FIELD: &str = "id";
/// Wire field holding the enumerant's own predicate name
pub const PREDICATE_NAME_FIELD: &str = "predicateName";
/// Wire field holding the predicate names of the whole enumeration
pub const PREDICATE_SET_FIELD: &str = "predicateSet";

/// A named symbolic value
#[derive(Debug, Clone)]
pub struct Enumerant {
    id: String,
    predicate_name: String,
    predicate_names: Arc<[String]>,
    serializable: bool,
}

impl Enumerant {
    /// Attach behavior to a key.
    ///
    /// `predicate_names` is the full predicate list of the owning
    /// enumeration and must contain the key's own predicate name.
    pub(crate) fn attach(id: String, predicate_names: Arc<[String]>, serializable: bool) -> Self {
        let predicate_name = names::predicate_name(&id);
        debug_assert!(predicate_names.contains(&predicate_name));
        Self {
            id,
            predicate_name,
            predicate_names,
            serializable,
        }
    }

    /// Rebuild an enumerant from its plain-data parts.
    ///
    /// The predicate name must be the one derived from `id`, and the
    /// predicate set must list it exactly once among distinct names.
    pub fn rehydrate(id: String, predicate_name: String, predicate_names: Vec<String>) -> Result<Self> {
        ensure_valid_key(&id)
            .map_err(|_| EnumError::MalformedEnumerant(format!("invalid id {:?}", id)))?;
        let expected = names::predicate_name(&id);
        if predicate_name != expected {
            return Err(EnumError::MalformedEnumerant(format!(
                "predicate {} does not belong to {} (expected {})",
                predicate_name, id, expected
            )));
        }
        let mut seen = HashSet::with_capacity(predicate_names.len());
        if let Some(repeated) = predicate_names.iter().find(|p| !seen.insert(p.as_str())) {
            return Err(EnumError::MalformedEnumerant(format!(
                "predicate {} is listed twice in the predicate set of {}",
                repeated, id
            )));
        }
        if !predicate_names.contains(&predicate_name) {
            return Err(EnumError::MalformedEnumerant(format!(
                "predicate {} of {} is not in its predicate set",
                predicate_name, id
            )));
        }
        Ok(Self {
            id,
            predicate_name,
            predicate_names: predicate_names.into(),
            serializable: true,
        })
    }

    /// The enum key
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Same as the id
    pub fn name(&self) -> &str {
        &self.id
    }

    /// The one predicate name this enumerant answers true for
    pub fn predicate_name(&self) -> &str {
        &self.predicate_name
    }

    /// All predicate names of the owning enumeration, in key order
    pub fn predicate_names(&self) -> &[String] {
        &self.predicate_names
    }

    /// Evaluate a predicate: true iff it is this enumerant's own predicate
    pub fn matches(&self, predicate: &str) -> bool {
        self.predicate_name == predicate
    }

    /// Truth table over every predicate of the enumeration
    pub fn predicates(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.predicate_names
            .iter()
            .map(move |p| (p.as_str(), self.matches(p)))
    }

    /// Whether the wire form carries enough data to restore behavior
    pub fn is_serializable(&self) -> bool {
        self.serializable
    }
}

impl PartialEq for Enumerant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.predicate_name == other.predicate_name
            && self.predicate_names == other.predicate_names
    }
}

impl Eq for Enumerant {}

impl fmt::Display for Enumerant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl AsRef<str> for Enumerant {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

impl Serialize for Enumerant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = if self.serializable { 3 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        if self.serializable {
            map.serialize_entry(PREDICATE_NAME_FIELD, &self.predicate_name)?;
            map.serialize_entry(PREDICATE_SET_FIELD, &*self.predicate_names)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnumerantRecord {
    id: String,
    predicate_name: String,
    predicate_set: Vec<String>,
}

impl<'de> Deserialize<'de> for Enumerant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = EnumerantRecord::deserialize(deserializer)?;
        Enumerant::rehydrate(record.id, record.predicate_name, record.predicate_set)
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<Enumerant> {
        let set: Arc<[String]> = vec!["isBlue".to_string(), "isRed".to_string()].into();
        vec![
            Enumerant::attach("blue".to_string(), set.clone(), true),
            Enumerant::attach("red".to_string(), set, true),
        ]
    }

    #[test]
    fn test_naming() {
        let blue = &colors()[0];
        assert_eq!(blue.id(), "blue");
        assert_eq!(blue.name(), "blue");
        assert_eq!(blue.to_string(), "blue");
        assert_eq!(blue.predicate_name(), "isBlue");
    }

    #[test]
    fn test_exactly_one_predicate() {
        for e in colors() {
            let truths: Vec<_> = e.predicates().filter(|(_, t)| *t).collect();
            assert_eq!(truths, vec![(e.predicate_name(), true)]);
        }
        assert!(!colors()[0].matches("isRed"));
        assert!(!colors()[0].matches("isGreen"));
    }

    #[test]
    fn test_wire_form() {
        let json = serde_json::to_value(&colors()[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "red", "predicateName": "isRed", "predicateSet": ["isBlue", "isRed"]})
        );

        let opaque = Enumerant::attach("red".to_string(), colors()[1].predicate_names.clone(), false);
        assert_eq!(serde_json::to_value(&opaque).unwrap(), serde_json::json!({"id": "red"}));
    }

    #[test]
    fn test_deserialize_checks_predicate_set() {
        let good: Enumerant = serde_json::from_str(
            r#"{"id": "red", "predicateName": "isRed", "predicateSet": ["isBlue", "isRed"]}"#,
        )
        .unwrap();
        assert_eq!(good, colors()[1]);

        let bad = serde_json::from_str::<Enumerant>(
            r#"{"id": "red", "predicateName": "isGreen", "predicateSet": ["isBlue", "isRed"]}"#,
        );
        assert!(bad.is_err());

        let numeric = serde_json::from_str::<Enumerant>(
            r#"{"id": "5", "predicateName": "is5", "predicateSet": ["is5"]}"#,
        );
        assert!(numeric.is_err());
    }

    #[test]
    fn test_rehydrate_requires_predicate_derived_from_id() {
        let set = vec!["isBlue".to_string(), "isRed".to_string()];
        let forged = Enumerant::rehydrate("red".to_string(), "isBlue".to_string(), set.clone());
        assert!(matches!(forged, Err(EnumError::MalformedEnumerant(_))));

        let typed = serde_json::from_str::<Enumerant>(
            r#"{"id": "red", "predicateName": "isBlue", "predicateSet": ["isBlue", "isRed"]}"#,
        );
        assert!(typed.is_err());

        let red = Enumerant::rehydrate("red".to_string(), "isRed".to_string(), set).unwrap();
        assert!(red.matches("isRed"));
        assert!(!red.matches("isBlue"));
    }

    #[test]
    fn test_rehydrate_rejects_repeated_predicates() {
        let repeated = Enumerant::rehydrate(
            "a".to_string(),
            "isA".to_string(),
            vec!["isA".to_string(), "isA".to_string()],
        );
        assert!(matches!(repeated, Err(EnumError::MalformedEnumerant(_))));

        let typed = serde_json::from_str::<Enumerant>(
            r#"{"id": "a", "predicateName": "isA", "predicateSet": ["isA", "isB", "isA"]}"#,
        );
        assert!(typed.is_err());
    }
}
