//! Key Extraction
//!
//! Normalizes the accepted input shapes into an ordered list of validated
//! enum keys. Shape resolution, first match wins:
//!
//! 1. more than one positional argument: each argument is one key
//! 2. a single array: each element is one key
//! 3. a single object: its keys, in insertion order
//! 4. a single string: split on runs of `,` `;` `:` or whitespace
//! 5. anything else is rejected

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{EnumError, Result};

/// Raw factory input, tagged by shape
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Several positional arguments, one key each
    Variadic(Vec<Value>),
    /// An array of keys
    Sequence(Vec<Value>),
    /// An object whose keys are the enum keys
    KeySet(Map<String, Value>),
    /// A delimited string of keys
    Delimited(String),
}

impl Input {
    /// Resolve the input shape from positional arguments
    pub fn from_args(mut args: Vec<Value>) -> Result<Self> {
        if args.len() > 1 {
            return Ok(Input::Variadic(args));
        }
        match args.pop() {
            Some(Value::Array(items)) => Ok(Input::Sequence(items)),
            Some(Value::Object(map)) => Ok(Input::KeySet(map)),
            Some(Value::String(s)) => Ok(Input::Delimited(s)),
            Some(other) => Err(EnumError::InvalidInput(other.to_string())),
            None => Err(EnumError::InvalidInput("no argument".to_string())),
        }
    }

    /// Build a variadic input from string arguments
    pub fn variadic<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Input::Variadic(args.into_iter().map(|s| Value::String(s.into())).collect())
    }

    /// The values attached to each key, for key-set inputs
    pub fn key_values(&self) -> Option<&Map<String, Value>> {
        match self {
            Input::KeySet(map) => Some(map),
            _ => None,
        }
    }
}

/// Conversion into a factory [`Input`]
pub trait IntoInput {
    fn into_input(self) -> Result<Input>;
}

impl IntoInput for Input {
    fn into_input(self) -> Result<Input> {
        Ok(self)
    }
}

impl IntoInput for Value {
    fn into_input(self) -> Result<Input> {
        Input::from_args(vec![self])
    }
}

impl IntoInput for Map<String, Value> {
    fn into_input(self) -> Result<Input> {
        Ok(Input::KeySet(self))
    }
}

impl IntoInput for &str {
    fn into_input(self) -> Result<Input> {
        Ok(Input::Delimited(self.to_string()))
    }
}

impl IntoInput for String {
    fn into_input(self) -> Result<Input> {
        Ok(Input::Delimited(self))
    }
}

impl IntoInput for &String {
    fn into_input(self) -> Result<Input> {
        Ok(Input::Delimited(self.clone()))
    }
}

impl IntoInput for Vec<String> {
    fn into_input(self) -> Result<Input> {
        Ok(Input::Sequence(self.into_iter().map(Value::String).collect()))
    }
}

impl IntoInput for Vec<&str> {
    fn into_input(self) -> Result<Input> {
        self.as_slice().into_input()
    }
}

impl IntoInput for &[&str] {
    fn into_input(self) -> Result<Input> {
        Ok(Input::Sequence(
            self.iter().map(|s| Value::String((*s).to_string())).collect(),
        ))
    }
}

impl<const N: usize> IntoInput for [&str; N] {
    fn into_input(self) -> Result<Input> {
        self.as_slice().into_input()
    }
}

fn delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r"[,;:\s]+").expect("delimiter pattern is valid"))
}

/// Check that a key is a non-empty string that does not parse as a number.
///
/// Any string `f64` accepts is numeric, including `inf`, `Infinity` and `NaN`.
pub fn ensure_valid_key(key: &str) -> Result<()> {
    let numeric = key.trim().parse::<f64>().is_ok();
    if key.is_empty() || numeric {
        return Err(EnumError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn key_from_value(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => {
            ensure_valid_key(s)?;
            Ok(s.clone())
        }
        other => Err(EnumError::InvalidKey(other.to_string())),
    }
}

fn keys_from_string(s: &str) -> Result<Vec<String>> {
    let keys: Vec<String> = delimiter()
        .split(s)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    if keys.is_empty() {
        return Err(EnumError::InvalidKey(s.to_string()));
    }
    for key in &keys {
        ensure_valid_key(key)?;
    }
    Ok(keys)
}

/// Extract the ordered key list from an input
pub fn extract_keys(input: &Input) -> Result<Vec<String>> {
    match input {
        Input::Variadic(items) | Input::Sequence(items) => {
            items.iter().map(key_from_value).collect()
        }
        Input::KeySet(map) => map
            .keys()
            .map(|k| ensure_valid_key(k).map(|_| k.clone()))
            .collect(),
        Input::Delimited(s) => keys_from_string(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(input: impl IntoInput) -> Result<Vec<String>> {
        extract_keys(&input.into_input()?)
    }

    #[test]
    fn test_delimited_string() {
        assert_eq!(keys("blue red green").unwrap(), vec!["blue", "red", "green"]);
        assert_eq!(keys("Foo,Bar;Zee:Tuu").unwrap(), vec!["Foo", "Bar", "Zee", "Tuu"]);
        assert_eq!(keys("  SIGN_IN, SIGN_UP\n").unwrap(), vec!["SIGN_IN", "SIGN_UP"]);
    }

    #[test]
    fn test_array_and_object() {
        assert_eq!(keys(vec!["Foo", "Bar"]).unwrap(), vec!["Foo", "Bar"]);
        assert_eq!(
            keys(json!({"Zed": null, "Alpha": 1})).unwrap(),
            vec!["Zed", "Alpha"]
        );
    }

    #[test]
    fn test_variadic_resolution() {
        let input = Input::from_args(vec![json!("Foo"), json!("Bar")]).unwrap();
        assert!(matches!(input, Input::Variadic(_)));
        assert_eq!(extract_keys(&input).unwrap(), vec!["Foo", "Bar"]);

        let single = Input::from_args(vec![json!("Foo Bar")]).unwrap();
        assert!(matches!(single, Input::Delimited(_)));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(keys(json!(5)), Err(EnumError::InvalidInput(_))));
        assert!(matches!(keys(json!(null)), Err(EnumError::InvalidInput(_))));
        assert!(matches!(Input::from_args(vec![]), Err(EnumError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(matches!(keys(json!(["Foo", 5])), Err(EnumError::InvalidKey(k)) if k == "5"));
        assert!(matches!(keys(json!(["Foo", false])), Err(EnumError::InvalidKey(_))));
        assert!(matches!(keys(json!(["Foo", ""])), Err(EnumError::InvalidKey(_))));
        assert!(matches!(keys("Foo 5"), Err(EnumError::InvalidKey(k)) if k == "5"));
        assert!(matches!(keys("  "), Err(EnumError::InvalidKey(_))));
        assert!(matches!(keys(json!({"1.5": true})), Err(EnumError::InvalidKey(_))));
    }

    #[test]
    fn test_numeric_prefix_is_accepted() {
        assert_eq!(keys("5x").unwrap(), vec!["5x"]);
        assert!(ensure_valid_key("info").is_ok());
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        for key in ["Infinity", "-Infinity", "inf", "NaN"] {
            assert!(matches!(ensure_valid_key(key), Err(EnumError::InvalidKey(k)) if k == key));
        }
        assert!(matches!(keys("Foo Infinity"), Err(EnumError::InvalidKey(k)) if k == "Infinity"));
    }
}
