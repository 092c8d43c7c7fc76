//! Code Generation
//!
//! Renders a concrete enumeration as a typed Rust enum whose `is_*` methods
//! are static dispatch instead of runtime predicate lookup.
//!
//! Architecture:
//! - EnumRegion: all naming decisions for one enumeration, made up front
//! - Emitters: language-specific generators that only read the region

pub mod rust;

use crate::enumeration::Enumeration;
use crate::error::{EnumError, Result};
use crate::names;

/// Words that cannot be used as a generated type or variant name
const RESERVED: &[&str] = &[
    "Self", "self", "super", "crate", "Option", "Result", "String", "Vec", "Box",
];

/// A single generated variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDef {
    /// Original enum key
    pub key: String,
    /// PascalCase variant name
    pub rust_name: String,
    /// Predicate name (`isSignUp`)
    pub predicate: String,
    /// Predicate method name (`is_sign_up`)
    pub method: String,
    /// The variant name differs from the key, so serde needs a rename
    pub needs_rename: bool,
}

/// Everything an emitter needs to render one enumeration
#[derive(Debug, Clone)]
pub struct EnumRegion {
    /// Generated type name
    pub type_name: String,
    pub variants: Vec<VariantDef>,
}

impl EnumRegion {
    /// Resolve names for every member of an enumeration
    pub fn build(enumeration: &Enumeration, type_name: &str) -> Result<Self> {
        if !is_identifier(type_name) || RESERVED.contains(&type_name) {
            return Err(EnumError::InvalidIdentifier(type_name.to_string()));
        }

        let variants = enumeration
            .iter()
            .map(|member| {
                let rust_name = variant_name(member.id())?;
                Ok(VariantDef {
                    key: member.id().to_string(),
                    needs_rename: rust_name != member.id(),
                    rust_name,
                    predicate: member.predicate_name().to_string(),
                    method: names::method_name(member.predicate_name()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            type_name: type_name.to_string(),
            variants,
        })
    }
}

/// PascalCase variant name for a key
fn variant_name(key: &str) -> Result<String> {
    let pascal = names::to_pascal_case(key);
    let name = match pascal.chars().next() {
        None => return Err(EnumError::InvalidIdentifier(key.to_string())),
        Some(c) if c.is_numeric() => format!("_{}", pascal),
        Some(_) if RESERVED.contains(&pascal.as_str()) => format!("{}_", pascal),
        Some(_) => pascal,
    };
    if is_identifier(&name) {
        Ok(name)
    } else {
        Err(EnumError::InvalidIdentifier(key.to_string()))
    }
}

/// Strict and reserved keywords of the 2021 edition
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

fn is_identifier(s: &str) -> bool {
    if KEYWORDS.contains(&s) {
        return false;
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::EnumBuilder;

    #[test]
    fn test_region_names() {
        let e = EnumBuilder::new().build("SIGN_IN sign-up Key1 5x").unwrap();
        let region = EnumRegion::build(&e, "Action").unwrap();
        let names: Vec<_> = region.variants.iter().map(|v| v.rust_name.as_str()).collect();
        assert_eq!(names, vec!["SignIn", "SignUp", "Key1", "_5X"]);
        assert_eq!(region.variants[1].method, "is_sign_up");
        assert!(region.variants[0].needs_rename);
        assert!(!region.variants[2].needs_rename);
    }

    #[test]
    fn test_invalid_names() {
        let e = EnumBuilder::new().build("ok").unwrap();
        assert!(matches!(EnumRegion::build(&e, "my type"), Err(EnumError::InvalidIdentifier(_))));
        assert!(matches!(EnumRegion::build(&e, "Self"), Err(EnumError::InvalidIdentifier(_))));
        for keyword in ["fn", "match", "type", "async", "try"] {
            assert!(matches!(EnumRegion::build(&e, keyword), Err(EnumError::InvalidIdentifier(k)) if k == keyword));
        }

        let e = EnumBuilder::new().build("__ ok").unwrap();
        assert!(matches!(EnumRegion::build(&e, "T"), Err(EnumError::InvalidIdentifier(k)) if k == "__"));

        let e = EnumBuilder::new().build("self").unwrap();
        assert_eq!(EnumRegion::build(&e, "T").unwrap().variants[0].rust_name, "Self_");
    }
}
