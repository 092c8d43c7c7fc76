//! gen-enum
//!
//! Lightweight, named, immutable symbolic values ("enumerants") built from
//! flexible input, plus flat constant sets, boolean bitmaps, and a restore
//! step that brings enumerant behavior back after a JSON round trip.
//!
//! ## Features
//!
//! - **Flexible input**: delimited strings, string arrays, variadic
//!   arguments, or the keys of a JSON object
//! - **Predicates**: every enumerant answers `matches("isBlue")`, exactly one
//!   predicate per enumerant is true
//! - **Sealed results**: factories return [`Sealed`] values with an explicit
//!   [`Guarantee`]
//! - **Restore**: serialized enumerants carry their predicate set and can be
//!   rehydrated anywhere in a JSON tree
//! - **Codegen**: render a concrete enumeration as a Rust enum
//!
//! ## Example
//!
//! ```
//! let colors = gen_enum::make_enum("blue red green").unwrap();
//! let blue = &colors["blue"];
//! assert!(blue.matches("isBlue"));
//! assert!(!blue.matches("isRed"));
//! assert_eq!(blue.name(), "blue");
//!
//! let text = serde_json::to_string(blue).unwrap();
//! let restored = gen_enum::restore(text.as_str()).unwrap();
//! assert!(restored.as_enumerant().unwrap().matches("isBlue"));
//! ```

pub mod bitmap;
pub mod codegen;
pub mod config;
pub mod constants;
pub mod enumerant;
pub mod enumeration;
pub mod error;
pub mod input;
pub mod names;
pub mod restore;
pub mod seal;

pub use bitmap::{make_bitmap, make_bitmap_with, make_bitmap_with_default, Bitmap};
pub use config::{DuplicatePolicy, GenEnumConfig};
pub use constants::{make_constants, make_constants_with, Constants};
pub use enumerant::Enumerant;
pub use enumeration::{EnumBuilder, Enumeration};
pub use error::{EnumError, Result};
pub use input::{Input, IntoInput};
pub use restore::{restore, restore_with, Encoded, Restored};
pub use seal::{Guarantee, Sealable, Sealed};

/// Build a sealed, serializable enumeration that rejects duplicate keys
pub fn make_enum(input: impl IntoInput) -> Result<Sealed<Enumeration>> {
    EnumBuilder::new().build(input)
}
