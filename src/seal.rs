//! Immutability sealing
//!
//! A finished collection is handed out as [`Sealed<T>`], which only derefs
//! to `&T`. The wrapped type declares which guarantee it can actually give:
//! [`Guarantee::Enforced`] when it exposes no mutating API and no interior
//! mutability, [`Guarantee::Advisory`] when shared references can still
//! mutate it (`RefCell`).
//!
//! ```compile_fail
//! let colors = gen_enum::make_enum("blue red").unwrap();
//! colors.insert("green"); // no mutating API
//! ```

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};

/// Level of immutability a sealed value provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guarantee {
    /// Mutation is impossible through any public API
    Enforced,
    /// Immutability is a contract the caller is trusted to keep
    Advisory,
}

/// A type that can be sealed
pub trait Sealable {
    const GUARANTEE: Guarantee;
}

/// A sealed, read-only value
#[derive(Clone, PartialEq)]
pub struct Sealed<T> {
    inner: T,
}

impl<T: Sealable> Sealed<T> {
    /// The guarantee the wrapped type provides
    pub fn guarantee(&self) -> Guarantee {
        T::GUARANTEE
    }
}

impl<T> Deref for Sealed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for Sealed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl<T: fmt::Display> fmt::Display for Sealed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl<T: Serialize> Serialize for Sealed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

impl<T> Sealable for RefCell<T> {
    const GUARANTEE: Guarantee = Guarantee::Advisory;
}

/// Seal a finished value
pub fn seal<T: Sealable>(value: T) -> Sealed<T> {
    Sealed { inner: value }
}
