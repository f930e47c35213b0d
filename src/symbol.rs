// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Symbolic references to objects reachable by a dotted path.
//!
//! A [`Symbol`] pairs an immutable path with a resolution cell. The path is
//! the symbol's identity: equality, ordering and hashing only look at it.
//! The cell records the outcome of the last resolution attempt and is only
//! written by [`crate::Resolver`].

use crate::error::ResolveError;
use crate::value::Value;
use crate::Rc;

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Cached result of resolving a symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outcome {
    #[default]
    Unresolved,
    Resolved(Value),
    Failed,
}

impl Outcome {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Resolved(v) => Some(v),
            _ => None,
        }
    }
}

/// Join the string forms of `parts` with `.`, skipping empty parts.
pub fn join_parts<I, T>(parts: I) -> String
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    let mut path = String::new();
    for part in parts {
        let part = part.to_string();
        if part.is_empty() {
            continue;
        }
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(&part);
    }
    path
}

/// A lazily resolved reference to the object named by a dotted path.
///
/// Creating a symbol never triggers a lookup. Clones share the resolution
/// cell, so they behave as the same reference; symbols built separately
/// (even with the same path) track their outcomes independently.
#[derive(Clone)]
pub struct Symbol {
    path: Rc<str>,
    cell: Rc<Mutex<Outcome>>,
}

/// The symbol with an empty path, used as the root for chained construction.
///
/// ```ignore
/// let isfile = symbol().extend("os").extend("path").extend("isfile");
/// ```
pub fn symbol() -> Symbol {
    Symbol::root()
}

impl Symbol {
    pub fn new<I, T>(parts: I) -> Symbol
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        Symbol {
            path: join_parts(parts).into(),
            cell: Rc::new(Mutex::new(Outcome::Unresolved)),
        }
    }

    pub fn root() -> Symbol {
        Symbol::new(core::iter::empty::<&str>())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path segments. The empty path has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.').filter(|s| !s.is_empty())
    }

    /// A new, unresolved symbol whose path is this one followed by `segment`.
    pub fn extend(&self, segment: impl fmt::Display) -> Symbol {
        Symbol::new([self.path.to_string(), segment.to_string()])
    }

    /// Snapshot of the resolution cell.
    pub fn outcome(&self) -> Outcome {
        self.cell.lock().clone()
    }

    pub fn is_resolved(&self) -> bool {
        matches!(*self.cell.lock(), Outcome::Resolved(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(*self.cell.lock(), Outcome::Failed)
    }

    /// Whether `other` is a handle to this very reference, not merely one
    /// with the same path.
    pub fn shares_state_with(&self, other: &Symbol) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Symbols are immutable once built; this always fails.
    pub fn set_attribute(&self, attribute: &str, _value: Value) -> Result<(), ResolveError> {
        Err(ResolveError::Immutable {
            path: self.path.clone(),
            attribute: attribute.into(),
        })
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Outcome> {
        self.cell.lock()
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol::root()
    }
}

impl From<&str> for Symbol {
    fn from(path: &str) -> Self {
        Symbol::new([path])
    }
}

impl From<String> for Symbol {
    fn from(path: String) -> Self {
        Symbol::new([path])
    }
}

impl From<&String> for Symbol {
    fn from(path: &String) -> Self {
        Symbol::new([path])
    }
}

impl From<&Symbol> for Symbol {
    fn from(s: &Symbol) -> Self {
        s.clone()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.path.as_ref())
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state)
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.path)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Symbol, D::Error>
    where
        D: Deserializer<'de>,
    {
        let path = std::string::String::deserialize(deserializer)?;
        Ok(Symbol::from(path))
    }
}
