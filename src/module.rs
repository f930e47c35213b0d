// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::value::Value;
use crate::Rc;

use core::cmp::Ordering;
use core::fmt;
use std::collections::BTreeMap;

use parking_lot::RwLock;

/// A loaded module: a dotted name plus a mutable attribute table.
///
/// Attributes can be rebound after loading, which is what makes a forced
/// re-resolution observe a new value without reloading the module.
pub struct Module {
    name: Rc<str>,
    attrs: RwLock<BTreeMap<Rc<str>, Value>>,
}

impl Module {
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Self {
            name: name.into(),
            attrs: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last segment of the dotted name.
    pub fn short_name(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((_, last)) => last,
            None => &self.name,
        }
    }

    pub fn get(&self, attr: &str) -> Option<Value> {
        self.attrs.read().get(attr).cloned()
    }

    /// Bind `attr` to `value`, returning the previous binding.
    pub fn set(&self, attr: impl Into<Rc<str>>, value: impl Into<Value>) -> Option<Value> {
        self.attrs.write().insert(attr.into(), value.into())
    }

    pub fn remove(&self, attr: &str) -> Option<Value> {
        self.attrs.write().remove(attr)
    }

    pub fn contains(&self, attr: &str) -> bool {
        self.attrs.read().contains_key(attr)
    }

    pub fn attribute_names(&self) -> Vec<Rc<str>> {
        self.attrs.read().keys().cloned().collect()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<module '{}'>", self.name)
    }
}

// Modules are identified by name; use `Value::is_same` for identity.
impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Module {}

impl PartialOrd for Module {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Module {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
