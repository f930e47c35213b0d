// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::config::SymbolDictConfig;
use crate::engine::Resolver;
use crate::error::ResolveError;
use crate::loader::Loader;
use crate::namespace::Namespace;
use crate::policy::Policy;
use crate::symbol::Symbol;
use crate::value::Value;
use crate::Rc;

use core::fmt;
use std::collections::BTreeMap;

use log::trace;
use parking_lot::Mutex;

/// Keys a strict [`SymbolDict`] refuses because they name its own methods.
pub const RESERVED_KEYS: &[&str] = &[
    "available",
    "clear",
    "contains_key",
    "default_policy",
    "from_config",
    "get",
    "insert",
    "is_empty",
    "is_strict",
    "iter",
    "keys",
    "lax",
    "len",
    "new",
    "proxy",
    "remove",
    "resolve",
    "resolver",
    "set_default_policy",
    "set_strict",
    "setdefault",
    "symbols",
    "update",
    "value",
    "with_symbols",
];

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

fn coerce(value: impl Into<Symbol>) -> Symbol {
    Symbol::from(value.into().path())
}

/// A map from names to [`Symbol`]s that resolves them on demand.
///
/// Every stored value is a symbol built from the inserted value's path, with
/// fresh resolution state: inserting an existing [`Symbol`] stores a new
/// reference to the same path, not a handle to the original. A successful resolution through the dict installs the
/// value as a proxy for its key, which [`SymbolDict::value`] then serves
/// without consulting the resolver. Proxies are dropped whenever their key
/// is rebound or removed.
pub struct SymbolDict<L: Loader = Namespace> {
    resolver: Rc<Resolver<L>>,
    entries: BTreeMap<Rc<str>, Symbol>,
    proxies: Mutex<BTreeMap<Rc<str>, Value>>,
    strict: bool,
    default_policy: Policy,
}

impl<L: Loader> SymbolDict<L> {
    /// An empty strict dict.
    pub fn new(resolver: Rc<Resolver<L>>) -> Self {
        Self {
            resolver,
            entries: BTreeMap::new(),
            proxies: Mutex::new(BTreeMap::new()),
            strict: true,
            default_policy: Policy::default(),
        }
    }

    /// An empty dict accepting any key.
    pub fn lax(resolver: Rc<Resolver<L>>) -> Self {
        Self {
            strict: false,
            ..Self::new(resolver)
        }
    }

    /// A strict dict holding `pairs`. Later pairs win over earlier ones.
    pub fn with_symbols<I, K, V>(resolver: Rc<Resolver<L>>, pairs: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Symbol>,
    {
        let mut dict = Self::new(resolver);
        dict.update(pairs)?;
        Ok(dict)
    }

    pub fn from_config(
        resolver: Rc<Resolver<L>>,
        config: &SymbolDictConfig,
    ) -> Result<Self, ResolveError> {
        let mut dict = Self::lax(resolver);
        dict.default_policy = config.default_policy;
        dict.update(config.symbols.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        dict.set_strict(config.strict)?;
        Ok(dict)
    }

    pub fn resolver(&self) -> &Resolver<L> {
        &self.resolver
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Turning strictness on fails if a reserved key is already present.
    pub fn set_strict(&mut self, strict: bool) -> Result<(), ResolveError> {
        if strict {
            if let Some(key) = self.entries.keys().find(|k| is_reserved(k)) {
                return Err(ResolveError::ReservedKey { key: key.clone() });
            }
        }
        trace!("symbol dict strict mode: {strict}");
        self.strict = strict;
        Ok(())
    }

    pub fn default_policy(&self) -> Policy {
        self.default_policy
    }

    pub fn set_default_policy(&mut self, policy: Policy) {
        self.default_policy = policy;
    }

    fn check_key(&self, key: &str) -> Result<(), ResolveError> {
        if self.strict && is_reserved(key) {
            return Err(ResolveError::ReservedKey { key: key.into() });
        }
        Ok(())
    }

    fn drop_proxy(&self, key: &str) {
        if self.proxies.lock().remove(key).is_some() {
            trace!("dropped attribute proxy `{key}`");
        }
    }

    pub fn get(&self, key: &str) -> Option<&Symbol> {
        self.entries.get(key)
    }

    /// Bind `key` to `value`, returning the previous symbol.
    pub fn insert(
        &mut self,
        key: &str,
        value: impl Into<Symbol>,
    ) -> Result<Option<Symbol>, ResolveError> {
        self.check_key(key)?;
        self.drop_proxy(key);
        Ok(self.entries.insert(key.into(), coerce(value)))
    }

    /// The symbol under `key`, inserting `value` first if the key is absent.
    pub fn setdefault(&mut self, key: &str, value: impl Into<Symbol>) -> Result<Symbol, ResolveError> {
        if let Some(existing) = self.entries.get(key) {
            return Ok(existing.clone());
        }
        self.check_key(key)?;
        let symbol = coerce(value);
        self.entries.insert(key.into(), symbol.clone());
        Ok(symbol)
    }

    /// Insert all `pairs`. Nothing is inserted if any key is rejected.
    pub fn update<I, K, V>(&mut self, pairs: I) -> Result<(), ResolveError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Symbol>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        for (key, _) in pairs.iter() {
            self.check_key(key.as_ref())?;
        }
        for (key, value) in pairs {
            let key = key.as_ref();
            self.drop_proxy(key);
            self.entries.insert(key.into(), coerce(value));
        }
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<Symbol> {
        self.drop_proxy(key);
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.proxies.lock().clear();
        self.entries.clear();
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_ref())
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    fn symbol(&self, key: &str) -> Result<&Symbol, ResolveError> {
        self.entries
            .get(key)
            .ok_or_else(|| ResolveError::MissingKey { key: key.into() })
    }

    /// Resolve the symbol under `key` with `policy`. Success installs the
    /// value as the key's proxy; failure drops any proxy already installed.
    pub fn resolve(&self, key: &str, policy: Policy) -> Result<Value, ResolveError> {
        match self.resolver.resolve(self.symbol(key)?, policy) {
            Ok(value) => {
                self.proxies.lock().insert(key.into(), value.clone());
                Ok(value)
            }
            Err(e) => {
                self.drop_proxy(key);
                Err(e)
            }
        }
    }

    /// Whether the symbol under `key` resolves with `policy`. A missing key
    /// is still an error.
    pub fn available(&self, key: &str, policy: Policy) -> Result<bool, ResolveError> {
        self.symbol(key)?;
        Ok(self.resolve(key, policy).is_ok())
    }

    /// The value under `key`: the installed proxy if any, otherwise the
    /// result of resolving with the default policy.
    pub fn value(&self, key: &str) -> Result<Value, ResolveError> {
        if let Some(v) = self.proxies.lock().get(key) {
            return Ok(v.clone());
        }
        self.resolve(key, self.default_policy)
    }

    /// The attribute proxy installed for `key`, if any.
    pub fn proxy(&self, key: &str) -> Option<Value> {
        self.proxies.lock().get(key).cloned()
    }
}

impl<L: Loader> Clone for SymbolDict<L> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            entries: self.entries.clone(),
            proxies: Mutex::new(self.proxies.lock().clone()),
            strict: self.strict,
            default_policy: self.default_policy,
        }
    }
}

impl<L: Loader> fmt::Debug for SymbolDict<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolDict(")?;
        f.debug_map().entries(self.iter()).finish()?;
        write!(f, ")")
    }
}
