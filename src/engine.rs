// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::ResolveError;
use crate::loader::Loader;
use crate::namespace::Namespace;
use crate::policy::Policy;
use crate::symbol::{Outcome, Symbol};
use crate::value::Value;

/// What a resolve call does given the policy and the cached outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Serve the cached value.
    Cached(Value),
    /// Walk the path.
    Fetch,
    /// Nothing cached and the policy forbids fetching.
    NotYetResolved,
    /// The cached failure stands.
    PreviouslyFailed,
}

impl Decision {
    pub fn new(policy: Policy, outcome: &Outcome) -> Decision {
        match (outcome, policy) {
            (_, Policy::ForceResolveAlways) => Decision::Fetch,
            (Outcome::Resolved(v), _) => Decision::Cached(v.clone()),
            (_, Policy::SkipResolution) => Decision::NotYetResolved,
            (Outcome::Unresolved, _) => Decision::Fetch,
            (Outcome::Failed, Policy::ResolveOnceAndCache) => Decision::PreviouslyFailed,
            (Outcome::Failed, Policy::RetryUntilSuccess) => Decision::Fetch,
        }
    }
}

/// Walk `path` using `loader`.
///
/// The first segment is imported as a module. Each following segment is
/// looked up as an attribute; if that lookup misses, the dotted prefix is
/// imported as a submodule instead. When the first segment is not a module,
/// it is looked up in the builtins table and the rest of the path is walked
/// by attribute access only.
pub fn walk<L: Loader + ?Sized>(loader: &L, path: &str) -> Result<Value, ResolveError> {
    let mut segments = path.split('.');
    let root = match segments.next() {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ResolveError::EmptyPath),
    };

    match loader.import_module(root) {
        Ok(mut value) => {
            let mut prefix = root.to_string();
            for attr in segments {
                prefix.push('.');
                prefix.push_str(attr);
                value = match loader.get_attr(&value, attr) {
                    Ok(v) => v,
                    Err(missing @ ResolveError::AttributeNotFound { .. }) => {
                        match loader.import_module(&prefix) {
                            Ok(m) => m,
                            // Report the attribute, not the submodule guess.
                            Err(ResolveError::ModuleNotFound { .. }) => return Err(missing),
                            Err(e) => return Err(e),
                        }
                    }
                    Err(e) => return Err(e),
                };
            }
            Ok(value)
        }
        Err(ResolveError::ModuleNotFound { name }) => {
            let Some(mut value) = loader.builtin(root) else {
                return Err(ResolveError::ModuleNotFound { name });
            };
            for attr in segments {
                value = loader.get_attr(&value, attr)?;
            }
            Ok(value)
        }
        Err(e) => Err(e),
    }
}

/// Resolves symbols against a [`Loader`], updating each symbol's cached
/// outcome according to a [`Policy`].
#[derive(Debug, Clone, Default)]
pub struct Resolver<L = Namespace> {
    loader: L,
}

impl<L: Loader> Resolver<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Produce the value `symbol` refers to.
    ///
    /// Fetch errors are returned as produced by the walk; the symbol only
    /// records that the attempt failed. The symbol's cell stays locked while
    /// fetching, so concurrent callers fetch at most once between them.
    pub fn resolve(&self, symbol: &Symbol, policy: Policy) -> Result<Value, ResolveError> {
        let mut outcome = symbol.lock();
        match Decision::new(policy, &outcome) {
            Decision::Cached(v) => Ok(v),
            Decision::NotYetResolved => Err(ResolveError::NotYetResolved {
                path: symbol.path().into(),
            }),
            Decision::PreviouslyFailed => Err(ResolveError::PreviouslyFailed {
                path: symbol.path().into(),
            }),
            Decision::Fetch => match walk(&self.loader, symbol.path()) {
                Ok(v) => {
                    *outcome = Outcome::Resolved(v.clone());
                    Ok(v)
                }
                Err(e) => {
                    *outcome = Outcome::Failed;
                    Err(e)
                }
            },
        }
    }

    /// Like [`Resolver::resolve`], reporting only whether a value was produced.
    pub fn try_resolve(&self, symbol: &Symbol, policy: Policy) -> bool {
        self.resolve(symbol, policy).is_ok()
    }

    /// Walk `path` without reading or writing any symbol's cache.
    pub fn fetch(&self, path: &str) -> Result<Value, ResolveError> {
        walk(&self.loader, path)
    }
}
