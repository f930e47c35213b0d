// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt;
use core::str::FromStr;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Rules governing whether [`crate::Resolver::resolve`] attempts a lookup.
///
/// | outcome      | `SkipResolution` | `ResolveOnceAndCache` | `RetryUntilSuccess` | `ForceResolveAlways` |
/// |--------------|------------------|-----------------------|---------------------|----------------------|
/// | unresolved   | not-yet-resolved | fetch                 | fetch               | fetch                |
/// | resolved(v)  | v                | v                     | v                   | fetch, replacing v   |
/// | failed       | not-yet-resolved | previously-failed     | fetch               | fetch                |
///
/// A fetch that succeeds stores the value; a fetch that fails marks the
/// symbol as failed and returns the error that caused it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Read the cache only. Never triggers an import.
    SkipResolution,
    /// Fetch the first time, then serve the outcome of that attempt forever,
    /// including a failure.
    #[default]
    ResolveOnceAndCache,
    /// Fetch until an attempt succeeds, then serve the cached value.
    RetryUntilSuccess,
    /// Walk the path on every call. Already loaded modules are not reloaded;
    /// only the imports and attribute lookups are repeated.
    ForceResolveAlways,
}

impl Policy {
    pub const ALL: [Policy; 4] = [
        Policy::SkipResolution,
        Policy::ResolveOnceAndCache,
        Policy::RetryUntilSuccess,
        Policy::ForceResolveAlways,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::SkipResolution => "skip_resolution",
            Policy::ResolveOnceAndCache => "resolve_once_and_cache",
            Policy::RetryUntilSuccess => "retry_until_success",
            Policy::ForceResolveAlways => "force_resolve_always",
        }
    }

    /// Whether this policy can ever invoke the path walker.
    pub fn may_fetch(&self) -> bool {
        !matches!(self, Policy::SkipResolution)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Policy::ALL.iter().find(|p| p.as_str() == s) {
            Some(p) => Ok(*p),
            None => bail!("unknown resolution policy `{s}`"),
        }
    }
}
