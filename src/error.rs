// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::Rc;

type String = Rc<str>;

/// Errors produced while resolving symbols or manipulating symbol containers.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The policy forbids fetching and no value is cached.
    #[error("symbol `{path}` has no loaded value")]
    NotYetResolved { path: String },
    /// An earlier attempt failed and the policy does not retry.
    #[error("symbol `{path}` failed to resolve earlier and will not be retried")]
    PreviouslyFailed { path: String },
    /// Empty paths never resolve.
    #[error("cannot resolve an empty path")]
    EmptyPath,
    #[error("no module named `{name}`")]
    ModuleNotFound { name: String },
    #[error("`{owner}` has no attribute `{attribute}`")]
    AttributeNotFound { owner: String, attribute: String },
    /// A module initializer reported an error.
    #[error("error while importing module `{name}`: {source}")]
    ModuleInit {
        name: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("attribute `{attribute}` cannot be set: symbol `{path}` is immutable")]
    Immutable { path: String, attribute: String },
    #[error("key `{key}` not found")]
    MissingKey { key: String },
    #[error("key `{key}` is reserved in a strict SymbolDict")]
    ReservedKey { key: String },
    #[error("configuration error: {0}")]
    Config(String),
}

impl ResolveError {
    /// True for failures raised by the path walk itself.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            ResolveError::EmptyPath
                | ResolveError::ModuleNotFound { .. }
                | ResolveError::AttributeNotFound { .. }
                | ResolveError::ModuleInit { .. }
        )
    }

    /// True when the policy declined to fetch.
    pub fn is_not_yet_resolved(&self) -> bool {
        matches!(
            self,
            ResolveError::NotYetResolved { .. } | ResolveError::PreviouslyFailed { .. }
        )
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(error: serde_json::Error) -> Self {
        ResolveError::Config(format!("{}", error).into())
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for ResolveError {
    fn from(error: serde_yaml::Error) -> Self {
        ResolveError::Config(format!("{}", error).into())
    }
}

impl From<std::io::Error> for ResolveError {
    fn from(error: std::io::Error) -> Self {
        ResolveError::Config(format!("{}", error).into())
    }
}
