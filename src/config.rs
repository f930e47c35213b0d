// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::ResolveError;
use crate::policy::Policy;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Serializable description of a [`crate::SymbolDict`].
///
/// ```yaml
/// strict: true
/// default_policy: retry_until_success
/// symbols:
///   isfile: os.path.isfile
///   Telnet: telnetlib.Telnet
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymbolDictConfig {
    pub strict: bool,
    pub default_policy: Policy,
    pub symbols: BTreeMap<String, String>,
}

impl Default for SymbolDictConfig {
    fn default() -> Self {
        Self {
            strict: true,
            default_policy: Policy::default(),
            symbols: BTreeMap::new(),
        }
    }
}

impl SymbolDictConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ResolveError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &str) -> Result<Self, ResolveError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ResolveError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_file(path: &str) -> Result<Self, ResolveError> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }
}
