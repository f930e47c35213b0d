// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod builtins;
mod config;
mod dict;
mod engine;
mod error;
mod loader;
mod module;
mod namespace;
mod number;
mod policy;
mod registry;
mod symbol;
mod value;

/// The shared pointer used throughout the crate. With the `arc` feature it is
/// [`std::sync::Arc`], so symbols, namespaces and resolvers can be shared
/// across threads; otherwise it is [`std::rc::Rc`].
#[cfg(feature = "arc")]
pub use std::sync::Arc as Rc;
#[cfg(not(feature = "arc"))]
pub use std::rc::Rc;

pub use config::SymbolDictConfig;
pub use dict::{SymbolDict, RESERVED_KEYS};
pub use engine::Resolver;
pub use error::ResolveError;
pub use loader::Loader;
pub use module::Module;
pub use namespace::{ModuleInit, Namespace};
pub use number::Number;
pub use policy::Policy;
pub use registry::RegistryError;
pub use symbol::{symbol, Outcome, Symbol};
pub use value::{Builtin, BuiltinFcn, Value};

/// Items in `unstable` are likely to change.
pub mod unstable {
    pub use crate::engine::{walk, Decision};
    pub use crate::symbol::join_parts;
}

#[cfg(test)]
mod tests;
