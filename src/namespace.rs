// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::builtins;
use crate::error::ResolveError;
use crate::loader::Loader;
use crate::module::Module;
use crate::registry::{Registry, RegistryError};
use crate::value::Value;
use crate::Rc;

use core::fmt;
use std::collections::BTreeMap;

use dashmap::DashMap;
use log::{debug, trace};
use parking_lot::ReentrantMutex;

/// Populates a freshly created module. Runs once per import.
#[cfg(feature = "arc")]
pub type ModuleInit = dyn Fn(&Module) -> anyhow::Result<()> + Send + Sync;
#[cfg(not(feature = "arc"))]
pub type ModuleInit = dyn Fn(&Module) -> anyhow::Result<()>;

/// A registry-backed [`Loader`].
///
/// Modules are registered by name together with an initializer. Importing a
/// module runs its initializer once and keeps the result in a module cache,
/// so later imports return the same module. Importing `a.b` imports `a`
/// first and then binds `b` as an attribute of `a`.
///
/// Cold imports are serialized, so an initializer runs at most once per
/// import even when several threads import the same module concurrently.
/// Cache hits do not take the import lock.
///
/// A clone starts with the same registrations and loaded modules but keeps
/// its own tables afterwards. Wrap the namespace in [`crate::Rc`] to share it.
#[derive(Clone)]
pub struct Namespace {
    sources: Registry<ModuleInit>,
    modules: DashMap<Rc<str>, Rc<Module>>,
    builtins: Rc<BTreeMap<Rc<str>, Value>>,
    import_lock: Rc<ReentrantMutex<()>>,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("registered", &self.sources.list_names())
            .field("loaded", &self.loaded_modules())
            .field("builtins", &self.builtins.len())
            .finish()
    }
}

impl Namespace {
    /// A namespace using the crate's builtins table.
    pub fn new() -> Self {
        Self::with_builtins(builtins::table())
    }

    /// A namespace using the given read-only builtins table.
    pub fn with_builtins(builtins: BTreeMap<Rc<str>, Value>) -> Self {
        Self {
            sources: Registry::new("Module"),
            modules: DashMap::new(),
            builtins: Rc::new(builtins),
            import_lock: Rc::new(ReentrantMutex::new(())),
        }
    }

    /// Make `name` importable. `init` fills in the module's attributes.
    pub fn register_module(&self, name: &str, init: Box<ModuleInit>) -> Result<(), RegistryError> {
        self.sources.register(name, Rc::from(init))
    }

    /// Make `name` importable as a module with a fixed attribute table.
    pub fn register_object<'a, I>(&self, name: &str, attrs: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let attrs: Vec<(Rc<str>, Value)> = attrs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.register_module(
            name,
            Box::new(move |m: &Module| -> anyhow::Result<()> {
                for (k, v) in attrs.iter() {
                    m.set(k.clone(), v.clone());
                }
                Ok(())
            }),
        )
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.sources.contains(name)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Names of loaded modules, sorted.
    pub fn loaded_modules(&self) -> Vec<Rc<str>> {
        let mut names: Vec<Rc<str>> = self.modules.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Drop `name` from the module cache. The next import runs its
    /// initializer again; values already handed out are unaffected.
    pub fn unload(&self, name: &str) -> Option<Rc<Module>> {
        let removed = self.modules.remove(name).map(|(_, m)| m);
        if removed.is_some() {
            debug!("unloaded module `{name}`");
        }
        removed
    }

    pub fn builtins(&self) -> &BTreeMap<Rc<str>, Value> {
        &self.builtins
    }

    fn cached(&self, name: &str) -> Option<Rc<Module>> {
        self.modules.get(name).map(|m| m.value().clone())
    }

    fn load(&self, name: &str) -> Result<Rc<Module>, ResolveError> {
        if let Some(m) = self.cached(name) {
            trace!("module `{name}` found in cache");
            return Ok(m);
        }

        // Reentrant: loading a submodule loads its parent under the same lock.
        let _guard = self.import_lock.lock();
        if let Some(m) = self.cached(name) {
            trace!("module `{name}` imported while waiting");
            return Ok(m);
        }

        let parent = match name.rsplit_once('.') {
            Some((parent, _)) => Some(self.load(parent)?),
            None => None,
        };

        let Some(init) = self.sources.get(name) else {
            return Err(ResolveError::ModuleNotFound { name: name.into() });
        };

        debug!("importing module `{name}`");
        let module = Rc::new(Module::new(name));
        init(&*module).map_err(|source| ResolveError::ModuleInit {
            name: name.into(),
            source,
        })?;
        self.modules.insert(name.into(), module.clone());

        if let Some(parent) = parent {
            parent.set(module.short_name(), Value::from(module.clone()));
        }
        Ok(module)
    }
}

impl Loader for Namespace {
    fn import_module(&self, name: &str) -> Result<Value, ResolveError> {
        Ok(Value::from(self.load(name)?))
    }

    fn get_attr(&self, value: &Value, attr: &str) -> Result<Value, ResolveError> {
        value.attr(attr).ok_or_else(|| ResolveError::AttributeNotFound {
            owner: match value {
                Value::Module(m) => format!("module '{}'", m.name()).into(),
                _ => format!("'{}' object", value.type_name()).into(),
            },
            attribute: attr.into(),
        })
    }

    fn builtin(&self, name: &str) -> Option<Value> {
        self.builtins.get(name).cloned()
    }
}
