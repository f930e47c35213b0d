// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::ResolveError;
use crate::value::Value;

/// The primitives the path walk is built from.
///
/// Implementations decide where modules come from (a static registry, a
/// plugin table, native introspection). The walk only distinguishes
/// [`ResolveError::ModuleNotFound`] and [`ResolveError::AttributeNotFound`],
/// which trigger its fallbacks; any other error aborts it.
pub trait Loader {
    /// Load the module with the given dotted name.
    fn import_module(&self, name: &str) -> Result<Value, ResolveError>;

    /// Look up `attr` on `value`.
    fn get_attr(&self, value: &Value, attr: &str) -> Result<Value, ResolveError>;

    /// Look up a name in the builtins table.
    fn builtin(&self, name: &str) -> Option<Value>;
}

impl<L: Loader + ?Sized> Loader for &L {
    fn import_module(&self, name: &str) -> Result<Value, ResolveError> {
        (**self).import_module(name)
    }

    fn get_attr(&self, value: &Value, attr: &str) -> Result<Value, ResolveError> {
        (**self).get_attr(value, attr)
    }

    fn builtin(&self, name: &str) -> Option<Value> {
        (**self).builtin(name)
    }
}

impl<L: Loader + ?Sized> Loader for crate::Rc<L> {
    fn import_module(&self, name: &str) -> Result<Value, ResolveError> {
        (**self).import_module(name)
    }

    fn get_attr(&self, value: &Value, attr: &str) -> Result<Value, ResolveError> {
        (**self).get_attr(value, attr)
    }

    fn builtin(&self, name: &str) -> Option<Value> {
        (**self).builtin(name)
    }
}
