// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The builtins table consulted when a path's first segment is not a module.

pub mod numbers;
pub mod strings;
pub mod types;
pub mod utils;

use crate::value::{Builtin, BuiltinFcn, Value};
use crate::Rc;

use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;

// Dotted names are methods of the builtin type object named by the prefix.
#[rustfmt::skip]
lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, BuiltinFcn> = {
	let mut m : HashMap<&'static str, BuiltinFcn>  = HashMap::new();

	numbers::register(&mut m);
	strings::register(&mut m);
	types::register(&mut m);

	m
    };
}

/// Build the name -> value table handed to a [`crate::Namespace`].
///
/// Plain names become callables, dotted names are grouped into type objects
/// (`str.upper` becomes attribute `upper` of object `str`), and the constants
/// `None`, `True` and `False` are added.
pub fn table() -> BTreeMap<Rc<str>, Value> {
    let mut table: BTreeMap<Rc<str>, Value> = BTreeMap::new();
    let mut types: BTreeMap<&'static str, BTreeMap<Value, Value>> = BTreeMap::new();

    for (&name, &fcn) in BUILTINS.iter() {
        let builtin = Value::from(Builtin::new(name, fcn));
        match name.split_once('.') {
            Some((ty, method)) => {
                types
                    .entry(ty)
                    .or_default()
                    .insert(Value::from(method), builtin);
            }
            None => {
                table.insert(name.into(), builtin);
            }
        }
    }

    for (ty, mut methods) in types {
        methods.insert(Value::from("__name__"), Value::from(ty));
        table.insert(ty.into(), Value::from(methods));
    }

    table.insert("None".into(), Value::Null);
    table.insert("True".into(), Value::Bool(true));
    table.insert("False".into(), Value::Bool(false));
    table
}
