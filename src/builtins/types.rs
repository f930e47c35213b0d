// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::builtins::utils::ensure_args_count;
use crate::value::{BuiltinFcn, Value};

use std::collections::HashMap;

use anyhow::{bail, Result};

pub fn register(m: &mut HashMap<&'static str, BuiltinFcn>) {
    m.insert("bool", to_bool);
    m.insert("len", len);
    m.insert("repr", repr);
    m.insert("type", type_name);
}

fn to_bool(args: &[Value]) -> Result<Value> {
    ensure_args_count("bool", args, 1)?;
    Ok(Value::Bool(is_truthy(&args[0])))
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != 0.0,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Module(_) | Value::Builtin(_) => true,
    }
}

fn len(args: &[Value]) -> Result<Value> {
    ensure_args_count("len", args, 1)?;
    Ok(match &args[0] {
        Value::String(s) => Value::from(s.chars().count()),
        Value::Array(a) => Value::from(a.len()),
        Value::Object(o) => Value::from(o.len()),
        a => bail!("object of type `{}` has no len()", a.type_name()),
    })
}

fn repr(args: &[Value]) -> Result<Value> {
    ensure_args_count("repr", args, 1)?;
    Ok(Value::from(args[0].to_string()))
}

fn type_name(args: &[Value]) -> Result<Value> {
    ensure_args_count("type", args, 1)?;
    Ok(Value::from(args[0].type_name()))
}
