// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::builtins::utils::{ensure_args_count, ensure_string, ensure_string_collection};
use crate::value::{BuiltinFcn, Value};

use std::collections::HashMap;

use anyhow::{bail, Result};

pub fn register(m: &mut HashMap<&'static str, BuiltinFcn>) {
    m.insert("str.endswith", endswith);
    m.insert("str.join", join);
    m.insert("str.lower", lower);
    m.insert("str.split", split);
    m.insert("str.startswith", startswith);
    m.insert("str.strip", strip);
    m.insert("str.upper", upper);
}

fn endswith(args: &[Value]) -> Result<Value> {
    ensure_args_count("str.endswith", args, 2)?;
    let s = ensure_string("str.endswith", &args[0])?;
    let suffix = ensure_string("str.endswith", &args[1])?;
    Ok(Value::Bool(s.ends_with(suffix.as_ref())))
}

fn join(args: &[Value]) -> Result<Value> {
    ensure_args_count("str.join", args, 2)?;
    let delimiter = ensure_string("str.join", &args[0])?;
    let items = ensure_string_collection("str.join", &args[1])?;
    Ok(Value::from(items.join(delimiter.as_ref())))
}

fn lower(args: &[Value]) -> Result<Value> {
    ensure_args_count("str.lower", args, 1)?;
    Ok(Value::from(ensure_string("str.lower", &args[0])?.to_lowercase()))
}

fn split(args: &[Value]) -> Result<Value> {
    let s = match args.first() {
        Some(v) => ensure_string("str.split", v)?,
        None => bail!("`str.split` expects 1 or 2 arguments"),
    };
    let parts: Vec<Value> = match args {
        [_] => s.split_whitespace().map(Value::from).collect(),
        [_, sep] => {
            let sep = ensure_string("str.split", sep)?;
            if sep.is_empty() {
                bail!("`str.split` empty separator");
            }
            s.split(sep.as_ref()).map(Value::from).collect()
        }
        _ => bail!("`str.split` expects 1 or 2 arguments"),
    };
    Ok(Value::from(parts))
}

fn startswith(args: &[Value]) -> Result<Value> {
    ensure_args_count("str.startswith", args, 2)?;
    let s = ensure_string("str.startswith", &args[0])?;
    let prefix = ensure_string("str.startswith", &args[1])?;
    Ok(Value::Bool(s.starts_with(prefix.as_ref())))
}

fn strip(args: &[Value]) -> Result<Value> {
    ensure_args_count("str.strip", args, 1)?;
    Ok(Value::from(ensure_string("str.strip", &args[0])?.trim()))
}

fn upper(args: &[Value]) -> Result<Value> {
    ensure_args_count("str.upper", args, 1)?;
    Ok(Value::from(ensure_string("str.upper", &args[0])?.to_uppercase()))
}
