// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::builtins::utils::{ensure_args_count, ensure_array, ensure_numeric};
use crate::number::Number;
use crate::value::{BuiltinFcn, Value};

use std::collections::HashMap;

use anyhow::{bail, Result};

pub fn register(m: &mut HashMap<&'static str, BuiltinFcn>) {
    m.insert("abs", abs);
    m.insert("max", max);
    m.insert("min", min);
    m.insert("round", round);
    m.insert("sum", sum);
    m.insert("int.bit_length", bit_length);
    m.insert("float.is_integer", is_integer);
}

fn abs(args: &[Value]) -> Result<Value> {
    ensure_args_count("abs", args, 1)?;
    Ok(Value::from(ensure_numeric("abs", &args[0])?.abs()))
}

fn round(args: &[Value]) -> Result<Value> {
    ensure_args_count("round", args, 1)?;
    Ok(Value::from(ensure_numeric("round", &args[0])?.round()))
}

// A single array argument is treated as the collection to scan.
fn candidates<'a>(fcn: &str, args: &'a [Value]) -> Result<&'a [Value]> {
    match args {
        [] => bail!("`{fcn}` expects at least 1 argument"),
        [single] => ensure_array(fcn, single),
        _ => Ok(args),
    }
}

fn max(args: &[Value]) -> Result<Value> {
    match candidates("max", args)?.iter().max() {
        Some(v) => Ok(v.clone()),
        None => bail!("`max` arg is an empty sequence"),
    }
}

fn min(args: &[Value]) -> Result<Value> {
    match candidates("min", args)?.iter().min() {
        Some(v) => Ok(v.clone()),
        None => bail!("`min` arg is an empty sequence"),
    }
}

fn sum(args: &[Value]) -> Result<Value> {
    ensure_args_count("sum", args, 1)?;
    let mut total = Number::Int(0);
    for v in ensure_array("sum", &args[0])? {
        total = total.add(&ensure_numeric("sum", v)?);
    }
    Ok(Value::from(total))
}

fn bit_length(args: &[Value]) -> Result<Value> {
    ensure_args_count("int.bit_length", args, 1)?;
    match ensure_numeric("int.bit_length", &args[0])?.as_i64() {
        Some(i) => Ok(Value::from(u64::from(64 - i.unsigned_abs().leading_zeros()))),
        None => bail!("`int.bit_length` expects an integer"),
    }
}

fn is_integer(args: &[Value]) -> Result<Value> {
    ensure_args_count("float.is_integer", args, 1)?;
    Ok(Value::Bool(
        ensure_numeric("float.is_integer", &args[0])?.is_integer(),
    ))
}
