// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::number::Number;
use crate::value::Value;
use crate::Rc;

use anyhow::{bail, Result};

pub fn ensure_args_count(fcn: &'static str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() != expected {
        if expected == 1 {
            bail!("`{fcn}` expects 1 argument")
        } else {
            bail!("`{fcn}` expects {expected} arguments")
        }
    }
    Ok(())
}

pub fn ensure_numeric(fcn: &str, v: &Value) -> Result<Number> {
    Ok(match &v {
        Value::Number(n) => *n,
        _ => bail!("`{fcn}` expects numeric argument. Got `{v}` instead"),
    })
}

pub fn ensure_string(fcn: &str, v: &Value) -> Result<Rc<str>> {
    Ok(match &v {
        Value::String(s) => s.clone(),
        _ => bail!("`{fcn}` expects string argument. Got `{v}` instead"),
    })
}

pub fn ensure_string_collection<'a>(fcn: &str, v: &'a Value) -> Result<Vec<&'a str>> {
    let mut collection = vec![];
    match v {
        Value::Array(a) => {
            for (idx, elem) in a.iter().enumerate() {
                match elem {
                    Value::String(s) => collection.push(s.as_ref()),
                    _ => bail!("`{fcn}` expects string collection. Element {idx} is not a string."),
                }
            }
        }
        _ => bail!("`{fcn}` expects array of strings."),
    }
    Ok(collection)
}

pub fn ensure_array<'a>(fcn: &str, v: &'a Value) -> Result<&'a [Value]> {
    Ok(match v {
        Value::Array(a) => a.as_slice(),
        _ => bail!("`{fcn}` expects array argument. Got `{v}` instead"),
    })
}
