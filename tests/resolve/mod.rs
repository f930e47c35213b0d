// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use std::collections::BTreeMap;
use std::env;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use symboldict::*;
use test_generator::test_resources;

#[derive(Serialize, Deserialize, PartialEq, Debug)]
#[serde(deny_unknown_fields)]
struct ModuleDef {
    name: String,
    #[serde(default)]
    attrs: BTreeMap<String, Value>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
#[serde(deny_unknown_fields)]
struct Rebind {
    module: String,
    attr: String,
    value: Value,
}

// Actions run first (register, unload, rebind), then the resolution, then
// the checks on the symbol and the namespace.
#[derive(Serialize, Deserialize, PartialEq, Debug, Default)]
#[serde(default, deny_unknown_fields)]
struct Step {
    register: Option<ModuleDef>,
    unload: Option<String>,
    rebind: Option<Rebind>,

    policy: Option<Policy>,
    available: Option<bool>,
    want_result: Option<Value>,
    want_type: Option<String>,
    want_same: Option<bool>,
    error: Option<String>,

    want_outcome: Option<String>,
    want_loaded: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
#[serde(deny_unknown_fields)]
struct TestCase {
    note: String,
    path: String,
    #[serde(default)]
    modules: Vec<ModuleDef>,
    steps: Vec<Step>,
    skip: Option<bool>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct YamlTest {
    cases: Vec<TestCase>,
}

fn register(ns: &Namespace, def: &ModuleDef) -> Result<()> {
    ns.register_object(
        &def.name,
        def.attrs.iter().map(|(k, v)| (k.as_str(), v.clone())),
    )?;
    Ok(())
}

fn outcome_name(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Unresolved => "unresolved",
        Outcome::Resolved(_) => "resolved",
        Outcome::Failed => "failed",
    }
}

fn run_step(
    resolver: &Resolver,
    symbol: &Symbol,
    step: Step,
    last: &mut Option<Value>,
) -> Result<()> {
    let ns = resolver.loader();
    if let Some(def) = &step.register {
        register(ns, def)?;
    }
    if let Some(name) = &step.unload {
        if ns.unload(name).is_none() {
            bail!("module `{name}` was not loaded");
        }
    }
    if let Some(rebind) = &step.rebind {
        let module = ns.import_module(&rebind.module)?;
        module
            .as_module()?
            .set(rebind.attr.as_str(), rebind.value.clone());
    }

    if let Some(policy) = step.policy {
        match (step.available, step.resolve_expected()) {
            (Some(expected), _) => {
                let actual = resolver.try_resolve(symbol, policy);
                if actual != expected {
                    bail!("availability under {policy}: expected {expected}, got {actual}");
                }
            }
            (None, true) => {
                let value = resolver.resolve(symbol, policy)?;
                if let Some(expected) = &step.want_result {
                    if &value != expected {
                        bail!("value mismatch\nleft  = {value}\nright = {expected}");
                    }
                }
                if let Some(ty) = &step.want_type {
                    if value.type_name() != ty {
                        bail!("type mismatch: {} != {ty}", value.type_name());
                    }
                }
                if let Some(same) = step.want_same {
                    let prev = last.as_ref().map(|p| p.is_same(&value)).unwrap_or(false);
                    if prev != same {
                        bail!("identity with previous value: expected {same}, got {prev}");
                    }
                }
                *last = Some(value);
            }
            (None, false) => match (resolver.resolve(symbol, policy), &step.error) {
                (Err(actual), Some(expected)) => {
                    let actual = actual.to_string();
                    if !actual.contains(expected.as_str()) {
                        bail!("Error message\n`{actual}\n`\ndoes not contain `{expected}`");
                    }
                }
                (Ok(v), _) => bail!("resolution succeeded with {v} but an error was expected"),
                (Err(e), None) => return Err(e.into()),
            },
        }
    }

    if let Some(expected) = &step.want_outcome {
        let actual = outcome_name(&symbol.outcome());
        if actual != expected {
            bail!("outcome mismatch: {actual} != {expected}");
        }
    }
    if let Some(expected) = &step.want_loaded {
        let loaded: Vec<String> = ns.loaded_modules().iter().map(|m| m.to_string()).collect();
        if &loaded != expected {
            bail!("loaded modules mismatch: {loaded:?} != {expected:?}");
        }
    }
    Ok(())
}

impl Step {
    fn resolve_expected(&self) -> bool {
        self.error.is_none()
    }
}

fn yaml_test_impl(file: &str) -> Result<()> {
    // RUST_LOG=debug shows imports and unloads.
    let _ = env_logger::builder().is_test(true).try_init();

    let yaml_str = std::fs::read_to_string(file)?;
    let test: YamlTest = serde_yaml::from_str(&yaml_str)?;

    println!("running {file}");

    for case in test.cases {
        print!("case {} ", case.note);
        if case.skip == Some(true) {
            println!("skipped");
            continue;
        }

        let ns = Namespace::new();
        for def in &case.modules {
            register(&ns, def)?;
        }
        let resolver = Resolver::new(ns);
        let symbol = Symbol::from(case.path.as_str());
        let mut last = None;

        for (idx, step) in case.steps.into_iter().enumerate() {
            if let Err(e) = run_step(&resolver, &symbol, step, &mut last) {
                bail!("case `{}` step {idx}: {e}", case.note);
            }
        }

        println!("passed");
    }

    Ok(())
}

fn yaml_test(file: &str) -> Result<()> {
    match yaml_test_impl(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            // If Err is returned, it doesn't always get printed by cargo test.
            // Therefore, panic with the error.
            panic!("{}", e);
        }
    }
}

#[test]
#[ignore = "intended for running a single yaml file"]
fn one_yaml() -> Result<()> {
    let mut file = String::default();

    for a in env::args() {
        if a.ends_with(".yaml") {
            file = a;
        }
    }

    if file.is_empty() {
        bail!("missing <yaml-file>");
    }

    yaml_test(file.as_str())
}

#[test_resources("tests/resolve/cases/*.yaml")]
fn run(path: &str) {
    yaml_test(path).unwrap()
}
