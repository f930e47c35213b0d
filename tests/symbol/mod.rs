// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashMap;

use anyhow::Result;
use symboldict::*;

fn os_namespace() -> Result<Namespace> {
    let ns = Namespace::new();
    ns.register_object("os", [("sep", Value::from("/")), ("name", Value::from("posix"))])?;
    ns.register_module(
        "os.path",
        Box::new(|m: &Module| -> Result<()> {
            m.set("curdir", ".");
            m.set(
                "isfile",
                Value::from(Builtin::new("isfile", |args| Ok(Value::Bool(args.len() == 1)))),
            );
            Ok(())
        }),
    )?;
    Ok(ns)
}

#[test]
fn chained_and_joined_paths_agree() {
    let chained = symbol().extend("os").extend("path").extend("isfile");
    let joined = Symbol::new(["os.path", "isfile"]);
    let parsed = Symbol::from("os.path.isfile");

    assert_eq!(chained, joined);
    assert_eq!(joined, parsed);
    assert_eq!(chained.to_string(), "os.path.isfile");
    assert_eq!(Symbol::from(&parsed), parsed);
}

#[test]
fn symbols_as_map_keys() {
    let mut seen: HashMap<Symbol, usize> = HashMap::new();
    *seen.entry(Symbol::from("os.sep")).or_default() += 1;
    *seen.entry(symbol().extend("os").extend("sep")).or_default() += 1;
    *seen.entry(Symbol::from("os.name")).or_default() += 1;
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[&Symbol::from("os.sep")], 2);
}

#[test]
fn creating_symbols_imports_nothing() -> Result<()> {
    let resolver = Resolver::new(os_namespace()?);
    let _ = Symbol::from("os.path.isfile");
    let _ = symbol().extend("os").extend("sep");
    assert!(resolver.loader().loaded_modules().is_empty());
    Ok(())
}

#[test]
fn resolved_function_is_callable() -> Result<()> {
    let resolver = Resolver::new(os_namespace()?);
    let isfile = Symbol::from("os.path.isfile");

    let f = resolver.resolve(&isfile, Policy::ResolveOnceAndCache)?;
    assert_eq!(f.call(&[Value::from("/etc/hosts")])?, Value::Bool(true));
    assert_eq!(isfile.outcome().value(), Some(&f));
    Ok(())
}

#[test]
fn clones_share_resolution() -> Result<()> {
    let resolver = Resolver::new(os_namespace()?);
    let sep = Symbol::from("os.sep");
    let alias = sep.clone();
    let twin = Symbol::from("os.sep");

    resolver.resolve(&sep, Policy::default())?;
    assert!(alias.is_resolved());
    assert!(!twin.is_resolved());
    assert!(sep.shares_state_with(&alias));
    assert!(!sep.shares_state_with(&twin));
    Ok(())
}

#[test]
fn resolver_over_borrowed_and_shared_loaders() -> Result<()> {
    let ns = os_namespace()?;
    let sep = Symbol::from("os.sep");
    let borrowed = Resolver::new(&ns);
    assert_eq!(borrowed.resolve(&sep, Policy::default())?, Value::from("/"));
    assert!(ns.is_loaded("os"));

    let shared = Rc::new(os_namespace()?);
    let resolver = Resolver::new(shared.clone());
    let curdir = Symbol::from("os.path.curdir");
    assert_eq!(resolver.resolve(&curdir, Policy::default())?, Value::from("."));
    assert_eq!(
        shared.loaded_modules(),
        vec![Rc::<str>::from("os"), Rc::<str>::from("os.path")]
    );
    Ok(())
}

#[test]
fn fetch_leaves_symbols_alone() -> Result<()> {
    let resolver = Resolver::new(os_namespace()?);
    assert_eq!(resolver.fetch("os.path.curdir")?, Value::from("."));
    assert!(resolver.fetch("os.path.nothing").is_err());
    assert_eq!(Symbol::from("os.path.curdir").outcome(), Outcome::Unresolved);
    Ok(())
}

#[test]
fn errors_are_classified() -> Result<()> {
    let resolver = Resolver::new(os_namespace()?);
    let missing = Symbol::from("nosuch.thing");

    let e = resolver
        .resolve(&missing, Policy::SkipResolution)
        .expect_err("skip never fetches");
    assert!(e.is_not_yet_resolved());
    assert!(!e.is_resolution_failure());

    let e = resolver
        .resolve(&missing, Policy::ResolveOnceAndCache)
        .expect_err("module is missing");
    assert!(e.is_resolution_failure());

    let e = resolver
        .resolve(&missing, Policy::ResolveOnceAndCache)
        .expect_err("failure is cached");
    assert!(matches!(e, ResolveError::PreviouslyFailed { .. }));
    assert!(e.is_not_yet_resolved());
    Ok(())
}

#[test]
fn serde_as_path_string() -> Result<()> {
    let symbols = vec![Symbol::from("os.sep"), symbol().extend("telnetlib").extend("Telnet")];
    let json = serde_json::to_string(&symbols)?;
    assert_eq!(json, r#"["os.sep","telnetlib.Telnet"]"#);

    let back: Vec<Symbol> = serde_json::from_str(&json)?;
    assert_eq!(back, symbols);
    assert!(back.iter().all(|s| s.outcome() == Outcome::Unresolved));
    Ok(())
}

#[test]
fn symbols_reject_attribute_assignment() {
    let s = Symbol::from("os.sep");
    let e = s
        .set_attribute("path", Value::from("x"))
        .expect_err("symbols are immutable");
    assert_eq!(
        e.to_string(),
        "attribute `path` cannot be set: symbol `os.sep` is immutable"
    );
    assert_eq!(s.path(), "os.sep");
}
