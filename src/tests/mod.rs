// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::unwrap_used, clippy::expect_used)] // test asserts

use crate::*;

use core::sync::atomic::{AtomicUsize, Ordering};

fn counting_namespace(imports: Rc<AtomicUsize>) -> Namespace {
    let ns = Namespace::new();
    ns.register_module(
        "slow",
        Box::new(move |m: &Module| -> anyhow::Result<()> {
            imports.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(20));
            m.set("value", 42_i64);
            Ok(())
        }),
    )
    .unwrap();
    ns
}

#[test]
fn chained_symbol_resolves_like_joined_one() -> anyhow::Result<()> {
    let imports = Rc::new(AtomicUsize::new(0));
    let resolver = Resolver::new(counting_namespace(imports.clone()));
    let joined = Symbol::new(["slow", "value"]);
    let chained = symbol().extend("slow").extend("value");
    assert_eq!(joined, chained);

    assert_eq!(resolver.resolve(&joined, Policy::default())?, Value::from(42_i64));
    assert_eq!(chained.outcome(), Outcome::Unresolved);
    assert_eq!(resolver.resolve(&chained, Policy::default())?, Value::from(42_i64));

    // The module was imported once; the second symbol only re-walked it.
    assert_eq!(imports.load(Ordering::SeqCst), 1);
    Ok(())
}

#[cfg(feature = "arc")]
#[test]
fn racing_resolvers_fetch_once() {
    let imports = Rc::new(AtomicUsize::new(0));
    let resolver = Rc::new(Resolver::new(counting_namespace(imports.clone())));
    let sym = Symbol::from("slow.value");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = resolver.clone();
            let sym = sym.clone();
            std::thread::spawn(move || resolver.resolve(&sym, Policy::ResolveOnceAndCache).unwrap())
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), Value::from(42_i64));
    }
    assert_eq!(imports.load(Ordering::SeqCst), 1);
    assert!(sym.is_resolved());
}

#[cfg(feature = "arc")]
#[test]
fn racing_imports_run_initializer_once() {
    let imports = Rc::new(AtomicUsize::new(0));
    let resolver = Rc::new(Resolver::new(counting_namespace(imports.clone())));

    // Separate symbols do not share a cell, so only the import lock keeps
    // the initializer from running on every thread.
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = resolver.clone();
            std::thread::spawn(move || {
                let sym = Symbol::from("slow.value");
                resolver.resolve(&sym, Policy::ResolveOnceAndCache).unwrap()
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), Value::from(42_i64));
    }
    assert_eq!(imports.load(Ordering::SeqCst), 1);
    assert_eq!(resolver.loader().loaded_modules(), vec![Rc::<str>::from("slow")]);
}
