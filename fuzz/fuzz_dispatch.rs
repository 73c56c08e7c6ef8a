//! Fuzz target for first-match dispatch over the built-in catalog.
//!
//! Run with: cargo +nightly fuzz run fuzz_dispatch
//!
//! With the core fallback registered every query must be handled, and the
//! handling division must be the first candidate.

#![no_main]

use aeos_core::PredicateKind;
use aeos_core::catalog::standard_registry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let query = String::from_utf8_lossy(data);
    let Ok(registry) = standard_registry(PredicateKind::Keywords) else {
        return;
    };
    let router = registry.router();

    let routed = router.route(&query).expect("fallback handles every query");
    let candidates = router.candidates(&query);
    assert_eq!(candidates.first().copied(), Some(routed.division.as_str()));
});
