//! End-to-end dispatch behaviour over small, hand-built registries.

use std::sync::atomic::Ordering;

use aeos_core::{
    Case, CoreDivision, DispatchError, Division, DivisionBuilder, PredicateKind, Registry,
    ResultEnvelope,
};
use aeos_test_utils::divisions::{
    DISASTER_RESPONSE, EARTH_FLAT_COST, ScriptedDivision, WEATHER_RESPONSE, overlapping_groups,
    scenario_earth, scenario_registry,
};
use aeos_test_utils::tracing_setup::init_test_tracing;
use pretty_assertions::assert_eq;

// ── Scenarios ─────────────────────────────────────────────────────

#[test]
fn test_scenario_a_weather_routes_to_earth() {
    init_test_tracing();
    let registry = scenario_registry().unwrap();

    let routed = registry.router().route("what's the weather today").unwrap();
    assert_eq!(routed.division, "Earth Intelligence");
    assert_eq!(routed.envelope.response, WEATHER_RESPONSE);
    assert_eq!(routed.envelope.cost, EARTH_FLAT_COST);
    assert_eq!(routed.envelope.tool_usage[0].tool, "Global Atmos Scan");
}

#[test]
fn test_scenario_b_unmatched_query_reaches_fallback() {
    let registry = scenario_registry().unwrap();
    let earth = scenario_earth().unwrap();
    assert!(!earth.can_handle("tell me a joke"));

    let envelope = registry.router().dispatch("tell me a joke").unwrap();
    let expected = CoreDivision::new().process("tell me a joke").unwrap();
    assert_eq!(envelope, expected);
    assert!(envelope.tool_usage.is_empty());
    assert!(envelope.logs.is_empty());
}

#[test]
fn test_scenario_c_first_listed_group_wins() {
    let hazards = overlapping_groups().unwrap();
    let mut registry = Registry::new();
    registry.register(hazards).unwrap();
    let registry = registry.seal();

    let envelope = registry.router().dispatch("flood disaster").unwrap();
    assert_eq!(envelope.response, "X");

    let envelope = registry.router().dispatch("disaster, then a flood").unwrap();
    assert_eq!(envelope.response, "X");

    let envelope = registry.router().dispatch("disaster").unwrap();
    assert_eq!(envelope.response, "Y");
}

#[test]
fn test_scenario_d_empty_registry() {
    let registry = Registry::new().seal();
    for query in ["", "weather", "tell me a joke"] {
        let err = registry.router().dispatch(query).unwrap_err();
        assert!(matches!(err, DispatchError::NoHandler { .. }));
    }
}

// ── Properties ───────────────────────────────────────────────────

#[test]
fn test_registration_order_breaks_ties() {
    let first = ScriptedDivision::new("first", true);
    let second = ScriptedDivision::new("second", true);
    let second_asked = second.asked();

    let mut registry = Registry::new();
    registry.register(first).unwrap();
    registry.register(second).unwrap();
    let registry = registry.seal();

    let envelope = registry.router().dispatch("audit").unwrap();
    assert_eq!(envelope, ScriptedDivision::expected_envelope("first", "audit", 0.001));
    assert_eq!(second_asked.load(Ordering::SeqCst), 0);
}

#[test]
fn test_overlapping_keyword_sets_across_divisions() {
    let enterprise = DivisionBuilder::new("Enterprise")
        .cost(0.015)
        .case(Case::new("audit", ["audit"]).respond("ENTERPRISE AUDIT"))
        .build()
        .unwrap();
    let ledger = DivisionBuilder::new("Ledger")
        .cost(0.03)
        .case(Case::new("audit", ["audit", "chain"]).respond("LEDGER AUDIT"))
        .build()
        .unwrap();

    let forward = {
        let mut r = Registry::new();
        r.register(enterprise.clone()).unwrap();
        r.register(ledger.clone()).unwrap();
        r.seal()
    };
    let reversed = {
        let mut r = Registry::new();
        r.register(ledger).unwrap();
        r.register(enterprise).unwrap();
        r.seal()
    };

    assert_eq!(forward.router().dispatch("audit").unwrap().response, "ENTERPRISE AUDIT");
    assert_eq!(reversed.router().dispatch("audit").unwrap().response, "LEDGER AUDIT");
    assert_eq!(forward.router().candidates("audit"), vec!["Enterprise", "Ledger"]);
}

#[test]
fn test_case_responses_are_exact() {
    let registry = scenario_registry().unwrap();
    let router = registry.router();
    assert_eq!(router.dispatch("WEATHER").unwrap().response, WEATHER_RESPONSE);
    assert_eq!(router.dispatch("a disaster looms").unwrap().response, DISASTER_RESPONSE);
}

#[test]
fn test_no_acceptor_without_fallback_is_no_handler() {
    let mut registry = Registry::new();
    registry.register(scenario_earth().unwrap()).unwrap();
    let registry = registry.seal();

    let err = registry.router().dispatch("tell me a joke").unwrap_err();
    match err {
        DispatchError::NoHandler { query } => assert_eq!(query, "tell me a joke"),
        other => panic!("expected NoHandler, got {other:?}"),
    }
}

#[test]
fn test_dispatch_twice_is_structurally_equal() {
    let registry = scenario_registry().unwrap();
    let router = registry.router();
    for query in ["what's the weather today", "disaster", "tell me a joke"] {
        let a: ResultEnvelope = router.dispatch(query).unwrap();
        let b: ResultEnvelope = router.dispatch(query).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_failing_division_reports_name_and_query() {
    let failing = ScriptedDivision::new("Broken", true).failing("sensor offline");
    let mut registry = Registry::new();
    registry.register(failing).unwrap();
    registry.register(CoreDivision::new()).unwrap();
    let registry = registry.seal();

    let err = registry.router().dispatch("weather").unwrap_err();
    assert_eq!(
        err.to_string(),
        "division \"Broken\" failed on query \"weather\": division processing failed: sensor offline"
    );
}

#[test]
fn test_always_mode_first_division_catches_everything() {
    let earth = DivisionBuilder::new("Earth")
        .id("eid")
        .predicate(PredicateKind::Always)
        .case(Case::new("weather", ["weather"]).respond("W"))
        .fallback_response("Earth is online.")
        .build()
        .unwrap();
    let human = DivisionBuilder::new("Human")
        .id("hid")
        .predicate(PredicateKind::Always)
        .case(Case::new("support", ["support"]).respond("S"))
        .build()
        .unwrap();

    let mut registry = Registry::new();
    registry.register(earth).unwrap();
    registry.register(human).unwrap();
    let registry = registry.seal();
    let router = registry.router();

    assert_eq!(router.dispatch("support").unwrap().response, "Earth is online.");
    assert_eq!(router.dispatch_to("hid", "support").unwrap().envelope.response, "S");
}
