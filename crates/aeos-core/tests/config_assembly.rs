//! Loading a TOML file and assembling a routed registry from it.

use aeos_config::ConfigError;
use aeos_core::{BuildError, ConfigurationError, CostLedger, DispatchError, build_registry};
use aeos_test_utils::config::TestConfigBuilder;
use aeos_test_utils::config_file::TestConfigFile;
use pretty_assertions::assert_eq;

const OPS_TOML: &str = r#"
[router]
predicate = "keywords"
catalog = false

[ledger]
capacity = 4

[[divisions]]
name = "OPS - Operations"
id = "ops"
capabilities = ["Incident Response"]
cost = 0.25

[[divisions.cases]]
label = "incident"
keywords = ["incident", "outage"]
response = "INCIDENT BRIDGE OPENED"
logs = ["Paging on-call."]
tools = [{ tool = "Pager", input = "Primary rotation", output = "Acknowledged" }]
"#;

#[test_log::test(tokio::test)]
async fn test_file_to_dispatch() {
    let file = TestConfigFile::with_toml(OPS_TOML).await;
    let config = file.load().await.unwrap();
    let registry = build_registry(&config).unwrap();

    assert_eq!(registry.names(), vec!["OPS - Operations", "AEOS Core"]);

    let routed = registry.router().route("Outage in eu-west").unwrap();
    assert_eq!(routed.division, "OPS - Operations");
    assert_eq!(routed.envelope.response, "INCIDENT BRIDGE OPENED");
    assert_eq!(routed.envelope.tool_usage[0].tool, "Pager");
    assert_eq!(routed.envelope.logs, vec!["Paging on-call.".to_string()]);

    let fallback = registry.router().route("weather").unwrap();
    assert_eq!(fallback.division, "AEOS Core");
}

#[test_log::test(tokio::test)]
async fn test_ledger_capacity_from_file() {
    let file = TestConfigFile::with_toml(OPS_TOML).await;
    let config = file.load().await.unwrap();
    let registry = build_registry(&config).unwrap();
    let ledger = CostLedger::new(config.ledger.capacity);

    for _ in 0..6 {
        ledger.record(&registry.router().route("incident").unwrap());
    }
    assert_eq!(ledger.len(), 4);
    assert_eq!(ledger.request_count(), 6);
    assert_eq!(ledger.total_cost(), 1.5);
}

#[test_log::test(tokio::test)]
async fn test_large_validated_capacity_records_normally() {
    let file = TestConfigFile::with_toml("[ledger]\ncapacity = 9223372036854775807\n").await;
    let config = file.load().await.unwrap();
    let registry = build_registry(&config).unwrap();
    let ledger = CostLedger::new(config.ledger.capacity);

    ledger.record(&registry.router().route("weather").unwrap());
    ledger.record(&registry.router().route("tell me a joke").unwrap());
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.request_count(), 2);
}

#[test_log::test(tokio::test)]
async fn test_rewritten_file_reassembles() {
    let file = TestConfigFile::with_toml(OPS_TOML).await;
    let first = build_registry(&file.load().await.unwrap()).unwrap();
    assert_eq!(first.len(), 2);

    file.rewrite("[router]\nfallback = false\n").await;
    let second = build_registry(&file.load().await.unwrap()).unwrap();
    assert_eq!(second.len(), 4);
    assert!(!second.has_catch_all());

    let err = second.router().dispatch("tell me a joke").unwrap_err();
    assert!(matches!(err, DispatchError::NoHandler { .. }));
}

#[test_log::test(tokio::test)]
async fn test_malformed_file_is_a_parse_error() {
    let file = TestConfigFile::with_toml("[router\npredicate = ").await;
    let err = file.load().await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_duplicate_names_across_custom_divisions() {
    let config = TestConfigBuilder::new()
        .without_catalog()
        .division(TestConfigBuilder::keyword_division("OPS", "ops", &["incident"]))
        .division(TestConfigBuilder::keyword_division("OPS", "ops2", &["outage"]))
        .build();

    let err = build_registry(&config).unwrap_err();
    assert!(matches!(err, BuildError::Config(ConfigError::Validation(_))));
}

#[test]
fn test_always_predicate_sends_everything_to_first_catalog_division() {
    let config = TestConfigBuilder::new().predicate("always").build();
    let registry = build_registry(&config).unwrap();
    let router = registry.router();

    let routed = router.route("need support").unwrap();
    assert_eq!(routed.division, "EID - Earth Intelligence");
    assert_eq!(
        routed.envelope.response,
        "EID is online. Select a specific capability for detailed analysis."
    );

    let direct = router.dispatch_to("hid", "need support").unwrap();
    assert_eq!(direct.division, "HID - Human Interaction");
}

#[test]
fn test_custom_division_is_matched_before_fallback() {
    let config = TestConfigBuilder::new()
        .without_catalog()
        .division(TestConfigBuilder::keyword_division(
            "Labs",
            "labs",
            &["experiment", "prototype"],
        ))
        .build();
    let registry = build_registry(&config).unwrap();

    let envelope = registry.router().dispatch("new PROTOTYPE ready").unwrap();
    assert_eq!(envelope.response, "Labs: prototype");
    assert_eq!(envelope.tool_usage[0].tool, "Labs Tool");
    assert_eq!(envelope.cost, 0.01);
}

#[test]
fn test_fallback_cannot_precede_custom_divisions() {
    use aeos_core::{CoreDivision, Registry};
    use aeos_test_utils::divisions::scenario_earth;

    let mut registry = Registry::new();
    registry.register(CoreDivision::new()).unwrap();
    let err = registry.register(scenario_earth().unwrap()).unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::UnreachableAfterFallback { .. }
    ));
}
