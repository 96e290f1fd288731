//! Tests for configuration layering and runner fallbacks.

use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::{Value, json};

use super::{SyncConfig, workflow_input};
use crate::github::error::SyncError;

const RUNNER_VARIABLES: [&str; 7] = [
    "INPUT_FROM",
    "INPUT_TO",
    "INPUT_TITLE",
    "INPUT_BODY",
    "GITHUB_TOKEN",
    "GITHUB_REPOSITORY",
    "GITHUB_API_URL",
];

fn cleared_runner_env() -> Vec<(&'static str, Option<&'static str>)> {
    RUNNER_VARIABLES.iter().map(|name| (*name, None)).collect()
}

fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

fn build_config_from_layers(layers: Vec<(&str, Value)>) -> SyncConfig {
    let mut composer = MergeComposer::new();
    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value);
    }
    SyncConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"from": "default"})), ("file", json!({"from": "file"}))],
    "file"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"from": "file"})), ("environment", json!({"from": "env"}))],
    "env"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"from": "env"})), ("cli", json!({"from": "cli"}))],
    "cli"
)]
fn test_layer_precedence(#[case] layers: Vec<(&str, Value)>, #[case] expected: &str) {
    let config = build_config_from_layers(layers);
    assert_eq!(config.from.as_deref(), Some(expected));
}

#[rstest]
fn configured_inputs_win_over_workflow_inputs() {
    let _guard = env_lock::lock_env([("INPUT_TITLE", Some("from runner"))]);
    let config = SyncConfig {
        title: Some("from config".to_owned()),
        ..SyncConfig::default()
    };

    assert_eq!(config.resolve_input("title"), "from config");
}

#[rstest]
#[case::from("from", "INPUT_FROM")]
#[case::to("to", "INPUT_TO")]
#[case::title("title", "INPUT_TITLE")]
#[case::body("body", "INPUT_BODY")]
fn missing_inputs_fall_back_to_workflow_inputs(#[case] name: &str, #[case] variable: &str) {
    let _guard = env_lock::lock_env([(variable, Some("  runner value \n"))]);
    let config = SyncConfig::default();

    assert_eq!(config.resolve_input(name), "runner value");
}

#[rstest]
fn blank_configured_input_falls_back_to_workflow_input() {
    let _guard = env_lock::lock_env([("INPUT_TO", Some("main"))]);
    let config = SyncConfig {
        to: Some("   ".to_owned()),
        ..SyncConfig::default()
    };

    assert_eq!(config.resolve_input("to"), "main");
}

#[rstest]
fn workflow_input_names_replace_spaces() {
    let _guard = env_lock::lock_env([("INPUT_BASE_BRANCH", Some("main"))]);
    assert_eq!(workflow_input("base branch").as_deref(), Some("main"));
}

#[rstest]
fn missing_inputs_resolve_to_empty_and_fail_validation() {
    let _guard = env_lock::lock_env(cleared_runner_env());
    let config = SyncConfig {
        from: Some("feature-x".to_owned()),
        to: Some("main".to_owned()),
        body: Some("body".to_owned()),
        repository: Some("octo/repo".to_owned()),
        ..SyncConfig::default()
    };

    let request = config
        .pull_request_request()
        .expect("repository should resolve");
    assert_eq!(request.title, "");
    assert_eq!(
        request.validate(),
        Err(SyncError::Configuration {
            message: "input required and not supplied: title".to_owned(),
        })
    );
}

#[rstest]
fn token_falls_back_to_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("ghs_runner"))]);
    let token = SyncConfig::default()
        .resolve_token()
        .expect("token should resolve");
    assert_eq!(token.value(), "ghs_runner");
}

#[rstest]
fn configured_token_wins_over_github_token() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("ghs_runner"))]);
    let config = SyncConfig {
        token: Some("ghp_configured".to_owned()),
        ..SyncConfig::default()
    };
    let token = config.resolve_token().expect("token should resolve");
    assert_eq!(token.value(), "ghp_configured");
}

#[rstest]
fn missing_token_is_a_configuration_error() {
    let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
    let result = SyncConfig::default().resolve_token();
    assert!(
        matches!(result, Err(SyncError::Configuration { .. })),
        "expected Configuration, got {result:?}"
    );
}

#[rstest]
fn repository_falls_back_to_runner_context() {
    let _guard = env_lock::lock_env([
        ("GITHUB_REPOSITORY", Some("octo/repo")),
        ("GITHUB_API_URL", Some("https://ghe.example.com/api/v3")),
    ]);
    let locator = SyncConfig::default()
        .repository_locator()
        .expect("repository should resolve");

    assert_eq!(locator.owner().as_str(), "octo");
    assert_eq!(locator.repository().as_str(), "repo");
    assert_eq!(locator.api_base().as_str(), "https://ghe.example.com/api/v3");
}

#[rstest]
fn api_url_defaults_to_public_github() {
    let _guard = env_lock::lock_env([("GITHUB_API_URL", None::<&str>)]);
    assert_eq!(SyncConfig::default().resolve_api_url(), "https://api.github.com");
}

#[rstest]
#[case::missing(None)]
#[case::malformed(Some("just-a-name"))]
fn unusable_repository_is_a_configuration_error(#[case] repository: Option<&str>) {
    let _guard = env_lock::lock_env([("GITHUB_REPOSITORY", None::<&str>)]);
    let config = SyncConfig {
        repository: repository.map(ToOwned::to_owned),
        ..SyncConfig::default()
    };

    let result = config.repository_locator();
    assert!(
        matches!(result, Err(SyncError::Configuration { .. })),
        "expected Configuration, got {result:?}"
    );
}
