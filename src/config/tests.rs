//! Unit tests for configuration loading.

use super::{BIND_ADDR_VAR, CONFIG_PATH_VAR, ConfigError, PorticoConfig, SESSION_SECRET_VAR};
use rstest::rstest;
use std::collections::HashMap;
use std::net::SocketAddr;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[rstest]
fn missing_file_gives_defaults() {
    let env = env_from(&[(CONFIG_PATH_VAR, "/nonexistent/portico.toml")]);

    let config = PorticoConfig::load_with(&env).expect("defaults are valid");

    assert_eq!(config, PorticoConfig::default());
    assert_eq!(config.server.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
    assert_eq!(config.session.ttl_minutes, 480);
    assert_eq!(config.messaging.max_body_bytes, 8192);
    assert!(config.seed.enabled);
}

#[rstest]
fn partial_file_keeps_other_defaults() {
    let config = PorticoConfig::from_toml_str(
        r#"
        [server]
        bind_addr = "0.0.0.0:8080"

        [messaging]
        max_participants = 4
        "#,
    )
    .expect("valid toml");

    assert_eq!(config.server.bind_addr.port(), 8080);
    assert_eq!(config.messaging.max_participants, 4);
    assert_eq!(config.messaging.max_subject_chars, 200);
    assert_eq!(config.session.cookie_name, "session");
}

#[rstest]
fn malformed_file_is_an_error() {
    let result = PorticoConfig::from_toml_str("[server]\nbind_addr = 42");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[rstest]
fn env_overrides_win() {
    let secret = "s".repeat(40);
    let env = env_from(&[
        (CONFIG_PATH_VAR, "/nonexistent/portico.toml"),
        (BIND_ADDR_VAR, "127.0.0.1:9999"),
        (SESSION_SECRET_VAR, secret.as_str()),
    ]);

    let config = PorticoConfig::load_with(&env).expect("overrides are valid");

    assert_eq!(config.server.bind_addr.port(), 9999);
    assert_eq!(config.session.secret.as_deref(), Some(secret.as_str()));
}

#[rstest]
fn bad_bind_override_is_reported() {
    let env = env_from(&[
        (CONFIG_PATH_VAR, "/nonexistent/portico.toml"),
        (BIND_ADDR_VAR, "not-an-address"),
    ]);

    let result = PorticoConfig::load_with(&env);

    assert!(matches!(
        result,
        Err(ConfigError::InvalidOverride { var: BIND_ADDR_VAR, .. })
    ));
}

#[rstest]
#[case("[session]\nsecret = \"short\"", "session.secret")]
#[case("[session]\nttl_minutes = 0", "session.ttl_minutes")]
#[case("[messaging]\nmax_body_bytes = 0", "messaging.max_body_bytes")]
#[case("[messaging]\nmax_participants = 1", "messaging.max_participants")]
#[case("[passwords]\niterations = 0", "passwords.iterations")]
fn validation_names_the_bad_key(#[case] toml: &str, #[case] expected_key: &str) {
    let config = PorticoConfig::from_toml_str(toml).expect("valid toml");

    let result = config.validate();

    assert!(matches!(result, Err(ConfigError::Invalid { key, .. }) if key == expected_key));
}

#[rstest]
fn debug_output_hides_secret() {
    let mut config = PorticoConfig::default();
    config.session.secret = Some("super-secret-value-that-is-long-enough".to_owned());

    let rendered = format!("{config:?}");

    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("<redacted>"));
}
