use std::collections::HashMap;

use fitclub_api::config::ApiConfig;
use fitclub_core::DEFAULT_CLASS_CAPACITY;
use pretty_assertions::assert_eq;
use tracing::Level;

fn load(vars: &[(&str, &str)]) -> eyre::Result<ApiConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_apply() {
    let config = load(&[("DATABASE_URL", "postgres://localhost/fitclub")]).unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.class_capacity, DEFAULT_CLASS_CAPACITY);
}

#[test]
fn database_url_is_required() {
    assert!(load(&[]).is_err());
}

#[test]
fn explicit_values_are_used() {
    let config = load(&[
        ("DATABASE_URL", "postgres://db/fitclub"),
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "http://localhost:5173, https://club.example"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
        ("CLASS_CAPACITY", "12"),
    ])
    .unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "http://localhost:5173".to_string(),
            "https://club.example".to_string()
        ])
    );
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.class_capacity, 12);
}

#[test]
fn invalid_port_and_capacity_fail() {
    assert!(load(&[("DATABASE_URL", "x"), ("API_PORT", "http")]).is_err());
    assert!(load(&[("DATABASE_URL", "x"), ("CLASS_CAPACITY", "0")]).is_err());
}

#[test]
fn bad_cors_origin_is_an_error() {
    let origins = vec!["http://ok.example".to_string(), "bad\norigin".to_string()];
    assert!(fitclub_api::cors_layer(&origins).is_err());
}
