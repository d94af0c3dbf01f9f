use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn defaults_to_hosted_backend_without_timeout() {
    let settings = ClientSettings::default();
    assert_eq!(settings.base_url, "https://uncover-backend.onrender.com");
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = ClientSettings::default();
    apply_file(
        &mut settings,
        "base_url = \"http://localhost:8000\"\nrequest_timeout_secs = 20\n",
    )
    .expect("valid toml");
    assert_eq!(settings.base_url, "http://localhost:8000");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(20)));
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let mut settings = ClientSettings::default();
    apply_env(
        &mut settings,
        lookup(&[
            ("UNCOVER_API_BASE_URL", "http://legacy:8000"),
            ("APP__BASE_URL", "http://app:8000"),
        ]),
    );
    assert_eq!(settings.base_url, "http://app:8000");
}

#[test]
fn blank_or_invalid_env_values_are_ignored() {
    let mut settings = ClientSettings::default();
    apply_env(
        &mut settings,
        lookup(&[("APP__BASE_URL", "  "), ("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    );
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn zero_timeout_means_wait_indefinitely() {
    let settings = ClientSettings {
        request_timeout_secs: Some(0),
        ..ClientSettings::default()
    };
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn normalizes_trailing_slashes() {
    assert_eq!(
        normalize_base_url(" http://localhost:8000// ").expect("valid"),
        "http://localhost:8000"
    );
}

#[test]
fn rejects_non_http_base_urls() {
    assert!(normalize_base_url("").is_err());
    assert!(normalize_base_url("localhost:8000").is_err());
    assert!(normalize_base_url("ftp://example.com").is_err());
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("uncover_missing_{suffix}.toml"));
    assert!(load_settings(Some(&path)).is_err());
}

#[test]
fn loads_explicit_config_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("uncover_config_{suffix}.toml"));
    fs::write(&path, "request_timeout_secs = 7\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.request_timeout_secs, Some(7));

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn missing_optional_config_file_is_skipped() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("uncover_absent_{suffix}.toml"));
    assert_eq!(read_config_file(&path, false).expect("skip"), None);
}

#[test]
fn unreadable_optional_config_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("uncover_dir_{suffix}.toml"));
    fs::create_dir(&path).expect("create dir");

    let result = read_config_file(&path, false);

    fs::remove_dir(&path).expect("cleanup");
    assert!(result.is_err());
}
