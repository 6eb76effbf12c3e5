mod common;

use common::env::EnvGuard;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;
use zdbot::{AuthType, Config};

fn clear_zendesk_env() -> Vec<EnvGuard> {
    [
        "ZENDESK_SUBDOMAIN",
        "ZENDESK_USER",
        "ZENDESK_TOKEN",
        "ZENDESK_PASSWORD",
        "ZENDESK_AUTH_TYPE",
    ]
    .into_iter()
    .map(EnvGuard::remove)
    .collect()
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.yaml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_load_from_file() {
    let _env = clear_zendesk_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "subdomain: acme\nuser: agent@acme.com\nauth_type: token\ntoken: abc\ndisplay_limit: 5\ntimeout: 12\n",
    );

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.subdomain, "acme");
    assert_eq!(config.auth_type, AuthType::Token);
    assert_eq!(config.display_limit, 5);
    assert_eq!(config.timeout, 12);
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let _env = clear_zendesk_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "subdomain: acme\nuser: agent@acme.com\npassword: pw\n");

    let _subdomain = EnvGuard::set("ZENDESK_SUBDOMAIN", "globex");
    let _auth = EnvGuard::set("ZENDESK_AUTH_TYPE", "token");
    let _token = EnvGuard::set("ZENDESK_TOKEN", "from-env");

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.subdomain, "globex");
    assert_eq!(config.auth_type, AuthType::Token);
    assert_eq!(config.token, "from-env");
    assert_eq!(
        config.base_url_string().unwrap(),
        "https://globex.zendesk.com"
    );
}

#[test]
#[serial]
fn test_empty_env_is_ignored() {
    let _env = clear_zendesk_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "subdomain: acme\nuser: agent@acme.com\npassword: pw\n");

    let _subdomain = EnvGuard::set("ZENDESK_SUBDOMAIN", "");

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.subdomain, "acme");
}

#[test]
#[serial]
fn test_env_only_configuration() {
    let _env = clear_zendesk_env();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");

    let _subdomain = EnvGuard::set("ZENDESK_SUBDOMAIN", "acme");
    let _user = EnvGuard::set("ZENDESK_USER", "agent@acme.com");
    let _password = EnvGuard::set("ZENDESK_PASSWORD", "pw");

    let config = Config::load(Some(&missing)).unwrap();
    assert_eq!(config.subdomain, "acme");
    assert_eq!(config.display_limit, 10);
}

#[test]
#[serial]
fn test_invalid_auth_type_in_env() {
    let _env = clear_zendesk_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "subdomain: acme\nuser: agent@acme.com\npassword: pw\n");

    let _auth = EnvGuard::set("ZENDESK_AUTH_TYPE", "oauth");

    let error = Config::load(Some(&path)).unwrap_err();
    assert!(error.to_string().contains("unknown auth_type"), "{error}");
}

#[test]
#[serial]
fn test_zero_display_limit_rejected() {
    let _env = clear_zendesk_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "subdomain: acme\nuser: agent@acme.com\npassword: pw\ndisplay_limit: 0\n",
    );

    let error = Config::load(Some(&path)).unwrap_err();
    assert!(error.to_string().contains("display_limit"), "{error}");
}

#[test]
#[serial]
fn test_malformed_yaml() {
    let _env = clear_zendesk_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "subdomain: [unterminated\n");

    assert!(Config::load(Some(&path)).is_err());
}
