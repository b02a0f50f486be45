//! CLI integration tests.
//!
//! These tests verify argument parsing, configuration loading, and command
//! execution against a file-backed session.

use std::ffi::OsString;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use travel_auth::cli::{execute, parse_args_from, Args, Command};
use travel_auth::config::Config;
use travel_auth::{AuthError, FileStorage, MockAuthBackend, Provider};

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("travel-auth")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.config.is_none());
    assert!(result.data_file.is_none());
    assert!(result.log_level.is_none());
    assert!(result.command.is_none());
    assert!(!result.help);
    assert!(!result.version);
}

#[test]
fn test_cli_options_after_command() {
    let result = parse_args_from(args(&[
        "reset-password",
        "--email",
        "a@x.com",
        "--latency-ms",
        "5",
    ]))
    .unwrap();

    assert_eq!(result.latency_ms, Some(5));
    assert_eq!(
        result.command,
        Some(Command::ResetPassword {
            email: "a@x.com".into()
        })
    );
}

#[test]
fn test_cli_social_provider_case() {
    let result = parse_args_from(args(&["social", "Google"])).unwrap();
    assert_eq!(result.command, Some(Command::Social(Provider::Google)));
}

#[test]
fn test_cli_invalid_input() {
    assert!(parse_args_from(args(&["--latency-ms", "-1"])).is_err());
    assert!(parse_args_from(args(&["--bogus"])).is_err());
    assert!(parse_args_from(args(&["whoami", "extra"])).is_err());
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_config_file_loading() {
    let json = r#"{
        "storage": { "data_file": "/srv/travel/session.json" },
        "backend": { "latency_ms": 50 },
        "logging": { "level": "warn" }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.storage.data_file, "/srv/travel/session.json");
    assert_eq!(config.backend.latency_ms, 50);
    assert_eq!(config.log_filter(), "warn");
}

#[test]
fn test_cli_overrides_config_file() {
    let json = r#"{ "storage": { "data_file": "from-file.json" }, "backend": { "latency_ms": 50 } }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let args = Args {
        config: Some(file.path().to_path_buf()),
        data_file: Some("from-cli.json".into()),
        latency_ms: Some(0),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();
    assert_eq!(config.storage.data_file, "from-cli.json");
    assert_eq!(config.backend.latency_ms, 0);
}

#[test]
fn test_missing_config_file() {
    let args = Args {
        config: Some("/nonexistent/travel-auth.json".into()),
        ..Args::default()
    };
    assert!(Config::load(&args).is_err());
}

// ============================================================================
// Command Execution Tests
// ============================================================================

fn file_backend(dir: &TempDir) -> MockAuthBackend<FileStorage> {
    let args = Args {
        data_file: Some(dir.path().join("session.json")),
        latency_ms: Some(0),
        ..Args::default()
    };
    let mut config = Config::default();
    config.apply_args(&args);

    MockAuthBackend::with_config(FileStorage::new(config.data_file()), config.mock_config())
}

#[tokio::test]
async fn test_commands_share_session_file() {
    let dir = TempDir::new().unwrap();

    let parsed = parse_args_from(args(&["social", "facebook"])).unwrap();
    let out = execute(&file_backend(&dir), parsed.command.unwrap())
        .await
        .unwrap();
    assert!(out.contains("\"facebook\""));

    // A fresh backend over the same file sees the session
    let parsed = parse_args_from(args(&["update", "--name", "Traveller"])).unwrap();
    let out = execute(&file_backend(&dir), parsed.command.unwrap())
        .await
        .unwrap();
    assert!(out.contains("Traveller"));
    assert!(out.contains("user@facebook.com"));

    let status = execute(&file_backend(&dir), Command::Status).await.unwrap();
    assert_eq!(status, "logged in as user@facebook.com");
}

#[tokio::test]
async fn test_login_without_flags_is_rejected() {
    let dir = TempDir::new().unwrap();
    let parsed = parse_args_from(args(&["login"])).unwrap();

    let err = execute(&file_backend(&dir), parsed.command.unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn test_token_requires_session() {
    let dir = TempDir::new().unwrap();
    let err = execute(&file_backend(&dir), Command::Token)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotAuthenticated));
}

#[tokio::test]
async fn test_logout_recovers_corrupt_session_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "garbage").unwrap();

    // Login names the broken file instead of overwriting it
    let parsed = parse_args_from(args(&["login", "-e", "a@x.com", "-p", "p"])).unwrap();
    let err = execute(&file_backend(&dir), parsed.command.unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Storage(_)));
    assert!(err.to_string().contains("session.json"));

    // Logout clears it, after which login works again
    execute(&file_backend(&dir), Command::Logout).await.unwrap();
    let status = execute(&file_backend(&dir), Command::Status).await.unwrap();
    assert_eq!(status, "logged out");

    let parsed = parse_args_from(args(&["login", "-e", "a@x.com", "-p", "p"])).unwrap();
    execute(&file_backend(&dir), parsed.command.unwrap())
        .await
        .unwrap();
    let status = execute(&file_backend(&dir), Command::Status).await.unwrap();
    assert_eq!(status, "logged in as a@x.com");
}
