//! End-to-end authentication tests
//!
//! Tests the full auth flow from configuration to authorization:
//! - token resolution (literal and env indirection)
//! - placeholder denylist enforcement
//! - per-request credential comparison

use std::io::Write;

use wms_analytics::api::auth::ServiceAuth;
use wms_analytics::api::error::ApiError;
use wms_analytics::config::{AuthConfig, Config};

/// Test that ServiceAuth correctly resolves from AuthConfig
#[test]
fn test_auth_resolution_from_config() {
    let auth_config = AuthConfig {
        service_token: Some("abc123".to_string()),
        ..Default::default()
    };

    let auth = ServiceAuth::from_config(&auth_config);

    assert!(auth.is_configured());
    assert_eq!(auth.authorize("abc123"), Ok(()));
    assert_eq!(auth.authorize("wrong"), Err(ApiError::Unauthorized));
}

/// Test env indirection resolution end to end.
///
/// The variable is planted through a dotenv file because `env::set_var`
/// is unsafe in edition 2024 and the lib forbids unsafe. The key uses a
/// unique prefix so parallel tests won't conflict.
#[test]
fn test_auth_resolution_via_env_file() {
    let dir = tempfile::tempdir().unwrap();
    let env_path = dir.path().join("auth-test.env");
    let mut f = std::fs::File::create(&env_path).unwrap();
    writeln!(f, "WMS_AUTH_TEST_SERVICE_TOKEN=s3cr3t-from-env").unwrap();
    drop(f);

    let config_path = dir.path().join("service.yaml");
    std::fs::write(
        &config_path,
        format!(
            r#"
env_files:
  - {}
auth:
  service_token: "env:WMS_AUTH_TEST_SERVICE_TOKEN"
"#,
            env_path.display()
        ),
    )
    .unwrap();

    let config = Config::load(Some(config_path.as_path())).unwrap();
    let auth = ServiceAuth::from_config(&config.auth);

    assert!(auth.is_configured());
    assert_eq!(auth.authorize("s3cr3t-from-env"), Ok(()));
    assert_eq!(auth.authorize("abc123"), Err(ApiError::Unauthorized));
}

/// Unresolvable env indirection means no token, which means every
/// authorization attempt reports the deployment as misconfigured.
#[test]
fn test_unresolvable_indirection_is_misconfigured() {
    let auth_config = AuthConfig {
        service_token: Some("env:WMS_AUTH_TEST_SURELY_UNSET_VAR".to_string()),
        ..Default::default()
    };

    let auth = ServiceAuth::from_config(&auth_config);

    assert!(!auth.is_configured());
    assert_eq!(
        auth.authorize("anything"),
        Err(ApiError::MisconfiguredService)
    );
}

/// The default denylist covers common shipped placeholders, so an
/// untouched deployment fails closed.
#[test]
fn test_default_denylist_rejects_shipped_placeholder() {
    let auth_config = AuthConfig {
        service_token: Some("replace-token".to_string()),
        ..Default::default()
    };

    let auth = ServiceAuth::from_config(&auth_config);

    assert!(!auth.is_configured());
    // Even a caller presenting the placeholder itself gets the
    // server-side error, never a success.
    assert_eq!(
        auth.authorize("replace-token"),
        Err(ApiError::MisconfiguredService)
    );
}

/// An overridden denylist replaces the defaults entirely.
#[test]
fn test_denylist_override_from_config() {
    let auth_config = AuthConfig {
        service_token: Some("changeme".to_string()),
        placeholder_tokens: vec!["internal-dev".to_string()],
    };

    let auth = ServiceAuth::from_config(&auth_config);

    // "changeme" is no longer denied once the list is overridden
    assert!(auth.is_configured());
    assert_eq!(auth.authorize("changeme"), Ok(()));
}

/// Misconfiguration wins over any credential, matching or not.
#[test]
fn test_misconfiguration_wins_for_every_credential() {
    for bad_token in [None, Some(String::new()), Some("changeme".to_string())] {
        let auth = ServiceAuth::new(bad_token, vec!["changeme".to_string()]);
        for credential in ["", "abc123", "changeme"] {
            assert_eq!(
                auth.authorize(credential),
                Err(ApiError::MisconfiguredService)
            );
        }
    }
}
