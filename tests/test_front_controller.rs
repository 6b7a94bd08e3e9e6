//! End-to-end tests for the front controller.
//!
//! Drives the axum router directly with `tower::util::ServiceExt::oneshot`;
//! the vendor manifest lives in a per-test temp dir so each test controls
//! exactly which failure path (if any) the pipeline takes.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tempfile::TempDir;
use tower::util::ServiceExt;

use diagd::config::{Config, HttpConfig, ReportConfig, ServiceConfig, VendorConfig};
use diagd::report::EscalationPolicy;
use diagd::server::{build_router, ServerState};

// ── Helpers ───────────────────────────────────────────────────────────────────

const VALID_MANIFEST: &str = r#"
generated_by = "vendor-install 1.4"
generated_at = "2026-08-01T10:00:00Z"

[[package]]
name = "tokio"
version = "1.45.1"
checksum = "sha256:3bfe7890"

[[package]]
name = "axum"
version = "0.8.4"
"#;

fn test_config() -> Config {
    Config {
        service: ServiceConfig {
            name: "diagd-test".into(),
            log_level: "info".into(),
            log_file: None,
        },
        http: HttpConfig {
            bind: "127.0.0.1:0".into(),
        },
        vendor: VendorConfig { manifest: None },
        report: ReportConfig {
            escalate: vec!["warning".into(), "error".into()],
        },
    }
}

/// Write `manifest` (if any) into `<dir>/vendor/manifest.toml` and build a
/// server state pointing at that path.
fn state_with_manifest(
    dir: &TempDir,
    manifest: Option<&str>,
    policy: EscalationPolicy,
) -> ServerState {
    let vendor_dir = dir.path().join("vendor");
    std::fs::create_dir_all(&vendor_dir).expect("create vendor dir");
    let path = vendor_dir.join("manifest.toml");
    if let Some(content) = manifest {
        std::fs::write(&path, content).expect("write manifest");
    }
    ServerState::new(test_config(), path, policy)
}

async fn get(state: ServerState, uri: &str) -> (StatusCode, String) {
    let router = build_router(state);
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("router response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("collect body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
}

// ── Success path ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn report_served_when_manifest_present() {
    let dir = TempDir::new().unwrap();
    let state = state_with_manifest(&dir, Some(VALID_MANIFEST), EscalationPolicy::standard());
    let (status, body) = get(state, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h2>Runtime</h2>"));
    assert!(body.contains("<h2>Dependencies</h2>"));
    assert!(body.contains("tokio"));
    assert!(body.contains("vendor-install 1.4"));
}

#[tokio::test]
async fn any_path_hits_the_front_controller() {
    let dir = TempDir::new().unwrap();
    let state = state_with_manifest(&dir, Some(VALID_MANIFEST), EscalationPolicy::standard());
    let (status, body) = get(state, "/some/deep/path").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h2>Dependencies</h2>"));
}

#[tokio::test]
async fn favicon_returns_no_content() {
    let dir = TempDir::new().unwrap();
    let state = state_with_manifest(&dir, Some(VALID_MANIFEST), EscalationPolicy::standard());
    let (status, body) = get(state, "/favicon.ico").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

// ── Failure paths ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_manifest_yields_generic_error() {
    let dir = TempDir::new().unwrap();
    let state = state_with_manifest(&dir, None, EscalationPolicy::standard());
    let (status, body) = get(state, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "An error occurred. Please check the logs.");
}

#[tokio::test]
async fn malformed_manifest_yields_unexpected_error() {
    let dir = TempDir::new().unwrap();
    let state = state_with_manifest(
        &dir,
        Some("[[package]]\nname = 42\n"),
        EscalationPolicy::standard(),
    );
    let (status, body) = get(state, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "An unexpected error occurred. Please check the logs.");
}

#[tokio::test]
async fn escalated_warning_yields_fatal_error() {
    let broken = r#"
generated_by = "vendor-install 1.4"

[[package]]
name = "broken"
version = ""
"#;
    let dir = TempDir::new().unwrap();
    let state = state_with_manifest(&dir, Some(broken), EscalationPolicy::standard());
    let (status, body) = get(state, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "A fatal error occurred. Please check the logs.");
}

#[tokio::test]
async fn unescalated_warning_lands_in_the_report() {
    let broken = r#"
generated_by = "vendor-install 1.4"

[[package]]
name = "broken"
version = ""

[[package]]
name = "tokio"
version = "1.45.1"
"#;
    let dir = TempDir::new().unwrap();
    // Nothing escalates: the warning passes through unconverted.
    let state = state_with_manifest(&dir, Some(broken), EscalationPolicy::only([]));
    let (status, body) = get(state, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h2>Conditions</h2>"));
    assert!(body.contains("empty version"));
    assert!(body.contains("tokio"));
}

// ── Re-read semantics and idempotence ─────────────────────────────────────────

#[tokio::test]
async fn manifest_deleted_between_requests_is_observed() {
    let dir = TempDir::new().unwrap();
    let state = state_with_manifest(&dir, Some(VALID_MANIFEST), EscalationPolicy::standard());
    let manifest_path = dir.path().join("vendor/manifest.toml");

    let (status, _) = get(state.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);

    std::fs::remove_file(&manifest_path).unwrap();

    let (status, body) = get(state, "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "An error occurred. Please check the logs.");
}

#[tokio::test]
async fn repeated_requests_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let state = state_with_manifest(&dir, Some(VALID_MANIFEST), EscalationPolicy::standard());
    let vendor_dir = dir.path().join("vendor");

    let entries_before = std::fs::read_dir(&vendor_dir).unwrap().count();

    let (first_status, _) = get(state.clone(), "/").await;
    let (second_status, second_body) = get(state.clone(), "/").await;
    let (third_status, third_body) = get(state, "/").await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, third_status);
    // Bodies differ only in the generation timestamp; the inventory is stable.
    assert!(second_body.contains("tokio"));
    assert!(third_body.contains("tokio"));

    // The pipeline performs no writes.
    let entries_after = std::fs::read_dir(&vendor_dir).unwrap().count();
    assert_eq!(entries_before, entries_after);
}
