// tests/api_tests.rs
//
// Handler-level tests driven through the actix test service, with the
// engine replaced by a stub script (see tests/integration_tests.rs).
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};

use texserve::api::{AppState, configure_routes};
use texserve::config::{AppConfig, CompilerConfig};

const SOURCE: &str = "\\documentclass{article}\\begin{document}Hello\\end{document}";

const SUCCESS_STUB: &str = r#"#!/bin/sh
dir="$3"
base=$(basename "$4" .tex)
printf '%%PDF-1.4 stub engine output\n' > "$dir/$base.pdf"
exit 0
"#;

const UNDEFINED_COMMAND_STUB: &str = r#"#!/bin/sh
dir="$3"
base=$(basename "$4" .tex)
cat > "$dir/$base.log" <<'EOF'
! Undefined control sequence.
l.3 \foobarbaz
EOF
exit 1
"#;

fn write_stub(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("engine.sh");
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn test_state(engine: &Path, scratch: &Path) -> AppState {
    AppState::new(AppConfig {
        port: 0,
        max_source_len: 10_000,
        compiler: CompilerConfig {
            scratch_root: scratch.to_path_buf(),
            engine_bin: engine.to_string_lossy().into_owned(),
            timeout: Duration::from_secs(5),
        },
    })
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(App::new().configure(configure_routes)).await;

    let req = test::TestRequest::get()
        .uri("/latex/api/v1/health")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn test_post_convert_returns_pdf() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = write_stub(tmp.path(), SUCCESS_STUB);
    let state = test_state(&engine, &tmp.path().join("scratch"));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/latex/api/v1/latex/convert")
        .set_json(serde_json::json!({ "latexContent": SOURCE }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF-"));
}

#[actix_web::test]
async fn test_post_convert_failure_returns_diagnostic() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = write_stub(tmp.path(), UNDEFINED_COMMAND_STUB);
    let state = test_state(&engine, &tmp.path().join("scratch"));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/latex/api/v1/latex/convert")
        .set_json(serde_json::json!({ "latexContent": "\\foobarbaz" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let diagnostic: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(diagnostic["category"], "UndefinedCommand");
    assert!(
        diagnostic["message"]
            .as_str()
            .unwrap()
            .contains("foobarbaz")
    );
}

#[actix_web::test]
async fn test_get_convert_returns_pdf() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = write_stub(tmp.path(), SUCCESS_STUB);
    let state = test_state(&engine, &tmp.path().join("scratch"));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/latex/api/v1/latex/convert?code=hello")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF-"));
}

#[actix_web::test]
async fn test_get_convert_rejects_oversized_source() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = write_stub(tmp.path(), SUCCESS_STUB);
    let state = test_state(&engine, &tmp.path().join("scratch"));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let uri = format!("/latex/api/v1/latex/convert?code={}", "x".repeat(10_001));
    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_post_convert_rejects_empty_source() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = write_stub(tmp.path(), SUCCESS_STUB);
    let state = test_state(&engine, &tmp.path().join("scratch"));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/latex/api/v1/latex/convert")
        .set_json(serde_json::json!({ "latexContent": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
