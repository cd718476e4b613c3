mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{multipart_body, multipart_content_type, xlsx_entry, SAMPLE_CSV};
use http_body_util::BodyExt;
use pcasp_credores::web::{build_router, AppState};
use pcasp_credores::AppConfig;
use std::collections::BTreeSet;
use tower::util::ServiceExt;

fn app() -> axum::Router {
    build_router(AppState::new(AppConfig::default()))
}

fn upload_request(uri: &str, file_name: &str, content: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(multipart_body(file_name, content)))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

fn working_dir_entries() -> BTreeSet<String> {
    std::fs::read_dir(".")
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect()
}

#[tokio::test]
async fn test_index_serves_upload_form() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Validação de Credores – Grupos 7 e 8"));
    assert!(html.contains(r#"enctype="multipart/form-data""#));
}

#[tokio::test]
async fn test_health_check() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ok");
}

#[tokio::test]
async fn test_validate_page_renders_both_tables() {
    let response = app()
        .oneshot(upload_request("/validate", "balancete.csv", SAMPLE_CSV.as_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();

    let divergent_at = html.find("Credores com Divergência").unwrap();
    let correct_at = html.find("Credores Corretos").unwrap();
    assert!(divergent_at < correct_at);
    assert!(html.contains("CONSTRUTORA ALFA LTDA"));
    assert!(html.contains("R$ 500,00"));
    assert!(html.contains("validacao_credores_grupos_7_e_8.xlsx"));
    assert!(html.contains(";base64,UEsDB"));
}

#[tokio::test]
async fn test_api_validate_returns_workbook_without_touching_disk() {
    let before = working_dir_entries();

    let response = app()
        .oneshot(upload_request("/api/validate", "balancete.csv", SAMPLE_CSV.as_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"validacao_credores_grupos_7_e_8.xlsx\""
    );

    let workbook = body_bytes(response).await;
    let sheets = xlsx_entry(&workbook, "xl/workbook.xml");
    assert!(sheets.contains("Credores Corretos"));
    assert!(sheets.contains("Credores com Divergência"));

    assert_eq!(working_dir_entries(), before);
}

#[tokio::test]
async fn test_api_report_returns_json() {
    let response = app()
        .oneshot(upload_request("/api/report", "balancete.csv", SAMPLE_CSV.as_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();

    let comparisons = report["comparisons"].as_array().unwrap();
    assert_eq!(comparisons.len(), 3);
    assert_eq!(comparisons[0]["status"], "DIVERGENTE");
    assert_eq!(comparisons[1]["status"], "CORRETO");
    assert_eq!(comparisons[2]["group7"], 800.0);
    assert_eq!(report["stats"]["creditor_rows"], 5);
}

#[tokio::test]
async fn test_non_csv_upload_is_rejected() {
    let response = app()
        .oneshot(upload_request("/api/report", "balancete.xlsx", b"PK"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("balancete.xlsx"));
}

fn small_upload_app() -> axum::Router {
    let mut config = AppConfig::default();
    config.server.max_upload_mb = 1;
    build_router(AppState::new(config))
}

fn oversized_csv() -> Vec<u8> {
    let line = "1.1;12345678901 FULANO;1.000,00;D\n";
    let mut content = "Máscara;Descrição;Saldo Atual;Tipo Saldo\n".as_bytes().to_vec();
    while content.len() < 2 * 1024 * 1024 {
        content.extend_from_slice(line.as_bytes());
    }
    content
}

#[tokio::test]
async fn test_oversized_upload_returns_payload_too_large() {
    let response = small_upload_app()
        .oneshot(upload_request("/api/report", "balancete.csv", &oversized_csv()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(body["details"].as_str().unwrap().contains("max_upload_mb"));
}

#[tokio::test]
async fn test_oversized_upload_shows_error_page() {
    let response = small_upload_app()
        .oneshot(upload_request("/validate", "balancete.csv", &oversized_csv()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("tamanho máximo"));
    assert!(html.contains(r#"name="file""#));
}

#[tokio::test]
async fn test_missing_column_shows_error_page() {
    let response = app()
        .oneshot(upload_request(
            "/validate",
            "balancete.csv",
            "Máscara;Descrição;Tipo Saldo\n7.1;12345678901 X;D\n".as_bytes(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("saldo atual"));
    assert!(html.contains(r#"name="file""#));
}

#[tokio::test]
async fn test_served_ui_is_reachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });

    let client = reqwest::Client::new();
    let page = client
        .get(format!("http://{}/", address))
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());

    let part = reqwest::multipart::Part::bytes(SAMPLE_CSV.as_bytes().to_vec())
        .file_name("balancete.csv")
        .mime_str("text/csv")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("file", part);
    let response = client
        .post(format!("http://{}/api/validate", address))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let workbook = response.bytes().await.unwrap();
    assert!(workbook.starts_with(b"PK"));
}
