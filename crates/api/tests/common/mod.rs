#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use friendtrip_api::auth::jwt::JwtConfig;
use friendtrip_api::config::ServerConfig;
use friendtrip_api::router::build_app_router;
use friendtrip_api::state::AppState;
use friendtrip_db::DbPool;

const BOUNDARY: &str = "friendtrip-test-boundary";

/// Build a test `ServerConfig` with safe defaults and the given upload directory.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        data_dir: upload_dir.clone(),
        upload_dir,
        max_upload_bytes: 10 * 1024 * 1024,
        compress_uploads: false,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 30,
        },
    }
}

/// A migrated in-memory database, a scratch upload directory, and the full
/// router wired to both.
pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    pub uploads: TempDir,
}

impl TestApp {
    /// A fresh clone of the router for one `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

pub async fn test_app() -> TestApp {
    test_app_with(|_| {}).await
}

/// Like [`test_app`], with the config adjusted before the router is built.
pub async fn test_app_with(configure: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let (pool, backend) = friendtrip_db::create_pool("sqlite::memory:")
        .await
        .expect("in-memory pool");
    friendtrip_db::run_migrations(&pool, backend)
        .await
        .expect("migrations");

    let uploads = tempfile::tempdir().expect("temp upload dir");
    let mut config = test_config(uploads.path().to_path_buf());
    configure(&mut config);

    let state = AppState {
        pool: pool.clone(),
        db_backend: backend,
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        pool,
        uploads,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        request(Method::POST, uri, None)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// One multipart part: `(field name, file name, contents)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a str);

/// A binary multipart part.
pub type BytesPart<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let parts: Vec<BytesPart<'_>> = parts
        .iter()
        .map(|(field, filename, data)| (*field, *filename, data.as_bytes()))
        .collect();
    multipart_bytes_body(&parts)
}

pub fn multipart_bytes_body(parts: &[BytesPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, filename, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match filename {
            Some(name) => {
                format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n")
            }
            None => format!("Content-Disposition: form-data; name=\"{field}\"\r\n"),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    parts: &[Part<'_>],
    token: &str,
) -> Response<Body> {
    post_multipart_raw(app, uri, multipart_body(parts), token).await
}

pub async fn post_multipart_bytes_auth(
    app: Router,
    uri: &str,
    parts: &[BytesPart<'_>],
    token: &str,
) -> Response<Body> {
    post_multipart_raw(app, uri, multipart_bytes_body(parts), token).await
}

async fn post_multipart_raw(app: Router, uri: &str, body: Vec<u8>, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::POST, uri, Some(token))
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

// ---------------------------------------------------------------------------
// Domain helpers
// ---------------------------------------------------------------------------

/// Sign up through the API and return `(access_token, user_id)`.
pub async fn signup(app: Router, mobile: &str, username: &str) -> (String, i64) {
    let body = serde_json::json!({
        "mobile": mobile,
        "username": username,
        "password": "secret-pass",
    });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["access_token"].as_str().unwrap().to_string(),
        json["user"]["id"].as_i64().unwrap(),
    )
}

/// Create a trip through the API and return `(trip_id, code)`.
pub async fn create_trip(app: Router, token: &str, name: &str) -> (i64, String) {
    let response =
        post_json_auth(app, "/api/v1/trips", serde_json::json!({ "name": name }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["data"]["id"].as_i64().unwrap(),
        json["data"]["code"].as_str().unwrap().to_string(),
    )
}

/// Join a trip by code through the API.
pub async fn join_trip(app: Router, token: &str, code: &str) {
    let response =
        post_json_auth(app, "/api/v1/trips/join", serde_json::json!({ "code": code }), token)
            .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Upload binary files into a trip and return the raw response.
pub async fn upload_bytes(
    app: Router,
    token: &str,
    trip_id: i64,
    files: &[(&str, &[u8])],
) -> Response<Body> {
    let parts: Vec<BytesPart<'_>> = files
        .iter()
        .map(|(name, data)| ("photos", Some(*name), *data))
        .collect();
    post_multipart_bytes_auth(app, &format!("/api/v1/trips/{trip_id}/photos"), &parts, token).await
}

/// Upload files into a trip and return the upload response body.
pub async fn upload(app: Router, token: &str, trip_id: i64, files: &[(&str, &str)]) -> serde_json::Value {
    let parts: Vec<Part<'_>> = files
        .iter()
        .map(|(name, data)| ("photos", Some(*name), *data))
        .collect();
    let response =
        post_multipart_auth(app, &format!("/api/v1/trips/{trip_id}/photos"), &parts, token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}
