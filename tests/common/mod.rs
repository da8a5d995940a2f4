//! In-process mock of the few gitlab endpoints the tests talk to
#![allow(dead_code, reason = "each test file uses a different part of this module")]

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use gitlab_api::{Config, Connection, GitLabApi};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

/// The only token the mock accepts on `/user`
pub const TOKEN: &str = "secret-token";

/// A running mock server
pub struct MockGitLab {
    pub host_url: Url,
}

impl MockGitLab {
    /// Binds a random port and serves the mock on it until the test ends
    pub async fn start() -> Self {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router()).await.unwrap() });

        Self {
            host_url: Url::parse(&format!("http://{addr}")).unwrap(),
        }
    }

    pub fn config(&self, token: &str) -> Config {
        Config::new(self.host_url.clone(), token.to_owned(), false)
    }

    pub fn api(&self) -> GitLabApi<Connection> {
        GitLabApi::from_config(&self.config(TOKEN)).unwrap()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn router() -> Router {
    Router::new()
        .route("/api/v4/echo", any(echo))
        .route("/api/v4/echo/{*rest}", any(echo))
        .route("/api/v4/status/{code}", any(status))
        .route("/api/v4/user", get(current_user))
        .route("/api/v4/users/{id}", get(user))
        .route("/api/v4/groups/{id}", get(group))
        .route("/api/v4/projects", get(list_projects).post(create_project))
        .route(
            "/api/v4/projects/{id}",
            get(project).put(update_project).delete(delete_project),
        )
        .route(
            "/api/v4/projects/{id}/access_tokens",
            get(list_tokens).post(create_token),
        )
        .route(
            "/api/v4/projects/{id}/access_tokens/{token_id}",
            axum::routing::delete(revoke_token),
        )
}

/// `(name, value)` pairs of a query string or of a form body, in order
pub fn pairs(encoded: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect()
}

fn value_of<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|&(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("404 {what} Not Found") })),
    )
        .into_response()
}

/// Describes the request it received
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "query": pairs(uri.query().unwrap_or_default()),
        "form": pairs(&body),
        "content_type": headers.get("content-type").and_then(|value| value.to_str().ok()),
        "token": headers.get("private-token").and_then(|value| value.to_str().ok()),
    }))
}

/// Answers with the status found in the path
async fn status(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap();
    (status, Json(json!({ "message": format!("{code} from mock") }))).into_response()
}

fn user_json(id: u64) -> Value {
    json!({
        "id": id,
        "username": "john_smith",
        "name": "John Smith",
        "state": "active",
        "is_admin": false,
    })
}

async fn current_user(headers: HeaderMap) -> Response {
    match headers.get("private-token") {
        Some(token) if token == TOKEN => Json(user_json(4)).into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "401 Unauthorized" })),
        )
            .into_response(),
    }
}

async fn user(Path(id): Path<u64>) -> Response {
    if id == 4 {
        Json(user_json(id)).into_response()
    } else {
        not_found("User")
    }
}

async fn group(Path(id): Path<u64>) -> Response {
    let mut group = match id {
        1 => json!({ "id": 1, "name": "Acme", "path": "acme", "parent_id": null }),
        2 => json!({ "id": 2, "name": "Platform", "path": "platform", "parent_id": 1 }),
        3 => json!({ "id": 3, "name": "Tools", "path": "tools", "parent_id": 2 }),
        _ => return not_found("Group"),
    };
    group["web_url"] = json!(format!("http://gitlab.example.com/groups/{id}"));
    Json(group).into_response()
}

fn diaspora() -> Value {
    json!({
        "id": 15,
        "name": "Diaspora",
        "path": "diaspora",
        "path_with_namespace": "mike/diaspora",
        "description": "A social network",
        "default_branch": "main",
        "visibility": "private",
        "web_url": "http://gitlab.example.com/mike/diaspora",
    })
}

async fn project(Path(id): Path<String>) -> Response {
    if id == "15" || id == "mike/diaspora" {
        Json(diaspora()).into_response()
    } else {
        not_found("Project")
    }
}

async fn list_projects(uri: Uri) -> Response {
    let query = pairs(uri.query().unwrap_or_default());
    let mut headers = HeaderMap::new();
    if let Some(per_page) = value_of(&query, "per_page") {
        headers.insert("x-per-page", per_page.parse().unwrap());
    }
    let projects = if value_of(&query, "owned") == Some("true") {
        json!([diaspora()])
    } else {
        json!([])
    };
    (headers, Json(projects)).into_response()
}

async fn create_project(body: String) -> Response {
    let form = pairs(&body);
    let Some(name) = value_of(&form, "name") else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": { "name": ["can't be blank"] } })),
        )
            .into_response();
    };
    let path = value_of(&form, "path").map_or_else(|| name.to_lowercase(), str::to_owned);

    (
        StatusCode::CREATED,
        Json(json!({
            "id": 16,
            "name": name,
            "path": path,
            "path_with_namespace": format!("john_smith/{path}"),
            "description": value_of(&form, "description"),
            "default_branch": null,
            "visibility": value_of(&form, "visibility").unwrap_or("private"),
            "web_url": format!("http://gitlab.example.com/john_smith/{path}"),
        })),
    )
        .into_response()
}

async fn update_project(Path(id): Path<String>, uri: Uri) -> Response {
    if id != "15" {
        return not_found("Project");
    }
    let mut project = diaspora();
    for (name, value) in pairs(uri.query().unwrap_or_default()) {
        project[name] = json!(value);
    }
    Json(project).into_response()
}

async fn delete_project(Path(id): Path<String>) -> Response {
    if id == "15" {
        (
            StatusCode::ACCEPTED,
            Json(json!({ "message": "202 Accepted" })),
        )
            .into_response()
    } else {
        not_found("Project")
    }
}

fn token_json(id: u64, name: &str, scopes: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "active": true,
        "revoked": false,
        "access_level": 40,
        "scopes": scopes,
        "expires_at": "2025-06-28",
    })
}

async fn list_tokens(Path(id): Path<String>) -> Response {
    if id != "15" {
        return not_found("Project");
    }
    Json(json!([
        token_json(42, "ci", &["api"]),
        token_json(43, "deploy", &["read_repository", "read_registry"]),
    ]))
    .into_response()
}

async fn create_token(Path(id): Path<String>, body: String) -> Response {
    if id != "15" {
        return not_found("Project");
    }
    let form = pairs(&body);
    let scopes: Vec<&str> = form
        .iter()
        .filter(|&(key, _)| key == "scopes[]")
        .map(|(_, value)| value.as_str())
        .collect();
    let access_level: u8 = value_of(&form, "access_level")
        .map_or(40, |level| level.parse().unwrap());

    let mut token = token_json(44, value_of(&form, "name").unwrap_or_default(), &scopes);
    token["access_level"] = json!(access_level);
    token["expires_at"] = json!(value_of(&form, "expires_at"));
    token["token"] = json!("glpat-mock");
    (StatusCode::CREATED, Json(token)).into_response()
}

async fn revoke_token(Path((id, token_id)): Path<(String, u64)>) -> Response {
    if id == "15" && token_id == 42 {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("Token")
    }
}
