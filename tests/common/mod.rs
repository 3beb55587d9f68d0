//! Local stand-in for the GitHub REST API

use axum::extract::{Path, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "test-token";

/// Issue lookups the stub has served, as `owner/repo#number`
#[derive(Clone, Default)]
pub struct Calls(Arc<Mutex<Vec<String>>>);

impl Calls {
    pub fn list(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Issues of the stub:
/// - `#1` and `other/tools#9` are issues
/// - `#2` is a pull request
/// - `#3` was deleted (410)
/// - `#4` fails with 500
/// - `#5` returns a body that is not JSON
/// - everything else is 404
async fn issue(
    State(calls): State<Calls>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
) -> Response {
    calls.0.lock().unwrap().push(format!("{}/{}#{}", owner, repo, number));

    match (owner.as_str(), repo.as_str(), number) {
        (_, _, 1) | ("other", "tools", 9) => {
            Json(json!({ "number": number, "title": "Something is broken" })).into_response()
        }
        (_, _, 2) => Json(json!({
            "number": 2,
            "pull_request": { "url": format!("https://api.github.com/repos/{}/{}/pulls/2", owner, repo) }
        }))
        .into_response(),
        (_, _, 3) => StatusCode::GONE.into_response(),
        (_, _, 4) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        (_, _, 5) => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response(),
    }
}

/// Pull requests of the stub:
/// - `#10` has a valid description
/// - `#11` has no description
/// - `#12` references an issue whose lookup fails
async fn pull(Path((_owner, _repo, number)): Path<(String, String, u64)>) -> Response {
    let body = match number {
        10 => json!("## Related Issue\n\n#2 #1\n\n## Motivation\n\nStop leaking file handles on reload."),
        11 => json!(null),
        12 => json!("## Related Issue\n\n#4\n\n## Motivation\n\nStop leaking file handles on reload."),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    Json(json!({ "number": number, "body": body })).into_response()
}

/// Same as `issue` but requires the bearer token
async fn private_issue(
    state: State<Calls>,
    headers: HeaderMap,
    path: Path<(String, String, u64)>,
) -> Response {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get(AUTHORIZATION) {
        Some(value) if value.as_bytes() == expected.as_bytes() => issue(state, path).await,
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

/// Start the stub on an ephemeral port; returns its base URL and call log
pub async fn spawn_github() -> (String, Calls) {
    let calls = Calls::default();
    let app = Router::new()
        .route("/repos/:owner/:repo/issues/:number", get(issue))
        .route("/repos/:owner/:repo/pulls/:number", get(pull))
        .route("/private/repos/:owner/:repo/issues/:number", get(private_issue))
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), calls)
}
