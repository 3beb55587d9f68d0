use super::{IssueOracle, LookupError, PullRequestSource};
use crate::models::IssueLookup;
use crate::Result;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Subset of the issue payload the checker needs
#[derive(Debug, Deserialize)]
struct IssueResponse {
    number: u64,
    /// Present only when the issue is a pull request
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PullResponse {
    #[serde(default)]
    body: Option<String>,
}

/// GitHub REST API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a client for `api_url`, authenticating with `token` when given
    pub fn new(api_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("GitHub token contains invalid header characters")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("pullcheck/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GET `path` and decode the JSON body. 404 and 410 map to `not_found`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        not_found: impl FnOnce() -> LookupError,
    ) -> std::result::Result<T, LookupError> {
        let url = format!("{}{}", self.api_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(not_found());
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| LookupError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl IssueOracle for GitHubClient {
    async fn get_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> std::result::Result<IssueLookup, LookupError> {
        let path = format!("/repos/{}/{}/issues/{}", owner, repo, number);
        let issue: IssueResponse = self
            .get_json(&path, || LookupError::NotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
                number,
            })
            .await?;

        Ok(IssueLookup {
            number: issue.number,
            is_pull_request: issue.pull_request.is_some(),
        })
    }
}

#[async_trait]
impl PullRequestSource for GitHubClient {
    async fn pull_request_body(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> std::result::Result<Option<String>, LookupError> {
        let path = format!("/repos/{}/{}/pulls/{}", owner, repo, number);
        let pull: PullResponse = self
            .get_json(&path, || LookupError::NotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
                number,
            })
            .await?;

        Ok(pull.body)
    }
}
