//! X API v2 client used by the post tool.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::credentials::XCredentials;
use crate::provider::http::shared_client;

use super::oauth::{authorization_header, Nonce};
use super::post::{PostError, PostOutcome, PostPublisher};

const BASE_URL: &str = "https://api.twitter.com";

/// Publishes posts through `POST /2/tweets` with OAuth 1.0a user auth.
pub struct XApiClient {
    credentials: XCredentials,
    base_url: String,
}

impl XApiClient {
    pub fn new(credentials: XCredentials, base_url: Option<String>) -> Self {
        Self {
            credentials,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| BASE_URL.to_string()),
        }
    }

    fn tweets_url(&self) -> String {
        format!("{}/2/tweets", self.base_url)
    }
}

#[derive(Deserialize)]
struct CreateTweetResponse {
    data: Option<TweetData>,
}

#[derive(Deserialize)]
struct TweetData {
    id: Option<String>,
    text: Option<String>,
}

/// Problem body returned by the X API on failure.
#[derive(Debug, Deserialize)]
struct ApiProblem {
    detail: Option<String>,
    status: Option<u16>,
    title: Option<String>,
}

fn map_api_failure(http_status: u16, body: &str) -> PostError {
    let problem = serde_json::from_str::<ApiProblem>(body).ok();
    let Some(ApiProblem {
        detail: Some(detail),
        status,
        title,
    }) = problem
    else {
        error!(status = http_status, body, "X API error without detail");
        return PostError::Failed(format!("HTTP {http_status}"));
    };

    let status = status.unwrap_or(http_status);
    error!(status, ?title, %detail, "X API error");
    match status {
        403 => PostError::Authentication,
        429 => PostError::RateLimited,
        _ => PostError::Rejected(detail),
    }
}

#[async_trait]
impl PostPublisher for XApiClient {
    async fn publish(&self, text: &str) -> Result<PostOutcome, PostError> {
        let url = self.tweets_url();
        let header = authorization_header(&self.credentials, "POST", &url, &[], &Nonce::fresh())
            .map_err(|e| PostError::Failed(e.to_string()))?;

        debug!(url = %url, "creating tweet");
        let resp = shared_client()
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, header)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .map_err(|e| PostError::Failed(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| PostError::Failed(e.to_string()))?;
        if !status.is_success() {
            return Err(map_api_failure(status.as_u16(), &body));
        }

        let data = serde_json::from_str::<CreateTweetResponse>(&body)
            .ok()
            .and_then(|resp| resp.data);
        match data {
            Some(TweetData {
                id,
                text: Some(text),
            }) => Ok(PostOutcome { id, text }),
            _ => Err(PostError::Failed("No response data".into())),
        }
    }
}
