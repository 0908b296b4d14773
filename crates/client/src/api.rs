//! Session endpoints as seen from the editor.
//!
//! [`SessionApi`] is the seam the editor talks to; [`HttpSessionApi`] is the
//! production implementation over `/api/v1/sessions` using [`reqwest`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use wellness_core::session::{Session, SessionInput};
use wellness_core::types::SessionId;

use crate::error::ClientError;

#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Upsert as draft.
    async fn save_draft(&self, input: &SessionInput) -> Result<Session, ClientError>;

    /// Upsert as published.
    async fn publish(&self, input: &SessionInput) -> Result<Session, ClientError>;

    /// Fetch one of the caller's own sessions.
    async fn get_owned(&self, id: SessionId) -> Result<Session, ClientError>;
}

/// Body of `save-draft` / `publish` responses.
#[derive(Debug, Deserialize)]
struct SavedBody {
    session: Session,
}

/// Body of `GET /sessions/mine/{id}`.
#[derive(Debug, Deserialize)]
struct SessionBody {
    session: Session,
}

/// Error body produced by the API server.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    details: Vec<String>,
}

/// HTTP client for the session API of one server.
pub struct HttpSessionApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpSessionApi {
    /// * `base_url` - server root, e.g. `http://localhost:3000`.
    /// * `token`    - bearer token sent with every request.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/sessions{path}", self.base_url)
    }

    async fn post_upsert(&self, path: &str, input: &SessionInput) -> Result<Session, ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let body: SavedBody = Self::parse_response(response).await?;
        Ok(body.session)
    }

    // ---- private helpers ----

    /// Map non-2xx statuses onto [`ClientError`], otherwise decode the body.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        match status {
            s if s.is_success() => Ok(response.json::<T>().await?),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            _ => {
                let body = response.json::<ErrorBody>().await.unwrap_or_default();
                Err(ClientError::Rejected {
                    status: status.as_u16(),
                    message: body.error,
                    details: body.details,
                })
            }
        }
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn save_draft(&self, input: &SessionInput) -> Result<Session, ClientError> {
        self.post_upsert("/save-draft", input).await
    }

    async fn publish(&self, input: &SessionInput) -> Result<Session, ClientError> {
        self.post_upsert("/publish", input).await
    }

    async fn get_owned(&self, id: SessionId) -> Result<Session, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/mine/{id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let body: SessionBody = Self::parse_response(response).await?;
        Ok(body.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_without_double_slash() {
        let api = HttpSessionApi::new("http://localhost:3000/", "t");
        assert_eq!(
            api.url("/save-draft"),
            "http://localhost:3000/api/v1/sessions/save-draft"
        );
    }
}
