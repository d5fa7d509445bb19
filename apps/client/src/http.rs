//! HTTP implementation of the session service collaborators.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ConfigError, FetchError};
use crate::service::{
    NewStudySession, RecordedSession, SessionPersistence, SessionRecorder, StreakSnapshot,
};

/// Talks to the session backend over its JSON API.
#[derive(Clone)]
pub struct HttpSessionService {
    client: Client,
    backend_url: String,
    token: String,
}

impl HttpSessionService {
    /// Create a service client with no request timeout.
    pub fn new(backend_url: String, token: String) -> Self {
        Self {
            client: Client::new(),
            backend_url: backend_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            backend_url: config.backend_url.clone(),
            token: config.token.clone(),
        })
    }

    fn user_url(&self, user_id: Uuid, path: &str) -> String {
        format!("{}/api/users/{}/{}", self.backend_url, user_id, path)
    }
}

#[async_trait]
impl SessionPersistence for HttpSessionService {
    async fn get_streak_and_last_session(
        &self,
        user_id: Uuid,
    ) -> Result<StreakSnapshot, FetchError> {
        let resp = self
            .client
            .get(self.user_url(user_id, "streak"))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| FetchError::ServiceUnavailable(e.to_string()))?;

        parse_json(resp).await
    }
}

#[async_trait]
impl SessionRecorder for HttpSessionService {
    async fn record_session(
        &self,
        user_id: Uuid,
        session: &NewStudySession,
    ) -> Result<RecordedSession, FetchError> {
        let resp = self
            .client
            .post(self.user_url(user_id, "sessions"))
            .bearer_auth(&self.token)
            .json(session)
            .send()
            .await
            .map_err(|e| FetchError::ServiceUnavailable(e.to_string()))?;

        parse_json(resp).await
    }
}

async fn parse_json<T: DeserializeOwned>(resp: Response) -> Result<T, FetchError> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(status_error(status, message));
    }

    resp.json()
        .await
        .map_err(|e| FetchError::Malformed(e.to_string()))
}

fn status_error(status: StatusCode, message: String) -> FetchError {
    match status.as_u16() {
        404 => FetchError::NotFound(message),
        502..=504 => FetchError::ServiceUnavailable(message),
        _ => FetchError::Backend {
            status: status.as_u16(),
            message,
        },
    }
}
