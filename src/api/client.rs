use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use tracing::debug;

use crate::api::{
    ChatReply, ChatRequest, EvaluateRequest, Evaluation, Language, NewSessionResponse,
};
use crate::utils::url::construct_api_url;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Errors returned by [`TutorApi`] calls.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, TLS, ...).
    Transport(reqwest::Error),

    /// Non-success HTTP status without an `{error}` body.
    Status {
        status: u16,
        body: String,
    },

    /// The response body was not the JSON shape we expected.
    Decode(serde_json::Error),

    /// The backend answered with an explicit `{error}` payload.
    Server(String),

    /// The body parsed but a required field was absent.
    MissingField(&'static str),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(source) => write!(f, "Request failed: {source}"),
            ApiError::Status { status, body } => {
                if body.trim().is_empty() {
                    write!(f, "API request failed with status {status}")
                } else {
                    write!(f, "API request failed with status {status}: {body}")
                }
            }
            ApiError::Decode(source) => write!(f, "Invalid response body: {source}"),
            ApiError::Server(message) => write!(f, "Server error: {message}"),
            ApiError::MissingField(field) => write!(f, "Response is missing '{field}'"),
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(source) => Some(source),
            ApiError::Decode(source) => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiError::Transport(value)
    }
}

/// The remote operations the session controller depends on.
#[async_trait]
pub trait TutorApi: Send + Sync {
    async fn list_languages(&self) -> Result<Vec<Language>, ApiError>;

    async fn create_session(&self) -> Result<String, ApiError>;

    /// Returns the tutor's reply text.
    async fn send_chat(&self, request: ChatRequest) -> Result<String, ApiError>;

    async fn evaluate(&self, request: EvaluateRequest) -> Result<Evaluation, ApiError>;

    async fn clear_session(&self, session_id: &str) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// [`TutorApi`] over JSON/HTTP.
#[derive(Clone)]
pub struct HttpTutorApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTutorApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        construct_api_url(&self.base_url, endpoint)
    }

    async fn post_json<B, T>(&self, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let mut request = self
            .client
            .post(url)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        read_json(response).await
    }
}

/// Decode a response, treating an `{error}` body as a failure whatever the
/// HTTP status says.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if let Ok(ErrorBody {
        error: Some(message),
    }) = serde_json::from_str::<ErrorBody>(&body)
    {
        return Err(ApiError::Server(message));
    }

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(ApiError::Decode)
}

#[async_trait]
impl TutorApi for HttpTutorApi {
    async fn list_languages(&self) -> Result<Vec<Language>, ApiError> {
        let url = self.url("languages");
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn create_session(&self) -> Result<String, ApiError> {
        let created: NewSessionResponse = self.post_json::<(), _>("session/new", None).await?;
        Ok(created.session_id)
    }

    async fn send_chat(&self, request: ChatRequest) -> Result<String, ApiError> {
        let reply: ChatReply = self.post_json("chat", Some(&request)).await?;
        reply.response.ok_or(ApiError::MissingField("response"))
    }

    async fn evaluate(&self, request: EvaluateRequest) -> Result<Evaluation, ApiError> {
        self.post_json("evaluate", Some(&request)).await
    }

    async fn clear_session(&self, session_id: &str) -> Result<(), ApiError> {
        let endpoint = format!("session/{session_id}/clear");
        // Any JSON acknowledgement will do; `{error}` is caught by `read_json`.
        let _: IgnoredAny = self.post_json::<(), _>(&endpoint, None).await?;
        Ok(())
    }
}
