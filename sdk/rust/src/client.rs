use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// A problem with its work notes, as returned by `GET /api/problem/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetail {
    pub problem: Value,
    #[serde(rename = "workNotes")]
    pub work_notes: Value,
}

#[derive(Debug, Deserialize)]
struct Message {
    message: String,
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),

    #[error("gateway returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl SdkError {
    /// Status code the gateway answered with, if it answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SdkError::Status { status, .. } => Some(*status),
            SdkError::Http(e) => e.status(),
            SdkError::InvalidUrl(_) => None,
        }
    }
}

pub struct ProblemClient {
    client: Client,
    base_url: String,
}

impl ProblemClient {
    /// `base_url` is the gateway root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_problems(&self) -> Result<Value, SdkError> {
        let resp = self.client.get(self.url("/api/problems")).send().await?;
        decode(resp).await
    }

    pub async fn get_problem(&self, id: &str) -> Result<ProblemDetail, SdkError> {
        let resp = self
            .client
            .get(self.record_url(id)?)
            .send()
            .await?;
        decode(resp).await
    }

    /// Only `short_description`, `description` and `priority` are kept by the gateway.
    pub async fn create_problem<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value, SdkError> {
        let resp = self
            .client
            .post(self.url("/api/problem"))
            .json(body)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn update_problem<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<Value, SdkError> {
        let resp = self
            .client
            .put(self.record_url(id)?)
            .json(body)
            .send()
            .await?;
        decode(resp).await
    }

    /// Returns the gateway's confirmation message.
    pub async fn delete_problem(&self, id: &str) -> Result<String, SdkError> {
        let resp = self
            .client
            .delete(self.record_url(id)?)
            .send()
            .await?;
        let message: Message = decode(resp).await?;
        Ok(message.message)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/api/problem/{id}` with the id encoded as one path segment.
    fn record_url(&self, id: &str) -> Result<Url, SdkError> {
        let mut url = Url::parse(&self.url("/api/problem"))
            .map_err(|e| SdkError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SdkError::InvalidUrl(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }
}

async fn decode<T: for<'de> Deserialize<'de>>(resp: Response) -> Result<T, SdkError> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Message>(&text)
            .map(|m| m.message)
            .unwrap_or(text);
        return Err(SdkError::Status { status, message });
    }
    Ok(resp.json().await?)
}
