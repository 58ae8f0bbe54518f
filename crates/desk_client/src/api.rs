use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::{QuestionRequest, StartResearchRequest};
use crate::{
    AnswerResponse, ApiError, FailureKind, ResearchReport, ResearchTicket, SessionInfo, StreamLog,
    UploadFile, UploadResponse,
};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Versioned API root, e.g. `http://127.0.0.1:8000/api/v1`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Cadence of the research progress poll.
    pub poll_interval: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/v1".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// The backend endpoints the desk talks to.
#[async_trait::async_trait]
pub trait ResearchApi: Send + Sync {
    async fn start_research(&self, topic: &str) -> Result<ResearchTicket, ApiError>;

    /// Full log snapshot of a job, oldest entry first.
    async fn stream_logs(&self, task_id: &str) -> Result<Vec<StreamLog>, ApiError>;

    async fn fetch_result(&self, task_id: &str) -> Result<ResearchReport, ApiError>;

    /// Uploads `files`; passing a session id adds them to that session.
    async fn upload_documents(
        &self,
        files: &[UploadFile],
        session_id: Option<&str>,
    ) -> Result<UploadResponse, ApiError>;

    async fn delete_session(&self, session_id: &str) -> Result<(), ApiError>;

    async fn session_info(&self, session_id: &str) -> Result<SessionInfo, ApiError>;

    async fn ask_question(
        &self,
        session_id: &str,
        question: &str,
    ) -> Result<AnswerResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    base: Url,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{base} cannot carry a path"),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base, client })
    }

    /// Appends path segments to the API root; ids are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::new(FailureKind::InvalidUrl, "base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ResearchApi for ReqwestApi {
    async fn start_research(&self, topic: &str) -> Result<ResearchTicket, ApiError> {
        let response = self
            .client
            .post(self.endpoint(&["research"])?)
            .json(&StartResearchRequest { topic })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }

    async fn stream_logs(&self, task_id: &str) -> Result<Vec<StreamLog>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["stream", task_id])?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }

    async fn fetch_result(&self, task_id: &str) -> Result<ResearchReport, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["result", task_id])?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }

    async fn upload_documents(
        &self,
        files: &[UploadFile],
        session_id: Option<&str>,
    ) -> Result<UploadResponse, ApiError> {
        let mut form = Form::new();
        for file in files {
            let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
                ApiError::new(
                    FailureKind::Io,
                    format!("reading {}: {err}", file.path.display()),
                )
            })?;
            form = form.part("files", Part::bytes(bytes).file_name(file.name.clone()));
        }
        if let Some(session_id) = session_id {
            form = form.text("session_id", session_id.to_string());
        }

        let response = self
            .client
            .post(self.endpoint(&["documents", "upload"])?)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&["documents", "session", session_id])?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).await.map(|_| ())
    }

    async fn session_info(&self, session_id: &str) -> Result<SessionInfo, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&["documents", "session", session_id])?)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }

    async fn ask_question(
        &self,
        session_id: &str,
        question: &str,
    ) -> Result<AnswerResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoint(&["documents", "qa"])?)
            .json(&QuestionRequest {
                session_id,
                question,
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(map_reqwest_error)
}

/// Turns a non-success response into an error carrying the body's `detail`, if any.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(
        ApiError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
            .with_detail(extract_detail(&body)),
    )
}

/// Only a string `detail` counts; validation errors carry a list there.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .filter(|detail| !detail.is_empty())
        .map(ToOwned::to_owned)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
