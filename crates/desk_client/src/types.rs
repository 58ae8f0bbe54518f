use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct StartResearchRequest<'a> {
    pub topic: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct QuestionRequest<'a> {
    pub session_id: &'a str,
    pub question: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResearchTicket {
    pub task_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// One progress entry of a research job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamLog {
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResearchReport {
    #[serde(default)]
    pub content_html: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub session_id: String,
    pub message: String,
    pub total_documents: usize,
    #[serde(default)]
    pub files_uploaded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub document_count: usize,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub vector_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// A local file to send with an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
    /// `detail` string from a non-success JSON body.
    pub detail: Option<String>,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Completion of one backend call, delivered through an [`crate::EventSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Create-job response for the submission tagged `ticket`.
    ResearchStarted {
        ticket: u64,
        result: Result<ResearchTicket, ApiError>,
    },
    LogsPolled {
        ticket: u64,
        result: Result<Vec<StreamLog>, ApiError>,
    },
    ResultFetched {
        task_id: String,
        result: Result<ResearchReport, ApiError>,
    },
    Uploaded(Result<UploadResponse, ApiError>),
    SessionDeleted {
        session_id: String,
        result: Result<(), ApiError>,
    },
    SessionInfo {
        session_id: String,
        result: Result<SessionInfo, ApiError>,
    },
    Answered {
        question: String,
        result: Result<AnswerResponse, ApiError>,
    },
}
