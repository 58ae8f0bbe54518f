//! Research desk client: backend HTTP calls, the progress poll timer and report rendering.
mod api;
mod client;
mod poller;
mod report;
mod types;

pub use api::{ClientSettings, ReqwestApi, ResearchApi};
pub use client::{ChannelEventSink, ClientHandle, EventSink};
pub use poller::Poller;
pub use report::{truncate_report, MarkdownReportConverter, ReportConverter, MAX_REPORT_TEXT};
pub use types::{
    AnswerResponse, ApiError, ClientError, ClientEvent, FailureKind, ResearchReport,
    ResearchTicket, SessionInfo, StreamLog, UploadFile, UploadResponse,
};
