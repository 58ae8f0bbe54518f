use crate::{Page, QaExchange, Section, UploadStatus};

pub const ASK_LABEL: &str = "Ask";
pub const ASK_PROCESSING_LABEL: &str = "Processing...";
/// Rendered when a finished job has no report body.
pub const REPORT_FALLBACK_HTML: &str = "<p>Report content not available.</p>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    pub page: Page,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLineView {
    pub label: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFileView {
    pub index: usize,
    pub name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummaryView {
    pub session_id: String,
    pub total_documents: usize,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub page: Page,
    pub nav_links: Vec<NavLinkView>,
    pub section: Section,
    pub topic: String,
    pub status_label: String,
    /// Progress log, newest entry first.
    pub log_lines: Vec<LogLineView>,
    pub report_html: Option<String>,
    pub polling: bool,
    pub pending_files: Vec<PendingFileView>,
    pub upload_enabled: bool,
    pub drop_highlight: bool,
    pub upload_status: UploadStatus,
    pub qa_visible: bool,
    pub session: Option<SessionSummaryView>,
    pub awaiting_delete_confirmation: bool,
    pub question: String,
    /// Q&A history, newest exchange first.
    pub qa_results: Vec<QaExchange>,
    pub ask_enabled: bool,
    pub ask_label: &'static str,
    pub dirty: bool,
}
