use std::path::PathBuf;

use crate::view_model::{
    AppViewModel, LogLineView, NavLinkView, PendingFileView, SessionSummaryView, ASK_LABEL,
    ASK_PROCESSING_LABEL,
};

pub type TaskId = String;
pub type SessionId = String;

/// Status value of the last log entry that marks a finished research job.
pub const COMPLETED_STATUS: &str = "Completed";
pub(crate) const INITIATING_STATUS: &str = "Initiating Research...";
pub(crate) const PROCESSING_UPLOAD: &str = "Processing documents...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Documents,
    About,
    HowItWorks,
    Features,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Documents,
        Page::About,
        Page::HowItWorks,
        Page::Features,
    ];

    /// Looks a page up by its navigation target name (`"how-it-works"` etc).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|page| page.name() == name.trim())
    }

    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Documents => "documents",
            Page::About => "about",
            Page::HowItWorks => "how-it-works",
            Page::Features => "features",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Documents => "Documents",
            Page::About => "About",
            Page::HowItWorks => "How It Works",
            Page::Features => "Features",
        }
    }
}

/// Sections of the home page. Exactly one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Input,
    Progress,
    Result,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Input, Section::Progress, Section::Result];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.name() == name.trim())
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Input => "input",
            Section::Progress => "progress",
            Section::Result => "result",
        }
    }
}

/// One entry of a research job's progress log, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogEntry {
    pub step: Option<String>,
    pub details: Option<String>,
    pub status: String,
}

impl LogEntry {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            step: None,
            details: None,
            status: status.into(),
        }
    }

    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.step = Some(step.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Step label; `"INFO"` when the server sent none.
    pub fn label(&self) -> &str {
        self.step
            .as_deref()
            .filter(|step| !step.is_empty())
            .unwrap_or("INFO")
    }

    /// Details text, falling back to the status.
    pub fn message(&self) -> &str {
        self.details
            .as_deref()
            .filter(|details| !details.is_empty())
            .unwrap_or(&self.status)
    }

    pub fn is_completed(&self) -> bool {
        self.status == COMPLETED_STATUS
    }
}

/// Identifies one research submission and the poll timer it installs.
/// Responses and snapshots carrying any other ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PollTicket(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResearchPhase {
    #[default]
    Idle,
    Submitting {
        ticket: PollTicket,
    },
    Polling {
        task_id: TaskId,
        ticket: PollTicket,
    },
    Completed {
        task_id: TaskId,
    },
}

/// A client-picked file waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSession {
    pub session_id: SessionId,
    pub files_uploaded: Vec<String>,
    pub total_documents: usize,
}

impl DocumentSession {
    pub(crate) fn merge_files<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        for name in names {
            if !self.files_uploaded.contains(&name) {
                self.files_uploaded.push(name);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaExchange {
    pub question: String,
    pub answer: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Hidden,
    Processing,
    Success(String),
    Error(String),
}

impl UploadStatus {
    pub fn text(&self) -> Option<&str> {
        match self {
            UploadStatus::Hidden => None,
            UploadStatus::Processing => Some(PROCESSING_UPLOAD),
            UploadStatus::Success(text) | UploadStatus::Error(text) => Some(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) page: Page,
    pub(crate) section: Section,

    pub(crate) topic: String,
    pub(crate) status_label: String,
    pub(crate) logs: Vec<LogEntry>,
    pub(crate) report_html: Option<String>,
    pub(crate) research: ResearchPhase,
    pub(crate) next_ticket: u64,

    pub(crate) pending: Vec<PendingFile>,
    /// Names of the files in the in-flight upload request, if any.
    pub(crate) uploading: Option<Vec<String>>,
    pub(crate) session: Option<DocumentSession>,
    pub(crate) upload_status: UploadStatus,
    pub(crate) drop_highlight: bool,
    pub(crate) confirming_delete: bool,
    pub(crate) deleting: bool,

    pub(crate) question: String,
    pub(crate) qa_results: Vec<QaExchange>,
    pub(crate) asking: bool,

    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn research(&self) -> &ResearchPhase {
        &self.research
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn pending_files(&self) -> &[PendingFile] {
        &self.pending
    }

    pub fn session(&self) -> Option<&DocumentSession> {
        self.session.as_ref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.session_id.as_str())
    }

    /// Q&A history, newest first.
    pub fn qa_results(&self) -> &[QaExchange] {
        &self.qa_results
    }

    pub fn is_polling(&self) -> bool {
        matches!(self.research, ResearchPhase::Polling { .. })
    }

    pub fn is_awaiting_delete_confirmation(&self) -> bool {
        self.confirming_delete
    }

    pub(crate) fn allocate_ticket(&mut self) -> PollTicket {
        self.next_ticket += 1;
        PollTicket(self.next_ticket)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            page: self.page,
            nav_links: Page::ALL
                .into_iter()
                .map(|page| NavLinkView {
                    page,
                    label: page.title(),
                    active: page == self.page,
                })
                .collect(),
            section: self.section,
            topic: self.topic.clone(),
            status_label: self.status_label.clone(),
            log_lines: self
                .logs
                .iter()
                .rev()
                .map(|entry| LogLineView {
                    label: entry.label().to_string(),
                    message: entry.message().to_string(),
                })
                .collect(),
            report_html: self.report_html.clone(),
            polling: self.is_polling(),
            pending_files: self
                .pending
                .iter()
                .enumerate()
                .map(|(index, file)| PendingFileView {
                    index,
                    name: file.name.clone(),
                    size_label: format!("{:.2} KB", file.size as f64 / 1024.0),
                })
                .collect(),
            upload_enabled: !self.pending.is_empty()
                && self.uploading.is_none()
                && !self.deleting
                && !self.confirming_delete,
            drop_highlight: self.drop_highlight,
            upload_status: self.upload_status.clone(),
            qa_visible: self.session.is_some(),
            session: self.session.as_ref().map(|session| SessionSummaryView {
                session_id: session.session_id.clone(),
                total_documents: session.total_documents,
                files: session.files_uploaded.clone(),
            }),
            awaiting_delete_confirmation: self.confirming_delete,
            question: self.question.clone(),
            qa_results: self.qa_results.clone(),
            ask_enabled: !self.asking,
            ask_label: if self.asking {
                ASK_PROCESSING_LABEL
            } else {
                ASK_LABEL
            },
            dirty: self.dirty,
        }
    }
}
