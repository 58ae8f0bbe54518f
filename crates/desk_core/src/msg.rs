use crate::{LogEntry, PendingFile, PollTicket, SessionId, TaskId};

/// A failed backend request, reduced to what the user may see.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestFailure {
    /// Server-supplied `detail` text, when the error body carried one.
    pub detail: Option<String>,
}

impl RequestFailure {
    pub fn new(detail: Option<String>) -> Self {
        Self { detail }
    }

    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    /// The server detail, or `fallback` when there is none.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.detail
            .as_deref()
            .filter(|detail| !detail.is_empty())
            .unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub session_id: SessionId,
    pub message: String,
    pub total_documents: usize,
    pub files_uploaded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub document_count: usize,
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub answer: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a navigation link by its target name.
    Navigate(String),
    /// Browser-style history navigation; `None` means the entry carried no page.
    HistoryNavigated(Option<String>),
    /// Escape key.
    EscapePressed,
    /// Focus-topic shortcut.
    FocusTopic,
    /// "New research" button on the result section.
    BackClicked,

    /// User edited the topic input.
    TopicChanged(String),
    /// User submitted the research form.
    ResearchSubmitted,
    /// Backend answered the create-job request sent under `ticket`.
    ResearchStarted {
        ticket: PollTicket,
        result: Result<TaskId, RequestFailure>,
    },
    /// One poll tick finished.
    LogsPolled {
        ticket: PollTicket,
        result: Result<Vec<LogEntry>, RequestFailure>,
    },
    /// Final report arrived; `None` content means the server sent no body.
    ResultFetched {
        task_id: TaskId,
        result: Result<Option<String>, RequestFailure>,
    },

    /// Files chosen through the file picker.
    FilesPicked(Vec<PendingFile>),
    DragEntered,
    DragLeft,
    /// Files dropped on the drop zone.
    FilesDropped(Vec<PendingFile>),
    /// Remove the pending file at this position.
    FileRemoved(usize),
    UploadSubmitted,
    UploadFinished(Result<UploadReceipt, RequestFailure>),

    DeleteSessionClicked,
    DeleteConfirmed,
    DeleteCancelled,
    SessionDeleted {
        session_id: SessionId,
        result: Result<(), RequestFailure>,
    },
    RefreshSessionClicked,
    SessionInfoFetched {
        session_id: SessionId,
        result: Result<SessionSnapshot, RequestFailure>,
    },

    /// User edited the question input.
    QuestionChanged(String),
    QuestionSubmitted,
    AnswerReceived {
        question: String,
        result: Result<Answer, RequestFailure>,
    },

    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
