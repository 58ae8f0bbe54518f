use std::time::Duration;

use crate::{PendingFile, PollTicket, SessionId, TaskId};

/// Pause before scrolling a freshly rendered report into view, so layout can settle.
pub const RESULT_SCROLL_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScrollToTop,
    ScrollResultIntoView {
        delay: Duration,
    },
    StartResearch {
        topic: String,
        ticket: PollTicket,
    },
    /// Install the poll timer for `task_id`, replacing any running one.
    StartPolling {
        task_id: TaskId,
        ticket: PollTicket,
    },
    /// Cancel the poll timer. Safe when none is running.
    StopPolling,
    FetchResult {
        task_id: TaskId,
    },
    UploadDocuments {
        files: Vec<PendingFile>,
        session_id: Option<SessionId>,
    },
    ConfirmDeleteSession {
        prompt: String,
    },
    DeleteSession {
        session_id: SessionId,
    },
    FetchSessionInfo {
        session_id: SessionId,
    },
    AskQuestion {
        session_id: SessionId,
        question: String,
    },
    /// Blocking user-facing notice.
    Notify(String),
}
