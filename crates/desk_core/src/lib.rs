//! Research desk core: pure state machine and view-model helpers.
//!
//! Two independent flows share the page/section switcher: the research job
//! poller and the document session with its Q&A log. All IO is described as
//! [`Effect`]s and answered with [`Msg`]s.
mod documents;
mod effect;
mod intake;
mod msg;
mod navigation;
mod qa;
mod research;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, RESULT_SCROLL_DELAY};
pub use intake::{is_accepted, ACCEPTED_EXTENSIONS, MAX_FILE_BYTES};
pub use msg::{Answer, Msg, RequestFailure, SessionSnapshot, UploadReceipt};
pub use state::{
    AppState, DocumentSession, LogEntry, Page, PendingFile, PollTicket, QaExchange, ResearchPhase,
    Section, SessionId, TaskId, UploadStatus, COMPLETED_STATUS,
};
pub use update::update;
pub use view_model::{
    AppViewModel, LogLineView, NavLinkView, PendingFileView, SessionSummaryView, ASK_LABEL,
    ASK_PROCESSING_LABEL, REPORT_FALLBACK_HTML,
};
