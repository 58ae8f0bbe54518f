#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TextId {
    ResearchStatus,
    Report,
    UploadStatus,
    SessionSummary,
    AskButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListId {
    ProgressLog,
    PendingFiles,
    QaResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ControlId {
    UploadButton,
    AskButton,
    DropZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PanelId {
    QaSection,
    UploadStatus,
    SessionInfo,
}

pub const PROMPT: &str = "desk> ";
