use desk_client::ReportConverter;
use desk_core::{
    AppViewModel, LogLineView, PendingFileView, QaExchange, SessionSummaryView, UploadStatus,
};

use super::constants::{ControlId, ListId, PanelId, TextId};
use super::{Severity, UiCommand};

#[allow(clippy::vec_init_then_push)]
pub fn render(view: &AppViewModel, converter: &dyn ReportConverter) -> Vec<UiCommand> {
    let mut cmds = Vec::new();

    cmds.push(UiCommand::ShowPage {
        page: view.page,
        nav: view.nav_links.clone(),
    });
    cmds.push(UiCommand::ShowSection(view.section));

    cmds.push(UiCommand::SetText {
        target: TextId::ResearchStatus,
        text: status_line(view),
        severity: Severity::Information,
    });
    cmds.push(UiCommand::SetList {
        list: ListId::ProgressLog,
        items: view.log_lines.iter().map(format_log_line).collect(),
    });
    cmds.push(UiCommand::SetText {
        target: TextId::Report,
        text: view
            .report_html
            .as_deref()
            .map(|html| converter.to_text(html))
            .unwrap_or_default(),
        severity: Severity::Information,
    });

    cmds.push(UiCommand::SetList {
        list: ListId::PendingFiles,
        items: view.pending_files.iter().map(format_pending_file).collect(),
    });
    cmds.push(UiCommand::SetEnabled {
        control: ControlId::UploadButton,
        enabled: view.upload_enabled,
    });
    cmds.push(UiCommand::SetHighlight {
        control: ControlId::DropZone,
        highlighted: view.drop_highlight,
    });

    let (upload_text, upload_severity) = upload_status_line(&view.upload_status);
    cmds.push(UiCommand::SetVisible {
        panel: PanelId::UploadStatus,
        visible: upload_text.is_some(),
    });
    cmds.push(UiCommand::SetText {
        target: TextId::UploadStatus,
        text: upload_text.unwrap_or_default(),
        severity: upload_severity,
    });

    cmds.push(UiCommand::SetVisible {
        panel: PanelId::SessionInfo,
        visible: view.session.is_some(),
    });
    cmds.push(UiCommand::SetText {
        target: TextId::SessionSummary,
        text: view.session.as_ref().map(format_session).unwrap_or_default(),
        severity: Severity::Information,
    });

    cmds.push(UiCommand::SetVisible {
        panel: PanelId::QaSection,
        visible: view.qa_visible,
    });
    cmds.push(UiCommand::SetList {
        list: ListId::QaResults,
        items: view.qa_results.iter().map(format_exchange).collect(),
    });
    cmds.push(UiCommand::SetEnabled {
        control: ControlId::AskButton,
        enabled: view.ask_enabled,
    });
    cmds.push(UiCommand::SetText {
        target: TextId::AskButton,
        text: view.ask_label.to_string(),
        severity: Severity::Information,
    });

    cmds
}

fn format_log_line(line: &LogLineView) -> String {
    format!("[{}] {}", line.label, line.message)
}

/// Numbered from 1 to match the `rm <n>` command.
fn format_pending_file(file: &PendingFileView) -> String {
    format!("{}. {} ({})", file.index + 1, file.name, file.size_label)
}

fn upload_status_line(status: &UploadStatus) -> (Option<String>, Severity) {
    let severity = match status {
        UploadStatus::Success(_) => Severity::Success,
        UploadStatus::Error(_) => Severity::Error,
        UploadStatus::Hidden | UploadStatus::Processing => Severity::Information,
    };
    (status.text().map(str::to_string), severity)
}

fn format_session(session: &SessionSummaryView) -> String {
    format!(
        "Session ID: {} | Documents: {} | Files: {}",
        session.session_id,
        session.total_documents,
        session.files.join(", ")
    )
}

fn format_exchange(exchange: &QaExchange) -> String {
    let mut text = format!("Q: {}\nA: {}", exchange.question, exchange.answer);
    if !exchange.sources.is_empty() {
        text.push_str("\nSources: ");
        text.push_str(&exchange.sources.join(", "));
    }
    text
}

/// Appends a marker while the poll timer is live.
fn status_line(view: &AppViewModel) -> String {
    if view.polling && !view.status_label.is_empty() {
        format!("{} [polling]", view.status_label)
    } else {
        view.status_label.clone()
    }
}
