use desk_logging::{desk_debug, desk_info};

use crate::navigation::{show_page, show_section};
use crate::state::INITIATING_STATUS;
use crate::{
    AppState, Effect, LogEntry, Page, PollTicket, RequestFailure, ResearchPhase, Section, TaskId,
    REPORT_FALLBACK_HTML, RESULT_SCROLL_DELAY,
};

pub(crate) fn submit(state: &mut AppState) -> Vec<Effect> {
    let topic = state.topic.trim().to_string();
    if topic.is_empty() {
        return Vec::new();
    }

    let mut effects = show_page(state, Page::Home);
    state.logs.clear();
    state.report_html = None;
    show_section(state, Section::Progress);
    state.status_label = INITIATING_STATUS.to_string();
    if state.is_polling() {
        effects.push(Effect::StopPolling);
    }
    let ticket = state.allocate_ticket();
    state.research = ResearchPhase::Submitting { ticket };
    state.mark_dirty();

    effects.push(Effect::StartResearch { topic, ticket });
    effects
}

/// Applies the create-job response. Only the latest submission may start polling.
pub(crate) fn started(
    state: &mut AppState,
    ticket: PollTicket,
    result: Result<TaskId, RequestFailure>,
) -> Vec<Effect> {
    if state.research != (ResearchPhase::Submitting { ticket }) {
        desk_debug!("Ignoring create-job response for superseded ticket {}", ticket.0);
        return Vec::new();
    }

    match result {
        Ok(task_id) => {
            desk_info!("Research task {task_id} started, polling with ticket {}", ticket.0);
            state.research = ResearchPhase::Polling {
                task_id: task_id.clone(),
                ticket,
            };
            state.mark_dirty();
            vec![Effect::StartPolling { task_id, ticket }]
        }
        Err(failure) => {
            state.research = ResearchPhase::Idle;
            state.mark_dirty();
            show_section(state, Section::Input);
            vec![Effect::Notify(format!(
                "Error: {}",
                failure.message_or("Failed to start research")
            ))]
        }
    }
}

/// Applies one poll snapshot. The server's list replaces ours wholesale.
pub(crate) fn logs_polled(
    state: &mut AppState,
    ticket: PollTicket,
    result: Result<Vec<LogEntry>, RequestFailure>,
) -> Vec<Effect> {
    let task_id = match &state.research {
        ResearchPhase::Polling {
            task_id,
            ticket: active,
        } if *active == ticket => task_id.clone(),
        _ => {
            desk_debug!("Ignoring stale poll snapshot for ticket {}", ticket.0);
            return Vec::new();
        }
    };

    let logs = match result {
        Ok(logs) => logs,
        Err(failure) => {
            // Keep polling; job completion is the only terminal signal.
            desk_debug!(
                "Polling error for task {task_id}: {}",
                failure.message_or("Failed to fetch progress")
            );
            return Vec::new();
        }
    };

    let completed = logs.last().is_some_and(LogEntry::is_completed);
    if let Some(last) = logs.last() {
        let label = format!("{}...", last.status);
        if state.status_label != label {
            state.status_label = label;
            state.mark_dirty();
        }
    }
    if state.logs != logs {
        state.logs = logs;
        state.mark_dirty();
    }

    if completed {
        desk_info!("Research task {task_id} completed");
        state.research = ResearchPhase::Completed {
            task_id: task_id.clone(),
        };
        state.mark_dirty();
        vec![Effect::StopPolling, Effect::FetchResult { task_id }]
    } else {
        Vec::new()
    }
}

pub(crate) fn result_fetched(
    state: &mut AppState,
    task_id: &str,
    result: Result<Option<String>, RequestFailure>,
) -> Vec<Effect> {
    let current = matches!(
        &state.research,
        ResearchPhase::Completed { task_id: done } if done == task_id
    );
    if !current {
        desk_debug!("Ignoring report for task {task_id}, no longer current");
        return Vec::new();
    }

    match result {
        Ok(content) => {
            let html = content
                .filter(|html| !html.is_empty())
                .unwrap_or_else(|| REPORT_FALLBACK_HTML.to_string());
            state.report_html = Some(html);
            state.mark_dirty();
            show_section(state, Section::Result);
            vec![Effect::ScrollResultIntoView {
                delay: RESULT_SCROLL_DELAY,
            }]
        }
        Err(failure) => vec![Effect::Notify(format!(
            "Failed to load report: {}",
            failure.message_or("Failed to fetch result")
        ))],
    }
}

/// Escape while progress is showing goes back to the input. The poll keeps running.
pub(crate) fn escape(state: &mut AppState) -> Vec<Effect> {
    if state.section == Section::Progress {
        show_section(state, Section::Input);
    }
    Vec::new()
}

pub(crate) fn back_to_input(state: &mut AppState) -> Vec<Effect> {
    if !state.topic.is_empty() {
        state.topic.clear();
        state.mark_dirty();
    }
    if matches!(state.research, ResearchPhase::Completed { .. }) {
        state.research = ResearchPhase::Idle;
    }
    show_section(state, Section::Input);
    show_page(state, Page::Home)
}
