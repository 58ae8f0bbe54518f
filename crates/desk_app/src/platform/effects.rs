use std::sync::{mpsc, Arc};
use std::thread;

use desk_client::{
    ApiError, ClientError, ClientEvent, ClientHandle, ClientSettings, EventSink, StreamLog,
    UploadFile,
};
use desk_core::{
    Answer, Effect, LogEntry, Msg, PendingFile, PollTicket, RequestFailure, SessionSnapshot,
    UploadReceipt,
};
use desk_logging::{desk_debug, desk_info, desk_warn};

use super::app::AppEvent;
use super::ui::UiCommand;

/// Executes core effects: backend calls go to the client, surface-only
/// effects come back as UI commands for the caller to apply.
pub struct EffectRunner {
    client: ClientHandle,
    events: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        events: mpsc::Sender<AppEvent>,
    ) -> Result<Self, ClientError> {
        let sink = Arc::new(MsgSink {
            events: events.clone(),
        });
        let client = ClientHandle::new(settings, sink)?;
        Ok(Self { client, events })
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        for effect in effects {
            match effect {
                Effect::ScrollToTop => commands.push(UiCommand::ScrollToTop),
                Effect::ScrollResultIntoView { delay } => {
                    let events = self.events.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = events.send(AppEvent::Ui(UiCommand::ScrollReportIntoView));
                    });
                }
                Effect::StartResearch { topic, ticket } => {
                    desk_info!(
                        "StartResearch ticket={} topic_len={} topic={}",
                        ticket.0,
                        topic.len(),
                        topic
                    );
                    self.client.start_research(topic, ticket.0);
                }
                Effect::StartPolling { task_id, ticket } => {
                    desk_info!("StartPolling task_id={} ticket={}", task_id, ticket.0);
                    self.client.start_polling(task_id, ticket.0);
                }
                Effect::StopPolling => {
                    if self.client.stop_polling() {
                        desk_debug!("Poll timer stopped");
                    }
                }
                Effect::FetchResult { task_id } => {
                    desk_info!("FetchResult task_id={}", task_id);
                    self.client.fetch_result(task_id);
                }
                Effect::UploadDocuments { files, session_id } => {
                    desk_info!(
                        "UploadDocuments files={} session={}",
                        files.len(),
                        session_id.as_deref().unwrap_or("<new>")
                    );
                    self.client
                        .upload_documents(files.into_iter().map(upload_file).collect(), session_id);
                }
                Effect::ConfirmDeleteSession { prompt } => {
                    commands.push(UiCommand::Confirm(prompt));
                }
                Effect::DeleteSession { session_id } => {
                    desk_info!("DeleteSession session={}", session_id);
                    self.client.delete_session(session_id);
                }
                Effect::FetchSessionInfo { session_id } => {
                    self.client.session_info(session_id);
                }
                Effect::AskQuestion {
                    session_id,
                    question,
                } => {
                    desk_info!("AskQuestion session={} question_len={}", session_id, question.len());
                    self.client.ask_question(session_id, question);
                }
                Effect::Notify(message) => commands.push(UiCommand::Notify(message)),
            }
        }
        commands
    }
}

struct MsgSink {
    events: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(AppEvent::Core(map_event(event)));
    }
}

fn upload_file(file: PendingFile) -> UploadFile {
    UploadFile {
        name: file.name,
        path: file.path,
    }
}

pub(crate) fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::ResearchStarted { ticket, result } => Msg::ResearchStarted {
            ticket: PollTicket(ticket),
            result: result
                .map(|response| response.task_id)
                .map_err(|err| failure("start research", err)),
        },
        // Poll failures are already logged by the poller.
        ClientEvent::LogsPolled { ticket, result } => Msg::LogsPolled {
            ticket: PollTicket(ticket),
            result: result
                .map(|logs| logs.into_iter().map(log_entry).collect())
                .map_err(|err| RequestFailure::new(err.detail)),
        },
        ClientEvent::ResultFetched { task_id, result } => {
            let result = result
                .map(|report| report.content_html)
                .map_err(|err| failure("fetch result", err));
            Msg::ResultFetched { task_id, result }
        }
        ClientEvent::Uploaded(result) => Msg::UploadFinished(
            result
                .map(|response| UploadReceipt {
                    session_id: response.session_id,
                    message: response.message,
                    total_documents: response.total_documents,
                    files_uploaded: response.files_uploaded,
                })
                .map_err(|err| failure("upload", err)),
        ),
        ClientEvent::SessionDeleted { session_id, result } => Msg::SessionDeleted {
            session_id,
            result: result.map_err(|err| failure("delete session", err)),
        },
        ClientEvent::SessionInfo { session_id, result } => Msg::SessionInfoFetched {
            session_id,
            result: result
                .map(|info| SessionSnapshot {
                    session_id: info.session_id,
                    document_count: info.document_count,
                    documents: info.documents,
                })
                .map_err(|err| failure("session info", err)),
        },
        ClientEvent::Answered { question, result } => Msg::AnswerReceived {
            question,
            result: result
                .map(|response| Answer {
                    answer: response.answer,
                    sources: response.sources,
                })
                .map_err(|err| failure("ask", err)),
        },
    }
}

fn log_entry(log: StreamLog) -> LogEntry {
    LogEntry {
        step: log.step,
        details: log.details,
        status: log.status,
    }
}

fn failure(call: &str, err: ApiError) -> RequestFailure {
    desk_warn!("Request '{}' failed: {}", call, err);
    RequestFailure::new(err.detail)
}
