use crate::{documents, navigation, qa, research, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(name) => navigation::navigate(&mut state, &name),
        Msg::HistoryNavigated(name) => navigation::history(&mut state, name.as_deref()),
        Msg::EscapePressed => research::escape(&mut state),
        Msg::FocusTopic => navigation::show_page(&mut state, crate::Page::Home),
        Msg::BackClicked => research::back_to_input(&mut state),

        Msg::TopicChanged(topic) => {
            state.topic = topic;
            Vec::new()
        }
        Msg::ResearchSubmitted => research::submit(&mut state),
        Msg::ResearchStarted { ticket, result } => research::started(&mut state, ticket, result),
        Msg::LogsPolled { ticket, result } => research::logs_polled(&mut state, ticket, result),
        Msg::ResultFetched { task_id, result } => {
            research::result_fetched(&mut state, &task_id, result)
        }

        Msg::FilesPicked(files) => documents::add_files(&mut state, files),
        Msg::DragEntered => documents::set_drop_highlight(&mut state, true),
        Msg::DragLeft => documents::set_drop_highlight(&mut state, false),
        Msg::FilesDropped(files) => {
            documents::set_drop_highlight(&mut state, false);
            documents::add_files(&mut state, files)
        }
        Msg::FileRemoved(index) => documents::remove_file(&mut state, index),
        Msg::UploadSubmitted => documents::submit_upload(&mut state),
        Msg::UploadFinished(result) => documents::upload_finished(&mut state, result),

        Msg::DeleteSessionClicked => documents::request_delete(&mut state),
        Msg::DeleteConfirmed => documents::confirm_delete(&mut state),
        Msg::DeleteCancelled => documents::cancel_delete(&mut state),
        Msg::SessionDeleted { session_id, result } => {
            documents::session_deleted(&mut state, &session_id, result)
        }
        Msg::RefreshSessionClicked => documents::refresh_session(&mut state),
        Msg::SessionInfoFetched { session_id, result } => {
            documents::session_info_fetched(&mut state, &session_id, result)
        }

        Msg::QuestionChanged(question) => {
            state.question = question;
            Vec::new()
        }
        Msg::QuestionSubmitted => qa::submit(&mut state),
        Msg::AnswerReceived { question, result } => qa::answer_received(&mut state, question, result),

        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
