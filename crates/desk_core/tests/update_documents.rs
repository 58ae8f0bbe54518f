use std::sync::Once;

use desk_core::{
    update, AppState, Effect, Msg, PendingFile, RequestFailure, SessionSnapshot, UploadReceipt,
    UploadStatus, MAX_FILE_BYTES,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(desk_logging::initialize_for_tests);
}

fn file(name: &str, size: u64) -> PendingFile {
    PendingFile::new(name, size, format!("/tmp/{name}"))
}

fn pending_names(state: &AppState) -> Vec<String> {
    state
        .pending_files()
        .iter()
        .map(|file| file.name.clone())
        .collect()
}

fn receipt(session_id: &str, files: &[&str], total: usize) -> UploadReceipt {
    UploadReceipt {
        session_id: session_id.to_string(),
        message: format!("Successfully uploaded {} document(s)", files.len()),
        total_documents: total,
        files_uploaded: files.iter().map(|name| name.to_string()).collect(),
    }
}

/// Picks `files`, uploads them and lets the server answer with `session_id`.
fn with_session(session_id: &str, files: &[&str]) -> AppState {
    let picked = files.iter().map(|name| file(name, 1024)).collect();
    let (state, _) = update(AppState::new(), Msg::FilesPicked(picked));
    let (state, _) = update(state, Msg::UploadSubmitted);
    let (state, _) = update(
        state,
        Msg::UploadFinished(Ok(receipt(session_id, files, files.len()))),
    );
    state
}

#[test]
fn intake_keeps_only_small_supported_files() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::FilesPicked(vec![
            file("big.pdf", 12 * 1024 * 1024),
            file("notes.txt", 1024),
            file("tool.exe", 1024),
        ]),
    );

    assert!(effects.is_empty());
    assert_eq!(pending_names(&state), vec!["notes.txt"]);
    assert!(state.view().upload_enabled);
}

#[test]
fn intake_dedupes_by_name() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesPicked(vec![file("a.pdf", 10), file("a.pdf", 20)]),
    );
    assert_eq!(pending_names(&state), vec!["a.pdf"]);

    let (state, _) = update(state, Msg::FilesDropped(vec![file("a.pdf", 30), file("b.md", 5)]));
    assert_eq!(pending_names(&state), vec!["a.pdf", "b.md"]);
    assert_eq!(state.pending_files()[0].size, 10);
}

#[test]
fn drop_clears_highlight_and_queues() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DragEntered);
    let (state, _) = update(state, Msg::FilesDropped(vec![file("paper.PDF", MAX_FILE_BYTES)]));

    let view = state.view();
    assert!(!view.drop_highlight);
    assert_eq!(view.pending_files.len(), 1);
    assert_eq!(view.pending_files[0].size_label, "10240.00 KB");
}

#[test]
fn remove_file_updates_list_and_button() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesPicked(vec![file("a.txt", 1), file("b.txt", 2)]),
    );
    let (state, _) = update(state, Msg::FileRemoved(0));
    assert_eq!(pending_names(&state), vec!["b.txt"]);

    let (state, _) = update(state, Msg::FileRemoved(7));
    assert_eq!(pending_names(&state), vec!["b.txt"]);

    let (state, _) = update(state, Msg::FileRemoved(0));
    assert!(state.pending_files().is_empty());
    assert!(!state.view().upload_enabled);
}

#[test]
fn upload_without_pending_files_is_noop() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::UploadSubmitted);

    assert!(effects.is_empty());
    assert_eq!(state.view().upload_status, UploadStatus::Hidden);
    assert!(!state.consume_dirty());
}

#[test]
fn upload_success_opens_session_and_clears_queue() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesPicked(vec![file("a.pdf", 100), file("b.txt", 100)]),
    );
    let (state, effects) = update(state, Msg::UploadSubmitted);

    assert_eq!(
        effects,
        vec![Effect::UploadDocuments {
            files: vec![file("a.pdf", 100), file("b.txt", 100)],
            session_id: None,
        }]
    );
    let view = state.view();
    assert_eq!(view.upload_status, UploadStatus::Processing);
    assert!(!view.upload_enabled);
    assert!(!view.qa_visible);

    let (state, effects) = update(
        state,
        Msg::UploadFinished(Ok(receipt("sess-1", &["a.pdf", "b.txt"], 2))),
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.qa_visible);
    assert!(view.pending_files.is_empty());
    assert_eq!(
        view.upload_status,
        UploadStatus::Success(
            "Success: Successfully uploaded 2 document(s). 2 document(s) ready for questions."
                .to_string()
        )
    );
    let session = view.session.expect("session summary");
    assert_eq!(session.session_id, "sess-1");
    assert_eq!(session.total_documents, 2);
    assert_eq!(session.files, vec!["a.pdf", "b.txt"]);
}

#[test]
fn later_uploads_reuse_the_session() {
    init_logging();
    let state = with_session("sess-1", &["a.pdf"]);
    let (state, _) = update(state, Msg::FilesPicked(vec![file("c.md", 10)]));
    let (state, effects) = update(state, Msg::UploadSubmitted);

    assert_eq!(
        effects,
        vec![Effect::UploadDocuments {
            files: vec![file("c.md", 10)],
            session_id: Some("sess-1".to_string()),
        }]
    );

    let (state, _) = update(
        state,
        Msg::UploadFinished(Ok(receipt("sess-1", &["c.md"], 2))),
    );
    let session = state.view().session.expect("session summary");
    assert_eq!(session.total_documents, 2);
    assert_eq!(session.files, vec!["a.pdf", "c.md"]);
}

#[test]
fn upload_failure_keeps_pending_files() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilesPicked(vec![file("a.pdf", 100)]));
    let (state, _) = update(state, Msg::UploadSubmitted);
    let (state, _) = update(
        state,
        Msg::UploadFinished(Err(RequestFailure::with_detail("Upload failed: disk full"))),
    );

    let view = state.view();
    assert_eq!(pending_names(&state), vec!["a.pdf"]);
    assert!(view.upload_enabled);
    assert!(!view.qa_visible);
    assert_eq!(
        view.upload_status,
        UploadStatus::Error("Error: Upload failed: disk full".to_string())
    );

    let (state, _) = update(state, Msg::UploadSubmitted);
    let (state, _) = update(state, Msg::UploadFinished(Err(RequestFailure::default())));
    assert_eq!(
        state.view().upload_status,
        UploadStatus::Error("Error: Upload failed".to_string())
    );
}

#[test]
fn files_added_during_upload_stay_queued() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::FilesPicked(vec![file("a.pdf", 100)]));
    let (state, _) = update(state, Msg::UploadSubmitted);
    let (state, effects) = update(state, Msg::UploadSubmitted);
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::FilesPicked(vec![file("late.txt", 5)]));
    let (state, _) = update(
        state,
        Msg::UploadFinished(Ok(receipt("sess-1", &["a.pdf"], 1))),
    );
    assert_eq!(pending_names(&state), vec!["late.txt"]);
}

#[test]
fn delete_without_session_only_notifies() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::DeleteSessionClicked);

    assert_eq!(effects, vec![Effect::Notify("No session to delete".to_string())]);
    assert!(!state.is_awaiting_delete_confirmation());
}

#[test]
fn delete_requires_confirmation() {
    init_logging();
    let state = with_session("sess-1", &["a.pdf"]);
    let (state, effects) = update(state, Msg::DeleteSessionClicked);

    assert!(matches!(
        effects.as_slice(),
        [Effect::ConfirmDeleteSession { prompt }] if prompt.contains("cannot be undone")
    ));
    assert!(state.view().awaiting_delete_confirmation);

    let (state, effects) = update(state, Msg::DeleteCancelled);
    assert!(effects.is_empty());
    assert_eq!(state.session_id(), Some("sess-1"));
    assert!(!state.is_awaiting_delete_confirmation());

    // A stray confirmation without a pending prompt does nothing.
    let (state, effects) = update(state, Msg::DeleteConfirmed);
    assert!(effects.is_empty());
    assert_eq!(state.session_id(), Some("sess-1"));
}

#[test]
fn delete_waits_for_upload_in_flight() {
    init_logging();
    let state = with_session("sess-1", &["a.pdf"]);
    let (state, _) = update(state, Msg::FilesPicked(vec![file("b.pdf", 1024)]));
    let (state, effects) = update(state, Msg::UploadSubmitted);
    assert_eq!(effects.len(), 1);

    let (state, effects) = update(state, Msg::DeleteSessionClicked);
    assert_eq!(
        effects,
        vec![Effect::Notify(
            "Please wait for the current upload to finish before deleting the session"
                .to_string()
        )]
    );
    assert!(!state.is_awaiting_delete_confirmation());
    let (state, effects) = update(state, Msg::DeleteConfirmed);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::UploadFinished(Ok(receipt("sess-1", &["b.pdf"], 2))),
    );
    assert_eq!(state.session_id(), Some("sess-1"));
    assert_eq!(
        state.view().session.map(|session| session.total_documents),
        Some(2)
    );

    // Once the upload settled the delete goes through the usual prompt.
    let (state, effects) = update(state, Msg::DeleteSessionClicked);
    assert!(matches!(
        effects.as_slice(),
        [Effect::ConfirmDeleteSession { .. }]
    ));
    assert!(state.is_awaiting_delete_confirmation());
}

#[test]
fn upload_is_held_while_delete_is_pending() {
    init_logging();
    let state = with_session("sess-1", &["a.pdf"]);
    let (state, _) = update(state, Msg::FilesPicked(vec![file("b.pdf", 1024)]));
    let (state, _) = update(state, Msg::DeleteSessionClicked);
    assert!(!state.view().upload_enabled);

    let (state, effects) = update(state, Msg::UploadSubmitted);
    assert!(effects.is_empty());
    assert_eq!(pending_names(&state), vec!["b.pdf"]);

    let (state, effects) = update(state, Msg::DeleteConfirmed);
    assert!(matches!(effects.as_slice(), [Effect::DeleteSession { .. }]));
    let (state, effects) = update(state, Msg::UploadSubmitted);
    assert!(effects.is_empty());
    assert!(!state.view().upload_enabled);
}

#[test]
fn confirmed_delete_tears_down_everything() {
    init_logging();
    let state = with_session("sess-1", &["a.pdf"]);
    let (state, _) = update(state, Msg::FilesPicked(vec![file("b.txt", 5)]));
    let (state, _) = update(state, Msg::QuestionChanged("what?".to_string()));
    let (state, _) = update(state, Msg::QuestionSubmitted);
    let (state, _) = update(
        state,
        Msg::AnswerReceived {
            question: "what?".to_string(),
            result: Ok(desk_core::Answer {
                answer: "that".to_string(),
                sources: vec![],
            }),
        },
    );
    let (state, _) = update(state, Msg::DeleteSessionClicked);
    let (state, effects) = update(state, Msg::DeleteConfirmed);
    assert_eq!(
        effects,
        vec![Effect::DeleteSession {
            session_id: "sess-1".to_string()
        }]
    );
    assert_eq!(state.session_id(), Some("sess-1"));

    let (state, effects) = update(
        state,
        Msg::SessionDeleted {
            session_id: "sess-1".to_string(),
            result: Ok(()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify(
            "All documents and session data have been deleted successfully.".to_string()
        )]
    );
    let view = state.view();
    assert!(view.session.is_none());
    assert!(!view.qa_visible);
    assert!(view.pending_files.is_empty());
    assert!(view.qa_results.is_empty());
    assert_eq!(view.upload_status, UploadStatus::Hidden);
}

#[test]
fn failed_delete_leaves_state_untouched() {
    init_logging();
    let state = with_session("sess-1", &["a.pdf"]);
    let (state, _) = update(state, Msg::FilesPicked(vec![file("b.txt", 5)]));
    let (state, _) = update(state, Msg::DeleteSessionClicked);
    let (state, _) = update(state, Msg::DeleteConfirmed);
    let session_before = state.session().cloned();
    let pending_before = state.pending_files().to_vec();
    let qa_before = state.qa_results().to_vec();

    let (state, effects) = update(
        state,
        Msg::SessionDeleted {
            session_id: "sess-1".to_string(),
            result: Err(RequestFailure::with_detail("Session not found")),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify("Error deleting session: Session not found".to_string())]
    );
    assert_eq!(state.session().cloned(), session_before);
    assert_eq!(state.pending_files(), pending_before.as_slice());
    assert_eq!(state.qa_results(), qa_before.as_slice());
    assert!(state.view().qa_visible);
}

#[test]
fn refresh_requires_session_and_updates_summary() {
    init_logging();
    let (_, effects) = update(AppState::new(), Msg::RefreshSessionClicked);
    assert_eq!(effects, vec![Effect::Notify("No active session".to_string())]);

    let state = with_session("sess-1", &["a.pdf"]);
    let (state, effects) = update(state, Msg::RefreshSessionClicked);
    assert_eq!(
        effects,
        vec![Effect::FetchSessionInfo {
            session_id: "sess-1".to_string()
        }]
    );

    let (state, _) = update(
        state,
        Msg::SessionInfoFetched {
            session_id: "sess-1".to_string(),
            result: Ok(SessionSnapshot {
                session_id: "sess-1".to_string(),
                document_count: 3,
                documents: vec!["a.pdf".into(), "b.txt".into(), "c.md".into()],
            }),
        },
    );
    let session = state.view().session.expect("session summary");
    assert_eq!(session.total_documents, 3);
    assert_eq!(session.files, vec!["a.pdf", "b.txt", "c.md"]);

    let (_, effects) = update(
        state,
        Msg::SessionInfoFetched {
            session_id: "sess-1".to_string(),
            result: Err(RequestFailure::default()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify("Error: Failed to load session info".to_string())]
    );
}
