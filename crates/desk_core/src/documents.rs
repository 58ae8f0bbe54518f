use desk_logging::{desk_debug, desk_info, desk_warn};

use crate::{
    is_accepted, AppState, DocumentSession, Effect, PendingFile, RequestFailure, SessionSnapshot,
    UploadReceipt, UploadStatus,
};

pub(crate) const DELETE_CONFIRM_PROMPT: &str =
    "Are you sure you want to delete all uploaded documents? This action cannot be undone.";
pub(crate) const UPLOAD_IN_FLIGHT_NOTICE: &str =
    "Please wait for the current upload to finish before deleting the session";

/// Queues accepted files, skipping names that are already pending.
pub(crate) fn add_files(state: &mut AppState, files: Vec<PendingFile>) -> Vec<Effect> {
    for file in files {
        if !is_accepted(&file) {
            desk_debug!(
                "Skipping {} ({} bytes): unsupported type or too large",
                file.name,
                file.size
            );
            continue;
        }
        if state.pending.iter().any(|pending| pending.name == file.name) {
            continue;
        }
        state.pending.push(file);
        state.mark_dirty();
    }
    Vec::new()
}

pub(crate) fn set_drop_highlight(state: &mut AppState, highlight: bool) -> Vec<Effect> {
    if state.drop_highlight != highlight {
        state.drop_highlight = highlight;
        state.mark_dirty();
    }
    Vec::new()
}

pub(crate) fn remove_file(state: &mut AppState, index: usize) -> Vec<Effect> {
    if index < state.pending.len() {
        state.pending.remove(index);
        state.mark_dirty();
    } else {
        desk_warn!(
            "Ignoring removal of pending file {index}, only {} queued",
            state.pending.len()
        );
    }
    Vec::new()
}

/// Starts an upload unless one is in flight or the session is being deleted.
pub(crate) fn submit_upload(state: &mut AppState) -> Vec<Effect> {
    if state.pending.is_empty() || state.uploading.is_some() {
        return Vec::new();
    }
    if state.deleting || state.confirming_delete {
        desk_debug!("Upload held back while the session delete is pending");
        return Vec::new();
    }

    let files = state.pending.clone();
    state.uploading = Some(files.iter().map(|file| file.name.clone()).collect());
    state.upload_status = UploadStatus::Processing;
    state.mark_dirty();

    vec![Effect::UploadDocuments {
        files,
        session_id: state.session_id().map(ToOwned::to_owned),
    }]
}

pub(crate) fn upload_finished(
    state: &mut AppState,
    result: Result<UploadReceipt, RequestFailure>,
) -> Vec<Effect> {
    let submitted = state.uploading.take().unwrap_or_default();
    state.mark_dirty();

    match result {
        Ok(receipt) => {
            desk_info!(
                "Uploaded {} file(s) into session {}",
                receipt.files_uploaded.len(),
                receipt.session_id
            );
            state.upload_status = UploadStatus::Success(format!(
                "Success: {}. {} document(s) ready for questions.",
                receipt.message, receipt.total_documents
            ));
            state.pending.retain(|file| !submitted.contains(&file.name));

            let session = state
                .session
                .take()
                .filter(|session| session.session_id == receipt.session_id);
            let mut session = session.unwrap_or_else(|| DocumentSession {
                session_id: receipt.session_id,
                files_uploaded: Vec::new(),
                total_documents: 0,
            });
            session.total_documents = receipt.total_documents;
            session.merge_files(receipt.files_uploaded);
            state.session = Some(session);
        }
        Err(failure) => {
            state.upload_status = UploadStatus::Error(format!(
                "Error: {}",
                failure.message_or("Upload failed")
            ));
        }
    }
    Vec::new()
}

pub(crate) fn request_delete(state: &mut AppState) -> Vec<Effect> {
    if state.session.is_none() {
        return vec![Effect::Notify("No session to delete".to_string())];
    }
    if state.deleting || state.confirming_delete {
        return Vec::new();
    }
    // The upload's receipt would recreate the session.
    if state.uploading.is_some() {
        return vec![Effect::Notify(UPLOAD_IN_FLIGHT_NOTICE.to_string())];
    }
    state.confirming_delete = true;
    state.mark_dirty();
    vec![Effect::ConfirmDeleteSession {
        prompt: DELETE_CONFIRM_PROMPT.to_string(),
    }]
}

pub(crate) fn confirm_delete(state: &mut AppState) -> Vec<Effect> {
    if !state.confirming_delete {
        return Vec::new();
    }
    state.confirming_delete = false;
    state.mark_dirty();

    match state.session_id().map(ToOwned::to_owned) {
        Some(session_id) => {
            state.deleting = true;
            vec![Effect::DeleteSession { session_id }]
        }
        None => Vec::new(),
    }
}

pub(crate) fn cancel_delete(state: &mut AppState) -> Vec<Effect> {
    if state.confirming_delete {
        state.confirming_delete = false;
        state.mark_dirty();
    }
    Vec::new()
}

/// Tears the session down only once the server confirmed the delete.
pub(crate) fn session_deleted(
    state: &mut AppState,
    session_id: &str,
    result: Result<(), RequestFailure>,
) -> Vec<Effect> {
    state.deleting = false;

    if let Err(failure) = result {
        return vec![Effect::Notify(format!(
            "Error deleting session: {}",
            failure.message_or("Failed to delete session")
        ))];
    }

    if state.session_id() != Some(session_id) {
        desk_warn!("Delete confirmed for session {session_id}, which is not the active one");
        return Vec::new();
    }

    desk_info!("Session {session_id} deleted");
    state.session = None;
    state.pending.clear();
    state.qa_results.clear();
    state.upload_status = UploadStatus::Hidden;
    state.mark_dirty();
    vec![Effect::Notify(
        "All documents and session data have been deleted successfully.".to_string(),
    )]
}

pub(crate) fn refresh_session(state: &mut AppState) -> Vec<Effect> {
    match state.session_id() {
        Some(session_id) => vec![Effect::FetchSessionInfo {
            session_id: session_id.to_string(),
        }],
        None => vec![Effect::Notify("No active session".to_string())],
    }
}

pub(crate) fn session_info_fetched(
    state: &mut AppState,
    session_id: &str,
    result: Result<SessionSnapshot, RequestFailure>,
) -> Vec<Effect> {
    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(failure) => {
            return vec![Effect::Notify(format!(
                "Error: {}",
                failure.message_or("Failed to load session info")
            ))];
        }
    };

    match state.session.as_mut() {
        Some(session) if session.session_id == session_id => {
            session.total_documents = snapshot.document_count;
            session.files_uploaded = snapshot.documents;
            state.mark_dirty();
        }
        _ => desk_debug!("Ignoring info for inactive session {}", snapshot.session_id),
    }
    Vec::new()
}
