use std::fs;
use std::path::Path;

use desk_core::{Msg, PendingFile};
use desk_logging::desk_warn;

/// What one line of terminal input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Send(Vec<Msg>),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str, awaiting_confirmation: bool) -> InputAction {
    parse_line_with(line, awaiting_confirmation, resolve_file)
}

/// Parses a line, resolving file arguments through `resolve`.
///
/// While a confirmation prompt is open, `y`/`yes` confirms, `n`/`no` or an
/// empty line cancels, and any other valid command cancels before running.
/// `help`, `quit` and unrecognised lines leave the prompt open.
pub fn parse_line_with<F>(line: &str, awaiting_confirmation: bool, resolve: F) -> InputAction
where
    F: Fn(&str) -> Option<PendingFile>,
{
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    if awaiting_confirmation {
        if matches!(command.to_ascii_lowercase().as_str(), "y" | "yes") && rest.is_empty() {
            return InputAction::Send(vec![Msg::DeleteConfirmed]);
        }
        return match parse_command(command, rest, &resolve) {
            InputAction::Send(mut msgs) => {
                msgs.insert(0, Msg::DeleteCancelled);
                InputAction::Send(msgs)
            }
            InputAction::Unknown(_) if command.is_empty() || is_no(command) => {
                InputAction::Send(vec![Msg::DeleteCancelled])
            }
            other => other,
        };
    }

    parse_command(command, rest, &resolve)
}

fn is_no(command: &str) -> bool {
    matches!(command.to_ascii_lowercase().as_str(), "n" | "no")
}

fn parse_command<F>(command: &str, rest: &str, resolve: &F) -> InputAction
where
    F: Fn(&str) -> Option<PendingFile>,
{
    let send = InputAction::Send;
    match command {
        "" => send(Vec::new()),
        "go" => send(vec![Msg::Navigate(rest.to_string())]),
        "history" => send(vec![Msg::HistoryNavigated(
            (!rest.is_empty()).then(|| rest.to_string()),
        )]),
        "research" => send(vec![
            Msg::TopicChanged(rest.to_string()),
            Msg::ResearchSubmitted,
        ]),
        "esc" => send(vec![Msg::EscapePressed]),
        "focus" => send(vec![Msg::FocusTopic]),
        "new" => send(vec![Msg::BackClicked]),
        "add" => send(vec![Msg::FilesPicked(resolve_all(rest, resolve))]),
        "drop" => send(vec![
            Msg::DragEntered,
            Msg::FilesDropped(resolve_all(rest, resolve)),
        ]),
        "rm" => match rest.parse::<usize>() {
            Ok(position) if position >= 1 => send(vec![Msg::FileRemoved(position - 1)]),
            _ => InputAction::Unknown(format!("rm {rest}")),
        },
        "upload" => send(vec![Msg::UploadSubmitted]),
        "delete" => send(vec![Msg::DeleteSessionClicked]),
        "refresh" => send(vec![Msg::RefreshSessionClicked]),
        "ask" => send(vec![
            Msg::QuestionChanged(rest.to_string()),
            Msg::QuestionSubmitted,
        ]),
        "help" | "?" => InputAction::Help,
        "quit" | "exit" => InputAction::Quit,
        other => InputAction::Unknown(other.to_string()),
    }
}

fn resolve_all<F>(paths: &str, resolve: &F) -> Vec<PendingFile>
where
    F: Fn(&str) -> Option<PendingFile>,
{
    paths.split_whitespace().filter_map(resolve).collect()
}

fn resolve_file(raw: &str) -> Option<PendingFile> {
    let path = Path::new(raw);
    let metadata = match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => {
            desk_warn!("Skipping {raw}: not a regular file");
            return None;
        }
        Err(err) => {
            desk_warn!("Skipping {raw}: {err}");
            return None;
        }
    };
    let name = path.file_name()?.to_string_lossy().into_owned();
    Some(PendingFile::new(name, metadata.len(), path))
}
