use crate::{Answer, AppState, Effect, QaExchange, RequestFailure};

pub(crate) fn submit(state: &mut AppState) -> Vec<Effect> {
    let Some(session_id) = state.session_id().map(ToOwned::to_owned) else {
        return vec![Effect::Notify("Please upload documents first".to_string())];
    };
    let question = state.question.trim().to_string();
    if question.is_empty() || state.asking {
        return Vec::new();
    }

    state.asking = true;
    state.mark_dirty();
    vec![Effect::AskQuestion {
        session_id,
        question,
    }]
}

/// Every answered request re-enables the ask control, whatever the outcome.
pub(crate) fn answer_received(
    state: &mut AppState,
    question: String,
    result: Result<Answer, RequestFailure>,
) -> Vec<Effect> {
    state.asking = false;
    state.mark_dirty();

    match result {
        Ok(answer) => {
            state.qa_results.insert(
                0,
                QaExchange {
                    question,
                    answer: answer.answer,
                    sources: answer.sources,
                },
            );
            state.question.clear();
            Vec::new()
        }
        Err(failure) => vec![Effect::Notify(format!(
            "Error: {}",
            failure.message_or("Failed to get answer")
        ))],
    }
}
