use std::sync::Arc;
use std::time::Duration;

use desk_logging::{desk_debug, desk_warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{ClientEvent, EventSink, ResearchApi};

/// Owner of the single research progress timer.
///
/// Starting a poll cancels the previous one first, so at most one timer is
/// ever live. Cancellation is synchronous and may be repeated.
#[derive(Default)]
pub struct Poller {
    active: Option<ActivePoll>,
}

struct ActivePoll {
    task_id: String,
    ticket: u64,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl Poller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a timer fetching `task_id`'s log every `period`, first tick one period from now.
    pub fn start(
        &mut self,
        runtime: &Handle,
        api: Arc<dyn ResearchApi>,
        sink: Arc<dyn EventSink>,
        task_id: String,
        ticket: u64,
        period: Duration,
    ) {
        self.cancel();

        let token = CancellationToken::new();
        let task = runtime.spawn(poll_loop(
            api,
            sink,
            task_id.clone(),
            ticket,
            period.max(Duration::from_millis(1)),
            token.clone(),
        ));
        desk_debug!("Poll timer installed for task {task_id} (ticket {ticket})");
        self.active = Some(ActivePoll {
            task_id,
            ticket,
            token,
            task,
        });
    }

    /// Stops the timer. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        active.token.cancel();
        active.task.abort();
        desk_debug!(
            "Poll timer for task {} (ticket {}) cancelled",
            active.task_id,
            active.ticket
        );
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.task.is_finished())
    }

    pub fn active_ticket(&self) -> Option<u64> {
        self.active.as_ref().map(|active| active.ticket)
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn poll_loop(
    api: Arc<dyn ResearchApi>,
    sink: Arc<dyn EventSink>,
    task_id: String,
    ticket: u64,
    period: Duration,
    token: CancellationToken,
) {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = timer.tick() => {}
        }

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = api.stream_logs(&task_id) => result,
        };
        // No retry cap: completion or cancellation are the only exits.
        if let Err(err) = &result {
            desk_warn!("Polling error for task {task_id}: {err}");
        }
        if token.is_cancelled() {
            break;
        }
        sink.emit(ClientEvent::LogsPolled { ticket, result });
    }
}
