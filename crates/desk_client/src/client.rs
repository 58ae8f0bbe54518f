use std::future::Future;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use desk_logging::desk_info;

use crate::{
    ClientError, ClientEvent, ClientSettings, Poller, ReqwestApi, ResearchApi, UploadFile,
};

/// Receiver of finished backend calls.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs backend calls on its own runtime and reports each outcome to the sink.
///
/// Every method returns immediately; the poll timer is started and cancelled
/// synchronously on the caller's thread.
pub struct ClientHandle {
    poller: Poller,
    api: Arc<dyn ResearchApi>,
    sink: Arc<dyn EventSink>,
    poll_interval: Duration,
    runtime: tokio::runtime::Runtime,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, ClientError> {
        let api = Arc::new(ReqwestApi::new(&settings)?);
        desk_info!("Backend client targeting {}", settings.base_url);
        Self::with_api(api, settings.poll_interval, sink)
    }

    pub fn with_api(
        api: Arc<dyn ResearchApi>,
        poll_interval: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("desk-client")
            .enable_all()
            .build()?;
        Ok(Self {
            poller: Poller::new(),
            api,
            sink,
            poll_interval,
            runtime,
        })
    }

    pub fn start_research(&self, topic: String, ticket: u64) {
        self.spawn(move |api| async move {
            let result = api.start_research(&topic).await;
            ClientEvent::ResearchStarted { ticket, result }
        });
    }

    /// Replaces any running poll timer with one for `task_id`.
    pub fn start_polling(&mut self, task_id: String, ticket: u64) {
        self.poller.start(
            self.runtime.handle(),
            self.api.clone(),
            self.sink.clone(),
            task_id,
            ticket,
            self.poll_interval,
        );
    }

    pub fn stop_polling(&mut self) -> bool {
        self.poller.cancel()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }

    pub fn fetch_result(&self, task_id: String) {
        self.spawn(move |api| async move {
            let result = api.fetch_result(&task_id).await;
            ClientEvent::ResultFetched { task_id, result }
        });
    }

    pub fn upload_documents(&self, files: Vec<UploadFile>, session_id: Option<String>) {
        self.spawn(move |api| async move {
            ClientEvent::Uploaded(
                api.upload_documents(&files, session_id.as_deref())
                    .await,
            )
        });
    }

    pub fn delete_session(&self, session_id: String) {
        self.spawn(move |api| async move {
            let result = api.delete_session(&session_id).await;
            ClientEvent::SessionDeleted { session_id, result }
        });
    }

    pub fn session_info(&self, session_id: String) {
        self.spawn(move |api| async move {
            let result = api.session_info(&session_id).await;
            ClientEvent::SessionInfo { session_id, result }
        });
    }

    pub fn ask_question(&self, session_id: String, question: String) {
        self.spawn(move |api| async move {
            let result = api.ask_question(&session_id, &question).await;
            ClientEvent::Answered { question, result }
        });
    }

    fn spawn<F, Fut>(&self, call: F)
    where
        F: FnOnce(Arc<dyn ResearchApi>) -> Fut,
        Fut: Future<Output = ClientEvent> + Send + 'static,
    {
        let sink = self.sink.clone();
        let pending = call(self.api.clone());
        self.runtime.spawn(async move {
            sink.emit(pending.await);
        });
    }
}
