//! SessionClient - owns the interview channel of one session.
//!
//! A supervisor task per session holds the transport. The public handle
//! talks to it through a command queue and observes its lifecycle through a
//! `watch` channel:
//!
//! ```text
//! connecting ──open──▶ open ──clean close──▶ closed
//!     ▲                 │
//!     └──delay──────────┘ abnormal close
//! ```
//!
//! The state turns `Connecting` as soon as the channel drops, so it already
//! reads `Connecting` while the reconnect delay runs; sends are refused for
//! that whole stretch. Reconnects follow the configured [`ReconnectPolicy`];
//! once it is exhausted the session is closed for good.

use mockmate_core::interview::{ClientFrame, ClientFrameType, Transcript, TranscriptMessage};
use mockmate_core::interview::{NewMessage, decode_server_frame};
use mockmate_core::notification::{NotificationLevel, Notifier};
use mockmate_core::reconnect::{Backoff, ReconnectPolicy};
use mockmate_core::session::{
    ChannelConnector, ChannelState, ChannelTransport, Session, SessionTarget, TransportEvent,
};
use mockmate_core::{MockMateError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock, broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Callback invoked for every inbound transcript entry, in arrival order.
pub type MessageHandler = Arc<dyn Fn(&TranscriptMessage) + Send + Sync>;

/// Supplies the bearer token at connect time.
pub type TokenProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

const COMMAND_QUEUE: usize = 32;
const EVENT_BUFFER: usize = 64;

enum Command {
    Send {
        frame: ClientFrame,
        reply: oneshot::Sender<Result<()>>,
    },
    Close {
        reply: oneshot::Sender<()>,
    },
}

struct Worker {
    session: Session,
    commands: mpsc::Sender<Command>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// State shared between the handle and the supervisor task.
struct Shared {
    transcript: Arc<RwLock<Transcript>>,
    handlers: std::sync::RwLock<Vec<MessageHandler>>,
    events: broadcast::Sender<TranscriptMessage>,
    state: watch::Sender<ChannelState>,
    notifier: Arc<dyn Notifier>,
}

impl Shared {
    fn set_state(&self, state: ChannelState) {
        self.state.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            tracing::debug!("[SessionClient] {} -> {}", current, state);
            *current = state;
            true
        });
    }

    fn notify(&self, level: NotificationLevel, message: impl Into<String>) {
        self.notifier.notify(level, message.into());
    }

    fn handlers(&self) -> Vec<MessageHandler> {
        match self.handlers.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Appends to the transcript and fans released entries out to the
    /// handlers and subscribers.
    async fn record(&self, message: NewMessage) {
        let released = self.transcript.write().await.append(message);
        if released.is_empty() {
            return;
        }
        let handlers = self.handlers();
        for entry in released {
            for handler in &handlers {
                handler(&entry);
            }
            // No subscribers is fine.
            let _ = self.events.send(entry);
        }
    }

    /// Appends the user's own answer; handlers only see inbound traffic.
    async fn record_answer(&self, answer: String) {
        self.transcript.write().await.append(NewMessage::answer(answer));
    }
}

/// Handle to the interview channel.
pub struct SessionClient {
    connector: Arc<dyn ChannelConnector>,
    policy: ReconnectPolicy,
    ws_base_url: String,
    token_provider: Option<TokenProvider>,
    shared: Arc<Shared>,
    worker: Mutex<Option<Worker>>,
}

impl SessionClient {
    pub fn new(
        connector: Arc<dyn ChannelConnector>,
        notifier: Arc<dyn Notifier>,
        ws_base_url: impl Into<String>,
        policy: ReconnectPolicy,
    ) -> Self {
        let (state, _) = watch::channel(ChannelState::Closed);
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            connector,
            policy,
            ws_base_url: ws_base_url.into(),
            token_provider: None,
            shared: Arc::new(Shared {
                transcript: Arc::new(RwLock::new(Transcript::new())),
                handlers: std::sync::RwLock::new(Vec::new()),
                events,
                state,
                notifier,
            }),
            worker: Mutex::new(None),
        }
    }

    pub fn with_token_provider(mut self, provider: TokenProvider) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Opens the channel for `target`, replacing any running session.
    ///
    /// Fails with [`MockMateError::MissingSessionId`] when either identifier
    /// is missing; the state is then `Closed` and nothing is started.
    /// Connection failures are not reported here: the supervisor keeps
    /// retrying and raises notifications.
    pub async fn connect(&self, target: SessionTarget) -> Result<()> {
        let mut worker = self.worker.lock().await;
        let previous = match worker.take() {
            Some(previous) => Some(stop_worker(previous).await),
            None => None,
        };

        let session = match target.into_session() {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!("[SessionClient] Refusing to connect: {}", err);
                self.shared.set_state(ChannelState::Closed);
                return Err(err);
            }
        };

        if previous.as_ref() != Some(&session) {
            self.shared.transcript.write().await.clear();
        }

        let token = self.token_provider.as_ref().and_then(|provider| provider());
        let url = session.channel_url(&self.ws_base_url, token.as_deref());
        tracing::info!(
            "[SessionClient] Starting session {} (job {})",
            session.id,
            session.job_id
        );

        self.shared.set_state(ChannelState::Connecting);
        let (commands, command_rx) = mpsc::channel(COMMAND_QUEUE);
        let cancel = CancellationToken::new();
        let supervisor = Supervisor {
            connector: self.connector.clone(),
            url,
            backoff: self.policy.backoff(),
            shared: self.shared.clone(),
            commands: command_rx,
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(supervisor.run());

        *worker = Some(Worker {
            session,
            commands,
            cancel,
            handle,
        });
        Ok(())
    }

    /// Sends a user answer. See [`send_frame`](Self::send_frame).
    pub async fn send(&self, answer: impl Into<String>) -> bool {
        self.send_frame(ClientFrame::answer(answer)).await
    }

    /// Transmits a frame. Returns `false` (after a warning notification)
    /// when the channel is not open or the write fails. Answers are added
    /// to the transcript once written.
    pub async fn send_frame(&self, frame: ClientFrame) -> bool {
        if self.state() != ChannelState::Open {
            self.shared.notify(
                NotificationLevel::Warning,
                "Not connected to the interview server. Please wait...",
            );
            return false;
        }

        let commands = match self.worker.lock().await.as_ref() {
            Some(worker) => worker.commands.clone(),
            None => return false,
        };

        let (reply, reply_rx) = oneshot::channel();
        if commands.send(Command::Send { frame, reply }).await.is_err() {
            self.shared.notify(
                NotificationLevel::Warning,
                "Not connected to the interview server. Please wait...",
            );
            return false;
        }
        matches!(reply_rx.await, Ok(Ok(())))
    }

    /// Registers a handler for inbound messages.
    pub fn on_message<F>(&self, handler: F)
    where
        F: Fn(&TranscriptMessage) + Send + Sync + 'static,
    {
        let mut handlers = match self.shared.handlers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        handlers.push(Arc::new(handler));
    }

    /// Broadcast of inbound messages. Slow receivers may observe `Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptMessage> {
        self.shared.events.subscribe()
    }

    /// Ends the interview: sends `end_interview`, closes the channel
    /// cleanly and stops the supervisor. The state ends in `Closed`.
    pub async fn close(&self) {
        let Some(worker) = self.worker.lock().await.take() else {
            self.shared.set_state(ChannelState::Closed);
            return;
        };

        let (reply, reply_rx) = oneshot::channel();
        if worker.commands.send(Command::Close { reply }).await.is_ok() {
            let _ = reply_rx.await;
        }
        stop_worker(worker).await;
        self.shared.set_state(ChannelState::Closed);
        tracing::info!("[SessionClient] Session closed");
    }

    pub fn state(&self) -> ChannelState {
        *self.shared.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<ChannelState> {
        self.shared.state.subscribe()
    }

    /// Waits until the channel reaches `state`.
    pub async fn wait_for_state(&self, state: ChannelState) -> Result<()> {
        let mut rx = self.watch_state();
        rx.wait_for(|current| *current == state)
            .await
            .map(|_| ())
            .map_err(|_| MockMateError::internal("session state channel dropped"))
    }

    /// Waits out the current connect/retry cycle and returns `Open`, or
    /// `Closed` when the channel could not be established.
    pub async fn wait_until_settled(&self) -> Result<ChannelState> {
        let mut rx = self.watch_state();
        rx.wait_for(|current| *current != ChannelState::Connecting)
            .await
            .map(|state| *state)
            .map_err(|_| MockMateError::internal("session state channel dropped"))
    }

    pub fn transcript(&self) -> Arc<RwLock<Transcript>> {
        self.shared.transcript.clone()
    }

    pub async fn messages(&self) -> Vec<TranscriptMessage> {
        self.shared.transcript.read().await.messages().to_vec()
    }

    pub async fn answered_count(&self) -> usize {
        self.shared.transcript.read().await.answered_count()
    }
}

/// Cancels the supervisor and waits for it to finish.
async fn stop_worker(worker: Worker) -> Session {
    worker.cancel.cancel();
    if let Err(e) = worker.handle.await {
        tracing::error!("[SessionClient] Supervisor task failed: {}", e);
    }
    worker.session
}

enum Outcome {
    /// Reconnect after a delay.
    Dropped,
    /// Stop the supervisor.
    Finished,
}

struct Supervisor {
    connector: Arc<dyn ChannelConnector>,
    url: String,
    backoff: Backoff,
    shared: Arc<Shared>,
    commands: mpsc::Receiver<Command>,
    cancel: CancellationToken,
}

impl Supervisor {
    async fn run(mut self) {
        loop {
            self.shared.set_state(ChannelState::Connecting);

            let connected = tokio::select! {
                _ = self.cancel.cancelled() => break,
                result = self.connector.connect(&self.url) => result,
            };

            match connected {
                Ok(transport) => {
                    self.backoff.reset();
                    self.shared.set_state(ChannelState::Open);
                    tracing::info!("[SessionClient] Channel open");
                    if let Outcome::Finished = self.serve(transport).await {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("[SessionClient] Connection attempt failed: {}", e);
                    self.shared.notify(
                        NotificationLevel::Error,
                        "Connection error. Please try again.",
                    );
                }
            }

            let Some(delay) = self.backoff.next_delay() else {
                tracing::error!(
                    "[SessionClient] Giving up after {} reconnect attempts",
                    self.backoff.attempt()
                );
                self.shared.notify(
                    NotificationLevel::Error,
                    "Unable to reach the interview server. The session has been closed.",
                );
                break;
            };

            tracing::info!(
                "[SessionClient] Reconnecting in {:?} (attempt {})",
                delay,
                self.backoff.attempt()
            );
            self.shared.set_state(ChannelState::Connecting);
            if let Outcome::Finished = self.wait(delay).await {
                break;
            }
        }

        self.shared.set_state(ChannelState::Closed);
    }

    /// Drives an open channel until it closes.
    async fn serve(&mut self, mut transport: Box<dyn ChannelTransport>) -> Outcome {
        if let Err(e) = transport
            .send_text(ClientFrame::start_interview().to_json())
            .await
        {
            tracing::warn!("[SessionClient] Failed to start interview: {}", e);
            self.shared
                .notify(NotificationLevel::Error, format!("Connection error: {}", e));
            return Outcome::Dropped;
        }

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    let _ = transport.close().await;
                    return Outcome::Finished;
                }
                command = self.commands.recv() => match command {
                    Some(Command::Send { frame, reply }) => {
                        let result = self.write(transport.as_mut(), frame).await;
                        let _ = reply.send(result);
                    }
                    Some(Command::Close { reply }) => {
                        let _ = transport
                            .send_text(ClientFrame::end_interview().to_json())
                            .await;
                        if let Err(e) = transport.close().await {
                            tracing::debug!("[SessionClient] Close failed: {}", e);
                        }
                        let _ = reply.send(());
                        return Outcome::Finished;
                    }
                    None => {
                        let _ = transport.close().await;
                        return Outcome::Finished;
                    }
                },
                event = transport.next_event() => match event {
                    Some(TransportEvent::Text(text)) => self.dispatch(&text).await,
                    Some(TransportEvent::Closed { clean: true }) => {
                        tracing::info!("[SessionClient] Channel closed by server");
                        return Outcome::Finished;
                    }
                    Some(TransportEvent::Closed { clean: false }) | None => {
                        tracing::warn!("[SessionClient] Channel dropped");
                        self.shared.notify(
                            NotificationLevel::Warning,
                            "Connection lost. Reconnecting...",
                        );
                        return Outcome::Dropped;
                    }
                },
            }
        }
    }

    /// Sleeps out a reconnect delay, still answering commands.
    async fn wait(&mut self, delay: Duration) -> Outcome {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => return Outcome::Finished,
                _ = &mut sleep => return Outcome::Dropped,
                command = self.commands.recv() => match command {
                    Some(Command::Send { reply, .. }) => {
                        let _ = reply.send(Err(MockMateError::channel("Channel is not open")));
                    }
                    Some(Command::Close { reply }) => {
                        let _ = reply.send(());
                        return Outcome::Finished;
                    }
                    None => return Outcome::Finished,
                },
            }
        }
    }

    async fn write(&self, transport: &mut dyn ChannelTransport, frame: ClientFrame) -> Result<()> {
        if let Err(e) = transport.send_text(frame.to_json()).await {
            tracing::warn!("[SessionClient] Send failed: {}", e);
            self.shared.notify(
                NotificationLevel::Warning,
                format!("Message not sent: {}", e),
            );
            return Err(e);
        }
        if frame.frame_type == ClientFrameType::Answer {
            self.shared.record_answer(frame.message).await;
        }
        Ok(())
    }

    async fn dispatch(&self, text: &str) {
        match decode_server_frame(text) {
            Ok(message) => {
                tracing::debug!("[SessionClient] Received {}", message.kind);
                self.shared.record(message).await;
            }
            Err(rejection) => {
                tracing::warn!("[SessionClient] Skipping frame ({:?}): {}", rejection, text);
            }
        }
    }
}
