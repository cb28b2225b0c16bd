use std::future;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{Instrument, debug, info_span};

use quiz_core::model::{OptionId, SessionId, StepCatalog};

use super::controller::QuizController;
use super::events::SessionEvent;
use super::snapshot::SessionSnapshot;
use super::timer::TimerToken;
use crate::config::FunnelConfig;
use crate::error::SessionError;

const EVENT_CAPACITY: usize = 64;

#[derive(Debug)]
enum Command {
    SelectOption(OptionId),
    SetBirthDate(String),
    Advance,
    Shutdown,
}

/// Handle to a running quiz session.
///
/// Operations enqueue a command and return immediately; the session task
/// applies them in order, runs the timers and publishes a new snapshot after
/// every change. Dropping the handle tears the session down and cancels any
/// pending timer.
#[derive(Debug)]
pub struct SessionHandle {
    id: SessionId,
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
    events: broadcast::Sender<SessionEvent>,
    task: Option<JoinHandle<()>>,
}

impl SessionHandle {
    /// Spawn a session task on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` for an invalid configuration.
    pub fn spawn(catalog: StepCatalog, config: FunnelConfig) -> Result<Self, SessionError> {
        let controller = QuizController::new(catalog, config)?;
        let id = controller.session_id();

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let span = info_span!("quiz_session", session = %id);
        let task = tokio::spawn(
            run_session(controller, command_rx, snapshot_tx, event_tx.clone()).instrument(span),
        );

        Ok(Self {
            id,
            commands: command_tx,
            snapshots: snapshot_rx,
            events: event_tx,
            task: Some(task),
        })
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.id
    }

    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the session task has stopped.
    pub fn select_option(&self, option_id: OptionId) -> Result<(), SessionError> {
        self.send(Command::SelectOption(option_id))
    }

    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the session task has stopped.
    pub fn set_birth_date(&self, value: impl Into<String>) -> Result<(), SessionError> {
        self.send(Command::SetBirthDate(value.into()))
    }

    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the session task has stopped.
    pub fn advance(&self) -> Result<(), SessionError> {
        self.send(Command::Advance)
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified whenever the snapshot changes.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Stop the session and wait for its task to finish.
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn send(&self, command: Command) -> Result<(), SessionError> {
        self.commands.send(command).map_err(|_| SessionError::Closed)
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_session(
    mut controller: QuizController,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<SessionSnapshot>,
    events: broadcast::Sender<SessionEvent>,
) {
    let mut armed: Option<(TimerToken, Instant)> = None;

    loop {
        armed = match (controller.pending_timer(), armed) {
            (Some(timer), Some((token, at))) if timer.token == token => Some((token, at)),
            (Some(timer), _) => Some((timer.token, Instant::now() + timer.delay)),
            (None, _) => None,
        };

        let timer = async move {
            match armed {
                Some((token, at)) => {
                    sleep_until(at).await;
                    token
                }
                None => future::pending::<TimerToken>().await,
            }
        };

        let (emitted, fired) = tokio::select! {
            command = commands.recv() => match command {
                Some(Command::SelectOption(id)) => (controller.select_option(&id), false),
                Some(Command::SetBirthDate(value)) => (controller.set_birth_date(value), false),
                Some(Command::Advance) => (controller.advance(), false),
                Some(Command::Shutdown) | None => break,
            },
            token = timer => (controller.fire(token), true),
        };

        // A fired timer always clears the pending flag, even when nothing else moved.
        if emitted.is_empty() && !fired {
            continue;
        }
        snapshots.send_replace(controller.snapshot());
        for event in emitted {
            // No subscribers is fine; the snapshot channel still carries the state.
            let _ = events.send(event);
        }
    }

    if controller.teardown().is_some() {
        snapshots.send_replace(controller.snapshot());
    }
    debug!("quiz session stopped");
}
