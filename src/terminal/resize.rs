// ABOUTME: Forwards local terminal size changes to the remote exec TTY
// SIGWINCH and a synthesized startup event feed a single-slot channel drained by one handler task

use super::LocalTerminal;
use crate::docker::ContainerRuntime;
use crate::error::ResizeError;
use crate::session::ExecSession;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Handle for delivering resize notifications to a running watcher.
#[derive(Debug, Clone)]
pub struct ResizeNotifier {
    tx: mpsc::Sender<()>,
}

impl ResizeNotifier {
    /// Queue a resize. A notification already pending absorbs this one, since
    /// only the latest size matters. Returns `false` once the watcher is gone.
    pub fn notify(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => true,
            Err(TrySendError::Closed(())) => false,
        }
    }
}

pub struct ResizeWatcher {
    handler: Option<JoinHandle<()>>,
    feeders: Vec<JoinHandle<()>>,
}

impl ResizeWatcher {
    /// Subscribe to SIGWINCH and size the remote TTY once after `settle`.
    pub fn start<R, T>(session: Arc<ExecSession<R>>, terminal: Arc<T>, settle: Duration) -> Self
    where
        R: ContainerRuntime + 'static,
        T: LocalTerminal + 'static,
    {
        let (mut watcher, notifier) = Self::arm(session, terminal, settle);

        match subscribe_window_changes(notifier) {
            Ok(task) => watcher.feeders.push(task),
            Err(e) => warn!("Not watching for terminal resizes: {}", e),
        }

        watcher
    }

    /// Start the handler and the delayed initial notification without touching
    /// process signals. The returned notifier injects further notifications.
    pub fn arm<R, T>(
        session: Arc<ExecSession<R>>,
        terminal: Arc<T>,
        settle: Duration,
    ) -> (Self, ResizeNotifier)
    where
        R: ContainerRuntime + 'static,
        T: LocalTerminal + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        let notifier = ResizeNotifier { tx };

        let handler = tokio::spawn(handle_notifications(rx, session, terminal));
        let initial = schedule_initial(notifier.clone(), settle);
        debug!("Resize watcher armed");

        (
            Self {
                handler: Some(handler),
                feeders: vec![initial],
            },
            notifier,
        )
    }

    /// Stop listening. Notifications delivered afterwards are dropped.
    pub async fn shutdown(mut self) {
        for task in self.feeders.drain(..) {
            task.abort();
            let _ = task.await;
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
            let _ = handler.await;
        }
        debug!("Resize watcher stopped");
    }
}

impl Drop for ResizeWatcher {
    fn drop(&mut self) {
        for task in &self.feeders {
            task.abort();
        }
        if let Some(handler) = &self.handler {
            handler.abort();
        }
    }
}

async fn handle_notifications<R, T>(
    mut notifications: mpsc::Receiver<()>,
    session: Arc<ExecSession<R>>,
    terminal: Arc<T>,
) where
    R: ContainerRuntime,
    T: LocalTerminal,
{
    while notifications.recv().await.is_some() {
        let size = match terminal.size() {
            Ok(size) => size,
            Err(e) => {
                report(&ResizeError::TerminalQuery(e));
                continue;
            }
        };

        if let Err(e) = session.resize(size).await {
            report(&e);
        }
    }
    debug!("Resize notification channel closed");
}

fn schedule_initial(notifier: ResizeNotifier, settle: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(settle).await;
        notifier.notify();
    })
}

#[cfg(unix)]
fn subscribe_window_changes(notifier: ResizeNotifier) -> io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut window_changes = signal(SignalKind::window_change())?;
    Ok(tokio::spawn(async move {
        while window_changes.recv().await.is_some() {
            if !notifier.notify() {
                break;
            }
        }
    }))
}

#[cfg(not(unix))]
fn subscribe_window_changes(_notifier: ResizeNotifier) -> io::Result<JoinHandle<()>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "window change signals are only available on unix",
    ))
}

fn report(error: &ResizeError) {
    warn!("{}", error);
    // The terminal is raw while the watcher runs.
    eprint!("{}\r\n", error);
}
