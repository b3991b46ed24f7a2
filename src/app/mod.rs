// ABOUTME: Run orchestration: find servers, pick one, exec a shell and proxy the terminal to it
// Raw mode is entered only after every fallible setup step except itself has succeeded

pub mod selector;

pub use selector::{parse_choice, ContainerSelector, SelectionInputError};

use crate::config::AppConfig;
use crate::docker::{ContainerCatalog, ContainerRuntime, ExecOptions};
use crate::error::EnterError;
use crate::session::{ExecSession, StreamProxy};
use crate::terminal::{LocalTerminal, RawModeGuard, ResizeWatcher};
use std::io::{self, BufReader, Read, Write};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::info;

pub struct App<R, T> {
    config: AppConfig,
    runtime: Arc<R>,
    terminal: Arc<T>,
}

impl<R, T> App<R, T>
where
    R: ContainerRuntime + 'static,
    T: LocalTerminal + 'static,
{
    pub fn new(config: AppConfig, runtime: Arc<R>, terminal: Arc<T>) -> Self {
        Self {
            config,
            runtime,
            terminal,
        }
    }

    /// Run one shell session.
    ///
    /// `prompt_in`/`prompt_out` carry the selection menu; `local_in`/`local_out`
    /// are proxied to the remote shell once it is attached. Input the prompt
    /// buffered past the chosen line reaches the shell ahead of `local_in`.
    pub async fn run<P, W, I, O>(
        &self,
        prompt_in: BufReader<P>,
        prompt_out: W,
        local_in: I,
        local_out: &mut O,
    ) -> Result<(), EnterError>
    where
        P: Read + Send + 'static,
        W: Write + Send + 'static,
        I: AsyncRead + Unpin + Send + 'static,
        O: AsyncWrite + Unpin + ?Sized,
    {
        let servers = ContainerCatalog::new(Arc::clone(&self.runtime))
            .servers()
            .await?;

        let (container, typed_ahead) = tokio::task::spawn_blocking(move || {
            let mut selector = ContainerSelector::new(prompt_in, prompt_out);
            let container = selector.select(servers)?;
            let typed_ahead = selector.into_input().buffer().to_vec();
            Ok::<_, EnterError>((container, typed_ahead))
        })
        .await
        .map_err(|e| EnterError::SelectionAborted(io::Error::new(io::ErrorKind::Other, e)))??;

        let options = ExecOptions::interactive(self.config.session.command.clone());
        let session =
            Arc::new(ExecSession::create(Arc::clone(&self.runtime), &container, options).await?);
        let stream = session.attach().await?;
        info!(
            "Attached to exec {} in container {}",
            session.exec_id(),
            session.container_id()
        );

        let raw_mode =
            RawModeGuard::enter(Arc::clone(&self.terminal)).map_err(EnterError::TerminalMode)?;
        let watcher = ResizeWatcher::start(
            Arc::clone(&session),
            Arc::clone(&self.terminal),
            self.config.session.resize_settle_delay(),
        );

        let local_in = AsyncReadExt::chain(io::Cursor::new(typed_ahead), local_in);
        let result = StreamProxy::new(stream).run(local_in, local_out).await;

        watcher.shutdown().await;
        raw_mode.restore();

        let bytes = result.map_err(EnterError::Stream)?;
        info!(
            "Session in {} ended after {} bytes of output",
            container.display_name(),
            bytes
        );
        Ok(())
    }
}
