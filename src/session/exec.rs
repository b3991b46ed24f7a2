// ABOUTME: Exec session inside a chosen container: create once, attach once, resize many times

use crate::docker::{AttachedStream, ContainerRuntime, ExecOptions};
use crate::error::{EnterError, ResizeError, RuntimeError};
use crate::models::{Container, TerminalSize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ExecSession<R> {
    runtime: Arc<R>,
    container_id: String,
    exec_id: String,
    options: ExecOptions,
    attached: AtomicBool,
}

impl<R: ContainerRuntime> ExecSession<R> {
    /// Create an exec instance for `options.cmd` in `container`.
    pub async fn create(
        runtime: Arc<R>,
        container: &Container,
        options: ExecOptions,
    ) -> Result<Self, EnterError> {
        info!(
            "Creating exec {:?} in container {} ({})",
            options.cmd,
            container.display_name(),
            container.short_id()
        );

        let exec_id = runtime
            .create_exec(&container.id, &options)
            .await
            .map_err(EnterError::ExecCreate)?;

        Ok(Self {
            runtime,
            container_id: container.id.clone(),
            exec_id,
            options,
            attached: AtomicBool::new(false),
        })
    }

    pub fn exec_id(&self) -> &str {
        &self.exec_id
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Start the exec and hijack its connection. Only one stream may be opened per exec.
    pub async fn attach(&self) -> Result<AttachedStream, EnterError> {
        if self.attached.swap(true, Ordering::SeqCst) {
            return Err(EnterError::ExecAttach(RuntimeError::Api(format!(
                "exec {} is already attached",
                self.exec_id
            ))));
        }

        let stream = self
            .runtime
            .attach_exec(&self.exec_id, &self.options)
            .await
            .map_err(EnterError::ExecAttach)?;

        info!("Attached to exec {}", self.exec_id);
        Ok(stream)
    }

    /// Resize the remote TTY. A failure here never ends the session.
    pub async fn resize(&self, size: TerminalSize) -> Result<(), ResizeError> {
        debug!("Resizing exec {} to {}", self.exec_id, size);
        self.runtime
            .resize_exec(&self.exec_id, size)
            .await
            .map_err(ResizeError::Exec)
    }
}
