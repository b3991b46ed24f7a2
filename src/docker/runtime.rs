// ABOUTME: Runtime capability set consumed by the session: list, exec create, exec attach, exec resize
// The trait is the seam between the session core and the Docker API client

use crate::error::RuntimeError;
use crate::models::{Container, TerminalSize};
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use std::fmt;
use std::io;
use std::pin::Pin;
use tokio::io::AsyncWrite;

/// Read half of a hijacked exec connection: raw chunks of remote terminal output.
pub type RemoteOutput = BoxStream<'static, io::Result<Vec<u8>>>;

/// Write half of a hijacked exec connection: bytes for the remote process's stdin.
pub type RemoteInput = Pin<Box<dyn AsyncWrite + Send>>;

/// Duplex byte channel bound to one exec instance.
pub struct AttachedStream {
    pub output: RemoteOutput,
    pub input: RemoteInput,
}

impl AttachedStream {
    pub fn new(output: RemoteOutput, input: RemoteInput) -> Self {
        Self { output, input }
    }
}

impl fmt::Debug for AttachedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachedStream").finish_non_exhaustive()
    }
}

/// Options shared by exec creation and attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOptions {
    pub cmd: Vec<String>,
    pub tty: bool,
    pub attach_stdin: bool,
    pub attach_stdout: bool,
    pub attach_stderr: bool,
}

impl ExecOptions {
    /// A TTY-backed exec with every standard stream attached.
    pub fn interactive(cmd: Vec<String>) -> Self {
        Self {
            cmd,
            tty: true,
            attach_stdin: true,
            attach_stdout: true,
            attach_stderr: true,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Running containers only.
    async fn list_containers(&self) -> Result<Vec<Container>, RuntimeError>;

    /// Returns the new exec id.
    async fn create_exec(
        &self,
        container_id: &str,
        options: &ExecOptions,
    ) -> Result<String, RuntimeError>;

    async fn attach_exec(
        &self,
        exec_id: &str,
        options: &ExecOptions,
    ) -> Result<AttachedStream, RuntimeError>;

    async fn resize_exec(&self, exec_id: &str, size: TerminalSize) -> Result<(), RuntimeError>;
}
