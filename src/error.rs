// ABOUTME: Error taxonomy for a shell session run
// Fatal errors end the process with status 1, resize errors are logged and skipped

use std::io;
use thiserror::Error;

/// Failures reported by the container runtime API.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Docker API error: {0}")]
    Docker(#[from] bollard::errors::Error),
    #[error("{0}")]
    Api(String),
}

/// Errors that abort the run.
#[derive(Debug, Error)]
pub enum EnterError {
    #[error("Failed to connect to Docker API: {0}")]
    Connection(#[source] RuntimeError),
    #[error("Failed to list containers: {0}")]
    List(#[source] RuntimeError),
    #[error("Whoops - there are no running servers at the moment. Start one, and come back later.")]
    NoCandidates,
    #[error("No server selected: {0}")]
    SelectionAborted(#[source] io::Error),
    #[error("Failed to create an exec environment: {0}")]
    ExecCreate(#[source] RuntimeError),
    #[error("Failed to attach to exec environment: {0}")]
    ExecAttach(#[source] RuntimeError),
    #[error("Failed to make terminal raw: {0}")]
    TerminalMode(#[source] io::Error),
    #[error("Session stream failed: {0}")]
    Stream(#[source] io::Error),
}

impl EnterError {
    /// Process exit status for this failure.
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

/// Errors from a single resize cycle. The session continues after these.
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("Failed to query terminal size: {0}")]
    TerminalQuery(#[source] io::Error),
    #[error("Failed to resize container TTY: {0}")]
    Exec(#[source] RuntimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_candidates_message_mentions_servers() {
        let message = EnterError::NoCandidates.to_string();
        assert!(message.contains("no running servers"));
    }

    #[test]
    fn test_every_fatal_error_exits_with_one() {
        let errors = [
            EnterError::Connection(RuntimeError::Api("refused".into())),
            EnterError::List(RuntimeError::Api("boom".into())),
            EnterError::NoCandidates,
            EnterError::SelectionAborted(io::Error::from(io::ErrorKind::UnexpectedEof)),
            EnterError::ExecCreate(RuntimeError::Api("no such container".into())),
            EnterError::ExecAttach(RuntimeError::Api("hijack failed".into())),
            EnterError::TerminalMode(io::Error::from(io::ErrorKind::Unsupported)),
            EnterError::Stream(io::Error::from(io::ErrorKind::ConnectionReset)),
        ];

        for error in &errors {
            assert_eq!(error.exit_code(), 1, "{error}");
        }
    }

    #[test]
    fn test_error_messages_include_cause() {
        let error = EnterError::ExecCreate(RuntimeError::Api("no such container".into()));
        assert_eq!(
            error.to_string(),
            "Failed to create an exec environment: no such container"
        );
    }
}
