// ABOUTME: Full-duplex byte proxy between the local terminal and a hijacked exec connection
// Remote output drives the session: when it ends, the input side is dropped without waiting

use crate::docker::{AttachedStream, RemoteInput, RemoteOutput};
use futures_util::stream::StreamExt;
use std::io;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct StreamProxy {
    output: RemoteOutput,
    input: RemoteInput,
}

impl StreamProxy {
    pub fn new(stream: AttachedStream) -> Self {
        let AttachedStream { output, input } = stream;
        Self { output, input }
    }

    /// Copy `local_in` to the remote process and remote output to `local_out`
    /// until the remote side reaches end-of-stream. Returns the number of
    /// bytes written to `local_out`.
    pub async fn run<I, O>(self, local_in: I, local_out: &mut O) -> io::Result<u64>
    where
        I: AsyncRead + Unpin + Send + 'static,
        O: AsyncWrite + Unpin + ?Sized,
    {
        let Self { mut output, input } = self;

        let input_task = spawn_input_forwarding(local_in, input);
        let result = forward_output(&mut output, local_out).await;

        // The input loop is usually parked on a local read; it is not awaited.
        input_task.abort();

        match &result {
            Ok(bytes) => info!("Remote stream closed after {} bytes of output", bytes),
            Err(e) => warn!("Remote stream failed: {}", e),
        }
        result
    }
}

fn spawn_input_forwarding<I>(mut local_in: I, mut remote_in: RemoteInput) -> JoinHandle<()>
where
    I: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        match tokio::io::copy(&mut local_in, &mut remote_in).await {
            Ok(bytes) => {
                debug!("Local input closed after {} bytes, half-closing remote stdin", bytes);
                if let Err(e) = remote_in.shutdown().await {
                    debug!("Failed to half-close remote stdin: {}", e);
                }
            }
            Err(e) => {
                // Keep waiting for the remote side to finish.
                warn!("Input forwarding stopped: {}", e);
            }
        }
    })
}

async fn forward_output<O>(output: &mut RemoteOutput, local_out: &mut O) -> io::Result<u64>
where
    O: AsyncWrite + Unpin + ?Sized,
{
    let mut forwarded = 0u64;
    while let Some(chunk) = output.next().await {
        let chunk = chunk?;
        local_out.write_all(&chunk).await?;
        local_out.flush().await?;
        forwarded += chunk.len() as u64;
    }
    Ok(forwarded)
}
