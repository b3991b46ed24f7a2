// ABOUTME: Bollard-backed ContainerRuntime talking to the local Docker daemon
// Handles socket discovery, exec creation, hijacked attach and TTY resize

use super::runtime::{AttachedStream, ContainerRuntime, ExecOptions};
use crate::config::DockerConfig;
use crate::error::RuntimeError;
use crate::models::{Container, TerminalSize};
use async_trait::async_trait;
use bollard::container::{ListContainersOptions, LogOutput};
use bollard::exec::{CreateExecOptions, ResizeExecOptions, StartExecOptions, StartExecResults};
use bollard::Docker;
use futures_util::future;
use futures_util::stream::StreamExt;
use std::io;
use tracing::{debug, info, warn};

/// Seconds bollard waits on a request before giving up.
const CLIENT_TIMEOUT_SECS: u64 = 120;

pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect and verify the daemon answers a ping.
    pub async fn connect(config: &DockerConfig) -> Result<Self, RuntimeError> {
        let docker = Self::connect_to_docker(config)?;

        docker.ping().await?;

        info!("Successfully connected to Docker daemon");
        Ok(Self { docker })
    }

    fn connect_to_docker(config: &DockerConfig) -> Result<Docker, bollard::errors::Error> {
        if let Some(docker_host) = &config.host {
            info!("Using Docker host from config: {}", docker_host);
            std::env::set_var("DOCKER_HOST", docker_host);

            match Docker::connect_with_local_defaults() {
                Ok(docker) => return Ok(docker),
                Err(e) => {
                    warn!("Failed to connect to configured Docker host {}: {}", docker_host, e);
                }
            }
        }

        if let Ok(docker_host) = std::env::var("DOCKER_HOST") {
            info!("Using DOCKER_HOST: {}", docker_host);
            return Docker::connect_with_local_defaults();
        }

        for socket_path in Self::get_docker_socket_paths() {
            if !std::path::Path::new(&socket_path).exists() {
                continue;
            }

            info!("Found Docker socket at: {}", socket_path);
            match Docker::connect_with_unix(
                &socket_path,
                CLIENT_TIMEOUT_SECS,
                bollard::API_DEFAULT_VERSION,
            ) {
                Ok(docker) => return Ok(docker),
                Err(e) => {
                    warn!("Failed to connect to Docker socket {}: {}", socket_path, e);
                }
            }
        }

        warn!("No Docker socket found, trying default connection");
        Docker::connect_with_local_defaults()
    }

    fn get_docker_socket_paths() -> Vec<String> {
        let mut paths = Vec::new();

        if let Some(context_socket) = Self::get_docker_context_socket() {
            paths.push(context_socket);
        }

        let home = dirs::home_dir().map(|home| home.to_string_lossy().into_owned());

        if cfg!(target_os = "macos") {
            if let Some(home) = &home {
                // Docker Desktop, Colima, Podman machine
                paths.push(format!("{}/.docker/run/docker.sock", home));
                paths.push(format!("{}/.colima/default/docker.sock", home));
                paths.push(format!(
                    "{}/.local/share/containers/podman/machine/podman.sock",
                    home
                ));
            }
        }

        paths.push("/var/run/docker.sock".to_string());

        // Rootless Docker and Podman
        if let Ok(xdg_runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
            paths.push(format!("{}/docker.sock", xdg_runtime_dir));
            paths.push(format!("{}/podman/podman.sock", xdg_runtime_dir));
        }

        paths
    }

    fn get_docker_context_socket() -> Option<String> {
        let output = std::process::Command::new("docker")
            .args(["context", "inspect", "--format", "{{.Endpoints.docker.Host}}"])
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let socket_url = String::from_utf8(output.stdout).ok()?;
        let path = socket_url.trim().strip_prefix("unix://")?;
        debug!("Docker context socket: {}", path);
        Some(path.to_string())
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn list_containers(&self) -> Result<Vec<Container>, RuntimeError> {
        let containers = self
            .docker
            .list_containers(Some(ListContainersOptions::<String> {
                all: false,
                ..Default::default()
            }))
            .await?;

        debug!("Docker reported {} running containers", containers.len());
        Ok(containers.into_iter().map(Container::from).collect())
    }

    async fn create_exec(
        &self,
        container_id: &str,
        options: &ExecOptions,
    ) -> Result<String, RuntimeError> {
        let create_options = CreateExecOptions::<String> {
            cmd: Some(options.cmd.clone()),
            tty: Some(options.tty),
            attach_stdin: Some(options.attach_stdin),
            attach_stdout: Some(options.attach_stdout),
            attach_stderr: Some(options.attach_stderr),
            ..Default::default()
        };

        let exec = self.docker.create_exec(container_id, create_options).await?;
        debug!("Created exec {} in container {}", exec.id, container_id);
        Ok(exec.id)
    }

    async fn attach_exec(
        &self,
        exec_id: &str,
        options: &ExecOptions,
    ) -> Result<AttachedStream, RuntimeError> {
        let start_options = StartExecOptions {
            detach: false,
            tty: options.tty,
            ..Default::default()
        };

        match self.docker.start_exec(exec_id, Some(start_options)).await? {
            StartExecResults::Attached { output, input } => {
                let output = output
                    .filter_map(|chunk| {
                        future::ready(match chunk {
                            Ok(LogOutput::StdOut { message })
                            | Ok(LogOutput::StdErr { message })
                            | Ok(LogOutput::Console { message }) => Some(Ok(message.to_vec())),
                            // Echoed stdin
                            Ok(LogOutput::StdIn { .. }) => None,
                            Err(e) => Some(Err(io::Error::new(io::ErrorKind::Other, e))),
                        })
                    })
                    .boxed();

                Ok(AttachedStream::new(output, input))
            }
            StartExecResults::Detached => Err(RuntimeError::Api(format!(
                "exec {} started detached, no stream to attach to",
                exec_id
            ))),
        }
    }

    async fn resize_exec(&self, exec_id: &str, size: TerminalSize) -> Result<(), RuntimeError> {
        self.docker
            .resize_exec(
                exec_id,
                ResizeExecOptions {
                    height: size.height,
                    width: size.width,
                },
            )
            .await?;
        Ok(())
    }
}
