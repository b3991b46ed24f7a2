// ABOUTME: Docker integration for finding server containers and running exec sessions in them

pub mod catalog;
pub mod docker_runtime;
pub mod runtime;

pub use catalog::ContainerCatalog;
pub use docker_runtime::DockerRuntime;
pub use runtime::{AttachedStream, ContainerRuntime, ExecOptions, RemoteInput, RemoteOutput};
