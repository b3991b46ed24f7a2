// ABOUTME: Container catalog that lists running containers and keeps only server candidates

use super::runtime::ContainerRuntime;
use crate::error::EnterError;
use crate::models::{Container, NAMING_CONVENTION};
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ContainerCatalog<R> {
    runtime: Arc<R>,
}

impl<R: ContainerRuntime> ContainerCatalog<R> {
    pub fn new(runtime: Arc<R>) -> Self {
        Self { runtime }
    }

    pub async fn list(&self) -> Result<Vec<Container>, EnterError> {
        self.runtime
            .list_containers()
            .await
            .map_err(EnterError::List)
    }

    /// Running containers that follow the server naming convention.
    pub async fn servers(&self) -> Result<Vec<Container>, EnterError> {
        let containers = self.list().await?;
        let total = containers.len();
        let servers = filter(containers, &NAMING_CONVENTION)?;
        info!("Found {} server(s) among {} running containers", servers.len(), total);
        Ok(servers)
    }
}

/// Keep containers with exactly one name matching `pattern`, in their original order.
pub fn filter(containers: Vec<Container>, pattern: &Regex) -> Result<Vec<Container>, EnterError> {
    let candidates: Vec<Container> = containers
        .into_iter()
        .filter(|container| {
            if container.matches(pattern) {
                return true;
            }
            match container.sole_name() {
                Some(name) => debug!("Skipping {}: name does not look like a server", name),
                None => debug!(
                    "Skipping {}: has {} names",
                    container.short_id(),
                    container.names.len()
                ),
            }
            false
        })
        .collect();

    if candidates.is_empty() {
        return Err(EnterError::NoCandidates);
    }

    Ok(candidates)
}
