// Docker label queries via bollard

mod convert;

use crate::config::DockerConfig;
use crate::error::SnapshotError;
use crate::models::Kind;
use crate::runtime::{ContainerRecord, LabelRuntime, NetworkRecord, VolumeRecord};
use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::{ListContainersOptions, ListNetworksOptions, ListVolumesOptions};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Shared, read-only Docker handle. Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct DockerRepo {
    docker: Docker,
}

impl DockerRepo {
    /// Builds the client. No request is sent until the first list call.
    pub fn connect(config: &DockerConfig) -> Result<Self, SnapshotError> {
        let docker = match &config.socket {
            Some(path) => {
                Docker::connect_with_unix(path, config.timeout_secs, bollard::API_DEFAULT_VERSION)
            }
            None => Docker::connect_with_defaults()
                .map(|d| d.with_timeout(Duration::from_secs(config.timeout_secs))),
        }
        .map_err(SnapshotError::Connect)?;
        Ok(Self { docker })
    }
}

/// Runs one list call unless `cancel` fires first; dropping the request aborts it.
async fn cancellable<T, F>(
    kind: Kind,
    cancel: &CancellationToken,
    call: F,
) -> Result<T, SnapshotError>
where
    F: Future<Output = Result<T, bollard::errors::Error>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(kind = %kind, "docker list call cancelled");
            Err(SnapshotError::Cancelled)
        }
        res = call => res.map_err(|e| SnapshotError::from_docker(kind, e)),
    }
}

#[async_trait]
impl LabelRuntime for DockerRepo {
    async fn list_containers(
        &self,
        include_stopped: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<ContainerRecord>, SnapshotError> {
        let options = ListContainersOptions {
            all: include_stopped,
            ..Default::default()
        };
        let containers = cancellable(
            Kind::Container,
            cancel,
            self.docker.list_containers(Some(options)),
        )
        .await?;
        Ok(containers.into_iter().map(convert::container_record).collect())
    }

    async fn list_volumes(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<VolumeRecord>, SnapshotError> {
        let response = cancellable(
            Kind::Volume,
            cancel,
            self.docker.list_volumes(Some(ListVolumesOptions::default())),
        )
        .await?;
        Ok(response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(convert::volume_record)
            .collect())
    }

    async fn list_networks(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<NetworkRecord>, SnapshotError> {
        let networks = cancellable(
            Kind::Network,
            cancel,
            self.docker.list_networks(Some(ListNetworksOptions::default())),
        )
        .await?;
        Ok(networks.into_iter().map(convert::network_record).collect())
    }
}
