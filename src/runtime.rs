// Container-runtime query port. DockerRepo is the production implementation.

use crate::error::SnapshotError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    /// As reported by the runtime, usually with a leading '/'.
    pub names: Vec<String>,
    pub image: String,
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeRecord {
    pub name: String,
    pub driver: String,
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRecord {
    pub id: String,
    pub name: String,
    pub driver: String,
    pub scope: String,
    pub labels: HashMap<String, String>,
}

/// Read-only listing operations against a container runtime.
///
/// Implementations should stop waiting and return [`SnapshotError::Cancelled`]
/// once `cancel` fires.
#[async_trait]
pub trait LabelRuntime: Send + Sync {
    async fn list_containers(
        &self,
        include_stopped: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<ContainerRecord>, SnapshotError>;

    async fn list_volumes(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<VolumeRecord>, SnapshotError>;

    async fn list_networks(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<NetworkRecord>, SnapshotError>;
}
