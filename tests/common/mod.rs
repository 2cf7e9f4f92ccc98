// Shared test helpers: an in-memory LabelRuntime

#![allow(dead_code)]

use async_trait::async_trait;
use bosun::SnapshotError;
use bosun::models::Kind;
use bosun::runtime::{ContainerRecord, LabelRuntime, NetworkRecord, VolumeRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
pub struct FakeRuntime {
    pub running: Vec<ContainerRecord>,
    pub stopped: Vec<ContainerRecord>,
    pub volumes: Vec<VolumeRecord>,
    pub networks: Vec<NetworkRecord>,
    /// Kinds whose list call fails (after any delay).
    pub failing: Vec<Kind>,
    pub delays: HashMap<Kind, Duration>,
    pub calls: AtomicUsize,
    /// List calls dropped before they answered.
    pub aborted: AtomicUsize,
    /// List calls that saw the cancellation token fire.
    pub saw_cancel: AtomicUsize,
}

struct InFlight<'a> {
    aborted: &'a AtomicUsize,
    done: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.aborted.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub fn query_error(kind: Kind) -> SnapshotError {
    SnapshotError::from_docker(
        kind,
        bollard::errors::Error::DockerResponseServerError {
            status_code: 500,
            message: format!("{} list exploded", kind),
        },
    )
}

impl FakeRuntime {
    pub fn with_delay(mut self, kind: Kind, delay: Duration) -> Self {
        self.delays.insert(kind, delay);
        self
    }

    pub fn failing(mut self, kind: Kind) -> Self {
        self.failing.push(kind);
        self
    }

    async fn answer<T>(
        &self,
        kind: Kind,
        cancel: &CancellationToken,
        value: impl FnOnce() -> T,
    ) -> Result<T, SnapshotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut guard = InFlight {
            aborted: &self.aborted,
            done: false,
        };
        let delay = self.delays.get(&kind).copied().unwrap_or_default();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                guard.done = true;
                self.saw_cancel.fetch_add(1, Ordering::SeqCst);
                return Err(SnapshotError::Cancelled);
            }
            _ = tokio::time::sleep(delay) => {}
        }
        guard.done = true;
        if self.failing.contains(&kind) {
            return Err(query_error(kind));
        }
        Ok(value())
    }
}

#[async_trait]
impl LabelRuntime for FakeRuntime {
    async fn list_containers(
        &self,
        include_stopped: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<ContainerRecord>, SnapshotError> {
        self.answer(Kind::Container, cancel, || {
            let mut out = self.running.clone();
            if include_stopped {
                out.extend(self.stopped.iter().cloned());
            }
            out
        })
        .await
    }

    async fn list_volumes(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<VolumeRecord>, SnapshotError> {
        self.answer(Kind::Volume, cancel, || self.volumes.clone())
            .await
    }

    async fn list_networks(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<NetworkRecord>, SnapshotError> {
        self.answer(Kind::Network, cancel, || self.networks.clone())
            .await
    }
}

pub fn labels(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn container(id: &str, name: &str, pairs: &[(&str, &str)]) -> ContainerRecord {
    ContainerRecord {
        id: id.into(),
        names: vec![format!("/{}", name)],
        image: format!("{}:latest", name),
        labels: labels(pairs),
    }
}

pub fn volume(name: &str, pairs: &[(&str, &str)]) -> VolumeRecord {
    VolumeRecord {
        name: name.into(),
        driver: "local".into(),
        labels: labels(pairs),
    }
}

pub fn network(id: &str, name: &str, pairs: &[(&str, &str)]) -> NetworkRecord {
    NetworkRecord {
        id: id.into(),
        name: name.into(),
        driver: "bridge".into(),
        scope: "local".into(),
        labels: labels(pairs),
    }
}
