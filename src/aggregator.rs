// Snapshot aggregation: fan out the three collectors, join, order, stamp.

use crate::collector::{collect_containers, collect_networks, collect_volumes};
use crate::error::SnapshotError;
use crate::models::{LabeledEntity, Selector, Snapshot};
use crate::runtime::LabelRuntime;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Builds snapshots from an injected runtime. Holds no per-call state, so one
/// aggregator can serve concurrent callers.
pub struct SnapshotAggregator<R: ?Sized> {
    runtime: Arc<R>,
    deadline: Option<Duration>,
}

impl<R: ?Sized> Clone for SnapshotAggregator<R> {
    fn clone(&self) -> Self {
        Self {
            runtime: self.runtime.clone(),
            deadline: self.deadline,
        }
    }
}

impl<R: LabelRuntime + ?Sized> SnapshotAggregator<R> {
    pub fn new(runtime: Arc<R>) -> Self {
        Self {
            runtime,
            deadline: None,
        }
    }

    /// Upper bound for a whole snapshot call.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Lists containers, volumes and networks concurrently and merges them.
    ///
    /// The first failure cancels the sibling queries and is returned as-is;
    /// nothing gathered by the other collectors is kept. Cancelling `cancel`
    /// aborts the call with [`SnapshotError::Cancelled`].
    ///
    /// Entities are ordered containers, volumes, networks, each block by name.
    pub async fn snapshot(
        &self,
        cancel: &CancellationToken,
        selector: &Selector,
    ) -> Result<Snapshot, SnapshotError> {
        let started = Instant::now();
        let scope = cancel.child_token();
        // an abandoned call must not leave queries running
        let _scope_guard = scope.clone().drop_guard();

        let joined = self.collect_all(&scope, selector);
        let (containers, volumes, networks) = match self.deadline {
            Some(limit) => match tokio::time::timeout(limit, joined).await {
                Ok(res) => res,
                Err(_) => {
                    scope.cancel();
                    Err(SnapshotError::DeadlineExceeded(limit))
                }
            },
            None => joined.await,
        }
        .inspect_err(|e| {
            debug!(error = %e, kind = ?e.kind(), operation = "snapshot", "snapshot failed");
        })?;

        let entities = merge(containers, volumes, networks);
        let snapshot = Snapshot {
            entities,
            taken_at: chrono::Utc::now(),
        };
        debug!(
            entities = snapshot.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "snapshot taken"
        );
        Ok(snapshot)
    }

    async fn collect_all(
        &self,
        scope: &CancellationToken,
        selector: &Selector,
    ) -> Result<
        (
            Vec<LabeledEntity>,
            Vec<LabeledEntity>,
            Vec<LabeledEntity>,
        ),
        SnapshotError,
    > {
        let runtime = self.runtime.as_ref();
        tokio::try_join!(
            scoped(scope, collect_containers(runtime, selector, scope)),
            scoped(scope, collect_volumes(runtime, selector, scope)),
            scoped(scope, collect_networks(runtime, selector, scope)),
        )
    }
}

/// Runs one collector inside the shared scope. A failure cancels the scope for
/// its siblings; a cancelled scope ends the collector even if the runtime ignores it.
async fn scoped<T, F>(scope: &CancellationToken, collector: F) -> Result<T, SnapshotError>
where
    F: Future<Output = Result<T, SnapshotError>>,
{
    let res = tokio::select! {
        biased;
        _ = scope.cancelled() => Err(SnapshotError::Cancelled),
        res = collector => res,
    };
    if res.is_err() {
        scope.cancel();
    }
    res
}

/// Fixed kind order, then name (id breaks ties) within each kind.
fn merge(
    mut containers: Vec<LabeledEntity>,
    mut volumes: Vec<LabeledEntity>,
    mut networks: Vec<LabeledEntity>,
) -> Vec<LabeledEntity> {
    let mut out = Vec::with_capacity(containers.len() + volumes.len() + networks.len());
    for block in [&mut containers, &mut volumes, &mut networks] {
        block.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        out.append(block);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityMeta;
    use std::collections::BTreeMap;

    fn volume(name: &str) -> LabeledEntity {
        LabeledEntity {
            id: name.into(),
            name: name.into(),
            labels: BTreeMap::from([("bosun.app".to_string(), "x".to_string())]),
            meta: EntityMeta::Volume {
                driver: "local".into(),
                instance: None,
            },
        }
    }

    #[test]
    fn merge_sorts_each_block_by_name() {
        let out = merge(vec![], vec![volume("b"), volume("B"), volume("a")], vec![]);
        let names: Vec<_> = out.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["B", "a", "b"]);
    }

    #[test]
    fn merge_breaks_name_ties_by_id() {
        let mut first = volume("same");
        first.id = "2".into();
        let mut second = volume("same");
        second.id = "1".into();
        let out = merge(vec![], vec![first, second], vec![]);
        assert_eq!(out[0].id, "1");
        assert_eq!(out[1].id, "2");
    }
}
