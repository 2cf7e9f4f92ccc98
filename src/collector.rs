// Per-kind collectors: query, filter labels, build entities.

use crate::error::SnapshotError;
use crate::labels::{
    LABEL_COMPOSE_PROJECT, LABEL_COMPOSE_SERVICE, filter_by_prefixes, instance_of,
};
use crate::models::{EntityMeta, LabeledEntity, Selector};
use crate::runtime::{ContainerRecord, LabelRuntime, NetworkRecord, VolumeRecord};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub async fn collect_containers<R: LabelRuntime + ?Sized>(
    runtime: &R,
    selector: &Selector,
    cancel: &CancellationToken,
) -> Result<Vec<LabeledEntity>, SnapshotError> {
    let records = runtime
        .list_containers(selector.stopped_included(), cancel)
        .await?;
    let listed = records.len();
    let out: Vec<_> = records
        .into_iter()
        .filter_map(|c| container_entity(c, selector.prefixes()))
        .collect();
    debug!(kind = "container", listed, kept = out.len(), "collected");
    Ok(out)
}

pub async fn collect_volumes<R: LabelRuntime + ?Sized>(
    runtime: &R,
    selector: &Selector,
    cancel: &CancellationToken,
) -> Result<Vec<LabeledEntity>, SnapshotError> {
    let records = runtime.list_volumes(cancel).await?;
    let listed = records.len();
    let out: Vec<_> = records
        .into_iter()
        .filter_map(|v| volume_entity(v, selector.prefixes()))
        .collect();
    debug!(kind = "volume", listed, kept = out.len(), "collected");
    Ok(out)
}

pub async fn collect_networks<R: LabelRuntime + ?Sized>(
    runtime: &R,
    selector: &Selector,
    cancel: &CancellationToken,
) -> Result<Vec<LabeledEntity>, SnapshotError> {
    let records = runtime.list_networks(cancel).await?;
    let listed = records.len();
    let out: Vec<_> = records
        .into_iter()
        .filter_map(|n| network_entity(n, selector.prefixes()))
        .collect();
    debug!(kind = "network", listed, kept = out.len(), "collected");
    Ok(out)
}

/// `None` when no label survives the prefix filter.
pub(crate) fn container_entity(c: ContainerRecord, prefixes: &[String]) -> Option<LabeledEntity> {
    let labels = filter_by_prefixes(&c.labels, prefixes);
    if labels.is_empty() {
        return None;
    }
    let name = c
        .names
        .first()
        .map(|n| n.strip_prefix('/').unwrap_or(n).to_string())
        .unwrap_or_default();
    let raw = |key: &str| c.labels.get(key).cloned().unwrap_or_default();
    let meta = EntityMeta::Container {
        compose_project: raw(LABEL_COMPOSE_PROJECT),
        compose_service: raw(LABEL_COMPOSE_SERVICE),
        image: c.image.clone(),
        instance: instance_of(&c.labels),
    };
    Some(LabeledEntity {
        id: c.id,
        name,
        labels,
        meta,
    })
}

pub(crate) fn volume_entity(v: VolumeRecord, prefixes: &[String]) -> Option<LabeledEntity> {
    let labels = filter_by_prefixes(&v.labels, prefixes);
    if labels.is_empty() {
        return None;
    }
    let meta = EntityMeta::Volume {
        driver: v.driver,
        instance: instance_of(&v.labels),
    };
    Some(LabeledEntity {
        id: v.name.clone(),
        name: v.name,
        labels,
        meta,
    })
}

pub(crate) fn network_entity(n: NetworkRecord, prefixes: &[String]) -> Option<LabeledEntity> {
    let labels = filter_by_prefixes(&n.labels, prefixes);
    if labels.is_empty() {
        return None;
    }
    let meta = EntityMeta::Network {
        driver: n.driver,
        scope: n.scope,
        instance: instance_of(&n.labels),
    };
    Some(LabeledEntity {
        id: n.id,
        name: n.name,
        labels,
        meta,
    })
}
