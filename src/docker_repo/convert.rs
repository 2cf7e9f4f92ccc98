// Map bollard list responses onto runtime records.

use crate::runtime::{ContainerRecord, NetworkRecord, VolumeRecord};
use bollard::models::{ContainerSummary, Network, Volume};

pub(crate) fn container_record(c: ContainerSummary) -> ContainerRecord {
    ContainerRecord {
        id: c.id.unwrap_or_default(),
        names: c.names.unwrap_or_default(),
        image: c.image.unwrap_or_default(),
        labels: c.labels.unwrap_or_default(),
    }
}

// Volumes have no id; the name is the identity.
pub(crate) fn volume_record(v: Volume) -> VolumeRecord {
    VolumeRecord {
        name: v.name,
        driver: v.driver,
        labels: v.labels,
    }
}

pub(crate) fn network_record(n: Network) -> NetworkRecord {
    NetworkRecord {
        id: n.id.unwrap_or_default(),
        name: n.name.unwrap_or_default(),
        driver: n.driver.unwrap_or_default(),
        scope: n.scope.unwrap_or_default(),
        labels: n.labels.unwrap_or_default(),
    }
}
