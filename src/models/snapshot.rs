// Point-in-time inventory

use super::{Kind, LabeledEntity};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    #[serde(rename = "Entities")]
    pub entities: Vec<LabeledEntity>,
    #[serde(rename = "TakenAt")]
    pub taken_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = &LabeledEntity> {
        self.entities.iter().filter(move |e| e.kind() == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }
}
