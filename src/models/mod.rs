// Domain models: selector in, snapshot out

mod entity;
mod selector;
mod snapshot;

pub use entity::{EntityMeta, Kind, LabeledEntity};
pub use selector::Selector;
pub use snapshot::Snapshot;
