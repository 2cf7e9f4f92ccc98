// Library for tests to access modules

pub mod aggregator;
pub mod collector;
pub mod config;
pub mod docker_repo;
pub mod error;
pub mod labels;
pub mod models;
pub mod runtime;

pub use aggregator::SnapshotAggregator;
pub use error::SnapshotError;
pub use models::{EntityMeta, Kind, LabeledEntity, Selector, Snapshot};
pub use runtime::LabelRuntime;
