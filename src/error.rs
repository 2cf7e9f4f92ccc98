// Snapshot error taxonomy

use crate::models::Kind;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The runtime client could not be constructed.
    #[error("failed to connect to Docker. Is Docker running?")]
    Connect(#[source] bollard::errors::Error),

    /// The runtime could not be reached while listing `kind`.
    #[error("cannot reach Docker while listing {kind}s")]
    Connectivity {
        kind: Kind,
        #[source]
        source: bollard::errors::Error,
    },

    /// The runtime answered the list call for `kind` with an error.
    #[error("listing {kind}s failed")]
    Query {
        kind: Kind,
        #[source]
        source: bollard::errors::Error,
    },

    #[error("snapshot cancelled")]
    Cancelled,

    #[error("snapshot deadline of {0:?} exceeded")]
    DeadlineExceeded(std::time::Duration),
}

impl SnapshotError {
    /// Splits a bollard error into connectivity vs. query failure for `kind`.
    pub fn from_docker(kind: Kind, source: bollard::errors::Error) -> Self {
        use bollard::errors::Error as E;
        match source {
            E::DockerResponseServerError { .. } | E::JsonSerdeError { .. } => {
                SnapshotError::Query { kind, source }
            }
            _ => SnapshotError::Connectivity { kind, source },
        }
    }

    /// True for caller cancellation and deadline expiry; callers may retry these.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            SnapshotError::Cancelled | SnapshotError::DeadlineExceeded(_)
        )
    }

    pub fn kind(&self) -> Option<Kind> {
        match self {
            SnapshotError::Connectivity { kind, .. } | SnapshotError::Query { kind, .. } => {
                Some(*kind)
            }
            _ => None,
        }
    }
}
