use crate::error::{CoreError, ErrorSeverity};
use crate::state::EntityId;

/// Errors raised by attribute table access.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableError {
    #[error("no attribute row for entity {0}")]
    RowNotFound(EntityId),

    #[error("attribute row for entity {0} already exists")]
    RowExists(EntityId),

    #[error("attribute row for entity {0} has not been committed yet")]
    NotCommitted(EntityId),
}

impl CoreError for TableError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // An entity component holding a cell whose row is gone means the
            // registry and table fell out of sync.
            Self::RowNotFound(_) => ErrorSeverity::Internal,
            Self::RowExists(_) => ErrorSeverity::Validation,
            // Observers asked before the spawning tick was committed.
            Self::NotCommitted(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RowNotFound(_) => "TABLE_ROW_NOT_FOUND",
            Self::RowExists(_) => "TABLE_ROW_EXISTS",
            Self::NotCommitted(_) => "TABLE_ROW_NOT_COMMITTED",
        }
    }
}
