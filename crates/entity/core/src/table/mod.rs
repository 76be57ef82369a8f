//! Shared tabular storage backing every entity attribute.
//!
//! Each entity owns one row of scalar cells. Entity components hold typed
//! [`AttributeCell`] handles and receive the table explicitly on every call;
//! the table itself is process-wide and outlives any single entity.
//!
//! Writes land in a staged layer that only the owning entity reads back.
//! Observers (rendering, telemetry, policy input) read the committed layer via
//! [`AttributeTable::observe`], which changes only when the driver calls
//! [`AttributeTable::commit`] at the end of a tick.
mod attribute;
mod cell;
mod error;
mod frame;

pub use attribute::{AttributeKind, AttributeMask};
pub use cell::{AttributeCell, CellPacket};
pub use error::TableError;
pub use frame::DataFrame;

use crate::state::EntityId;

/// Initial value and optional maximum for one attribute of a new row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellInit {
    pub kind: AttributeKind,
    pub value: i64,
    pub max: Option<i64>,
}

impl CellInit {
    pub const fn new(kind: AttributeKind, value: i64) -> Self {
        Self {
            kind,
            value,
            max: None,
        }
    }

    pub const fn bounded(kind: AttributeKind, value: i64, max: i64) -> Self {
        Self {
            kind,
            value,
            max: Some(max),
        }
    }
}

/// Attributes of one row that changed during the committed tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowChange {
    pub entity: EntityId,
    pub fields: AttributeMask,
}

/// Change events published by a commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableCommit {
    /// Rows written since the previous commit, in entity id order.
    pub changed: Vec<RowChange>,
    /// Rows torn down since the previous commit.
    pub removed: Vec<EntityId>,
}

impl TableCommit {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }

    pub fn fields_of(&self, entity: EntityId) -> AttributeMask {
        self.changed
            .iter()
            .find(|change| change.entity == entity)
            .map(|change| change.fields)
            .unwrap_or_default()
    }
}

/// Storage contract for entity attribute rows.
///
/// Implementors provide the primitive reads and writes; clamped
/// `increment`/`decrement` are derived from them. Values never go below zero
/// through `decrement` and never above the configured maximum through
/// `increment`, `set`, or `set_max`.
///
/// Every column except [`AttributeKind::Wilderness`] holds `0 ..= max`.
/// Writing a negative value or maximum to such a column, or passing a
/// negative amount to `increment`/`decrement`, is a caller bug and panics.
pub trait AttributeTable {
    /// Creates the row for `entity`. Attributes not listed start at zero, unbounded.
    fn init_row(&mut self, entity: EntityId, cells: &[CellInit]) -> Result<(), TableError>;

    /// Tears down the row. Observers keep seeing it until the next commit.
    fn remove_row(&mut self, entity: EntityId) -> Result<(), TableError>;

    fn contains_row(&self, entity: EntityId) -> bool;

    /// Current staged value.
    fn get(&self, entity: EntityId, kind: AttributeKind) -> Result<i64, TableError>;

    fn max(&self, entity: EntityId, kind: AttributeKind) -> Result<Option<i64>, TableError>;

    /// Writes a value, clamped to the cell maximum if one is configured.
    fn set(&mut self, entity: EntityId, kind: AttributeKind, value: i64) -> Result<(), TableError>;

    /// Replaces the maximum; a current value above it is clamped down.
    fn set_max(
        &mut self,
        entity: EntityId,
        kind: AttributeKind,
        max: Option<i64>,
    ) -> Result<(), TableError>;

    /// Committed value and maximum as seen by observers, or `None` if the row
    /// is not visible yet.
    fn observe_cell(&self, entity: EntityId, kind: AttributeKind) -> Option<CellPacket>;

    /// Publishes staged writes to observers.
    fn commit(&mut self) -> TableCommit;

    /// Committed value as seen by observers.
    fn observe(&self, entity: EntityId, kind: AttributeKind) -> Option<i64> {
        self.observe_cell(entity, kind).map(|cell| cell.val)
    }

    /// Adds `amount`, saturating at the maximum. Returns the new value.
    fn increment(
        &mut self,
        entity: EntityId,
        kind: AttributeKind,
        amount: i64,
    ) -> Result<i64, TableError> {
        assert!(amount >= 0, "negative increment {amount} of {kind} for entity {entity}");
        let current = self.get(entity, kind)?;
        let mut next = current.saturating_add(amount);
        if let Some(max) = self.max(entity, kind)? {
            next = next.min(max);
        }
        self.set(entity, kind, next)?;
        Ok(next)
    }

    /// Subtracts `amount`, saturating at zero. Returns the new value.
    fn decrement(
        &mut self,
        entity: EntityId,
        kind: AttributeKind,
        amount: i64,
    ) -> Result<i64, TableError> {
        assert!(amount >= 0, "negative decrement {amount} of {kind} for entity {entity}");
        let current = self.get(entity, kind)?;
        let next = current.saturating_sub(amount).max(0);
        self.set(entity, kind, next)?;
        Ok(next)
    }
}
