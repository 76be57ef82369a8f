use super::{AttributeKind, AttributeTable, TableError};
use crate::state::EntityId;

/// Typed handle to one attribute of one entity row.
///
/// The handle does not own storage; every operation takes the table
/// explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttributeCell {
    entity: EntityId,
    kind: AttributeKind,
}

/// Committed snapshot of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPacket {
    pub val: i64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub max: Option<i64>,
}

impl AttributeCell {
    pub const fn new(entity: EntityId, kind: AttributeKind) -> Self {
        Self { entity, kind }
    }

    pub const fn entity(&self) -> EntityId {
        self.entity
    }

    pub const fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn get<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<i64, TableError> {
        table.get(self.entity, self.kind)
    }

    pub fn max<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<Option<i64>, TableError> {
        table.max(self.entity, self.kind)
    }

    pub fn set<T: AttributeTable + ?Sized>(
        &self,
        table: &mut T,
        value: i64,
    ) -> Result<(), TableError> {
        table.set(self.entity, self.kind, value)
    }

    pub fn set_max<T: AttributeTable + ?Sized>(
        &self,
        table: &mut T,
        max: i64,
    ) -> Result<(), TableError> {
        table.set_max(self.entity, self.kind, Some(max))
    }

    pub fn increment<T: AttributeTable + ?Sized>(
        &self,
        table: &mut T,
        amount: i64,
    ) -> Result<i64, TableError> {
        table.increment(self.entity, self.kind, amount)
    }

    pub fn decrement<T: AttributeTable + ?Sized>(
        &self,
        table: &mut T,
        amount: i64,
    ) -> Result<i64, TableError> {
        table.decrement(self.entity, self.kind, amount)
    }

    /// True when the value has reached zero.
    pub fn is_empty<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<bool, TableError> {
        Ok(self.get(table)? <= 0)
    }

    /// Value and maximum as of the last commit.
    ///
    /// # Errors
    ///
    /// [`TableError::NotCommitted`] if the row has never been committed.
    pub fn packet<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<CellPacket, TableError> {
        table
            .observe_cell(self.entity, self.kind)
            .ok_or(TableError::NotCommitted(self.entity))
    }
}
