use std::collections::BTreeMap;

use strum::EnumCount;

use super::{
    AttributeKind, AttributeMask, AttributeTable, CellInit, CellPacket, RowChange, TableCommit,
    TableError,
};
use crate::state::EntityId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Slot {
    val: i64,
    max: Option<i64>,
}

impl Slot {
    fn clamp(self, value: i64) -> i64 {
        match self.max {
            Some(max) => value.min(max),
            None => value,
        }
    }
}

type Cells = [Slot; AttributeKind::COUNT];

fn assert_in_domain(entity: EntityId, kind: AttributeKind, value: i64) {
    assert!(
        kind.is_signed() || value >= 0,
        "negative value {value} for {kind} of entity {entity}"
    );
}

#[derive(Clone, Debug)]
struct Row {
    /// `None` once the row is removed but not yet committed.
    staged: Option<Cells>,
    /// `None` until the row's first commit.
    committed: Option<Cells>,
    dirty: AttributeMask,
}

/// In-memory attribute table with a staged and a committed layer.
#[derive(Clone, Debug, Default)]
pub struct DataFrame {
    rows: BTreeMap<EntityId, Row>,
}

impl DataFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows that are live in the staged layer.
    pub fn len(&self) -> usize {
        self.rows.values().filter(|row| row.staged.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn staged(&self, entity: EntityId) -> Result<&Cells, TableError> {
        self.rows
            .get(&entity)
            .and_then(|row| row.staged.as_ref())
            .ok_or(TableError::RowNotFound(entity))
    }

    fn staged_mut(&mut self, entity: EntityId) -> Result<(&mut Cells, &mut AttributeMask), TableError> {
        let row = self
            .rows
            .get_mut(&entity)
            .ok_or(TableError::RowNotFound(entity))?;
        let cells = row
            .staged
            .as_mut()
            .ok_or(TableError::RowNotFound(entity))?;
        Ok((cells, &mut row.dirty))
    }
}

impl AttributeTable for DataFrame {
    fn init_row(&mut self, entity: EntityId, cells: &[CellInit]) -> Result<(), TableError> {
        let mut staged: Cells = [Slot::default(); AttributeKind::COUNT];
        for init in cells {
            assert_in_domain(entity, init.kind, init.value);
            if let Some(max) = init.max {
                assert_in_domain(entity, init.kind, max);
            }
            let slot = Slot {
                val: 0,
                max: init.max,
            };
            staged[init.kind.index()] = Slot {
                val: slot.clamp(init.value),
                ..slot
            };
        }

        match self.rows.get_mut(&entity) {
            Some(row) if row.staged.is_some() => Err(TableError::RowExists(entity)),
            // Re-spawned before the removal was committed.
            Some(row) => {
                row.staged = Some(staged);
                row.dirty = AttributeMask::all();
                Ok(())
            }
            None => {
                self.rows.insert(
                    entity,
                    Row {
                        staged: Some(staged),
                        committed: None,
                        dirty: AttributeMask::all(),
                    },
                );
                Ok(())
            }
        }
    }

    fn remove_row(&mut self, entity: EntityId) -> Result<(), TableError> {
        let row = self
            .rows
            .get_mut(&entity)
            .filter(|row| row.staged.is_some())
            .ok_or(TableError::RowNotFound(entity))?;
        row.staged = None;
        row.dirty = AttributeMask::empty();
        Ok(())
    }

    fn contains_row(&self, entity: EntityId) -> bool {
        self.staged(entity).is_ok()
    }

    fn get(&self, entity: EntityId, kind: AttributeKind) -> Result<i64, TableError> {
        Ok(self.staged(entity)?[kind.index()].val)
    }

    fn max(&self, entity: EntityId, kind: AttributeKind) -> Result<Option<i64>, TableError> {
        Ok(self.staged(entity)?[kind.index()].max)
    }

    fn set(&mut self, entity: EntityId, kind: AttributeKind, value: i64) -> Result<(), TableError> {
        assert_in_domain(entity, kind, value);
        let (cells, dirty) = self.staged_mut(entity)?;
        let slot = &mut cells[kind.index()];
        let next = slot.clamp(value);
        if slot.val != next {
            slot.val = next;
            dirty.insert(kind.mask());
        }
        Ok(())
    }

    fn set_max(
        &mut self,
        entity: EntityId,
        kind: AttributeKind,
        max: Option<i64>,
    ) -> Result<(), TableError> {
        if let Some(max) = max {
            assert_in_domain(entity, kind, max);
        }
        let (cells, dirty) = self.staged_mut(entity)?;
        let slot = &mut cells[kind.index()];
        if slot.max != max {
            slot.max = max;
            slot.val = slot.clamp(slot.val);
            dirty.insert(kind.mask());
        }
        Ok(())
    }

    fn observe_cell(&self, entity: EntityId, kind: AttributeKind) -> Option<CellPacket> {
        let slot = self.rows.get(&entity)?.committed.as_ref()?[kind.index()];
        Some(CellPacket {
            val: slot.val,
            max: slot.max,
        })
    }

    fn commit(&mut self) -> TableCommit {
        let mut commit = TableCommit::default();

        self.rows.retain(|&entity, row| match row.staged {
            Some(staged) => {
                if !row.dirty.is_empty() {
                    commit.changed.push(RowChange {
                        entity,
                        fields: row.dirty,
                    });
                }
                row.committed = Some(staged);
                row.dirty = AttributeMask::empty();
                true
            }
            None => {
                if row.committed.is_some() {
                    commit.removed.push(entity);
                }
                false
            }
        });

        tracing::trace!(
            changed = commit.changed.len(),
            removed = commit.removed.len(),
            "attribute table committed"
        );
        commit
    }
}
