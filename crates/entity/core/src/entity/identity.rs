use super::actions::ResolvedActions;
use crate::env::MapOracle;
use crate::state::{Color, EntityId, EntityKind, PopulationId, Position};
use crate::table::{AttributeCell, AttributeKind, AttributeTable, CellInit, TableError};

/// Who the entity is and where it stands.
///
/// Everything except the position is fixed at spawn. Position lives in the
/// attribute table so observers see it alongside the other columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    name: String,
    color: Color,
    kind: EntityKind,
    vision: u32,
    row: AttributeCell,
    col: AttributeCell,
    population: AttributeCell,
    self_flag: AttributeCell,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasePacket {
    pub r: i32,
    pub c: i32,
    pub name: String,
    pub color: String,
    pub population: u16,
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    pub is_self: bool,
}

impl Identity {
    /// `base_name` is suffixed with the numeric id, e.g. `Neural` + `#7` → `Neural7`.
    pub fn new(
        entity: EntityId,
        base_name: &str,
        color: Color,
        kind: EntityKind,
        vision: u32,
    ) -> Self {
        Self {
            name: format!("{base_name}{}", entity.get()),
            color,
            kind,
            vision,
            row: AttributeCell::new(entity, AttributeKind::Row),
            col: AttributeCell::new(entity, AttributeKind::Col),
            population: AttributeCell::new(entity, AttributeKind::Population),
            self_flag: AttributeCell::new(entity, AttributeKind::SelfFlag),
        }
    }

    pub(crate) fn initial_cells(
        position: Position,
        population: PopulationId,
        is_self: bool,
    ) -> [CellInit; 4] {
        [
            CellInit::new(AttributeKind::Row, i64::from(position.row)),
            CellInit::new(AttributeKind::Col, i64::from(position.col)),
            CellInit::new(AttributeKind::Population, i64::from(population.0)),
            CellInit::new(AttributeKind::SelfFlag, i64::from(is_self)),
        ]
    }

    /// Applies the movement resolver's destination, if any.
    ///
    /// # Panics
    ///
    /// If the destination lies outside the map; the resolver must never emit one.
    pub fn update<T, M>(
        &self,
        table: &mut T,
        map: &M,
        actions: &ResolvedActions,
    ) -> Result<(), TableError>
    where
        T: AttributeTable + ?Sized,
        M: MapOracle + ?Sized,
    {
        let Some(destination) = actions.movement else {
            return Ok(());
        };
        assert!(
            map.contains(destination),
            "movement resolver produced out-of-bounds destination {destination} for {}",
            self.name
        );
        self.row.set(table, i64::from(destination.row))?;
        self.col.set(table, i64::from(destination.col))
    }

    pub fn position<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<Position, TableError> {
        Ok(Position::new(
            self.row.get(table)? as i32,
            self.col.get(table)? as i32,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn vision(&self) -> u32 {
        self.vision
    }

    pub fn population<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<PopulationId, TableError> {
        Ok(PopulationId(self.population.get(table)? as u16))
    }

    pub fn is_self<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<bool, TableError> {
        Ok(self.self_flag.get(table)? != 0)
    }

    /// Committed identity columns for observers.
    pub fn packet<T: AttributeTable + ?Sized>(&self, table: &T) -> Result<BasePacket, TableError> {
        Ok(BasePacket {
            r: self.row.packet(table)?.val as i32,
            c: self.col.packet(table)?.val as i32,
            name: self.name.clone(),
            color: self.color.packet(),
            population: self.population.packet(table)?.val as u16,
            is_self: self.self_flag.packet(table)?.val != 0,
        })
    }
}
