use crate::state::Position;

/// Static map oracle exposing the playable bounds.
pub trait MapOracle {
    fn dimensions(&self) -> MapDimensions;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub rows: u32,
    pub cols: u32,
}

impl MapDimensions {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && (position.row as u32) < self.rows
            && (position.col as u32) < self.cols
    }

    pub fn center(&self) -> Position {
        Position::new((self.rows / 2) as i32, (self.cols / 2) as i32)
    }
}

impl MapOracle for MapDimensions {
    fn dimensions(&self) -> MapDimensions {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_half_open() {
        let dims = MapDimensions::new(4, 6);
        assert!(dims.contains(Position::new(0, 0)));
        assert!(dims.contains(Position::new(3, 5)));
        assert!(!dims.contains(Position::new(4, 0)));
        assert!(!dims.contains(Position::new(0, 6)));
        assert!(!dims.contains(Position::new(-1, 2)));
        assert_eq!(dims.center(), Position::new(2, 3));
    }
}
