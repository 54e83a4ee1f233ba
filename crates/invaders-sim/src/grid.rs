//! Fixed-size invader arena indexed by (row, column).
//!
//! Row 0 is the top row; row `rows - 1` is nearest the player. The arena is
//! allocated once from the configuration and never resized. Slots only ever
//! go from `Alive` to `Empty`.

use invaders_core::config::SwarmConfig;
use invaders_core::types::{Position, UnitId};

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Alive { unit: UnitId, type_id: usize },
}

impl Slot {
    pub fn is_alive(&self) -> bool {
        matches!(self, Slot::Alive { .. })
    }
}

/// A surviving invader as seen through [`Grid::alive`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AliveUnit {
    pub row: usize,
    pub column: usize,
    pub unit: UnitId,
    pub type_id: usize,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    columns: usize,
    slots: Vec<Slot>,
    /// Last position of every slot. Dead slots keep the position they died at.
    positions: Vec<Position>,
    /// Trimmed invader type names, indexed by `type_id`.
    type_names: Vec<String>,
    alive: usize,
}

impl Grid {
    /// Populate the arena top to bottom, one block of rows per invader type.
    ///
    /// Expects a validated configuration.
    pub fn from_config(config: &SwarmConfig) -> Self {
        let rows = config.row_count();
        let columns = config.column_count;
        let mut slots = Vec::with_capacity(rows * columns);
        let mut positions = Vec::with_capacity(rows * columns);

        let mut row = 0;
        for (type_id, invader_type) in config.invader_types.iter().enumerate() {
            for _ in 0..invader_type.row_count {
                for column in 0..columns {
                    let unit = UnitId((row * columns + column) as u32);
                    slots.push(Slot::Alive { unit, type_id });
                    positions.push(config.slot_origin(row, column));
                }
                row += 1;
            }
        }

        Self {
            rows,
            columns,
            alive: slots.len(),
            slots,
            positions,
            type_names: config
                .invader_types
                .iter()
                .map(|t| t.key().to_string())
                .collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of slots, dead or alive.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn alive_count(&self) -> usize {
        self.alive
    }

    /// Slot at (row, column), or `None` outside the grid.
    pub fn slot(&self, row: usize, column: usize) -> Option<Slot> {
        self.index(row, column).map(|i| self.slots[i])
    }

    /// The living unit at (row, column). Out-of-range and dead slots both
    /// read as "no unit".
    pub fn unit_at(&self, row: usize, column: usize) -> Option<(UnitId, usize)> {
        match self.slot(row, column)? {
            Slot::Alive { unit, type_id } => Some((unit, type_id)),
            Slot::Empty => None,
        }
    }

    pub fn is_alive(&self, row: usize, column: usize) -> bool {
        self.unit_at(row, column).is_some()
    }

    /// Current position of a slot, including dead ones.
    pub fn position(&self, row: usize, column: usize) -> Option<Position> {
        self.index(row, column).map(|i| self.positions[i])
    }

    pub fn type_name(&self, type_id: usize) -> Option<&str> {
        self.type_names.get(type_id).map(String::as_str)
    }

    /// Living units in row-major order.
    pub fn alive(&self) -> impl Iterator<Item = AliveUnit> + '_ {
        self.slots
            .iter()
            .zip(&self.positions)
            .enumerate()
            .filter_map(move |(i, (slot, position))| match *slot {
                Slot::Alive { unit, type_id } => Some(AliveUnit {
                    row: i / self.columns,
                    column: i % self.columns,
                    unit,
                    type_id,
                    position: *position,
                }),
                Slot::Empty => None,
            })
    }

    /// Move every living unit by `delta`. Empty slots stay where they died.
    pub(crate) fn translate(&mut self, delta: Position) {
        for (slot, position) in self.slots.iter().zip(self.positions.iter_mut()) {
            if slot.is_alive() {
                *position += delta;
            }
        }
    }

    /// Empty a slot. Returns the unit that was there, or `None` if the slot
    /// was already empty or out of range.
    pub(crate) fn mark_dead(&mut self, row: usize, column: usize) -> Option<UnitId> {
        let i = self.index(row, column)?;
        match std::mem::replace(&mut self.slots[i], Slot::Empty) {
            Slot::Alive { unit, .. } => {
                self.alive -= 1;
                Some(unit)
            }
            Slot::Empty => None,
        }
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders_core::config::InvaderType;

    fn small_config() -> SwarmConfig {
        SwarmConfig {
            invader_types: vec![
                InvaderType::new(" Squid ", 30, 1),
                InvaderType::new("Crab", 20, 2),
            ],
            column_count: 4,
            origin: Position::new(0.0, 0.0),
            x_spacing: 2.0,
            y_spacing: 3.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_rows_follow_type_order() {
        let grid = Grid::from_config(&small_config());
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.alive_count(), 12);

        assert_eq!(grid.unit_at(0, 2), Some((UnitId(2), 0)));
        assert_eq!(grid.unit_at(1, 0), Some((UnitId(4), 1)));
        assert_eq!(grid.unit_at(2, 3), Some((UnitId(11), 1)));
        assert_eq!(grid.type_name(0), Some("Squid"));
        assert_eq!(grid.type_name(5), None);
    }

    #[test]
    fn test_initial_positions() {
        let grid = Grid::from_config(&small_config());
        assert_eq!(grid.position(0, 0), Some(Position::new(0.0, 0.0)));
        assert_eq!(grid.position(2, 3), Some(Position::new(6.0, -6.0)));
    }

    #[test]
    fn test_out_of_range_reads_as_no_unit() {
        let grid = Grid::from_config(&small_config());
        assert_eq!(grid.slot(3, 0), None);
        assert_eq!(grid.slot(0, 4), None);
        assert_eq!(grid.unit_at(usize::MAX, 0), None);
        assert_eq!(grid.position(0, 99), None);
        assert!(!grid.is_alive(10, 10));
    }

    #[test]
    fn test_mark_dead_is_permanent() {
        let mut grid = Grid::from_config(&small_config());
        assert_eq!(grid.mark_dead(2, 1), Some(UnitId(9)));
        assert_eq!(grid.slot(2, 1), Some(Slot::Empty));
        assert_eq!(grid.alive_count(), 11);

        // Second kill of the same slot finds nothing.
        assert_eq!(grid.mark_dead(2, 1), None);
        assert_eq!(grid.mark_dead(7, 7), None);
        assert_eq!(grid.alive_count(), 11);
    }

    #[test]
    fn test_translate_skips_dead_slots() {
        let mut grid = Grid::from_config(&small_config());
        grid.mark_dead(0, 0);
        grid.translate(Position::new(1.5, -1.0));

        assert_eq!(grid.position(0, 0), Some(Position::new(0.0, 0.0)));
        assert_eq!(grid.position(0, 1), Some(Position::new(3.5, -1.0)));
        assert_eq!(grid.alive().count(), 11);
        assert!(grid.alive().all(|u| !(u.row == 0 && u.column == 0)));
    }
}
