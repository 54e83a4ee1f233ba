//! Column spawners: one per column, firing from the bottom-most survivor.
//!
//! A spawner keeps an explicit row pointer instead of scanning its column.
//! The pointer starts at the bottom row and moves up by one on every hit, so
//! it always names the lowest living unit of the column until the column is
//! exhausted and the spawner deactivates.

use rand::Rng;

use invaders_core::config::FireWindow;
use invaders_core::types::{Position, SpawnerId, UnitId};

use crate::grid::Grid;

/// A projectile launch requested by a spawner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub spawner_id: SpawnerId,
    pub position: Position,
}

/// The unit a spawner was tracking when it was hit. The caller empties the
/// slot through the formation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnerKill {
    pub row: usize,
    pub column: usize,
    pub unit: UnitId,
    pub type_id: usize,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct ColumnSpawner {
    id: SpawnerId,
    /// `None` once the column is exhausted.
    current_row: Option<usize>,
    fire_timer: f32,
    fire_interval: f32,
    fire_window: FireWindow,
    muzzle_offset: Position,
    position: Position,
}

impl ColumnSpawner {
    /// Bind to the bottom row of `column` and roll the first fire interval.
    pub fn setup<R: Rng + ?Sized>(
        column: usize,
        grid: &Grid,
        fire_window: FireWindow,
        muzzle_offset: Position,
        rng: &mut R,
    ) -> Self {
        let mut spawner = Self {
            id: SpawnerId(column as u32),
            current_row: grid.rows().checked_sub(1),
            fire_timer: 0.0,
            fire_interval: 0.0,
            fire_window,
            muzzle_offset,
            position: Position::ZERO,
        };
        spawner.bind(grid, rng);
        spawner
    }

    pub fn id(&self) -> SpawnerId {
        self.id
    }

    pub fn column(&self) -> usize {
        self.id.column()
    }

    pub fn current_row(&self) -> Option<usize> {
        self.current_row
    }

    pub fn is_active(&self) -> bool {
        self.current_row.is_some()
    }

    /// Last known position of the tracked unit.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn fire_interval(&self) -> f32 {
        self.fire_interval
    }

    pub fn fire_timer(&self) -> f32 {
        self.fire_timer
    }

    /// Follow the target and fire when the interval elapses.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, grid: &Grid, rng: &mut R) -> Option<Shot> {
        let row = self.current_row?;
        if let Some(position) = grid.position(row, self.column()) {
            self.position = position;
        }

        self.fire_timer += dt;
        if self.fire_timer < self.fire_interval {
            return None;
        }

        self.fire_interval = self.roll_interval(rng);
        self.fire_timer = 0.0;
        Some(Shot {
            spawner_id: self.id,
            position: self.position + self.muzzle_offset,
        })
    }

    /// Handle an incoming friendly projectile.
    ///
    /// Moves the row pointer up one row and re-binds, or deactivates when the
    /// column is exhausted. Returns the unit that was being tracked. Inactive
    /// spawners ignore the hit.
    pub fn on_projectile_hit<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        rng: &mut R,
    ) -> Option<SpawnerKill> {
        let row = self.current_row?;
        let column = self.column();
        let kill = grid.unit_at(row, column).map(|(unit, type_id)| SpawnerKill {
            row,
            column,
            unit,
            type_id,
            position: grid.position(row, column).unwrap_or(self.position),
        });

        self.current_row = row.checked_sub(1);
        if self.current_row.is_some() {
            self.bind(grid, rng);
        }
        kill
    }

    /// Re-target the current row. The fire timer carries over; only the
    /// interval is re-rolled.
    fn bind<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) {
        let Some(row) = self.current_row else {
            return;
        };
        debug_assert!(
            grid.is_alive(row, self.column()),
            "spawner {} bound to dead slot ({row}, {})",
            self.id.0,
            self.column()
        );
        match grid.position(row, self.column()) {
            Some(position) => {
                self.position = position;
                self.fire_interval = self.roll_interval(rng);
            }
            None => self.current_row = None,
        }
    }

    fn roll_interval<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.fire_window.min_secs..=self.fire_window.max_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders_core::config::{InvaderType, SwarmConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn column_grid(rows: usize) -> Grid {
        Grid::from_config(&SwarmConfig {
            invader_types: vec![InvaderType::new("Crab", 20, rows)],
            column_count: 5,
            origin: Position::new(0.0, 0.0),
            x_spacing: 10.0,
            y_spacing: 10.0,
            ..Default::default()
        })
    }

    fn spawner(column: usize, grid: &Grid, window: FireWindow, rng: &mut ChaCha8Rng) -> ColumnSpawner {
        ColumnSpawner::setup(column, grid, window, Position::new(0.0, -2.0), rng)
    }

    #[test]
    fn test_setup_targets_bottom_row() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = column_grid(5);
        let s = spawner(3, &grid, FireWindow::new(1.0, 2.0), &mut rng);

        assert_eq!(s.id(), SpawnerId(3));
        assert_eq!(s.current_row(), Some(4));
        assert_eq!(s.position(), Position::new(30.0, -40.0));
        assert!((1.0..=2.0).contains(&s.fire_interval()));
    }

    #[test]
    fn test_fires_at_muzzle_when_interval_elapses() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let grid = column_grid(2);
        let mut s = spawner(1, &grid, FireWindow::new(0.5, 0.5), &mut rng);

        assert_eq!(s.tick(0.25, &grid, &mut rng), None);
        let shot = s.tick(0.25, &grid, &mut rng).expect("interval elapsed");
        assert_eq!(shot.spawner_id, SpawnerId(1));
        assert_eq!(shot.position, Position::new(10.0, -12.0));
        assert_eq!(s.fire_timer(), 0.0);
    }

    #[test]
    fn test_follows_target_position() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut grid = column_grid(2);
        let mut s = spawner(0, &grid, FireWindow::new(10.0, 10.0), &mut rng);

        grid.translate(Position::new(4.0, -1.0));
        s.tick(0.1, &grid, &mut rng);
        assert_eq!(s.position(), Position::new(4.0, -11.0));
    }

    #[test]
    fn test_intervals_stay_in_window() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let grid = column_grid(1);
        let mut s = spawner(0, &grid, FireWindow::new(1.0, 3.0), &mut rng);
        for _ in 0..500 {
            s.tick(0.5, &grid, &mut rng);
            assert!((1.0..=3.0).contains(&s.fire_interval()));
        }
    }

    #[test]
    fn test_five_hits_exhaust_five_row_column() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut grid = column_grid(5);
        let mut s = spawner(3, &grid, FireWindow::new(1.0, 2.0), &mut rng);

        for expected_row in (0..5).rev() {
            assert!(s.is_active());
            let kill = s.on_projectile_hit(&grid, &mut rng).expect("live target");
            assert_eq!((kill.row, kill.column), (expected_row, 3));
            grid.mark_dead(kill.row, kill.column);
        }

        assert!(!s.is_active());
        assert_eq!(s.current_row(), None);
        assert_eq!(s.on_projectile_hit(&grid, &mut rng), None);
        assert_eq!(s.tick(100.0, &grid, &mut rng), None);
    }

    #[test]
    fn test_hit_rebinds_to_row_above() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut grid = column_grid(3);
        let mut s = spawner(2, &grid, FireWindow::new(1.0, 2.0), &mut rng);

        let kill = s.on_projectile_hit(&grid, &mut rng).unwrap();
        grid.mark_dead(kill.row, kill.column);
        assert_eq!(kill.position, Position::new(20.0, -20.0));
        assert_eq!(s.current_row(), Some(1));
        assert_eq!(s.position(), Position::new(20.0, -10.0));
        assert!(grid.is_alive(1, 2));
    }

    #[test]
    fn test_rebind_keeps_fire_timer() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = column_grid(3);
        let mut s = spawner(0, &grid, FireWindow::new(5.0, 5.0), &mut rng);

        s.tick(1.5, &grid, &mut rng);
        s.on_projectile_hit(&grid, &mut rng);
        assert_eq!(s.fire_timer(), 1.5);
    }
}
