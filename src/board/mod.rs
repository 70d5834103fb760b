//! Board geometry and occupancy queries
//!
//! The board itself stores nothing but its size. Who stands where is owned
//! by the rosters and reached through the `Occupancy` trait, so every query
//! here is a total function over any `i32` coordinate.

use serde::{Deserialize, Serialize};

use crate::core::types::Coord;

/// Anything that can answer "is this cell taken?"
pub trait Occupancy {
    /// True if a living unit or an obstacle sits on `pos`
    fn occupied(&self, pos: Coord) -> bool;
}

/// Square grid of `size` x `size` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub size: i32,
}

impl Board {
    pub fn new(size: i32) -> Self {
        Self { size }
    }

    /// Check if coordinate is within board bounds
    pub fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.size && pos.y < self.size
    }

    /// Check if any unit or obstacle occupies `pos`
    ///
    /// Out-of-range cells are never occupied.
    pub fn is_occupied(&self, occupancy: &impl Occupancy, pos: Coord) -> bool {
        self.in_bounds(pos) && occupancy.occupied(pos)
    }

    /// All cells, column by column (x outer, y inner)
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let size = self.size.max(0);
        (0..size).flat_map(move |x| (0..size).map(move |y| Coord::new(x, y)))
    }

    /// Convert a pointer position to the cell under it
    ///
    /// Positions left of or above the canvas give negative cells, which the
    /// rest of the engine treats as out of bounds.
    pub fn pixel_to_cell(px: f32, py: f32, cell_size: f32) -> Coord {
        Coord::new(
            (px / cell_size).floor() as i32,
            (py / cell_size).floor() as i32,
        )
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::core::config::DEFAULT_GRID_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<Coord>);

    impl Occupancy for Fixed {
        fn occupied(&self, pos: Coord) -> bool {
            self.0.contains(&pos)
        }
    }

    #[test]
    fn test_in_bounds_edges() {
        let board = Board::new(8);
        assert!(board.in_bounds(Coord::new(0, 0)));
        assert!(board.in_bounds(Coord::new(7, 7)));
        assert!(!board.in_bounds(Coord::new(8, 0)));
        assert!(!board.in_bounds(Coord::new(0, 8)));
        assert!(!board.in_bounds(Coord::new(-1, 3)));
    }

    #[test]
    fn test_occupied_out_of_range_is_false() {
        let board = Board::new(8);
        let occ = Fixed(vec![Coord::new(-1, -1), Coord::new(3, 3)]);
        assert!(!board.is_occupied(&occ, Coord::new(-1, -1)));
        assert!(board.is_occupied(&occ, Coord::new(3, 3)));
        assert!(!board.is_occupied(&occ, Coord::new(3, 4)));
    }

    #[test]
    fn test_cells_count_and_order() {
        let board = Board::new(3);
        let cells: Vec<Coord> = board.cells().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Coord::new(0, 0));
        assert_eq!(cells[1], Coord::new(0, 1));
        assert_eq!(cells[3], Coord::new(1, 0));
    }

    #[test]
    fn test_pixel_to_cell() {
        assert_eq!(Board::pixel_to_cell(0.0, 0.0, 50.0), Coord::new(0, 0));
        assert_eq!(Board::pixel_to_cell(149.9, 50.0, 50.0), Coord::new(2, 1));
        assert_eq!(Board::pixel_to_cell(-3.0, 420.0, 50.0), Coord::new(-1, 8));
    }
}
