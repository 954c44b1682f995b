//! Single intersections of the board.
//!
//! Points live in a flat arena owned by [`Board`](crate::board::Board) and are
//! addressed by index `row * size + col`. Each point knows the indices of its
//! orthogonal neighbors, computed once when the grid is built.

use std::fmt;

use crate::chain::ChainId;
use crate::constants::{BLACK_CHAR, FREE_CHAR, MAX_NEIGHBORS, WHITE_CHAR};
use crate::error::GameError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Convenience for callers that encode the side as a boolean.
    pub fn from_is_black(black: bool) -> Self {
        if black { Color::Black } else { Color::White }
    }

    /// Parse `black`/`white`/`b`/`w`, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Occupancy of an intersection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointState {
    #[default]
    Free,
    Black,
    White,
}

impl PointState {
    pub fn color(self) -> Option<Color> {
        match self {
            PointState::Free => None,
            PointState::Black => Some(Color::Black),
            PointState::White => Some(Color::White),
        }
    }

    pub fn is_free(self) -> bool {
        self == PointState::Free
    }

    pub fn to_char(self) -> char {
        match self {
            PointState::Free => FREE_CHAR,
            PointState::Black => BLACK_CHAR,
            PointState::White => WHITE_CHAR,
        }
    }
}

impl From<Color> for PointState {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => PointState::Black,
            Color::White => PointState::White,
        }
    }
}

/// One intersection: position, occupancy, neighbors and owning chain.
#[derive(Clone, Debug)]
pub struct Point {
    row: usize,
    col: usize,
    state: PointState,
    neighbors: Vec<usize>,
    chain: Option<ChainId>,
}

impl Point {
    /// Create a free point at `(row, col)` on a `size x size` grid.
    ///
    /// Neighbors are listed up, down, left, right, skipping those that fall
    /// off the grid. Nothing wraps around.
    pub fn new(size: usize, row: usize, col: usize) -> Self {
        debug_assert!(row < size && col < size);
        let mut neighbors = Vec::with_capacity(MAX_NEIGHBORS);
        if row > 0 {
            neighbors.push((row - 1) * size + col);
        }
        if row + 1 < size {
            neighbors.push((row + 1) * size + col);
        }
        if col > 0 {
            neighbors.push(row * size + col - 1);
        }
        if col + 1 < size {
            neighbors.push(row * size + col + 1);
        }
        Self {
            row,
            col,
            state: PointState::Free,
            neighbors,
            chain: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn state(&self) -> PointState {
        self.state
    }

    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Owning chain. Only meaningful while the point is occupied.
    pub fn chain(&self) -> Option<ChainId> {
        self.chain
    }

    /// Place a stone of `color` here.
    ///
    /// Only the point itself changes; chain assignment is done by the board,
    /// which owns the registry.
    pub fn occupy(&mut self, color: Color) -> Result<(), GameError> {
        match self.state.color() {
            Some(taken) => Err(GameError::AlreadyOccupied(taken)),
            None => {
                self.state = color.into();
                Ok(())
            }
        }
    }

    pub(crate) fn set_chain(&mut self, chain: ChainId) {
        self.chain = Some(chain);
    }

    /// Revert to a free intersection.
    pub(crate) fn free(&mut self) {
        self.state = PointState::Free;
        self.chain = None;
    }

    /// Overwrite state and owner, used when restoring a snapshot.
    pub(crate) fn restore(&mut self, state: PointState, chain: Option<ChainId>) {
        self.state = state;
        self.chain = chain;
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_counts() {
        let size = 5;
        assert_eq!(Point::new(size, 0, 0).neighbors().len(), 2);
        assert_eq!(Point::new(size, 0, 4).neighbors().len(), 2);
        assert_eq!(Point::new(size, 4, 0).neighbors().len(), 2);
        assert_eq!(Point::new(size, 4, 4).neighbors().len(), 2);
        assert_eq!(Point::new(size, 0, 2).neighbors().len(), 3);
        assert_eq!(Point::new(size, 2, 0).neighbors().len(), 3);
        assert_eq!(Point::new(size, 3, 3).neighbors().len(), 4);
    }

    #[test]
    fn test_neighbors_no_wraparound() {
        let p = Point::new(5, 0, 0);
        let mut n = p.neighbors().to_vec();
        n.sort();
        assert_eq!(n, vec![1, 5]);

        let p = Point::new(5, 3, 3);
        let mut n = p.neighbors().to_vec();
        n.sort();
        assert_eq!(n, vec![13, 17, 19, 23]);
    }

    #[test]
    fn test_single_point_board_has_no_neighbors() {
        assert!(Point::new(1, 0, 0).neighbors().is_empty());
    }

    #[test]
    fn test_occupy() {
        let mut p = Point::new(5, 1, 1);
        assert!(p.state().is_free());
        assert_eq!(p.occupy(Color::Black), Ok(()));
        assert_eq!(p.state(), PointState::Black);
        assert_eq!(
            p.occupy(Color::White),
            Err(GameError::AlreadyOccupied(Color::Black))
        );
        assert_eq!(p.state(), PointState::Black);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("B"), Some(Color::Black));
        assert_eq!(Color::parse("white"), Some(Color::White));
        assert_eq!(Color::parse("red"), None);
        assert_eq!(Color::from_is_black(false), Color::White);
        assert_eq!(Color::Black.opposite(), Color::White);
    }
}
