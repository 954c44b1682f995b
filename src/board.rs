//! The grid of intersections and the move transaction.
//!
//! A move is applied speculatively: the stone is placed, chains are updated,
//! opposing chains without liberties are captured, and only then is the
//! mover's own chain checked. A move that leaves its own chain dead is undone
//! by restoring the snapshot taken after the last accepted move.

use std::fmt;

use tracing::debug;

use crate::chain::{Chain, ChainId, Chains};
use crate::constants::MAX_SIZE;
use crate::error::{GameError, InvariantViolation};
use crate::point::{Color, Point, PointState};

/// Per-point state and the chain registry as of the last accepted move.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    cells: Vec<(PointState, Option<ChainId>)>,
    chains: Chains,
}

/// An N x N Go board with chain bookkeeping and one step of undo.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    points: Vec<Point>,
    chains: Chains,
    snapshot: Snapshot,
}

impl Board {
    /// Create an empty `size x size` board.
    ///
    /// Fails with [`GameError::InvalidSize`] for 0 and for sides above
    /// [`MAX_SIZE`].
    pub fn new(size: usize) -> Result<Self, GameError> {
        let area = match size.checked_mul(size) {
            Some(area) if size > 0 && size <= MAX_SIZE => area,
            _ => return Err(GameError::InvalidSize(to_i64(size))),
        };
        let points: Vec<Point> = (0..area)
            .map(|i| Point::new(size, i / size, i % size))
            .collect();
        let chains = Chains::new();
        let snapshot = Snapshot {
            cells: vec![(PointState::Free, None); area],
            chains: chains.clone(),
        };
        Ok(Self {
            size,
            points,
            chains,
            snapshot,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn point(&self, row: usize, col: usize) -> Option<&Point> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(&self.points[self.idx(row, col)])
    }

    pub fn state(&self, row: usize, col: usize) -> Option<PointState> {
        self.point(row, col).map(Point::state)
    }

    /// Coordinates of the orthogonal neighbors of `(row, col)`.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        match self.point(row, col) {
            Some(p) => p
                .neighbors()
                .iter()
                .map(|&n| (n / self.size, n % self.size))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Chain owning the stone at `(row, col)`, if any.
    pub fn chain_at(&self, row: usize, col: usize) -> Option<&Chain> {
        self.point(row, col)
            .and_then(Point::chain)
            .and_then(|id| self.chains.get(id))
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    pub fn chains(&self) -> &Chains {
        &self.chains
    }

    /// Member coordinates of a chain.
    pub fn chain_coords(&self, chain: &Chain) -> Vec<(usize, usize)> {
        chain
            .points()
            .iter()
            .map(|&p| (p / self.size, p % self.size))
            .collect()
    }

    /// Place a stone and resolve captures.
    ///
    /// Returns the number of opposing stones removed. On error the board is
    /// exactly as it was before the call.
    pub fn play(&mut self, row: usize, col: usize, color: Color) -> Result<usize, GameError> {
        if !self.in_bounds(row, col) {
            return Err(GameError::OutOfBounds {
                row: to_i64(row),
                col: to_i64(col),
            });
        }
        let idx = self.idx(row, col);
        self.points[idx].occupy(color)?;
        let own = self.chains.assign(&mut self.points, idx, color);

        let mut captured = 0;
        for dead in self.chains.dead(color.opposite()) {
            let n = self.chains.capture(&mut self.points, dead);
            debug!(chain = %dead, stones = n, "captured chain");
            captured += n;
        }

        let own_liberties = self.chains.get(own).map_or(0, Chain::liberties);
        if own_liberties == 0 {
            debug!(row, col, %color, chain = %own, "self-capture rejected");
            self.rollback();
            return Err(GameError::SelfCaptureForbidden);
        }

        self.checkpoint();
        debug_assert_eq!(self.validate(), Ok(()));
        Ok(captured)
    }

    /// Record the current state as the last known-legal one.
    pub fn checkpoint(&mut self) {
        self.snapshot.cells.clear();
        self.snapshot
            .cells
            .extend(self.points.iter().map(|p| (p.state(), p.chain())));
        self.snapshot.chains.clone_from(&self.chains);
    }

    /// Restore the state recorded by the last [`checkpoint`](Self::checkpoint).
    pub fn rollback(&mut self) {
        for (point, &(state, chain)) in self.points.iter_mut().zip(&self.snapshot.cells) {
            point.restore(state, chain);
        }
        self.chains.clone_from(&self.snapshot.chains);
    }

    /// Check every bookkeeping invariant against a full rescan.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut counts = vec![0usize; self.points.len()];
        for chain in self.chains.iter() {
            let id = chain.id();
            if id.0 >= self.chains.next_id() {
                return Err(InvariantViolation::IdCounter {
                    chain: id,
                    next: self.chains.next_id(),
                });
            }
            for &p in chain.points() {
                let point = &self.points[p];
                if point.state() != PointState::from(chain.color()) || point.chain() != Some(id) {
                    return Err(InvariantViolation::ForeignMember {
                        row: point.row(),
                        col: point.col(),
                        chain: id,
                    });
                }
                counts[p] += 1;
            }
            let actual = chain.count_liberties(&self.points);
            if actual != chain.liberties() {
                return Err(InvariantViolation::Liberties {
                    chain: id,
                    cached: chain.liberties(),
                    actual,
                });
            }
            if actual == 0 {
                return Err(InvariantViolation::Dead(id));
            }
        }

        for (point, &count) in self.points.iter().zip(&counts) {
            let (row, col) = (point.row(), point.col());
            match (point.state().is_free(), point.chain()) {
                (true, Some(chain)) => {
                    return Err(InvariantViolation::StaleOwner { row, col, chain });
                }
                (false, None) => return Err(InvariantViolation::Unowned { row, col }),
                (false, Some(chain)) if !self.chains.contains(chain) => {
                    return Err(InvariantViolation::UnknownChain { row, col, chain });
                }
                (false, Some(chain)) if count != 1 => {
                    return Err(InvariantViolation::Membership {
                        row,
                        col,
                        chain,
                        count,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// One character per intersection, row-major, no separators.
    pub fn render(&self) -> String {
        self.points.iter().map(|p| p.state().to_char()).collect()
    }

    /// Like [`render`](Self::render), with rows separated by `'\n'`.
    pub fn render_rows(&self) -> String {
        self.points
            .chunks(self.size)
            .map(|row| row.iter().map(|p| p.state().to_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Saturating conversion for error reporting.
fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.points.chunks(self.size) {
            for p in row {
                write!(f, "{p}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(board: &Board) -> Vec<(PointState, Option<ChainId>)> {
        board.points.iter().map(|p| (p.state(), p.chain())).collect()
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(Board::new(0).err(), Some(GameError::InvalidSize(0)));
    }

    #[test]
    fn test_oversized_rejected() {
        assert_eq!(
            Board::new(1 << 32).err(),
            Some(GameError::InvalidSize(1 << 32))
        );
        assert_eq!(
            Board::new(usize::MAX).err(),
            Some(GameError::InvalidSize(i64::MAX))
        );
        assert_eq!(
            Board::new(MAX_SIZE + 1).err(),
            Some(GameError::InvalidSize(MAX_SIZE as i64 + 1))
        );
    }

    #[test]
    fn test_huge_coordinates_reported_saturated() {
        let mut board = Board::new(5).unwrap();
        assert_eq!(
            board.play(usize::MAX, 0, Color::Black),
            Err(GameError::OutOfBounds {
                row: i64::MAX,
                col: 0
            })
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new(5).unwrap();
        assert_eq!(
            board.play(5, 0, Color::Black),
            Err(GameError::OutOfBounds { row: 5, col: 0 })
        );
        assert_eq!(
            board.play(0, 6, Color::Black),
            Err(GameError::OutOfBounds { row: 0, col: 6 })
        );
        assert_eq!(board.render(), "*".repeat(25));
    }

    #[test]
    fn test_basic_placement() {
        let mut board = Board::new(5).unwrap();
        assert_eq!(board.play(1, 1, Color::Black), Ok(0));
        assert_eq!(board.chains().len(), 1);
        let chain = board.chain_at(1, 1).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.liberties(), 4);
        assert_eq!(board.chain_coords(chain), vec![(1, 1)]);
    }

    #[test]
    fn test_occupied() {
        let mut board = Board::new(5).unwrap();
        board.play(2, 2, Color::White).unwrap();
        assert_eq!(
            board.play(2, 2, Color::Black),
            Err(GameError::AlreadyOccupied(Color::White))
        );
        assert_eq!(board.chains().len(), 1);
        assert_eq!(board.validate(), Ok(()));
    }

    #[test]
    fn test_checkpoint_rollback_round_trip() {
        let mut board = Board::new(5).unwrap();
        board.play(1, 1, Color::Black).unwrap();
        board.play(1, 2, Color::White).unwrap();
        board.play(2, 1, Color::Black).unwrap();

        let cells = field(&board);
        let chains = board.chains().clone();
        board.checkpoint();
        board.rollback();
        assert_eq!(field(&board), cells);
        assert_eq!(board.chains(), &chains);
    }

    #[test]
    fn test_rollback_undoes_unchecked_changes() {
        let mut board = Board::new(5).unwrap();
        board.play(0, 0, Color::Black).unwrap();
        let cells = field(&board);
        let chains = board.chains().clone();

        // Mutate without committing.
        let idx = board.idx(4, 4);
        board.points[idx].occupy(Color::White).unwrap();
        board.chains.assign(&mut board.points, idx, Color::White);
        board.rollback();

        assert_eq!(field(&board), cells);
        assert_eq!(board.chains(), &chains);
    }

    #[test]
    fn test_self_capture_in_corner() {
        let mut board = Board::new(5).unwrap();
        board.play(0, 1, Color::Black).unwrap();
        board.play(1, 0, Color::Black).unwrap();
        let before = field(&board);
        let chains = board.chains().clone();

        assert_eq!(
            board.play(0, 0, Color::White),
            Err(GameError::SelfCaptureForbidden)
        );
        assert_eq!(field(&board), before);
        assert_eq!(board.chains(), &chains);
        assert_eq!(board.validate(), Ok(()));
    }

    #[test]
    fn test_capture_beats_self_capture() {
        // Black (1,0) takes the last liberty of the white corner stone; both
        // black stones then gain the vacated point.
        let mut board = Board::new(2).unwrap();
        board.play(0, 0, Color::White).unwrap();
        board.play(0, 1, Color::Black).unwrap();
        assert_eq!(board.play(1, 0, Color::Black), Ok(1));
        assert_eq!(board.render(), "*BB*");
        assert_eq!(board.chain_at(0, 1).unwrap().liberties(), 2);
        assert_eq!(board.validate(), Ok(()));
    }

    #[test]
    fn test_render_rows() {
        let mut board = Board::new(3).unwrap();
        board.play(0, 0, Color::Black).unwrap();
        board.play(2, 2, Color::White).unwrap();
        assert_eq!(board.render(), "B*******W");
        assert_eq!(board.render_rows(), "B**\n***\n**W");
        assert_eq!(board.to_string(), "B**\n***\n**W\n");
    }

    #[test]
    fn test_single_point_board() {
        let mut board = Board::new(1).unwrap();
        assert_eq!(
            board.play(0, 0, Color::Black),
            Err(GameError::SelfCaptureForbidden)
        );
        assert_eq!(board.render(), "*");
        assert!(board.chains().is_empty());
    }
}
