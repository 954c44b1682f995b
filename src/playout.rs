//! Random games.
//!
//! A playout picks uniformly random empty points for the side to move until
//! that side has no legal move left or the move cap is reached. It is used by
//! the `random` command and to exercise the chain bookkeeping on many
//! positions.

use crate::error::GameError;
use crate::game::Game;
use crate::point::PointState;

/// Counters collected during a playout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayoutStats {
    /// Accepted moves.
    pub moves: usize,
    /// Moves refused as self-capture.
    pub rejected: usize,
    /// Stones removed from the board.
    pub captured: usize,
    /// True when the playout stopped because the side to move had no legal
    /// point, false when it hit the move cap.
    pub exhausted: bool,
}

/// Play one random move for the side to move.
///
/// Returns the accepted point, or `None` if every empty point was refused.
pub fn random_move(
    game: &mut Game,
    rng: &mut fastrand::Rng,
    stats: &mut PlayoutStats,
) -> Result<Option<(usize, usize)>, GameError> {
    let board = game.board().ok_or(GameError::GameClosed)?;
    let size = board.size();
    let mut candidates: Vec<(usize, usize)> = (0..size)
        .flat_map(|r| (0..size).map(move |c| (r, c)))
        .filter(|&(r, c)| board.state(r, c) == Some(PointState::Free))
        .collect();
    rng.shuffle(&mut candidates);

    let color = game.to_move();
    for (row, col) in candidates {
        match game.play(row, col, color) {
            Ok(n) => {
                stats.moves += 1;
                stats.captured += n;
                return Ok(Some((row, col)));
            }
            Err(GameError::SelfCaptureForbidden) => stats.rejected += 1,
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}

/// Play random moves until no legal move remains or `max_moves` is reached.
pub fn random_game(
    game: &mut Game,
    rng: &mut fastrand::Rng,
    max_moves: usize,
) -> Result<PlayoutStats, GameError> {
    let mut stats = PlayoutStats::default();
    while stats.moves < max_moves {
        if random_move(game, rng, &mut stats)?.is_none() {
            stats.exhausted = true;
            break;
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Color;

    #[test]
    fn test_random_game_keeps_invariants() {
        for seed in 0..20 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut game = Game::new(5).unwrap();
            let mut stats = PlayoutStats::default();
            for _ in 0..75 {
                if random_move(&mut game, &mut rng, &mut stats).unwrap().is_none() {
                    break;
                }
                assert_eq!(game.board().unwrap().validate(), Ok(()), "seed {seed}");
            }
            assert_eq!(
                game.captures(Color::Black) + game.captures(Color::White),
                stats.captured
            );
        }
    }

    #[test]
    fn test_random_game_respects_cap() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut game = Game::new(9).unwrap();
        let stats = random_game(&mut game, &mut rng, 10).unwrap();
        assert_eq!(stats.moves, 10);
        assert!(!stats.exhausted);
        let stones = game.render().unwrap().chars().filter(|&c| c != '*').count();
        assert_eq!(stones + stats.captured, 10);
    }

    #[test]
    fn test_random_game_on_closed_game() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut game = Game::new(3).unwrap();
        game.close();
        assert_eq!(
            random_game(&mut game, &mut rng, 5),
            Err(GameError::GameClosed)
        );
    }

    #[test]
    fn test_single_point_board_is_exhausted() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut game = Game::new(1).unwrap();
        let stats = random_game(&mut game, &mut rng, 5).unwrap();
        assert!(stats.exhausted);
        assert_eq!(stats.moves, 0);
        assert_eq!(stats.rejected, 1);
    }
}
