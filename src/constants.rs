//! Constants for board dimensions and text rendering.
//!
//! The engine itself accepts any positive board size; the values here are
//! defaults used by the command line front-ends.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size used when none is given on the command line.
pub const DEFAULT_SIZE: usize = 19;

/// Board sizes commonly used in practice. Informational only: the engine
/// accepts any size from 1 to [`MAX_SIZE`].
pub const STANDARD_SIZES: [usize; 4] = [5, 9, 13, 19];

/// Largest accepted board side.
pub const MAX_SIZE: usize = 1024;

/// Maximum number of neighbors an intersection can have.
pub const MAX_NEIGHBORS: usize = 4;

// =============================================================================
// Rendering
// =============================================================================

/// Empty intersection.
pub const FREE_CHAR: char = '*';

/// Black stone.
pub const BLACK_CHAR: char = 'B';

/// White stone.
pub const WHITE_CHAR: char = 'W';

// =============================================================================
// Random Playouts
// =============================================================================

/// Move cap for random games, as a multiple of the board area.
pub const PLAYOUT_LEN_FACTOR: usize = 3;
