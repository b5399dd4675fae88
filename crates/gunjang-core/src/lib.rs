//! Gunjang - rules engine for a two-board military strategy game
//!
//! Two players command hidden armies on mirrored 6x7 grids joined by two
//! diagonal crossing points. Pieces battle by rank when they collide, the
//! mine never moves, and a piece that beats (or is beaten by) a scout is
//! permanently revealed to the enemy.
//!
//! This crate is the platform-agnostic rules core; the session layer
//! (rooms, matchmaking, per-player views) lives in `gunjang-server`.
//!
//! # Modules
//!
//! - [`position`]: dual-grid geometry and the crossing points
//! - [`piece`]: colors, ranks and the piece roster entries
//! - [`battle`]: the static win table and battle resolution
//! - [`board`]: move legality, battles, captures and win detection

pub mod battle;
pub mod board;
pub mod piece;
pub mod position;

// Re-export commonly used types
pub use battle::Outcome;
pub use board::{Board, PIECES_PER_SIDE};
pub use piece::{Piece, PieceType, PlayerColor};
pub use position::Position;
