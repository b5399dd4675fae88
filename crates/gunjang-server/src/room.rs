//! Game room: two seats, one board, and the setup/play state machine.

use std::time::SystemTime;

use gunjang_core::{Board, Piece, PlayerColor, Position};
use thiserror::Error;

use crate::protocol::RoomStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Room not found")]
    RoomNotFound,

    #[error("Room is full")]
    RoomFull,

    #[error("Player not seated in this room")]
    NotSeated,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Operation not allowed while room is {0:?}")]
    WrongStatus(RoomStatus),

    #[error("No such piece in your army: {0}")]
    UnknownPiece(String),

    #[error("Illegal placement")]
    InvalidPlacement,

    #[error("Illegal move")]
    InvalidMove,
}

/// One game session: seats, ready flags, status and the board.
///
/// The board starts empty and is populated piece by piece during SETUP;
/// pieces enter the roster the first time their id is placed.
#[derive(Debug, Clone)]
pub struct GameRoom {
    pub id: String,
    pub red_player: Option<String>,
    pub blue_player: Option<String>,
    pub board: Board,
    pub status: RoomStatus,
    pub red_ready: bool,
    pub blue_ready: bool,
    pub created_at: SystemTime,
}

impl GameRoom {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            red_player: None,
            blue_player: None,
            board: Board::new(),
            status: RoomStatus::Waiting,
            red_ready: false,
            blue_ready: false,
            created_at: SystemTime::now(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.red_player.is_some() && self.blue_player.is_some()
    }

    /// Seat color of `player_id`, if seated.
    pub fn player_color(&self, player_id: &str) -> Option<PlayerColor> {
        if self.red_player.as_deref() == Some(player_id) {
            Some(PlayerColor::Red)
        } else if self.blue_player.as_deref() == Some(player_id) {
            Some(PlayerColor::Blue)
        } else {
            None
        }
    }

    /// Seat a player: red slot first, then blue. Idempotent for a player
    /// already seated. Filling the second seat advances WAITING -> SETUP.
    pub fn add_player(&mut self, player_id: &str) -> Result<PlayerColor, RoomError> {
        if let Some(color) = self.player_color(player_id) {
            return Ok(color);
        }
        let color = if self.red_player.is_none() {
            self.red_player = Some(player_id.to_string());
            PlayerColor::Red
        } else if self.blue_player.is_none() {
            self.blue_player = Some(player_id.to_string());
            PlayerColor::Blue
        } else {
            return Err(RoomError::RoomFull);
        };
        if self.is_full() && self.status == RoomStatus::Waiting {
            self.status = RoomStatus::Setup;
        }
        Ok(color)
    }

    /// A seated player leaving terminates the game with no winner.
    pub fn remove_player(&mut self, player_id: &str) -> Result<(), RoomError> {
        match self.player_color(player_id) {
            Some(PlayerColor::Red) => self.red_player = None,
            Some(PlayerColor::Blue) => self.blue_player = None,
            None => return Err(RoomError::NotSeated),
        }
        self.status = RoomStatus::Finished;
        Ok(())
    }

    /// Mark a player's setup as complete; both ready flags advance
    /// SETUP -> PLAYING.
    pub fn set_ready(&mut self, player_id: &str) -> Result<(), RoomError> {
        if self.status != RoomStatus::Setup {
            return Err(RoomError::WrongStatus(self.status));
        }
        match self.player_color(player_id) {
            Some(PlayerColor::Red) => self.red_ready = true,
            Some(PlayerColor::Blue) => self.blue_ready = true,
            None => return Err(RoomError::NotSeated),
        }
        if self.red_ready && self.blue_ready {
            self.status = RoomStatus::Playing;
        }
        Ok(())
    }

    /// Place one of the player's own pieces during setup.
    ///
    /// A `None` target returns the piece to inventory. A concrete target
    /// must be a valid cell on the player's own grid, off the front-line
    /// column, and unoccupied. The first placement of a piece id pulls it
    /// from the color's canonical template into the roster.
    pub fn place_piece(
        &mut self,
        player_id: &str,
        piece_id: &str,
        target: Option<Position>,
    ) -> Result<(), RoomError> {
        if self.status != RoomStatus::Setup {
            return Err(RoomError::WrongStatus(self.status));
        }
        let color = self.player_color(player_id).ok_or(RoomError::NotSeated)?;

        if let Some(pos) = &target {
            if !pos.is_valid()
                || pos.is_crossing()
                || !pos.is_on_side(color)
                || pos.is_front_line(color)
            {
                return Err(RoomError::InvalidPlacement);
            }
            if self
                .board
                .piece_at(pos)
                .is_some_and(|occupant| occupant.id != piece_id)
            {
                return Err(RoomError::InvalidPlacement);
            }
        }

        if self.board.piece_by_id(piece_id).is_none() {
            // First reference: pull the piece from the canonical template.
            let piece = Board::initial_pieces(color)
                .into_iter()
                .find(|p| p.id == piece_id)
                .ok_or_else(|| RoomError::UnknownPiece(piece_id.to_string()))?;
            self.board.pieces.push(piece);
        } else if self
            .board
            .piece_by_id(piece_id)
            .is_some_and(|p| p.color != color)
        {
            // Players may only position their own army.
            return Err(RoomError::UnknownPiece(piece_id.to_string()));
        }

        self.board.place_piece(piece_id, target);
        Ok(())
    }

    /// Apply a move for `player_id`; transitions to FINISHED if the move
    /// eliminates the last piece of a color.
    pub fn move_piece(
        &mut self,
        player_id: &str,
        from: &Position,
        to: &Position,
    ) -> Result<(), RoomError> {
        if self.status != RoomStatus::Playing {
            return Err(RoomError::WrongStatus(self.status));
        }
        let color = self.player_color(player_id).ok_or(RoomError::NotSeated)?;
        if self.board.current_turn != color {
            return Err(RoomError::NotYourTurn);
        }
        if !self.board.move_piece(from, to) {
            return Err(RoomError::InvalidMove);
        }
        if self.board.is_game_over() {
            self.status = RoomStatus::Finished;
        }
        Ok(())
    }

    /// The setup template for a seated player's color.
    pub fn initial_pieces(&self, player_id: &str) -> Result<Vec<Piece>, RoomError> {
        let color = self.player_color(player_id).ok_or(RoomError::NotSeated)?;
        Ok(Board::initial_pieces(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gunjang_core::PieceType;

    fn pos(x: f64, y: f64) -> Position {
        Position::new(x, y)
    }

    /// Full lifecycle: one seat is WAITING, two seats is SETUP, both
    /// ready is PLAYING.
    #[test]
    fn lifecycle_waiting_setup_playing() {
        let mut room = GameRoom::new("test");
        assert_eq!(room.status, RoomStatus::Waiting);

        assert_eq!(room.add_player("alice").unwrap(), PlayerColor::Red);
        assert_eq!(room.status, RoomStatus::Waiting);
        // Idempotent re-join keeps the seat.
        assert_eq!(room.add_player("alice").unwrap(), PlayerColor::Red);

        assert_eq!(room.add_player("bob").unwrap(), PlayerColor::Blue);
        assert_eq!(room.status, RoomStatus::Setup);

        assert_eq!(room.add_player("carol"), Err(RoomError::RoomFull));

        room.set_ready("alice").unwrap();
        assert_eq!(room.status, RoomStatus::Setup);
        room.set_ready("bob").unwrap();
        assert_eq!(room.status, RoomStatus::Playing);
    }

    #[test]
    fn ready_gated_on_setup_and_seat() {
        let mut room = GameRoom::new("test");
        room.add_player("alice").unwrap();
        assert_eq!(
            room.set_ready("alice"),
            Err(RoomError::WrongStatus(RoomStatus::Waiting))
        );
        room.add_player("bob").unwrap();
        assert_eq!(room.set_ready("mallory"), Err(RoomError::NotSeated));
    }

    #[test]
    fn leaving_finishes_the_room() {
        let mut room = GameRoom::new("test");
        room.add_player("alice").unwrap();
        room.add_player("bob").unwrap();

        assert_eq!(room.remove_player("mallory"), Err(RoomError::NotSeated));

        // Alice has fielded pieces; the abandoned game still awards no winner.
        room.place_piece("alice", "R1", Some(pos(0.0, 0.0))).unwrap();
        room.remove_player("bob").unwrap();
        assert_eq!(room.status, RoomStatus::Finished);
        assert!(room.blue_player.is_none());
        assert_eq!(room.board.winner(), None);
    }

    #[test]
    fn placement_pulls_from_template() {
        let mut room = GameRoom::new("test");
        room.add_player("alice").unwrap();
        room.add_player("bob").unwrap();

        room.place_piece("alice", "R1", Some(pos(0.0, 0.0))).unwrap();
        let piece = room.board.piece_by_id("R1").unwrap();
        assert_eq!(piece.kind, PieceType::Mine);
        assert_eq!(piece.position, Some(pos(0.0, 0.0)));

        // Re-placing moves it; None returns it to inventory.
        room.place_piece("alice", "R1", Some(pos(1.0, 0.0))).unwrap();
        assert_eq!(room.board.piece_by_id("R1").unwrap().position, Some(pos(1.0, 0.0)));
        room.place_piece("alice", "R1", None).unwrap();
        assert_eq!(room.board.piece_by_id("R1").unwrap().position, None);
    }

    #[test]
    fn placement_rejects_illegal_targets() {
        let mut room = GameRoom::new("test");
        room.add_player("alice").unwrap();
        room.add_player("bob").unwrap();

        // Front-line column.
        assert_eq!(
            room.place_piece("alice", "R1", Some(pos(5.0, 0.0))),
            Err(RoomError::InvalidPlacement)
        );
        assert_eq!(
            room.place_piece("bob", "B1", Some(pos(8.0, 0.0))),
            Err(RoomError::InvalidPlacement)
        );
        // Opponent grid.
        assert_eq!(
            room.place_piece("alice", "R1", Some(pos(9.0, 0.0))),
            Err(RoomError::InvalidPlacement)
        );
        // Crossing point.
        assert_eq!(
            room.place_piece("alice", "R1", Some(pos(6.5, 1.5))),
            Err(RoomError::InvalidPlacement)
        );
        // Off the board.
        assert_eq!(
            room.place_piece("alice", "R1", Some(pos(0.0, 7.0))),
            Err(RoomError::InvalidPlacement)
        );
        // Occupied cell.
        room.place_piece("alice", "R1", Some(pos(0.0, 0.0))).unwrap();
        assert_eq!(
            room.place_piece("alice", "R2", Some(pos(0.0, 0.0))),
            Err(RoomError::InvalidPlacement)
        );
        // Opponent's piece id.
        assert_eq!(
            room.place_piece("alice", "B1", Some(pos(0.0, 1.0))),
            Err(RoomError::UnknownPiece("B1".to_string()))
        );
        // Nonexistent id.
        assert_eq!(
            room.place_piece("alice", "R99", Some(pos(0.0, 1.0))),
            Err(RoomError::UnknownPiece("R99".to_string()))
        );
    }

    #[test]
    fn placement_only_during_setup() {
        let mut room = GameRoom::new("test");
        room.add_player("alice").unwrap();
        assert_eq!(
            room.place_piece("alice", "R1", Some(pos(0.0, 0.0))),
            Err(RoomError::WrongStatus(RoomStatus::Waiting))
        );

        room.add_player("bob").unwrap();
        room.place_piece("alice", "R1", Some(pos(0.0, 0.0))).unwrap();
        room.set_ready("alice").unwrap();
        room.set_ready("bob").unwrap();
        assert_eq!(
            room.place_piece("alice", "R1", Some(pos(1.0, 0.0))),
            Err(RoomError::WrongStatus(RoomStatus::Playing))
        );
    }

    #[test]
    fn moves_gated_on_status_seat_and_turn() {
        let mut room = GameRoom::new("test");
        room.add_player("alice").unwrap();
        room.add_player("bob").unwrap();

        room.place_piece("alice", "R22", Some(pos(4.0, 3.0))).unwrap(); // engineer
        room.place_piece("bob", "B35", Some(pos(9.0, 3.0))).unwrap(); // radar

        assert_eq!(
            room.move_piece("alice", &pos(4.0, 3.0), &pos(5.0, 3.0)),
            Err(RoomError::WrongStatus(RoomStatus::Setup))
        );

        room.set_ready("alice").unwrap();
        room.set_ready("bob").unwrap();

        assert_eq!(
            room.move_piece("mallory", &pos(4.0, 3.0), &pos(5.0, 3.0)),
            Err(RoomError::NotSeated)
        );
        assert_eq!(
            room.move_piece("bob", &pos(9.0, 3.0), &pos(10.0, 3.0)),
            Err(RoomError::NotYourTurn)
        );
        room.move_piece("alice", &pos(4.0, 3.0), &pos(5.0, 3.0)).unwrap();
        room.move_piece("bob", &pos(9.0, 3.0), &pos(10.0, 3.0)).unwrap();
    }

    #[test]
    fn elimination_finishes_the_room() {
        let mut room = GameRoom::new("test");
        room.add_player("alice").unwrap();
        room.add_player("bob").unwrap();

        room.place_piece("alice", "R22", Some(pos(4.0, 1.0))).unwrap(); // engineer
        room.place_piece("bob", "B24", Some(pos(9.0, 1.0))).unwrap(); // scout
        room.set_ready("alice").unwrap();
        room.set_ready("bob").unwrap();

        // Engineer crosses and hunts down blue's lone scout.
        room.move_piece("alice", &pos(4.0, 1.0), &pos(5.0, 1.0)).unwrap();
        room.move_piece("bob", &pos(9.0, 1.0), &pos(8.0, 1.0)).unwrap();
        room.move_piece("alice", &pos(5.0, 1.0), &pos(6.5, 1.5)).unwrap();
        room.move_piece("bob", &pos(8.0, 1.0), &pos(8.0, 2.0)).unwrap();
        room.move_piece("alice", &pos(6.5, 1.5), &pos(8.0, 2.0)).unwrap();

        assert_eq!(room.status, RoomStatus::Finished);
        assert_eq!(room.board.winner(), Some(PlayerColor::Red));
    }

    #[test]
    fn initial_pieces_require_a_seat() {
        let mut room = GameRoom::new("test");
        room.add_player("alice").unwrap();

        let pieces = room.initial_pieces("alice").unwrap();
        assert_eq!(pieces.len(), 35);
        assert!(pieces.iter().all(|p| p.color == PlayerColor::Red));
        assert_eq!(room.initial_pieces("mallory"), Err(RoomError::NotSeated));
    }
}
