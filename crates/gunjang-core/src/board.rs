//! The board: piece roster, move legality and battle application.
//!
//! A board starts empty; a room seeds it during setup from the per-color
//! templates returned by [`Board::initial_pieces`]. There is no occupancy
//! index — the roster caps out at 70 pieces and occupancy queries scan it.

use serde::{Deserialize, Serialize};

use crate::battle::{self, Outcome};
use crate::piece::{Piece, PieceType, PlayerColor};
use crate::position::Position;

/// Pieces each side fields: 5 rank-rows of 7.
pub const PIECES_PER_SIDE: usize = 35;

/// Rank-rows of the deterministic initial layout, back row first. Each
/// side places the same five rows mirrored onto its own grid.
const LAYOUT: [[PieceType; 7]; 5] = [
    [
        PieceType::Mine,
        PieceType::General,
        PieceType::Flag,
        PieceType::LieutenantGeneral,
        PieceType::MajorGeneral,
        PieceType::BrigadierGeneral,
        PieceType::Mine,
    ],
    [
        PieceType::Colonel,
        PieceType::LieutenantColonel,
        PieceType::Major,
        PieceType::Captain,
        PieceType::FirstLieutenant,
        PieceType::SecondLieutenant,
        PieceType::WarrantOfficer,
    ],
    [
        PieceType::MasterSergeant,
        PieceType::SergeantFirstClass,
        PieceType::Sergeant,
        PieceType::StaffSergeant,
        PieceType::Corporal,
        PieceType::PrivateFirstClass,
        PieceType::Private,
    ],
    [
        PieceType::Engineer,
        PieceType::Engineer,
        PieceType::Scout,
        PieceType::Scout,
        PieceType::Airplane,
        PieceType::Airplane,
        PieceType::Tank,
    ],
    [
        PieceType::Tank,
        PieceType::Missile,
        PieceType::Missile,
        PieceType::AntiAircraft,
        PieceType::AntiAircraft,
        PieceType::Radar,
        PieceType::Radar,
    ],
];

/// Piece roster and turn pointer for one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub pieces: Vec<Piece>,
    pub current_turn: PlayerColor,
}

impl Board {
    /// An empty board with RED to move.
    pub fn new() -> Self {
        Self {
            pieces: Vec::with_capacity(PIECES_PER_SIDE * 2),
            current_turn: PlayerColor::Red,
        }
    }

    /// The canonical 35-piece template for `color`, ids `R1..R35` /
    /// `B1..B35`, all in inventory (no positions).
    pub fn initial_pieces(color: PlayerColor) -> Vec<Piece> {
        let mut pieces = Vec::with_capacity(PIECES_PER_SIDE);
        let mut count = 0;
        for row in LAYOUT {
            for kind in row {
                count += 1;
                pieces.push(Piece::new(
                    format!("{}{}", color.id_prefix(), count),
                    color,
                    kind,
                ));
            }
        }
        pieces
    }

    /// The non-captured piece standing at `position`, if any.
    pub fn piece_at(&self, position: &Position) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.occupies(position))
    }

    fn index_at(&self, position: &Position) -> Option<usize> {
        self.pieces.iter().position(|p| p.occupies(position))
    }

    /// The piece with the given id, placed or not.
    pub fn piece_by_id(&self, id: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Set (or clear, with `None`) the position of an already-rostered
    /// piece. Setup legality lives in the room layer.
    pub fn place_piece(&mut self, id: &str, position: Option<Position>) -> bool {
        match self.pieces.iter_mut().find(|p| p.id == id) {
            Some(piece) => {
                piece.position = position;
                true
            }
            None => false,
        }
    }

    /// Whether the move is legal for the side to move.
    pub fn is_valid_move(&self, from: &Position, to: &Position) -> bool {
        let piece = match self.piece_at(from) {
            Some(p) => p,
            None => return false,
        };
        if piece.color != self.current_turn {
            return false;
        }
        if !battle::can_move(piece.kind) {
            return false;
        }
        if !to.is_valid() || !from.is_step_to(to) {
            return false;
        }
        // Destination must be empty or hold an opponent piece.
        match self.piece_at(to) {
            Some(occupant) => occupant.color != piece.color,
            None => true,
        }
    }

    /// Execute a move, resolving a battle if the destination is occupied.
    ///
    /// On success the turn flips and `true` is returned; any validation
    /// failure returns `false` with no side effects.
    pub fn move_piece(&mut self, from: &Position, to: &Position) -> bool {
        if !self.is_valid_move(from, to) {
            return false;
        }

        // Indices are safe: is_valid_move found the attacker and proved
        // any occupant is an opponent.
        let attacker = self.index_at(from).unwrap();
        match self.index_at(to) {
            None => {
                self.pieces[attacker].position = Some(*to);
            }
            Some(defender) => match battle::resolve(
                self.pieces[attacker].kind,
                self.pieces[defender].kind,
            ) {
                Outcome::AttackerWins => {
                    self.pieces[defender].captured = true;
                    self.pieces[attacker].position = Some(*to);
                    if battle::is_scout(self.pieces[defender].kind) {
                        self.pieces[attacker].revealed = true;
                    }
                }
                Outcome::DefenderWins => {
                    self.pieces[attacker].captured = true;
                    if battle::is_scout(self.pieces[attacker].kind) {
                        self.pieces[defender].revealed = true;
                    }
                }
                Outcome::Draw => {
                    self.pieces[attacker].captured = true;
                    self.pieces[defender].captured = true;
                }
            },
        }

        self.current_turn = self.current_turn.opponent();
        true
    }

    /// Count of non-captured pieces of `color`.
    pub fn surviving(&self, color: PlayerColor) -> usize {
        self.pieces
            .iter()
            .filter(|p| !p.captured && p.color == color)
            .count()
    }

    /// Whether `color` has brought any pieces onto the roster at all.
    /// Distinguishes a wiped-out army from one not yet fielded.
    fn has_fielded(&self, color: PlayerColor) -> bool {
        self.pieces.iter().any(|p| p.color == color)
    }

    /// Whether either side has been wiped out. A board where a side never
    /// fielded a piece is not over; it just has not started.
    pub fn is_game_over(&self) -> bool {
        self.has_fielded(PlayerColor::Red)
            && self.has_fielded(PlayerColor::Blue)
            && (self.surviving(PlayerColor::Red) == 0 || self.surviving(PlayerColor::Blue) == 0)
    }

    /// The surviving color once the game is over; `None` while it runs,
    /// and `None` when a final exchange annihilates both armies.
    pub fn winner(&self) -> Option<PlayerColor> {
        if !self.is_game_over() {
            return None;
        }
        if self.surviving(PlayerColor::Red) > 0 {
            Some(PlayerColor::Red)
        } else if self.surviving(PlayerColor::Blue) > 0 {
            Some(PlayerColor::Blue)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
