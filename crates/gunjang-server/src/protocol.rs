//! WebSocket protocol messages and per-viewer snapshot types.

use gunjang_core::{Piece, PieceType, PlayerColor, Position};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Room lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    /// Zero or one seated player.
    Waiting,
    /// Both seats filled, players placing pieces.
    Setup,
    /// Both players ready, moves permitted.
    Playing,
    /// Terminal: elimination or a player left.
    Finished,
}

/// What a viewer knows about a piece's rank.
///
/// Hidden identities are an explicit variant rather than a nulled field,
/// so a snapshot can never half-leak a concealed rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "visibility", content = "type")]
pub enum PieceIdentity {
    Known(PieceType),
    Hidden,
}

/// One piece as a specific viewer sees it. Always a fresh copy, never a
/// reference into the room's roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceView {
    pub id: String,
    pub color: PlayerColor,
    pub identity: PieceIdentity,
    pub position: Option<Position>,
    pub captured: bool,
    pub revealed: bool,
}

impl PieceView {
    /// Full-identity view of a piece.
    pub fn known(piece: &Piece) -> Self {
        Self {
            id: piece.id.clone(),
            color: piece.color,
            identity: PieceIdentity::Known(piece.kind),
            position: piece.position,
            captured: piece.captured,
            revealed: piece.revealed,
        }
    }

    /// Concealed view: same id, color and position, rank withheld.
    pub fn hidden(piece: &Piece) -> Self {
        Self {
            id: piece.id.clone(),
            color: piece.color,
            identity: PieceIdentity::Hidden,
            position: piece.position,
            captured: false,
            revealed: false,
        }
    }
}

/// Per-viewer projection of a room, published after every state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub room_id: String,
    pub pieces: Vec<PieceView>,
    pub current_turn: PlayerColor,
    pub status: RoomStatus,
    pub winner: Option<PlayerColor>,
    /// Seat color of the viewer, if they are seated in this room.
    pub player_color: Option<PlayerColor>,
    pub red_ready: bool,
    pub blue_ready: bool,
    pub red_player: Option<String>,
    pub blue_player: Option<String>,
}

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Create a new room and take the first seat
    CreateRoom,

    /// Join a specific room
    JoinRoom { room_id: String },

    /// Join any waiting room, creating one if none exists
    QuickJoin,

    /// Leave the current room
    LeaveRoom,

    /// Request the 35-piece setup template for one's own color
    GetInitialPieces,

    /// Place a setup piece, or return it to inventory with `position: null`
    PlacePiece {
        piece_id: String,
        position: Option<Position>,
    },

    /// Declare setup complete
    Ready,

    /// Move a piece during play
    MovePiece { from: Position, to: Position },

    /// Request the current masked snapshot
    GetState,

    /// Request the list of joinable rooms
    ListRooms,

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with assigned player ID
    Welcome { player_id: Uuid },

    /// Seated in a room (created, joined or quick-joined)
    RoomJoined {
        room_id: String,
        color: Option<PlayerColor>,
    },

    /// Left the room
    LeftRoom,

    /// Masked room snapshot for this viewer
    GameState { state: GameSnapshot },

    /// Setup template for the requesting player's color
    InitialPieces { pieces: Vec<Piece> },

    /// List of joinable room ids
    RoomList { rooms: Vec<String> },

    /// Request rejected
    Error { message: String },

    /// Pong response
    Pong,
}
