//! Per-viewer snapshot projection (fog of war).
//!
//! Every snapshot is built from fresh copies; projection never mutates
//! the room. The masking policy depends on room status:
//!
//! - WAITING / FINISHED: full roster, nothing concealed.
//! - SETUP: only the viewer's own pieces; opponent pieces are omitted.
//! - PLAYING: own pieces in full; captured opponent pieces in full
//!   (captures are public knowledge); revealed opponent pieces in full;
//!   everything else with its rank withheld.

use crate::protocol::{GameSnapshot, PieceView, RoomStatus};
use crate::room::GameRoom;

/// Project `room` as seen by `viewer` (a player id, or `None` for an
/// unseated caller, who is shown nothing concealable).
pub fn project(room: &GameRoom, viewer: Option<&str>) -> GameSnapshot {
    let viewer_color = viewer.and_then(|id| room.player_color(id));

    let pieces = room
        .board
        .pieces
        .iter()
        .filter_map(|piece| {
            let own = Some(piece.color) == viewer_color;
            match room.status {
                RoomStatus::Waiting | RoomStatus::Finished => Some(PieceView::known(piece)),
                RoomStatus::Setup => own.then(|| PieceView::known(piece)),
                RoomStatus::Playing => {
                    if own || piece.captured || piece.revealed {
                        Some(PieceView::known(piece))
                    } else {
                        Some(PieceView::hidden(piece))
                    }
                }
            }
        })
        .collect();

    GameSnapshot {
        room_id: room.id.clone(),
        pieces,
        current_turn: room.board.current_turn,
        status: room.status,
        winner: room.board.winner(),
        player_color: viewer_color,
        red_ready: room.red_ready,
        blue_ready: room.blue_ready,
        red_player: room.red_player.clone(),
        blue_player: room.blue_player.clone(),
    }
}
