//! Room registry and matchmaking.
//!
//! The registry is an owned object injected into the transport layer; no
//! process-wide statics. Concurrency contract: the dashmap allows lookup
//! and insert across many rooms without a global lock, and each room sits
//! behind its own `Mutex`, so at most one operation mutates a given room
//! at a time while unrelated rooms proceed independently. The map guard
//! is always dropped before the room lock is taken.

use std::sync::{Arc, Mutex};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use gunjang_core::{Piece, Position};
use tracing::{info, warn};
use uuid::Uuid;

use crate::protocol::{GameSnapshot, RoomStatus};
use crate::room::{GameRoom, RoomError};
use crate::view;

type SharedRoom = Arc<Mutex<GameRoom>>;

/// Owns every live room.
pub struct RoomRegistry {
    rooms: DashMap<String, SharedRoom>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Number of live rooms (any status).
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    fn room(&self, room_id: &str) -> Result<SharedRoom, RoomError> {
        self.rooms
            .get(room_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(RoomError::RoomNotFound)
    }

    fn lock(room: &SharedRoom) -> std::sync::MutexGuard<'_, GameRoom> {
        // Recover the room from a poisoned lock instead of wedging it.
        room.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Allocate a fresh WAITING room and return its id.
    pub fn create_room(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string()[..8].to_string();
            // 8 hex chars can collide with a live room; claim the id
            // atomically and re-roll if it is taken.
            match self.rooms.entry(id.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    slot.insert(Arc::new(Mutex::new(GameRoom::new(id.as_str()))));
                    info!(room = %id, "created room");
                    return id;
                }
            }
        }
    }

    /// Create a room and seat `player_id` as its first player.
    pub fn create_room_for(&self, player_id: &str) -> Result<String, RoomError> {
        let room_id = self.create_room();
        self.join_room(&room_id, player_id)?;
        Ok(room_id)
    }

    /// Seat `player_id` in an existing room.
    pub fn join_room(&self, room_id: &str, player_id: &str) -> Result<(), RoomError> {
        let room = self.room(room_id)?;
        let mut room = Self::lock(&room);
        room.add_player(player_id)?;
        info!(room = %room_id, player = %player_id, "player joined");
        Ok(())
    }

    /// Seat `player_id` in any WAITING, not-full room, creating one if
    /// none exists. Any such room is equivalent; first found wins.
    pub fn find_or_create(&self, player_id: &str) -> Result<String, RoomError> {
        let candidates: Vec<(String, SharedRoom)> = self
            .rooms
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();

        for (id, room) in candidates {
            let mut room = Self::lock(&room);
            if room.status == RoomStatus::Waiting && !room.is_full() {
                room.add_player(player_id)?;
                info!(room = %id, player = %player_id, "matched into waiting room");
                return Ok(id);
            }
        }

        self.create_room_for(player_id)
    }

    /// Remove `player_id` from the room; best-effort, a terminal room or
    /// unseated player is not an error worth surfacing.
    pub fn leave_room(&self, room_id: &str, player_id: &str) {
        let Ok(room) = self.room(room_id) else {
            return;
        };
        let mut room = Self::lock(&room);
        if room.remove_player(player_id).is_ok() {
            info!(room = %room_id, player = %player_id, "player left, room finished");
        }
    }

    /// Apply a move on behalf of `player_id`.
    pub fn move_piece(
        &self,
        room_id: &str,
        player_id: &str,
        from: &Position,
        to: &Position,
    ) -> Result<(), RoomError> {
        let room = self.room(room_id)?;
        let mut room = Self::lock(&room);
        room.move_piece(player_id, from, to)?;
        if room.status == RoomStatus::Finished {
            info!(room = %room_id, winner = ?room.board.winner(), "game over");
        }
        Ok(())
    }

    /// Place (or pocket) a setup piece on behalf of `player_id`.
    pub fn place_piece(
        &self,
        room_id: &str,
        player_id: &str,
        piece_id: &str,
        target: Option<Position>,
    ) -> Result<(), RoomError> {
        let room = self.room(room_id)?;
        let mut room = Self::lock(&room);
        room.place_piece(player_id, piece_id, target)
    }

    /// Flag `player_id` as ready; both flags start the game.
    pub fn set_ready(&self, room_id: &str, player_id: &str) -> Result<(), RoomError> {
        let room = self.room(room_id)?;
        let mut room = Self::lock(&room);
        room.set_ready(player_id)?;
        if room.status == RoomStatus::Playing {
            info!(room = %room_id, "both players ready, game started");
        }
        Ok(())
    }

    /// Masked snapshot of the room as seen by `viewer`.
    pub fn game_state(
        &self,
        room_id: &str,
        viewer: Option<&str>,
    ) -> Result<GameSnapshot, RoomError> {
        let room = self.room(room_id)?;
        let room = Self::lock(&room);
        Ok(view::project(&room, viewer))
    }

    /// The seated player ids of a room, red first.
    pub fn seated_players(&self, room_id: &str) -> Result<Vec<String>, RoomError> {
        let room = self.room(room_id)?;
        let room = Self::lock(&room);
        Ok([room.red_player.clone(), room.blue_player.clone()]
            .into_iter()
            .flatten()
            .collect())
    }

    /// Ids of rooms a new player could join right now.
    pub fn available_rooms(&self) -> Vec<String> {
        let candidates: Vec<(String, SharedRoom)> = self
            .rooms
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();

        candidates
            .into_iter()
            .filter(|(_, room)| {
                let room = Self::lock(room);
                room.status == RoomStatus::Waiting && !room.is_full()
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Setup template for a seated player.
    pub fn initial_pieces(
        &self,
        room_id: &str,
        player_id: &str,
    ) -> Result<Vec<Piece>, RoomError> {
        let room = self.room(room_id)?;
        let room = Self::lock(&room);
        room.initial_pieces(player_id).inspect_err(|_| {
            warn!(room = %room_id, player = %player_id, "template requested by unseated player");
        })
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
