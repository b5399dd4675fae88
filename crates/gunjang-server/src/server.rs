//! WebSocket server and connection handling.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::registry::RoomRegistry;
use crate::room::RoomError;
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    /// All active rooms
    pub registry: RoomRegistry,
    /// Mapping from player ID to the room they are seated in
    pub player_rooms: DashMap<String, String>,
    /// Mapping from player ID to their message sender
    pub player_senders: DashMap<String, mpsc::UnboundedSender<ServerMessage>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            registry: RoomRegistry::new(),
            player_rooms: DashMap::new(),
            player_senders: DashMap::new(),
        }
    }

    /// Send a message to a specific player.
    pub fn send_to_player(&self, player_id: &str, msg: ServerMessage) {
        if let Some(sender) = self.player_senders.get(player_id) {
            let _ = sender.send(msg);
        }
    }

    /// Send every seated player in a room their own masked snapshot.
    ///
    /// Snapshots differ per viewer once a room has left WAITING, so there
    /// is no shared payload to reuse.
    pub fn publish_room_state(&self, room_id: &str) {
        let Ok(players) = self.registry.seated_players(room_id) else {
            return;
        };
        for player_id in players {
            if let Ok(state) = self.registry.game_state(room_id, Some(&player_id)) {
                self.send_to_player(&player_id, ServerMessage::GameState { state });
            }
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Gunjang server listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Assign a player ID
    let player_id = Uuid::new_v4();
    let player_key = player_id.to_string();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.player_senders.insert(player_key.clone(), tx);

    // Send welcome message
    let welcome = ServerMessage::Welcome { player_id };
    let msg_text = serde_json::to_string(&welcome)?;
    ws_sender.send(Message::Text(msg_text.into())).await?;

    // Spawn task to forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(text) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // Handle incoming messages
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if let Ok(client_msg) = serde_json::from_str::<ClientMessage>(&text) {
                    handle_message(&player_key, client_msg, &state);
                } else {
                    warn!("Invalid message from {}: {}", player_key, text);
                }
            }
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", player_key);
                break;
            }
            Ok(Message::Ping(_)) => {
                state.send_to_player(&player_key, ServerMessage::Pong);
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", player_key, e);
                break;
            }
            _ => {}
        }
    }

    // Clean up on disconnect
    handle_disconnect(&player_key, &state);
    state.player_senders.remove(&player_key);
    send_task.abort();

    info!("Connection closed for {}", player_key);
    Ok(())
}

fn send_error(state: &ServerState, player_id: &str, err: RoomError) {
    state.send_to_player(
        player_id,
        ServerMessage::Error {
            message: err.to_string(),
        },
    );
}

/// Handle a client message.
fn handle_message(player_id: &str, msg: ClientMessage, state: &Arc<ServerState>) {
    match msg {
        ClientMessage::CreateRoom => match state.registry.create_room_for(player_id) {
            Ok(room_id) => {
                state.player_rooms.insert(player_id.to_string(), room_id.clone());
                let color = state
                    .registry
                    .game_state(&room_id, Some(player_id))
                    .ok()
                    .and_then(|s| s.player_color);
                state.send_to_player(
                    player_id,
                    ServerMessage::RoomJoined {
                        room_id: room_id.clone(),
                        color,
                    },
                );
                state.publish_room_state(&room_id);
            }
            Err(e) => send_error(state, player_id, e),
        },

        ClientMessage::JoinRoom { room_id } => {
            match state.registry.join_room(&room_id, player_id) {
                Ok(()) => {
                    state.player_rooms.insert(player_id.to_string(), room_id.clone());
                    let color = state
                        .registry
                        .game_state(&room_id, Some(player_id))
                        .ok()
                        .and_then(|s| s.player_color);
                    state.send_to_player(
                        player_id,
                        ServerMessage::RoomJoined {
                            room_id: room_id.clone(),
                            color,
                        },
                    );
                    state.publish_room_state(&room_id);
                }
                Err(e) => send_error(state, player_id, e),
            }
        }

        ClientMessage::QuickJoin => match state.registry.find_or_create(player_id) {
            Ok(room_id) => {
                state.player_rooms.insert(player_id.to_string(), room_id.clone());
                let color = state
                    .registry
                    .game_state(&room_id, Some(player_id))
                    .ok()
                    .and_then(|s| s.player_color);
                state.send_to_player(
                    player_id,
                    ServerMessage::RoomJoined {
                        room_id: room_id.clone(),
                        color,
                    },
                );
                state.publish_room_state(&room_id);
            }
            Err(e) => send_error(state, player_id, e),
        },

        ClientMessage::LeaveRoom => {
            if let Some((_, room_id)) = state.player_rooms.remove(player_id) {
                state.registry.leave_room(&room_id, player_id);
                state.send_to_player(player_id, ServerMessage::LeftRoom);
                state.publish_room_state(&room_id);
            }
        }

        ClientMessage::GetInitialPieces => {
            let Some(room_id) = state.player_rooms.get(player_id).map(|r| r.value().clone()) else {
                return send_error(state, player_id, RoomError::RoomNotFound);
            };
            match state.registry.initial_pieces(&room_id, player_id) {
                Ok(pieces) => {
                    state.send_to_player(player_id, ServerMessage::InitialPieces { pieces })
                }
                Err(e) => send_error(state, player_id, e),
            }
        }

        ClientMessage::PlacePiece { piece_id, position } => {
            let Some(room_id) = state.player_rooms.get(player_id).map(|r| r.value().clone()) else {
                return send_error(state, player_id, RoomError::RoomNotFound);
            };
            match state
                .registry
                .place_piece(&room_id, player_id, &piece_id, position)
            {
                Ok(()) => state.publish_room_state(&room_id),
                Err(e) => send_error(state, player_id, e),
            }
        }

        ClientMessage::Ready => {
            let Some(room_id) = state.player_rooms.get(player_id).map(|r| r.value().clone()) else {
                return send_error(state, player_id, RoomError::RoomNotFound);
            };
            match state.registry.set_ready(&room_id, player_id) {
                Ok(()) => state.publish_room_state(&room_id),
                Err(e) => send_error(state, player_id, e),
            }
        }

        ClientMessage::MovePiece { from, to } => {
            let Some(room_id) = state.player_rooms.get(player_id).map(|r| r.value().clone()) else {
                return send_error(state, player_id, RoomError::RoomNotFound);
            };
            match state.registry.move_piece(&room_id, player_id, &from, &to) {
                Ok(()) => state.publish_room_state(&room_id),
                Err(e) => send_error(state, player_id, e),
            }
        }

        ClientMessage::GetState => {
            let Some(room_id) = state.player_rooms.get(player_id).map(|r| r.value().clone()) else {
                return send_error(state, player_id, RoomError::RoomNotFound);
            };
            match state.registry.game_state(&room_id, Some(player_id)) {
                Ok(snapshot) => {
                    state.send_to_player(player_id, ServerMessage::GameState { state: snapshot })
                }
                Err(e) => send_error(state, player_id, e),
            }
        }

        ClientMessage::ListRooms => {
            let rooms = state.registry.available_rooms();
            state.send_to_player(player_id, ServerMessage::RoomList { rooms });
        }

        ClientMessage::Ping => {
            state.send_to_player(player_id, ServerMessage::Pong);
        }
    }
}

/// Handle player disconnect: a dropped connection counts as leaving.
fn handle_disconnect(player_id: &str, state: &Arc<ServerState>) {
    if let Some((_, room_id)) = state.player_rooms.remove(player_id) {
        state.registry.leave_room(&room_id, player_id);
        state.publish_room_state(&room_id);
    }
}
