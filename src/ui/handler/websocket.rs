//! WebSocket connection handlers.
//!
//! One task pair per connection: a receive loop interpreting inbound
//! lifecycle events (join / send / leave) and a push loop forwarding
//! broadcasts to the socket. Socket teardown runs the same leave transition
//! as an explicit leave event, so an abrupt disconnect never decrements the
//! member count twice.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatMessage, ConnectionId, PusherChannel},
    infrastructure::dto::{
        conversion::log_to_dto,
        websocket::{InboundEvent, UpdateDataMessage, UpdateUserCountMessage},
    },
    ui::state::AppState,
    usecase::LeaveOutcome,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // connect: the connection gets its identity here, but no room state
    // changes until a join-room event arrives.
    let connection_id = ConnectionId::generate();
    tracing::info!("Connection '{}' established", connection_id);

    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    // Channel carrying broadcasts to this connection; registered with the
    // MessagePusher when the connection joins the room.
    let (tx, rx) = mpsc::unbounded_channel();
    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();

    // Receive loop: interpret inbound events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    // Malformed payloads are dropped here with no state change
                    let event = match serde_json::from_str::<InboundEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(
                                "Dropping malformed event from '{}': {}",
                                recv_connection_id,
                                e
                            );
                            continue;
                        }
                    };
                    dispatch_event(&recv_state, &recv_connection_id, event, &tx).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // drop: same transition as an explicit leave, plus channel release
    let outcome = state.leave_room_usecase.execute(&connection_id).await;
    broadcast_leave_outcome(&state, &connection_id, outcome).await;
    state
        .leave_room_usecase
        .release_connection(&connection_id)
        .await;
    tracing::info!("Connection '{}' closed", connection_id);
}

/// Run the core transition for one validated inbound event.
async fn dispatch_event(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    event: InboundEvent,
    sender: &PusherChannel,
) {
    match event {
        InboundEvent::JoinRoom(payload) => {
            let display_name = payload.name;
            let update = state
                .join_room_usecase
                .execute(connection_id.clone(), display_name.clone(), sender.clone())
                .await;
            tracing::info!(
                "Connection '{}' joined the room as '{}' ({} online)",
                connection_id,
                display_name,
                update.member_count
            );

            // Count first, then the full log, to the whole current group
            let count_json =
                serde_json::to_string(&UpdateUserCountMessage::new(update.member_count)).unwrap();
            let data_json =
                serde_json::to_string(&UpdateDataMessage::new(log_to_dto(&update.messages)))
                    .unwrap();
            if let Err(e) = state
                .join_room_usecase
                .broadcast_update(&update.group, &count_json)
                .await
            {
                tracing::warn!("Failed to broadcast user count: {}", e);
            }
            if let Err(e) = state
                .join_room_usecase
                .broadcast_update(&update.group, &data_json)
                .await
            {
                tracing::warn!("Failed to broadcast message log: {}", e);
            }
        }
        InboundEvent::SendMessage(message_dto) => {
            let update = state
                .send_message_usecase
                .execute(ChatMessage::from(message_dto))
                .await;
            tracing::debug!(
                "Connection '{}' sent a message ({} in log)",
                connection_id,
                update.messages.len()
            );

            let data_json =
                serde_json::to_string(&UpdateDataMessage::new(log_to_dto(&update.messages)))
                    .unwrap();
            if let Err(e) = state
                .send_message_usecase
                .broadcast_update(&update.group, &data_json)
                .await
            {
                tracing::warn!("Failed to broadcast message log: {}", e);
            }
        }
        InboundEvent::Leave => {
            let outcome = state.leave_room_usecase.execute(connection_id).await;
            broadcast_leave_outcome(state, connection_id, outcome).await;
        }
    }
}

/// Broadcast the side effects of a leave/drop transition: the log snapshot to
/// the pre-removal group, and -- only when a removal actually happened -- the
/// updated count to the post-removal group.
async fn broadcast_leave_outcome(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    outcome: LeaveOutcome,
) {
    let data_json =
        serde_json::to_string(&UpdateDataMessage::new(log_to_dto(&outcome.messages))).unwrap();
    if let Err(e) = state
        .leave_room_usecase
        .broadcast_update(&outcome.log_targets, &data_json)
        .await
    {
        tracing::warn!("Failed to broadcast message log: {}", e);
    }

    if let Some(count_update) = outcome.count_update {
        let count_json =
            serde_json::to_string(&UpdateUserCountMessage::new(count_update.member_count)).unwrap();
        if let Err(e) = state
            .leave_room_usecase
            .broadcast_update(&count_update.targets, &count_json)
            .await
        {
            tracing::warn!("Failed to broadcast user count: {}", e);
        }
        tracing::info!(
            "Connection '{}' left the room ({} online)",
            connection_id,
            count_update.member_count
        );
    }
}
