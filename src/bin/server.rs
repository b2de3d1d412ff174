//! WebSocket chat room server.
//!
//! Hosts the single shared room: participants join over WebSocket, the full
//! message log is broadcast on every join and send, and the live participant
//! count follows leaves and disconnects.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 8000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use fellas_chat::{
    common::{
        logger::setup_logger,
        time::{get_unix_timestamp_millis, timestamp_to_rfc3339},
    },
    domain::{Room, Timestamp},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::Server,
    usecase::{GetRoomStateUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase},
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "WebSocket chat room server with broadcast support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory room seeded with the bootstrap message)
    let created_at = get_unix_timestamp_millis();
    let room = Arc::new(Mutex::new(Room::new(Timestamp::new(created_at))));
    tracing::info!("Room created at {}", timestamp_to_rfc3339(created_at));
    let repository = Arc::new(InMemoryRoomRepository::new(room));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients.clone()));

    // 3. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_room_state_usecase = Arc::new(GetRoomStateUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        join_room_usecase,
        send_message_usecase,
        leave_room_usecase,
        get_room_state_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
