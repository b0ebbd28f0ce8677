//! Runs the HTTP server for hosting live game rooms. Supports WebSocket
//! connections for real-time play.

use holdem::hosting::Server;

#[tokio::main]
async fn main() {
    holdem::init();
    Server::run().await.unwrap();
}
