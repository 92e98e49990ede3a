mod ballot;
mod crypto;
mod db;
mod error;
mod handlers;
mod models;
mod state;
mod voting;

use std::env;
use std::sync::Arc;

use log::{error, info};

use crypto::BallotCipher;
use db::Database;
use state::AppState;

#[tokio::main]
async fn main() {
    // Initialize logging
    dotenvy::dotenv().ok();
    env_logger::init();

    // The encryption key must be set before any vote is accepted; rotating it
    // orphans every previously stored vote
    let secret = env::var("ENCRYPTION_KEY").expect("Expected ENCRYPTION_KEY in the environment");
    let cipher = BallotCipher::new(&secret);

    // Initialize database
    let database = match Database::new().await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return;
        }
    };

    let media_url = env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".to_string());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let state = AppState {
        db: database,
        cipher,
        media_url,
    };
    let app = handlers::router().with_state(state);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_addr, e);
            return;
        }
    };
    info!("Listening on {}", bind_addr);

    if let Err(why) = axum::serve(listener, app).await {
        error!("Server error: {:?}", why);
    }
}
