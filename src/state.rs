use std::sync::Arc;

use crate::crypto::BallotCipher;
use crate::db::Database;

// Shared per-request state; everything here is read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub cipher: BallotCipher,
    pub media_url: String,
}
