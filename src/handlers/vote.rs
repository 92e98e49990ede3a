use axum::extract::State;
use axum::http::Method;
use axum::Json;
use log::info;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::{PreferenceBallot, Vote};
use crate::state::AppState;

// Accept one ranked-preference submission. Each successful call stores a new
// independent vote record; nothing links it to the voter.
pub async fn submit_vote(
    State(state): State<AppState>,
    method: Method,
    body: String,
) -> Result<Json<Value>, ApiError> {
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let data: Value = serde_json::from_str(&body)?;

    let ballot = match data.get("preferences") {
        None | Some(Value::Null) => None,
        Some(preferences) => Some(serde_json::from_value::<PreferenceBallot>(
            preferences.clone(),
        )?),
    };
    let ballot = ballot
        .filter(|ballot| !ballot.is_empty())
        .ok_or_else(|| ApiError::Validation("No preferences selected".to_string()))?;

    let plaintext = serde_json::to_string(&ballot)?;
    let token = state.cipher.encrypt(&plaintext)?;

    let vote = Vote::new(token);
    state.db.insert_vote(&vote).await?;
    info!("Recorded vote {}", vote.id);

    Ok(Json(json!({ "status": "success" })))
}
