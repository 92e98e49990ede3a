mod vote;

use axum::extract::State;
use axum::routing::{any, get};
use axum::{Json, Router};
use log::info;

use crate::ballot::{self, CandidateView};
use crate::error::ApiError;
use crate::state::AppState;
use crate::voting::{preference, CandidateResult};

// Build the `/api` router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ballot", get(ballot_view))
        // The submission handler does its own method gate so non-POST
        // requests get the JSON error body
        .route("/api/vote", any(vote::submit_vote))
        .route("/api/results", get(results_view))
}

// Ballot page data: every candidate decorated for display
async fn ballot_view(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateView>>, ApiError> {
    let candidates = state.db.list_candidates().await?;
    Ok(Json(ballot::decorate(&candidates, &state.media_url)))
}

// Results page data: decrypted votes tallied per candidate, leaders first
async fn results_view(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateResult>>, ApiError> {
    let candidates = state.db.list_candidates().await?;
    let votes = state.db.list_votes().await?;

    let ballots = preference::decrypt_ballots(&state.cipher, &votes);
    info!(
        "Tallying {} of {} stored votes across {} candidates",
        ballots.len(),
        votes.len(),
        candidates.len()
    );

    Ok(Json(preference::calculate_results(&candidates, &ballots)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::BallotCipher;
    use crate::db::Database;
    use crate::models::Candidate;
    use axum::http::Method;
    use std::sync::Arc;

    async fn test_state() -> AppState {
        let db = Database::with_url("sqlite::memory:").await.unwrap();
        AppState {
            db: Arc::new(db),
            cipher: BallotCipher::new("handler-test-secret"),
            media_url: "/media/".to_string(),
        }
    }

    async fn seed_candidates(state: &AppState) {
        let a = Candidate::new(
            "1".to_string(),
            "Candidate A".to_string(),
            None,
            Some("SJB".to_string()),
        );
        let b = Candidate::new(
            "2".to_string(),
            "Candidate B".to_string(),
            None,
            Some("Independent".to_string()),
        );
        state.db.insert_candidate(&a).await.unwrap();
        state.db.insert_candidate(&b).await.unwrap();
    }

    async fn submit(state: &AppState, body: &str) {
        vote::submit_vote(State(state.clone()), Method::POST, body.to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn ballot_view_decorates_all_candidates() {
        let state = test_state().await;
        seed_candidates(&state).await;

        let Json(views) = ballot_view(State(state)).await.unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, "1");
        assert_eq!(views[0].color, "#008000");
        assert_eq!(
            views[0].party_symbol_url.as_deref(),
            Some("/media/party_symbols/SJB.png")
        );
        assert_eq!(views[1].color, "#808080");
        assert_eq!(views[1].party_symbol_url, None);
    }

    #[tokio::test]
    async fn results_view_tallies_and_sorts() {
        let state = test_state().await;
        seed_candidates(&state).await;

        submit(&state, r#"{"preferences": {"1": "1", "2": "2"}}"#).await;
        submit(&state, r#"{"preferences": {"1": "1"}}"#).await;
        submit(&state, r#"{"preferences": {"1": "2", "2": "1"}}"#).await;

        let Json(results) = results_view(State(state)).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Candidate A");
        assert_eq!(results[0].total_first, 2);
        assert_eq!(results[0].counts.second, 1);
        assert_eq!(results[1].name, "Candidate B");
        assert_eq!(results[1].total_first, 1);
        assert_eq!(results[1].counts.second, 1);
    }

    #[tokio::test]
    async fn corrupted_stored_vote_does_not_fail_results() {
        let state = test_state().await;
        seed_candidates(&state).await;

        submit(&state, r#"{"preferences": {"1": "1"}}"#).await;
        state
            .db
            .insert_vote(&crate::models::Vote::new("garbage-token".to_string()))
            .await
            .unwrap();

        let Json(results) = results_view(State(state)).await.unwrap();

        let first_total: u32 = results.iter().map(|r| r.total_first).sum();
        assert_eq!(first_total, 1);
    }
}
