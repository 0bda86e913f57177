use crate::domain::reaction::ledger::ReactionDelta;
use crate::domain::track::{entity::Track, repository::TrackRepository};
use crate::presentation::http::{errors::AppError, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// Counter reconciliation endpoint.
///
/// Visitors' ledgers PATCH the marginal delta of each toggle here. The update
/// is a clamped add per counter (`GREATEST(0, count + delta)`), which makes it
/// commutative: rapid toggles arriving out of order still converge to the
/// right totals. No authentication and no magnitude restriction; the body is
/// a total function over integers, matching the ledger's contract.
pub async fn adjust_reactions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(delta): Json<ReactionDelta>,
) -> Result<Json<Track>, AppError> {
    let track = state
        .track_repo
        .apply_reaction_deltas(id, delta.like_delta, delta.dislike_delta)
        .await?;

    tracing::debug!(
        track_id = %id,
        like_delta = delta.like_delta,
        dislike_delta = delta.dislike_delta,
        like_count = track.like_count,
        dislike_count = track.dislike_count,
        "Reaction deltas applied"
    );

    Ok(Json(track))
}
