use crate::domain::reaction::ledger::{self, Reaction, ReactionDelta};
use crate::domain::reaction::store::ReactionStore;
use crate::domain::reaction::sync::ReactionSync;
use std::collections::HashMap;
use std::sync::Arc;

/// The visitor-side interaction ledger.
///
/// Tracks the visitor's own reaction per track (exclusive, toggleable),
/// accumulates this session's net counter adjustments, and emits one
/// reconciliation command per effective transition. An explicitly constructed,
/// owned object: the embedding application holds one instance and passes it
/// to its views; on a multi-threaded runtime, wrap it in a `Mutex` so
/// mutations stay serialized.
///
/// Consistency contract, deliberately preserved from the observed system:
///
/// - Mutations are synchronous and always succeed locally. The persisted map
///   write and the network dispatch both happen after the in-memory update
///   and neither can fail it.
/// - The dispatch carries only the transition's marginal delta. Failures are
///   logged by the sync implementation and never compensated here, so a
///   dropped PATCH silently loses that vote until the visitor toggles again.
/// - Session deltas die with this instance. After a restart the visitor sees
///   fresh authoritative counts, which already include any delta that landed;
///   a delta still in flight across a restart is lost (known race, accepted).
pub struct InteractionLedger {
    reactions: HashMap<String, Reaction>,
    session_deltas: HashMap<String, ReactionDelta>,
    store: Box<dyn ReactionStore>,
    sync: Arc<dyn ReactionSync>,
}

impl InteractionLedger {
    /// Build a ledger, loading any previously persisted reaction map.
    ///
    /// A store that fails to load is treated as empty: prior interactions
    /// are forgotten, never an error the caller sees.
    pub fn new(store: Box<dyn ReactionStore>, sync: Arc<dyn ReactionSync>) -> Self {
        let reactions = store.load().unwrap_or_else(|e| {
            tracing::warn!("reaction map load failed, starting empty: {}", e);
            HashMap::new()
        });
        Self {
            reactions,
            session_deltas: HashMap::new(),
            store,
            sync,
        }
    }

    /// The visitor's current reaction for a track; `None` if never interacted.
    pub fn get_reaction(&self, track_id: &str) -> Option<Reaction> {
        self.reactions.get(track_id).copied()
    }

    /// Net adjustment applied to a track's counters during this session.
    pub fn session_delta(&self, track_id: &str) -> ReactionDelta {
        self.session_deltas
            .get(track_id)
            .copied()
            .unwrap_or(ReactionDelta::ZERO)
    }

    pub fn toggle_like(&mut self, track_id: &str) {
        self.apply(track_id, ledger::toggle_like);
    }

    pub fn toggle_dislike(&mut self, track_id: &str) {
        self.apply(track_id, ledger::toggle_dislike);
    }

    /// Counter pair a view should render for a track: the last-fetched
    /// authoritative counts adjusted by this session's net delta, floored at
    /// zero per counter.
    pub fn display_count(&self, track_id: &str, like_count: i32, dislike_count: i32) -> (i32, i32) {
        let delta = self.session_delta(track_id);
        (
            ledger::clamped_count(like_count, delta.like_delta),
            ledger::clamped_count(dislike_count, delta.dislike_delta),
        )
    }

    fn apply(
        &mut self,
        track_id: &str,
        transition: fn(Option<Reaction>) -> (Option<Reaction>, ReactionDelta),
    ) {
        let current = self.reactions.get(track_id).copied();
        let (next, delta) = transition(current);

        match next {
            Some(reaction) => {
                self.reactions.insert(track_id.to_string(), reaction);
            }
            None => {
                self.reactions.remove(track_id);
            }
        }
        self.session_deltas
            .entry(track_id.to_string())
            .or_default()
            .accumulate(delta);

        // Only the reaction map is persisted; a failed write keeps the
        // in-memory state and is not surfaced.
        if let Err(e) = self.store.save(&self.reactions) {
            tracing::warn!("failed to persist reaction map: {}", e);
        }

        if !delta.is_zero() {
            self.sync.dispatch(track_id, delta);
        }
    }
}
