use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A visitor's reaction to a single track.
///
/// Exclusive by construction: a visitor holds at most one of these per track,
/// never both. "No reaction" is represented as the absence of an entry
/// (`Option<Reaction>` in APIs, a missing key in the persisted map), so tracks
/// the visitor never touched leave no record behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Reaction {
    Liked,
    Disliked,
}

/// Signed adjustment to a track's like/dislike counters.
///
/// Produced by a single toggle transition (each component in `-1..=1`) and
/// also used as the per-track session accumulator and as the wire body of the
/// counter reconciliation `PATCH`. The server applies each component with
/// `GREATEST(0, count + delta)`, which makes application commutative for
/// successfully-delivered deltas, so out-of-order arrival converges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReactionDelta {
    pub like_delta: i32,
    pub dislike_delta: i32,
}

impl ReactionDelta {
    pub const ZERO: ReactionDelta = ReactionDelta {
        like_delta: 0,
        dislike_delta: 0,
    };

    pub fn new(like_delta: i32, dislike_delta: i32) -> Self {
        Self {
            like_delta,
            dislike_delta,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.like_delta == 0 && self.dislike_delta == 0
    }

    /// Accumulate another delta into this one (session-delta bookkeeping).
    pub fn accumulate(&mut self, other: ReactionDelta) {
        self.like_delta += other.like_delta;
        self.dislike_delta += other.dislike_delta;
    }
}

/// Toggle the "like" reaction.
///
/// Total over every current state: there is no no-op case and no invalid
/// input. Toggling while already `Liked` removes the like; toggling while
/// `Disliked` swaps, adjusting both counters in the same transition.
pub fn toggle_like(current: Option<Reaction>) -> (Option<Reaction>, ReactionDelta) {
    match current {
        Some(Reaction::Liked) => (None, ReactionDelta::new(-1, 0)),
        Some(Reaction::Disliked) => (Some(Reaction::Liked), ReactionDelta::new(1, -1)),
        None => (Some(Reaction::Liked), ReactionDelta::new(1, 0)),
    }
}

/// Toggle the "dislike" reaction. Mirror of [`toggle_like`].
pub fn toggle_dislike(current: Option<Reaction>) -> (Option<Reaction>, ReactionDelta) {
    match current {
        Some(Reaction::Disliked) => (None, ReactionDelta::new(0, -1)),
        Some(Reaction::Liked) => (Some(Reaction::Disliked), ReactionDelta::new(-1, 1)),
        None => (Some(Reaction::Disliked), ReactionDelta::new(0, 1)),
    }
}

/// Locally-displayed counter value: authoritative count plus this session's
/// net adjustment, floored at zero. Presentation invariant only; the server
/// enforces its own floor independently.
pub fn clamped_count(authoritative: i32, session_delta: i32) -> i32 {
    authoritative.saturating_add(session_delta).max(0)
}
