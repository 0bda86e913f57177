use super::ledger::ReactionDelta;

/// Dispatch seam for counter reconciliation.
///
/// The ledger hands each transition's marginal delta (never the cumulative
/// session total) to this trait and moves on: dispatch is fire-and-forget.
/// Implementations must not block the caller, must not report failure back
/// into the ledger, and must not retry. A lost delta is a lost vote until
/// the visitor toggles again.
pub trait ReactionSync: Send + Sync {
    fn dispatch(&self, track_id: &str, delta: ReactionDelta);
}
