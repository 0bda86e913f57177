use super::ledger::Reaction;
use crate::domain::track::errors::DomainError;
use std::collections::HashMap;

/// Persistence seam for the visitor's reaction map.
///
/// Only the `track id -> Reaction` map crosses this boundary; session deltas
/// are volatile by design and must never be persisted. Implementations are
/// expected to treat a corrupt or missing backing store as an empty map rather
/// than an error a caller has to handle.
pub trait ReactionStore: Send + Sync {
    fn load(&self) -> Result<HashMap<String, Reaction>, DomainError>;
    fn save(&self, reactions: &HashMap<String, Reaction>) -> Result<(), DomainError>;
}
