use crate::domain::reaction::ledger::Reaction;
use crate::domain::reaction::store::ReactionStore;
use crate::domain::track::errors::DomainError;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Reaction map persisted as a JSON object (`track id -> "liked"/"disliked"`)
/// in a single file. Tracks without a reaction are absent from the file.
///
/// Missing or corrupt files load as an empty map: a visitor with mangled
/// local state simply starts over, they never see an error.
pub struct JsonFileReactionStore {
    path: PathBuf,
}

impl JsonFileReactionStore {
    /// Conventional file name inside the application's data directory.
    pub const DEFAULT_FILE_NAME: &'static str = "track-reactions.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReactionStore for JsonFileReactionStore {
    fn load(&self) -> Result<HashMap<String, Reaction>, DomainError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(DomainError::InfrastructureError(e.to_string())),
        };
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "corrupt reaction map, resetting: {}", e);
                Ok(HashMap::new())
            }
        }
    }

    fn save(&self, reactions: &HashMap<String, Reaction>) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(reactions)
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| DomainError::InfrastructureError(e.to_string()))
    }
}
