use beatfolio_api::application::interaction_ledger::use_case::InteractionLedger;
use beatfolio_api::domain::reaction::ledger::{Reaction, ReactionDelta};
use beatfolio_api::domain::reaction::store::ReactionStore;
use beatfolio_api::domain::reaction::sync::ReactionSync;
use beatfolio_api::domain::track::errors::DomainError;
use beatfolio_api::infrastructure::ledger::json_reaction_store::JsonFileReactionStore;
use mockall::mock;
use mockall::predicate::always;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Records every dispatched delta for assertions; never performs I/O.
#[derive(Clone, Default)]
struct RecordingSync {
    sent: Arc<Mutex<Vec<(String, ReactionDelta)>>>,
}

impl RecordingSync {
    fn sent(&self) -> Vec<(String, ReactionDelta)> {
        self.sent.lock().expect("sync log poisoned").clone()
    }
}

impl ReactionSync for RecordingSync {
    fn dispatch(&self, track_id: &str, delta: ReactionDelta) {
        self.sent
            .lock()
            .expect("sync log poisoned")
            .push((track_id.to_string(), delta));
    }
}

#[derive(Default)]
struct MemoryStore {
    map: Mutex<HashMap<String, Reaction>>,
}

impl MemoryStore {
    fn seeded(entries: &[(&str, Reaction)]) -> Self {
        let map = entries
            .iter()
            .map(|(id, r)| (id.to_string(), *r))
            .collect();
        Self {
            map: Mutex::new(map),
        }
    }
}

impl ReactionStore for MemoryStore {
    fn load(&self) -> Result<HashMap<String, Reaction>, DomainError> {
        Ok(self.map.lock().expect("store poisoned").clone())
    }

    fn save(&self, reactions: &HashMap<String, Reaction>) -> Result<(), DomainError> {
        *self.map.lock().expect("store poisoned") = reactions.clone();
        Ok(())
    }
}

mock! {
    Store {}
    impl ReactionStore for Store {
        fn load(&self) -> Result<HashMap<String, Reaction>, DomainError>;
        fn save(&self, reactions: &HashMap<String, Reaction>) -> Result<(), DomainError>;
    }
}

fn fresh_ledger() -> (InteractionLedger, RecordingSync) {
    let sync = RecordingSync::default();
    let ledger = InteractionLedger::new(
        Box::new(MemoryStore::default()),
        Arc::new(sync.clone()),
    );
    (ledger, sync)
}

fn temp_store_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("beatfolio-ledger-test-{}", Uuid::now_v7()))
        .join(JsonFileReactionStore::DEFAULT_FILE_NAME)
}

#[test]
fn reactions_default_to_none() {
    let (ledger, sync) = fresh_ledger();
    assert_eq!(ledger.get_reaction("never-seen"), None);
    assert_eq!(ledger.session_delta("never-seen"), ReactionDelta::ZERO);
    assert!(sync.sent().is_empty());
}

#[test]
fn like_dislike_dislike_scenario_walks_the_transition_table() {
    // Track starts at authoritative (5, 2) with no reaction.
    let (mut ledger, sync) = fresh_ledger();

    // toggle_like: Liked, displayed (6, 2), one marginal dispatch {+1, 0}
    ledger.toggle_like("X");
    assert_eq!(ledger.get_reaction("X"), Some(Reaction::Liked));
    assert_eq!(ledger.display_count("X", 5, 2), (6, 2));
    assert_eq!(sync.sent(), vec![("X".to_string(), ReactionDelta::new(1, 0))]);

    // toggle_dislike while Liked: swap in one call, displayed (5, 3)
    ledger.toggle_dislike("X");
    assert_eq!(ledger.get_reaction("X"), Some(Reaction::Disliked));
    assert_eq!(ledger.display_count("X", 5, 2), (5, 3));
    assert_eq!(sync.sent()[1], ("X".to_string(), ReactionDelta::new(-1, 1)));

    // toggle_dislike again: back to None, displayed (5, 2)
    ledger.toggle_dislike("X");
    assert_eq!(ledger.get_reaction("X"), None);
    assert_eq!(ledger.display_count("X", 5, 2), (5, 2));
    assert_eq!(sync.sent()[2], ("X".to_string(), ReactionDelta::new(0, -1)));

    // Every dispatch carried the marginal delta, never the session total.
    assert_eq!(sync.sent().len(), 3);
}

#[test]
fn double_toggle_nets_session_delta_back() {
    let (mut ledger, _sync) = fresh_ledger();

    let before = ledger.session_delta("X");
    ledger.toggle_like("X");
    ledger.toggle_like("X");
    assert_eq!(ledger.get_reaction("X"), None);
    assert_eq!(ledger.session_delta("X"), before);

    ledger.toggle_dislike("X");
    ledger.toggle_dislike("X");
    assert_eq!(ledger.get_reaction("X"), None);
    assert_eq!(ledger.session_delta("X"), before);
}

#[test]
fn reaction_stays_exclusive_across_any_sequence() {
    let (mut ledger, _sync) = fresh_ledger();

    ledger.toggle_like("X");
    ledger.toggle_dislike("X");
    assert_eq!(ledger.get_reaction("X"), Some(Reaction::Disliked));

    ledger.toggle_like("X");
    assert_eq!(ledger.get_reaction("X"), Some(Reaction::Liked));

    ledger.toggle_like("X");
    ledger.toggle_dislike("X");
    ledger.toggle_dislike("X");
    assert_eq!(ledger.get_reaction("X"), None);

    // Per-track isolation: X's churn never touched Y.
    assert_eq!(ledger.get_reaction("Y"), None);
    assert_eq!(ledger.session_delta("Y"), ReactionDelta::ZERO);
}

#[test]
fn display_count_clamps_at_zero_after_unliking_a_zero_count() {
    // Prior session left a persisted Like; the server-side counter was lost
    // or reset to 0. Removing the like drives the session delta to -1, but
    // the displayed value floors at 0 instead of showing -1.
    let store = MemoryStore::seeded(&[("X", Reaction::Liked)]);
    let sync = RecordingSync::default();
    let mut ledger = InteractionLedger::new(Box::new(store), Arc::new(sync.clone()));

    assert_eq!(ledger.get_reaction("X"), Some(Reaction::Liked));
    ledger.toggle_like("X");
    assert_eq!(ledger.session_delta("X"), ReactionDelta::new(-1, 0));
    assert_eq!(ledger.display_count("X", 0, 0), (0, 0));
}

#[test]
fn session_deltas_are_not_persisted() {
    let store = Arc::new(MemoryStore::default());

    struct SharedStore(Arc<MemoryStore>);
    impl ReactionStore for SharedStore {
        fn load(&self) -> Result<HashMap<String, Reaction>, DomainError> {
            self.0.load()
        }
        fn save(&self, reactions: &HashMap<String, Reaction>) -> Result<(), DomainError> {
            self.0.save(reactions)
        }
    }

    let sync = RecordingSync::default();
    let mut ledger = InteractionLedger::new(
        Box::new(SharedStore(store.clone())),
        Arc::new(sync.clone()),
    );
    ledger.toggle_like("X");
    assert_eq!(ledger.session_delta("X"), ReactionDelta::new(1, 0));
    drop(ledger);

    // A new session keeps the reaction but starts with a clean delta: the
    // displayed count relies on a fresh authoritative fetch.
    let reloaded = InteractionLedger::new(Box::new(SharedStore(store)), Arc::new(sync));
    assert_eq!(reloaded.get_reaction("X"), Some(Reaction::Liked));
    assert_eq!(reloaded.session_delta("X"), ReactionDelta::ZERO);
    assert_eq!(reloaded.display_count("X", 6, 2), (6, 2));
}

#[test]
fn json_store_round_trips_reactions_and_omits_untouched_tracks() {
    let path = temp_store_path();
    let sync = RecordingSync::default();

    let mut ledger = InteractionLedger::new(
        Box::new(JsonFileReactionStore::new(path.clone())),
        Arc::new(sync.clone()),
    );
    ledger.toggle_like("alpha");
    ledger.toggle_dislike("beta");
    ledger.toggle_like("gamma");
    ledger.toggle_like("gamma"); // net None, must vanish from the file
    drop(ledger);

    let raw = std::fs::read_to_string(&path).expect("reaction file missing");
    assert!(raw.contains("alpha"));
    assert!(raw.contains("beta"));
    assert!(!raw.contains("gamma"));

    let reloaded = InteractionLedger::new(
        Box::new(JsonFileReactionStore::new(path)),
        Arc::new(sync),
    );
    assert_eq!(reloaded.get_reaction("alpha"), Some(Reaction::Liked));
    assert_eq!(reloaded.get_reaction("beta"), Some(Reaction::Disliked));
    assert_eq!(reloaded.get_reaction("gamma"), None);
}

#[test]
fn corrupt_reaction_file_loads_as_empty() {
    let path = temp_store_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json at all").unwrap();

    let store = JsonFileReactionStore::new(path);
    let map = store.load().expect("corrupt file should not error");
    assert!(map.is_empty());
}

#[test]
fn store_save_failure_never_loses_the_local_state() {
    let mut store = MockStore::new();
    store.expect_load().times(1).returning(|| Ok(HashMap::new()));
    store
        .expect_save()
        .with(always())
        .times(1)
        .returning(|_| Err(DomainError::InfrastructureError("disk full".into())));

    let sync = RecordingSync::default();
    let mut ledger = InteractionLedger::new(Box::new(store), Arc::new(sync.clone()));

    // The toggle still succeeds locally and still dispatches its delta.
    ledger.toggle_like("X");
    assert_eq!(ledger.get_reaction("X"), Some(Reaction::Liked));
    assert_eq!(sync.sent(), vec![("X".to_string(), ReactionDelta::new(1, 0))]);
}

#[test]
fn every_effective_toggle_dispatches_exactly_once() {
    let mut store = MockStore::new();
    store.expect_load().times(1).returning(|| Ok(HashMap::new()));
    store.expect_save().times(4).returning(|_| Ok(()));

    let sync = RecordingSync::default();
    let mut ledger = InteractionLedger::new(Box::new(store), Arc::new(sync.clone()));

    ledger.toggle_like("a");
    ledger.toggle_dislike("a");
    ledger.toggle_like("b");
    ledger.toggle_like("b");

    assert_eq!(sync.sent().len(), 4);
}
