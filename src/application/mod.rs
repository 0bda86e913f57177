pub mod interaction_ledger;
pub mod upload_track;
