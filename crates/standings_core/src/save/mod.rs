// Snapshot persistence for league standings
// One pretty-printed JSON table + one JSON ledger array per league

pub mod error;
pub mod format;
pub mod manager;

pub use error::SaveError;
pub use format::{decode_ledger, decode_table, encode_ledger, encode_table, TableSnapshot};
pub use manager::SnapshotStore;

pub const SNAPSHOT_VERSION: u32 = 1;
