use super::error::SaveError;
use super::format::{decode_ledger, decode_table, encode_ledger, encode_table};

use std::fs::{self, rename, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::EngineConfig;
use crate::league::League;
use crate::ledger::Ledger;
use crate::table::StandingsTable;

/// Reads and writes the durable state of every league under one
/// directory. Deleting a league's two files is the reset operation.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self, league: League) -> PathBuf {
        self.dir.join(format!("{}_standings.json", league))
    }

    pub fn ledger_path(&self, league: League) -> PathBuf {
        self.dir.join(format!("{}_ledger.json", league))
    }

    /// `Ok(None)` when no table has been written yet
    pub fn load_table(&self, league: League) -> Result<Option<StandingsTable>, SaveError> {
        let path = self.table_path(league);
        let Some(bytes) = read_if_exists(&path)? else {
            return Ok(None);
        };

        let table = decode_table(&bytes, league)?;
        log::debug!("Loaded {} table ({} bytes) from {:?}", league, bytes.len(), path);
        Ok(Some(table))
    }

    /// `Ok(None)` when no ledger has been written yet
    pub fn load_ledger(&self, league: League) -> Result<Option<Ledger>, SaveError> {
        let path = self.ledger_path(league);
        let Some(bytes) = read_if_exists(&path)? else {
            return Ok(None);
        };

        let ledger = decode_ledger(&bytes)?;
        log::debug!("Loaded {} ledger ({} ids) from {:?}", league, ledger.len(), path);
        Ok(Some(ledger))
    }

    /// Write table and ledger together. Both are staged to temp files and
    /// synced before either is renamed into place, so a failure while
    /// writing leaves the previous pair intact.
    pub fn save(
        &self,
        league: League,
        table: &StandingsTable,
        ledger: &Ledger,
    ) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;

        let table_bytes = encode_table(table)?;
        let ledger_bytes = encode_ledger(ledger)?;

        let table_path = self.table_path(league);
        let ledger_path = self.ledger_path(league);
        let table_tmp = table_path.with_extension("tmp");
        let ledger_tmp = ledger_path.with_extension("tmp");

        let staged = write_synced(&table_tmp, &table_bytes)
            .and_then(|_| write_synced(&ledger_tmp, &ledger_bytes));
        if let Err(e) = staged {
            let _ = fs::remove_file(&table_tmp);
            let _ = fs::remove_file(&ledger_tmp);
            return Err(e.into());
        }

        rename(&table_tmp, &table_path)?;
        rename(&ledger_tmp, &ledger_path)?;

        log::debug!(
            "Saved {} snapshot: table {} bytes, ledger {} ids",
            league,
            table_bytes.len(),
            ledger.len()
        );
        Ok(())
    }

    /// Delete both files (and any stray temp files) for `league`.
    pub fn clear(&self, league: League) -> Result<(), SaveError> {
        let table_path = self.table_path(league);
        let ledger_path = self.ledger_path(league);

        for path in [
            table_path.with_extension("tmp"),
            ledger_path.with_extension("tmp"),
            table_path,
            ledger_path,
        ] {
            match fs::remove_file(&path) {
                Ok(()) => log::info!("Deleted {:?}", path),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, SaveError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.flush()?;

    // sync_all ensures data is written to disk (portable fsync)
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::baseline_table;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path().join("nested"));

        let table = baseline_table(League::Nba);
        let ledger = Ledger::from(vec!["401".to_string(), "402".to_string()]);

        store.save(League::Nba, &table, &ledger).unwrap();

        let loaded_table = store.load_table(League::Nba).unwrap().unwrap();
        let loaded_ledger = store.load_ledger(League::Nba).unwrap().unwrap();
        assert_eq!(loaded_table.groups(), table.groups());
        assert_eq!(loaded_ledger, ledger);
    }

    #[test]
    fn test_missing_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        assert!(store.load_table(League::Nhl).unwrap().is_none());
        assert!(store.load_ledger(League::Nhl).unwrap().is_none());
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        store.save(League::Nfl, &baseline_table(League::Nfl), &Ledger::new()).unwrap();

        assert!(store.table_path(League::Nfl).exists());
        assert!(store.ledger_path(League::Nfl).exists());
        assert!(!store.table_path(League::Nfl).with_extension("tmp").exists());
        assert!(!store.ledger_path(League::Nfl).with_extension("tmp").exists());
    }

    #[test]
    fn test_ledger_file_is_a_plain_array() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        let ledger = Ledger::from(vec!["9".to_string(), "3".to_string()]);
        store.save(League::Nhl, &baseline_table(League::Nhl), &ledger).unwrap();

        let raw = fs::read_to_string(store.ledger_path(League::Nhl)).unwrap();
        let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(ids, vec!["9", "3"]);
    }

    #[test]
    fn test_clear_removes_league_files_only() {
        let temp_dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(temp_dir.path());

        store.save(League::Nhl, &baseline_table(League::Nhl), &Ledger::new()).unwrap();
        store.save(League::Nba, &baseline_table(League::Nba), &Ledger::new()).unwrap();

        store.clear(League::Nhl).unwrap();
        store.clear(League::Nhl).unwrap();

        assert!(!store.table_path(League::Nhl).exists());
        assert!(!store.ledger_path(League::Nhl).exists());
        assert!(store.table_path(League::Nba).exists());
    }

    #[test]
    fn test_save_into_unwritable_location_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        fs::write(&blocker, b"file").unwrap();

        let store = SnapshotStore::new(&blocker);
        let err = store
            .save(League::Nhl, &baseline_table(League::Nhl), &Ledger::new())
            .unwrap_err();
        assert!(err.is_recoverable());
    }
}
