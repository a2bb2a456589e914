//! Durable event store.
//!
//! The store keeps the full event collection in one JSON file. Appends
//! load the existing collection, concatenate the new events and replace the
//! whole file in one rename, so a reader only ever sees a complete write.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{error, info, warn};

use crate::config::DEFAULT_DATA_FILE;
use crate::error::{EngineError, EngineResult};
use crate::models::Event;

/// Serializes every append critical section in the process.
static APPEND_LOCK: Mutex<()> = Mutex::new(());

/// Ordered, append-only collection of events backed by a JSON file.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::store::EventStore;
///
/// let store = EventStore::new("data/EmployeeData.json");
/// let events = store.read_all();
/// println!("{} events stored", events.len());
/// ```
#[derive(Debug, Clone)]
pub struct EventStore {
    path: PathBuf,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl EventStore {
    /// Creates a store backed by the file at `path`. Nothing is touched on
    /// disk until the first append.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `events` after every stored event.
    ///
    /// Creates the backing file and its directory when missing. The existing
    /// collection and the new events are written as one unit; on error
    /// nothing is committed.
    ///
    /// # Returns
    ///
    /// The total number of stored events after the append, or an error if:
    /// - The directory or file cannot be created or written (`FileAccess`)
    /// - The existing content cannot be decoded (`StoreDecode`); the file is
    ///   left untouched
    pub fn append(&self, events: &[Event]) -> EngineResult<usize> {
        let _guard = APPEND_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        self.ensure_parent_dir()?;

        let mut records = self.load()?;
        let existing = records.len();
        records.extend_from_slice(events);

        self.replace_contents(&records)?;

        info!(
            path = %self.path.display(),
            existing,
            appended = events.len(),
            total = records.len(),
            "Appended events to store"
        );

        Ok(records.len())
    }

    /// Reads the full collection in insertion order.
    ///
    /// A missing or empty backing file yields an empty collection. Content
    /// that cannot be decoded is reported as `StoreDecode`.
    pub fn load(&self) -> EngineResult<Vec<Event>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.file_access(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| EngineError::StoreDecode {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Reads the full collection, treating any failure as an empty store.
    ///
    /// Failures are logged at error level. Use [`EventStore::load`] to
    /// observe them.
    pub fn read_all(&self) -> Vec<Event> {
        match self.load() {
            Ok(events) => {
                info!(path = %self.path.display(), count = events.len(), "Read events from store");
                events
            }
            Err(err) => {
                error!(
                    path = %self.path.display(),
                    error = %err,
                    "Event store unreadable; reporting it as empty"
                );
                Vec::new()
            }
        }
    }

    fn ensure_parent_dir(&self) -> EngineResult<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| EngineError::FileAccess {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Sibling of the backing file that receives each new write.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Writes `records` to a sibling temporary file and renames it over the
    /// backing file.
    fn replace_contents(&self, records: &[Event]) -> EngineResult<()> {
        let temp_path = self.temp_path();

        let written = Self::write_records(&temp_path, records)
            .and_then(|()| fs::rename(&temp_path, &self.path));

        written.map_err(|e| {
            match fs::remove_file(&temp_path) {
                Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => warn!(
                    path = %temp_path.display(),
                    error = %cleanup,
                    "Failed to remove temporary store file"
                ),
                _ => {}
            }
            self.file_access(e)
        })
    }

    fn write_records(path: &Path, records: &[Event]) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        writer.get_ref().sync_all()
    }

    fn file_access(&self, e: std::io::Error) -> EngineError {
        error!(path = %self.path.display(), error = %e, "Event store file access failed");
        EngineError::FileAccess {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use tempfile::TempDir;

    fn create_test_store() -> (EventStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = EventStore::new(temp_dir.path().join("data").join("EmployeeData.json"));
        (store, temp_dir)
    }

    fn event(sequence_no: &str, emp_id: &str) -> Event {
        Event {
            sequence_no: sequence_no.to_string(),
            emp_id: emp_id.to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            designation: "Engineer".to_string(),
            event: "SALARY".to_string(),
            value: Decimal::new(5000, 0),
            event_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            notes: "Jan salary".to_string(),
        }
    }

    #[test]
    fn test_read_all_on_missing_store_is_empty() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.read_all().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_creates_directory_and_file() {
        let (store, _temp_dir) = create_test_store();

        let total = store.append(&[event("1", "100")]).unwrap();

        assert_eq!(total, 1);
        assert!(store.path().exists());
        assert_eq!(store.read_all(), vec![event("1", "100")]);
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let (store, _temp_dir) = create_test_store();

        store.append(&[event("1", "100"), event("2", "100")]).unwrap();
        store.append(&[event("3", "101")]).unwrap();

        let sequence: Vec<String> = store
            .read_all()
            .into_iter()
            .map(|e| e.sequence_no)
            .collect();
        assert_eq!(sequence, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_duplicate_appends_are_not_deduplicated() {
        let (store, _temp_dir) = create_test_store();

        store.append(&[event("1", "100")]).unwrap();
        let total = store.append(&[event("1", "100")]).unwrap();

        assert_eq!(total, 2);
        assert_eq!(store.read_all().len(), 2);
    }

    #[test]
    fn test_empty_file_reads_as_empty() {
        let (store, _temp_dir) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "").unwrap();

        assert!(store.read_all().is_empty());
        assert_eq!(store.append(&[event("1", "100")]).unwrap(), 1);
    }

    #[test]
    fn test_corrupt_store_reads_as_empty_but_load_reports_it() {
        let (store, _temp_dir) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(store.read_all().is_empty());
        assert!(matches!(store.load(), Err(EngineError::StoreDecode { .. })));
    }

    #[test]
    fn test_append_refuses_to_overwrite_corrupt_store() {
        let (store, _temp_dir) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        let result = store.append(&[event("1", "100")]);

        assert!(matches!(result, Err(EngineError::StoreDecode { .. })));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{not json");
    }

    #[test]
    fn test_append_fails_when_directory_cannot_be_created() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();
        let store = EventStore::new(blocker.join("EmployeeData.json"));

        let result = store.append(&[event("1", "100")]);

        assert!(matches!(result, Err(EngineError::FileAccess { .. })));
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_no_temporary_file_is_left_behind() {
        let (store, _temp_dir) = create_test_store();
        store.append(&[event("1", "100")]).unwrap();

        assert_eq!(store.temp_path(), store.path().with_file_name("EmployeeData.json.tmp"));
        assert_eq!(
            dir_entries(store.path().parent().unwrap()),
            vec!["EmployeeData.json"]
        );
    }

    #[test]
    fn test_store_named_tmp_gets_a_distinct_temporary_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = EventStore::new(temp_dir.path().join("events.tmp"));

        store.append(&[event("1", "100")]).unwrap();
        store.append(&[event("2", "100")]).unwrap();

        assert_ne!(store.temp_path(), store.path());
        assert_eq!(store.read_all().len(), 2);
        assert_eq!(dir_entries(temp_dir.path()), vec!["events.tmp"]);
    }

    #[test]
    fn test_failed_write_keeps_existing_contents() {
        let (store, _temp_dir) = create_test_store();
        store.append(&[event("1", "100")]).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();
        // A directory in the temporary file's place makes the write and the
        // cleanup both fail.
        fs::create_dir_all(store.temp_path().join("occupied")).unwrap();

        let result = store.append(&[event("2", "100")]);

        assert!(matches!(result, Err(EngineError::FileAccess { .. })));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        assert!(store.temp_path().is_dir());
    }

    #[test]
    fn test_persisted_format_uses_store_field_names() {
        let (store, _temp_dir) = create_test_store();
        store.append(&[event("1", "100")]).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw[0]["empId"], "100");
        assert_eq!(raw[0]["eventDate"], "2021-01-01");
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let (store, _temp_dir) = create_test_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..5 {
                        let seq = format!("{worker}-{i}");
                        store.append(&[event(&seq, &worker.to_string())]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let events = store.read_all();
        assert_eq!(events.len(), 40);
        for worker in 0..8 {
            let own: Vec<&str> = events
                .iter()
                .filter(|e| e.emp_id == worker.to_string())
                .map(|e| e.sequence_no.as_str())
                .collect();
            let expected: Vec<String> = (0..5).map(|i| format!("{worker}-{i}")).collect();
            assert_eq!(own, expected);
        }
    }

    #[test]
    fn test_reads_during_appends_see_whole_collections() {
        let (store, _temp_dir) = create_test_store();
        let store = Arc::new(store);
        let writing = Arc::new(AtomicBool::new(true));

        let reader = {
            let store = Arc::clone(&store);
            let writing = Arc::clone(&writing);
            thread::spawn(move || {
                let mut previous: Vec<Event> = Vec::new();
                let mut reads = 0usize;
                while writing.load(Ordering::Acquire) || reads == 0 {
                    let current = store.load().unwrap();
                    assert!(current.len() >= previous.len());
                    assert!(current.len() <= 40);
                    assert_eq!(current[..previous.len()], previous[..]);
                    previous = current;
                    reads += 1;
                }
                previous
            })
        };

        let writers: Vec<_> = (0..4)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..10 {
                        let seq = format!("{worker}-{i}");
                        store.append(&[event(&seq, &worker.to_string())]).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }
        writing.store(false, Ordering::Release);

        let last_seen = reader.join().unwrap();
        let committed = store.load().unwrap();
        assert_eq!(committed.len(), 40);
        assert_eq!(committed[..last_seen.len()], last_seen[..]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_split_appends_equal_single_append(
            ids in prop::collection::vec("[0-9]{1,4}", 0..12),
            split in 0usize..12,
        ) {
            let events: Vec<Event> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| event(&i.to_string(), id))
                .collect();
            let split = split.min(events.len());

            let (split_store, _split_dir) = create_test_store();
            split_store.append(&events[..split]).unwrap();
            split_store.append(&events[split..]).unwrap();

            let (single_store, _single_dir) = create_test_store();
            single_store.append(&events).unwrap();

            prop_assert_eq!(split_store.read_all(), single_store.read_all());
            prop_assert_eq!(split_store.read_all(), events);
        }
    }
}
