//! The set of selected course IDs and its persistent store.
//!
//! The store is an explicit value handed to whoever needs to read or change
//! the selection. Every mutation writes through to the persistence backend
//! before it returns.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::SELECTION_STORAGE_KEY;
use crate::error::{TimetableError, TimetableResult};

/// Selected course IDs in insertion order, without duplicates.
///
/// An empty selection means "show everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection, keeping the first occurrence of repeated IDs.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Selection::new();
        for id in ids {
            selection.add(id);
        }
        selection
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.ids.iter().any(|id| id == course_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Returns false if the ID was already selected.
    fn add(&mut self, course_id: impl Into<String>) -> bool {
        let course_id = course_id.into();
        if self.contains(&course_id) {
            return false;
        }
        self.ids.push(course_id);
        true
    }

    fn remove(&mut self, course_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != course_id);
        self.ids.len() != before
    }
}

/// Where a selection is kept between runs.
pub trait SelectionPersistence {
    /// The previously saved selection, if any.
    fn load(&self) -> TimetableResult<Option<Selection>>;

    fn save(&mut self, selection: &Selection) -> TimetableResult<()>;
}

/// Selection plus the backend it is persisted to.
pub struct SelectionStore<P: SelectionPersistence> {
    selection: Selection,
    persistence: P,
}

impl<P: SelectionPersistence> SelectionStore<P> {
    /// Restore the persisted selection, or start empty when nothing was saved.
    pub fn open(persistence: P) -> TimetableResult<Self> {
        let selection = persistence.load()?.unwrap_or_default();
        debug!(selected = selection.len(), "Restored course selection");
        Ok(SelectionStore {
            selection,
            persistence,
        })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.selection.contains(course_id)
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Append a course unless it is already selected.
    pub fn add(&mut self, course_id: &str) -> TimetableResult<()> {
        self.update(|selection| {
            selection.add(course_id);
        })
    }

    pub fn remove(&mut self, course_id: &str) -> TimetableResult<()> {
        self.update(|selection| {
            selection.remove(course_id);
        })
    }

    /// Remove the course if selected, otherwise append it.
    /// Returns whether the course is selected afterwards.
    pub fn toggle(&mut self, course_id: &str) -> TimetableResult<bool> {
        self.update(|selection| {
            if selection.remove(course_id) {
                false
            } else {
                selection.add(course_id)
            }
        })
    }

    pub fn clear(&mut self) -> TimetableResult<()> {
        self.update(|selection| *selection = Selection::new())
    }

    /// Replace the whole selection.
    pub fn set_all<I, S>(&mut self, course_ids: I) -> TimetableResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update(|selection| *selection = Selection::from_ids(course_ids))
    }

    /// Append every course not already selected, keeping existing order.
    pub fn select_many<I, S>(&mut self, course_ids: I) -> TimetableResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update(|selection| {
            for id in course_ids {
                selection.add(id);
            }
        })
    }

    /// Apply `change` to a copy, which replaces the selection only after it
    /// has been saved.
    fn update<R>(&mut self, change: impl FnOnce(&mut Selection) -> R) -> TimetableResult<R> {
        let mut next = self.selection.clone();
        let result = change(&mut next);
        self.persistence.save(&next)?;
        self.selection = next;
        Ok(result)
    }
}

// =============================================================================
// Backends
// =============================================================================

/// Record layout kept under the storage key.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedRecord {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    selected_courses: Selection,
}

/// A JSON key-value file holding the selection under a single named key.
///
/// Other keys in the file are left untouched.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    fn read_records(&self) -> TimetableResult<BTreeMap<String, serde_json::Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl SelectionPersistence for JsonFileStore {
    fn load(&self) -> TimetableResult<Option<Selection>> {
        let mut records = match self.read_records() {
            Ok(records) => records,
            Err(TimetableError::Serialization(e)) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable selection file");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let Some(value) = records.remove(SELECTION_STORAGE_KEY) else {
            return Ok(None);
        };

        match serde_json::from_value::<PersistedRecord>(value) {
            Ok(record) => Ok(Some(record.state.selected_courses)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable selection record");
                Ok(None)
            }
        }
    }

    fn save(&mut self, selection: &Selection) -> TimetableResult<()> {
        let mut records = match self.read_records() {
            Ok(records) => records,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Overwriting unreadable selection file");
                BTreeMap::new()
            }
        };

        let record = PersistedRecord {
            state: PersistedState {
                selected_courses: selection.clone(),
            },
            version: 0,
        };
        records.insert(SELECTION_STORAGE_KEY.to_string(), serde_json::to_value(record)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&records)?;
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&temp);
            TimetableError::Io(e)
        })?;

        debug!(path = %self.path.display(), selected = selection.len(), "Saved course selection");
        Ok(())
    }
}

/// Keeps the selection in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Option<Selection>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously saved selection.
    pub fn with_saved(selection: Selection) -> Self {
        MemoryStore {
            saved: Some(selection),
            saves: 0,
        }
    }

    pub fn saved(&self) -> Option<&Selection> {
        self.saved.as_ref()
    }

    /// Number of writes so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SelectionPersistence for MemoryStore {
    fn load(&self) -> TimetableResult<Option<Selection>> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, selection: &Selection) -> TimetableResult<()> {
        self.saved = Some(selection.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(store: &SelectionStore<MemoryStore>) -> Vec<&str> {
        store.selection().iter().collect()
    }

    #[test]
    fn test_add_ignores_duplicates() {
        let mut store = SelectionStore::open(MemoryStore::new()).unwrap();
        store.add("MATH101").unwrap();
        store.add("PHYS201").unwrap();
        store.add("MATH101").unwrap();
        assert_eq!(ids(&store), vec!["MATH101", "PHYS201"]);
    }

    #[test]
    fn test_toggle_twice_restores_membership_and_order() {
        let mut store = SelectionStore::open(MemoryStore::new()).unwrap();
        store.set_all(["A", "B", "C"]).unwrap();

        assert!(!store.toggle("B").unwrap());
        assert_eq!(ids(&store), vec!["A", "C"]);
        assert!(store.toggle("B").unwrap());
        assert_eq!(ids(&store), vec!["A", "C", "B"]);

        assert!(store.toggle("D").unwrap());
        assert!(!store.toggle("D").unwrap());
        assert_eq!(ids(&store), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = SelectionStore::open(MemoryStore::new()).unwrap();
        store.add("A").unwrap();
        store.toggle("B").unwrap();
        store.remove("A").unwrap();
        store.select_many(["C", "B"]).unwrap();
        store.clear().unwrap();
        store.set_all(["Z"]).unwrap();

        assert_eq!(store.persistence().saves(), 6);
        assert_eq!(store.persistence().saved(), Some(&Selection::from_ids(["Z"])));
    }

    #[test]
    fn test_select_many_appends_only_new_ids() {
        let mut store = SelectionStore::open(MemoryStore::new()).unwrap();
        store.set_all(["B", "A"]).unwrap();
        store.select_many(["A", "C", "C", "D"]).unwrap();
        assert_eq!(ids(&store), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_set_all_deduplicates() {
        let mut store = SelectionStore::open(MemoryStore::new()).unwrap();
        store.set_all(["A", "B", "A"]).unwrap();
        assert_eq!(ids(&store), vec!["A", "B"]);
    }

    #[test]
    fn test_open_restores_saved_selection() {
        let store =
            SelectionStore::open(MemoryStore::with_saved(Selection::from_ids(["X", "Y"]))).unwrap();
        assert!(store.contains("X"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state/selection.json");

        {
            let mut store = SelectionStore::open(JsonFileStore::new(&path)).unwrap();
            assert!(store.is_empty());
            store.set_all(["MATH101", "PHYS201"]).unwrap();
        }

        let store = SelectionStore::open(JsonFileStore::new(&path)).unwrap();
        assert_eq!(store.selection().ids(), &["MATH101", "PHYS201"]);

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            value[SELECTION_STORAGE_KEY]["state"]["selectedCourses"],
            serde_json::json!(["MATH101", "PHYS201"])
        );
    }

    struct BrokenStore;

    impl SelectionPersistence for BrokenStore {
        fn load(&self) -> TimetableResult<Option<Selection>> {
            Ok(Some(Selection::from_ids(["MATH101"])))
        }

        fn save(&mut self, _selection: &Selection) -> TimetableResult<()> {
            Err(TimetableError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_failed_save_keeps_previous_selection() {
        let mut store = SelectionStore::open(BrokenStore).unwrap();

        assert!(store.add("PHYS201").is_err());
        assert!(store.toggle("MATH101").is_err());
        assert!(store.clear().is_err());

        assert_eq!(store.selection().ids(), &["MATH101"]);
    }

    #[test]
    fn test_json_file_store_starts_empty_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selection.json");
        std::fs::write(&path, "{ truncated").unwrap();

        let mut store = SelectionStore::open(JsonFileStore::new(&path)).unwrap();
        assert!(store.is_empty());

        store.add("MATH101").unwrap();
        let reopened = SelectionStore::open(JsonFileStore::new(&path)).unwrap();
        assert_eq!(reopened.selection().ids(), &["MATH101"]);
    }

    #[test]
    fn test_json_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut store = SelectionStore::open(JsonFileStore::new(&path)).unwrap();
        store.add("CHEM110").unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["theme"], "dark");
        assert!(!dir.path().join("storage.json.tmp").exists());
    }
}
