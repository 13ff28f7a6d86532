//! Run history: an ordered, newest-first list of past scheduling runs.
//!
//! The strategies never touch storage; the planner hands finished results
//! to a [`HistoryStore`]. Two stores are provided:
//!
//! - [`MemoryHistory`]: in-process list.
//! - [`JsonFileHistory`]: pretty-printed JSON array on disk. Each
//!   read-modify-write holds an exclusive lock on a sidecar `<file>.lock`,
//!   so writers in different processes are serialized.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::HistoryError;
use crate::models::{ScheduleResult, Task};
use crate::scheduler::ScheduleMethod;

/// Wall-clock format of `HistoryRecord::display_time` and of legacy files.
const DISPLAY_TIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// One recorded scheduling run.
///
/// Written with an RFC 3339 `time` and a `student_name` key. Files from
/// the earlier web app (`nama_mahasiswa`, `dd/mm/YYYY, HH:MM:SS` local
/// time without offset) still load; their timestamps are read as UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Strategy that produced the result.
    pub method: ScheduleMethod,
    /// Selected tasks, in the order they were presented.
    pub result: Vec<Task>,
    /// Total priority score.
    pub score: i64,
    /// When the run finished.
    #[serde(deserialize_with = "deserialize_time")]
    pub time: DateTime<Utc>,
    /// Who requested the run (`"-"` when anonymous).
    #[serde(alias = "nama_mahasiswa")]
    pub student_name: String,
}

impl HistoryRecord {
    /// Creates a record stamped with the current time.
    pub fn new(
        method: ScheduleMethod,
        result: &ScheduleResult,
        student_name: impl Into<String>,
    ) -> Self {
        Self::at(method, result, student_name, Utc::now())
    }

    /// Creates a record with an explicit timestamp.
    pub fn at(
        method: ScheduleMethod,
        result: &ScheduleResult,
        student_name: impl Into<String>,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            method,
            result: result.selected.clone(),
            score: result.score,
            time,
            student_name: student_name.into(),
        }
    }

    /// Timestamp as `dd/mm/YYYY, HH:MM:SS`.
    pub fn display_time(&self) -> String {
        self.time.format(DISPLAY_TIME_FORMAT).to_string()
    }
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(time) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(time.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, DISPLAY_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid history time '{raw}': {e}")))
}

/// Ordered storage for run records, newest first.
pub trait HistoryStore {
    /// All records, newest first.
    fn records(&self) -> Result<Vec<HistoryRecord>, HistoryError>;

    /// Inserts a record at the front.
    fn prepend(&mut self, record: HistoryRecord) -> Result<(), HistoryError>;

    /// Removes and returns the record at `index` (0 = newest).
    ///
    /// # Errors
    /// [`HistoryError::IndexOutOfRange`] if `index >= len`.
    fn delete(&mut self, index: usize) -> Result<HistoryRecord, HistoryError>;
}

/// In-memory history.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    records: Vec<HistoryRecord>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HistoryStore for MemoryHistory {
    fn records(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        Ok(self.records.clone())
    }

    fn prepend(&mut self, record: HistoryRecord) -> Result<(), HistoryError> {
        self.records.insert(0, record);
        Ok(())
    }

    fn delete(&mut self, index: usize) -> Result<HistoryRecord, HistoryError> {
        remove_at(&mut self.records, index)
    }
}

/// History persisted as a JSON array file.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
    lock_path: PathBuf,
    tmp_path: PathBuf,
}

impl JsonFileHistory {
    /// Opens a history at `path`. The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock_path = sibling_path(&path, ".lock");
        let tmp_path = sibling_path(&path, ".tmp");
        Self {
            path,
            lock_path,
            tmp_path,
        }
    }

    /// Path of the JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn ensure_parent(&self) -> Result<(), HistoryError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))
            }
            _ => Ok(()),
        }
    }

    /// Takes the exclusive lock. Released when the returned file is dropped.
    fn lock(&self) -> Result<File, HistoryError> {
        self.ensure_parent()?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| self.io_error(e))?;
        file.lock_exclusive().map_err(|e| self.io_error(e))?;
        Ok(file)
    }

    fn load(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|source| HistoryError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(records).map_err(|source| {
            HistoryError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        // Write-then-rename so readers never observe a partial file
        fs::write(&self.tmp_path, json).map_err(|e| self.io_error(e))?;
        fs::rename(&self.tmp_path, &self.path).map_err(|e| self.io_error(e))
    }

    fn modify<T>(
        &self,
        f: impl FnOnce(&mut Vec<HistoryRecord>) -> Result<T, HistoryError>,
    ) -> Result<T, HistoryError> {
        let _guard = self.lock()?;
        let mut records = self.load()?;
        let out = f(&mut records)?;
        self.save(&records)?;
        Ok(out)
    }
}

impl HistoryStore for JsonFileHistory {
    fn records(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        self.load()
    }

    fn prepend(&mut self, record: HistoryRecord) -> Result<(), HistoryError> {
        self.modify(|records| {
            records.insert(0, record);
            Ok(())
        })?;
        tracing::debug!(path = %self.path.display(), "history record prepended");
        Ok(())
    }

    fn delete(&mut self, index: usize) -> Result<HistoryRecord, HistoryError> {
        let removed = self.modify(|records| remove_at(records, index))?;
        tracing::debug!(path = %self.path.display(), index, "history record deleted");
        Ok(removed)
    }
}

/// `dir/name.ext` -> `dir/name.ext<suffix>`.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

fn remove_at(
    records: &mut Vec<HistoryRecord>,
    index: usize,
) -> Result<HistoryRecord, HistoryError> {
    if index >= records.len() {
        return Err(HistoryError::IndexOutOfRange {
            index,
            len: records.len(),
        });
    }
    Ok(records.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(name: &str, score: i64) -> HistoryRecord {
        let result = ScheduleResult::from_selection(vec![Task::new("A", 1, score)]);
        HistoryRecord::at(
            ScheduleMethod::Greedy,
            &result,
            name,
            Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
        )
    }

    #[test]
    fn test_record_from_result() {
        let result = ScheduleResult::from_selection(vec![
            Task::new("A", 1, 5).with_difficulty(2),
            Task::new("C", 1, 4),
        ]);
        let rec = HistoryRecord::new(ScheduleMethod::Backtracking, &result, "Rina");

        assert_eq!(rec.method, ScheduleMethod::Backtracking);
        assert_eq!(rec.result, result.selected);
        assert_eq!(rec.score, 9);
        assert_eq!(rec.student_name, "Rina");
    }

    #[test]
    fn test_display_time() {
        assert_eq!(record("x", 1).display_time(), "09/03/2024, 14:05:07");
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record("Budi", 5)).unwrap();
        assert_eq!(json["method"], "greedy");
        assert_eq!(json["score"], 5);
        assert_eq!(json["student_name"], "Budi");
        assert_eq!(json["result"][0]["priority"], 5);
        assert_eq!(json["result"][0]["difficulty"], 0);
    }

    #[test]
    fn test_memory_newest_first() {
        let mut store = MemoryHistory::new();
        store.prepend(record("first", 1)).unwrap();
        store.prepend(record("second", 2)).unwrap();

        let records = store.records().unwrap();
        assert_eq!(records[0].student_name, "second");
        assert_eq!(records[1].student_name, "first");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_memory_delete_bounds() {
        let mut store = MemoryHistory::new();
        store.prepend(record("only", 1)).unwrap();

        let err = store.delete(1).unwrap_err();
        assert!(matches!(err, HistoryError::IndexOutOfRange { index: 1, len: 1 }));

        let removed = store.delete(0).unwrap();
        assert_eq!(removed.student_name, "only");
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistory::new(dir.path().join("history.json"));
        assert!(store.records().unwrap().is_empty());
    }

    #[test]
    fn test_file_roundtrip_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("history.json");
        let mut store = JsonFileHistory::new(&path);

        store.prepend(record("first", 1)).unwrap();
        store.prepend(record("second", 2)).unwrap();
        assert!(path.exists());

        // A fresh handle sees the persisted order
        let reopened = JsonFileHistory::new(&path);
        let records = reopened.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].student_name, "second");
        assert_eq!(records[0], record("second", 2));
    }

    #[test]
    fn test_file_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileHistory::new(dir.path().join("history.json"));
        store.prepend(record("a", 1)).unwrap();
        store.prepend(record("b", 2)).unwrap();
        store.prepend(record("c", 3)).unwrap();

        let removed = store.delete(1).unwrap();
        assert_eq!(removed.student_name, "b");

        let names: Vec<String> = store
            .records()
            .unwrap()
            .into_iter()
            .map(|r| r.student_name)
            .collect();
        assert_eq!(names, vec!["c", "a"]);

        let err = store.delete(2).unwrap_err();
        assert!(matches!(err, HistoryError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(store.records().unwrap().len(), 2);
    }

    #[test]
    fn test_sibling_paths_keep_extension() {
        let store = JsonFileHistory::new("/var/lib/runs.dat");
        assert_eq!(store.tmp_path, PathBuf::from("/var/lib/runs.dat.tmp"));
        assert_eq!(store.lock_path, PathBuf::from("/var/lib/runs.dat.lock"));
    }

    #[test]
    fn test_file_non_json_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.dat");
        let mut store = JsonFileHistory::new(&path);
        store.prepend(record("a", 1)).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("runs.json.tmp").exists());
        assert!(!dir.path().join("runs.dat.tmp").exists());
        assert_eq!(store.records().unwrap().len(), 1);
    }

    #[test]
    fn test_legacy_record_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(
            &path,
            r#"[
              {
                "method": "backtracking",
                "result": [{"name": "A", "deadline": 1, "priority": 5, "difficulty": 2}],
                "score": 5,
                "time": "09/03/2024, 14:05:07",
                "nama_mahasiswa": "Budi"
              }
            ]"#,
        )
        .unwrap();

        let records = JsonFileHistory::new(&path).records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].student_name, "Budi");
        assert_eq!(records[0].method, ScheduleMethod::Backtracking);
        assert_eq!(
            records[0].time,
            Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
        );
        assert_eq!(records[0].display_time(), "09/03/2024, 14:05:07");
    }

    #[test]
    fn test_bad_time_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(
            &path,
            r#"[{"method":"greedy","result":[],"score":0,"time":"yesterday","student_name":"-"}]"#,
        )
        .unwrap();

        assert!(matches!(
            JsonFileHistory::new(&path).records().unwrap_err(),
            HistoryError::Malformed { .. }
        ));
    }

    #[test]
    fn test_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileHistory::new(&path);
        assert!(matches!(
            store.records().unwrap_err(),
            HistoryError::Malformed { .. }
        ));
    }
}
