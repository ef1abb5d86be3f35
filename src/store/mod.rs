//! Task store - JSON file persistence with timestamped backups

pub mod error;

pub use error::{Result, StoreError};

use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::task::{Priority, Task};

const BACKUP_DIR_NAME: &str = "backups";

/// What happened when the store read its file at open time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// File read normally, or did not exist yet.
    Clean,
    /// Main file was unparsable; state was restored from this backup.
    Recovered { backup: PathBuf },
    /// Main file was unparsable and no backup parsed; starting empty.
    Corrupt { detail: String },
}

/// Field changes for [`Store::update`]. `None` leaves a field untouched;
/// the nested `Option`s distinguish "clear the field" from "keep it".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<chrono::NaiveDate>>,
    pub category: Option<String>,
    pub description: Option<Option<String>>,
    pub color: Option<Option<String>>,
}

pub struct Store {
    data_path: PathBuf,
    backup_dir: PathBuf,
    report: LoadReport,
    tasks: Vec<Task>,
}

impl Store {
    /// Open the store backed by the given JSON file, recovering from the
    /// most recent backup if the file is unparsable.
    pub fn open(data_path: impl Into<PathBuf>) -> Result<Self> {
        let data_path = data_path.into();
        let backup_dir = data_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(BACKUP_DIR_NAME);

        let (tasks, report) = read_tasks(&data_path, &backup_dir)?;

        Ok(Self {
            data_path,
            backup_dir,
            report,
            tasks,
        })
    }

    /// Default data file location: `~/.taskdeck/tasks.json`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".taskdeck").join("tasks.json"))
            .unwrap_or_else(|| PathBuf::from("tasks.json"))
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a task and persist. Rejects blank titles and titles already
    /// present (case-insensitive); the title is stored trimmed.
    pub fn add(&mut self, mut task: Task) -> Result<()> {
        task.title = self.validate_title(&task.title, None)?;
        self.tasks.push(task);
        self.save()
    }

    /// Apply a patch to the task at `index` and persist. A title change
    /// re-runs the blank/duplicate validation, excluding the task itself.
    pub fn update(&mut self, index: usize, patch: TaskPatch) -> Result<&Task> {
        self.check_index(index)?;

        // Validate before mutating so a rejected patch changes nothing.
        let new_title = match &patch.title {
            Some(title) => Some(self.validate_title(title, Some(index))?),
            None => None,
        };

        let task = &mut self.tasks[index];
        if let Some(title) = new_title {
            task.title = title;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(category) = patch.category {
            task.category = category;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(color) = patch.color {
            task.color = color;
        }

        self.save()?;
        Ok(&self.tasks[index])
    }

    /// Remove the task at `index`, persist, and return it.
    pub fn delete(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Flip the completed flag of the task at `index` and persist.
    /// Returns the new value.
    pub fn toggle_complete(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        self.tasks[index].completed = !self.tasks[index].completed;
        self.save()?;
        Ok(self.tasks[index].completed)
    }

    /// Write the collection to the data file, copying the previous file
    /// into the backup directory first. A failed backup is a warning, not
    /// a save failure.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.data_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if self.data_path.exists() {
            match self.back_up() {
                Ok(path) => debug!("Backed up tasks to {}", path.display()),
                Err(e) => warn!("Failed to create backup: {}", e),
            }
        }

        let content = serde_json::to_string_pretty(&self.tasks)?;
        fs::write(&self.data_path, content)?;
        Ok(())
    }

    fn back_up(&self) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.backup_dir)?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let mut dest = self.backup_dir.join(format!("tasks-{}.json", stamp));

        // Several saves can land within one second; suffix instead of
        // overwriting so every backup is retained. `_` sorts after `.`,
        // keeping suffixed names newer than the base name.
        let mut seq = 1;
        while dest.exists() {
            dest = self.backup_dir.join(format!("tasks-{}_{}.json", stamp, seq));
            seq += 1;
        }

        fs::copy(&self.data_path, &dest)?;
        Ok(dest)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.tasks.len() {
            return Err(StoreError::IndexOutOfRange {
                number: index + 1,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }

    fn validate_title(&self, title: &str, skip: Option<usize>) -> Result<String> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let lower = trimmed.to_lowercase();
        let duplicate = self
            .tasks
            .iter()
            .enumerate()
            .any(|(i, t)| Some(i) != skip && t.title.to_lowercase() == lower);
        if duplicate {
            return Err(StoreError::DuplicateTitle(trimmed.to_string()));
        }

        Ok(trimmed.to_string())
    }
}

fn read_tasks(data_path: &Path, backup_dir: &Path) -> Result<(Vec<Task>, LoadReport)> {
    if !data_path.exists() {
        return Ok((Vec::new(), LoadReport::Clean));
    }

    let content = fs::read_to_string(data_path)?;
    if content.trim().is_empty() {
        return Ok((Vec::new(), LoadReport::Clean));
    }

    match serde_json::from_str(&content) {
        Ok(tasks) => Ok((tasks, LoadReport::Clean)),
        Err(e) => {
            warn!("Task file {} is unparsable: {}", data_path.display(), e);
            Ok(recover_from_backups(backup_dir, &e.to_string()))
        }
    }
}

/// Try backups newest-first until one parses.
fn recover_from_backups(backup_dir: &Path, detail: &str) -> (Vec<Task>, LoadReport) {
    let mut backups: Vec<PathBuf> = match fs::read_dir(backup_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
            .collect(),
        Err(_) => Vec::new(),
    };

    // Backup names embed a sortable timestamp, so lexicographic order is
    // chronological order.
    backups.sort();

    for backup in backups.iter().rev() {
        let Ok(content) = fs::read_to_string(backup) else {
            continue;
        };
        if let Ok(tasks) = serde_json::from_str::<Vec<Task>>(&content) {
            warn!("Recovered tasks from backup {}", backup.display());
            return (
                tasks,
                LoadReport::Recovered {
                    backup: backup.clone(),
                },
            );
        }
    }

    (
        Vec::new(),
        LoadReport::Corrupt {
            detail: detail.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> Store {
        Store::open(dir.join("tasks.json")).unwrap()
    }

    #[test]
    fn test_open_nonexistent_file() -> Result<()> {
        let temp = tempdir()?;
        let store = store_in(temp.path());
        assert!(store.is_empty());
        assert_eq!(store.load_report(), &LoadReport::Clean);
        Ok(())
    }

    #[test]
    fn test_open_whitespace_only_file() -> Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("tasks.json"), "   \n  \t  ")?;
        let store = store_in(temp.path());
        assert!(store.is_empty());
        assert_eq!(store.load_report(), &LoadReport::Clean);
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());

        let mut task = Task::new("Write tests");
        task.priority = Priority::High;
        task.due_date = chrono::NaiveDate::from_ymd_opt(2026, 9, 1);
        task.description = Some("unit and integration".to_string());
        store.add(task)?;
        store.add(Task::new("Ship release"))?;

        let reloaded = store_in(temp.path());
        assert_eq!(reloaded.tasks(), store.tasks());
        Ok(())
    }

    #[test]
    fn test_add_rejects_empty_title() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        let result = store.add(Task::new("   "));
        assert!(matches!(result, Err(StoreError::EmptyTitle)));
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn test_add_rejects_duplicate_title_case_insensitive() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("Buy milk"))?;

        let result = store.add(Task::new("buy MILK"));
        assert!(matches!(result, Err(StoreError::DuplicateTitle(_))));
        assert_eq!(store.len(), 1);
        Ok(())
    }

    #[test]
    fn test_add_trims_title() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("  Buy milk  "))?;
        assert_eq!(store.tasks()[0].title, "Buy milk");
        Ok(())
    }

    #[test]
    fn test_update_out_of_range() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("Only task"))?;

        let result = store.update(1, TaskPatch::default());
        assert!(matches!(
            result,
            Err(StoreError::IndexOutOfRange { number: 2, len: 1 })
        ));
        Ok(())
    }

    #[test]
    fn test_update_fields() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("Draft"))?;

        let patch = TaskPatch {
            title: Some("Draft proposal".to_string()),
            priority: Some(Priority::High),
            category: Some("work".to_string()),
            due_date: Some(chrono::NaiveDate::from_ymd_opt(2026, 10, 1)),
            ..TaskPatch::default()
        };
        store.update(0, patch)?;

        let task = &store.tasks()[0];
        assert_eq!(task.title, "Draft proposal");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category, "work");
        assert!(task.due_date.is_some());
        Ok(())
    }

    #[test]
    fn test_update_clears_optional_field() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        let mut task = Task::new("Call dentist");
        task.due_date = chrono::NaiveDate::from_ymd_opt(2026, 5, 5);
        store.add(task)?;

        let patch = TaskPatch {
            due_date: Some(None),
            ..TaskPatch::default()
        };
        store.update(0, patch)?;
        assert!(store.tasks()[0].due_date.is_none());
        Ok(())
    }

    #[test]
    fn test_update_rejects_duplicate_but_allows_own_title() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("First"))?;
        store.add(Task::new("Second"))?;

        let dup = TaskPatch {
            title: Some("FIRST".to_string()),
            ..TaskPatch::default()
        };
        assert!(matches!(
            store.update(1, dup),
            Err(StoreError::DuplicateTitle(_))
        ));
        assert_eq!(store.tasks()[1].title, "Second");

        // Re-casing a task's own title is not a duplicate.
        let recase = TaskPatch {
            title: Some("second".to_string()),
            ..TaskPatch::default()
        };
        store.update(1, recase)?;
        assert_eq!(store.tasks()[1].title, "second");
        Ok(())
    }

    #[test]
    fn test_delete() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("Keep"))?;
        store.add(Task::new("Drop"))?;

        let removed = store.delete(1)?;
        assert_eq!(removed.title, "Drop");
        assert_eq!(store.len(), 1);

        assert!(matches!(
            store.delete(5),
            Err(StoreError::IndexOutOfRange { .. })
        ));
        assert_eq!(store.len(), 1);
        Ok(())
    }

    #[test]
    fn test_toggle_complete_is_involutive() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("Flip me"))?;

        assert!(store.toggle_complete(0)?);
        assert!(!store.toggle_complete(0)?);
        assert!(!store.tasks()[0].completed);
        Ok(())
    }

    #[test]
    fn test_save_creates_timestamped_backup() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("First"))?;
        store.add(Task::new("Second"))?;

        let backup_dir = temp.path().join(BACKUP_DIR_NAME);
        let backups: Vec<_> = fs::read_dir(&backup_dir)?.collect();
        assert_eq!(backups.len(), 1);

        // The backup holds the state before the second save.
        let content = fs::read_to_string(backups[0].as_ref().unwrap().path())?;
        assert!(content.contains("First"));
        assert!(!content.contains("Second"));
        Ok(())
    }

    #[test]
    fn test_backup_failure_does_not_fail_save() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("One"))?;

        // A plain file where the backup directory belongs makes back_up
        // fail; the save must still go through.
        fs::write(temp.path().join(BACKUP_DIR_NAME), "in the way")?;
        store.add(Task::new("Two"))?;

        let reloaded = store_in(temp.path());
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.tasks()[1].title, "Two");
        Ok(())
    }

    #[test]
    fn test_backups_within_same_second_are_all_retained() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("One"))?;
        store.add(Task::new("Two"))?;
        store.add(Task::new("Three"))?;

        // The first save had nothing to back up; the next two saves each
        // produced a backup even when their timestamps collide.
        let backup_dir = temp.path().join(BACKUP_DIR_NAME);
        assert_eq!(fs::read_dir(&backup_dir)?.count(), 2);

        // Recovery still picks the newest one.
        fs::write(temp.path().join("tasks.json"), "garbage")?;
        let recovered = store_in(temp.path());
        assert!(matches!(
            recovered.load_report(),
            LoadReport::Recovered { .. }
        ));
        assert_eq!(recovered.len(), 2);
        assert_eq!(recovered.tasks()[1].title, "Two");
        Ok(())
    }

    #[test]
    fn test_corrupt_file_recovers_from_backup() -> Result<()> {
        let temp = tempdir()?;
        let mut store = store_in(temp.path());
        store.add(Task::new("Survivor"))?;
        store.add(Task::new("Also here"))?;

        fs::write(temp.path().join("tasks.json"), "{ not json ]")?;

        let recovered = store_in(temp.path());
        assert!(matches!(
            recovered.load_report(),
            LoadReport::Recovered { .. }
        ));
        // The newest backup predates the second add, so only one task survives.
        assert_eq!(recovered.len(), 1);
        assert_eq!(recovered.tasks()[0].title, "Survivor");
        Ok(())
    }

    #[test]
    fn test_corrupt_file_without_backups_starts_empty() -> Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("tasks.json"), "{ not json ]")?;

        let store = store_in(temp.path());
        assert!(store.is_empty());
        assert!(matches!(store.load_report(), LoadReport::Corrupt { .. }));
        Ok(())
    }

    #[test]
    fn test_recovery_skips_unparsable_backups() -> Result<()> {
        let temp = tempdir()?;
        let backup_dir = temp.path().join(BACKUP_DIR_NAME);
        fs::create_dir_all(&backup_dir)?;

        fs::write(temp.path().join("tasks.json"), "garbage")?;
        fs::write(
            backup_dir.join("tasks-20260102-000000.json"),
            "also garbage",
        )?;
        fs::write(
            backup_dir.join("tasks-20260101-000000.json"),
            r#"[{"title": "From old backup"}]"#,
        )?;

        let store = store_in(temp.path());
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].title, "From old backup");
        match store.load_report() {
            LoadReport::Recovered { backup } => {
                assert!(backup.to_string_lossy().contains("20260101"));
            }
            other => panic!("expected recovery, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_save_empty_collection() -> Result<()> {
        let temp = tempdir()?;
        let store = store_in(temp.path());
        store.save()?;

        let content = fs::read_to_string(temp.path().join("tasks.json"))?;
        assert_eq!(content.trim(), "[]");
        Ok(())
    }
}
