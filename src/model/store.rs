use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use super::date;
use super::task::{Task, TaskColor};

/// Errors a store mutation can surface to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Bad user input. Blocks the mutation, never fatal.
    #[error("{0}")]
    Validation(String),
    #[error("no task with id {0}")]
    NotFound(u64),
}

/// Editable fields of a task. `id` and `completed` are deliberately
/// absent: edits preserve both.
#[derive(Debug, Clone)]
pub struct TaskEdit {
    pub name: String,
    pub start: String,
    pub end: String,
    pub color: TaskColor,
}

/// Outcome of a bulk replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceReport {
    pub accepted: usize,
    pub dropped: usize,
}

/// The single in-memory task collection.
///
/// Storage order is not meaningful; [`TaskStore::sorted`] produces the
/// ascending-start-date view every render works from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in ascending start-date order; unparsable dates sort last.
    /// The sort is stable, so ties keep their insertion order.
    pub fn sorted(&self) -> Vec<&Task> {
        let mut view: Vec<&Task> = self.tasks.iter().collect();
        view.sort_by(|a, b| match (a.start_date(), b.start_date()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        view
    }

    /// Add a task. Validates all fields and assigns the next free id.
    pub fn add(
        &mut self,
        name: &str,
        start: &str,
        end: &str,
        color: TaskColor,
    ) -> Result<u64, StoreError> {
        validate_fields(name, start, end)?;
        let id = self.next_id();
        self.tasks.push(Task {
            id,
            name: name.trim().to_string(),
            start: start.trim().to_string(),
            end: end.trim().to_string(),
            color,
            completed: false,
            dependencies: Vec::new(),
        });
        Ok(id)
    }

    /// Update name, dates and color of an existing task. Runs the same
    /// validation as [`TaskStore::add`]; `id`, `completed` and
    /// `dependencies` are preserved.
    pub fn update(&mut self, id: u64, edit: TaskEdit) -> Result<(), StoreError> {
        validate_fields(&edit.name, &edit.start, &edit.end)?;
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.name = edit.name.trim().to_string();
        task.start = edit.start.trim().to_string();
        task.end = edit.end.trim().to_string();
        task.color = edit.color;
        Ok(())
    }

    /// Toggle completion. Scheduling fields are not re-validated.
    pub fn set_completed(&mut self, id: u64, completed: bool) -> Result<(), StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.completed = completed;
        Ok(())
    }

    /// Remove a task, returning it for status reporting.
    pub fn remove(&mut self, id: u64) -> Result<Task, StoreError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.tasks.remove(pos))
    }

    /// Wholesale replacement, used after plan generation.
    ///
    /// Each incoming record must carry parseable dates and a not-yet-seen
    /// id; records failing either check are dropped with a warning instead
    /// of failing the whole batch.
    pub fn replace_all(&mut self, incoming: Vec<Task>) -> ReplaceReport {
        let mut accepted: Vec<Task> = Vec::with_capacity(incoming.len());
        let mut dropped = 0usize;

        for task in incoming {
            if task.start_date().is_none() || task.end_date().is_none() {
                warn!(
                    id = task.id,
                    name = %task.name,
                    start = %task.start,
                    end = %task.end,
                    "dropping generated task with unparsable date"
                );
                dropped += 1;
                continue;
            }
            if accepted.iter().any(|t| t.id == task.id) {
                warn!(id = task.id, name = %task.name, "dropping generated task with duplicate id");
                dropped += 1;
                continue;
            }
            accepted.push(task);
        }

        let report = ReplaceReport {
            accepted: accepted.len(),
            dropped,
        };
        self.tasks = accepted;
        report
    }

    fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }
}

fn validate_fields(name: &str, start: &str, end: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation(
            "Task name must not be empty".to_string(),
        ));
    }
    let start = parse_field(start, "start")?;
    let end = parse_field(end, "end")?;
    if start > end {
        return Err(StoreError::Validation(
            "End date must not be before the start date".to_string(),
        ));
    }
    Ok(())
}

fn parse_field(value: &str, which: &str) -> Result<NaiveDate, StoreError> {
    date::parse_iso(value).ok_or_else(|| {
        StoreError::Validation(format!(
            "'{}' is not a valid {} date (expected YYYY-MM-DD)",
            value.trim(),
            which
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(tasks: &[(&str, &str, &str)]) -> TaskStore {
        let mut store = TaskStore::new();
        for (name, start, end) in tasks {
            store.add(name, start, end, TaskColor::Blue).unwrap();
        }
        store
    }

    #[test]
    fn add_assigns_monotonic_ids() {
        let store = store_with(&[
            ("A", "2024-07-01", "2024-07-01"),
            ("B", "2024-07-02", "2024-07-10"),
        ]);
        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn id_is_max_plus_one_after_removal() {
        let mut store = store_with(&[
            ("A", "2024-07-01", "2024-07-01"),
            ("B", "2024-07-02", "2024-07-10"),
        ]);
        store.remove(1).unwrap();
        let id = store.add("C", "2024-07-03", "2024-07-04", TaskColor::Red).unwrap();
        assert_eq!(id, 3);
    }

    #[test]
    fn end_before_start_is_rejected_without_mutation() {
        let mut store = TaskStore::new();
        let err = store
            .add("Backwards", "2024-07-10", "2024-07-01", TaskColor::Blue)
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn empty_name_and_bad_dates_are_rejected() {
        let mut store = TaskStore::new();
        assert!(matches!(
            store.add("  ", "2024-07-01", "2024-07-02", TaskColor::Blue),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.add("A", "first of july", "2024-07-02", TaskColor::Blue),
            Err(StoreError::Validation(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn update_preserves_id_and_completed() {
        let mut store = store_with(&[("A", "2024-07-01", "2024-07-05")]);
        store.set_completed(1, true).unwrap();
        store
            .update(
                1,
                TaskEdit {
                    name: "A2".to_string(),
                    start: "2024-07-02".to_string(),
                    end: "2024-07-06".to_string(),
                    color: TaskColor::Red,
                },
            )
            .unwrap();
        let task = store.get(1).unwrap();
        assert_eq!(task.id, 1);
        assert!(task.completed);
        assert_eq!(task.name, "A2");
        assert_eq!(task.color, TaskColor::Red);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut store = TaskStore::new();
        let err = store
            .update(
                9,
                TaskEdit {
                    name: "X".to_string(),
                    start: "2024-07-01".to_string(),
                    end: "2024-07-02".to_string(),
                    color: TaskColor::Blue,
                },
            )
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound(9));
    }

    #[test]
    fn set_completed_skips_date_validation() {
        let mut store = store_with(&[("A", "2024-07-01", "2024-07-05")]);
        // Corrupt the dates behind the store's back, as a hand-edited save
        // file could.
        let mut tasks = store.tasks().to_vec();
        tasks[0].start = "garbage".to_string();
        let mut store = TaskStore::from_tasks(tasks);
        assert!(store.set_completed(1, true).is_ok());
        assert!(store.get(1).unwrap().completed);
    }

    #[test]
    fn remove_missing_id_is_not_found() {
        let mut store = store_with(&[("A", "2024-07-01", "2024-07-05")]);
        assert_eq!(store.remove(2).unwrap_err(), StoreError::NotFound(2));
        assert!(store.remove(1).is_ok());
        assert!(store.is_empty());
    }

    #[test]
    fn sorted_is_ascending_by_start_with_bad_dates_last() {
        let tasks = vec![
            Task {
                id: 1,
                name: "late".to_string(),
                start: "2024-07-20".to_string(),
                end: "2024-07-21".to_string(),
                color: TaskColor::Blue,
                completed: false,
                dependencies: Vec::new(),
            },
            Task {
                id: 2,
                name: "broken".to_string(),
                start: "???".to_string(),
                end: "2024-07-05".to_string(),
                color: TaskColor::Blue,
                completed: false,
                dependencies: Vec::new(),
            },
            Task {
                id: 3,
                name: "early".to_string(),
                start: "2024-07-01".to_string(),
                end: "2024-07-02".to_string(),
                color: TaskColor::Blue,
                completed: false,
                dependencies: Vec::new(),
            },
        ];
        let store = TaskStore::from_tasks(tasks);
        let order: Vec<u64> = store.sorted().iter().map(|t| t.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn replace_all_drops_unparsable_and_duplicate_records() {
        let mut store = store_with(&[("old", "2024-01-01", "2024-01-02")]);
        let incoming = vec![
            Task {
                id: 1,
                name: "ok".to_string(),
                start: "2024-07-01".to_string(),
                end: "2024-07-02".to_string(),
                color: TaskColor::Green,
                completed: false,
                dependencies: Vec::new(),
            },
            Task {
                id: 2,
                name: "bad date".to_string(),
                start: "next week".to_string(),
                end: "2024-07-09".to_string(),
                color: TaskColor::Blue,
                completed: false,
                dependencies: Vec::new(),
            },
            Task {
                id: 1,
                name: "dup id".to_string(),
                start: "2024-07-03".to_string(),
                end: "2024-07-04".to_string(),
                color: TaskColor::Red,
                completed: false,
                dependencies: Vec::new(),
            },
        ];
        let report = store.replace_all(incoming);
        assert_eq!(report, ReplaceReport { accepted: 1, dropped: 2 });
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].name, "ok");
    }
}
