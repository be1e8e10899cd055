use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date;

/// Display color of a task bar.
///
/// The wire format (save file, generated plans) carries lowercase color
/// names; anything unrecognized falls back to [`TaskColor::Gray`] instead
/// of rejecting the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskColor {
    Blue,
    Green,
    Yellow,
    Red,
    #[default]
    Gray,
}

impl TaskColor {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskColor::Blue => "blue",
            TaskColor::Green => "green",
            TaskColor::Yellow => "yellow",
            TaskColor::Red => "red",
            TaskColor::Gray => "gray",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "blue" => TaskColor::Blue,
            "green" => TaskColor::Green,
            "yellow" => TaskColor::Yellow,
            "red" => TaskColor::Red,
            _ => TaskColor::Gray,
        }
    }

    /// The colors a user can pick in the task dialog.
    pub const PICKABLE: [TaskColor; 4] = [
        TaskColor::Blue,
        TaskColor::Green,
        TaskColor::Yellow,
        TaskColor::Red,
    ];
}

impl Serialize for TaskColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(TaskColor::from_name(&name))
    }
}

/// A single task in the plan.
///
/// `start` and `end` are kept as raw ISO `YYYY-MM-DD` strings: an
/// unparsable date in a loaded or generated record must not take down the
/// whole plan, so parsing happens at the point of use and a failure
/// degrades to "no bar for this row".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    /// ISO `YYYY-MM-DD`.
    pub start: String,
    /// ISO `YYYY-MM-DD`, expected `start <= end`.
    pub end: String,
    #[serde(default)]
    pub color: TaskColor,
    #[serde(default)]
    pub completed: bool,
    /// Ids this task depends on. Accepted from generated plans and
    /// round-tripped through the save file, but never interpreted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<u64>,
}

impl Task {
    pub fn new(id: u64, name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            start: date::format_iso(start),
            end: date::format_iso(end),
            color: TaskColor::Gray,
            completed: false,
            dependencies: Vec::new(),
        }
    }

    /// Parsed start date, `None` if the stored string is not valid ISO.
    pub fn start_date(&self) -> Option<NaiveDate> {
        date::parse_iso(&self.start)
    }

    /// Parsed end date, `None` if the stored string is not valid ISO.
    pub fn end_date(&self) -> Option<NaiveDate> {
        date::parse_iso(&self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_color_falls_back_to_gray() {
        let task: Task = serde_json::from_str(
            r#"{"id":1,"name":"A","start":"2024-07-01","end":"2024-07-02","color":"magenta"}"#,
        )
        .unwrap();
        assert_eq!(task.color, TaskColor::Gray);
        assert!(!task.completed);
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn generated_record_round_trips() {
        let task: Task = serde_json::from_str(
            r#"{"id":2,"name":"B","start":"2024-07-02","end":"2024-07-10",
                "color":"green","completed":true,"dependencies":[1]}"#,
        )
        .unwrap();
        assert_eq!(task.color, TaskColor::Green);
        assert_eq!(task.dependencies, vec![1]);

        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn bad_dates_parse_to_none() {
        let mut task = Task::new(
            1,
            "A",
            chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(),
        );
        assert!(task.start_date().is_some());
        task.start = "not-a-date".to_string();
        assert!(task.start_date().is_none());
        assert!(task.end_date().is_some());
    }
}
