use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type TaskId = i64;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub date: String,
    // Remaining backend fields, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayEntry {
    pub time: String,
    pub title: String,
    pub task: Task,
}

impl From<Task> for DayEntry {
    fn from(task: Task) -> Self {
        Self {
            time: task.start_time.clone(),
            title: task.title.clone(),
            task,
        }
    }
}

pub type TasksByDate = BTreeMap<String, Vec<DayEntry>>;

pub fn group_by_date(tasks: Vec<Task>) -> TasksByDate {
    let mut grouped: TasksByDate = BTreeMap::new();
    for task in tasks {
        grouped
            .entry(task.date.clone())
            .or_default()
            .push(DayEntry::from(task));
    }
    grouped
}

pub fn format_time(raw: &str) -> String {
    let trimmed = raw.trim();
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
