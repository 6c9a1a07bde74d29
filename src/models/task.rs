use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// Stored task record. `duration_minutes` is derived from start/end at every
// write, so a record at rest is always self-consistent.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Task {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_minutes: i64,
}

// Outward JSON shape for the task endpoints. `owner_id` stays server-side;
// the derived field goes out under the short name `duration`.
#[derive(Debug, Serialize)]
pub struct TaskRepr {
    pub id: i64,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration: i64,
}

impl From<&Task> for TaskRepr {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            start_time: task.start_time,
            end_time: task.end_time,
            duration: task.duration_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: 7,
            owner_id: 3,
            title: "Write report".to_string(),
            start_time: "2024-01-01T09:00:00".parse().unwrap(),
            end_time: "2024-01-01T10:30:00".parse().unwrap(),
            duration_minutes: 90,
        }
    }

    #[test]
    fn test_task_repr_shape() {
        let repr = TaskRepr::from(&sample_task());
        let json = serde_json::to_value(&repr).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Write report");
        assert_eq!(json["start_time"], "2024-01-01T09:00:00");
        assert_eq!(json["end_time"], "2024-01-01T10:30:00");
        assert_eq!(json["duration"], 90);
        // The owner id never leaves the server
        assert!(json.get("owner_id").is_none());
    }

    #[test]
    fn test_task_storage_round_trip() {
        let task = sample_task();
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, task.id);
        assert_eq!(back.owner_id, task.owner_id);
        assert_eq!(back.start_time, task.start_time);
        assert_eq!(back.duration_minutes, 90);
    }
}
