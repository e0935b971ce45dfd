use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Completion state of an action item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl Status {
    /// Wire and display form
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
        }
    }

    /// The opposite state, used by toggle
    pub fn flipped(self) -> Status {
        match self {
            Status::Pending => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }

    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(self) -> char {
        match self {
            Status::Pending => ' ',
            Status::Completed => 'x',
        }
    }
}

/// Action item priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Sort rank: high=3, medium=2, low=1
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Next priority in the high → medium → low → high cycle
    pub fn cycled(self) -> Priority {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }
}

/// A single action item as held by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    /// Store-assigned identifier
    pub id: String,
    /// Task description
    pub text: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    /// ISO-8601 creation timestamp, set once by the store
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ActionItem {
    /// Parsed creation time, if the store sent a readable timestamp
    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}

/// Parse an ISO-8601 timestamp. Accepts RFC 3339 with an offset, or a naive
/// date-time which is taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_item() {
        let json = r#"{
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "text": "Prepare Q4 report",
            "status": "completed",
            "priority": "high",
            "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-16T08:00:00Z"
        }"#;
        let item: ActionItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.status, Status::Completed);
        assert!(item.is_completed());
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.updated_at.as_deref(), Some("2024-01-16T08:00:00Z"));
    }

    #[test]
    fn test_deserialize_defaults() {
        // Early API shape: no priority, no updatedAt
        let json = r#"{"id":"a","text":"Write docs","createdAt":"2024-01-15T10:30:00"}"#;
        let item: ActionItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.status, Status::Pending);
        assert_eq!(item.priority, Priority::Medium);
        assert_eq!(item.updated_at, None);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = r#"{"id":"a","text":"x","status":"archived","createdAt":"2024-01-15T10:30:00Z"}"#;
        assert!(serde_json::from_str::<ActionItem>(json).is_err());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let item = ActionItem {
            id: "a".into(),
            text: "Fix bug".into(),
            status: Status::Pending,
            priority: Priority::Low,
            created_at: "2024-01-15T10:30:00Z".into(),
            updated_at: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["createdAt"], "2024-01-15T10:30:00Z");
        assert_eq!(value["priority"], "low");
        assert!(value.get("updatedAt").is_none());
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let with_offset = parse_timestamp("2024-01-15T10:30:00+02:00").unwrap();
        let naive = parse_timestamp("2024-01-15T08:30:00.123456").unwrap();
        assert_eq!(with_offset.timestamp(), naive.timestamp());
        assert!(parse_timestamp("2024-01-15 08:30:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_status_flip_and_priority_cycle() {
        assert_eq!(Status::Pending.flipped(), Status::Completed);
        assert_eq!(Status::Completed.flipped(), Status::Pending);
        assert_eq!(Priority::Low.cycled(), Priority::High);
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }
}
