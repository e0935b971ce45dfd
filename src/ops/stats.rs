use serde::Serialize;

use crate::model::item::{ActionItem, Priority};

/// Completion progress over a list of items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed share in whole percent, rounded half up; 0 when empty
    pub percent: u8,
}

/// Item counts per priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    pub fn max(&self) -> usize {
        self.high.max(self.medium).max(self.low)
    }
}

pub fn progress(items: &[ActionItem]) -> Progress {
    let total = items.len();
    let completed = items.iter().filter(|i| i.is_completed()).count();
    let percent = if total == 0 {
        0
    } else {
        // Integer form of round(completed / total * 100)
        ((completed * 200 + total) / (total * 2)) as u8
    };
    Progress {
        total,
        completed,
        pending: total - completed,
        percent,
    }
}

pub fn priority_counts(items: &[ActionItem]) -> PriorityCounts {
    let mut counts = PriorityCounts::default();
    for item in items {
        match item.priority {
            Priority::High => counts.high += 1,
            Priority::Medium => counts.medium += 1,
            Priority::Low => counts.low += 1,
        }
    }
    counts
}
