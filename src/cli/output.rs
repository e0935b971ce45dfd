use serde::Serialize;

use crate::io::remote::HealthStatus;
use crate::model::item::{ActionItem, Priority};
use crate::model::query::{FilterOptions, SortOptions};
use crate::ops::stats::{Progress, PriorityCounts};

/// Characters of an id shown in human-readable listings
pub const SHORT_ID_LEN: usize = 8;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub total: usize,
    pub shown: usize,
    pub filter: &'a FilterOptions,
    pub sort: SortOptions,
    pub items: Vec<&'a ActionItem>,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub progress: Progress,
    pub priorities: PriorityCounts,
}

#[derive(Serialize)]
pub struct AnalyzeJson {
    pub created: usize,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "!!!",
        Priority::Medium => "!! ",
        Priority::Low => "!  ",
    }
}

/// Format a single item as a one-line summary
pub fn format_item_line(item: &ActionItem) -> String {
    format!(
        "[{}] {} {} {}",
        item.status.checkbox_char(),
        short_id(&item.id),
        priority_marker(item.priority),
        item.text
    )
}

/// Format detailed item view
pub fn format_item_detail(item: &ActionItem) -> Vec<String> {
    let mut lines = vec![
        format!("[{}] {}", item.status.checkbox_char(), item.text),
        format!("id: {}", item.id),
        format!("status: {}", item.status.as_str()),
        format!("priority: {}", item.priority.as_str()),
        format!("created: {}", item.created_at),
    ];
    if let Some(updated) = &item.updated_at {
        lines.push(format!("updated: {}", updated));
    }
    lines
}

/// "Showing N of M action items", with the active filters spelled out
pub fn format_list_summary(shown: usize, total: usize, filter: &FilterOptions) -> String {
    let mut summary = format!("Showing {} of {} action items", shown, total);
    if filter.is_active() {
        let mut parts = Vec::new();
        if let Some(status) = filter.status {
            parts.push(format!("status: {}", status.as_str()));
        }
        if let Some(priority) = filter.priority {
            parts.push(format!("priority: {}", priority.as_str()));
        }
        if let Some(search) = filter.search_term() {
            parts.push(format!("search: \"{}\"", search));
        }
        summary.push_str(&format!(" (filtered: {})", parts.join(", ")));
    }
    summary
}

/// Text rendering of the progress and priority charts
pub fn format_stats(progress: &Progress, priorities: &PriorityCounts) -> Vec<String> {
    let mut lines = Vec::new();
    if progress.total == 0 {
        lines.push("Progress: 0% (no tasks yet)".to_string());
    } else {
        lines.push(format!(
            "Progress: {}% ({} of {} tasks completed)",
            progress.percent, progress.completed, progress.total
        ));
        lines.push(format!(
            "  {}  completed {}  pending {}",
            bar(progress.percent as usize, 100, 20),
            progress.completed,
            progress.pending
        ));
    }
    lines.push(String::new());
    lines.push("Priority distribution:".to_string());
    let max = priorities.max();
    for priority in Priority::ALL {
        let count = priorities.get(priority);
        lines.push(format!(
            "  {:<6} {} {}",
            priority.as_str(),
            bar(count, max, 20),
            count
        ));
    }
    lines
}

/// A fixed-width bar of `█` filled in proportion to value/max
fn bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 { 0 } else { (value * width + max / 2) / max };
    let filled = filled.min(width);
    format!(
        "{}{}",
        "\u{2588}".repeat(filled),
        "\u{00B7}".repeat(width - filled)
    )
}

pub fn format_health(health: &HealthStatus) -> Vec<String> {
    let mut lines = vec![format!("status: {}", health.status)];
    if let Some(service) = &health.service {
        lines.push(format!("service: {}", service));
    }
    if let Some(openai) = &health.openai_status {
        lines.push(format!("openai: {}", openai));
    }
    if let Some(env) = &health.environment {
        lines.push(format!("environment: {}", env));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memory_store::sample_items;
    use crate::model::item::Status;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("123e4567-e89b-12d3"), "123e4567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_item_line() {
        let items = sample_items();
        assert_eq!(format_item_line(&items[0]), "[ ] 1 !!! Fix bug");
        assert_eq!(format_item_line(&items[1]), "[x] 2 !   Write docs");
    }

    #[test]
    fn test_summary_lists_filters() {
        let filter = FilterOptions {
            status: Some(Status::Pending),
            search: Some("bug".into()),
            ..Default::default()
        };
        assert_eq!(
            format_list_summary(1, 2, &filter),
            "Showing 1 of 2 action items (filtered: status: pending, search: \"bug\")"
        );
        assert_eq!(
            format_list_summary(2, 2, &FilterOptions::default()),
            "Showing 2 of 2 action items"
        );
    }

    #[test]
    fn test_bar_proportions() {
        assert_eq!(bar(0, 0, 4), "\u{00B7}".repeat(4));
        assert_eq!(bar(2, 2, 4), "\u{2588}".repeat(4));
        assert_eq!(bar(1, 2, 4), format!("{}{}", "\u{2588}".repeat(2), "\u{00B7}".repeat(2)));
    }

    #[test]
    fn test_stats_empty() {
        let lines = format_stats(&Progress::default(), &PriorityCounts::default());
        assert_eq!(lines[0], "Progress: 0% (no tasks yet)");
    }
}
