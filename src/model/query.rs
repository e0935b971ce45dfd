use serde::{Deserialize, Serialize};

use super::item::{Priority, Status};

/// Filter criteria for the derived view. `None` means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    /// Case-insensitive substring of the item text
    pub search: Option<String>,
}

impl FilterOptions {
    /// The search needle, if one is set and non-empty
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || self.search_term().is_some()
    }

    pub fn clear(&mut self) {
        *self = FilterOptions::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    CreatedAt,
    Priority,
    Status,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            SortField::CreatedAt => "date",
            SortField::Priority => "priority",
            SortField::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "\u{2191}",
            SortDirection::Desc => "\u{2193}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortOptions {
    /// Newest first, the order the store lists items in
    fn default() -> Self {
        SortOptions {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortOptions {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        SortOptions { field, direction }
    }

    /// Short form for status lines, e.g. `date↓`
    pub fn label(self) -> String {
        format!("{}{}", self.field.label(), self.direction.arrow())
    }

    /// Select a sort field the way the sort buttons do: re-selecting the
    /// current field while ascending flips to descending, anything else
    /// selects the field ascending.
    pub fn select(self, field: SortField) -> SortOptions {
        let direction = if self.field == field && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortOptions { field, direction }
    }
}
