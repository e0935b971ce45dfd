use std::cmp::Ordering;

use crate::model::item::ActionItem;
use crate::model::query::{FilterOptions, SortDirection, SortField, SortOptions};

/// Whether an item satisfies every present filter predicate
pub fn matches_filter(item: &ActionItem, filter: &FilterOptions) -> bool {
    if let Some(status) = filter.status
        && item.status != status
    {
        return false;
    }
    if let Some(priority) = filter.priority
        && item.priority != priority
    {
        return false;
    }
    if let Some(needle) = filter.search_term()
        && !item.text.to_lowercase().contains(&needle.to_lowercase())
    {
        return false;
    }
    true
}

/// Ascending comparison of two items on a single sort field.
///
/// Unreadable `createdAt` values compare equal to each other and before any
/// readable one.
pub fn compare_by(field: SortField, a: &ActionItem, b: &ActionItem) -> Ordering {
    match field {
        SortField::CreatedAt => a.created().cmp(&b.created()),
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

/// Derive the displayed list: filter, then stable-sort. The input is never
/// modified; items with equal keys keep their input order in both
/// directions.
pub fn derive_view<'a>(
    items: &'a [ActionItem],
    filter: &FilterOptions,
    sort: SortOptions,
) -> Vec<&'a ActionItem> {
    let mut view: Vec<&ActionItem> = items
        .iter()
        .filter(|item| matches_filter(item, filter))
        .collect();
    view.sort_by(|a, b| {
        let ord = compare_by(sort.field, a, b);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    view
}
