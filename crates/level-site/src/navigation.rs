//! Previous/next navigation within a level.

use std::path::Path;

use serde::Serialize;

use crate::id::page_id;
use crate::order::{OrderBy, SortOrder};
use crate::page::PageIndex;

/// Position of the served page among its siblings.
///
/// `None` fields mean "no such neighbour", or that the served page could not
/// be located at all.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavigationResult {
    pub current_id: Option<String>,
    pub previous_id: Option<String>,
    pub next_id: Option<String>,
}

/// Locate `current_file` in `index` and find its neighbours.
///
/// The index is taken in its existing order; this function never sorts.
/// With date ordering in descending direction the previous page is the one
/// *after* the current page in index order (see
/// [`SortOrder::neighbour_offsets`]).
#[must_use]
pub fn resolve_navigation(
    index: &PageIndex,
    current_file: &Path,
    content_root: &Path,
    content_ext: &str,
    order_by: &OrderBy,
    order: SortOrder,
) -> NavigationResult {
    let Some(current_id) = page_id(current_file, content_root, content_ext) else {
        tracing::debug!(path = %current_file.display(), "Served page is outside the content root");
        return NavigationResult::default();
    };

    let Some(position) = index.position(&current_id) else {
        tracing::debug!(id = %current_id, "Served page is not part of its level");
        return NavigationResult::default();
    };

    let (previous, next) = order.neighbour_offsets(order_by);
    let neighbour = |offset: isize| {
        position
            .checked_add_signed(offset)
            .and_then(|i| index.get_index(i))
            .map(|page| page.id.clone())
    };

    NavigationResult {
        previous_id: neighbour(previous),
        next_id: neighbour(next),
        current_id: Some(current_id),
    }
}
