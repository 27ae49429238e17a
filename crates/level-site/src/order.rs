//! Page ordering policy.

use serde::Serialize;

/// Key pages of a level are ordered by.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    /// Alphabetical by document id.
    #[default]
    Alpha,
    /// Chronological by the `time` derived from the `Date` header.
    Date,
    /// By the value of a metadata key.
    Meta(String),
}

/// Direction of the page order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Sibling offsets `(previous, next)` for the given ordering.
    ///
    /// Descending date order places newer pages first, so the chronologically
    /// previous page is one position *forward*. Every other combination
    /// follows index order.
    #[must_use]
    pub fn neighbour_offsets(self, order_by: &OrderBy) -> (isize, isize) {
        match (order_by, self) {
            (OrderBy::Date, Self::Descending) => (1, -1),
            _ => (-1, 1),
        }
    }
}
