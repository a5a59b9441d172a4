//! Table Views
//!
//! Selects a bounded page of root records and assembles the rendered view:
//! index -> sort -> paginate -> flatten. Deterministic for fixed inputs.

use crate::error::ApiError;
use crate::expansion::ExpansionTracker;
use crate::params::TableParams;
use crate::store::Record;
use crate::tree::flatten::{flatten, VisibleRow};
use crate::tree::index::{ActiveFilter, TreeIndex};
use crate::tree::sort::{sort_siblings, SortSpec};
use serde::Serialize;
use std::ops::Range;
use tracing::debug;

/// Pagination metadata for one page of root records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub requested_page: usize,
    pub page_size: usize,
    /// `ceil(total_roots / page_size)`; 0 when there are no roots
    pub total_pages: usize,
    /// Requested page clamped into `[1, max(total_pages, 1)]`
    pub current_page: usize,
    pub total_roots: usize,
}

impl Pagination {
    /// Compute page bounds. A zero page size is treated as 1.
    pub fn compute(total_roots: usize, requested_page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_roots.div_ceil(page_size);
        let current_page = requested_page.max(1).min(total_pages.max(1));
        Self {
            requested_page,
            page_size,
            total_pages,
            current_page,
            total_roots,
        }
    }

    /// Index range of the current page within the sorted root list.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_roots);
        let end = (start + self.page_size).min(self.total_roots);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Slice one page out of `items`.
pub fn paginate<T>(items: &[T], requested_page: usize, page_size: usize) -> (&[T], Pagination) {
    let pagination = Pagination::compute(items.len(), requested_page, page_size);
    (&items[pagination.range()], pagination)
}

/// Everything the presentation layer needs for one render cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub rows: Vec<VisibleRow>,
    pub pagination: Pagination,
    pub sort: SortSpec,
    pub filter: ActiveFilter,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Run the full pipeline for one set of inputs.
pub fn build_view(
    records: &[Record],
    params: &TableParams,
    expanded: &ExpansionTracker,
    page_size: usize,
) -> Result<TableView, ApiError> {
    let spec = params.sort_spec();
    let index = TreeIndex::build(records, params.active);
    let sorted_roots = sort_siblings(index.roots(), &spec);
    let (page_roots, pagination) = paginate(&sorted_roots, params.page, page_size);
    let rows = flatten(page_roots, &index, expanded, &spec)?;

    debug!(
        page = pagination.current_page,
        total_pages = pagination.total_pages,
        rows = rows.len(),
        "Built table view"
    );

    Ok(TableView {
        rows,
        pagination,
        sort: spec,
        filter: params.active,
    })
}
