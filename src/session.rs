//! Table Session
//!
//! The coordinating owner of one table: the record source, the parameter
//! store, the expansion tracker, and the page size. State is threaded
//! explicitly into every pipeline stage; nothing is looked up ambiently.

use crate::concurrency::SessionSlot;
use crate::error::ApiError;
use crate::expansion::ExpansionTracker;
use crate::params::{Navigation, ParamStore, ParamUpdate, TableParams};
use crate::store::RecordSource;
use crate::tree::index::ActiveFilter;
use crate::tree::sort::SortDirection;
use crate::types::RecordId;
use crate::views::{build_view, TableView};
use tracing::debug;

/// Inputs a view was derived from; equal keys give equal views.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewKey {
    params: TableParams,
    expansion_generation: u64,
}

pub struct TableSession<S, N> {
    source: S,
    params: ParamStore<N>,
    expansion: ExpansionTracker,
    page_size: usize,
    cached: Option<(ViewKey, TableView)>,
}

impl<S: RecordSource, N: Navigation> TableSession<S, N> {
    pub fn new(source: S, navigation: N, page_size: usize) -> Self {
        Self {
            source,
            params: ParamStore::new(navigation),
            expansion: ExpansionTracker::new(),
            page_size: page_size.max(1),
            cached: None,
        }
    }

    pub fn params(&self) -> &TableParams {
        self.params.params()
    }

    pub fn expansion(&self) -> &ExpansionTracker {
        &self.expansion
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current query string
    pub fn location(&self) -> String {
        self.params.location()
    }

    pub fn navigation(&self) -> &N {
        self.params.navigation()
    }

    pub fn navigation_mut(&mut self) -> &mut N {
        self.params.navigation_mut()
    }

    /// Derive the rows and pagination for the current inputs.
    ///
    /// The location is re-read first, so moves made through
    /// `navigation_mut` are honored. The last view is reused while params
    /// and expansion are unchanged.
    pub fn view(&mut self) -> Result<TableView, ApiError> {
        self.params.refresh();
        let key = ViewKey {
            params: self.params.params().clone(),
            expansion_generation: self.expansion.generation(),
        };
        if let Some((cached_key, view)) = &self.cached {
            if *cached_key == key {
                debug!("Reusing cached table view");
                return Ok(view.clone());
            }
        }

        let view = build_view(
            self.source.records(),
            &key.params,
            &self.expansion,
            self.page_size,
        )?;
        self.cached = Some((key, view.clone()));
        Ok(view)
    }

    /// Sort by `key` (None clears sorting) in `dir`.
    pub fn request_sort(&mut self, key: Option<&str>, dir: SortDirection) -> Result<(), ApiError> {
        self.params
            .update(ParamUpdate::sort(key.map(str::to_string), dir))?;
        Ok(())
    }

    /// Header-click sort: same key flips direction, a new key starts ascending.
    pub fn cycle_sort(&mut self, key: &str) -> Result<(), ApiError> {
        let next = self.params.params().sort_spec().toggled(key);
        self.request_sort(next.key.as_deref(), next.direction)
    }

    /// Change the active filter; the page resets to 1.
    pub fn request_filter(&mut self, filter: ActiveFilter) -> Result<(), ApiError> {
        self.params.update(ParamUpdate::filter(filter))?;
        Ok(())
    }

    pub fn request_page(&mut self, page: usize) -> Result<(), ApiError> {
        self.params.update(ParamUpdate::page(page))?;
        Ok(())
    }

    /// Expand or collapse `id`. Returns true if it is now expanded.
    pub fn toggle_row(&mut self, id: RecordId) -> bool {
        let expanded = self.expansion.toggle(id);
        debug!(id, expanded, "Toggled row");
        expanded
    }

    pub fn back(&mut self) -> Result<bool, ApiError> {
        self.params.back()
    }

    pub fn forward(&mut self) -> Result<bool, ApiError> {
        self.params.forward()
    }

    /// Re-read the location after an external change, without pushing.
    pub fn resync(&mut self) -> &TableParams {
        self.params.resync()
    }
}

/// Session shared with presentation callbacks
pub type SharedSession<S, N> = SessionSlot<TableSession<S, N>>;

/// Callback hooks for the presentation layer: primitive arguments only.
impl<S: RecordSource, N: Navigation> SessionSlot<TableSession<S, N>> {
    pub fn on_sort(&self, key: Option<&str>, dir: SortDirection) -> Result<(), ApiError> {
        self.with(|session| session.request_sort(key, dir))
    }

    pub fn on_filter(&self, filter: ActiveFilter) -> Result<(), ApiError> {
        self.with(|session| session.request_filter(filter))
    }

    pub fn on_page(&self, page: usize) -> Result<(), ApiError> {
        self.with(|session| session.request_page(page))
    }

    pub fn on_toggle(&self, id: RecordId) -> Result<bool, ApiError> {
        self.with(|session| Ok(session.toggle_row(id)))
    }

    pub fn current_view(&self) -> Result<TableView, ApiError> {
        self.with(|session| session.view())
    }
}
