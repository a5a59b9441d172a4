//! Treetable: Filterable, Sortable, Paginated Tree Tables
//!
//! Turns a flat list of parent-linked records into the visible rows of a
//! hierarchical table. Filtering, recursive per-level sorting, root-level
//! pagination, and expand/collapse state feed a pure pipeline, while the
//! page, sort, and filter selection lives in a query string so it survives
//! reloads and can be shared.

pub mod concurrency;
pub mod config;
pub mod error;
pub mod expansion;
pub mod logging;
pub mod params;
pub mod render;
pub mod session;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod views;

pub use error::ApiError;
pub use expansion::ExpansionTracker;
pub use params::{ParamStore, ParamUpdate, TableParams};
pub use session::{SharedSession, TableSession};
pub use store::{Record, RecordSource};
pub use views::{build_view, Pagination, TableView};
