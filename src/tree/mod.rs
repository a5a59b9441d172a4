//! Tree pipeline stages: index records by parent, sort sibling groups, and
//! flatten the visible part of the hierarchy into rows.

pub mod flatten;
pub mod index;
pub mod sort;

pub use flatten::{flatten, VisibleRow};
pub use index::{ActiveFilter, TreeIndex};
pub use sort::{parse_currency, sort_siblings, SortDirection, SortSpec};
