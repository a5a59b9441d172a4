//! Core types shared across the tree table pipeline.

/// RecordId: unique identifier of a record in the source dataset
pub type RecordId = u64;

/// Parent id marking a record as a structural root
pub const ROOT_PARENT: RecordId = 0;

/// Default number of root records per page
pub const DEFAULT_PAGE_SIZE: usize = 5;
