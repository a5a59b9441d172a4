//! Flattener
//!
//! Depth-first, pre-order walk from the page roots. Each sibling group is
//! sorted with the same spec before it is emitted, and children are only
//! walked for expanded nodes.

use crate::error::ApiError;
use crate::expansion::ExpansionTracker;
use crate::store::Record;
use crate::tree::index::TreeIndex;
use crate::tree::sort::{sort_siblings, SortSpec};
use crate::types::RecordId;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// One flattened, depth-annotated record in the rendered page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleRow {
    #[serde(flatten)]
    pub record: Record,
    /// Depth below the page root (roots are 0)
    pub level: usize,
    pub has_children: bool,
}

impl VisibleRow {
    pub fn id(&self) -> RecordId {
        self.record.id
    }
}

/// One sibling group being walked, with the id of the parent that opened it
struct Frame<'a> {
    nodes: std::vec::IntoIter<&'a Record>,
    level: usize,
    parent: Option<RecordId>,
}

/// Flatten `roots` into visible rows.
///
/// Walks with an explicit frame stack, so depth is bounded by memory rather
/// than the call stack. Fails with `CyclicHierarchy` if a node re-appears
/// below itself on the current ancestor path.
pub fn flatten<'a>(
    roots: &[&'a Record],
    index: &TreeIndex<'a>,
    expanded: &ExpansionTracker,
    spec: &SortSpec,
) -> Result<Vec<VisibleRow>, ApiError> {
    let mut ancestors: HashSet<RecordId> = HashSet::new();
    let mut rows = Vec::with_capacity(roots.len());
    let mut stack = vec![Frame {
        nodes: sort_siblings(roots, spec).into_iter(),
        level: 0,
        parent: None,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(node) = frame.nodes.next() else {
            if let Some(parent) = frame.parent {
                ancestors.remove(&parent);
            }
            stack.pop();
            continue;
        };
        let level = frame.level;

        if ancestors.contains(&node.id) {
            return Err(ApiError::CyclicHierarchy { id: node.id });
        }

        let children = index.children(node.id);
        rows.push(VisibleRow {
            record: node.clone(),
            level,
            has_children: !children.is_empty(),
        });

        if !children.is_empty() && expanded.is_expanded(node.id) {
            ancestors.insert(node.id);
            stack.push(Frame {
                nodes: sort_siblings(children, spec).into_iter(),
                level: level + 1,
                parent: Some(node.id),
            });
        }
    }

    debug!(roots = roots.len(), rows = rows.len(), "Flattened tree");
    Ok(rows)
}
