//! Text presentation of a table view.
//!
//! Rendering decisions live here, not in the pipeline: a `RowRenderer`
//! strategy turns each visible row into cells and `render_table` lays them
//! out with comfy-table.

use crate::expansion::ExpansionTracker;
use crate::tree::flatten::VisibleRow;
use crate::tree::index::ActiveFilter;
use crate::tree::sort::{SortDirection, SortSpec};
use crate::views::TableView;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{CellAlignment, Table};
use owo_colors::OwoColorize;

/// Column label and the record field it sorts by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub label: &'static str,
    pub key: &'static str,
    pub align_right: bool,
}

pub const COLUMNS: [Column; 5] = [
    Column {
        label: "ID",
        key: "id",
        align_right: false,
    },
    Column {
        label: "Name",
        key: "name",
        align_right: false,
    },
    Column {
        label: "Email",
        key: "email",
        align_right: false,
    },
    Column {
        label: "Balance",
        key: "balance",
        align_right: true,
    },
    Column {
        label: "Status",
        key: "isActive",
        align_right: false,
    },
];

/// Per-row rendering strategy
pub trait RowRenderer {
    fn columns(&self) -> &[Column];

    /// One cell per column for `row`.
    fn cells(&self, row: &VisibleRow, expanded: bool) -> Vec<String>;
}

/// Indented id with a disclosure marker, then the record fields
#[derive(Debug, Clone)]
pub struct StandardRowRenderer {
    /// Spaces per tree level
    pub indent: usize,
    pub color: bool,
}

impl Default for StandardRowRenderer {
    fn default() -> Self {
        Self {
            indent: 2,
            color: true,
        }
    }
}

impl StandardRowRenderer {
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }

    fn status(&self, is_active: bool) -> String {
        match (is_active, self.color) {
            (true, true) => "Active".green().to_string(),
            (false, true) => "Inactive".red().to_string(),
            (true, false) => "Active".to_string(),
            (false, false) => "Inactive".to_string(),
        }
    }
}

impl RowRenderer for StandardRowRenderer {
    fn columns(&self) -> &[Column] {
        &COLUMNS
    }

    fn cells(&self, row: &VisibleRow, expanded: bool) -> Vec<String> {
        let marker = match (row.has_children, expanded) {
            (false, _) => " ",
            (true, false) => "▶",
            (true, true) => "▼",
        };
        let record = &row.record;
        vec![
            format!(
                "{}{} {}",
                " ".repeat(row.level * self.indent),
                marker,
                record.id
            ),
            record.name.clone(),
            record.email.clone(),
            record.balance.to_string(),
            self.status(record.is_active),
        ]
    }
}

/// Header label with the sort indicator when the column is sorted.
pub fn header_label(column: &Column, sort: &SortSpec) -> String {
    if !sort.is_sorted_by(column.key) {
        return column.label.to_string();
    }
    let arrow = match sort.direction {
        SortDirection::Asc => "▲",
        SortDirection::Desc => "▼",
    };
    format!("{} {}", column.label, arrow)
}

/// Render the whole view: filter line, table (or empty notice), page footer.
pub fn render_table(
    view: &TableView,
    expansion: &ExpansionTracker,
    renderer: &dyn RowRenderer,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("Status: {}\n", filter_label(view)));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(
        renderer
            .columns()
            .iter()
            .map(|column| header_label(column, &view.sort))
            .collect::<Vec<_>>(),
    );

    if view.is_empty() {
        out.push_str(&format!("{}\n", table));
        out.push_str("No results found.\n");
    } else {
        for row in &view.rows {
            table.add_row(renderer.cells(row, expansion.is_expanded(row.id())));
        }
        for (index, column) in renderer.columns().iter().enumerate() {
            if column.align_right {
                if let Some(col) = table.column_mut(index) {
                    col.set_cell_alignment(CellAlignment::Right);
                }
            }
        }
        out.push_str(&format!("{}\n", table));
    }

    let pagination = &view.pagination;
    out.push_str(&format!(
        "Page {} of {}\n",
        pagination.current_page,
        pagination.total_pages.max(1)
    ));
    out
}

fn filter_label(view: &TableView) -> &'static str {
    match view.filter {
        ActiveFilter::All => "All",
        ActiveFilter::Active => "Active",
        ActiveFilter::Inactive => "Inactive",
    }
}
