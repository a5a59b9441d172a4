use crate::support::{ids, org};
use treetable::params::{MemoryNavigation, TableParams};
use treetable::store::Record;
use treetable::tree::index::ActiveFilter;
use treetable::tree::sort::SortDirection;
use treetable::{build_view, ExpansionTracker, TableSession};

#[test]
fn first_page_shows_five_collapsed_roots() {
    let records = org();
    let view = build_view(&records, &TableParams::default(), &ExpansionTracker::new(), 5).unwrap();

    assert_eq!(ids(&view.rows), vec![1, 2, 3, 4, 5]);
    assert_eq!(view.pagination.total_pages, 3);
    assert_eq!(view.pagination.current_page, 1);
    assert!(view.rows[0].has_children);
    assert!(view.rows.iter().all(|row| row.level == 0));
}

#[test]
fn expanding_a_root_inserts_its_children_after_it() {
    let records = org();
    let expansion: ExpansionTracker = [1].into_iter().collect();
    let view = build_view(&records, &TableParams::default(), &expansion, 5).unwrap();

    assert_eq!(view.rows.len(), 8);
    assert_eq!(ids(&view.rows)[..5], [1, 101, 102, 103, 2]);
    assert!(view.rows[1..4].iter().all(|row| row.level == 1));
    // Pagination counts roots, not visible rows
    assert_eq!(view.pagination.total_pages, 3);
}

#[test]
fn nested_expansion_requires_every_ancestor() {
    let records = org();
    let only_child: ExpansionTracker = [101].into_iter().collect();
    let view = build_view(&records, &TableParams::default(), &only_child, 5).unwrap();
    assert!(!ids(&view.rows).contains(&201));

    let both: ExpansionTracker = [1, 101].into_iter().collect();
    let view = build_view(&records, &TableParams::default(), &both, 5).unwrap();
    let rows = ids(&view.rows);
    assert_eq!(rows[..6], [1, 101, 201, 102, 103, 2]);
    assert_eq!(view.rows[2].level, 2);
}

#[test]
fn children_are_sorted_within_their_group() {
    let records = org();
    let expansion: ExpansionTracker = [1].into_iter().collect();
    let params = TableParams {
        sort: Some("balance".into()),
        dir: SortDirection::Asc,
        ..TableParams::default()
    };
    let view = build_view(&records, &params, &expansion, 5).unwrap();
    assert_eq!(ids(&view.rows)[..4], [1, 102, 103, 101]);
}

#[test]
fn currency_sort_is_numeric() {
    let records = vec![
        Record::new(1, 0, "Small").with_balance("$999.00"),
        Record::new(2, 0, "Large").with_balance("$1,000.00"),
        Record::new(3, 0, "Tiny").with_balance("$5.00"),
    ];
    let params = TableParams {
        sort: Some("balance".into()),
        dir: SortDirection::Desc,
        ..TableParams::default()
    };
    let view = build_view(&records, &params, &ExpansionTracker::new(), 5).unwrap();
    assert_eq!(ids(&view.rows), vec![2, 1, 3]);
}

#[test]
fn filtering_promotes_orphans_to_roots() {
    let records = vec![
        Record::new(1, 0, "Inactive parent").with_active(false),
        Record::new(2, 1, "Active child"),
        Record::new(3, 2, "Active grandchild"),
    ];
    let params = TableParams {
        active: ActiveFilter::Active,
        ..TableParams::default()
    };
    let view = build_view(&records, &params, &ExpansionTracker::new(), 5).unwrap();
    assert_eq!(ids(&view.rows), vec![2]);
    assert_eq!(view.rows[0].level, 0);
    assert!(view.rows[0].has_children);
}

#[test]
fn filter_change_on_a_later_page_resets_to_page_one() {
    let mut session = TableSession::new(org(), MemoryNavigation::default(), 5);
    session.request_page(2).unwrap();
    assert_eq!(session.view().unwrap().pagination.current_page, 2);

    session.request_filter(ActiveFilter::Inactive).unwrap();
    let view = session.view().unwrap();
    assert_eq!(view.pagination.current_page, 1);
    assert_eq!(session.location(), "active=false");
    assert_eq!(ids(&view.rows), vec![2, 4, 6, 8, 10]);
}

#[test]
fn out_of_range_page_is_clamped_in_the_view_only() {
    let mut session = TableSession::new(org(), MemoryNavigation::new("page=40"), 5);
    let view = session.view().unwrap();
    assert_eq!(view.pagination.current_page, 3);
    assert_eq!(view.pagination.requested_page, 40);
    assert_eq!(ids(&view.rows), vec![11, 12]);
    assert_eq!(session.location(), "page=40");
}

#[test]
fn empty_filter_result_renders_no_rows() {
    let records = vec![Record::new(1, 0, "Only").with_active(true)];
    let params = TableParams {
        active: ActiveFilter::Inactive,
        ..TableParams::default()
    };
    let view = build_view(&records, &params, &ExpansionTracker::new(), 5).unwrap();
    assert!(view.is_empty());
    assert_eq!(view.pagination.total_pages, 0);
    assert_eq!(view.pagination.current_page, 1);
}

#[test]
fn expansion_survives_sort_and_filter_changes() {
    let mut session = TableSession::new(org(), MemoryNavigation::default(), 5);
    session.toggle_row(1);
    session.cycle_sort("name").unwrap();
    session.request_filter(ActiveFilter::Active).unwrap();

    let view = session.view().unwrap();
    assert!(session.expansion().is_expanded(1));
    assert_eq!(ids(&view.rows)[..4], [1, 101, 102, 103]);
}
