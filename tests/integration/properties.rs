use proptest::prelude::*;
use std::collections::HashSet;
use treetable::params::{ParamUpdate, TableParams};
use treetable::store::Record;
use treetable::tree::index::{ActiveFilter, TreeIndex};
use treetable::tree::sort::{sort_siblings, SortDirection, SortSpec};
use treetable::{build_view, ExpansionTracker};

/// Records with unique ids whose parents are earlier ids, 0, or missing.
fn forest() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((0u64..40, any::<bool>(), 0u32..5000), 0..40).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (parent, active, cents))| {
                let id = i as u64 + 1;
                let parent_id = if parent < id { parent } else { parent + 1000 };
                Record::new(id, parent_id, format!("Name {}", cents % 7))
                    .with_balance(format!("${}.{:02}", cents / 100, cents % 100))
                    .with_active(active)
            })
            .collect()
    })
}

fn filter() -> impl Strategy<Value = ActiveFilter> {
    prop_oneof![
        Just(ActiveFilter::All),
        Just(ActiveFilter::Active),
        Just(ActiveFilter::Inactive),
    ]
}

fn direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
}

fn all_expanded(records: &[Record]) -> ExpansionTracker {
    records.iter().map(|r| r.id).collect()
}

proptest! {
    #[test]
    fn visible_rows_satisfy_filter(records in forest(), active in filter()) {
        let params = TableParams { active, ..TableParams::default() };
        let view = build_view(&records, &params, &all_expanded(&records), records.len()).unwrap();
        for row in &view.rows {
            prop_assert!(active.matches(&row.record));
        }
    }

    #[test]
    fn fully_expanded_tree_shows_every_filtered_record_once(
        records in forest(),
        active in filter(),
    ) {
        let params = TableParams { active, ..TableParams::default() };
        let view = build_view(&records, &params, &all_expanded(&records), records.len()).unwrap();

        let filtered: Vec<&Record> = records.iter().filter(|r| active.matches(r)).collect();
        let present: HashSet<u64> = filtered.iter().map(|r| r.id).collect();
        prop_assert_eq!(view.rows.len(), filtered.len());

        let seen: HashSet<u64> = view.rows.iter().map(|r| r.id()).collect();
        prop_assert_eq!(seen.len(), view.rows.len());

        for row in &view.rows {
            let is_root = row.record.parent_id == 0 || !present.contains(&row.record.parent_id);
            prop_assert_eq!(row.level == 0, is_root);
        }
    }

    #[test]
    fn sorting_is_idempotent_and_stable(
        records in forest(),
        key in prop_oneof![Just("name"), Just("balance"), Just("isActive"), Just("email")],
        dir in direction(),
    ) {
        let refs: Vec<&Record> = records.iter().collect();
        let spec = SortSpec::by(key, dir);
        let once = sort_siblings(&refs, &spec);
        let twice = sort_siblings(&once, &spec);
        let once_ids: Vec<u64> = once.iter().map(|r| r.id).collect();
        let twice_ids: Vec<u64> = twice.iter().map(|r| r.id).collect();
        prop_assert_eq!(&once_ids, &twice_ids);

        // Ties keep input (ascending id) order in both directions
        for pair in once.windows(2) {
            if pair[0].field(key) == pair[1].field(key) {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn pages_concatenate_to_sorted_roots(
        records in forest(),
        page_size in 1usize..8,
        dir in direction(),
    ) {
        let mut params = TableParams {
            sort: Some("balance".into()),
            dir,
            ..TableParams::default()
        };
        let index = TreeIndex::build(&records, ActiveFilter::All);
        let expected: Vec<u64> = sort_siblings(index.roots(), &params.sort_spec())
            .iter()
            .map(|r| r.id)
            .collect();

        let first = build_view(&records, &params, &ExpansionTracker::new(), page_size).unwrap();
        let mut collected = Vec::new();
        for page in 1..=first.pagination.total_pages {
            params.page = page;
            let view = build_view(&records, &params, &ExpansionTracker::new(), page_size).unwrap();
            prop_assert!(view.rows.len() <= page_size);
            collected.extend(view.rows.iter().map(|r| r.id()));
        }
        prop_assert_eq!(collected, expected);
    }

    #[test]
    fn params_round_trip_through_query(
        page in 0usize..500,
        sort in prop::option::of("[a-zA-Z ]{0,8}"),
        dir in direction(),
        active in filter(),
    ) {
        let params = TableParams::default().merged(ParamUpdate {
            page: Some(page),
            sort: Some(sort),
            dir: Some(dir),
            active: Some(active),
        });
        prop_assert_eq!(TableParams::from_query(&params.to_query()), params);
    }
}
