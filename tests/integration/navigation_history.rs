use tempfile::TempDir;
use treetable::params::{FileNavigation, MemoryNavigation, Navigation, ParamStore, ParamUpdate};
use treetable::tree::index::ActiveFilter;
use treetable::tree::sort::SortDirection;

#[test]
fn every_update_pushes_one_entry() {
    let mut store = ParamStore::new(MemoryNavigation::default());
    store.update(ParamUpdate::page(3)).unwrap();
    store
        .update(ParamUpdate::sort(Some("name".into()), SortDirection::Desc))
        .unwrap();
    store.update(ParamUpdate::filter(ActiveFilter::Active)).unwrap();

    assert_eq!(store.navigation().history().len(), 4);
    assert_eq!(store.location(), "sort=name&dir=desc&active=true");
}

#[test]
fn back_and_forward_restore_parameters() {
    let mut store = ParamStore::new(MemoryNavigation::default());
    store.update(ParamUpdate::page(2)).unwrap();
    store.update(ParamUpdate::page(3)).unwrap();

    assert!(store.back().unwrap());
    assert_eq!(store.params().page, 2);
    assert!(store.back().unwrap());
    assert_eq!(store.params().page, 1);
    assert!(!store.back().unwrap());

    assert!(store.forward().unwrap());
    assert_eq!(store.params().page, 2);
    assert_eq!(store.navigation().history().len(), 3);
}

#[test]
fn foreign_query_keys_survive_updates() {
    let mut store = ParamStore::new(MemoryNavigation::new("?tab=users&page=2"));
    assert_eq!(store.params().page, 2);

    store.update(ParamUpdate::filter(ActiveFilter::Inactive)).unwrap();
    assert_eq!(store.location(), "tab=users&active=false");
}

#[test]
fn file_history_is_shared_between_handles() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state").join("navigation.json");

    let mut first = ParamStore::new(FileNavigation::open(&path, "").unwrap());
    first.update(ParamUpdate::page(4)).unwrap();

    let mut second = ParamStore::new(FileNavigation::open(&path, "").unwrap());
    assert_eq!(second.params().page, 4);
    assert!(second.back().unwrap());
    assert_eq!(second.params().page, 1);

    assert!(first.navigation_mut().reload().unwrap());
    assert_eq!(first.resync().page, 1);
}
