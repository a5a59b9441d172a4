use treetable::store::Record;

/// Twelve roots; root 1 has three children and one grandchild below child 101.
/// Odd roots are active, even roots inactive, descendants active.
pub fn org() -> Vec<Record> {
    let mut records: Vec<Record> = (1..=12)
        .map(|id| {
            Record::new(id, 0, format!("Root {:02}", id))
                .with_email(format!("root{}@example.com", id))
                .with_balance(format!("${}.00", id * 100))
                .with_active(id % 2 == 1)
        })
        .collect();
    records.push(Record::new(101, 1, "Child A").with_balance("$30.00"));
    records.push(Record::new(102, 1, "Child B").with_balance("$10.00"));
    records.push(Record::new(103, 1, "Child C").with_balance("$20.00"));
    records.push(Record::new(201, 101, "Grandchild").with_balance("$5.00"));
    records
}

pub fn ids(rows: &[treetable::tree::VisibleRow]) -> Vec<u64> {
    rows.iter().map(|row| row.id()).collect()
}

/// Write `records` as JSON under `dir` and return the path.
pub fn write_records(dir: &std::path::Path, records: &[Record]) -> std::path::PathBuf {
    let path = dir.join("records.json");
    std::fs::write(&path, serde_json::to_string_pretty(records).unwrap()).unwrap();
    path
}
