use treesync_core::NodeRecord;
use treesync_store::InMemoryRemote;

#[allow(dead_code)]
pub fn record(id: &str, parent: Option<&str>, name: &str, data: Option<&str>) -> NodeRecord {
    NodeRecord {
        id: id.to_string(),
        parent_id: parent.map(str::to_string),
        name: name.to_string(),
        data: data.map(str::to_string),
    }
}

/// Remote already holding:
///
/// ```text
/// p (branch)
/// ├── x = "x-data"
/// └── y = "y-data"
/// q = "q-data"
/// ```
#[allow(dead_code)]
pub fn seeded_remote() -> InMemoryRemote {
    InMemoryRemote::with_rows(vec![
        record("p", None, "P", None),
        record("x", Some("p"), "X", Some("x-data")),
        record("y", Some("p"), "Y", Some("y-data")),
        record("q", None, "Q", Some("q-data")),
    ])
}
