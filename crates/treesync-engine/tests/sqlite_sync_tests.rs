use treesync_core::render::{render, RenderMode};
use treesync_engine::{bootstrap, publish_root, sync};
use treesync_store::SqliteRemote;

#[tokio::test]
async fn test_edit_sync_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    // First process: build a tree and sync it
    let expected = {
        let remote = SqliteRemote::open(&path).unwrap();
        let mut session = bootstrap(&remote).await.unwrap();
        let root = publish_root(&mut session, &remote, "Root").await.unwrap();
        let a = session.add_child(&root).unwrap();
        let b = session.add_child(&root).unwrap();
        session.rename_node(&b, "B").unwrap();
        let b1 = session.add_child(&b).unwrap();
        session.set_leaf_data(&b1, "deep").unwrap();
        session.set_leaf_data(&a, "shallow").unwrap();

        sync(&mut session, &remote).await.unwrap();
        render(session.forest(), RenderMode::Indented).unwrap()
    };

    // Second process: reload and compare
    let remote = SqliteRemote::open(&path).unwrap();
    let mut session = bootstrap(&remote).await.unwrap();
    assert_eq!(
        render(session.forest(), RenderMode::Indented).unwrap(),
        expected
    );

    // Deleting the branch's only child turns it back into a default leaf remotely
    let b = session.forest().roots()[0].children()[1].id.clone();
    let b1 = session.forest().roots()[0].children()[1].children()[0].id.clone();
    session.delete_node(&b, &b1).unwrap();
    sync(&mut session, &remote).await.unwrap();

    let reloaded = bootstrap(&remote).await.unwrap();
    assert_eq!(reloaded.forest(), session.forest());
    assert_eq!(
        reloaded.forest().get_node(&b).unwrap().data(),
        Some("Data")
    );
    assert_eq!(remote.node_count().unwrap(), 3);
}
