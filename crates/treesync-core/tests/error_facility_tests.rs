use treesync_core::errors::{ExError, ExErrorKind, SyncPhase, TreeSyncError};

#[test]
fn test_structural_errors_map_to_not_found() {
    let cases = vec![
        TreeSyncError::NodeNotFound {
            node_id: "a".to_string(),
        },
        TreeSyncError::RootNotFound {
            node_id: "a".to_string(),
        },
        TreeSyncError::ChildNotFound {
            parent_id: "p".to_string(),
            child_id: "a".to_string(),
        },
    ];

    for err in cases {
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::NotFound);
        assert_eq!(ex.code(), "ERR_NOT_FOUND");
        assert_eq!(ex.node_id(), Some("a"));
    }
}

#[test]
fn test_kind_mapping_table() {
    let cases = vec![
        (
            TreeSyncError::NotALeaf {
                node_id: "a".to_string(),
            },
            ExErrorKind::InvalidState,
        ),
        (
            TreeSyncError::InvalidPath {
                path: "9/9".to_string(),
            },
            ExErrorKind::InvalidInput,
        ),
        (
            TreeSyncError::InvariantViolation {
                message: "x".to_string(),
            },
            ExErrorKind::InvariantViolation,
        ),
        (
            TreeSyncError::SyncFailure {
                phase: SyncPhase::CreateUpdate,
                message: "x".to_string(),
            },
            ExErrorKind::SyncFailure,
        ),
        (
            TreeSyncError::Serialization {
                message: "x".to_string(),
            },
            ExErrorKind::Serialization,
        ),
        (
            TreeSyncError::Internal {
                message: "x".to_string(),
            },
            ExErrorKind::Internal,
        ),
    ];

    for (err, kind) in cases {
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), kind);
    }
}

#[test]
fn test_sync_failure_display_names_phase() {
    let err = TreeSyncError::SyncFailure {
        phase: SyncPhase::Delete,
        message: "connection reset".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Sync failed during delete phase: connection reset"
    );

    let ex: ExError = err.into();
    assert!(ex.to_string().contains("(phase: delete)"));
    assert_eq!(ex.op(), Some("sync"));
}
