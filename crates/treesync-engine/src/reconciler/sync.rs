use std::time::Instant;

use treesync_core::errors::{ExError, SyncPhase, TreeSyncError};
use treesync_core::render::RenderMode;
use treesync_core::rules::validate_forest;
use treesync_core::{log_op_end, log_op_error, log_op_start, EditSession};
use treesync_core_types::RequestId;
use treesync_store::{RemoteStore, Result};

use super::batch::export_batch;

/// What a successful sync sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub request_id: RequestId,
    pub created: usize,
    pub updated: usize,
    /// Ids sent in the delete phase
    pub deleted: usize,
    /// Of those, how many the remote actually held
    pub removed: u64,
    /// Compact id-stripped rendering of the synced forest
    pub snapshot: String,
}

impl SyncReport {
    /// True if neither phase had anything to send
    pub fn was_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.deleted == 0
    }
}

/// Push the session's pending changes to the remote
///
/// The session is borrowed mutably for the whole exchange, so no edit can
/// interleave with a sync and only one sync runs per session at a time.
/// The change-set is cleared only after both phases succeed.
///
/// # Errors
/// * `InvariantViolation` - If the change-set is inconsistent (nothing sent)
/// * `SyncFailure` - If a phase failed; `phase()` names which one and the
///   remote's error is attached as the source
pub async fn sync<R>(session: &mut EditSession, remote: &R) -> Result<SyncReport>
where
    R: RemoteStore + ?Sized,
{
    let request_id = RequestId::new();
    let start = Instant::now();
    log_op_start!("sync", request_id = %request_id);

    let result = run_sync(session, remote, &request_id).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(report) => {
            log_op_end!(
                "sync",
                duration_ms = duration_ms,
                request_id = %request_id,
                creates = report.created,
                updates = report.updated,
                deletes = report.deleted
            );
        }
        Err(err) => {
            log_op_error!(
                "sync",
                err.clone(),
                duration_ms = duration_ms,
                request_id = %request_id
            );
        }
    }
    result
}

async fn run_sync<R>(
    session: &mut EditSession,
    remote: &R,
    request_id: &RequestId,
) -> Result<SyncReport>
where
    R: RemoteStore + ?Sized,
{
    let batch = export_batch(session.forest(), session.changes(), RenderMode::Compact)
        .map_err(|e| ExError::from(e).with_request_id(request_id.clone()))?;

    if !batch.create_update.is_empty() {
        remote
            .apply_create_update_batch(&batch.create_update.add, &batch.create_update.update)
            .await
            .map_err(|e| phase_failure(SyncPhase::CreateUpdate, e, request_id))?;
        session.mark_persisted(batch.create_update.add.iter().map(|r| r.id.clone()).collect());
    }

    let removed = if batch.delete.is_empty() {
        0
    } else {
        remote
            .apply_delete_batch(&batch.delete_ids())
            .await
            .map_err(|e| phase_failure(SyncPhase::Delete, e, request_id))?
    };

    session.clear_changes();

    Ok(SyncReport {
        request_id: request_id.clone(),
        created: batch.create_update.add.len(),
        updated: batch.create_update.update.len(),
        deleted: batch.delete.len(),
        removed,
        snapshot: batch.snapshot,
    })
}

fn phase_failure(phase: SyncPhase, cause: ExError, request_id: &RequestId) -> ExError {
    tracing::warn!(request_id = %request_id, %phase, error = %cause, "sync phase failed, changes kept");
    ExError::from(TreeSyncError::SyncFailure {
        phase,
        message: cause.message().to_string(),
    })
    .with_request_id(request_id.clone())
    .with_source(cause)
}

/// Load the remote forest into a fresh session with nothing pending
///
/// # Errors
/// * Any remote error from `fetch_all_roots`
/// * `InvariantViolation` - If the remote forest holds duplicate ids
pub async fn bootstrap<R>(remote: &R) -> Result<EditSession>
where
    R: RemoteStore + ?Sized,
{
    let start = Instant::now();
    log_op_start!("bootstrap");

    let forest = match remote.fetch_all_roots().await {
        Ok(forest) => forest,
        Err(err) => {
            log_op_error!(
                "bootstrap",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            return Err(err);
        }
    };
    if let Err(err) = validate_forest(&forest) {
        log_op_error!(
            "bootstrap",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        return Err(err.into());
    }

    log_op_end!(
        "bootstrap",
        duration_ms = start.elapsed().as_millis() as u64,
        nodes = forest.node_count()
    );
    Ok(EditSession::from_forest(forest))
}

/// Create a root and persist it right away instead of waiting for a batch
///
/// On acknowledgement the root is no longer pending. If the remote refuses,
/// the root stays in the session as a pending create so the next `sync`
/// carries it; the returned error names it via `node_id()`.
///
/// # Errors
/// * Any remote error from `create_root`, with the new root's id attached
pub async fn publish_root<R>(
    session: &mut EditSession,
    remote: &R,
    name: impl Into<String>,
) -> Result<String>
where
    R: RemoteStore + ?Sized,
{
    let start = Instant::now();
    let id = session.create_root(name);
    log_op_start!("publish_root", node_id = %id);

    let record = session
        .changes()
        .pending_create(&id)
        .cloned()
        .ok_or_else(|| {
            ExError::from(TreeSyncError::Internal {
                message: "new root missing from pending creates".to_string(),
            })
            .with_node_id(id.clone())
        })?;

    match remote.create_root(&record).await {
        Ok(()) => {
            session.acknowledge(vec![id.clone()]);
            log_op_end!(
                "publish_root",
                duration_ms = start.elapsed().as_millis() as u64,
                node_id = %id
            );
            Ok(id)
        }
        Err(err) => {
            let err = err.with_node_id(id.clone());
            log_op_error!(
                "publish_root",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                node_id = %id
            );
            Err(err)
        }
    }
}
