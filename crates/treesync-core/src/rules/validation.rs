use crate::changeset::ChangeSet;
use crate::errors::{Result, TreeSyncError};
use crate::ops::Forest;

use super::invariants;

/// Validate the forest's structure
///
/// # Errors
/// `InvariantViolation` naming the first duplicate id or empty branch.
pub fn validate_forest(forest: &Forest) -> Result<()> {
    if let Some(id) = invariants::find_duplicate_ids(forest).first() {
        return Err(violation(format!("duplicate node id {}", id)));
    }
    if let Some(id) = invariants::find_empty_branches(forest).first() {
        return Err(violation(format!("branch {} has no children", id)));
    }
    Ok(())
}

/// Validate the change-set against the forest it describes
///
/// Runs the forest checks first. For exhaustive reporting call the
/// individual invariant functions directly.
///
/// # Errors
/// `InvariantViolation` describing the first violation found.
pub fn validate_changeset(forest: &Forest, changes: &ChangeSet) -> Result<()> {
    validate_forest(forest)?;

    if let Some(id) = invariants::find_deletes_still_in_forest(forest, changes).first() {
        return Err(violation(format!("pending delete {} is still in the forest", id)));
    }
    if let Some(id) = invariants::find_deletes_also_pending(changes).first() {
        return Err(violation(format!(
            "pending delete {} also has a create or update entry",
            id
        )));
    }
    if let Some(id) = invariants::find_created_and_updated(changes).first() {
        return Err(violation(format!(
            "node {} has both a create and an update entry",
            id
        )));
    }
    if let Some((id, reason)) = invariants::find_stale_entries(forest, changes).first() {
        return Err(violation(format!("stale entry for {}: {}", id, reason)));
    }
    Ok(())
}

fn violation(message: String) -> TreeSyncError {
    TreeSyncError::InvariantViolation { message }
}
