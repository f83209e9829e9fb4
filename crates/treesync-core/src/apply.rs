//! Functional-boundary apply function
//!
//! `apply()` takes ownership of a session, executes one command and hands
//! back the new session. Every operation validates before it mutates, so on
//! `Err` the caller's prior state (if it kept a clone) is still the truth.
//!
//! ## Example
//!
//! ```
//! use treesync_core::{apply::apply, Command, EditSession};
//!
//! let session = apply(EditSession::new(), Command::CreateRoot { name: "R".to_string() }).unwrap();
//! assert_eq!(session.forest().roots().len(), 1);
//! assert_eq!(session.changes().creates().len(), 1);
//! ```

use std::time::Instant;

use crate::commands::Command;
use crate::errors::Result;
use crate::session::EditSession;
use crate::{log_op_end, log_op_error, log_op_start};

/// Apply a command to a session, returning the updated session
///
/// # Errors
///
/// Returns the operation's `TreeSyncError` (`NodeNotFound`, `RootNotFound`,
/// `ChildNotFound`, `NotALeaf`) when the command cannot be applied.
pub fn apply(mut session: EditSession, cmd: Command) -> Result<EditSession> {
    let op = cmd.op_name();
    let start = Instant::now();
    log_op_start!(op);

    let outcome = match cmd {
        Command::CreateRoot { name } => {
            session.create_root(name);
            Ok(())
        }
        Command::AddChild { parent_id } => session.add_child(&parent_id).map(|_| ()),
        Command::DeleteNode {
            parent_id,
            child_id,
        } => session.delete_node(&parent_id, &child_id).map(|_| ()),
        Command::RenameNode { node_id, name } => session.rename_node(&node_id, name),
        Command::SetLeafData { node_id, value } => session.set_leaf_data(&node_id, value),
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    match outcome {
        Ok(()) => {
            log_op_end!(op, duration_ms = duration_ms);
            Ok(session)
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}
