use treesync_core_types::RequestId;
use thiserror::Error;

/// Result type alias using TreeSyncError
pub type Result<T> = std::result::Result<T, TreeSyncError>;

/// The two network phases of an export attempt, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncPhase {
    /// Creates and updates, sent together in one batch
    CreateUpdate,
    /// Deletes, sent only after the create/update batch was acknowledged
    Delete,
}

impl SyncPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncPhase::CreateUpdate => "create_update",
            SyncPhase::Delete => "delete",
        }
    }
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling
/// and assertions in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural
    InvalidInput,
    NotFound,
    InvalidState,
    InvariantViolation,

    // Sync
    SyncFailure,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    ExternalService,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidState => "ERR_INVALID_STATE",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::SyncFailure => "ERR_SYNC_FAILURE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, node, phase, correlation id) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node_id: Option<String>,
    phase: Option<SyncPhase>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node_id: None,
            phase: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node ID context
    pub fn with_node_id(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    /// Add sync phase context
    pub fn with_phase(mut self, phase: SyncPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    pub fn phase(&self) -> Option<SyncPhase> {
        self.phase
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(node_id) = &self.node_id {
            write!(f, " (node_id: {})", node_id)?;
        }
        if let Some(phase) = self.phase {
            write!(f, " (phase: {})", phase)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for tree editing and sync operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeSyncError {
    // ===== Structural Errors =====
    /// Node id does not resolve anywhere in the forest
    #[error("Node not found: {node_id}")]
    NodeNotFound { node_id: String },

    /// Root-level delete named an id that is not a root
    #[error("Root node not found: {node_id}")]
    RootNotFound { node_id: String },

    /// Child is not a direct child of the given parent
    #[error("Node {child_id} is not a child of {parent_id}")]
    ChildNotFound { parent_id: String, child_id: String },

    /// Leaf-only operation attempted on a branch
    #[error("Node {node_id} is a branch and holds no data")]
    NotALeaf { node_id: String },

    /// Index path does not address a node
    #[error("Invalid node path: {path}")]
    InvalidPath { path: String },

    /// Forest or change-set violates a structural invariant
    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    // ===== Sync Errors =====
    /// A phase of the two-phase sync was not acknowledged
    #[error("Sync failed during {phase} phase: {message}")]
    SyncFailure { phase: SyncPhase, message: String },

    // ===== Generic Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<TreeSyncError> for ExError {
    fn from(err: TreeSyncError) -> Self {
        match err {
            TreeSyncError::NodeNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_node_id(node_id)
                .with_message("Node not found"),

            TreeSyncError::RootNotFound { node_id } => ExError::new(ExErrorKind::NotFound)
                .with_node_id(node_id)
                .with_op("delete_root")
                .with_message("Root node not found"),

            TreeSyncError::ChildNotFound {
                parent_id,
                child_id,
            } => ExError::new(ExErrorKind::NotFound)
                .with_node_id(child_id)
                .with_op("delete_node")
                .with_message(format!("Not a child of {}", parent_id)),

            TreeSyncError::NotALeaf { node_id } => ExError::new(ExErrorKind::InvalidState)
                .with_node_id(node_id)
                .with_message("Branch nodes hold no data"),

            TreeSyncError::InvalidPath { path } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid node path: {}", path)),

            TreeSyncError::InvariantViolation { message } => {
                ExError::new(ExErrorKind::InvariantViolation).with_message(message)
            }

            TreeSyncError::SyncFailure { phase, message } => {
                ExError::new(ExErrorKind::SyncFailure)
                    .with_phase(phase)
                    .with_op("sync")
                    .with_message(message)
            }

            TreeSyncError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            TreeSyncError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for TreeSyncError {
    fn from(err: serde_json::Error) -> Self {
        TreeSyncError::Serialization {
            message: err.to_string(),
        }
    }
}
