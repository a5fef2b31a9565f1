use crate::draft::DraftField;
use crate::models::{Record, RecordKind, Relation};

/// Unified application message type
///
/// Everything that can change the record store arrives as a message.
/// Messages are organized by domain for better maintainability.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation Messages =====
    /// Switch the active collection
    SelectTab(RecordKind),

    // ===== Form Input Messages =====
    /// Set one field on the draft
    DraftFieldChanged(DraftField, String),
    /// Clear the draft and leave edit mode
    ResetDraft,

    // ===== Record Action Messages =====
    /// Load a record of the active collection into the draft
    BeginEdit(String),
    /// Validate and create/update the draft
    SubmitDraft,
    /// Delete a record of the active collection
    DeleteRecord(String),
    /// Reload the active collection
    Refresh,
    /// Add or remove related ids on one record
    Link {
        action: LinkAction,
        relation: Relation,
        owner_id: String,
        ids: Vec<String>,
    },

    // ===== Async Operation Results =====
    /// Collection listing completed
    Loaded(RecordKind, Result<Vec<Record>, String>),
    /// Create or update completed
    Saved(RecordKind, Result<Record, String>),
    /// Deletion completed
    Deleted(RecordKind, String, Result<(), DeleteFailure>),
    /// Link change completed; carries the updated owner record
    Linked(Relation, Result<Record, String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Add,
    Remove,
}

/// Why a delete did not go through.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteFailure {
    /// The backend no longer has the record
    NotFound,
    Failed(String),
}

/// Backend work a store operation asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    List(RecordKind),
    Create(Record),
    Update { id: String, record: Record },
    Delete { kind: RecordKind, id: String },
    Link {
        action: LinkAction,
        relation: Relation,
        owner_id: String,
        ids: Vec<String>,
    },
}

impl Request {
    pub fn kind(&self) -> RecordKind {
        match self {
            Request::List(kind) => *kind,
            Request::Create(record) => record.kind(),
            Request::Update { record, .. } => record.kind(),
            Request::Delete { kind, .. } => *kind,
            Request::Link { relation, .. } => relation.owner(),
        }
    }
}
