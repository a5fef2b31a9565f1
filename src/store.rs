//! Record store
//!
//! Owns the four collections, the draft and the edit state. The store never
//! talks to the network itself: operations that need the backend return a
//! [`Request`], and the outcome is fed back through [`RecordStore::apply`].
//! Completions are applied in arrival order with no staleness check, so a
//! late listing for a tab the user already left still replaces that
//! collection.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::HashMap;

use crate::draft::{Draft, DraftField};
use crate::messages::{DeleteFailure, LinkAction, Message, Request};
use crate::models::{Attachment, Calendar, Meeting, Participant, Record, RecordKind, Relation};
use crate::utils::{generate_id, logging};
use crate::validation::{self, ValidationError};

/// Where the draft is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    /// Composing a new record (or nothing at all)
    Idle,
    /// Draft was loaded from an existing record
    Editing,
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    active: RecordKind,
    collections: HashMap<RecordKind, Vec<Record>>,
    draft: Draft,
    /// Id of the record being edited. Applies to whichever tab is active at
    /// submit time.
    editing: Option<String>,
    status: String,
    last_error: Option<String>,
    pending: usize,
    last_refresh: Option<DateTime<Utc>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            active: RecordKind::default(),
            collections: RecordKind::ALL.into_iter().map(|k| (k, Vec::new())).collect(),
            draft: Draft::default(),
            editing: None,
            status: "Ready".to_string(),
            last_error: None,
            pending: 0,
            last_refresh: None,
        }
    }

    // --- Accessors ---

    pub fn active_tab(&self) -> RecordKind {
        self.active
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_state(&self) -> DraftState {
        if self.editing.is_some() {
            DraftState::Editing
        } else {
            DraftState::Idle
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn records(&self, kind: RecordKind) -> &[Record] {
        self.collections.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_records(&self) -> &[Record] {
        self.records(self.active)
    }

    pub fn len(&self, kind: RecordKind) -> usize {
        self.records(kind).len()
    }

    pub fn find(&self, kind: RecordKind, id: &str) -> Option<&Record> {
        self.records(kind).iter().find(|r| r.id() == id)
    }

    pub fn meetings(&self) -> impl Iterator<Item = &Meeting> {
        self.records(RecordKind::Meeting).iter().filter_map(|r| match r {
            Record::Meeting(m) => Some(m),
            _ => None,
        })
    }

    pub fn calendars(&self) -> impl Iterator<Item = &Calendar> {
        self.records(RecordKind::Calendar).iter().filter_map(|r| match r {
            Record::Calendar(c) => Some(c),
            _ => None,
        })
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.records(RecordKind::Participant)
            .iter()
            .filter_map(|r| match r {
                Record::Participant(p) => Some(p),
                _ => None,
            })
    }

    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.records(RecordKind::Attachment)
            .iter()
            .filter_map(|r| match r {
                Record::Attachment(a) => Some(a),
                _ => None,
            })
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    // --- Operations ---

    /// Switch tabs. The draft and edit state are left alone.
    pub fn select_tab(&mut self, kind: RecordKind) -> Request {
        if self.editing.is_some() && kind != self.active {
            debug!(
                "Switching from {} to {} while editing; draft kept",
                self.active, kind
            );
        }
        self.active = kind;
        self.issue(Request::List(kind))
    }

    pub fn refresh(&mut self) -> Request {
        self.issue(Request::List(self.active))
    }

    pub fn update_draft_field(&mut self, field: DraftField, value: String) {
        self.draft.set(field, value);
    }

    /// Load a record of the active collection into the draft. Returns false,
    /// leaving everything untouched, when the id is unknown.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(record) = self.find(self.active, id) else {
            warn!("No {} record with id {} to edit", self.active.segment(), id);
            return false;
        };
        let draft = Draft::from_record(record);
        self.draft = draft;
        self.editing = Some(id.to_string());
        true
    }

    /// Validate the draft for the active tab and produce the create or update.
    ///
    /// The draft is kept until the backend confirms; see [`RecordStore::apply`].
    pub fn submit_draft(&mut self) -> Result<Request, ValidationError> {
        let kind = self.active;
        if let Err(err) = validation::validate(kind, &self.draft) {
            logging::log_validation_rejected(kind, &err);
            self.fail(err.to_string());
            return Err(err);
        }

        let request = match &self.editing {
            Some(id) => Request::Update {
                id: id.clone(),
                record: self.draft.to_record(kind, id.clone()),
            },
            None => {
                let id = match self.draft.id.trim() {
                    "" => generate_id(),
                    given => given.to_string(),
                };
                Request::Create(self.draft.to_record(kind, id))
            }
        };
        Ok(self.issue(request))
    }

    /// Ask for a delete in the active collection. Unknown ids are a no-op.
    pub fn delete_record(&mut self, id: &str) -> Option<Request> {
        if self.find(self.active, id).is_none() {
            info!("Ignoring delete of unknown {} id {}", self.active.segment(), id);
            self.status = format!("No {} record with id {}", self.active.label(), id);
            return None;
        }
        Some(self.issue(Request::Delete {
            kind: self.active,
            id: id.to_string(),
        }))
    }

    /// Add or remove related ids on an owner record. Works from any tab.
    pub fn link(
        &mut self,
        action: LinkAction,
        relation: Relation,
        owner_id: &str,
        ids: Vec<String>,
    ) -> Request {
        self.issue(Request::Link {
            action,
            relation,
            owner_id: owner_id.to_string(),
            ids,
        })
    }

    pub fn reset_draft(&mut self) {
        self.draft = Draft::default();
        self.editing = None;
    }

    /// Drive the store with any message, returning follow-up backend work.
    pub fn handle(&mut self, message: Message) -> Option<Request> {
        match message {
            Message::SelectTab(kind) => Some(self.select_tab(kind)),
            Message::DraftFieldChanged(field, value) => {
                self.update_draft_field(field, value);
                None
            }
            Message::ResetDraft => {
                self.reset_draft();
                None
            }
            Message::BeginEdit(id) => {
                self.begin_edit(&id);
                None
            }
            Message::SubmitDraft => self.submit_draft().ok(),
            Message::DeleteRecord(id) => self.delete_record(&id),
            Message::Refresh => Some(self.refresh()),
            Message::Link {
                action,
                relation,
                owner_id,
                ids,
            } => Some(self.link(action, relation, &owner_id, ids)),
            completion => self.apply(completion),
        }
    }

    /// Fold an async completion into the store.
    pub fn apply(&mut self, message: Message) -> Option<Request> {
        match message {
            Message::Loaded(kind, result) => {
                self.settle();
                match result {
                    Ok(records) => {
                        self.replace(kind, records);
                        self.last_refresh = Some(Utc::now());
                        self.last_error = None;
                        self.status = format!("Loaded {} {}", self.len(kind), kind.segment());
                    }
                    Err(err) => self.fail(format!("Error fetching {}: {}", kind.segment(), err)),
                }
                None
            }
            Message::Saved(kind, result) => {
                self.settle();
                match result {
                    Ok(record) => {
                        self.status = if self.editing.is_some() {
                            format!("Saved changes to {}", record.id())
                        } else {
                            format!("Created {}", record.id())
                        };
                        self.last_error = None;
                        self.reset_draft();
                        Some(self.issue(Request::List(kind)))
                    }
                    Err(err) => {
                        self.fail(format!("Could not save {}: {}", kind.segment(), err));
                        None
                    }
                }
            }
            Message::Deleted(kind, id, result) => {
                self.settle();
                match result {
                    Ok(()) => {
                        self.status = format!("Deleted {}", id);
                        self.last_error = None;
                        Some(self.issue(Request::List(kind)))
                    }
                    Err(DeleteFailure::NotFound) => {
                        info!("{} {} was already gone", kind.segment(), id);
                        self.status = format!("No {} record with id {}", kind.label(), id);
                        None
                    }
                    Err(DeleteFailure::Failed(err)) => {
                        self.fail(format!("Could not delete {}: {}", id, err));
                        None
                    }
                }
            }
            Message::Linked(relation, result) => {
                self.settle();
                match result {
                    Ok(owner) => {
                        self.status = format!(
                            "Updated {} on {} {}",
                            relation.target().segment(),
                            relation.owner().segment().trim_end_matches('s'),
                            owner.id()
                        );
                        self.last_error = None;
                        Some(self.issue(Request::List(relation.owner())))
                    }
                    Err(err) => {
                        self.fail(format!("Could not update {}: {}", relation, err));
                        None
                    }
                }
            }
            other => self.handle(other),
        }
    }

    fn replace(&mut self, kind: RecordKind, records: Vec<Record>) {
        let (matching, stray): (Vec<_>, Vec<_>) =
            records.into_iter().partition(|r| r.kind() == kind);
        if !stray.is_empty() {
            warn!(
                "Dropped {} records of the wrong kind from {} listing",
                stray.len(),
                kind.segment()
            );
        }
        self.collections.insert(kind, matching);
    }

    fn issue(&mut self, request: Request) -> Request {
        self.pending += 1;
        request
    }

    fn settle(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    fn fail(&mut self, message: String) {
        self.status = message.clone();
        self.last_error = Some(message);
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
