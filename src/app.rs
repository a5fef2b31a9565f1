//! Application session
//!
//! Owns the record store and the command handlers and runs each operation's
//! request chain (submit, save, reload) to the end. The view layer holds an
//! `App` and goes through it for every change.

use log::debug;

use crate::command_handlers::CommandHandlers;
use crate::draft::DraftField;
use crate::error::{AppError, AppResult};
use crate::gateway::Gateway;
use crate::messages::{LinkAction, Message, Request};
use crate::models::{RecordKind, Relation};
use crate::store::RecordStore;

pub struct App<G: Gateway> {
    store: RecordStore,
    handlers: CommandHandlers<G>,
}

impl<G: Gateway> App<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            store: RecordStore::new(),
            handlers: CommandHandlers::new(gateway),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        self.handlers.gateway()
    }

    /// Switch tabs and load the new collection.
    pub async fn select_tab(&mut self, kind: RecordKind) -> AppResult<()> {
        let request = self.store.select_tab(kind);
        self.run(request).await
    }

    pub async fn refresh(&mut self) -> AppResult<()> {
        let request = self.store.refresh();
        self.run(request).await
    }

    pub fn update_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.store.update_draft_field(field, value.into());
    }

    pub fn begin_edit(&mut self, id: &str) -> bool {
        self.store.begin_edit(id)
    }

    pub fn reset_draft(&mut self) {
        self.store.reset_draft();
    }

    /// Validate, then create or update, then reload the collection.
    pub async fn submit_draft(&mut self) -> AppResult<()> {
        let request = self.store.submit_draft()?;
        self.run(request).await
    }

    /// Delete from the active collection and reload. Unknown ids do nothing.
    pub async fn delete_record(&mut self, id: &str) -> AppResult<()> {
        match self.store.delete_record(id) {
            Some(request) => self.run(request).await,
            None => Ok(()),
        }
    }

    /// Change a relation on `owner_id`, then reload the owner's collection.
    pub async fn link(
        &mut self,
        action: LinkAction,
        relation: Relation,
        owner_id: &str,
        ids: Vec<String>,
    ) -> AppResult<()> {
        let request = self.store.link(action, relation, owner_id, ids);
        self.run(request).await
    }

    /// Route a view message through the store and run whatever it needs.
    pub async fn dispatch(&mut self, message: Message) -> AppResult<()> {
        if let Message::SubmitDraft = message {
            return self.submit_draft().await;
        }
        match self.store.handle(message) {
            Some(request) => self.run(request).await,
            None => Ok(()),
        }
    }

    /// Execute a request and every follow-up it triggers. The first failure
    /// is returned after the store has recorded it.
    async fn run(&mut self, request: Request) -> AppResult<()> {
        let mut next = Some(request);
        let mut first_error: Option<AppError> = None;

        while let Some(request) = next.take() {
            debug!("Running {:?}", request);
            let outcome = self.handlers.execute(request).await;
            next = self.store.apply(outcome.message);
            if first_error.is_none() {
                first_error = outcome.error;
            }
        }

        match first_error {
            // A delete the backend no longer knows about is a no-op.
            Some(err) if err.is_not_found() => Ok(()),
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
