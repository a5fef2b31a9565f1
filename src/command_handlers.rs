//! Command handlers module
//!
//! Executes the backend work the record store asks for and turns each result
//! into the completion message the store folds back in.

use log::info;

use crate::error::AppError;
use crate::gateway::Gateway;
use crate::messages::{DeleteFailure, LinkAction, Message, Request};
use crate::utils::logging;

/// A completed request: the message for the store, plus the error that
/// caused a failure so callers can report it.
#[derive(Debug)]
pub struct Outcome {
    pub message: Message,
    pub error: Option<AppError>,
}

impl Outcome {
    fn ok(message: Message) -> Self {
        Self {
            message,
            error: None,
        }
    }

    fn failed(message: Message, error: AppError) -> Self {
        Self {
            message,
            error: Some(error),
        }
    }
}

pub struct CommandHandlers<G: Gateway> {
    gateway: G,
}

impl<G: Gateway> CommandHandlers<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn execute(&self, request: Request) -> Outcome {
        let kind = request.kind();
        match request {
            Request::List(kind) => match self.gateway.list(kind).await {
                Ok(records) => {
                    info!("Fetched {} {}", records.len(), kind.segment());
                    Outcome::ok(Message::Loaded(kind, Ok(records)))
                }
                Err(e) => {
                    logging::log_gateway_failure("list", kind, &e);
                    Outcome::failed(Message::Loaded(kind, Err(e.to_safe_string())), e)
                }
            },
            Request::Create(record) => match self.gateway.create(&record).await {
                Ok(created) => {
                    info!("Created {} {}", kind.segment(), created.id());
                    Outcome::ok(Message::Saved(kind, Ok(created)))
                }
                Err(e) => {
                    logging::log_gateway_failure("create", kind, &e);
                    Outcome::failed(Message::Saved(kind, Err(e.to_safe_string())), e)
                }
            },
            Request::Update { id, record } => match self.gateway.update(&id, &record).await {
                Ok(updated) => {
                    info!("Updated {} {}", kind.segment(), id);
                    Outcome::ok(Message::Saved(kind, Ok(updated)))
                }
                Err(e) => {
                    logging::log_gateway_failure("update", kind, &e);
                    Outcome::failed(Message::Saved(kind, Err(e.to_safe_string())), e)
                }
            },
            Request::Delete { kind, id } => match self.gateway.delete(kind, &id).await {
                Ok(()) => {
                    info!("Deleted {} {}", kind.segment(), id);
                    Outcome::ok(Message::Deleted(kind, id, Ok(())))
                }
                Err(e) if e.is_not_found() => {
                    info!("{} {} not found on delete", kind.segment(), id);
                    Outcome::failed(Message::Deleted(kind, id, Err(DeleteFailure::NotFound)), e)
                }
                Err(e) => {
                    logging::log_gateway_failure("delete", kind, &e);
                    let failure = DeleteFailure::Failed(e.to_safe_string());
                    Outcome::failed(Message::Deleted(kind, id, Err(failure)), e)
                }
            },
            Request::Link {
                action,
                relation,
                owner_id,
                ids,
            } => {
                let result = match action {
                    LinkAction::Add => self.gateway.link(relation, &owner_id, &ids).await,
                    LinkAction::Remove => self.gateway.unlink(relation, &owner_id, &ids).await,
                };
                match result {
                    Ok(owner) => {
                        info!("{:?} {} on {} {}", action, relation, kind.segment(), owner_id);
                        Outcome::ok(Message::Linked(relation, Ok(owner)))
                    }
                    Err(e) => {
                        logging::log_gateway_failure("link", kind, &e);
                        Outcome::failed(Message::Linked(relation, Err(e.to_safe_string())), e)
                    }
                }
            }
        }
    }
}
