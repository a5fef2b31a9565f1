// Meetbook Library
// Record store, sync gateway and relay server for meeting records

pub mod app;
pub mod command_handlers;
pub mod config;
pub mod draft;
pub mod error;
pub mod gateway;
pub mod http_config;
pub mod messages;
pub mod models;
pub mod relay;
pub mod store;
pub mod ui;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use app::App;
pub use draft::{Draft, DraftField};
pub use error::{AppError, AppResult};
pub use gateway::{Gateway, HttpGateway};
pub use messages::{LinkAction, Message, Request};
pub use models::*;
pub use store::{DraftState, RecordStore};
pub use validation::ValidationError;
