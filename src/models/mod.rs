// file: src/models.rs

// Declare modules
pub mod attachment;
pub mod calendar;
pub mod embedded;
pub mod kind;
pub mod meeting;
pub mod participant;
pub mod record;
pub mod relation;

// Flatten so callers can `use crate::models::Meeting`.
pub use attachment::Attachment;
pub use calendar::Calendar;
pub use embedded::Embedded;
pub use kind::RecordKind;
pub use meeting::Meeting;
pub use participant::Participant;
pub use record::Record;
pub use relation::Relation;
