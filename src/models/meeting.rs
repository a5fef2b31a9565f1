// file: src/meeting.rs
use serde::{Deserialize, Serialize};

use super::{Attachment, Calendar, Embedded, Participant};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// `YYYY-MM-DD HH:MM AM|PM`
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub details: String,

    // Embedded by list responses for display only; never written back.
    #[serde(default, skip_serializing)]
    pub calendars: Vec<Embedded<Calendar>>,
    #[serde(default, skip_serializing)]
    pub participants: Vec<Embedded<Participant>>,
    #[serde(default, skip_serializing)]
    pub attachments: Vec<Embedded<Attachment>>,
}

impl Meeting {
    pub fn new(title: String, date_time: String, location: String, details: String) -> Self {
        Self {
            title,
            date_time,
            location,
            details,
            ..Default::default()
        }
    }
}
