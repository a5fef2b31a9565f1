// file: src/kind.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::draft::DraftField;

/// The four record collections, one per tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Meeting,
    Calendar,
    Participant,
    Attachment,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Meeting,
        RecordKind::Calendar,
        RecordKind::Participant,
        RecordKind::Attachment,
    ];

    /// REST path segment for the collection
    pub fn segment(&self) -> &'static str {
        match self {
            RecordKind::Meeting => "meetings",
            RecordKind::Calendar => "calendars",
            RecordKind::Participant => "participants",
            RecordKind::Attachment => "attachments",
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Meeting => "Meetings",
            RecordKind::Calendar => "Calendars",
            RecordKind::Participant => "Participants",
            RecordKind::Attachment => "Attachments",
        }
    }

    /// Draft fields the form exposes for this kind, in display order.
    pub fn fields(&self) -> &'static [DraftField] {
        match self {
            RecordKind::Meeting => &[
                DraftField::Id,
                DraftField::Title,
                DraftField::DateTime,
                DraftField::Location,
                DraftField::Details,
            ],
            RecordKind::Calendar => &[
                DraftField::Id,
                DraftField::Title,
                DraftField::Details,
                DraftField::MeetingIds,
            ],
            RecordKind::Participant => &[
                DraftField::Id,
                DraftField::Name,
                DraftField::Email,
                DraftField::MeetingId,
            ],
            RecordKind::Attachment => &[DraftField::Id, DraftField::Url, DraftField::MeetingId],
        }
    }
}

impl Default for RecordKind {
    fn default() -> Self {
        RecordKind::Meeting
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        RecordKind::ALL
            .into_iter()
            .find(|kind| {
                lowered == kind.segment() || lowered == kind.segment().trim_end_matches('s')
            })
            .ok_or_else(|| format!("Unknown record kind: {}", s))
    }
}
