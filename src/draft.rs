//! The single in-progress form record.
//!
//! One draft is shared by every tab. Each record kind reads only the fields
//! listed by [`RecordKind::fields`], so switching tabs keeps whatever was typed.

use std::fmt;
use std::str::FromStr;

use crate::models::{Attachment, Calendar, Meeting, Participant, Record, RecordKind};

/// A named text slot on the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Id,
    Title,
    DateTime,
    Location,
    Details,
    MeetingIds,
    Name,
    Email,
    Url,
    MeetingId,
}

impl DraftField {
    pub const ALL: [DraftField; 10] = [
        DraftField::Id,
        DraftField::Title,
        DraftField::DateTime,
        DraftField::Location,
        DraftField::Details,
        DraftField::MeetingIds,
        DraftField::Name,
        DraftField::Email,
        DraftField::Url,
        DraftField::MeetingId,
    ];

    /// Wire name, matching the JSON field
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Id => "id",
            DraftField::Title => "title",
            DraftField::DateTime => "dateTime",
            DraftField::Location => "location",
            DraftField::Details => "details",
            DraftField::MeetingIds => "meetingIds",
            DraftField::Name => "name",
            DraftField::Email => "email",
            DraftField::Url => "url",
            DraftField::MeetingId => "meetingId",
        }
    }

    /// Form placeholder text
    pub fn placeholder(&self) -> &'static str {
        match self {
            DraftField::Id => "UUID (blank to generate)",
            DraftField::Title => "Title (max 2000 characters)",
            DraftField::DateTime => "Date and Time (YYYY-MM-DD HH:MM AM/PM)",
            DraftField::Location => "Location (max 2000 characters)",
            DraftField::Details => "Details (max 10000 characters)",
            DraftField::MeetingIds => "Meeting IDs (comma-separated)",
            DraftField::Name => "Name (max 600 characters)",
            DraftField::Email => "Email",
            DraftField::Url => "Attachment URL",
            DraftField::MeetingId => "Associated Meeting ID",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DraftField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub id: String,
    pub title: String,
    pub date_time: String,
    pub location: String,
    pub details: String,
    pub meeting_ids: String,
    pub name: String,
    pub email: String,
    pub url: String,
    pub meeting_id: String,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Id => &self.id,
            DraftField::Title => &self.title,
            DraftField::DateTime => &self.date_time,
            DraftField::Location => &self.location,
            DraftField::Details => &self.details,
            DraftField::MeetingIds => &self.meeting_ids,
            DraftField::Name => &self.name,
            DraftField::Email => &self.email,
            DraftField::Url => &self.url,
            DraftField::MeetingId => &self.meeting_id,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::Id => &mut self.id,
            DraftField::Title => &mut self.title,
            DraftField::DateTime => &mut self.date_time,
            DraftField::Location => &mut self.location,
            DraftField::Details => &mut self.details,
            DraftField::MeetingIds => &mut self.meeting_ids,
            DraftField::Name => &mut self.name,
            DraftField::Email => &mut self.email,
            DraftField::Url => &mut self.url,
            DraftField::MeetingId => &mut self.meeting_id,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        *self == Draft::default()
    }

    /// Load an existing record into a fresh draft.
    pub fn from_record(record: &Record) -> Self {
        match record {
            Record::Meeting(m) => Self {
                id: m.id.clone(),
                title: m.title.clone(),
                date_time: m.date_time.clone(),
                location: m.location.clone(),
                details: m.details.clone(),
                ..Default::default()
            },
            Record::Calendar(c) => Self {
                id: c.id.clone(),
                title: c.title.clone(),
                details: c.details.clone(),
                meeting_ids: c.meeting_ids.clone(),
                ..Default::default()
            },
            Record::Participant(p) => Self {
                id: p.id.clone(),
                name: p.name.clone(),
                email: p.email.clone(),
                meeting_id: p.meeting_id.clone(),
                ..Default::default()
            },
            Record::Attachment(a) => Self {
                id: a.id.clone(),
                url: a.url.clone(),
                meeting_id: a.meeting_id.clone(),
                ..Default::default()
            },
        }
    }

    /// Build the record of `kind` this draft describes, carrying `id`.
    pub fn to_record(&self, kind: RecordKind, id: String) -> Record {
        match kind {
            RecordKind::Meeting => Record::Meeting(Meeting {
                id,
                title: self.title.clone(),
                date_time: self.date_time.clone(),
                location: self.location.clone(),
                details: self.details.clone(),
                ..Default::default()
            }),
            RecordKind::Calendar => Record::Calendar(Calendar {
                id,
                title: self.title.clone(),
                details: self.details.clone(),
                meeting_ids: self.meeting_ids.clone(),
                ..Default::default()
            }),
            RecordKind::Participant => Record::Participant(Participant {
                id,
                name: self.name.clone(),
                email: self.email.clone(),
                meeting_id: self.meeting_id.clone(),
            }),
            RecordKind::Attachment => Record::Attachment(Attachment {
                id,
                url: self.url.clone(),
                meeting_id: self.meeting_id.clone(),
                ..Default::default()
            }),
        }
    }
}
