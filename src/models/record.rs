// file: src/record.rs
use serde::Serialize;
use serde_json::Value;

use super::{Attachment, Calendar, Meeting, Participant, RecordKind};

/// One persisted record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Meeting(Meeting),
    Calendar(Calendar),
    Participant(Participant),
    Attachment(Attachment),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Meeting(_) => RecordKind::Meeting,
            Record::Calendar(_) => RecordKind::Calendar,
            Record::Participant(_) => RecordKind::Participant,
            Record::Attachment(_) => RecordKind::Attachment,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::Meeting(m) => &m.id,
            Record::Calendar(c) => &c.id,
            Record::Participant(p) => &p.id,
            Record::Attachment(a) => &a.id,
        }
    }

    pub fn with_id(mut self, id: String) -> Self {
        match &mut self {
            Record::Meeting(m) => m.id = id,
            Record::Calendar(c) => c.id = id,
            Record::Participant(p) => p.id = id,
            Record::Attachment(a) => a.id = id,
        }
        self
    }

    /// Decode a backend JSON object as a record of `kind`.
    pub fn from_json(kind: RecordKind, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            RecordKind::Meeting => Record::Meeting(serde_json::from_value(value)?),
            RecordKind::Calendar => Record::Calendar(serde_json::from_value(value)?),
            RecordKind::Participant => Record::Participant(serde_json::from_value(value)?),
            RecordKind::Attachment => Record::Attachment(serde_json::from_value(value)?),
        })
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
