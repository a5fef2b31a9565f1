// file: src/relation.rs
use std::fmt;
use std::str::FromStr;

use super::RecordKind;

/// A many-side relation edited through `/{owner}/{id}/{relation}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    MeetingParticipants,
    MeetingAttachments,
    CalendarMeetings,
}

impl Relation {
    pub const ALL: [Relation; 3] = [
        Relation::MeetingParticipants,
        Relation::MeetingAttachments,
        Relation::CalendarMeetings,
    ];

    /// Kind of the record whose endpoint carries the relation
    pub fn owner(&self) -> RecordKind {
        match self {
            Relation::MeetingParticipants | Relation::MeetingAttachments => RecordKind::Meeting,
            Relation::CalendarMeetings => RecordKind::Calendar,
        }
    }

    /// Kind of the records being linked
    pub fn target(&self) -> RecordKind {
        match self {
            Relation::MeetingParticipants => RecordKind::Participant,
            Relation::MeetingAttachments => RecordKind::Attachment,
            Relation::CalendarMeetings => RecordKind::Meeting,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.owner().segment(), self.target().segment())
    }
}

/// Parses the linked kind: `participants`, `attachments` or `meetings`.
impl FromStr for Relation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let target: RecordKind = s.parse()?;
        Relation::ALL
            .into_iter()
            .find(|relation| relation.target() == target)
            .ok_or_else(|| format!("{} cannot be linked", target.segment()))
    }
}
