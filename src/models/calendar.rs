// file: src/calendar.rs
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Embedded, Meeting};
use crate::utils::{join_ids, split_ids};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: String,
    /// Comma-separated meeting ids, not checked against the meetings collection.
    /// Sent and received as a JSON array of ids.
    #[serde(
        default,
        serialize_with = "serialize_id_list",
        deserialize_with = "deserialize_id_list"
    )]
    pub meeting_ids: String,

    #[serde(default, skip_serializing)]
    pub meetings: Vec<Embedded<Meeting>>,
}

impl Calendar {
    pub fn new(title: String, details: String) -> Self {
        Self {
            title,
            details,
            ..Default::default()
        }
    }

    pub fn meeting_id_list(&self) -> Vec<String> {
        split_ids(&self.meeting_ids)
    }
}

fn serialize_id_list<S: Serializer>(text: &str, serializer: S) -> Result<S::Ok, S::Error> {
    split_ids(text).serialize(serializer)
}

/// Older payloads carried the ids as one comma-separated string.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdList {
    List(Vec<String>),
    Text(String),
}

fn deserialize_id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<IdList>::deserialize(deserializer)? {
        Some(IdList::List(ids)) => join_ids(&ids),
        Some(IdList::Text(text)) => join_ids(&split_ids(&text)),
        None => String::new(),
    })
}
