// file: src/attachment.rs
use serde::{Deserialize, Serialize};

use super::{Embedded, Meeting};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub meeting_id: String,

    #[serde(default, skip_serializing)]
    pub meetings: Vec<Embedded<Meeting>>,
}

impl Attachment {
    pub fn new(url: String, meeting_id: String) -> Self {
        Self {
            url,
            meeting_id,
            ..Default::default()
        }
    }
}
