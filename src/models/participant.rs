// file: src/participant.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub meeting_id: String,
}

impl Participant {
    pub fn new(name: String, email: String, meeting_id: String) -> Self {
        Self {
            id: String::new(),
            name,
            email,
            meeting_id,
        }
    }
}
