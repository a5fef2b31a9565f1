// file: src/embedded.rs
use serde::Deserialize;

/// One entry of an embedded relation array.
///
/// The backend serializes each entity in full the first time it appears in a
/// response and as its bare id after that.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Embedded<T> {
    Full(T),
    Ref(String),
}

impl<T> From<T> for Embedded<T> {
    fn from(item: T) -> Self {
        Embedded::Full(item)
    }
}
