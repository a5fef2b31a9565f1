use uuid::Uuid;

pub mod logging;

/// Fresh identifier for a record created without one.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Split comma-separated relationship ids, dropping blanks.
pub fn split_ids(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|id| id.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}
