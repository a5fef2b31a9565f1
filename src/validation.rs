//! Submit-time checks for each record kind.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::draft::Draft;
use crate::models::RecordKind;

pub const MAX_TITLE_LEN: usize = 2000;
pub const MAX_LOCATION_LEN: usize = 2000;
pub const MAX_DETAILS_LEN: usize = 10000;
pub const MAX_NAME_LEN: usize = 600;

lazy_static! {
    static ref DATE_TIME_RE: Regex =
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2} (AM|PM)$")
            .expect("date-time pattern is valid");
    static ref EMAIL_RE: Regex = Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid");
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title should not exceed {max} characters.")]
    TitleTooLong { max: usize },

    #[error("Date and time must be in YYYY-MM-DD HH:MM AM/PM form.")]
    InvalidDateTime,

    #[error("Location should not exceed {max} characters.")]
    LocationTooLong { max: usize },

    #[error("Details should not exceed {max} characters.")]
    DetailsTooLong { max: usize },

    #[error("Name should not exceed {max} characters.")]
    NameTooLong { max: usize },

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Attachment URL must start with http.")]
    InvalidUrl,
}

/// Length in UTF-16 code units, the unit form inputs count in.
fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn check_max(value: &str, max: usize, err: ValidationError) -> Result<(), ValidationError> {
    if text_len(value) > max {
        Err(err)
    } else {
        Ok(())
    }
}

pub fn is_valid_date_time(value: &str) -> bool {
    DATE_TIME_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Check the draft against the rules of `kind`, reporting the first failure.
pub fn validate(kind: RecordKind, draft: &Draft) -> Result<(), ValidationError> {
    match kind {
        RecordKind::Meeting => {
            check_max(
                &draft.title,
                MAX_TITLE_LEN,
                ValidationError::TitleTooLong { max: MAX_TITLE_LEN },
            )?;
            if !is_valid_date_time(&draft.date_time) {
                return Err(ValidationError::InvalidDateTime);
            }
            check_max(
                &draft.location,
                MAX_LOCATION_LEN,
                ValidationError::LocationTooLong { max: MAX_LOCATION_LEN },
            )?;
            check_max(
                &draft.details,
                MAX_DETAILS_LEN,
                ValidationError::DetailsTooLong { max: MAX_DETAILS_LEN },
            )
        }
        RecordKind::Calendar => {
            check_max(
                &draft.title,
                MAX_TITLE_LEN,
                ValidationError::TitleTooLong { max: MAX_TITLE_LEN },
            )?;
            check_max(
                &draft.details,
                MAX_DETAILS_LEN,
                ValidationError::DetailsTooLong { max: MAX_DETAILS_LEN },
            )
        }
        RecordKind::Participant => {
            check_max(
                &draft.name,
                MAX_NAME_LEN,
                ValidationError::NameTooLong { max: MAX_NAME_LEN },
            )?;
            if !is_valid_email(&draft.email) {
                return Err(ValidationError::InvalidEmail);
            }
            Ok(())
        }
        RecordKind::Attachment => {
            if draft.url.starts_with("http") {
                Ok(())
            } else {
                Err(ValidationError::InvalidUrl)
            }
        }
    }
}
