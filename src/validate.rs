//! Checks a generated region against the limits the downstream client enforces
//! before it accepts a region.

use std::collections::HashSet;

use thiserror::Error;

use crate::dataset::Region;

const MAX_NAME_LENGTH: usize = 64;
const MAX_DESCRIPTION_LENGTH: usize = 512;
const MAX_CONTACT_LENGTH: usize = 128;
const MAX_OWNER_LENGTH: usize = 64;
const MAX_ID_LENGTH: usize = 64;
const MAX_CHUNKS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("id must be 1-64 letters, digits, hyphens or underscores")]
    BadId,
    #[error("{field} cannot be blank")]
    Blank { field: &'static str },
    #[error("{field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} contains control characters")]
    ControlCharacters { field: &'static str },
    #[error("region has no chunks")]
    NoChunks,
    #[error("region has {count} chunks, the limit is {max}")]
    TooManyChunks { count: usize, max: usize },
    #[error("region lists {0} duplicate chunks")]
    DuplicateChunks(usize),
}

pub fn validate_region(region: &Region) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let id = region.id.to_string();
    if id.is_empty()
        || id.len() > MAX_ID_LENGTH
        || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        errors.push(ValidationError::BadId);
    }

    check_text(&mut errors, "name", &region.name, MAX_NAME_LENGTH, true);
    check_text(
        &mut errors,
        "description",
        &region.description,
        MAX_DESCRIPTION_LENGTH,
        false,
    );
    check_text(
        &mut errors,
        "owner",
        &region.owner.to_string(),
        MAX_OWNER_LENGTH,
        true,
    );
    check_text(&mut errors, "contact", &region.contact, MAX_CONTACT_LENGTH, false);
    if region.world.trim().is_empty() {
        errors.push(ValidationError::Blank { field: "world" });
    }

    match region.chunks.len() {
        0 => errors.push(ValidationError::NoChunks),
        n if n > MAX_CHUNKS => errors.push(ValidationError::TooManyChunks {
            count: n,
            max: MAX_CHUNKS,
        }),
        n => {
            let unique = region.chunks.iter().collect::<HashSet<_>>().len();
            if unique != n {
                errors.push(ValidationError::DuplicateChunks(n - unique));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_text(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    text: &str,
    max: usize,
    required: bool,
) {
    if required && text.trim().is_empty() {
        errors.push(ValidationError::Blank { field });
    } else if text.chars().count() > max {
        errors.push(ValidationError::TooLong { field, max });
    } else if text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
    {
        errors.push(ValidationError::ControlCharacters { field });
    }
}
