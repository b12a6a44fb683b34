use crate::error::{Error, Result};

/// Returns the trimmed value, or a 400 naming the field when it is blank.
pub fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::BadRequest(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field, treating blank input as absent.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
