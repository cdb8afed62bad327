use crate::api::error::AppError;

/// Turns an uploaded file name into an object key: whitespace runs become a
/// single hyphen, anything outside `[a-zA-Z0-9.-]` is dropped, and the result
/// is lowercased.
pub fn sanitize_object_key(file_name: &str) -> String {
    let mut key = String::with_capacity(file_name.len());
    let mut in_whitespace = false;

    for c in file_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                key.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
            key.push(c.to_ascii_lowercase());
        }
    }

    key
}

/// Trims a required text field, rejecting values that are blank.
pub fn required_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Rejects NaN, infinities and negative amounts.
pub fn non_negative_amount(field: &str, value: f64) -> Result<f64, AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::BadRequest(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(value)
}
