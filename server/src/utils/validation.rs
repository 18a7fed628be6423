use crate::utils::error::AppError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

pub fn validate_rating(rating: u8) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Rejects blank values for a required form field.
pub fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("'{field}' is required")));
    }
    Ok(())
}

pub fn require_category(value: &str, allowed: &[&str]) -> Result<(), AppError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "Unknown category '{value}', expected one of: {}",
            allowed.join(", ")
        )))
    }
}
