//! Utility functions used across the workspace

use crate::{PageviewsError, Result};
use chrono::NaiveDate;

/// Drops the trailing hour digits of a `YYYYMMDDHH` timestamp.
pub fn month_label(timestamp: &str) -> &str {
    timestamp
        .get(..timestamp.len().saturating_sub(2))
        .unwrap_or(timestamp)
}

/// Parses a `YYYYMMDD` month label into a calendar date.
pub fn parse_month_label(label: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(label, "%Y%m%d").map_err(|e| {
        PageviewsError::Validation {
            message: format!("'{label}' is not a YYYYMMDD date: {e}"),
            field: Some("timestamp".to_string()),
        }
    })
}

/// Checks that `value` is a `YYYYMMDDHH` timestamp naming a real day.
pub fn validate_timestamp(value: &str, field_name: &str) -> Result<()> {
    if value.len() != 10 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PageviewsError::validation_field(
            format!("{field_name} must be a 10 digit YYYYMMDDHH timestamp, got '{value}'"),
            field_name,
        ));
    }
    parse_month_label(month_label(value))
        .map(|_| ())
        .map_err(|_| {
            PageviewsError::validation_field(
                format!("{field_name} '{value}' is not a calendar date"),
                field_name,
            )
        })
}

/// Validate that a string is not empty after trimming
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(PageviewsError::validation_field(
            format!("{field_name} cannot be empty"),
            field_name,
        ))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Arithmetic mean, `None` for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: f64 = values.iter().map(|&v| v as f64).sum();
    Some(total / values.len() as f64)
}
