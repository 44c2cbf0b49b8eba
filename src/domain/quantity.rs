//! Quantity text parsing
//!
//! Adding an item is strict: the quantity text must be a non-negative
//! integer or the add is rejected. Committing an inline edit is lenient:
//! anything unparseable becomes [`FALLBACK_QUANTITY`].

use thiserror::Error;

/// Quantity used when an edited quantity cannot be parsed
pub const FALLBACK_QUANTITY: u32 = 1;

/// Input rejected before an item is created
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Item name must not be blank")]
    BlankName,

    #[error("Invalid quantity '{0}': expected a non-negative whole number")]
    InvalidQuantity(String),
}

/// Parses quantity text for a new item
pub fn parse_strict(text: &str) -> Result<u32, ValidationError> {
    text.trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidQuantity(text.to_string()))
}

/// Parses quantity text from the inline editor, falling back to 1
pub fn parse_lenient(text: &str) -> u32 {
    parse_strict(text).unwrap_or(FALLBACK_QUANTITY)
}
