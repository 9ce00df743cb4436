//! Money input normalization and display formatting.
//!
//! Amounts are held as `Decimal` with a dot separator internally. User input
//! may use either a comma or a dot as decimal separator; display always uses
//! a comma.

mod amount_normalizer;
mod display;

pub use amount_normalizer::{normalize_amount, normalize_non_negative_amount, validate_amount};
pub use display::{format_amount, format_currency, format_signed_currency};
