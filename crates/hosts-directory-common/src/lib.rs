pub mod filter;
pub mod validation;

pub use filter::parse_group_filter;
pub use validation::{
    group_or_default, validate_length, validate_optional, validate_required, Field,
    ValidationError, ValidationResult, DEFAULT_GROUP,
};
