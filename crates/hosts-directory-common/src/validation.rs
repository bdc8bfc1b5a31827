use thiserror::Error;

/// Group assigned to a host record when the caller does not name one
pub const DEFAULT_GROUP: &str = "default_group";

pub const MAX_IP_ADDR_LEN: usize = 32;
pub const MAX_DOMAIN_LEN: usize = 100;
pub const MAX_HOSTS_GROUP_LEN: usize = 32;
pub const MAX_REMARK_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Host record fields subject to column limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    IpAddr,
    Domain,
    HostsGroup,
    Remark,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::IpAddr => "ip_addr",
            Field::Domain => "domain",
            Field::HostsGroup => "hosts_group",
            Field::Remark => "remark",
        }
    }

    pub fn max_len(self) -> usize {
        match self {
            Field::IpAddr => MAX_IP_ADDR_LEN,
            Field::Domain => MAX_DOMAIN_LEN,
            Field::HostsGroup => MAX_HOSTS_GROUP_LEN,
            Field::Remark => MAX_REMARK_LEN,
        }
    }
}

/// Checks a field against its column limit. Length is counted in characters,
/// not bytes, so multi-byte remarks get the full allowance.
pub fn validate_length(field: Field, value: &str) -> ValidationResult<()> {
    if value.chars().count() > field.max_len() {
        return Err(ValidationError::TooLong {
            field: field.name(),
            max: field.max_len(),
        });
    }
    Ok(())
}

/// Checks a field that must be present and non-empty
pub fn validate_required(field: Field, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::MissingField(field.name()));
    }
    validate_length(field, value)
}

/// Checks an optional field; empty values pass since they mean "not supplied"
pub fn validate_optional(field: Field, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Ok(());
    }
    validate_length(field, value)
}

/// Resolves the group for a new record, falling back to [`DEFAULT_GROUP`]
pub fn group_or_default(group: &str) -> &str {
    if group.is_empty() {
        DEFAULT_GROUP
    } else {
        group
    }
}
