//! Domain types for storage layer

use chrono::{DateTime, SubsecRound, Utc};
use hosts_directory_common::{group_or_default, validate_optional, validate_required, Field};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::StorageError;

/// Strongly-typed host record identifier
///
/// Assigned by the database on insert and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(i64);

impl HostId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for HostId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Error returned when a string is not a valid [`HostId`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid host id {0:?}: expected an unsigned 32-bit integer")]
pub struct ParseHostIdError(String);

impl FromStr for HostId {
    type Err = ParseHostIdError;

    /// Path ids are plain decimal unsigned 32-bit values; a sign is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseHostIdError(s.to_string()));
        }
        s.parse::<u32>()
            .map(|id| Self(i64::from(id)))
            .map_err(|_| ParseHostIdError(s.to_string()))
    }
}

/// Opaque identifier of the caller performing a mutation
///
/// Supplied by whatever authenticates requests upstream; this crate never
/// verifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerId(i64);

impl CallerId {
    /// Unknown or system caller
    pub const ANONYMOUS: CallerId = CallerId(0);

    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row of the `sys_hosts` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    pub id: HostId,
    pub ip_addr: String,
    pub domain: String,
    pub hosts_group: String,
    pub remark: String,
    pub created_by: CallerId,
    pub created_time: DateTime<Utc>,
    pub updated_by: CallerId,
    pub updated_time: DateTime<Utc>,
}

/// Fields for a record about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHost {
    pub ip_addr: String,
    pub domain: String,
    /// Empty means [`hosts_directory_common::DEFAULT_GROUP`]
    pub hosts_group: String,
    pub remark: String,
    pub created_by: CallerId,
}

impl NewHost {
    pub fn new(ip_addr: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            ip_addr: ip_addr.into(),
            domain: domain.into(),
            hosts_group: String::new(),
            remark: String::new(),
            created_by: CallerId::ANONYMOUS,
        }
    }

    pub fn with_group(mut self, hosts_group: impl Into<String>) -> Self {
        self.hosts_group = hosts_group.into();
        self
    }

    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = remark.into();
        self
    }

    pub fn created_by(mut self, caller: CallerId) -> Self {
        self.created_by = caller;
        self
    }

    /// Validate fields and fill in the default group
    pub(crate) fn prepare(mut self) -> Result<Self, StorageError> {
        validate_required(Field::IpAddr, &self.ip_addr)?;
        validate_required(Field::Domain, &self.domain)?;
        validate_optional(Field::HostsGroup, &self.hosts_group)?;
        validate_optional(Field::Remark, &self.remark)?;
        self.hosts_group = group_or_default(&self.hosts_group).to_string();
        Ok(self)
    }
}

/// Partial update of a host record
///
/// `None` and `Some("")` both leave the stored value unchanged; there is no
/// way to clear a field to the empty string through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPatch {
    pub ip_addr: Option<String>,
    pub domain: Option<String>,
    pub hosts_group: Option<String>,
    pub remark: Option<String>,
    pub updated_by: CallerId,
}

impl HostPatch {
    pub(crate) fn validate(&self) -> Result<(), StorageError> {
        let fields = [
            (Field::IpAddr, &self.ip_addr),
            (Field::Domain, &self.domain),
            (Field::HostsGroup, &self.hosts_group),
            (Field::Remark, &self.remark),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                validate_optional(field, value)?;
            }
        }
        Ok(())
    }

    /// Apply supplied fields to `record` and stamp the update metadata.
    ///
    /// `updated_by` and `updated_time` are always refreshed, even when no
    /// field value changes.
    pub fn apply_to(&self, record: &mut HostRecord, now: DateTime<Utc>) {
        fn replace(target: &mut String, value: &Option<String>) {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                *target = value.to_string();
            }
        }

        replace(&mut record.ip_addr, &self.ip_addr);
        replace(&mut record.domain, &self.domain);
        replace(&mut record.hosts_group, &self.hosts_group);
        replace(&mut record.remark, &self.remark);
        record.updated_by = self.updated_by;
        record.updated_time = now;
    }
}

/// Filter for listing hosts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostFilter {
    /// Only return records whose `hosts_group` is one of these (None = all).
    /// An empty list matches nothing.
    pub groups: Option<Vec<String>>,
}

impl HostFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: Some(groups.into_iter().map(Into::into).collect()),
        }
    }

    /// Build a filter from a raw `hosts_groups` query value
    pub fn from_query(raw: &str) -> Self {
        Self {
            groups: hosts_directory_common::parse_group_filter(raw),
        }
    }
}

/// Current time at the precision every backend stores (microseconds)
pub(crate) fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
