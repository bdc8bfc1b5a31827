//! Hosts-file text rendering
//!
//! Output is one line per record, two columns separated by two tabs:
//!
//! ```text
//! 10.0.0.5		nas.local
//! ```
//!
//! Values are written as stored; nothing is escaped or validated here.

use hosts_directory_storage::HostRecord;
use std::fmt::Write;

const COLUMN_SEPARATOR: &str = "\t\t";

/// Which column comes first on each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnOrder {
    /// `ip_addr`, then `domain` (standard hosts-file layout)
    #[default]
    IpThenDomain,
    /// `domain`, then `ip_addr`
    DomainThenIp,
}

impl ColumnOrder {
    /// Interpret the `ip_first` query parameter
    ///
    /// Only the exact value `"1"` flips the order. Despite its name the flag
    /// puts the domain in the first column; existing clients depend on this.
    pub fn from_ip_first_param(value: Option<&str>) -> Self {
        match value {
            Some("1") => ColumnOrder::DomainThenIp,
            _ => ColumnOrder::IpThenDomain,
        }
    }
}

/// Render records in hosts-file syntax, preserving their order
pub fn render_hosts(records: &[HostRecord], order: ColumnOrder) -> String {
    let mut out = String::new();
    for record in records {
        let (first, second) = match order {
            ColumnOrder::IpThenDomain => (&record.ip_addr, &record.domain),
            ColumnOrder::DomainThenIp => (&record.domain, &record.ip_addr),
        };
        // writing to a String cannot fail
        let _ = writeln!(out, "{}{}{}", first, COLUMN_SEPARATOR, second);
    }
    out
}
