//! Reverse zone name derivation
//!
//! Maps an IP address to the (zone name, record name) pair used by the
//! reverse-lookup naming convention: `in-addr.arpa` for IPv4 and
//! `ip6.arpa` for IPv6.
//!
//! ## Split
//!
//! - IPv4: the last octet identifies the host, the remaining three
//!   reversed octets name the /24 zone.
//!   `192.0.2.5` → record `5`, zone `2.0.192.in-addr.arpa`
//! - IPv6: the 32 reversed nibbles are split in half, the first 16
//!   identify the host, the remaining 16 name the /64 zone.

use std::net::IpAddr;

/// Suffix for IPv4 reverse zones
const IN_ADDR_ARPA: &str = "in-addr.arpa";

/// Suffix for IPv6 reverse zones
const IP6_ARPA: &str = "ip6.arpa";

/// Derived reverse-DNS names for a single IP address
///
/// Both fields are non-empty and carry no leading or trailing dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseName {
    /// Reverse zone name, e.g. `2.0.192.in-addr.arpa`
    pub zone: String,
    /// Host-part label(s) within the zone, e.g. `5`
    pub record: String,
}

impl ReverseName {
    /// Derive the reverse zone and record names for an IP address
    ///
    /// This never fails: every valid `IpAddr` has a well-defined
    /// reverse name.
    pub fn derive(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => {
                let [a, b, c, d] = v4.octets();
                Self {
                    zone: format!("{c}.{b}.{a}.{IN_ADDR_ARPA}"),
                    record: d.to_string(),
                }
            }
            IpAddr::V6(v6) => {
                // Low nibble of the last byte comes first in ip6.arpa order.
                let nibbles: Vec<String> = v6
                    .octets()
                    .iter()
                    .rev()
                    .flat_map(|byte| [byte & 0x0f, byte >> 4])
                    .map(|n| format!("{n:x}"))
                    .collect();

                Self {
                    zone: format!("{}.{IP6_ARPA}", nibbles[16..].join(".")),
                    record: nibbles[..16].join("."),
                }
            }
        }
    }
}
