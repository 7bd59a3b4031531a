//! IPv4 network specs and containment tests.

use std::fmt;
use std::net::Ipv4Addr;

/// An IPv4 network given as a base address and a 32-bit mask.
///
/// The mask is only ever applied with bitwise AND, so it does not have to
/// be a contiguous prefix: the conf format's dotted-mask form is taken
/// verbatim. Both fields are held in host byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkSpec {
    network: u32,
    netmask: u32,
}

impl NetworkSpec {
    /// Build a spec from a base address and an explicit dotted mask.
    pub fn with_mask(network: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        Self {
            network: u32::from(network),
            netmask: u32::from(netmask),
        }
    }

    /// Build a spec from a base address and a CIDR prefix length.
    ///
    /// `prefix` must already be validated to lie in `0..=32`. Prefix 0 is
    /// its own branch yielding an all-zero mask that matches every
    /// address; `u32 << 32` overflows and must not be evaluated.
    pub fn from_prefix(network: Ipv4Addr, prefix: u8) -> Self {
        debug_assert!(prefix <= 32);
        let netmask = if prefix == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(prefix))
        };
        Self {
            network: u32::from(network),
            netmask,
        }
    }

    /// Check whether `addr` falls inside this network.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        (u32::from(addr) ^ self.network) & self.netmask == 0
    }

    /// The base address.
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.network)
    }

    /// The mask as a dotted quad.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.netmask)
    }
}

impl fmt::Display for NetworkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.netmask())
    }
}
