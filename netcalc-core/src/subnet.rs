use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while validating addresses and masks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubnetError {
    /// Input was not a valid dotted-decimal IPv4 address.
    #[error("invalid IPv4 address: {0}")]
    Address(String),
    /// Mask was not dotted-decimal or its bit pattern is non-contiguous.
    #[error("invalid subnet mask: {0}")]
    Mask(String),
    /// Prefix length was outside 0..=32.
    #[error("prefix length out of range: /{0}")]
    Prefix(u8),
}

/// Computed addressing facts for one (address, mask) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetInfo {
    /// The configured address as given.
    pub address: Ipv4Addr,
    /// Subnet mask in dotted-decimal form.
    pub mask: Ipv4Addr,
    /// CIDR prefix length derived from the mask.
    pub prefix: u8,
    /// Network address (`address AND mask`).
    pub network: Ipv4Addr,
    /// Broadcast address (`network OR NOT mask`).
    pub broadcast: Ipv4Addr,
    /// Total address count, 2^(32-prefix). Wide enough for /0.
    pub total_addresses: u64,
    /// Usable host address count under the /31 and /32 conventions.
    pub usable_addresses: u64,
}

impl SubnetInfo {
    /// First usable host address, if the subnet has one.
    pub fn first_usable(&self) -> Option<Ipv4Addr> {
        match self.prefix {
            32 => Some(self.address),
            31 => Some(self.network),
            _ if self.usable_addresses > 0 => Some(Ipv4Addr::from(u32::from(self.network) + 1)),
            _ => None,
        }
    }

    /// Last usable host address, if the subnet has one.
    pub fn last_usable(&self) -> Option<Ipv4Addr> {
        match self.prefix {
            32 => Some(self.address),
            31 => Some(self.broadcast),
            _ if self.usable_addresses > 0 => Some(Ipv4Addr::from(u32::from(self.broadcast) - 1)),
            _ => None,
        }
    }

    /// Human-readable usable host range.
    ///
    /// `/31` spans network..broadcast (RFC 3021 point-to-point), `/32` is the
    /// address itself, and subnets with no usable hosts report
    /// `"None (subnet too small)"`.
    pub fn usable_range(&self) -> String {
        match self.prefix {
            32 => self.address.to_string(),
            31 => format!("{} - {}", self.network, self.broadcast),
            _ => match (self.first_usable(), self.last_usable()) {
                (Some(first), Some(last)) => format!("{first} - {last}"),
                _ => "None (subnet too small)".to_string(),
            },
        }
    }
}

/// Compute subnet facts from a dotted-decimal address and mask.
///
/// Never panics on bad input: malformed addresses and non-contiguous masks
/// come back as [`SubnetError`] values for the caller to embed or report.
pub fn subnet_info(address: &str, mask: &str) -> Result<SubnetInfo, SubnetError> {
    let addr: Ipv4Addr = address
        .trim()
        .parse()
        .map_err(|_| SubnetError::Address(address.to_string()))?;
    let mask_addr: Ipv4Addr = mask
        .trim()
        .parse()
        .map_err(|_| SubnetError::Mask(mask.to_string()))?;
    let prefix =
        prefix_from_mask(mask_addr).ok_or_else(|| SubnetError::Mask(mask.to_string()))?;
    Ok(build(addr, mask_addr, prefix))
}

/// Compute subnet facts from a dotted-decimal address and a CIDR prefix length.
pub fn subnet_info_from_prefix(address: &str, prefix: u8) -> Result<SubnetInfo, SubnetError> {
    if prefix > 32 {
        return Err(SubnetError::Prefix(prefix));
    }
    let addr: Ipv4Addr = address
        .trim()
        .parse()
        .map_err(|_| SubnetError::Address(address.to_string()))?;
    Ok(build(addr, mask_from_prefix(prefix), prefix))
}

/// Derive a prefix length from a mask, rejecting non-contiguous bit patterns.
pub fn prefix_from_mask(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    if bits.count_ones() != bits.leading_ones() {
        return None;
    }
    Some(bits.count_ones() as u8)
}

/// Build the dotted-decimal mask for a prefix length 0..=32.
pub fn mask_from_prefix(prefix: u8) -> Ipv4Addr {
    if prefix == 0 {
        return Ipv4Addr::UNSPECIFIED;
    }
    Ipv4Addr::from(u32::MAX << (32 - u32::from(prefix)))
}

fn build(addr: Ipv4Addr, mask: Ipv4Addr, prefix: u8) -> SubnetInfo {
    let mask_bits = u32::from(mask);
    let network = u32::from(addr) & mask_bits;
    let broadcast = network | !mask_bits;
    let total_addresses = 1u64 << (32 - u32::from(prefix));
    let usable_addresses = match prefix {
        32 => 1,
        31 => 2,
        _ if total_addresses > 2 => total_addresses - 2,
        _ => 0,
    };

    SubnetInfo {
        address: addr,
        mask,
        prefix,
        network: Ipv4Addr::from(network),
        broadcast: Ipv4Addr::from(broadcast),
        total_addresses,
        usable_addresses,
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use pretty_assertions::assert_eq;

    use super::{prefix_from_mask, subnet_info, subnet_info_from_prefix, SubnetError};

    #[test]
    fn slash_24_basics() {
        let info = subnet_info("10.1.10.1", "255.255.255.0").unwrap();
        assert_eq!(info.network, Ipv4Addr::new(10, 1, 10, 0));
        assert_eq!(info.broadcast, Ipv4Addr::new(10, 1, 10, 255));
        assert_eq!(info.prefix, 24);
        assert_eq!(info.total_addresses, 256);
        assert_eq!(info.usable_addresses, 254);
        assert_eq!(info.usable_range(), "10.1.10.1 - 10.1.10.254");
    }

    #[test]
    fn network_address_broadcast_ordering_holds() {
        for prefix in 0..=32u8 {
            let info = subnet_info_from_prefix("172.20.133.7", prefix).unwrap();
            assert!(u32::from(info.network) <= u32::from(info.address), "/{prefix}");
            assert!(u32::from(info.address) <= u32::from(info.broadcast), "/{prefix}");
        }
    }

    #[test]
    fn usable_count_law() {
        for prefix in 0..=32u8 {
            let info = subnet_info_from_prefix("192.0.2.9", prefix).unwrap();
            let expected = match prefix {
                32 => 1,
                31 => 2,
                p => (1u64 << (32 - u32::from(p))).saturating_sub(2),
            };
            assert_eq!(info.usable_addresses, expected, "/{prefix}");
        }
    }

    #[test]
    fn slash_31_is_point_to_point() {
        let info = subnet_info("192.168.1.1", "255.255.255.254").unwrap();
        assert_eq!(info.prefix, 31);
        assert_eq!(info.usable_addresses, 2);
        assert_eq!(info.usable_range(), "192.168.1.0 - 192.168.1.1");
    }

    #[test]
    fn slash_32_is_host_route() {
        let info = subnet_info("10.0.0.5", "255.255.255.255").unwrap();
        assert_eq!(info.usable_addresses, 1);
        assert_eq!(info.usable_range(), "10.0.0.5");
    }

    #[test]
    fn slash_zero_does_not_overflow() {
        let info = subnet_info("8.8.8.8", "0.0.0.0").unwrap();
        assert_eq!(info.prefix, 0);
        assert_eq!(info.total_addresses, 1u64 << 32);
        assert_eq!(info.usable_addresses, (1u64 << 32) - 2);
        assert_eq!(info.network, Ipv4Addr::UNSPECIFIED);
        assert_eq!(info.broadcast, Ipv4Addr::BROADCAST);
    }

    #[test]
    fn non_contiguous_mask_is_rejected() {
        assert_eq!(prefix_from_mask(Ipv4Addr::new(255, 0, 255, 0)), None);
        assert!(matches!(
            subnet_info("10.0.0.1", "255.0.255.0"),
            Err(SubnetError::Mask(_))
        ));
    }

    #[test]
    fn malformed_inputs_are_typed_errors() {
        assert!(matches!(
            subnet_info("10.0.0.300", "255.255.255.0"),
            Err(SubnetError::Address(_))
        ));
        assert!(matches!(
            subnet_info("10.0.0.1", "not-a-mask"),
            Err(SubnetError::Mask(_))
        ));
        assert!(matches!(
            subnet_info_from_prefix("10.0.0.1", 33),
            Err(SubnetError::Prefix(33))
        ));
    }
}
