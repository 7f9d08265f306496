//! Normalized configuration data model shared by every vendor parser.
//!
//! One [`DeviceConfig`] is built per parse call. It is a single ownership
//! tree: every list-typed child belongs exclusively to the device record and
//! nothing holds back-references. Parsers fill it bottom-up and hand it off
//! immutably; downstream audit and report layers only read it.
//!
//! Irregular vendor grammar (OSPF leftovers, SNMP detail lines, AAA method
//! lists) is deliberately kept as ordered lists of opaque strings rather
//! than forced into structure. The raw lines of each block are retained so
//! the original text stays auditable even where parsing was best-effort.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported configuration dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vendor {
    Cisco,
    Huawei,
    Juniper,
    #[serde(rename = "H3C")]
    H3c,
}

/// Error for vendor names outside the supported set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported vendor: {0}")]
pub struct UnknownVendor(pub String);

impl FromStr for Vendor {
    type Err = UnknownVendor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cisco" => Ok(Vendor::Cisco),
            "huawei" => Ok(Vendor::Huawei),
            "juniper" => Ok(Vendor::Juniper),
            "h3c" => Ok(Vendor::H3c),
            _ => Err(UnknownVendor(s.to_string())),
        }
    }
}

impl Display for Vendor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Vendor::Cisco => "Cisco",
            Vendor::Huawei => "Huawei",
            Vendor::Juniper => "Juniper",
            Vendor::H3c => "H3C",
        };
        write!(f, "{name}")
    }
}

/// One physical or logical interface block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    /// Vendor-native identifier, or a `"X - Y"` label after consolidation.
    pub port: String,
    /// Link type: `Physical` until a mode/link-type line refines it.
    #[serde(rename = "type")]
    pub link_type: String,
    /// Raw block lines, declaration line first.
    pub config: Vec<String>,
    pub description: String,
    pub status: String,
    /// Aggregation memberships, e.g. `Port-channel2 (active)`.
    pub members: Vec<String>,
}

impl Port {
    pub fn new(name: impl Into<String>, declaration: impl Into<String>, status: &str) -> Port {
        Port {
            port: name.into(),
            link_type: "Physical".to_string(),
            config: vec![declaration.into()],
            description: String::new(),
            status: status.to_string(),
            members: Vec::new(),
        }
    }
}

/// Layer-2 VLAN declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vlan {
    /// Numeric id, string-typed to preserve the source text.
    pub id: String,
    pub name: String,
    pub raw_config: Vec<String>,
}

/// VLAN-bound IP interface (SVI) or routed-port address block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Svi {
    pub svi: String,
    pub vlan_id: String,
    pub ip_address: String,
    pub subnet_mask: String,
    pub ip_helper_address: String,
    pub status: String,
    pub additional_info: String,
    pub raw_config: Vec<String>,
}

/// Addressing facts derived from an SVI or routed interface.
///
/// Sentinel values: when the configured address or mask fails validation,
/// `network`, `usable_range`, and `broadcast` read `"Invalid"` with zero
/// counts, and the rest of the parse continues untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRange {
    pub vlan_id: String,
    pub svi: String,
    pub status: String,
    pub ip_address: String,
    pub network: String,
    pub usable_range: String,
    pub broadcast: String,
    pub subnet_mask: String,
    pub total_addresses: u64,
    pub usable_addresses: u64,
    /// Best guess for the segment gateway: the configured address itself.
    pub gateway: String,
}

impl IpRange {
    /// Build from a dotted-decimal address and mask pair.
    pub fn from_mask(
        vlan_id: &str,
        svi: &str,
        status: &str,
        address: &str,
        mask: &str,
    ) -> IpRange {
        match netcalc_core::subnet_info(address, mask) {
            Ok(info) => Self::from_subnet(
                vlan_id,
                svi,
                status,
                address,
                format!("{mask} (/{})", info.prefix),
                info,
            ),
            Err(_) => Self::invalid(vlan_id, svi, status, address, mask.to_string()),
        }
    }

    /// Build from a dotted-decimal address and CIDR prefix length.
    pub fn from_prefix(
        vlan_id: &str,
        svi: &str,
        status: &str,
        address: &str,
        prefix: u8,
    ) -> IpRange {
        match netcalc_core::subnet_info_from_prefix(address, prefix) {
            Ok(info) => Self::from_subnet(
                vlan_id,
                svi,
                status,
                address,
                format!("{} (/{prefix})", info.mask),
                info,
            ),
            Err(_) => Self::invalid(vlan_id, svi, status, address, format!("/{prefix}")),
        }
    }

    fn from_subnet(
        vlan_id: &str,
        svi: &str,
        status: &str,
        address: &str,
        subnet_mask: String,
        info: netcalc_core::SubnetInfo,
    ) -> IpRange {
        IpRange {
            vlan_id: vlan_id.to_string(),
            svi: svi.to_string(),
            status: status.to_string(),
            ip_address: address.to_string(),
            network: info.network.to_string(),
            usable_range: info.usable_range(),
            broadcast: info.broadcast.to_string(),
            subnet_mask,
            total_addresses: info.total_addresses,
            usable_addresses: info.usable_addresses,
            gateway: address.to_string(),
        }
    }

    fn invalid(
        vlan_id: &str,
        svi: &str,
        status: &str,
        address: &str,
        subnet_mask: String,
    ) -> IpRange {
        IpRange {
            vlan_id: vlan_id.to_string(),
            svi: svi.to_string(),
            status: status.to_string(),
            ip_address: address.to_string(),
            network: "Invalid".to_string(),
            usable_range: "Invalid".to_string(),
            broadcast: "Invalid".to_string(),
            subnet_mask,
            total_addresses: 0,
            usable_addresses: 0,
            gateway: address.to_string(),
        }
    }
}

/// One `network <addr> <wildcard-or-mask> area <id>` advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OspfNetwork {
    pub network: String,
    pub wildcard: String,
    pub area: String,
}

/// OSPF process summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OspfInfo {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub router_id: Option<String>,
    /// Unstructured leftover lines from inside the process block.
    pub details: Vec<String>,
    pub raw_config: Vec<String>,
    pub networks: Vec<OspfNetwork>,
    pub passive_interfaces: Vec<String>,
}

impl Default for OspfInfo {
    fn default() -> Self {
        OspfInfo {
            status: NOT_CONFIGURED.to_string(),
            process_id: None,
            router_id: None,
            details: Vec::new(),
            raw_config: Vec::new(),
            networks: Vec::new(),
            passive_interfaces: Vec::new(),
        }
    }
}

/// A standard ACL guarding SNMP access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnmpAcl {
    pub name: String,
    pub rules: Vec<String>,
}

/// SNMP agent summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnmpInfo {
    pub status: String,
    pub details: Vec<String>,
    pub acls: Vec<SnmpAcl>,
}

impl Default for SnmpInfo {
    fn default() -> Self {
        SnmpInfo {
            status: NOT_CONFIGURED.to_string(),
            details: Vec::new(),
            acls: Vec::new(),
        }
    }
}

/// Named DHCP address pool with its raw option lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DhcpPool {
    pub name: String,
    pub config: Vec<String>,
}

/// AAA posture summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AaaInfo {
    pub status: String,
    pub details: Vec<String>,
}

impl Default for AaaInfo {
    fn default() -> Self {
        AaaInfo {
            status: NOT_CONFIGURED.to_string(),
            details: Vec::new(),
        }
    }
}

/// Terminal line (console/vty) block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineConfig {
    #[serde(rename = "type")]
    pub line_type: String,
    pub range: String,
    pub config: Vec<String>,
    /// Accounts usable on this line when local login is in effect.
    pub usernames: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Locally configured account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Username {
    pub name: String,
    pub config: String,
}

/// Static routing posture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingInfo {
    pub default_gateway: String,
    pub default_route: String,
}

/// Loose global facts with no better home.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherInfo {
    pub dns_servers: String,
    pub domain: String,
}

/// Hardening capability labels observed and absent, per the vendor's
/// canonical checklist. Recomputed fully on every parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityCompliance {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

/// The complete normalized record for one device configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    pub hostname: String,
    pub os_version: String,
    pub model_number: String,
    pub vendor: Vendor,
    /// Original input text, retained verbatim for audit and fallback display.
    pub raw_config: String,
    pub vlans: Vec<Vlan>,
    pub svis: Vec<Svi>,
    pub ip_ranges: Vec<IpRange>,
    pub ospf: OspfInfo,
    pub snmp: SnmpInfo,
    pub dhcp_pools: Vec<DhcpPool>,
    pub aaa: AaaInfo,
    pub other: OtherInfo,
    pub connections: Vec<LineConfig>,
    pub usernames: Vec<Username>,
    pub ports: Vec<Port>,
    pub uplinks: Vec<String>,
    pub port_channels: Vec<String>,
    pub routing: RoutingInfo,
    pub security: SecurityCompliance,
}

pub(crate) const NOT_CONFIGURED: &str = "Not configured";
pub(crate) const CONFIGURED: &str = "Configured";

impl DeviceConfig {
    /// Empty record with every status at its "not configured" default.
    pub fn new(vendor: Vendor) -> DeviceConfig {
        DeviceConfig {
            hostname: String::new(),
            os_version: String::new(),
            model_number: String::new(),
            vendor,
            raw_config: String::new(),
            vlans: Vec::new(),
            svis: Vec::new(),
            ip_ranges: Vec::new(),
            ospf: OspfInfo::default(),
            snmp: SnmpInfo::default(),
            dhcp_pools: Vec::new(),
            aaa: AaaInfo::default(),
            other: OtherInfo::default(),
            connections: Vec::new(),
            usernames: Vec::new(),
            ports: Vec::new(),
            uplinks: Vec::new(),
            port_channels: Vec::new(),
            routing: RoutingInfo::default(),
            security: SecurityCompliance::default(),
        }
    }

    /// Register an aggregate interface once, preserving first-seen order.
    pub fn register_port_channel(&mut self, name: &str) {
        if !self.port_channels.iter().any(|pc| pc == name) {
            self.port_channels.push(name.to_string());
        }
    }

    /// Register an uplink-facing port once, preserving first-seen order.
    pub fn register_uplink(&mut self, port: &str) {
        if !self.uplinks.iter().any(|up| up == port) {
            self.uplinks.push(port.to_string());
        }
    }
}
