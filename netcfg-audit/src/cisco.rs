//! Cisco IOS "show running-config" dialect parser.
//!
//! Line-oriented state machine. Blocks (interface, SVI, OSPF process, SNMP
//! ACL, DHCP pool, AAA, terminal line) open on their declaration line and
//! close on the `!` separator. Lines that no rule recognizes inside a known
//! block are appended verbatim to that block's raw buffer; lines outside any
//! block that match nothing are ignored. The parser never fails: worst case
//! a field stays at its "not configured" default.

use crate::consolidate::consolidate_ports;
use crate::lex::{
    args_after, contains_ignore_case, is_digits, is_dotted, strip_words, token_after,
};
use crate::model::{
    DeviceConfig, DhcpPool, IpRange, LineConfig, OspfNetwork, Port, SnmpAcl, Svi, Username,
    Vendor, Vlan, CONFIGURED,
};

/// Canonical hardening checklist for IOS devices. `missing` is the
/// complement of `present` against this list, compared on the label before
/// any `:`.
const SECURITY_CHECKLIST: [&str; 8] = [
    "Password Encryption",
    "VTP Mode: off",
    "SSH Enabled",
    "HTTP/HTTPS Server Disabled",
    "Port Security on Access Ports",
    "BPDU Guard",
    "DHCP Snooping",
    "Dynamic ARP Inspection",
];

pub fn parse(text: &str) -> DeviceConfig {
    let mut device = DeviceConfig::new(Vendor::Cisco);
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let mut in_interface = false;
    let mut in_snmp_acl = false;
    let mut in_dhcp_pool = false;
    let mut in_aaa = false;
    let mut in_line = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if let Some(host) = token_after(line, &["hostname"]) {
            device.hostname = host.to_string();
        }
        if let Some(version) = token_after(line, &["version"]) {
            device.os_version = version.to_string();
        }
        if let Some(rest) = args_after(line, &["switch"]) {
            let mut tokens = rest.split_whitespace();
            if let (Some(unit), Some("provision"), Some(model)) =
                (tokens.next(), tokens.next(), tokens.next())
            {
                if is_digits(unit) {
                    device.model_number = model.to_string();
                }
            }
        }

        if let Some(id) = token_after(line, &["vlan"]).filter(|t| is_digits(t)) {
            let mut name = "Unnamed".to_string();
            let mut raw = vec![line.to_string()];
            if let Some(next) = lines.get(i + 1) {
                if let Some(vlan_name) = args_after(next, &["name"]) {
                    name = vlan_name.to_string();
                    raw.push(next.to_string());
                    i += 1;
                }
            }
            device.vlans.push(Vlan {
                id: id.to_string(),
                name,
                raw_config: raw,
            });
        }

        if let Some(gateway) = token_after(line, &["ip", "default-gateway"]) {
            device.routing.default_gateway = gateway.to_string();
        }
        if let Some(next_hop) = token_after(line, &["ip", "route", "0.0.0.0", "0.0.0.0"]) {
            device.routing.default_route = next_hop.to_string();
        }
        if let Some(servers) = args_after(line, &["ip", "name-server"]) {
            device.other.dns_servers = servers.to_string();
        } else if let Some(domain) = args_after(line, &["ip", "domain", "name"]) {
            device.other.domain = domain.to_string();
        }

        let iface = token_after(line, &["interface"]);
        if let Some(name) = iface.filter(|n| vlan_interface_id(n).is_none()) {
            in_interface = true;
            if name.to_ascii_lowercase().starts_with("port-channel") {
                device.register_port_channel(name);
            }
            let uplink_described_next = lines.get(i + 1).is_some_and(|next| {
                strip_words(next, &["description"]).is_some()
                    && contains_ignore_case(next, "uplink")
            });
            if contains_ignore_case(line, "uplink") || uplink_described_next {
                device.register_uplink(name);
            }
            device.ports.push(Port::new(name, line, "N/A"));
        } else if in_interface {
            let mut uplink = None;
            let mut channel = None;
            if let Some(port) = device.ports.last_mut() {
                if let Some(desc) = args_after(line, &["description"]) {
                    port.description = desc.to_string();
                    if contains_ignore_case(desc, "uplink") {
                        uplink = Some(port.port.clone());
                    }
                }
                if line.contains("shutdown") {
                    port.status = "Disabled".to_string();
                } else if port.status == "N/A" {
                    port.status = "Enabled".to_string();
                }
                if let Some(mode) = token_after(line, &["switchport", "mode"]) {
                    port.link_type = mode.to_string();
                }
                if let Some(rest) = args_after(line, &["channel-group"]) {
                    let mut tokens = rest.split_whitespace();
                    if let (Some(group), Some("mode"), Some(mode)) =
                        (tokens.next(), tokens.next(), tokens.next())
                    {
                        if is_digits(group) {
                            let aggregate = format!("Port-channel{group}");
                            port.members.push(format!("{aggregate} ({mode})"));
                            channel = Some(aggregate);
                        }
                    }
                }
                port.config.push(line.to_string());
            }
            if let Some(name) = uplink {
                device.register_uplink(&name);
            }
            if let Some(aggregate) = channel {
                device.register_port_channel(&aggregate);
            }
            if line.starts_with('!') {
                in_interface = false;
            }
        }

        if let Some(vlan_id) = iface.and_then(vlan_interface_id) {
            let svi_name = format!("Vlan{vlan_id}");
            let mut ip_address = "No IP address".to_string();
            let mut subnet_mask = String::new();
            let mut helper = "N/A".to_string();
            let mut status = "Enabled".to_string();
            let mut extras: Vec<String> = Vec::new();
            let mut raw = vec![line.to_string()];

            let mut j = i + 1;
            while j < lines.len() && !lines[j].starts_with('!') {
                let sub = lines[j];
                raw.push(sub.to_string());
                if let Some((addr, mask)) = address_pair(sub) {
                    ip_address = addr.to_string();
                    subnet_mask = mask.to_string();
                } else if let Some(relay) = token_after(sub, &["ip", "helper-address"]) {
                    helper = relay.to_string();
                } else if sub.contains("shutdown") {
                    status = "Disabled".to_string();
                    extras.push("shutdown".to_string());
                } else if let Some(desc) = args_after(sub, &["description"]) {
                    extras.push(format!("Description: {desc}"));
                }
                j += 1;
            }
            if let Some(end) = lines.get(j).filter(|l| l.starts_with('!')) {
                raw.push(end.to_string());
            }

            if ip_address != "No IP address" && !subnet_mask.is_empty() {
                device.ip_ranges.push(IpRange::from_mask(
                    vlan_id,
                    &svi_name,
                    &status,
                    &ip_address,
                    &subnet_mask,
                ));
            }
            device.svis.push(Svi {
                svi: svi_name,
                vlan_id: vlan_id.to_string(),
                ip_address,
                subnet_mask,
                ip_helper_address: helper,
                status,
                additional_info: extras.join(", "),
                raw_config: raw,
            });
            i = j;
        }

        if let Some(process) = token_after(line, &["router", "ospf"]).filter(|t| is_digits(t)) {
            device.ospf.status = CONFIGURED.to_string();
            device.ospf.process_id = Some(process.to_string());
            device.ospf.raw_config = vec![line.to_string()];
            device.ospf.networks.clear();
            device.ospf.passive_interfaces.clear();
            device.ospf.details.clear();

            while i + 1 < lines.len() && !lines[i + 1].starts_with('!') {
                i += 1;
                let sub = lines[i];
                device.ospf.raw_config.push(sub.to_string());
                if let Some(router_id) = token_after(sub, &["router-id"]).filter(|t| is_dotted(t))
                {
                    device.ospf.router_id = Some(router_id.to_string());
                } else if let Some(network) = ospf_network(sub) {
                    device.ospf.networks.push(network);
                } else if let Some(passive) = token_after(sub, &["passive-interface"]) {
                    device.ospf.passive_interfaces.push(passive.to_string());
                } else {
                    device.ospf.details.push(sub.to_string());
                }
            }
            i += 1;
        }

        if let Some(rest) = args_after(line, &["snmp-server"]) {
            device.snmp.status = CONFIGURED.to_string();
            device.snmp.details.push(rest.to_string());
        }
        if let Some(acl_name) =
            token_after(line, &["ip", "access-list", "standard"]).filter(|_| line.contains("snmp"))
        {
            in_snmp_acl = true;
            device.snmp.status = CONFIGURED.to_string();
            device.snmp.acls.push(SnmpAcl {
                name: acl_name.to_string(),
                rules: vec![line.to_string()],
            });
        } else if in_snmp_acl
            && (args_after(line, &["permit"]).is_some() || args_after(line, &["deny"]).is_some())
        {
            if let Some(acl) = device.snmp.acls.last_mut() {
                acl.rules.push(line.to_string());
            }
        } else if in_snmp_acl && line.starts_with('!') {
            in_snmp_acl = false;
        }

        if let Some(pool_name) = token_after(line, &["ip", "dhcp", "pool"]) {
            in_dhcp_pool = true;
            device.dhcp_pools.push(DhcpPool {
                name: pool_name.to_string(),
                config: vec![line.to_string()],
            });
        } else if in_dhcp_pool && is_dhcp_option(line) {
            if let Some(pool) = device.dhcp_pools.last_mut() {
                pool.config.push(line.to_string());
            }
        } else if in_dhcp_pool && line.starts_with('!') {
            in_dhcp_pool = false;
        }

        if line.contains("aaa new-model") {
            in_aaa = true;
            device.aaa.status = CONFIGURED.to_string();
            device.aaa.details.push("AAA Enabled".to_string());
            device.security.present.push("AAA Authentication".to_string());
        } else if in_aaa {
            if let Some(rest) = args_after(line, &["aaa", "authentication"]) {
                device.aaa.details.push(format!("Authentication: {rest}"));
            } else if let Some(rest) = args_after(line, &["aaa", "authorization"]) {
                device.aaa.details.push(format!("Authorization: {rest}"));
            } else if let Some(rest) = args_after(line, &["aaa", "accounting"]) {
                device.aaa.details.push(format!("Accounting: {rest}"));
            } else if line.starts_with('!') {
                in_aaa = false;
            }
        }

        if let Some(user) = token_after(line, &["username"]) {
            device.usernames.push(Username {
                name: user.to_string(),
                config: line.to_string(),
            });
        }

        if let Some((line_type, range)) = terminal_line_decl(line) {
            in_line = true;
            device.connections.push(LineConfig {
                line_type,
                range,
                config: vec![line.to_string()],
                usernames: Vec::new(),
                description: None,
            });
        } else if in_line {
            if line.starts_with('!') {
                in_line = false;
            } else if let Some(connection) = device.connections.last_mut() {
                connection.config.push(line.to_string());
                if let Some(desc) = args_after(line, &["description"]) {
                    connection.description = Some(desc.to_string());
                } else if line.contains("login local") && !device.usernames.is_empty() {
                    connection.usernames =
                        device.usernames.iter().map(|u| u.name.clone()).collect();
                }
            }
        }

        i += 1;
    }

    scan_security(&mut device, &lines);
    device.ports = consolidate_ports(std::mem::take(&mut device.ports));
    device
}

/// `VlanN` (case-sensitive, IOS spelling) with a numeric suffix.
fn vlan_interface_id(name: &str) -> Option<&str> {
    name.strip_prefix("Vlan").filter(|id| is_digits(id))
}

/// `ip address A.B.C.D M.M.M.M` with both operands dotted-decimal shaped.
fn address_pair(line: &str) -> Option<(&str, &str)> {
    let rest = args_after(line, &["ip", "address"])?;
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(addr), Some(mask)) if is_dotted(addr) && is_dotted(mask) => Some((addr, mask)),
        _ => None,
    }
}

/// `network A.B.C.D W.W.W.W area <id>`.
fn ospf_network(line: &str) -> Option<OspfNetwork> {
    let rest = args_after(line, &["network"])?;
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(network), Some(wildcard), Some("area"), Some(area))
            if is_dotted(network) && is_dotted(wildcard) =>
        {
            Some(OspfNetwork {
                network: network.to_string(),
                wildcard: wildcard.to_string(),
                area: area.to_string(),
            })
        }
        _ => None,
    }
}

fn is_dhcp_option(line: &str) -> bool {
    if let Some(rest) = args_after(line, &["network"]) {
        let mut tokens = rest.split_whitespace();
        return matches!(
            (tokens.next(), tokens.next()),
            (Some(a), Some(b)) if is_dotted(a) && is_dotted(b)
        );
    }
    token_after(line, &["default-router"]).is_some()
        || args_after(line, &["dns-server"]).is_some()
}

/// `line con 0` or `line vty 0 4`.
fn terminal_line_decl(line: &str) -> Option<(String, String)> {
    let rest = args_after(line, &["line"])?;
    let mut tokens = rest.split_whitespace();
    let line_type = match tokens.next()? {
        kind @ ("con" | "vty") => kind.to_string(),
        _ => return None,
    };
    let first = tokens.next().filter(|t| is_digits(t))?;
    let mut range = first.to_string();
    if let Some(second) = tokens.next().filter(|t| is_digits(t)) {
        range.push(' ');
        range.push_str(second);
    }
    Some((line_type, range))
}

fn scan_security(device: &mut DeviceConfig, lines: &[&str]) {
    if lines.iter().any(|l| l.contains("service password-encryption")) {
        device.security.present.push("Password Encryption".to_string());
    }
    if let Some(mode) = lines.iter().find_map(|l| token_after(l, &["vtp", "mode"])) {
        device.security.present.push(format!("VTP Mode: {mode}"));
    }
    if lines.iter().any(|l| l.contains("ip ssh")) {
        device.security.present.push("SSH Enabled".to_string());
    }
    if lines
        .iter()
        .any(|l| l.contains("no ip http server") && l.contains("no ip http secure-server"))
    {
        device
            .security
            .present
            .push("HTTP/HTTPS Server Disabled".to_string());
    }
    if port_config_contains(device, "switchport port-security") {
        device
            .security
            .present
            .push("Port Security on Access Ports".to_string());
    }
    if port_config_contains(device, "spanning-tree bpduguard enable") {
        device.security.present.push("BPDU Guard".to_string());
    }
    if lines.iter().any(|l| l.contains("ip dhcp snooping")) {
        device.security.present.push("DHCP Snooping".to_string());
    }
    if lines.iter().any(|l| l.contains("ip arp inspection")) {
        device
            .security
            .present
            .push("Dynamic ARP Inspection".to_string());
    }

    device.security.missing = SECURITY_CHECKLIST
        .iter()
        .filter(|item| {
            let label = item.split(':').next().unwrap_or(item);
            !device.security.present.iter().any(|p| p.contains(label))
        })
        .map(|item| item.to_string())
        .collect();
}

fn port_config_contains(device: &DeviceConfig, needle: &str) -> bool {
    device
        .ports
        .iter()
        .any(|port| port.config.iter().any(|line| line.contains(needle)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse;

    const BASE: &str = "\
hostname SW1
version 15.2
switch 1 provision ws-c3750x-48p
!
vlan 10
 name SERVERS
!
interface Vlan10
 ip address 10.1.10.1 255.255.255.0
 ip helper-address 10.9.9.9
!
";

    #[test]
    fn identity_vlan_svi_and_range() {
        let device = parse(BASE);
        assert_eq!(device.hostname, "SW1");
        assert_eq!(device.os_version, "15.2");
        assert_eq!(device.model_number, "ws-c3750x-48p");

        assert_eq!(device.vlans.len(), 1);
        assert_eq!(device.vlans[0].id, "10");
        assert_eq!(device.vlans[0].name, "SERVERS");

        assert_eq!(device.svis.len(), 1);
        assert_eq!(device.svis[0].svi, "Vlan10");
        assert_eq!(device.svis[0].ip_address, "10.1.10.1");
        assert_eq!(device.svis[0].ip_helper_address, "10.9.9.9");

        assert_eq!(device.ip_ranges.len(), 1);
        let range = &device.ip_ranges[0];
        assert_eq!(range.network, "10.1.10.0");
        assert_eq!(range.broadcast, "10.1.10.255");
        assert_eq!(range.usable_addresses, 254);
        assert_eq!(range.gateway, "10.1.10.1");
    }

    #[test]
    fn unrecognized_lines_never_break_the_parse() {
        let mut input = String::new();
        for vlan in 1..=10 {
            for junk in 0..50 {
                input.push_str(&format!("zz unrecognized filler {vlan} {junk}\n"));
            }
            input.push_str(&format!("vlan {}\n", vlan * 10));
        }
        let device = parse(&input);
        assert_eq!(device.vlans.len(), 10);
        assert_eq!(device.vlans[0].id, "10");
        assert_eq!(device.vlans[0].name, "Unnamed");
    }

    #[test]
    fn interfaces_consolidate_and_register_aggregates() {
        let mut input = String::from("hostname SW1\n!\n");
        for n in 1..=4 {
            input.push_str(&format!(
                "interface GigabitEthernet1/0/{n}\n switchport mode access\n!\n"
            ));
        }
        input.push_str(
            "interface GigabitEthernet1/0/48\n description Core UPLINK\n \
             channel-group 2 mode active\n!\n",
        );

        let device = parse(&input);
        let labels: Vec<&str> = device.ports.iter().map(|p| p.port.as_str()).collect();
        assert_eq!(
            labels,
            vec!["GigabitEthernet1/0/1 - GigabitEthernet1/0/4", "GigabitEthernet1/0/48"]
        );
        assert_eq!(device.ports[0].link_type, "access");
        assert_eq!(device.uplinks, vec!["GigabitEthernet1/0/48"]);
        assert_eq!(device.port_channels, vec!["Port-channel2"]);
        assert_eq!(device.ports[1].members, vec!["Port-channel2 (active)"]);
    }

    #[test]
    fn bad_svi_mask_becomes_invalid_sentinel() {
        let device = parse("interface Vlan99\n ip address 10.0.0.1 255.0.255.0\n!\n");
        assert_eq!(device.ip_ranges.len(), 1);
        assert_eq!(device.ip_ranges[0].network, "Invalid");
        assert_eq!(device.ip_ranges[0].total_addresses, 0);
        assert_eq!(device.svis.len(), 1);
    }

    #[test]
    fn ospf_block_is_captured_structurally() {
        let device = parse(
            "router ospf 10\n router-id 1.1.1.1\n network 10.1.0.0 0.0.255.255 area 0\n \
             passive-interface Vlan10\n auto-cost reference-bandwidth 10000\n!\n",
        );
        assert_eq!(device.ospf.status, "Configured");
        assert_eq!(device.ospf.process_id.as_deref(), Some("10"));
        assert_eq!(device.ospf.router_id.as_deref(), Some("1.1.1.1"));
        assert_eq!(device.ospf.networks.len(), 1);
        assert_eq!(device.ospf.networks[0].area, "0");
        assert_eq!(device.ospf.passive_interfaces, vec!["Vlan10"]);
        assert_eq!(
            device.ospf.details,
            vec!["auto-cost reference-bandwidth 10000"]
        );
        assert_eq!(device.ospf.raw_config.len(), 5);
    }

    #[test]
    fn vty_lines_inherit_local_usernames() {
        let device = parse(
            "username admin privilege 15 secret 5 $1$abc\nusername ops secret 5 $1$def\n!\n\
             line vty 0 4\n login local\n transport input ssh\n!\n",
        );
        assert_eq!(device.usernames.len(), 2);
        assert_eq!(device.connections.len(), 1);
        assert_eq!(device.connections[0].line_type, "vty");
        assert_eq!(device.connections[0].range, "0 4");
        assert_eq!(device.connections[0].usernames, vec!["admin", "ops"]);
    }

    #[test]
    fn security_scan_splits_present_and_missing() {
        let device = parse(
            "service password-encryption\nip ssh version 2\nvtp mode transparent\n\
             interface GigabitEthernet1/0/1\n switchport mode access\n \
             switchport port-security\n spanning-tree bpduguard enable\n!\n",
        );
        let present = &device.security.present;
        assert!(present.iter().any(|p| p == "Password Encryption"));
        assert!(present.iter().any(|p| p == "SSH Enabled"));
        assert!(present.iter().any(|p| p == "VTP Mode: transparent"));
        assert!(present.iter().any(|p| p == "Port Security on Access Ports"));
        assert!(present.iter().any(|p| p == "BPDU Guard"));

        let missing = &device.security.missing;
        assert!(missing.iter().any(|m| m == "DHCP Snooping"));
        assert!(missing.iter().any(|m| m == "Dynamic ARP Inspection"));
        assert!(missing.iter().any(|m| m == "HTTP/HTTPS Server Disabled"));
        assert!(!missing.iter().any(|m| m.starts_with("VTP Mode")));
    }

    #[test]
    fn dhcp_pools_and_snmp_acls() {
        let device = parse(
            "ip dhcp pool CORP\n network 10.2.0.0 255.255.0.0\n default-router 10.2.0.1\n \
             dns-server 10.2.0.53\n!\nsnmp-server community public RO\n\
             ip access-list standard snmp-mgmt\n permit 10.9.0.0 0.0.0.255\n!\n",
        );
        assert_eq!(device.dhcp_pools.len(), 1);
        assert_eq!(device.dhcp_pools[0].name, "CORP");
        assert_eq!(device.dhcp_pools[0].config.len(), 4);
        assert_eq!(device.snmp.status, "Configured");
        assert_eq!(device.snmp.details, vec!["community public RO"]);
        assert_eq!(device.snmp.acls.len(), 1);
        assert_eq!(device.snmp.acls[0].rules.len(), 2);
    }
}
