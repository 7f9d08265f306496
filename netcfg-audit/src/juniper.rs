//! Juniper Junos dialect parser.
//!
//! Junos configurations are brace-delimited rather than line-oriented. The
//! parser keeps an explicit context stack of open block names and interprets
//! each `key value;` statement against the joined context path, e.g.
//! `system services` or `interfaces ge-0/0/0 unit 0 family inet`.

use std::collections::HashMap;

use crate::consolidate::consolidate_ports;
use crate::model::{
    DeviceConfig, IpRange, OspfNetwork, Port, Svi, Username, Vendor, Vlan, CONFIGURED,
};

pub fn parse(text: &str) -> DeviceConfig {
    let mut device = DeviceConfig::new(Vendor::Juniper);

    let mut context: Vec<String> = Vec::new();
    let mut current_port: Option<Port> = None;
    let mut current_vlan: Option<Vlan> = None;
    // l3-interface value ("vlan.100") to owning VLAN name.
    let mut l3_interfaces: HashMap<String, String> = HashMap::new();
    let mut ospf_area: Option<String> = None;
    let mut ospf_interface: Option<String> = None;
    let mut in_services = false;

    for raw in text.lines() {
        let line = raw.trim();
        if line.starts_with("##") || line.starts_with("/*") {
            continue;
        }

        if let Some(opener) = line.strip_suffix('{') {
            let block = opener.trim().to_string();
            context.push(block.clone());
            let path = context.join(" ");

            if context.len() == 2 && context[0] == "interfaces" {
                if block.starts_with("ae") {
                    device.register_port_channel(&block);
                }
                current_port = Some(Port::new(&block, line, "up"));
            } else if context.len() == 2 && context[0] == "vlans" {
                current_vlan = Some(Vlan {
                    id: String::new(),
                    name: block.clone(),
                    raw_config: vec![line.to_string()],
                });
            } else if path == "protocols ospf" {
                device.ospf.status = CONFIGURED.to_string();
                device.ospf.raw_config.push(line.to_string());
            } else if path.starts_with("protocols ospf") && block.starts_with("area ") {
                ospf_area = second_token(&block);
            } else if ospf_area.is_some() && block.starts_with("interface ") {
                ospf_interface = second_token(&block);
            } else if path == "system services" {
                in_services = true;
            } else if path == "snmp" {
                device.snmp.status = CONFIGURED.to_string();
            }
        } else if line.ends_with('}') {
            let Some(block) = context.pop() else {
                continue;
            };

            if device.ospf.status == CONFIGURED && block == "ospf" {
                device.ospf.raw_config.push(line.to_string());
            }
            if current_port.as_ref().map_or(false, |p| p.port == block) {
                if let Some(port) = current_port.take() {
                    device.ports.push(port);
                }
            }
            if current_vlan.as_ref().map_or(false, |v| v.name == block) {
                if let Some(vlan) = current_vlan.take() {
                    device.vlans.push(vlan);
                }
            }
            if block.starts_with("area ") {
                ospf_area = None;
            }
            if block.starts_with("interface ") {
                ospf_interface = None;
            }
            if block == "services" {
                in_services = false;
            }
        } else if let Some(stmt) = line.strip_suffix(';') {
            let mut tokens = stmt.split(' ');
            let key = tokens.next().unwrap_or("");
            let value = tokens.collect::<Vec<_>>().join(" ").replace('"', "");
            let path = context.join(" ");

            if key == "host-name" && path == "system" {
                device.hostname = value.clone();
            }
            if key == "version" && context.is_empty() {
                device.os_version = value.clone();
            }
            if key == "model" && path == "version" {
                device.model_number = value.clone();
            }
            if key == "name-server" && path == "system" {
                device.other.dns_servers.push_str(&value);
                device.other.dns_servers.push(' ');
            }
            if key == "authentication-order" && path == "system" {
                device.aaa.status = CONFIGURED.to_string();
                device.aaa.details.push(format!("Order: {value}"));
            }
            if key == "class" {
                if let Some(user) = path
                    .strip_prefix("system login user ")
                    .and_then(|rest| rest.split_whitespace().next())
                {
                    if !device.usernames.iter().any(|u| u.name == user) {
                        device.usernames.push(Username {
                            name: user.to_string(),
                            config: format!("class: {value}"),
                        });
                    }
                }
            }

            if let Some(vlan) = current_vlan.as_mut() {
                vlan.raw_config.push(line.to_string());
                if key == "vlan-id" {
                    vlan.id = value.clone();
                }
                if key == "l3-interface" {
                    l3_interfaces.insert(value.clone(), vlan.name.clone());
                }
            }

            if let Some(port) = current_port.as_mut() {
                port.config.push(line.to_string());
                if key == "description" {
                    port.description = value.clone();
                    if port.description.to_lowercase().contains("uplink") {
                        let name = port.port.clone();
                        device.register_uplink(&name);
                    }
                }
                if key == "disable" {
                    port.status = "down".to_string();
                }
                if key == "address" && context.iter().any(|c| c == "family inet") {
                    if let Some((ip, prefix)) = split_cidr(&value) {
                        let svi_name = port.port.clone();
                        let vlan_name = l3_interfaces.get(&svi_name).cloned();
                        let vlan_id = vlan_name
                            .as_deref()
                            .and_then(|name| device.vlans.iter().find(|v| v.name == name))
                            .map(|v| v.id.clone())
                            .unwrap_or_else(|| match svi_name.split_once('.') {
                                Some((_, unit)) => unit.to_string(),
                                None => "N/A".to_string(),
                            });
                        device.svis.push(Svi {
                            svi: svi_name.clone(),
                            vlan_id: vlan_id.clone(),
                            ip_address: ip.to_string(),
                            subnet_mask: format!("/{prefix}"),
                            ip_helper_address: "N/A".to_string(),
                            status: port.status.clone(),
                            additional_info: format!(
                                "VLAN: {}",
                                vlan_name.as_deref().unwrap_or("Routed Port")
                            ),
                            raw_config: port.config.clone(),
                        });
                        device.ip_ranges.push(IpRange::from_prefix(
                            &vlan_id,
                            &svi_name,
                            &port.status,
                            ip,
                            prefix,
                        ));
                    }
                }
                if key == "ether-options" && value.contains("802.3ad") {
                    if let Some(lag) = value.split_whitespace().last() {
                        port.members.push(lag.to_string());
                        device.register_port_channel(lag);
                    }
                }
            }

            if path == "routing-options static" {
                if let Some(rest) = stmt.strip_prefix("route 0.0.0.0/0 next-hop ") {
                    if let Some(next_hop) = rest.split_whitespace().next() {
                        device.routing.default_route = next_hop.to_string();
                    }
                }
            }
            if device.ospf.status == CONFIGURED && path.starts_with("protocols ospf") {
                device.ospf.raw_config.push(line.to_string());
            }
            if let Some(area) = ospf_area.as_ref() {
                if key == "interface" && ospf_interface.is_none() {
                    device.ospf.networks.push(OspfNetwork {
                        network: value.clone(),
                        wildcard: "N/A".to_string(),
                        area: area.clone(),
                    });
                }
                if key == "passive" {
                    if let Some(iface) = ospf_interface.as_ref() {
                        if !device.ospf.passive_interfaces.contains(iface) {
                            device.ospf.passive_interfaces.push(iface.clone());
                        }
                    }
                }
            }

            if in_services {
                match key {
                    "ssh" => device.security.present.push("SSH Enabled".to_string()),
                    "telnet" => device
                        .security
                        .missing
                        .push("Telnet Enabled (Insecure)".to_string()),
                    "http" => device
                        .security
                        .missing
                        .push("HTTP Web Management Enabled (Insecure)".to_string()),
                    "https" => device
                        .security
                        .present
                        .push("HTTPS Web Management Enabled".to_string()),
                    _ => {}
                }
            }

            if context.first().map(String::as_str) == Some("snmp") && key == "community" {
                device.snmp.details.push(line.to_string());
            }
        }
    }

    // Unbalanced input: whatever is still open at end of text survives.
    if let Some(port) = current_port.take() {
        device.ports.push(port);
    }
    if let Some(vlan) = current_vlan.take() {
        device.vlans.push(vlan);
    }

    device.other.dns_servers = device.other.dns_servers.trim().to_string();
    device.ports = consolidate_ports(std::mem::take(&mut device.ports));
    device
}

fn second_token(block: &str) -> Option<String> {
    block.split_whitespace().nth(1).map(str::to_string)
}

/// `10.0.0.1/24` into address and prefix; unit-less or malformed values are
/// skipped rather than recorded as errors.
fn split_cidr(value: &str) -> Option<(&str, u8)> {
    let (ip, prefix) = value.split_once('/')?;
    if ip.is_empty() {
        return None;
    }
    let prefix: u8 = prefix.parse().ok()?;
    Some((ip, prefix))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse;

    const BASE: &str = "\
## Last commit: 2024-01-09
version 20.4R3-S1.3;
system {
    host-name EX-ACCESS-01;
    services {
        ssh;
        telnet;
    }
    login {
        user netadmin {
            class super-user;
        }
    }
    name-server 8.8.8.8;
    name-server 1.1.1.1;
}
vlans {
    USERS {
        vlan-id 100;
        l3-interface vlan.100;
    }
}
interfaces {
    ge-0/0/0 {
        description \"UPLINK to core\";
        ether-options 802.3ad ae0;
    }
    ge-0/0/1 {
        disable;
        unit 0 {
            family ethernet-switching;
        }
    }
    vlan.100 {
        family inet {
            address 10.1.100.2/24;
        }
    }
}
routing-options {
    static {
        route 0.0.0.0/0 next-hop 10.1.100.1;
    }
}
";

    #[test]
    fn system_block_and_dns_servers() {
        let device = parse(BASE);
        assert_eq!(device.hostname, "EX-ACCESS-01");
        assert_eq!(device.os_version, "20.4R3-S1.3");
        assert_eq!(device.other.dns_servers, "8.8.8.8 1.1.1.1");
        assert_eq!(device.usernames.len(), 1);
        assert_eq!(device.usernames[0].name, "netadmin");
        assert_eq!(device.usernames[0].config, "class: super-user");
    }

    #[test]
    fn services_split_into_present_and_missing() {
        let device = parse(BASE);
        assert_eq!(device.security.present, vec!["SSH Enabled"]);
        assert_eq!(device.security.missing, vec!["Telnet Enabled (Insecure)"]);
    }

    #[test]
    fn interfaces_capture_lag_and_uplink() {
        let device = parse(BASE);
        let uplink = device.ports.iter().find(|p| p.port == "ge-0/0/0").unwrap();
        assert_eq!(uplink.description, "UPLINK to core");
        assert_eq!(uplink.members, vec!["ae0"]);
        assert_eq!(device.uplinks, vec!["ge-0/0/0"]);
        assert_eq!(device.port_channels, vec!["ae0"]);
        let disabled = device.ports.iter().find(|p| p.port == "ge-0/0/1").unwrap();
        assert_eq!(disabled.status, "down");
    }

    #[test]
    fn l3_interface_maps_svi_back_to_vlan() {
        let device = parse(BASE);
        assert_eq!(device.vlans.len(), 1);
        assert_eq!(device.vlans[0].id, "100");
        assert_eq!(device.svis.len(), 1);
        let svi = &device.svis[0];
        assert_eq!(svi.svi, "vlan.100");
        assert_eq!(svi.vlan_id, "100");
        assert_eq!(svi.ip_address, "10.1.100.2");
        assert_eq!(svi.additional_info, "VLAN: USERS");
        assert_eq!(device.ip_ranges.len(), 1);
        assert_eq!(device.ip_ranges[0].network, "10.1.100.0");
        assert_eq!(device.ip_ranges[0].broadcast, "10.1.100.255");
        assert_eq!(device.ip_ranges[0].subnet_mask, "255.255.255.0 (/24)");
    }

    #[test]
    fn default_route_only_inside_static_block() {
        let device = parse(BASE);
        assert_eq!(device.routing.default_route, "10.1.100.1");
    }

    #[test]
    fn ospf_areas_interfaces_and_passive() {
        let device = parse(
            "protocols {\n    ospf {\n        area 0.0.0.0 {\n            interface ge-0/0/0.0;\n            interface ge-0/0/1.0 {\n                passive;\n            }\n            interface ge-0/0/2.0;\n        }\n    }\n}\n",
        );
        assert_eq!(device.ospf.status, "Configured");
        assert_eq!(device.ospf.networks.len(), 2);
        assert_eq!(device.ospf.networks[0].network, "ge-0/0/0.0");
        assert_eq!(device.ospf.networks[0].area, "0.0.0.0");
        assert_eq!(device.ospf.networks[1].network, "ge-0/0/2.0");
        assert_eq!(device.ospf.networks[1].area, "0.0.0.0");
        assert_eq!(device.ospf.passive_interfaces, vec!["ge-0/0/1.0"]);
        assert!(device.ospf.raw_config.iter().any(|l| l.contains("ospf {")));
    }

    #[test]
    fn snmp_community_statements() {
        let device = parse("snmp {\n    community public;\n    location \"rack 4\";\n}\n");
        assert_eq!(device.snmp.status, "Configured");
        assert_eq!(device.snmp.details, vec!["community public;"]);
    }

    #[test]
    fn comments_are_ignored() {
        let device = parse("## comment\n/* annotation */\nversion 1.0;\n");
        assert_eq!(device.os_version, "1.0");
    }
}
