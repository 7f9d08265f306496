//! H3C Comware dialect parser.
//!
//! Comware reads like a blend of the other CLI dialects: `#` separators and
//! `sysname` as on Huawei VRP, `interface Vlan-interface10` SVIs, and
//! `Bridge-AggregationN` link aggregation groups.

use crate::consolidate::consolidate_ports;
use crate::lex::{args_after, contains_ignore_case, first_token, is_digits, is_dotted, token_after};
use crate::model::{DeviceConfig, IpRange, OspfNetwork, Port, Svi, Vendor, Vlan, CONFIGURED};

pub fn parse(text: &str) -> DeviceConfig {
    let mut device = DeviceConfig::new(Vendor::H3c);
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if line.starts_with('#') {
            i += 1;
            continue;
        }

        if let Some(host) = token_after(line, &["sysname"]) {
            device.hostname = host.to_string();
            i += 1;
            continue;
        }
        if let Some(rest) = line.strip_prefix("Comware Software, Version") {
            device.os_version = rest.trim().to_string();
            i += 1;
            continue;
        }

        if let Some(id) = token_after(line, &["vlan"]).filter(|t| is_digits(t)) {
            let mut vlan = Vlan {
                id: id.to_string(),
                name: format!("VLAN{id}"),
                raw_config: vec![line.to_string()],
            };
            if let Some(name) = lines.get(i + 1).and_then(|next| args_after(next, &["name"])) {
                vlan.name = name.to_string();
                vlan.raw_config.push(lines[i + 1].to_string());
                i += 1;
            }
            device.vlans.push(vlan);
            i += 1;
            continue;
        }

        if let Some(next_hop) = token_after(line, &["ip", "route-static", "0.0.0.0", "0.0.0.0"]) {
            device.routing.default_route = next_hop.to_string();
            i += 1;
            continue;
        }
        if let Some(servers) = args_after(line, &["dns", "server"]) {
            device.other.dns_servers = servers.to_string();
            i += 1;
            continue;
        }

        if let Some(rest) = args_after(line, &["ospf"]) {
            device.ospf.status = CONFIGURED.to_string();
            let process = first_token(rest).filter(|t| is_digits(t)).unwrap_or("1");
            device.ospf.process_id = Some(process.to_string());
            device.ospf.raw_config.push(line.to_string());

            let mut area = String::new();
            let mut j = i + 1;
            while j < lines.len() {
                let sub = lines[j];
                if sub.starts_with('#') || sub == "]" {
                    break;
                }
                device.ospf.raw_config.push(sub.to_string());
                if let Some(area_id) = token_after(sub, &["area"]) {
                    area = area_id.to_string();
                }
                if let Some(router_id) = token_after(sub, &["router-id"]) {
                    device.ospf.router_id = Some(router_id.to_string());
                }
                if let Some((network, wildcard)) = network_pair(sub) {
                    if !area.is_empty() {
                        device.ospf.networks.push(OspfNetwork {
                            network: network.to_string(),
                            wildcard: wildcard.to_string(),
                            area: area.clone(),
                        });
                    }
                }
                j += 1;
            }
            i = j;
            continue;
        }

        if let Some(name) = token_after(line, &["interface"]) {
            if let Some(vlan_id) = vlan_interface_id(name) {
                let mut svi = Svi {
                    svi: name.to_string(),
                    vlan_id: vlan_id.to_string(),
                    ip_address: "unassigned".to_string(),
                    subnet_mask: String::new(),
                    ip_helper_address: "N/A".to_string(),
                    status: "up".to_string(),
                    additional_info: String::new(),
                    raw_config: vec![line.to_string()],
                };
                let mut j = i + 1;
                while j < lines.len()
                    && !lines[j].starts_with("interface ")
                    && !lines[j].starts_with('#')
                {
                    let sub = lines[j];
                    svi.raw_config.push(sub.to_string());
                    if let Some((addr, mask)) = address_pair(sub) {
                        svi.ip_address = addr.to_string();
                        svi.subnet_mask = mask.to_string();
                        device
                            .ip_ranges
                            .push(IpRange::from_mask(vlan_id, name, "up", addr, mask));
                    }
                    if sub.contains("shutdown") {
                        svi.status = "down".to_string();
                    }
                    if let Some(desc) = args_after(sub, &["description"]) {
                        svi.additional_info.push_str(&format!("Description: {desc}"));
                    }
                    j += 1;
                }
                device.svis.push(svi);
                i = j;
                continue;
            }

            if name.to_ascii_lowercase().starts_with("bridge-aggregation") {
                device.register_port_channel(name);
            }
            let mut port = Port::new(name, line, "up");
            let mut j = i + 1;
            while j < lines.len()
                && !lines[j].starts_with("interface ")
                && !lines[j].starts_with('#')
            {
                let sub = lines[j];
                port.config.push(sub.to_string());
                if let Some(desc) = args_after(sub, &["description"]) {
                    port.description = desc.to_string();
                    if contains_ignore_case(desc, "uplink") {
                        device.register_uplink(name);
                    }
                }
                if sub.contains("shutdown") {
                    port.status = "down".to_string();
                }
                if let Some(link_type) = token_after(sub, &["port", "link-type"]) {
                    port.link_type = link_type.to_string();
                }
                if let Some(group) =
                    token_after(sub, &["port", "link-aggregation", "group"]).filter(|t| is_digits(t))
                {
                    let aggregate = format!("Bridge-Aggregation{group}");
                    port.members.push(aggregate.clone());
                    device.register_port_channel(&aggregate);
                }
                j += 1;
            }
            device.ports.push(port);
            i = j;
            continue;
        }

        i += 1;
    }

    device.ports = consolidate_ports(std::mem::take(&mut device.ports));
    device
}

/// `Vlan-interfaceN` style SVI names, case-insensitive prefix.
fn vlan_interface_id(name: &str) -> Option<&str> {
    const PREFIX: &str = "vlan-interface";
    let head = name.get(..PREFIX.len())?;
    if head.eq_ignore_ascii_case(PREFIX) {
        name.get(PREFIX.len()..).filter(|id| !id.is_empty())
    } else {
        None
    }
}

/// `ip address A.B.C.D M.M.M.M`.
fn address_pair(line: &str) -> Option<(&str, &str)> {
    let rest = args_after(line, &["ip", "address"])?;
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(addr), Some(mask)) if is_dotted(addr) && is_dotted(mask) => Some((addr, mask)),
        _ => None,
    }
}

/// `network A.B.C.D W.W.W.W`.
fn network_pair(line: &str) -> Option<(&str, &str)> {
    let rest = args_after(line, &["network"])?;
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(network), Some(wildcard)) if is_dotted(network) && is_dotted(wildcard) => {
            Some((network, wildcard))
        }
        _ => None,
    }
}
