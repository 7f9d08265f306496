//! Huawei VRP dialect parser.
//!
//! VRP configurations separate blocks with bare `#` lines instead of `!`,
//! and batch-declare VLANs (`vlan batch 10 20 to 29`). Open interface and
//! user-interface blocks close on `#`, on the next block opener, or at end
//! of input.

use crate::consolidate::consolidate_ports;
use crate::lex::{
    args_after, contains_ignore_case, first_token, is_digits, is_dotted, token_after,
};
use crate::model::{
    DeviceConfig, IpRange, LineConfig, OspfNetwork, Port, Svi, Username, Vendor, Vlan,
    CONFIGURED,
};

const SECURITY_CHECKLIST: [&str; 3] = [
    "SSH Enabled",
    "HTTP Server Disabled",
    "Password Policy Enabled",
];

pub fn parse(text: &str) -> DeviceConfig {
    let mut device = DeviceConfig::new(Vendor::Huawei);
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let mut current_port: Option<Port> = None;
    let mut current_vty: Option<LineConfig> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if line.starts_with('#') || line.is_empty() {
            if let Some(port) = current_port.take() {
                device.ports.push(port);
            }
            if let Some(vty) = current_vty.take() {
                device.connections.push(vty);
            }
            i += 1;
            continue;
        }
        if line == "return" {
            i += 1;
            continue;
        }

        if let Some(host) = token_after(line, &["sysname"]) {
            device.hostname = host.to_string();
            i += 1;
            continue;
        }
        if line.starts_with("VRP") {
            if let Some((_, version)) = line.split_once("software, Version") {
                device.os_version = version.trim().to_string();
                i += 1;
                continue;
            }
        }

        if let Some(rest) = args_after(line, &["vlan", "batch"]) {
            parse_vlan_batch(&mut device, rest);
            i += 1;
            continue;
        }
        if let Some(id) = token_after(line, &["vlan"]).filter(|t| is_digits(t)) {
            let mut vlan = Vlan {
                id: id.to_string(),
                name: format!("VLAN{id}"),
                raw_config: vec![line.to_string()],
            };
            let mut j = i + 1;
            while j < lines.len() && !lines[j].starts_with('#') && !lines[j].starts_with("vlan ") {
                let sub = lines[j];
                if let Some(desc) = args_after(sub, &["description"]) {
                    vlan.name = desc.to_string();
                }
                vlan.raw_config.push(sub.to_string());
                j += 1;
            }
            device.vlans.push(vlan);
            i = j;
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

        if line == "aaa" {
            device.aaa.status = CONFIGURED.to_string();
            device.aaa.details.push("AAA Enabled".to_string());
            i += 1;
            continue;
        }
        if let Some(user) = local_user(line) {
            device.usernames.push(Username {
                name: user.to_string(),
                config: line.to_string(),
            });
            i += 1;
            continue;
        }

        if line.contains("stelnet server enable") {
            device.security.present.push("SSH Enabled".to_string());
        }
        if line.contains("undo http server enable") {
            device.security.present.push("HTTP Server Disabled".to_string());
        }
        if line.contains("password-policy enable") {
            device
                .security
                .present
                .push("Password Policy Enabled".to_string());
        }

        if let Some(rest) = args_after(line, &["snmp-agent"]) {
            device.snmp.status = CONFIGURED.to_string();
            device.snmp.details.push(rest.to_string());
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
            while j < lines.len() && !lines[j].starts_with("ospf ") && lines[j] != "#" {
                let sub = lines[j];
                if let Some(area_id) = token_after(sub, &["area"]) {
                    area = area_id.to_string();
                }
                if let Some(router_id) = token_after(sub, &["router-id"]) {
                    device.ospf.router_id = Some(router_id.to_string());
                }
                if let Some((network, mask)) = network_pair(sub) {
                    if !area.is_empty() {
                        device.ospf.networks.push(OspfNetwork {
                            network: network.to_string(),
                            wildcard: mask.to_string(),
                            area: area.clone(),
                        });
                    }
                }
                device.ospf.raw_config.push(sub.to_string());
                j += 1;
            }
            i = j;
            continue;
        }

        if let Some((line_type, range)) = user_interface_decl(line) {
            current_vty = Some(LineConfig {
                line_type,
                range,
                config: vec![line.to_string()],
                usernames: Vec::new(),
                description: None,
            });
            i += 1;
            continue;
        }
        if let Some(vty) = current_vty.as_mut() {
            vty.config.push(line.to_string());
            if line.contains("authentication-mode aaa") {
                vty.usernames.push("AAA".to_string());
            }
        }

        if let Some(name) = token_after(line, &["interface"]) {
            if let Some(vlan_id) = vlanif_id(name) {
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
                while j < lines.len() && !lines[j].starts_with("interface ") && lines[j] != "#" {
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

            if let Some(port) = current_port.take() {
                device.ports.push(port);
            }
            if name.to_ascii_lowercase().starts_with("eth-trunk") {
                device.register_port_channel(name);
            }
            current_port = Some(Port::new(name, line, "up"));
            i += 1;
            continue;
        }

        if let Some(port) = current_port.as_mut() {
            port.config.push(line.to_string());
            if let Some(desc) = args_after(line, &["description"]) {
                port.description = desc.to_string();
                if contains_ignore_case(desc, "uplink") {
                    let name = port.port.clone();
                    device.register_uplink(&name);
                }
            }
            if line.contains("shutdown") {
                port.status = "down".to_string();
            }
            if let Some(link_type) = token_after(line, &["port", "link-type"]) {
                port.link_type = link_type.to_string();
            }
            if let Some(trunk) = token_after(line, &["eth-trunk"]).filter(|t| is_digits(t)) {
                let aggregate = format!("Eth-Trunk{trunk}");
                port.members.push(aggregate.clone());
                device.register_port_channel(&aggregate);
            }
        }

        i += 1;
    }

    if let Some(port) = current_port.take() {
        device.ports.push(port);
    }
    if let Some(vty) = current_vty.take() {
        device.connections.push(vty);
    }

    device.security.missing = SECURITY_CHECKLIST
        .iter()
        .filter(|item| !device.security.present.iter().any(|p| p.contains(*item)))
        .map(|item| item.to_string())
        .collect();
    device.ports = consolidate_ports(std::mem::take(&mut device.ports));
    device
}

/// Expand `vlan batch 10 20 to 29 40` into individual VLAN entries.
fn parse_vlan_batch(device: &mut DeviceConfig, rest: &str) {
    let mut pending_range = false;
    for part in rest.split_whitespace() {
        if part == "to" {
            pending_range = true;
            continue;
        }
        if !is_digits(part) {
            pending_range = false;
            continue;
        }
        if pending_range {
            let start = device.vlans.last().and_then(|v| v.id.parse::<u32>().ok());
            if let (Some(start), Ok(end)) = (start, part.parse::<u32>()) {
                for id in start + 1..=end {
                    device.vlans.push(Vlan {
                        id: id.to_string(),
                        name: format!("VLAN{id}"),
                        raw_config: Vec::new(),
                    });
                }
            }
            pending_range = false;
        } else {
            device.vlans.push(Vlan {
                id: part.to_string(),
                name: format!("VLAN{part}"),
                raw_config: Vec::new(),
            });
        }
    }
}

/// `local-user <name> password ...`.
fn local_user(line: &str) -> Option<&str> {
    let rest = args_after(line, &["local-user"])?;
    let mut tokens = rest.split_whitespace();
    let name = tokens.next()?;
    match (tokens.next(), tokens.next()) {
        (Some("password"), Some(_)) => Some(name),
        _ => None,
    }
}

/// `user-interface con 0` or `user-interface vty 0 4`; the range keeps the
/// source digits with whitespace squeezed out.
fn user_interface_decl(line: &str) -> Option<(String, String)> {
    let rest = args_after(line, &["user-interface"])?;
    let mut tokens = rest.split_whitespace();
    let line_type = match tokens.next()? {
        kind @ ("con" | "vty") => kind.to_string(),
        _ => return None,
    };
    let range: String = tokens.collect::<Vec<_>>().concat();
    if range.is_empty() {
        return None;
    }
    Some((line_type, range))
}

/// `VlanifN` style SVI names, case-insensitive prefix.
fn vlanif_id(name: &str) -> Option<&str> {
    let head = name.get(..6)?;
    if head.eq_ignore_ascii_case("vlanif") {
        name.get(6..).filter(|id| !id.is_empty())
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

/// `network A.B.C.D M.M.M.M` (mask or wildcard, dialect-dependent).
fn network_pair(line: &str) -> Option<(&str, &str)> {
    let rest = args_after(line, &["network"])?;
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(network), Some(mask)) if is_dotted(network) && is_dotted(mask) => {
            Some((network, mask))
        }
        _ => None,
    }
}
