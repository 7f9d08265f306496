//! Port-range consolidation for compact reporting.
//!
//! Adjacent interfaces that carry byte-identical configuration collapse into
//! a single `"Gig1/0/1 - Gig1/0/24"` row. Two ports merge only when the
//! second is the numeric successor of the first and their sub-configuration
//! (everything after the declaration line), description, status, link type,
//! and member list all match exactly. The result is deterministic and
//! idempotent: range labels do not decompose as port names, so a second run
//! leaves them untouched.

use netcalc_core::ports::{compare_names, PortName};

use crate::model::Port;

struct Range {
    start: String,
    end: String,
    port: Port,
}

impl Range {
    fn open(port: Port) -> Range {
        Range {
            start: port.port.clone(),
            end: port.port.clone(),
            port,
        }
    }

    fn close(mut self) -> Port {
        if self.start != self.end {
            self.port.port = format!("{} - {}", self.start, self.end);
        }
        self.port
    }
}

/// Merge sequential, identically configured ports into labeled ranges.
pub fn consolidate_ports(ports: Vec<Port>) -> Vec<Port> {
    let mut ports: Vec<Port> = ports
        .into_iter()
        .filter(|port| !port.port.trim().is_empty())
        .collect();
    ports.sort_by(|a, b| compare_names(&a.port, &b.port));

    let mut consolidated = Vec::new();
    let mut current: Option<Range> = None;

    for port in ports {
        current = Some(match current.take() {
            None => Range::open(port),
            Some(mut range) => {
                if extends(&range, &port) {
                    range.end = port.port;
                    range
                } else {
                    consolidated.push(range.close());
                    Range::open(port)
                }
            }
        });
    }
    if let Some(range) = current {
        consolidated.push(range.close());
    }

    consolidated
}

fn extends(range: &Range, port: &Port) -> bool {
    let (Some(end), Some(next)) = (PortName::parse(&range.end), PortName::parse(&port.port))
    else {
        return false;
    };
    next.is_successor_of(&end)
        && sub_config(&range.port) == sub_config(port)
        && range.port.link_type == port.link_type
        && range.port.description == port.description
        && range.port.status == port.status
        && range.port.members == port.members
}

/// Block lines with the `interface ...` declaration itself excluded.
fn sub_config(port: &Port) -> &[String] {
    port.config.get(1..).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::consolidate_ports;
    use crate::model::Port;

    fn access_port(name: &str) -> Port {
        Port {
            port: name.to_string(),
            link_type: "access".to_string(),
            config: vec![
                format!("interface {name}"),
                "switchport mode access".to_string(),
                "switchport access vlan 10".to_string(),
            ],
            description: String::new(),
            status: "Enabled".to_string(),
            members: Vec::new(),
        }
    }

    #[test]
    fn sequential_identical_ports_collapse_to_one_range() {
        let ports: Vec<Port> = (1..=24).map(|n| access_port(&format!("Gig1/0/{n}"))).collect();
        let consolidated = consolidate_ports(ports);
        assert_eq!(consolidated.len(), 1);
        assert_eq!(consolidated[0].port, "Gig1/0/1 - Gig1/0/24");
        assert_eq!(consolidated[0].link_type, "access");
    }

    #[test]
    fn consolidation_is_idempotent() {
        let ports: Vec<Port> = (1..=24).map(|n| access_port(&format!("Gig1/0/{n}"))).collect();
        let once = consolidate_ports(ports);
        let twice = consolidate_ports(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn differing_descriptions_do_not_merge() {
        let mut a = access_port("Gig1/0/1");
        let mut b = access_port("Gig1/0/2");
        a.description = "printer".to_string();
        b.description = "camera".to_string();
        let consolidated = consolidate_ports(vec![a, b]);
        assert_eq!(consolidated.len(), 2);
        assert_eq!(consolidated[0].port, "Gig1/0/1");
        assert_eq!(consolidated[1].port, "Gig1/0/2");
    }

    #[test]
    fn gap_in_numbering_splits_the_range() {
        let ports = vec![access_port("Gig1/0/1"), access_port("Gig1/0/2"), access_port("Gig1/0/4")];
        let consolidated = consolidate_ports(ports);
        assert_eq!(consolidated.len(), 2);
        assert_eq!(consolidated[0].port, "Gig1/0/1 - Gig1/0/2");
        assert_eq!(consolidated[1].port, "Gig1/0/4");
    }

    #[test]
    fn input_order_does_not_matter() {
        let ports = vec![access_port("Gig1/0/10"), access_port("Gig1/0/9"), access_port("Gig1/0/2")];
        let consolidated = consolidate_ports(ports);
        assert_eq!(consolidated.len(), 2);
        assert_eq!(consolidated[0].port, "Gig1/0/2");
        assert_eq!(consolidated[1].port, "Gig1/0/9 - Gig1/0/10");
    }

    #[test]
    fn single_port_keeps_its_name() {
        let mut lo = access_port("Loopback0");
        lo.config = vec!["interface Loopback0".to_string()];
        let consolidated = consolidate_ports(vec![lo.clone()]);
        assert_eq!(consolidated, vec![lo]);
    }
}
