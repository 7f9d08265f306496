//! H3C Comware audit rules.
//!
//! ## Checks Performed
//!
//! 1. **Interface descriptions** — active ports carry a label
//! 2. **Port security** — enabled on access-mode ports
//! 3. **Hostname** — not the factory default

use crate::audit::{id_slug, practice, risk, Finding, Remediation, Severity};
use crate::model::DeviceConfig;

pub fn h3c_findings(device: &DeviceConfig) -> Vec<Finding> {
    let mut out = Vec::new();

    for port in device.ports.iter().filter(|p| {
        !p.status.eq_ignore_ascii_case("down")
            && !p.port.to_lowercase().starts_with("bridge-aggregation")
            && p.description.is_empty()
    }) {
        out.push(practice(
            &format!("h3c_bp_no_desc_{}", id_slug(&port.port)),
            Severity::Low,
            format!("Interface {} is active but missing a description.", port.port),
            "Add a descriptive label to all active interfaces to aid in network management and troubleshooting.",
            vec![
                Remediation::new("system-view", "Enter system view."),
                Remediation::new(format!("interface {}", port.port), "Enter interface view."),
                Remediation::new("description *** YOUR_DESCRIPTION_HERE ***", "Set a descriptive label."),
            ],
        ));
    }

    let unsecured: Vec<&str> = device
        .ports
        .iter()
        .filter(|p| {
            p.link_type.to_lowercase().contains("access")
                && !p.config.iter().any(|c| c.contains("port-security"))
        })
        .map(|p| p.port.as_str())
        .collect();
    if !unsecured.is_empty() {
        out.push(risk(
            "h3c_sec_missing_port_security",
            Severity::Medium,
            format!("Found {} access port(s) without port-security enabled.", unsecured.len()),
            "Enable port-security on all access ports to limit the number of allowed MAC addresses and mitigate spoofing attacks.",
            unsecured
                .iter()
                .flat_map(|port| {
                    vec![
                        Remediation::new("system-view", "Enter system view."),
                        Remediation::new(format!("interface {port}"), format!("Enter config for {port}.")),
                        Remediation::new("port-security enable", "Enable port security."),
                    ]
                })
                .collect(),
        ));
    }

    if device.hostname.is_empty() || device.hostname.eq_ignore_ascii_case("h3c") {
        out.push(practice(
            "h3c_bp_default_hostname",
            Severity::Low,
            "The device has a default hostname (\"H3C\").",
            "Assign a unique and descriptive hostname to the device for easier identification and management.",
            vec![
                Remediation::new("system-view", "Enter system view."),
                Remediation::new("sysname YOUR_HOSTNAME_HERE", "Set a unique hostname."),
            ],
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::h3c_findings;
    use crate::model::{DeviceConfig, Port, Vendor};

    fn hardened_device() -> DeviceConfig {
        let mut device = DeviceConfig::new(Vendor::H3c);
        device.hostname = "H3C-ACCESS".to_string();
        device
    }

    #[test]
    fn hardened_device_is_clean() {
        assert!(h3c_findings(&hardened_device()).is_empty());
    }

    #[test]
    fn aggregation_groups_skip_description_check() {
        let mut device = hardened_device();
        device
            .ports
            .push(Port::new("Bridge-Aggregation1", "interface Bridge-Aggregation1", "up"));
        assert!(h3c_findings(&device).is_empty());
    }

    #[test]
    fn access_port_without_port_security_flagged() {
        let mut device = hardened_device();
        let mut port = Port::new("GigabitEthernet1/0/1", "interface GigabitEthernet1/0/1", "up");
        port.link_type = "access".to_string();
        port.description = "desk".to_string();
        device.ports.push(port);
        let findings = h3c_findings(&device);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "h3c_sec_missing_port_security");
    }

    #[test]
    fn default_hostname_flagged() {
        let mut device = hardened_device();
        device.hostname = "H3C".to_string();
        let findings = h3c_findings(&device);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "h3c_bp_default_hostname");
    }
}
