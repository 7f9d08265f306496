//! Cisco IOS audit rules.
//!
//! ## Checks Performed
//!
//! 1. **Password encryption** — `service password-encryption` present
//! 2. **HTTP server** — insecure web management disabled
//! 3. **Interface descriptions** — active ports carry a label
//! 4. **Port security** — enabled on access-mode ports
//! 5. **BPDU Guard** — enabled on access-mode ports
//! 6. **Hostname** — not the factory default

use crate::audit::{id_slug, practice, risk, Finding, Remediation, Severity};
use crate::model::DeviceConfig;

pub fn cisco_findings(device: &DeviceConfig) -> Vec<Finding> {
    let mut out = Vec::new();

    if !device.security.present.iter().any(|p| p == "Password Encryption") {
        out.push(risk(
            "cisco_sec_no_password_encryption",
            Severity::Medium,
            "The \"service password-encryption\" command is missing.",
            "Enable password encryption to prevent casual viewing of clear-text passwords in the configuration file.",
            vec![
                Remediation::new("configure terminal", "Enter global configuration mode."),
                Remediation::new("service password-encryption", "Enable password encryption service."),
            ],
        ));
    }

    if !device.security.present.iter().any(|p| p == "HTTP/HTTPS Server Disabled") {
        out.push(risk(
            "cisco_sec_http_server_enabled",
            Severity::High,
            "The insecure HTTP server is enabled.",
            "The HTTP server transmits data in clear text and should be disabled. If web management is required, use the secure HTTPS server instead.",
            vec![
                Remediation::new("configure terminal", "Enter global configuration mode."),
                Remediation::new("no ip http server", "Disable the insecure HTTP server."),
                Remediation::new("no ip http secure-server", "Disable the secure server as well if unused."),
            ],
        ));
    }

    for port in device.ports.iter().filter(|p| {
        !p.status.eq_ignore_ascii_case("disabled")
            && !p.port.to_lowercase().starts_with("port-channel")
            && p.description.is_empty()
    }) {
        out.push(practice(
            &format!("cisco_bp_no_desc_{}", id_slug(&port.port)),
            Severity::Low,
            format!("Interface {} is active but missing a description.", port.port),
            "Add a descriptive label to all active interfaces to aid in network management and troubleshooting.",
            vec![
                Remediation::new("configure terminal", "Enter global configuration mode."),
                Remediation::new(format!("interface {}", port.port), "Enter interface configuration mode."),
                Remediation::new("description *** YOUR_DESCRIPTION_HERE ***", "Set a descriptive label."),
            ],
        ));
    }

    let unsecured: Vec<&str> = device
        .ports
        .iter()
        .filter(|p| {
            p.link_type.to_lowercase().contains("access")
                && !p.config.iter().any(|c| c.contains("switchport port-security"))
        })
        .map(|p| p.port.as_str())
        .collect();
    if !unsecured.is_empty() {
        out.push(risk(
            "cisco_sec_missing_port_security",
            Severity::Medium,
            format!("Found {} access port(s) without port-security enabled.", unsecured.len()),
            "Enable port-security on all access ports to mitigate MAC spoofing and flooding attacks by limiting the number of allowed MAC addresses.",
            per_port_remediation(&unsecured, "switchport port-security", "Enable port security."),
        ));
    }

    let unguarded: Vec<&str> = device
        .ports
        .iter()
        .filter(|p| {
            p.link_type.to_lowercase().contains("access")
                && !p.config.iter().any(|c| c.contains("spanning-tree bpduguard enable"))
        })
        .map(|p| p.port.as_str())
        .collect();
    if !unguarded.is_empty() {
        out.push(practice(
            "cisco_bp_missing_bpduguard",
            Severity::Medium,
            format!("Found {} access port(s) without BPDU Guard enabled.", unguarded.len()),
            "Enable BPDU Guard on all access ports to prevent unauthorized switches from joining the spanning-tree topology.",
            per_port_remediation(&unguarded, "spanning-tree bpduguard enable", "Enable BPDU Guard."),
        ));
    }

    if device.hostname.is_empty() || device.hostname.eq_ignore_ascii_case("switch") {
        out.push(practice(
            "cisco_bp_default_hostname",
            Severity::Low,
            "The device has a default hostname (e.g. \"Switch\").",
            "Assign a unique and descriptive hostname to the device for easier identification and management on the network.",
            vec![
                Remediation::new("configure terminal", "Enter global configuration mode."),
                Remediation::new("hostname YOUR_HOSTNAME_HERE", "Set a unique hostname."),
            ],
        ));
    }

    out
}

fn per_port_remediation(ports: &[&str], fix: &str, context: &str) -> Vec<Remediation> {
    ports
        .iter()
        .flat_map(|port| {
            vec![
                Remediation::new("configure terminal", "Enter global configuration mode."),
                Remediation::new(format!("interface {port}"), format!("Enter config for {port}.")),
                Remediation::new(fix, context),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::cisco_findings;
    use crate::audit::Severity;
    use crate::model::{DeviceConfig, Port, Vendor};

    fn base_device() -> DeviceConfig {
        let mut device = DeviceConfig::new(Vendor::Cisco);
        device.hostname = "SW-CORE".to_string();
        device.security.present = vec![
            "Password Encryption".to_string(),
            "HTTP/HTTPS Server Disabled".to_string(),
        ];
        device
    }

    #[test]
    fn hardened_device_is_clean() {
        let findings = cisco_findings(&base_device());
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    #[test]
    fn http_server_is_high_severity() {
        let mut device = base_device();
        device.security.present.retain(|p| p != "HTTP/HTTPS Server Disabled");
        let findings = cisco_findings(&device);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "cisco_sec_http_server_enabled");
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn disabled_ports_skip_description_check() {
        let mut device = base_device();
        device.ports.push(Port::new(
            "GigabitEthernet1/0/2",
            "interface GigabitEthernet1/0/2",
            "Disabled",
        ));
        assert!(cisco_findings(&device).is_empty());
    }

    #[test]
    fn access_ports_without_port_security_grouped() {
        let mut device = base_device();
        for n in 1..=3 {
            let mut port = Port::new(
                format!("GigabitEthernet1/0/{n}"),
                format!("interface GigabitEthernet1/0/{n}"),
                "Enabled",
            );
            port.link_type = "access".to_string();
            port.description = "workstation".to_string();
            port.config.push("spanning-tree bpduguard enable".to_string());
            device.ports.push(port);
        }
        let findings = cisco_findings(&device);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "cisco_sec_missing_port_security");
        assert!(findings[0].description.contains("3 access port(s)"));
        assert_eq!(findings[0].remediation_commands.len(), 9);
    }

    #[test]
    fn default_hostname_flagged() {
        let mut device = base_device();
        device.hostname = "Switch".to_string();
        let findings = cisco_findings(&device);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "cisco_bp_default_hostname");
    }
}
