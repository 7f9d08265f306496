//! Huawei VRP audit rules.
//!
//! ## Checks Performed
//!
//! 1. **Stelnet (SSH)** — SSH server enabled for remote management
//! 2. **HTTP server** — insecure web management disabled
//! 3. **Password policy** — global complexity policy enabled
//! 4. **Interface descriptions** — active ports carry a label
//! 5. **Hostname** — not the factory default

use crate::audit::{id_slug, practice, risk, Finding, Remediation, Severity};
use crate::model::DeviceConfig;

pub fn huawei_findings(device: &DeviceConfig) -> Vec<Finding> {
    let mut out = Vec::new();

    if !device.security.present.iter().any(|p| p == "SSH Enabled") {
        out.push(risk(
            "huawei_sec_ssh_disabled",
            Severity::High,
            "The SSH server (Stelnet) is not enabled.",
            "Enable the SSH server for secure remote management. Telnet is insecure and should be avoided.",
            vec![
                Remediation::new("system-view", "Enter system view."),
                Remediation::new("stelnet server enable", "Enable the SSH (Stelnet) server."),
                Remediation::new("rsa local-key-pair create", "Generate an RSA key pair (if not present)."),
            ],
        ));
    }

    if !device.security.present.iter().any(|p| p == "HTTP Server Disabled") {
        out.push(risk(
            "huawei_sec_http_server_enabled",
            Severity::High,
            "The insecure HTTP server is enabled.",
            "The HTTP server is insecure and should be disabled with \"undo http server enable\". Use HTTPS if web management is required.",
            vec![
                Remediation::new("system-view", "Enter system view."),
                Remediation::new("undo http server enable", "Disable the insecure HTTP server."),
            ],
        ));
    }

    if !device.security.present.iter().any(|p| p == "Password Policy Enabled") {
        out.push(risk(
            "huawei_sec_no_password_policy",
            Severity::Medium,
            "The global password complexity policy is not enabled.",
            "Enable the password policy to enforce complexity requirements for local user accounts, making them harder to guess.",
            vec![
                Remediation::new("system-view", "Enter system view."),
                Remediation::new("password-policy enable", "Enable the password policy feature."),
            ],
        ));
    }

    for port in device.ports.iter().filter(|p| {
        !p.status.eq_ignore_ascii_case("down")
            && !p.port.to_lowercase().starts_with("eth-trunk")
            && p.description.is_empty()
    }) {
        out.push(practice(
            &format!("huawei_bp_no_desc_{}", id_slug(&port.port)),
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

    if device.hostname.is_empty() || device.hostname.eq_ignore_ascii_case("huawei") {
        out.push(practice(
            "huawei_bp_default_hostname",
            Severity::Low,
            "The device has a default hostname (\"Huawei\").",
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
    use super::huawei_findings;
    use crate::model::{DeviceConfig, Port, Vendor};

    fn hardened_device() -> DeviceConfig {
        let mut device = DeviceConfig::new(Vendor::Huawei);
        device.hostname = "CORE-SW".to_string();
        device.security.present = vec![
            "SSH Enabled".to_string(),
            "HTTP Server Disabled".to_string(),
            "Password Policy Enabled".to_string(),
        ];
        device
    }

    #[test]
    fn hardened_device_is_clean() {
        assert!(huawei_findings(&hardened_device()).is_empty());
    }

    #[test]
    fn missing_ssh_and_policy() {
        let mut device = hardened_device();
        device.security.present = vec!["HTTP Server Disabled".to_string()];
        let ids: Vec<String> = huawei_findings(&device).into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["huawei_sec_ssh_disabled", "huawei_sec_no_password_policy"]);
    }

    #[test]
    fn trunk_aggregates_skip_description_check() {
        let mut device = hardened_device();
        device.ports.push(Port::new("Eth-Trunk1", "interface Eth-Trunk1", "up"));
        let mut down = Port::new("GigabitEthernet0/0/5", "interface GigabitEthernet0/0/5", "down");
        down.status = "down".to_string();
        device.ports.push(down);
        assert!(huawei_findings(&device).is_empty());
    }

    #[test]
    fn active_port_without_description_flagged() {
        let mut device = hardened_device();
        device.ports.push(Port::new(
            "GigabitEthernet0/0/1",
            "interface GigabitEthernet0/0/1",
            "up",
        ));
        let findings = huawei_findings(&device);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "huawei_bp_no_desc_GigabitEthernet001");
    }
}
