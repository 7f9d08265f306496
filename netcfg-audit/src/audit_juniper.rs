//! Juniper Junos audit rules.
//!
//! ## Checks Performed
//!
//! 1. **Telnet** — insecure service disabled under `[system services]`
//! 2. **HTTP web management** — insecure service disabled
//! 3. **Interface descriptions** — active ports carry a label
//! 4. **Hostname** — configured at all
//! 5. **Authentication order** — centralized AAA configured

use crate::audit::{id_slug, practice, risk, Finding, Remediation, Severity};
use crate::model::{DeviceConfig, CONFIGURED};

pub fn juniper_findings(device: &DeviceConfig) -> Vec<Finding> {
    let mut out = Vec::new();

    if device
        .security
        .missing
        .iter()
        .any(|m| m == "Telnet Enabled (Insecure)")
    {
        out.push(risk(
            "juniper_sec_telnet_enabled",
            Severity::High,
            "The insecure Telnet service is enabled under [system services].",
            "Telnet transmits data in clear text and should be disabled in favor of SSH.",
            vec![
                Remediation::new("configure", "Enter configuration mode."),
                Remediation::new("delete system services telnet", "Disable the insecure Telnet service."),
                Remediation::new("commit", "Commit the configuration change."),
            ],
        ));
    }

    if device
        .security
        .missing
        .iter()
        .any(|m| m == "HTTP Web Management Enabled (Insecure)")
    {
        out.push(risk(
            "juniper_sec_http_enabled",
            Severity::High,
            "Insecure HTTP web management is enabled under [system services web-management].",
            "HTTP web management is insecure and should be disabled. Use the secure HTTPS service if web management is required.",
            vec![
                Remediation::new("configure", "Enter configuration mode."),
                Remediation::new("delete system services web-management http", "Disable the insecure HTTP service."),
                Remediation::new("commit", "Commit the configuration change."),
            ],
        ));
    }

    for port in device.ports.iter().filter(|p| {
        !p.status.eq_ignore_ascii_case("down")
            && !p.port.to_lowercase().starts_with("ae")
            && p.description.is_empty()
    }) {
        out.push(practice(
            &format!("juniper_bp_no_desc_{}", id_slug(&port.port)),
            Severity::Low,
            format!("Interface {} is active but missing a description.", port.port),
            "Add a descriptive label to all active interfaces to aid in network management and troubleshooting.",
            vec![
                Remediation::new("configure", "Enter configuration mode."),
                Remediation::new(
                    format!("set interfaces {} description \"*** YOUR_DESCRIPTION_HERE ***\"", port.port),
                    "Set a descriptive label.",
                ),
                Remediation::new("commit", "Commit the configuration change."),
            ],
        ));
    }

    if device.hostname.is_empty() {
        out.push(practice(
            "juniper_bp_default_hostname",
            Severity::Low,
            "The device does not have a configured hostname.",
            "Assign a unique and descriptive hostname to the device for easier identification and management.",
            vec![
                Remediation::new("configure", "Enter configuration mode."),
                Remediation::new("set system host-name YOUR_HOSTNAME_HERE", "Set a unique hostname."),
                Remediation::new("commit", "Commit the configuration change."),
            ],
        ));
    }

    if device.aaa.status != CONFIGURED {
        out.push(risk(
            "juniper_sec_no_aaa",
            Severity::Medium,
            "Centralized authentication (AAA) order is not configured.",
            "Configure an authentication order (e.g. radius, tacplus, password) to use centralized authentication servers instead of local-only passwords.",
            vec![
                Remediation::new("configure", "Enter configuration mode."),
                Remediation::new(
                    "set system authentication-order [ radius tacplus password ]",
                    "Set the desired authentication order.",
                ),
                Remediation::new("commit", "Commit the configuration change."),
            ],
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::juniper_findings;
    use crate::audit::Severity;
    use crate::model::{DeviceConfig, Port, Vendor, CONFIGURED};

    fn hardened_device() -> DeviceConfig {
        let mut device = DeviceConfig::new(Vendor::Juniper);
        device.hostname = "EX-ACCESS-01".to_string();
        device.aaa.status = CONFIGURED.to_string();
        device
    }

    #[test]
    fn hardened_device_is_clean() {
        assert!(juniper_findings(&hardened_device()).is_empty());
    }

    #[test]
    fn telnet_flagged_from_missing_list() {
        let mut device = hardened_device();
        device.security.missing.push("Telnet Enabled (Insecure)".to_string());
        let findings = juniper_findings(&device);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "juniper_sec_telnet_enabled");
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn lag_interfaces_skip_description_check() {
        let mut device = hardened_device();
        device.ports.push(Port::new("ae0", "ae0 {", "up"));
        let mut bare = Port::new("ge-0/0/7", "ge-0/0/7 {", "up");
        bare.description = "printer".to_string();
        device.ports.push(bare);
        assert!(juniper_findings(&device).is_empty());
    }

    #[test]
    fn missing_aaa_is_medium() {
        let mut device = hardened_device();
        device.aaa.status = "Not configured".to_string();
        let findings = juniper_findings(&device);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "juniper_sec_no_aaa");
        assert_eq!(findings[0].severity, Severity::Medium);
    }
}
