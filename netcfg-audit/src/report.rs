//! Terminal rendering for parsed devices and audit reports.

use colored::Colorize;

use crate::audit::{AuditReport, FindingKind, Severity};
use crate::model::DeviceConfig;

/// Render the parsed device summary for terminal output.
pub fn render_device(device: &DeviceConfig) -> String {
    let mut out = Vec::new();

    out.push(format!(
        "{} {} ({})",
        "device".cyan().bold(),
        display_or(&device.hostname, "<unnamed>"),
        device.vendor
    ));
    if !device.model_number.is_empty() {
        out.push(format!("- model: {}", device.model_number));
    }
    if !device.os_version.is_empty() {
        out.push(format!("- os version: {}", device.os_version));
    }

    out.push(format!("{} ({})", "vlans".cyan(), device.vlans.len()));
    for vlan in &device.vlans {
        out.push(format!("- {}: {}", vlan.id, vlan.name));
    }

    out.push(format!("{} ({})", "ports".cyan(), device.ports.len()));
    for port in &device.ports {
        let status = if port.status.eq_ignore_ascii_case("down")
            || port.status.eq_ignore_ascii_case("disabled")
        {
            port.status.red().to_string()
        } else {
            port.status.green().to_string()
        };
        let mut line = format!("- {} [{}] {}", port.port, port.link_type, status);
        if !port.description.is_empty() {
            line.push_str(&format!(" # {}", port.description));
        }
        if !port.members.is_empty() {
            line.push_str(&format!(" members={}", port.members.join(",")));
        }
        out.push(line);
    }

    out.push(format!("{} ({})", "ip ranges".cyan(), device.ip_ranges.len()));
    for range in &device.ip_ranges {
        out.push(format!(
            "- vlan {} via {}: {} mask {} network {} broadcast {} usable {} ({})",
            range.vlan_id,
            range.svi,
            range.ip_address,
            range.subnet_mask,
            range.network,
            range.broadcast,
            range.usable_range,
            range.usable_addresses
        ));
    }

    out.push("routing".cyan().to_string());
    out.push(format!(
        "- default gateway: {}",
        display_or(&device.routing.default_gateway, "none")
    ));
    out.push(format!(
        "- default route: {}",
        display_or(&device.routing.default_route, "none")
    ));
    out.push(format!("- ospf: {}", device.ospf.status));
    for network in &device.ospf.networks {
        out.push(format!(
            "  - area {}: {} {}",
            network.area, network.network, network.wildcard
        ));
    }

    out.push("services".cyan().to_string());
    out.push(format!("- snmp: {}", device.snmp.status));
    out.push(format!("- aaa: {}", device.aaa.status));
    if !device.other.dns_servers.is_empty() {
        out.push(format!("- dns: {}", device.other.dns_servers));
    }
    if !device.dhcp_pools.is_empty() {
        out.push(format!("- dhcp pools: {}", device.dhcp_pools.len()));
    }

    out.push("security".cyan().to_string());
    for item in &device.security.present {
        out.push(format!("- {} {}", "ok".green(), item));
    }
    for item in &device.security.missing {
        out.push(format!("- {} {}", "missing".red(), item));
    }

    out.join("\n")
}

/// Render audit findings for terminal output.
pub fn render_audit(report: &AuditReport) -> String {
    let mut out = Vec::new();

    out.push(format!(
        "{} {} ({}): {} security risk(s), {} best practice issue(s)",
        "audit".cyan().bold(),
        display_or(&report.hostname, "<unnamed>"),
        report.vendor,
        report.security_risks,
        report.best_practices
    ));

    for finding in &report.findings {
        let severity = match finding.severity {
            Severity::Critical | Severity::High => finding.severity.as_str().red().bold(),
            Severity::Medium => finding.severity.as_str().yellow(),
            Severity::Low | Severity::Info => finding.severity.as_str().normal(),
        };
        let kind = match finding.kind {
            FindingKind::SecurityRisk => "Security Risk".red().to_string(),
            FindingKind::BestPractice => "Best Practice".yellow().to_string(),
            FindingKind::Suggestion => "Suggestion".to_string(),
        };
        out.push(format!("[{severity}] {kind} {}", finding.id));
        out.push(format!("  {}", finding.description));
        out.push(format!("  fix: {}", finding.recommendation));
        for step in &finding.remediation_commands {
            out.push(format!("    $ {}  # {}", step.command, step.context));
        }
    }

    if report.findings.is_empty() {
        out.push("no findings".green().to_string());
    }

    out.join("\n")
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::{render_audit, render_device};
    use crate::audit::run_audit;
    use crate::model::{DeviceConfig, Vendor, Vlan};

    #[test]
    fn device_summary_lists_vlans() {
        colored::control::set_override(false);
        let mut device = DeviceConfig::new(Vendor::Cisco);
        device.hostname = "SW1".to_string();
        device.vlans.push(Vlan {
            id: "10".to_string(),
            name: "SERVERS".to_string(),
            raw_config: vec![],
        });
        let text = render_device(&device);
        assert!(text.contains("device SW1 (Cisco)"));
        assert!(text.contains("- 10: SERVERS"));
    }

    #[test]
    fn audit_report_prints_remediation() {
        colored::control::set_override(false);
        let device = DeviceConfig::new(Vendor::Huawei);
        let report = run_audit(&device);
        let text = render_audit(&report);
        assert!(text.contains("huawei_sec_ssh_disabled"));
        assert!(text.contains("$ stelnet server enable"));
    }
}
