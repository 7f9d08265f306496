//! Configuration audit orchestration.
//!
//! Each vendor dialect gets its own deterministic rule set; this module
//! owns the shared finding types, dispatches a parsed device to the right
//! rule set, and rolls the results up into a report with severity counts.

use serde::Serialize;

use crate::audit_cisco::cisco_findings;
use crate::audit_h3c::h3c_findings;
use crate::audit_huawei::huawei_findings;
use crate::audit_juniper::juniper_findings;
use crate::model::{DeviceConfig, Vendor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FindingKind {
    #[serde(rename = "Security Risk")]
    SecurityRisk,
    #[serde(rename = "Best Practice")]
    BestPractice,
    Suggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

/// One CLI command toward fixing a finding, with the operator-facing
/// explanation of what it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remediation {
    pub command: String,
    pub context: String,
}

impl Remediation {
    pub fn new(command: impl Into<String>, context: impl Into<String>) -> Remediation {
        Remediation {
            command: command.into(),
            context: context.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Stable rule identifier, e.g. `cisco_sec_http_server_enabled`.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
    pub remediation_commands: Vec<Remediation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub vendor: Vendor,
    pub hostname: String,
    pub security_risks: usize,
    pub best_practices: usize,
    pub findings: Vec<Finding>,
}

impl AuditReport {
    /// True when at least one finding is High or worse.
    pub fn has_high_severity(&self) -> bool {
        self.findings.iter().any(|f| f.severity >= Severity::High)
    }
}

pub fn run_audit(device: &DeviceConfig) -> AuditReport {
    let mut findings = match device.vendor {
        Vendor::Cisco => cisco_findings(device),
        Vendor::Huawei => huawei_findings(device),
        Vendor::Juniper => juniper_findings(device),
        Vendor::H3c => h3c_findings(device),
    };
    findings.sort_by(|a, b| b.severity.cmp(&a.severity));

    AuditReport {
        vendor: device.vendor,
        hostname: device.hostname.clone(),
        security_risks: findings
            .iter()
            .filter(|f| f.kind == FindingKind::SecurityRisk)
            .count(),
        best_practices: findings
            .iter()
            .filter(|f| f.kind == FindingKind::BestPractice)
            .count(),
        findings,
    }
}

pub(crate) fn risk(
    id: &str,
    severity: Severity,
    description: impl Into<String>,
    recommendation: &str,
    remediation: Vec<Remediation>,
) -> Finding {
    Finding {
        id: id.to_string(),
        kind: FindingKind::SecurityRisk,
        severity,
        description: description.into(),
        recommendation: recommendation.to_string(),
        remediation_commands: remediation,
    }
}

pub(crate) fn practice(
    id: &str,
    severity: Severity,
    description: impl Into<String>,
    recommendation: &str,
    remediation: Vec<Remediation>,
) -> Finding {
    Finding {
        id: id.to_string(),
        kind: FindingKind::BestPractice,
        severity,
        description: description.into(),
        recommendation: recommendation.to_string(),
        remediation_commands: remediation,
    }
}

/// Strip everything but letters and digits, for embedding a port name in a
/// finding id.
pub(crate) fn id_slug(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}
