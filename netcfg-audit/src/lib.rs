//! Multi-vendor network device configuration parsing and auditing.
//!
//! This library turns raw switch and router configurations from four CLI
//! dialects into one normalized device model, then runs deterministic
//! vendor-specific audit rules against it. Everything works offline on the
//! configuration text alone.
//!
//! # Architecture
//!
//! ## Parsing
//!
//! - [`parse`] — Vendor dispatch to the right dialect parser
//! - [`cisco`] — Cisco IOS (`!` separators, `interface VlanN` SVIs)
//! - [`huawei`] — Huawei VRP (`#` separators, `vlan batch`, `Vlanif` SVIs)
//! - [`juniper`] — Juniper Junos (brace-delimited, context-stack driven)
//! - [`h3c`] — H3C Comware (`#` separators, `Vlan-interface` SVIs)
//! - `lex` — Shared word-boundary line matching helpers (crate-private)
//!
//! ## Normalization
//!
//! - [`model`] — The `DeviceConfig` interchange model all parsers produce
//! - [`consolidate`] — Collapse runs of identically-configured ports into
//!   `"X - Y"` range entries
//!
//! ## Auditing
//!
//! - [`audit`] — Finding types, severity ordering, and vendor dispatch
//! - [`audit_cisco`] — Cisco IOS rules
//! - [`audit_huawei`] — Huawei VRP rules
//! - [`audit_juniper`] — Juniper Junos rules
//! - [`audit_h3c`] — H3C Comware rules
//!
//! ## Reporting
//!
//! - [`report`] — Terminal-friendly colored device and audit output
//!
//! # Workflow
//!
//! The typical flow:
//!
//! 1. Read the configuration text and pick a [`model::Vendor`]
//! 2. [`parse::parse_config`] produces a [`model::DeviceConfig`]
//! 3. [`audit::run_audit`] produces an [`audit::AuditReport`]
//! 4. [`report`] renders either for the terminal, or serialize to JSON
//!
//! IPv4 subnet arithmetic and port name ordering live in the `netcalc-core`
//! crate; this crate layers the vendor dialects and audit rules on top.

pub mod audit;
pub mod audit_cisco;
pub mod audit_h3c;
pub mod audit_huawei;
pub mod audit_juniper;
pub mod cisco;
pub mod consolidate;
pub mod h3c;
pub mod huawei;
pub mod juniper;
mod lex;
pub mod model;
pub mod parse;
pub mod report;
