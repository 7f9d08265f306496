use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use netcfg_audit::model::Vendor;

#[derive(Parser, Debug)]
#[command(name = "netcfg-audit")]
#[command(about = "Parse and audit multi-vendor network device configurations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Parse one configuration file into the normalized device model.
    Parse(ParseArgs),
    /// Parse one configuration file and run the vendor audit rules.
    Audit(AuditArgs),
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    pub file: PathBuf,
    /// Vendor dialect of the configuration file.
    #[arg(long, value_enum)]
    pub vendor: VendorArg,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct AuditArgs {
    pub file: PathBuf,
    /// Vendor dialect of the configuration file.
    #[arg(long, value_enum)]
    pub vendor: VendorArg,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Exit non-zero when any High or Critical finding is present.
    #[arg(long)]
    pub strict: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum VendorArg {
    Cisco,
    Huawei,
    Juniper,
    H3c,
}

impl From<VendorArg> for Vendor {
    fn from(arg: VendorArg) -> Vendor {
        match arg {
            VendorArg::Cisco => Vendor::Cisco,
            VendorArg::Huawei => Vendor::Huawei,
            VendorArg::Juniper => Vendor::Juniper,
            VendorArg::H3c => Vendor::H3c,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}
