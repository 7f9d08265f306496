use std::fs;

use anyhow::{bail, Context, Result};
use clap::Parser;
use netcfg_audit::audit::run_audit;
use netcfg_audit::parse::parse_config;
use netcfg_audit::report::{render_audit, render_device};

mod cli;

use cli::{AuditArgs, Cli, Command, OutputFormat, ParseArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Audit(args) => run_audit_cmd(args),
    }
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let device = parse_config(&text, args.vendor.into());

    match args.format {
        OutputFormat::Text => println!("{}", render_device(&device)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&device)?),
    }
    Ok(())
}

fn run_audit_cmd(args: AuditArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let device = parse_config(&text, args.vendor.into());
    let report = run_audit(&device);

    match args.format {
        OutputFormat::Text => println!("{}", render_audit(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if args.strict && report.has_high_severity() {
        bail!("strict mode failed: high severity findings present");
    }
    Ok(())
}
