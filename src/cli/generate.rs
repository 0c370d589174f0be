use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Settings;
use crate::phases::{self, Phase};
use crate::ui::display;

#[derive(Args)]
pub struct GenerateArgs {
    /// Phase to generate
    #[arg(value_enum)]
    pub phase: Phase,

    /// SSH listen address (phase1), overrides ssh_listen_ip in settings
    #[arg(long)]
    pub ssh_listen_ip: Option<String>,

    /// SSH public key body, e.g. AAAAC3NzaC1... (phase1), overrides ssh_pubkey in settings
    #[arg(long)]
    pub ssh_key: Option<String>,

    /// Write output to file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: GenerateArgs, config: Option<&str>) -> Result<()> {
    let mut settings = Settings::load(config)?;
    if args.ssh_listen_ip.is_some() {
        settings.ssh_listen_ip = args.ssh_listen_ip;
    }
    if args.ssh_key.is_some() {
        settings.ssh_pubkey = args.ssh_key;
    }

    let mut output = phases::generate(args.phase, &settings).join("\n");
    output.push('\n');

    if let Some(path) = &args.output {
        std::fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?;
        display::ok(&format!("commands written to {}", path.display()));
    } else {
        print!("{}", output);
    }

    Ok(())
}
