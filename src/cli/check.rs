use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;

use crate::checks::{self, Category, Report, SshShell};
use crate::config::Settings;
use crate::ui::display;

#[derive(Args)]
pub struct CheckArgs {
    /// Router hostname or IP
    #[arg(long, default_value = "192.168.1.1", env = "VYOS_HOST")]
    pub host: String,

    /// SSH username
    #[arg(long, default_value = "vyos", env = "VYOS_USER")]
    pub user: String,

    /// SSH private key file
    #[arg(long, short = 'i')]
    pub key_file: Option<PathBuf>,

    /// Category to check
    #[arg(long, short = 'c', value_enum, default_value = "all")]
    pub category: Category,

    /// Seconds to wait for each SSH query
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Show the queries without connecting
    #[arg(long)]
    pub dry_run: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// SSH client binary
    #[arg(long, default_value = "ssh", hide = true)]
    pub ssh: String,
}

pub async fn run(args: CheckArgs, config: Option<&str>, verbose: bool) -> Result<()> {
    let settings = Settings::load(config)?;

    if args.dry_run {
        println!("Commands that would be executed:");
        for check in checks::select(args.category) {
            println!(
                "  [{}] {}: {}",
                check.category.label(),
                check.name,
                (check.query)(&settings)
            );
        }
        return Ok(());
    }

    let shell = SshShell {
        program: args.ssh,
        key_file: args.key_file,
        timeout: Duration::from_secs(args.timeout),
        ..SshShell::new(args.host, args.user)
    };

    display::detail("Connecting to", &format!("{}@{}", shell.user, shell.host));
    let report = Report::new(checks::run_checks(&shell, &settings, args.category).await);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render(verbose));
    }

    if !report.all_passed() {
        bail!("{} check(s) failed", report.failed);
    }
    display::ok("all checks passed");
    Ok(())
}
