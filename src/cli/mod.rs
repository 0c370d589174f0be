pub mod check;
pub mod client;
pub mod generate;
pub mod restore;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vyos-kit",
    about = "Generate, check, and restore VyOS configuration commands"
)]
#[command(version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show debug output (never prints secret values)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Minimal output (for scripting)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Path to settings file (default: vyos.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the configuration commands for a setup phase
    Generate(generate::GenerateArgs),

    /// Verify a running router against the expected settings over SSH
    Check(check::CheckArgs),

    /// Build restore commands from a backup, filling in secrets from the environment
    Restore(restore::RestoreArgs),

    /// Generate a WireGuard client profile
    Client(client::ClientArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
