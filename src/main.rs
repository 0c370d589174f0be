use anyhow::Result;
use clap::Parser;

mod checks;
mod cli;
mod client;
mod config;
mod env;
mod phases;
mod restore;
mod ui;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else if args.quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match args.command {
        cli::Command::Generate(cmd) => cli::generate::run(cmd, args.config.as_deref()),
        cli::Command::Check(cmd) => {
            cli::check::run(cmd, args.config.as_deref(), args.verbose).await
        }
        cli::Command::Restore(cmd) => cli::restore::run(cmd),
        cli::Command::Client(cmd) => cli::client::run(cmd, args.config.as_deref()),
        cli::Command::Completions { shell } => {
            let mut cmd = <cli::Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "vyos-kit", &mut std::io::stdout());
            Ok(())
        }
    }
}
