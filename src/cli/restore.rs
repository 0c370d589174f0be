use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::env::EnvironmentMap;
use crate::restore::{self, script};
use crate::ui::display;

#[derive(Args)]
pub struct RestoreArgs {
    /// Path to the backup/template file
    #[arg(long, default_value = "vyos-config-template.txt")]
    pub backup: PathBuf,

    /// Path to .env file with secrets (process environment is used as fallback)
    #[arg(long, default_value = "vyos-restore.env")]
    pub env_file: PathBuf,

    /// Write output to file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Only report missing secrets, don't generate output
    #[arg(long)]
    pub check: bool,

    /// Don't include the usage header in the output
    #[arg(long)]
    pub no_header: bool,
}

pub fn run(args: RestoreArgs) -> Result<()> {
    let env = EnvironmentMap::load(&args.env_file)?;
    tracing::debug!(
        "loaded {} variables from {}",
        env.file_var_count(),
        args.env_file.display()
    );

    if args.check {
        return check_secrets(&env);
    }

    let restored = restore::restore(&args.backup, &env)?;

    for warning in &restored.warnings {
        display::warning(warning);
    }

    let include_header = !args.no_header;
    if let Some(path) = &args.output {
        let output = script::render(&restored.commands, include_header);
        std::fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display()))?;
        display::ok(&format!(
            "restore commands written to {} ({} commands)",
            path.display(),
            restored.commands.len()
        ));
    } else {
        let stdout = std::io::stdout();
        script::write_script(&mut stdout.lock(), &restored.commands, include_header)?;
    }

    Ok(())
}

fn check_secrets(env: &EnvironmentMap) -> Result<()> {
    let missing = restore::missing_secrets(env);
    if missing.is_empty() {
        display::ok("all secrets are configured");
        return Ok(());
    }

    display::error("missing secrets:");
    for mapping in &missing {
        display::detail(mapping.env_var, mapping.description);
    }
    bail!("{} secrets missing", missing.len());
}
