use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

/// Result of trying to render a QR code.
#[derive(Debug, PartialEq, Eq)]
pub enum QrOutcome {
    Rendered,
    /// The encoder binary is not installed.
    Unavailable,
}

/// Pipe `text` into `qrencode -t ANSIUTF8`, which draws on the terminal.
pub fn render(program: &str, text: &str) -> Result<QrOutcome> {
    let spawned = Command::new(program)
        .args(["-t", "ANSIUTF8"])
        .stdin(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(QrOutcome::Unavailable),
        Err(e) => return Err(e).with_context(|| format!("failed to start {program}")),
    };

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .with_context(|| format!("failed to write to {program}"))?;
    }

    let status = child.wait().with_context(|| format!("failed to run {program}"))?;
    if !status.success() {
        bail!("{program} exited with {status}");
    }
    Ok(QrOutcome::Rendered)
}
