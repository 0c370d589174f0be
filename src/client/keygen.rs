use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// A WireGuard key pair in base64 form.
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key: String,
    pub public_key: String,
}

/// Wrapper around the `wg` command-line tool.
#[derive(Debug, Clone)]
pub struct WgTool {
    program: String,
}

impl WgTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Generate a fresh key pair with `wg genkey` and `wg pubkey`.
    pub fn generate(&self) -> Result<KeyPair> {
        let private_key = self.run(&["genkey"], None)?;
        let public_key = self.public_key(&private_key)?;
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    /// Derive the public key for an existing private key.
    pub fn public_key(&self, private_key: &str) -> Result<String> {
        self.run(&["pubkey"], Some(private_key))
    }

    fn run(&self, args: &[&str], input: Option<&str>) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    anyhow!(
                        "'{}' command not found. Install wireguard-tools \
                         (macOS: brew install wireguard-tools, Ubuntu: sudo apt install wireguard-tools)",
                        self.program
                    )
                } else {
                    anyhow!("failed to start '{}': {}", self.program, e)
                }
            })?;

        if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
            stdin
                .write_all(input.as_bytes())
                .with_context(|| format!("failed to write to {}", self.program))?;
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to run {}", self.program))?;
        if !output.status.success() {
            bail!(
                "key generation failed ({} {}): {}",
                self.program,
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Check that a key is base64 for exactly 32 bytes.
pub fn validate_key(key: &str) -> Result<()> {
    let bytes = STANDARD
        .decode(key.trim())
        .map_err(|_| anyhow!("key is not valid base64"))?;
    if bytes.len() != 32 {
        bail!("key must decode to 32 bytes, got {}", bytes.len());
    }
    Ok(())
}
