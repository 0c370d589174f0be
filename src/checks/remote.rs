use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

/// Exit status and captured streams of one remote query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[cfg(test)]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            status: 1,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Non-zero exit with nothing on stdout: the query never reached the router.
    pub fn is_transport_failure(&self) -> bool {
        self.status != 0 && self.stdout.is_empty()
    }
}

/// Runs a read-only operational command on the router.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    async fn run(&self, command: &str) -> CommandOutput;
}

/// Remote shell backed by the system `ssh` client in batch mode.
#[derive(Debug, Clone)]
pub struct SshShell {
    pub program: String,
    pub host: String,
    pub user: String,
    pub key_file: Option<PathBuf>,
    pub timeout: Duration,
}

impl SshShell {
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            program: "ssh".to_string(),
            host: host.into(),
            user: user.into(),
            key_file: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn args(&self, command: &str) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
            "-o".to_string(),
            "BatchMode=yes".to_string(),
        ];
        if let Some(key) = &self.key_file {
            args.push("-i".to_string());
            args.push(key.display().to_string());
        }
        args.push(format!("{}@{}", self.user, self.host));
        args.push(command.to_string());
        args
    }
}

impl RemoteShell for SshShell {
    async fn run(&self, command: &str) -> CommandOutput {
        let child = Command::new(&self.program)
            .args(self.args(command))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.timeout, child).await {
            Err(_) => CommandOutput::failure("SSH command timed out"),
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                CommandOutput::failure("SSH client not found")
            }
            Ok(Err(e)) => CommandOutput::failure(format!("failed to run {}: {}", self.program, e)),
            Ok(Ok(output)) => CommandOutput {
                status: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            },
        }
    }
}
