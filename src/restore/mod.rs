//! Rebuild a restorable VyOS configuration from a redacted backup.
//!
//! A backup holds active `set` commands plus `# set` lines whose secrets
//! were replaced by placeholders. Restoring fills each placeholder from
//! the environment and enables the line, or drops it with a warning when
//! the secret is not available.

pub mod backup;
pub mod mapping;
pub mod script;
pub mod substitute;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::env::EnvironmentMap;

pub use mapping::missing_secrets;
pub use substitute::{substitute, Substituted};

#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("backup file not found: {}", .0.display())]
    BackupNotFound(PathBuf),

    #[error("no commands found in backup file {}", .0.display())]
    NoCommands(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a backup file and fill in its secrets.
pub fn restore(backup_path: &Path, env: &EnvironmentMap) -> Result<Substituted, RestoreError> {
    let commands = backup::parse_file(backup_path)?;
    if commands.is_empty() {
        return Err(RestoreError::NoCommands(backup_path.to_path_buf()));
    }
    tracing::debug!("parsed {} commands from {}", commands.len(), backup_path.display());
    Ok(substitute(&commands, env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn full_workflow() {
        let dir = TempDir::new().unwrap();
        let backup = dir.path().join("backup.txt");
        std::fs::write(
            &backup,
            "# VyOS Backup\n\
             set system host-name 'router'\n\
             set interfaces ethernet eth0 address '192.168.1.1/24'\n\
             # set interfaces wireguard wg0 private-key '<VyOS秘密鍵>'\n",
        )
        .unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "VYOS_WG_PRIVATE_KEY=test_private_key\n").unwrap();

        let vars = crate::env::loader::load_file(&env_file).unwrap();
        let env = EnvironmentMap::from_file_vars(vars);
        let out = restore(&backup, &env).unwrap();
        let script = script::render(&out.commands, false);

        assert!(script.contains("set system host-name 'router'"));
        assert!(script.contains("set interfaces ethernet eth0 address '192.168.1.1/24'"));
        assert!(script.contains("set interfaces wireguard wg0 private-key 'test_private_key'"));
        assert!(!script.contains("<VyOS秘密鍵>"));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn missing_secret_drops_line() {
        let dir = TempDir::new().unwrap();
        let backup = dir.path().join("backup.txt");
        std::fs::write(
            &backup,
            "set system host-name 'router'\n# set interfaces wireguard wg0 private-key '<VyOS秘密鍵>'\n",
        )
        .unwrap();

        let out = restore(&backup, &EnvironmentMap::from_file_vars(HashMap::new())).unwrap();
        assert_eq!(out.commands, vec!["set system host-name 'router'"]);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("VYOS_WG_PRIVATE_KEY"));
    }

    #[test]
    fn empty_backup_is_an_error() {
        let dir = TempDir::new().unwrap();
        let backup = dir.path().join("backup.txt");
        std::fs::write(&backup, "# nothing here\n").unwrap();
        let err = restore(&backup, &EnvironmentMap::default()).unwrap_err();
        assert!(matches!(err, RestoreError::NoCommands(_)));
    }
}
