use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SECRET_VARS: &[&str] = &[
    "VYOS_SSH_PUBKEY",
    "VYOS_WG_PRIVATE_KEY",
    "VYOS_WG_MAC_PUBKEY",
    "VYOS_WG_IPHONE_PUBKEY",
    "VYOS_CF_ACCOUNT_API_TOKEN",
];

const BACKUP: &str = "\
set system host-name 'router'
# set interfaces wireguard wg0 private-key '<VyOS秘密鍵>'
";

/// Runs inside `dir` with none of the secret variables inherited.
fn vyos_kit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vyos-kit").unwrap();
    cmd.current_dir(dir);
    for var in SECRET_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_backup(dir: &TempDir, content: &str) {
    fs::write(dir.path().join("vyos-config-template.txt"), content).unwrap();
}

#[test]
fn substitutes_secret_from_env_file() {
    let dir = TempDir::new().unwrap();
    write_backup(&dir, BACKUP);
    fs::write(dir.path().join("vyos-restore.env"), "VYOS_WG_PRIVATE_KEY=abc123\n").unwrap();

    vyos_kit(dir.path())
        .args(["restore", "--no-header"])
        .assert()
        .success()
        .stdout(
            "set system host-name 'router'\n\
             set interfaces wireguard wg0 private-key 'abc123'\n",
        )
        .stderr(predicate::str::contains("warning:").not());
}

#[test]
fn missing_secret_drops_line_with_warning() {
    let dir = TempDir::new().unwrap();
    write_backup(&dir, BACKUP);

    vyos_kit(dir.path())
        .args(["restore", "--no-header"])
        .assert()
        .success()
        .stdout("set system host-name 'router'\n")
        .stderr(predicate::str::contains("VYOS_WG_PRIVATE_KEY").count(1));
}

#[test]
fn process_environment_is_fallback() {
    let dir = TempDir::new().unwrap();
    write_backup(&dir, BACKUP);

    vyos_kit(dir.path())
        .env("VYOS_WG_PRIVATE_KEY", "fromenv")
        .args(["restore", "--no-header"])
        .assert()
        .success()
        .stdout(predicate::str::contains("private-key 'fromenv'"));
}

#[test]
fn header_included_by_default() {
    let dir = TempDir::new().unwrap();
    write_backup(&dir, BACKUP);

    vyos_kit(dir.path())
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# VyOS Configuration Restore Commands"))
        .stdout(predicate::str::ends_with("set system host-name 'router'\n"));
}

#[test]
fn writes_output_file() {
    let dir = TempDir::new().unwrap();
    write_backup(&dir, BACKUP);
    let out_path = dir.path().join("restore.txt");

    vyos_kit(dir.path())
        .args(["restore", "--no-header", "-o", out_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("ok:"));

    let content = fs::read_to_string(&out_path).unwrap();
    assert_eq!(content, "set system host-name 'router'\n");
}

#[test]
fn explicit_paths() {
    let dir = TempDir::new().unwrap();
    let backup = dir.path().join("backup.txt");
    let env_file = dir.path().join("secrets.env");
    fs::write(&backup, BACKUP).unwrap();
    fs::write(&env_file, "VYOS_WG_PRIVATE_KEY=\"quoted\"\n").unwrap();

    vyos_kit(dir.path())
        .args([
            "restore",
            "--no-header",
            "--backup",
            backup.to_str().unwrap(),
            "--env-file",
            env_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("private-key 'quoted'"));
}

#[test]
fn missing_backup_fails() {
    let dir = TempDir::new().unwrap();

    vyos_kit(dir.path())
        .arg("restore")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("vyos-config-template.txt"));
}

#[test]
fn backup_without_commands_fails() {
    let dir = TempDir::new().unwrap();
    write_backup(&dir, "# just a comment\n\n");

    vyos_kit(dir.path()).arg("restore").assert().failure().code(1);
}

#[test]
fn check_lists_missing_secrets() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("vyos-restore.env"),
        "VYOS_SSH_PUBKEY=AAAA\nVYOS_WG_PRIVATE_KEY=abc123\n",
    )
    .unwrap();

    vyos_kit(dir.path())
        .args(["restore", "--check"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("VYOS_WG_MAC_PUBKEY"))
        .stderr(predicate::str::contains("VYOS_CF_ACCOUNT_API_TOKEN"))
        .stderr(predicate::str::contains("VYOS_SSH_PUBKEY").not());
}

#[test]
fn check_passes_when_all_secrets_present() {
    let dir = TempDir::new().unwrap();
    let env: String = SECRET_VARS.iter().map(|v| format!("{v}=value\n")).collect();
    fs::write(dir.path().join("vyos-restore.env"), env).unwrap();

    vyos_kit(dir.path())
        .args(["restore", "--check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("all secrets are configured"));
}

#[test]
fn active_line_with_placeholder_passes_through() {
    let dir = TempDir::new().unwrap();
    write_backup(
        &dir,
        "set system login user vyos authentication public-keys macbook key <公開鍵>\n",
    );
    fs::write(dir.path().join("vyos-restore.env"), "VYOS_SSH_PUBKEY=AAAA\n").unwrap();

    vyos_kit(dir.path())
        .args(["restore", "--no-header"])
        .assert()
        .success()
        .stdout("set system login user vyos authentication public-keys macbook key <公開鍵>\n");
}

#[cfg(unix)]
#[test]
fn non_utf8_environment_is_tolerated() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    write_backup(&dir, BACKUP);

    vyos_kit(dir.path())
        .env("UNRELATED_VAR", OsStr::from_bytes(b"f\xffo"))
        .env("VYOS_WG_PRIVATE_KEY", "fromenv")
        .args(["restore", "--no-header"])
        .assert()
        .success()
        .stdout(
            "set system host-name 'router'\n\
             set interfaces wireguard wg0 private-key 'fromenv'\n",
        );
}
