use crate::config::Settings;
use crate::restore::mapping::SSH_PUBKEY_PLACEHOLDER;

use super::Lines;

const SSH_KEY_USER: &str = "vyos";
const SSH_KEY_NAME: &str = "macbook";

/// Phase 0: time zone and NTP servers.
pub fn phase0(settings: &Settings) -> Vec<String> {
    let mut out = Lines::banner("Phase 0: VyOS base settings");
    out.push("configure");
    out.blank();
    out.push("# Time zone");
    out.push(format!("set system time-zone {}", settings.timezone));
    out.blank();
    out.push("# NTP servers");
    for server in &settings.ntp_servers {
        out.push(format!("set service ntp server {server}"));
    }
    out.blank();
    out.commit_save();
    out.blank();
    out.extend(["# Verify:", "# show date", "# show ntp"]);
    out.into_vec()
}

/// Phase 1: SSH service and key-based login.
pub fn phase1(settings: &Settings) -> Vec<String> {
    let mut out = Lines::banner("Phase 1: Enable SSH");
    out.push("configure");
    out.blank();
    out.push("# Enable SSH");
    out.push("set service ssh port 22");

    match settings.ssh_listen_ip() {
        Some(ip) => out.push(format!("set service ssh listen-address {ip}")),
        None => out.push("# set service ssh listen-address <LAN address>  # required"),
    }

    out.blank();
    out.commit_save();
    out.blank();

    let key_prefix = format!(
        "set system login user {SSH_KEY_USER} authentication public-keys {SSH_KEY_NAME}"
    );
    match settings.ssh_pubkey() {
        Some(key) => {
            out.push("# Register SSH public key");
            out.push(format!("{key_prefix} type ssh-ed25519"));
            out.push(format!("{key_prefix} key {key}"));
            out.blank();
            out.commit_save();
            out.blank();
            out.extend([
                "# === Only after a successful key login test ===",
                "# set service ssh disable-password-authentication",
                "# commit",
                "# save",
            ]);
        }
        None => {
            out.push("# Public key registration (get it with `cat ~/.ssh/id_ed25519.pub`)");
            out.push(format!("# {key_prefix} type ssh-ed25519"));
            out.push(format!("# {key_prefix} key {SSH_PUBKEY_PLACEHOLDER}"));
        }
    }

    out.into_vec()
}
