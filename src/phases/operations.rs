use crate::config::Settings;
use crate::restore::mapping::CF_API_TOKEN_PLACEHOLDER;

use super::Lines;

const DDNS: &str = "set service dns dynamic name cloudflare";

/// Phase 5: dynamic DNS and firewall logging.
pub fn phase5(settings: &Settings) -> Vec<String> {
    let wan = &settings.wan_interface;

    let mut out = Lines::banner("Phase 5: Operations");
    out.section("5-1: Cloudflare DDNS");
    out.push("configure");
    out.blank();

    match settings.ddns() {
        Some((zone, host)) => {
            out.push(format!("{DDNS} address interface {wan}"));
            out.push(format!("{DDNS} protocol cloudflare"));
            out.push(format!("{DDNS} zone {zone}"));
            out.push(format!("{DDNS} host-name {host}"));
            match settings.ddns_api_token() {
                Some(token) => out.push(format!("{DDNS} password {token}")),
                // filled in by `vyos-kit restore`
                None => out.push(format!("# {DDNS} password {CF_API_TOKEN_PLACEHOLDER}")),
            }
            out.push(format!("{DDNS} ip-version ipv6"));
        }
        None => {
            out.push("# DDNS (set ddns_zone and ddns_hostname in vyos.toml)");
            out.push(format!("# {DDNS} address interface {wan}"));
            out.push(format!("# {DDNS} protocol cloudflare"));
            out.push(format!("# {DDNS} zone <your-domain.com>"));
            out.push(format!("# {DDNS} host-name <router.your-domain.com>"));
            out.push(format!("# {DDNS} password {CF_API_TOKEN_PLACEHOLDER}"));
            out.push(format!("# {DDNS} ip-version ipv6"));
        }
    }

    out.blank();
    out.commit_save();
    out.blank();
    out.push("# Verify: show dns dynamic status");
    out.blank();

    out.section("5-2: Firewall logging");
    out.extend([
        "set firewall ipv6 name WAN6_IN default-log",
        "set firewall ipv4 name VPN_TO_LAN default-log",
        "set firewall ipv4 name VPN_TO_WAN default-log",
        "set firewall ipv6 name VPN6_TO_LAN default-log",
        "set firewall ipv6 name VPN6_TO_WAN default-log",
    ]);
    out.blank();
    out.push("# Log packets dropped by the rate limit");
    out.push("set firewall ipv6 name WAN6_IN rule 25 log");
    out.blank();
    out.commit_save();
    out.into_vec()
}

/// Phase 6: backup directory, daily task, backup script.
pub fn phase6(_settings: &Settings) -> Vec<String> {
    let mut out = Lines::banner("Phase 6: Backups");
    out.section("6-1: Backup directories");
    out.push("# Operational mode");
    out.push("sudo mkdir -p /config/backup");
    out.push("sudo mkdir -p /config/scripts");
    out.blank();

    out.section("6-2: Scheduled backup");
    out.push("configure");
    out.blank();
    out.push("set system task-scheduler task daily-backup crontab-spec '0 3 * * *'");
    out.push(
        "set system task-scheduler task daily-backup executable path '/config/scripts/backup.sh'",
    );
    out.blank();
    out.commit_save();
    out.blank();

    out.section("6-3: Backup script");
    out.extend([
        "# Save as /config/scripts/backup.sh:",
        "# #!/bin/bash",
        "# BACKUP_DIR=\"/config/backup\"",
        "# DATE=$(date +%Y%m%d)",
        "# MAX_BACKUPS=30",
        "# cp /config/config.boot \"${BACKUP_DIR}/config-${DATE}.boot\"",
        "# find \"${BACKUP_DIR}\" -name \"config-*.boot\" -mtime +${MAX_BACKUPS} -delete",
    ]);
    out.blank();
    out.push("# chmod +x /config/scripts/backup.sh");
    out.into_vec()
}
