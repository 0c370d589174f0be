//! WireGuard client profiles for connecting to the router.

pub mod keygen;
pub mod qr;

use std::fmt;

use crate::config::Settings;

pub const KEEPALIVE_SECS: u32 = 25;
pub const DEFAULT_ENDPOINT_HOST: &str = "router.example.com";

/// Everything that goes into a client `.conf` file.
#[derive(Debug, Clone)]
pub struct ClientProfile {
    pub name: String,
    pub private_key: String,
    pub ipv4: String,
    pub ipv6: String,
    pub server_pubkey: String,
    pub endpoint: String,
    pub allowed_ips: Vec<String>,
}

impl fmt::Display for ClientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Interface]")?;
        writeln!(f, "# Client: {}", self.name)?;
        writeln!(f, "PrivateKey = {}", self.private_key)?;
        writeln!(f, "Address = {}, {}", self.ipv4, self.ipv6)?;
        writeln!(f)?;
        writeln!(f, "[Peer]")?;
        writeln!(f, "# VyOS Server")?;
        writeln!(f, "PublicKey = {}", self.server_pubkey)?;
        writeln!(f, "Endpoint = {}", self.endpoint)?;
        writeln!(f, "AllowedIPs = {}", self.allowed_ips.join(", "))?;
        writeln!(f, "PersistentKeepalive = {}", KEEPALIVE_SECS)
    }
}

/// Client tunnel addresses numbered by `client_id` inside the VPN subnets.
pub fn default_addresses(client_id: u32) -> (String, String) {
    (
        format!("10.10.10.{client_id}/32"),
        format!("fd00:10:10:10::{client_id}/128"),
    )
}

/// Only the router itself is reachable through the tunnel by default.
pub fn default_allowed_ips(settings: &Settings) -> Vec<String> {
    vec![
        format!("{}/32", settings.wg_ipv4_host()),
        format!("{}/128", settings.wg_ipv6_host()),
    ]
}

/// `<ddns host>:<port>` when dynamic DNS is configured.
pub fn default_endpoint(settings: &Settings) -> String {
    let host = settings
        .ddns()
        .map(|(_, host)| host)
        .unwrap_or(DEFAULT_ENDPOINT_HOST);
    format!("{}:{}", host, settings.wg_port)
}

/// Split a comma-separated list, dropping empty entries.
pub fn parse_allowed_ips(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .collect()
}

/// Commands that register the client as a peer on the router.
pub fn peer_commands(wg_interface: &str, profile: &ClientProfile, public_key: &str) -> Vec<String> {
    let prefix = format!("set interfaces wireguard {} peer {}", wg_interface, profile.name);
    vec![
        "configure".to_string(),
        format!("{prefix} allowed-ips {}", profile.ipv4),
        format!("{prefix} allowed-ips {}", profile.ipv6),
        format!("{prefix} public-key {public_key}"),
        "commit".to_string(),
        "save".to_string(),
    ]
}

/// Reject names that would break the generated `set` commands.
pub fn validate_name(name: &str) -> anyhow::Result<()> {
    if name.is_empty() {
        anyhow::bail!("client name cannot be empty");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        anyhow::bail!(
            "client name '{}' contains invalid characters (use A-Z, a-z, 0-9, _, -)",
            name
        );
    }
    Ok(())
}
