use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "vyos.toml";

/// Router settings shared by the generator, checker, and client tools.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timezone: String,
    pub ntp_servers: Vec<String>,

    pub wan_interface: String,
    pub lan_interface: String,
    /// Transit link to the upstream IPv4 router.
    pub wxr_interface: String,

    pub lan_ipv4: String,
    pub lan_ipv4_network: String,

    pub wxr_segment_self: String,
    pub wxr_segment_gw: String,

    pub pd_length: u8,
    pub pd_sla_id: u32,

    pub dns_ipv6: String,

    pub wg_interface: String,
    pub wg_port: u16,
    pub wg_ipv4: String,
    pub wg_ipv6: String,
    pub peers: Vec<Peer>,

    pub ssh_listen_ip: Option<String>,
    pub ssh_pubkey: Option<String>,

    pub ddns_zone: Option<String>,
    pub ddns_hostname: Option<String>,
    pub ddns_api_token: Option<String>,
}

/// A WireGuard peer declared under `[[peers]]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Peer {
    pub name: String,
    pub pubkey: Option<String>,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: "Asia/Tokyo".to_string(),
            ntp_servers: vec!["ntp.nict.jp".to_string(), "time.cloudflare.com".to_string()],
            wan_interface: "eth0".to_string(),
            lan_interface: "eth1".to_string(),
            wxr_interface: "eth2".to_string(),
            lan_ipv4: "192.168.1.1/24".to_string(),
            lan_ipv4_network: "192.168.1.0/24".to_string(),
            wxr_segment_self: "192.168.100.2/24".to_string(),
            wxr_segment_gw: "192.168.100.1".to_string(),
            pd_length: 56,
            pd_sla_id: 1,
            dns_ipv6: "2001:4860:4860::8888".to_string(),
            wg_interface: "wg0".to_string(),
            wg_port: 51820,
            wg_ipv4: "10.10.10.1/24".to_string(),
            wg_ipv6: "fd00:10:10:10::1/64".to_string(),
            peers: Vec::new(),
            ssh_listen_ip: None,
            ssh_pubkey: None,
            ddns_zone: None,
            ddns_hostname: None,
            ddns_api_token: None,
        }
    }
}

impl Settings {
    /// Load settings from the given path or `vyos.toml` in the current dir.
    /// Falls back to defaults with a warning if the file doesn't exist.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = PathBuf::from(config_path.unwrap_or(DEFAULT_SETTINGS_FILE));

        if !path.exists() {
            tracing::warn!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Zone and host name when dynamic DNS is configured.
    pub fn ddns(&self) -> Option<(&str, &str)> {
        match (non_empty(&self.ddns_zone), non_empty(&self.ddns_hostname)) {
            (Some(zone), Some(host)) => Some((zone, host)),
            _ => None,
        }
    }

    pub fn ddns_api_token(&self) -> Option<&str> {
        non_empty(&self.ddns_api_token)
    }

    pub fn ssh_listen_ip(&self) -> Option<&str> {
        non_empty(&self.ssh_listen_ip)
    }

    pub fn ssh_pubkey(&self) -> Option<&str> {
        non_empty(&self.ssh_pubkey)
    }

    /// WireGuard server IPv4 address without prefix length.
    pub fn wg_ipv4_host(&self) -> &str {
        strip_prefix_len(&self.wg_ipv4)
    }

    /// WireGuard server IPv6 address without prefix length.
    pub fn wg_ipv6_host(&self) -> &str {
        strip_prefix_len(&self.wg_ipv6)
    }

    pub fn lan_ipv4_host(&self) -> &str {
        strip_prefix_len(&self.lan_ipv4)
    }

    /// Peers that have a public key, in declaration order.
    pub fn configured_peers(&self) -> impl Iterator<Item = &Peer> {
        self.peers.iter().filter(|p| non_empty(&p.pubkey).is_some())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn strip_prefix_len(addr: &str) -> &str {
    addr.split('/').next().unwrap_or(addr)
}
