use crate::config::{Peer, Settings};

use super::Lines;

/// Phase 3: WireGuard interface, peers, and the firewall around it.
pub fn phase3(settings: &Settings) -> Vec<String> {
    let wg = &settings.wg_interface;
    let port = settings.wg_port;
    let wan = &settings.wan_interface;
    let lan = &settings.lan_interface;

    let mut out = Lines::banner("Phase 3: WireGuard VPN");
    out.section("3-1: Keys and interface");
    out.push("# Generate keys (operational mode)");
    out.push("# generate wireguard default-keypair");
    out.push("# show wireguard keypairs pubkey default");
    out.blank();
    out.push("configure");
    out.blank();
    out.push(format!("set interfaces wireguard {wg} address {}", settings.wg_ipv4));
    out.push(format!("set interfaces wireguard {wg} port {port}"));
    out.push(format!("set interfaces wireguard {wg} private-key default"));
    out.push(format!("set interfaces wireguard {wg} address {}", settings.wg_ipv6));
    out.blank();

    let peers: Vec<&Peer> = settings.configured_peers().collect();
    if peers.is_empty() {
        out.push("# Peers (add one block per client)");
        out.push(format!("# set interfaces wireguard {wg} peer phone allowed-ips 10.10.10.2/32"));
        out.push(format!(
            "# set interfaces wireguard {wg} peer phone allowed-ips fd00:10:10:10::2/128"
        ));
        out.push(format!(
            "# set interfaces wireguard {wg} peer phone public-key <クライアント公開鍵>"
        ));
        out.blank();
    } else {
        out.push("# Peers");
        for (index, peer) in peers.iter().enumerate() {
            peer_block(&mut out, wg, peer, index);
            out.blank();
        }
    }

    out.commit_save();
    out.blank();

    out.section("3-2: Firewall");
    out.push("# Rate limit (drop more than 10 new connections per minute)");
    out.extend([
        "set firewall ipv6 name WAN6_IN rule 25 action drop".to_string(),
        "set firewall ipv6 name WAN6_IN rule 25 protocol udp".to_string(),
        format!("set firewall ipv6 name WAN6_IN rule 25 destination port {port}"),
        "set firewall ipv6 name WAN6_IN rule 25 recent count 10".to_string(),
        "set firewall ipv6 name WAN6_IN rule 25 recent time minute".to_string(),
        "set firewall ipv6 name WAN6_IN rule 25 state new enable".to_string(),
        "set firewall ipv6 name WAN6_IN rule 25 description 'Rate limit WireGuard'".to_string(),
    ]);
    out.blank();
    out.push("# Allow WireGuard");
    out.extend([
        "set firewall ipv6 name WAN6_IN rule 30 action accept".to_string(),
        "set firewall ipv6 name WAN6_IN rule 30 protocol udp".to_string(),
        format!("set firewall ipv6 name WAN6_IN rule 30 destination port {port}"),
        "set firewall ipv6 name WAN6_IN rule 30 description 'Allow WireGuard'".to_string(),
    ]);
    out.blank();
    out.commit_save();
    out.blank();

    out.section("3-3: VPN access restrictions");
    out.push("# VPN -> LAN: only the router itself");
    out.extend([
        "set firewall ipv4 name VPN_TO_LAN default-action drop".to_string(),
        "set firewall ipv4 name VPN_TO_LAN rule 10 action accept".to_string(),
        format!(
            "set firewall ipv4 name VPN_TO_LAN rule 10 destination address {}",
            settings.wg_ipv4_host()
        ),
        "set firewall ipv4 name VPN_TO_LAN rule 10 description 'Allow access to VyOS only'"
            .to_string(),
    ]);
    out.blank();
    out.extend([
        "set firewall ipv6 name VPN6_TO_LAN default-action drop".to_string(),
        "set firewall ipv6 name VPN6_TO_LAN rule 10 action accept".to_string(),
        format!(
            "set firewall ipv6 name VPN6_TO_LAN rule 10 destination address {}",
            settings.wg_ipv6_host()
        ),
        "set firewall ipv6 name VPN6_TO_LAN rule 10 description 'Allow access to VyOS only'"
            .to_string(),
    ]);
    out.blank();
    out.push(format!("set interfaces ethernet {lan} firewall in name VPN_TO_LAN"));
    out.push(format!("set interfaces ethernet {lan} firewall in ipv6-name VPN6_TO_LAN"));
    out.blank();
    out.push("# VPN -> WAN: blocked");
    out.extend([
        "set firewall ipv4 name VPN_TO_WAN default-action drop",
        "set firewall ipv4 name VPN_TO_WAN rule 1 action drop",
        "set firewall ipv4 name VPN_TO_WAN rule 1 description 'Block VPN to Internet'",
    ]);
    out.blank();
    out.extend([
        "set firewall ipv6 name VPN6_TO_WAN default-action drop",
        "set firewall ipv6 name VPN6_TO_WAN rule 1 action drop",
        "set firewall ipv6 name VPN6_TO_WAN rule 1 description 'Block VPN to Internet'",
    ]);
    out.blank();
    out.push(format!("set interfaces ethernet {wan} firewall in name VPN_TO_WAN"));
    out.push(format!("set interfaces ethernet {wan} firewall in ipv6-name VPN6_TO_WAN"));
    out.blank();
    out.commit_save();
    out.into_vec()
}

/// Allowed-ips and public-key lines for one peer. Peers without explicit
/// addresses are numbered from `.2` in declaration order.
fn peer_block(out: &mut Lines, wg: &str, peer: &Peer, index: usize) {
    let host = index + 2;
    let ipv4 = peer
        .ipv4
        .clone()
        .unwrap_or_else(|| format!("10.10.10.{host}/32"));
    let ipv6 = peer
        .ipv6
        .clone()
        .unwrap_or_else(|| format!("fd00:10:10:10::{host}/128"));
    let pubkey = peer.pubkey.as_deref().unwrap_or_default();
    let name = &peer.name;

    out.push(format!("set interfaces wireguard {wg} peer {name} allowed-ips {ipv4}"));
    out.push(format!("set interfaces wireguard {wg} peer {name} allowed-ips {ipv6}"));
    out.push(format!("set interfaces wireguard {wg} peer {name} public-key {pubkey}"));
}
