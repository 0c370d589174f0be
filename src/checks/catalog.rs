use std::collections::BTreeSet;

use crate::config::Settings;

use super::{Category, CheckResult, ConfigCheck};

/// Every check the runner knows about, in execution order.
pub static CHECKS: &[ConfigCheck] = &[
    ConfigCheck {
        name: "WXR link",
        category: Category::Interface,
        query: |s| format!("show interfaces ethernet {}", s.wxr_interface),
        validate: check_wxr_link,
    },
    ConfigCheck {
        name: "WAN",
        category: Category::Interface,
        query: |s| format!("show interfaces ethernet {}", s.wan_interface),
        validate: check_wan,
    },
    ConfigCheck {
        name: "LAN",
        category: Category::Interface,
        query: |s| format!("show interfaces ethernet {}", s.lan_interface),
        validate: check_lan,
    },
    ConfigCheck {
        name: "WireGuard interface",
        category: Category::Interface,
        query: |s| format!("show interfaces wireguard {}", s.wg_interface),
        validate: check_wg_addresses,
    },
    ConfigCheck {
        name: "RA",
        category: Category::Ipv6,
        query: |_| "show configuration commands | grep router-advert".to_string(),
        validate: check_router_advert,
    },
    ConfigCheck {
        name: "DHCPv6-PD",
        category: Category::Ipv6,
        query: |_| "show configuration commands | grep dhcpv6".to_string(),
        validate: check_dhcpv6_pd,
    },
    ConfigCheck {
        name: "FW WAN6_IN",
        category: Category::Firewall,
        query: |_| "show configuration commands | grep 'firewall ipv6 name WAN6_IN'".to_string(),
        validate: check_wan_firewall,
    },
    ConfigCheck {
        name: "FW VPN",
        category: Category::Firewall,
        query: |_| "show configuration commands | grep 'firewall.*VPN'".to_string(),
        validate: check_vpn_firewall,
    },
    ConfigCheck {
        name: "WG Interface",
        category: Category::Wireguard,
        query: |_| "show configuration commands | grep wireguard".to_string(),
        validate: check_wg_interface,
    },
    ConfigCheck {
        name: "WG Peers",
        category: Category::Wireguard,
        query: |_| "show configuration commands | grep 'wireguard.*peer'".to_string(),
        validate: check_wg_peers,
    },
    ConfigCheck {
        name: "DDNS",
        category: Category::Ddns,
        query: |_| "show configuration commands | grep 'dns dynamic'".to_string(),
        validate: check_ddns,
    },
    ConfigCheck {
        name: "Default Route",
        category: Category::Routing,
        query: |_| "show ip route 0.0.0.0/0".to_string(),
        validate: check_default_route,
    },
    ConfigCheck {
        name: "NAT Source",
        category: Category::Routing,
        query: |_| "show configuration commands | grep 'nat source'".to_string(),
        validate: check_nat_source,
    },
];

/// Peers expected when none are declared in settings.
const DEFAULT_EXPECTED_PEERS: usize = 2;

/// Pass when every expectation holds; otherwise list the missing ones.
fn expect_all(name: &str, output: &str, expectations: &[(bool, String)], ok: String) -> CheckResult {
    let missing: Vec<&str> = expectations
        .iter()
        .filter(|(held, _)| !held)
        .map(|(_, what)| what.as_str())
        .collect();
    if missing.is_empty() {
        CheckResult::pass(name, ok)
    } else {
        CheckResult::fail(name, format!("Missing: {}", missing.join(", ")), output)
    }
}

fn check_wxr_link(s: &Settings, output: &str) -> CheckResult {
    let addr = &s.wxr_segment_self;
    expect_all(
        "WXR link",
        output,
        &[(output.contains(addr.as_str()), format!("IPv4 address {addr}"))],
        format!("{addr} configured"),
    )
}

fn check_wan(_s: &Settings, output: &str) -> CheckResult {
    let has_global_v6 = output
        .lines()
        .any(|l| l.contains("inet6") && l.contains("scope global"));
    expect_all(
        "WAN",
        output,
        &[(
            output.to_lowercase().contains("dhcpv6") || has_global_v6,
            "DHCPv6-PD enabled".to_string(),
        )],
        "DHCPv6-PD configured".to_string(),
    )
}

fn check_lan(s: &Settings, output: &str) -> CheckResult {
    let host = s.lan_ipv4_host();
    expect_all(
        "LAN",
        output,
        &[(output.contains(host), format!("IPv4 address {host}"))],
        format!("{host} configured"),
    )
}

fn check_wg_addresses(s: &Settings, output: &str) -> CheckResult {
    let v4 = s.wg_ipv4_host();
    let v6 = s.wg_ipv6_host();
    expect_all(
        "WireGuard interface",
        output,
        &[
            (output.contains(v4), format!("IPv4 address {v4}")),
            (output.contains(v6), format!("IPv6 address {v6}")),
        ],
        format!("{v4}, {v6}"),
    )
}

fn check_router_advert(s: &Settings, output: &str) -> CheckResult {
    let lan = &s.lan_interface;
    if !output.contains(lan.as_str()) {
        return CheckResult::fail("RA", format!("RA not configured on {lan}"), output);
    }
    CheckResult::pass("RA", format!("RA configured on {lan}"))
}

fn check_dhcpv6_pd(s: &Settings, output: &str) -> CheckResult {
    let wan = &s.wan_interface;
    let lower = output.to_lowercase();
    expect_all(
        "DHCPv6-PD",
        output,
        &[
            (output.contains(wan.as_str()), format!("DHCPv6-PD on {wan}")),
            (
                lower.contains("duid") || lower.contains("pd"),
                "DUID/PD configured".to_string(),
            ),
        ],
        format!("DHCPv6-PD on {wan}"),
    )
}

fn check_wan_firewall(_s: &Settings, output: &str) -> CheckResult {
    expect_all(
        "FW WAN6_IN",
        output,
        &[
            (
                output.contains("default-action") && output.contains("drop"),
                "default drop".to_string(),
            ),
            (output.contains("icmpv6"), "ICMPv6 rules".to_string()),
        ],
        "WAN6_IN drops by default".to_string(),
    )
}

fn check_vpn_firewall(_s: &Settings, output: &str) -> CheckResult {
    expect_all(
        "FW VPN",
        output,
        &[
            (output.contains("VPN_TO_LAN"), "VPN_TO_LAN".to_string()),
            (output.contains("VPN_TO_WAN"), "VPN_TO_WAN".to_string()),
        ],
        "VPN restrictions configured".to_string(),
    )
}

fn check_wg_interface(s: &Settings, output: &str) -> CheckResult {
    let wg = &s.wg_interface;
    let port = s.wg_port.to_string();
    expect_all(
        "WG Interface",
        output,
        &[
            (output.contains(wg.as_str()), format!("{wg} interface")),
            (output.contains(&port), format!("Port {port}")),
        ],
        format!("{wg} on port {port}"),
    )
}

fn check_wg_peers(s: &Settings, output: &str) -> CheckResult {
    let expected = match s.configured_peers().count() {
        0 => DEFAULT_EXPECTED_PEERS,
        n => n,
    };
    let found = peer_names(output).len();
    if found < expected {
        return CheckResult::fail(
            "WG Peers",
            format!("Expected {expected} peers, found {found}"),
            output,
        );
    }
    CheckResult::pass("WG Peers", format!("{found} peers configured"))
}

/// Distinct names following the `peer` keyword.
fn peer_names(output: &str) -> BTreeSet<&str> {
    let mut names = BTreeSet::new();
    for line in output.lines() {
        let mut words = line.split_whitespace();
        while let Some(word) = words.next() {
            if word == "peer" {
                if let Some(name) = words.next() {
                    names.insert(name.trim_matches('\''));
                }
            }
        }
    }
    names
}

fn check_ddns(s: &Settings, output: &str) -> CheckResult {
    let mut expectations = vec![(
        output.to_lowercase().contains("cloudflare"),
        "Cloudflare provider".to_string(),
    )];
    if let Some((_, host)) = s.ddns() {
        expectations.push((output.contains(host), format!("host-name {host}")));
    }
    expect_all(
        "DDNS",
        output,
        &expectations,
        "Cloudflare DDNS configured".to_string(),
    )
}

fn check_default_route(s: &Settings, output: &str) -> CheckResult {
    let gw = &s.wxr_segment_gw;
    if !output.contains(gw.as_str()) {
        return CheckResult::fail(
            "Default Route",
            format!("Default route via {gw} not found"),
            output,
        );
    }
    CheckResult::pass("Default Route", format!("via {gw} (WXR)"))
}

fn check_nat_source(_s: &Settings, output: &str) -> CheckResult {
    expect_all(
        "NAT Source",
        output,
        &[(
            output.to_lowercase().contains("masquerade"),
            "Source NAT".to_string(),
        )],
        "Source NAT configured".to_string(),
    )
}
