use crate::config::Settings;

use super::Lines;

const ICMPV6_ALLOWED: [(u32, &str); 5] = [
    (20, "echo-request"),
    (21, "neighbor-solicitation"),
    (22, "neighbor-advertisement"),
    (23, "router-solicitation"),
    (24, "router-advertisement"),
];

/// Phase 2: IPv6 on the WAN side, router advertisements, inbound firewall.
pub fn phase2(settings: &Settings) -> Vec<String> {
    let wan = &settings.wan_interface;
    let lan = &settings.lan_interface;

    let mut out = Lines::banner("Phase 2: IPv6 foundation");
    out.section("2-1: RA and DHCPv6-PD on WAN");
    out.push("configure");
    out.blank();
    out.push(format!("set interfaces ethernet {wan} description 'WAN'"));
    out.push(format!("set interfaces ethernet {wan} ipv6 address autoconf"));
    out.push(format!(
        "set interfaces ethernet {wan} dhcpv6-options pd 0 length {}",
        settings.pd_length
    ));
    out.push(format!(
        "set interfaces ethernet {wan} dhcpv6-options pd 0 interface {lan} sla-id {}",
        settings.pd_sla_id
    ));
    out.blank();
    out.commit_save();
    out.blank();
    out.push("# Verify: show interfaces");
    out.blank();

    out.section("2-2: Router advertisements on LAN");
    out.push(format!("set service router-advert interface {lan} prefix ::/64"));
    out.push(format!(
        "set service router-advert interface {lan} name-server {}",
        settings.dns_ipv6
    ));
    out.blank();
    out.commit_save();
    out.blank();

    out.section("2-3: IPv6 firewall");
    out.push("set firewall ipv6 name WAN6_IN default-action drop");
    out.blank();
    out.push("# Allow established/related sessions");
    out.push("set firewall ipv6 name WAN6_IN rule 10 action accept");
    out.push("set firewall ipv6 name WAN6_IN rule 10 state established enable");
    out.push("set firewall ipv6 name WAN6_IN rule 10 state related enable");
    out.blank();
    out.push("# ICMPv6 (required types only)");
    for (i, (rule, icmp_type)) in ICMPV6_ALLOWED.iter().enumerate() {
        if i > 0 {
            out.blank();
        }
        out.push(format!("set firewall ipv6 name WAN6_IN rule {rule} action accept"));
        out.push(format!("set firewall ipv6 name WAN6_IN rule {rule} protocol icmpv6"));
        out.push(format!(
            "set firewall ipv6 name WAN6_IN rule {rule} icmpv6 type {icmp_type}"
        ));
    }
    out.blank();
    out.push("# Apply to interface");
    out.push(format!("set interfaces ethernet {wan} firewall in ipv6-name WAN6_IN"));
    out.blank();
    out.commit_save();
    out.into_vec()
}

/// Phase 4: transit segment to the upstream router, IPv4 routing and NAT.
pub fn phase4(settings: &Settings) -> Vec<String> {
    let wxr = &settings.wxr_interface;
    let lan = &settings.lan_interface;

    let mut out = Lines::banner("Phase 4: Upstream isolation and IPv4 routing");
    out.push("# Note: steps 4-1 and 4-2 are done on the upstream router's admin page");
    out.blank();

    out.section("4-3: Transit segment");
    out.push("configure");
    out.blank();
    out.push(format!(
        "set interfaces ethernet {wxr} description 'To WXR LAN (IPv4 transit)'"
    ));
    out.push(format!(
        "set interfaces ethernet {wxr} address {}",
        settings.wxr_segment_self
    ));
    out.blank();
    out.commit_save();
    out.blank();
    out.push(format!("# Reachability: ping {}", settings.wxr_segment_gw));
    out.blank();

    out.section("4-4: IPv4 routing");
    out.push("# Route all IPv4 through the upstream router");
    out.push(format!(
        "set protocols static route 0.0.0.0/0 next-hop {}",
        settings.wxr_segment_gw
    ));
    out.blank();
    out.push("# LAN IPv4 address");
    out.push(format!("set interfaces ethernet {lan} address {}", settings.lan_ipv4));
    out.blank();
    out.push("# Masquerade LAN traffic towards the upstream router");
    out.push(format!("set nat source rule 100 outbound-interface name {wxr}"));
    out.push(format!(
        "set nat source rule 100 source address {}",
        settings.lan_ipv4_network
    ));
    out.push("set nat source rule 100 translation address masquerade");
    out.blank();
    out.commit_save();
    out.blank();
    out.extend([
        "# Verify:",
        "# show ip route",
        "# ping 8.8.8.8",
        "# curl -4 ifconfig.me",
    ]);
    out.into_vec()
}
