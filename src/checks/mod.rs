//! Read-only verification of a running router against [`Settings`].

pub mod catalog;
pub mod remote;

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use crate::config::Settings;
use crate::ui::display;

pub use catalog::CHECKS;
pub use remote::{CommandOutput, RemoteShell, SshShell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Ethernet and WireGuard interface addresses
    Interface,
    /// Router advertisements and DHCPv6-PD
    Ipv6,
    /// Firewall rule sets
    Firewall,
    /// WireGuard interface and peers
    Wireguard,
    /// Dynamic DNS
    Ddns,
    /// Default route and source NAT
    Routing,
    /// Every category
    All,
}

impl Category {
    #[cfg(test)]
    pub const SELECTABLE: [Category; 6] = [
        Category::Interface,
        Category::Ipv6,
        Category::Firewall,
        Category::Wireguard,
        Category::Ddns,
        Category::Routing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Interface => "interface",
            Category::Ipv6 => "ipv6",
            Category::Firewall => "firewall",
            Category::Wireguard => "wireguard",
            Category::Ddns => "ddns",
            Category::Routing => "routing",
            Category::All => "all",
        }
    }

    /// Whether a check in `category` runs under this selection.
    pub fn selects(self, category: Category) -> bool {
        self == Category::All || self == category
    }
}

/// One entry of the check catalogue.
pub struct ConfigCheck {
    pub name: &'static str,
    pub category: Category,
    /// Operational command to run on the router.
    pub query: fn(&Settings) -> String,
    pub validate: fn(&Settings, &str) -> CheckResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    /// Raw output kept for failed checks.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl CheckResult {
    pub fn pass(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.into(),
            details: String::new(),
        }
    }

    pub fn fail(name: &str, message: impl Into<String>, details: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.into(),
            details: details.to_string(),
        }
    }
}

/// Checks selected by `category`, in catalogue order.
pub fn select(category: Category) -> impl Iterator<Item = &'static ConfigCheck> {
    CHECKS.iter().filter(move |c| category.selects(c.category))
}

/// Run the selected checks one after another.
///
/// A query that fails at the transport level is recorded as a failed check
/// and the remaining checks still run. Any output is handed to the
/// validator, whatever the exit status.
pub async fn run_checks<S: RemoteShell>(
    shell: &S,
    settings: &Settings,
    category: Category,
) -> Vec<CheckResult> {
    let mut results = Vec::new();

    for check in select(category) {
        tracing::debug!("checking {}...", check.name);
        let output = shell.run(&(check.query)(settings)).await;

        let result = if output.is_transport_failure() {
            let reason = if output.stderr.is_empty() {
                "Unknown error"
            } else {
                output.stderr.as_str()
            };
            CheckResult::fail(check.name, format!("Command failed: {reason}"), "")
        } else {
            (check.validate)(settings, &output.stdout)
        };

        results.push(result);
    }

    results
}

/// Aggregate outcome of a check run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<CheckResult>,
}

impl Report {
    pub fn new(results: Vec<CheckResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            passed,
            failed: results.len() - passed,
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Human-readable report. With `verbose`, failed checks show up to five
    /// lines of the raw output.
    pub fn render(&self, verbose: bool) -> String {
        let rule = "=".repeat(50);
        let mut out = String::new();
        let _ = writeln!(out, "{rule}\nVyOS Configuration Check Results\n{rule}");

        let _ = writeln!(out, "\nPASSED:");
        for r in self.results.iter().filter(|r| r.passed) {
            let _ = writeln!(out, "  {} {}: {}", display::status_mark(true), r.name, r.message);
        }

        if self.failed > 0 {
            let _ = writeln!(out, "\nFAILED:");
            for r in self.results.iter().filter(|r| !r.passed) {
                let _ = writeln!(out, "  {} {}: {}", display::status_mark(false), r.name, r.message);
                if verbose {
                    for line in r.details.lines().take(5) {
                        let _ = writeln!(out, "    | {line}");
                    }
                }
            }
        }

        let _ = writeln!(out, "\n{}", "-".repeat(50));
        let _ = writeln!(
            out,
            "Summary: {}/{} checks passed",
            self.passed,
            self.results.len()
        );
        out
    }
}
