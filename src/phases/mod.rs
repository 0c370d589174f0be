//! Configuration command generators, one per setup phase.
//!
//! Each generator is a pure function from [`Settings`] to the lines an
//! operator pastes into the router. Lines starting with `#` are comments
//! or commands left for the operator to fill in.

pub mod network;
pub mod operations;
pub mod system;
pub mod wireguard;

use clap::ValueEnum;

use crate::config::Settings;

pub use network::{phase2, phase4};
pub use operations::{phase5, phase6};
pub use system::{phase0, phase1};
pub use wireguard::phase3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Phase {
    /// Time zone and NTP
    Phase0,
    /// SSH access
    Phase1,
    /// IPv6 autoconfiguration, router advertisements, firewall
    Phase2,
    /// WireGuard VPN
    Phase3,
    /// Transit segment, IPv4 routing, NAT
    Phase4,
    /// Dynamic DNS and firewall logging
    Phase5,
    /// Scheduled backups
    Phase6,
    /// Every phase in order
    All,
}

impl Phase {
    pub const ORDERED: [Phase; 7] = [
        Phase::Phase0,
        Phase::Phase1,
        Phase::Phase2,
        Phase::Phase3,
        Phase::Phase4,
        Phase::Phase5,
        Phase::Phase6,
    ];
}

pub fn generate(phase: Phase, settings: &Settings) -> Vec<String> {
    match phase {
        Phase::Phase0 => phase0(settings),
        Phase::Phase1 => phase1(settings),
        Phase::Phase2 => phase2(settings),
        Phase::Phase3 => phase3(settings),
        Phase::Phase4 => phase4(settings),
        Phase::Phase5 => phase5(settings),
        Phase::Phase6 => phase6(settings),
        Phase::All => generate_all(settings),
    }
}

/// All phases in order, separated by a blank line.
pub fn generate_all(settings: &Settings) -> Vec<String> {
    let mut commands = Vec::new();
    for (i, phase) in Phase::ORDERED.iter().enumerate() {
        if i > 0 {
            commands.push(String::new());
        }
        commands.extend(generate(*phase, settings));
    }
    commands
}

/// Line buffer shared by the phase generators.
#[derive(Default)]
pub(crate) struct Lines(Vec<String>);

impl Lines {
    pub(crate) fn banner(title: &str) -> Self {
        let mut lines = Self::default();
        lines.push("# ========================================");
        lines.push(format!("# {title}"));
        lines.push("# ========================================");
        lines.blank();
        lines
    }

    pub(crate) fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    pub(crate) fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(lines.into_iter().map(Into::into));
    }

    pub(crate) fn blank(&mut self) {
        self.0.push(String::new());
    }

    /// `# --- title ---` followed by a blank line.
    pub(crate) fn section(&mut self, title: &str) {
        self.push(format!("# --- {title} ---"));
        self.blank();
    }

    pub(crate) fn commit_save(&mut self) {
        self.push("commit");
        self.push("save");
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
pub(crate) fn joined(lines: &[String]) -> String {
    lines.join("\n")
}
