//! # vyos-kit
//!
//! Generate, check, and restore VyOS configuration commands, and build
//! WireGuard client profiles.

pub mod checks;
pub mod cli;
pub mod client;
pub mod config;
pub mod env;
pub mod phases;
pub mod restore;
pub mod ui;
