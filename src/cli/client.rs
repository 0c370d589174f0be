use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::client::keygen::{self, KeyPair, WgTool};
use crate::client::qr::{self, QrOutcome};
use crate::client::{self, ClientProfile};
use crate::config::Settings;
use crate::ui::display;

#[derive(Args)]
pub struct ClientArgs {
    /// Client name, used as the peer name on the router
    #[arg(long)]
    pub name: String,

    /// Router's WireGuard public key
    #[arg(long)]
    pub server_pubkey: String,

    /// Router endpoint (host:port), defaults to the DDNS host and WireGuard port
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Client IPv4 address with prefix length
    #[arg(long)]
    pub ipv4: Option<String>,

    /// Client IPv6 address with prefix length
    #[arg(long)]
    pub ipv6: Option<String>,

    /// Host number inside the VPN subnets
    #[arg(long, default_value = "2")]
    pub client_id: u32,

    /// Comma-separated networks routed through the tunnel
    #[arg(long)]
    pub allowed_ips: Option<String>,

    /// Also print the profile as a QR code
    #[arg(long)]
    pub qr: bool,

    /// Write the profile to a file (mode 0600) instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Use an existing private key instead of generating one
    #[arg(long)]
    pub private_key: Option<String>,

    /// WireGuard tool binary
    #[arg(long, default_value = "wg", hide = true)]
    pub wg: String,

    /// QR encoder binary
    #[arg(long, default_value = "qrencode", hide = true)]
    pub qrencode: String,
}

pub fn run(args: ClientArgs, config: Option<&str>) -> Result<()> {
    client::validate_name(&args.name)?;
    keygen::validate_key(&args.server_pubkey).context("invalid --server-pubkey")?;
    let settings = Settings::load(config)?;

    let wg = WgTool::new(&args.wg);
    let keys = match &args.private_key {
        Some(private_key) => {
            keygen::validate_key(private_key).context("invalid --private-key")?;
            let private_key = private_key.trim().to_string();
            let public_key = wg.public_key(&private_key)?;
            KeyPair {
                private_key,
                public_key,
            }
        }
        None => {
            tracing::debug!("generating key pair with {}", args.wg);
            wg.generate()?
        }
    };

    let (default_ipv4, default_ipv6) = client::default_addresses(args.client_id);
    let profile = ClientProfile {
        name: args.name.clone(),
        private_key: keys.private_key.clone(),
        ipv4: args.ipv4.unwrap_or(default_ipv4),
        ipv6: args.ipv6.unwrap_or(default_ipv6),
        server_pubkey: args.server_pubkey.trim().to_string(),
        endpoint: args
            .endpoint
            .unwrap_or_else(|| client::default_endpoint(&settings)),
        allowed_ips: match &args.allowed_ips {
            Some(list) => client::parse_allowed_ips(list),
            None => client::default_allowed_ips(&settings),
        },
    };
    let rendered = profile.to_string();

    match &args.output {
        Some(path) => {
            write_secret_file(path, rendered.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            display::ok(&format!("profile written to {}", path.display()));
        }
        None => print!("{}", rendered),
    }

    display::detail("Client public key", &keys.public_key);
    println!();
    println!("# Register the client on the router:");
    for line in client::peer_commands(&settings.wg_interface, &profile, &keys.public_key) {
        println!("{line}");
    }

    if args.qr {
        println!();
        println!("# QR code:");
        match qr::render(&args.qrencode, &rendered)? {
            QrOutcome::Rendered => {}
            QrOutcome::Unavailable => display::warning(&format!(
                "{} not found, skipping QR code (install qrencode to enable)",
                args.qrencode
            )),
        }
    }

    Ok(())
}

/// Write a file containing a private key, readable only by the owner on Unix.
fn write_secret_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(content)?;
    }
    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }
    Ok(())
}
