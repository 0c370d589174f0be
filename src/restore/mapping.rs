use crate::env::EnvironmentMap;

/// A redacted placeholder and the environment variable that supplies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretMapping {
    /// Literal marker, matched by substring containment.
    pub pattern: &'static str,
    pub env_var: &'static str,
    pub description: &'static str,
}

pub const SSH_PUBKEY_PLACEHOLDER: &str = "<公開鍵>";
pub const WG_PRIVATE_KEY_PLACEHOLDER: &str = "<VyOS秘密鍵>";
pub const WG_MAC_PUBKEY_PLACEHOLDER: &str = "<Mac公開鍵>";
pub const WG_IPHONE_PUBKEY_PLACEHOLDER: &str = "<iPhone公開鍵>";
pub const CF_API_TOKEN_PLACEHOLDER: &str = "<Cloudflare APIトークン>";

/// Placeholders known to the restorer, in scan order.
pub static SECRET_MAPPINGS: &[SecretMapping] = &[
    SecretMapping {
        pattern: SSH_PUBKEY_PLACEHOLDER,
        env_var: "VYOS_SSH_PUBKEY",
        description: "SSH public key (ed25519)",
    },
    SecretMapping {
        pattern: WG_PRIVATE_KEY_PLACEHOLDER,
        env_var: "VYOS_WG_PRIVATE_KEY",
        description: "WireGuard server private key",
    },
    SecretMapping {
        pattern: WG_MAC_PUBKEY_PLACEHOLDER,
        env_var: "VYOS_WG_MAC_PUBKEY",
        description: "WireGuard Mac client public key",
    },
    SecretMapping {
        pattern: WG_IPHONE_PUBKEY_PLACEHOLDER,
        env_var: "VYOS_WG_IPHONE_PUBKEY",
        description: "WireGuard iPhone client public key",
    },
    SecretMapping {
        pattern: CF_API_TOKEN_PLACEHOLDER,
        env_var: "VYOS_CF_ACCOUNT_API_TOKEN",
        description: "Cloudflare Account API token for DDNS (NOT user token)",
    },
];

/// Mappings whose secret is absent or empty, in table order.
pub fn missing_secrets(env: &EnvironmentMap) -> Vec<&'static SecretMapping> {
    SECRET_MAPPINGS
        .iter()
        .filter(|m| env.resolve_non_empty(m.env_var).is_none())
        .collect()
}
