use crate::env::EnvironmentMap;

use super::mapping::{SecretMapping, SECRET_MAPPINGS};

const COMMENT_PREFIX: &str = "# ";

/// Commands ready to apply, plus one warning per line with a missing secret.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Substituted {
    pub commands: Vec<String>,
    pub warnings: Vec<String>,
}

/// Outcome of scanning one line against the mapping table.
enum Scan {
    /// Every placeholder found was resolved (possibly none were found).
    Resolved(String),
    /// The first placeholder without a value; later mappings were not checked.
    Unresolved(&'static SecretMapping),
}

/// Replace placeholders in backup commands with secret values.
///
/// Active commands are always kept as-is, even when they carry a
/// placeholder. A commented command is enabled only when at least one
/// placeholder was filled and none is left unresolved; otherwise it is
/// dropped. Each line with a missing secret adds one warning.
pub fn substitute(lines: &[String], env: &EnvironmentMap) -> Substituted {
    substitute_with(lines, env, SECRET_MAPPINGS)
}

fn substitute_with(
    lines: &[String],
    env: &EnvironmentMap,
    mappings: &'static [SecretMapping],
) -> Substituted {
    let mut out = Substituted::default();

    for line in lines {
        let (working, commented) = match line.strip_prefix(COMMENT_PREFIX) {
            Some(rest) => (rest, true),
            None => (line.as_str(), false),
        };

        let scanned = scan(working, env, mappings);
        if let Scan::Unresolved(mapping) = &scanned {
            out.warnings.push(format!(
                "Missing {} for placeholder {}",
                mapping.env_var, mapping.pattern
            ));
        }

        // active commands are never rewritten
        if !commented {
            out.commands.push(line.clone());
            continue;
        }

        match scanned {
            Scan::Resolved(text) if text != working => out.commands.push(text),
            Scan::Resolved(_) => {
                tracing::debug!("dropping commented command without placeholder");
            }
            Scan::Unresolved(_) => {}
        }
    }

    out
}

fn scan(text: &str, env: &EnvironmentMap, mappings: &'static [SecretMapping]) -> Scan {
    let mut text = text.to_string();
    for mapping in mappings {
        if !text.contains(mapping.pattern) {
            continue;
        }
        match env.resolve_non_empty(mapping.env_var) {
            Some(value) => text = text.replace(mapping.pattern, value),
            None => return Scan::Unresolved(mapping),
        }
    }
    Scan::Resolved(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> EnvironmentMap {
        EnvironmentMap::from_file_vars(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn replaces_placeholders() {
        let commands = lines(&[
            "# set interfaces wireguard wg0 private-key '<VyOS秘密鍵>'",
            "# set interfaces wireguard wg0 peer mac public-key '<Mac公開鍵>'",
        ]);
        let env = env(&[
            ("VYOS_WG_PRIVATE_KEY", "server_private_key"),
            ("VYOS_WG_MAC_PUBKEY", "mac_public_key"),
        ]);

        let out = substitute(&commands, &env);
        assert_eq!(
            out.commands,
            vec![
                "set interfaces wireguard wg0 private-key 'server_private_key'",
                "set interfaces wireguard wg0 peer mac public-key 'mac_public_key'",
            ]
        );
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn missing_secret_warns_and_drops() {
        let commands = lines(&[
            "# set service dns dynamic name cloudflare password '<Cloudflare APIトークン>'",
        ]);
        let out = substitute(&commands, &env(&[]));
        assert!(out.commands.is_empty());
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("VYOS_CF_ACCOUNT_API_TOKEN"));
        assert!(out.warnings[0].contains("<Cloudflare APIトークン>"));
    }

    #[test]
    fn active_commands_pass_through() {
        let commands = lines(&[
            "set system host-name 'router'",
            "set interfaces ethernet eth0 address '192.168.1.1/24'",
        ]);
        let out = substitute(&commands, &env(&[]));
        assert_eq!(out.commands, commands);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn active_command_with_unresolved_placeholder_is_kept() {
        let commands = lines(&["set system login user vyos authentication public-keys k key <公開鍵>"]);
        let out = substitute(&commands, &env(&[]));
        assert_eq!(out.commands, commands);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn active_command_with_placeholder_kept_verbatim() {
        let commands = lines(&["set system login user vyos authentication public-keys k key <公開鍵>"]);
        let out = substitute(&commands, &env(&[("VYOS_SSH_PUBKEY", "AAAAC3")]));
        assert_eq!(out.commands, commands);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn commented_without_placeholder_dropped() {
        let commands = lines(&["# set service ssh disable-password-authentication"]);
        let out = substitute(&commands, &env(&[]));
        assert!(out.commands.is_empty());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn every_occurrence_replaced() {
        let commands = lines(&["# set a '<VyOS秘密鍵>' b '<VyOS秘密鍵>'"]);
        let out = substitute(&commands, &env(&[("VYOS_WG_PRIVATE_KEY", "k")]));
        assert_eq!(out.commands, vec!["set a 'k' b 'k'"]);
    }

    #[test]
    fn later_unresolved_placeholder_reverts_whole_line() {
        // the private key is scanned before the Mac key
        let commands = lines(&["# set x '<VyOS秘密鍵>' y '<Mac公開鍵>'"]);
        let out = substitute(&commands, &env(&[("VYOS_WG_PRIVATE_KEY", "priv")]));
        assert!(out.commands.is_empty());
        assert_eq!(
            out.warnings,
            vec!["Missing VYOS_WG_MAC_PUBKEY for placeholder <Mac公開鍵>"]
        );
    }

    #[test]
    fn earlier_unresolved_placeholder_stops_scan() {
        let commands = lines(&["# set x '<Mac公開鍵>' y '<VyOS秘密鍵>'"]);
        let out = substitute(&commands, &env(&[("VYOS_WG_MAC_PUBKEY", "mac")]));
        assert!(out.commands.is_empty());
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("VYOS_WG_PRIVATE_KEY"));
    }

    #[test]
    fn empty_secret_counts_as_missing() {
        let commands = lines(&["# set x '<VyOS秘密鍵>'"]);
        let out = substitute(&commands, &env(&[("VYOS_WG_PRIVATE_KEY", "")]));
        assert!(out.commands.is_empty());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn warnings_follow_line_order() {
        let commands = lines(&[
            "# set a '<iPhone公開鍵>'",
            "set system host-name 'router'",
            "# set b '<公開鍵>'",
        ]);
        let out = substitute(&commands, &env(&[]));
        assert_eq!(out.commands, vec!["set system host-name 'router'"]);
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[0].contains("VYOS_WG_IPHONE_PUBKEY"));
        assert!(out.warnings[1].contains("VYOS_SSH_PUBKEY"));
    }

    #[test]
    fn ordering_preserved_across_kinds() {
        let commands = lines(&[
            "set a",
            "# set b '<VyOS秘密鍵>'",
            "set c",
            "# set d '<Mac公開鍵>'",
            "set e",
        ]);
        let out = substitute(&commands, &env(&[("VYOS_WG_PRIVATE_KEY", "k")]));
        assert_eq!(out.commands, vec!["set a", "set b 'k'", "set c", "set e"]);
    }

    #[test]
    fn custom_table_is_honored() {
        static TABLE: &[SecretMapping] = &[SecretMapping {
            pattern: "<secret-X>",
            env_var: "SECRET_X",
            description: "test secret",
        }];
        let commands = lines(&[
            "set system host-name 'router'",
            "# set interfaces wireguard wg0 private-key '<secret-X>'",
        ]);
        let out = substitute_with(&commands, &env(&[("SECRET_X", "abc123")]), TABLE);
        assert_eq!(
            out.commands,
            vec![
                "set system host-name 'router'",
                "set interfaces wireguard wg0 private-key 'abc123'",
            ]
        );
        assert!(out.warnings.is_empty());

        let out = substitute_with(&commands, &env(&[]), TABLE);
        assert_eq!(out.commands, vec!["set system host-name 'router'"]);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("SECRET_X"));
    }
}
