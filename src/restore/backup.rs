use std::path::Path;

use super::RestoreError;

/// How a backup line is treated by the restorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `set …`: kept verbatim.
    Active,
    /// `# set …`: a disabled command that may carry a placeholder.
    CommentedCandidate,
    /// Blank lines, section comments, anything else.
    Ignored,
}

pub fn classify(line: &str) -> LineKind {
    if line.starts_with("# set ") {
        LineKind::CommentedCandidate
    } else if line.starts_with("set ") {
        LineKind::Active
    } else {
        LineKind::Ignored
    }
}

/// Extract active and commented `set` commands from backup text, in order.
pub fn parse(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim_end)
        .filter(|line| classify(line) != LineKind::Ignored)
        .map(str::to_string)
        .collect()
}

/// Read a backup file and extract its commands.
pub fn parse_file(path: &Path) -> Result<Vec<String>, RestoreError> {
    if !path.exists() {
        return Err(RestoreError::BackupNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| RestoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn classify_lines() {
        assert_eq!(classify("set system host-name 'router'"), LineKind::Active);
        assert_eq!(
            classify("# set interfaces wireguard wg0 private-key '<VyOS秘密鍵>'"),
            LineKind::CommentedCandidate
        );
        assert_eq!(classify("# --- Section header ---"), LineKind::Ignored);
        assert_eq!(classify("#set without space"), LineKind::Ignored);
        assert_eq!(classify(""), LineKind::Ignored);
        assert_eq!(classify("  set indented"), LineKind::Ignored);
        assert_eq!(classify("delete system"), LineKind::Ignored);
    }

    #[test]
    fn set_commands() {
        let commands = parse(
            "set system host-name 'router'\nset interfaces ethernet eth0 address '192.168.1.1/24'\n",
        );
        assert_eq!(
            commands,
            vec![
                "set system host-name 'router'",
                "set interfaces ethernet eth0 address '192.168.1.1/24'",
            ]
        );
    }

    #[test]
    fn commented_commands_kept() {
        let commands = parse(
            "set system host-name 'router'\n# set interfaces wireguard wg0 private-key '<VyOS秘密鍵>'\n",
        );
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[1],
            "# set interfaces wireguard wg0 private-key '<VyOS秘密鍵>'"
        );
    }

    #[test]
    fn pure_comments_skipped() {
        let commands =
            parse("# This is a comment\n# --- Section header ---\nset system host-name 'router'\n");
        assert_eq!(commands, vec!["set system host-name 'router'"]);
    }

    #[test]
    fn empty_lines_skipped() {
        assert_eq!(parse("set foo\n\n\nset bar\n"), vec!["set foo", "set bar"]);
    }

    #[test]
    fn trailing_whitespace_stripped() {
        assert_eq!(parse("set foo   \r\n"), vec!["set foo"]);
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let err = parse_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, RestoreError::BackupNotFound(_)));
    }

    #[test]
    fn file_with_nothing_retainable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backup.txt");
        std::fs::write(&path, "# only comments\n\n").unwrap();
        assert!(parse_file(&path).unwrap().is_empty());
    }
}
