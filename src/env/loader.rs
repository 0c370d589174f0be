use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Read `KEY=VALUE` pairs from a secrets file.
///
/// A missing file is not an error and yields an empty map.
pub fn load_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        tracing::debug!("env file {} not found, using process environment only", path.display());
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse(&content))
}

/// Parse the contents of a secrets file.
///
/// Blank lines and `#` comments are skipped, as are lines without `=`.
/// Keys and values are split on the first `=` and trimmed; one matching
/// pair of outer quotes is stripped from the value. Later keys win.
pub fn parse(input: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for (line_num, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };

        let key = key.trim();
        let value = strip_quotes(value.trim());

        if vars.contains_key(key) {
            tracing::debug!("line {}: duplicate key '{}', keeping last", line_num + 1, key);
        }
        vars.insert(key.to_string(), value.to_string());
    }

    vars
}

fn strip_quotes(s: &str) -> &str {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
