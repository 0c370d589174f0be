use std::io::{self, Write};

const HEADER: &[&str] = &[
    "# VyOS Configuration Restore Commands",
    "# Generated by vyos-kit restore",
    "#",
    "# Usage:",
    "#   1. Login to VyOS",
    "#   2. Enter configuration mode: configure",
    "#   3. Paste these commands",
    "#   4. Commit and save: commit; save",
    "#",
    "# Or run directly:",
    "#   vbash -c 'source /opt/vyatta/etc/functions/script-template'",
    "#   configure",
    "#   <paste commands>",
    "#   commit",
    "#   save",
    "#",
    "",
];

/// Write restore commands, one per line, optionally after the usage header.
pub fn write_script<W: Write>(out: &mut W, commands: &[String], include_header: bool) -> io::Result<()> {
    if include_header {
        for line in HEADER {
            writeln!(out, "{line}")?;
        }
    }
    for command in commands {
        writeln!(out, "{command}")?;
    }
    out.flush()
}

/// Render the restore script to a string.
pub fn render(commands: &[String], include_header: bool) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_script(&mut buf, commands, include_header);
    String::from_utf8_lossy(&buf).into_owned()
}
