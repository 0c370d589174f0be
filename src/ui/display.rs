use console::style;

/// Print a success message: "ok: <message>"
pub fn ok(message: &str) {
    eprintln!("{} {}", style("ok:").green().bold(), message);
}

/// Print an error message: "error: <message>"
pub fn error(message: &str) {
    eprintln!("{} {}", style("error:").red().bold(), message);
}

/// Print a warning message: "warning: <message>"
pub fn warning(message: &str) {
    eprintln!("{} {}", style("warning:").yellow().bold(), message);
}

/// Print an indented detail line under a previous message.
pub fn detail(label: &str, value: &str) {
    eprintln!("  {:<28}{}", style(label).bold(), value);
}

/// Format a pass/fail marker for check reports.
pub fn status_mark(passed: bool) -> String {
    if passed {
        style("PASS").green().bold().to_string()
    } else {
        style("FAIL").red().bold().to_string()
    }
}
