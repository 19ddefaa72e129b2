use std::io::Write;

use console::Style;

/// Print a status line such as `    Resolved 4 artifacts`, with the label
/// right-aligned to 12 columns in bold green.
pub fn status(label: &str, message: &str) {
    print_status(Style::new().green().bold(), label, message);
}

/// Like [`status`] with a bold yellow label, for problems that don't abort
/// the command.
pub fn status_warn(label: &str, message: &str) {
    print_status(Style::new().yellow().bold(), label, message);
}

fn print_status(style: Style, label: &str, message: &str) {
    let _ = writeln!(std::io::stderr(), "{}", format_status(&style, label, message));
}

fn format_status(style: &Style, label: &str, message: &str) -> String {
    format!("{:>12} {message}", style.apply_to(label))
}
