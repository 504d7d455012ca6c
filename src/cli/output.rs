//! Colored terminal output
//!
//! `colored` honours NO_COLOR and CLICOLOR_FORCE, so nothing here checks for a tty.

use std::fmt::Display;

use colored::Colorize;

/// `error: <msg>` on stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// `warning: <msg>` on stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// `  label:   value` with the label padded to `width` before coloring,
/// so escape codes don't break the alignment.
pub fn field(label: &str, width: usize, value: &(impl Display + ?Sized)) {
    let padded = format!("{:<width$}", format!("{label}:"), width = width + 1);
    println!("  {} {}", padded.green(), value);
}

/// One name per line, uncolored so the output pipes cleanly.
pub fn names(items: &[String]) {
    for item in items {
        println!("{item}");
    }
}

/// Uncolored data (trees, tables, TOML).
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{msg}");
}
