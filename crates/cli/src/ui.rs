//! Terminal UI helpers for consistent colored output.

use std::future::Future;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Print a success message with green checkmark.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an info message with blue info icon.
pub fn info(msg: &str) {
    eprintln!("{} {}", "ℹ".blue(), msg);
}

/// Print an error message with red X.
fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a hint/suggestion (dimmed, indented).
fn hint(msg: &str) {
    eprintln!("  {} {}", "→".dimmed(), msg.dimmed());
}

/// Format a value as bold (for IDs, names, etc.).
pub fn bold(s: &str) -> String {
    s.bold().to_string()
}

/// Run an async operation with a spinner showing the given message.
/// Returns the result of the operation.
pub async fn spin<T, F: Future<Output = T>>(msg: &str, fut: F) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.dim} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = fut.await;

    spinner.finish_and_clear();
    result
}

/// Display an error with contextual hints based on the error message.
pub fn print_error(err: &anyhow::Error) {
    let msg = err.to_string();
    error(&msg);

    if let Some(hint_msg) = hint_for(&msg) {
        hint(hint_msg);
    }
}

fn hint_for(msg: &str) -> Option<&'static str> {
    // More specific checks first
    if msg.contains("Admin token not set") || msg.contains("Stats token not set") {
        None
    } else if msg.contains("not configured") {
        Some("The server has no admin token. Set DROPPY_ADMIN_TOKEN on the server.")
    } else if msg.contains("Unauthorized") || msg.contains("401") {
        Some("Check DROPPY_ADMIN_TOKEN / DROPPY_VISIT_STATS_TOKEN.")
    } else if msg.contains("retry in") || msg.contains("Too many attempts") {
        Some("You are being rate limited. Wait and try again.")
    } else if msg.contains("Invalid period") || msg.contains("unknown period") {
        Some("Use one of: weekly, monthly, all.")
    } else if msg.contains("connection")
        || msg.contains("Connection")
        || msg.contains("dns")
        || msg.contains("timeout")
        || msg.contains("Timeout")
        || msg.contains("resolve")
    {
        Some("Is the server running? Check DROPPY_API_URL.")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_for_rate_limits() {
        assert_eq!(
            hint_for("Too many attempts. Wait a moment. (retry in 60s)"),
            Some("You are being rate limited. Wait and try again.")
        );
    }

    #[test]
    fn not_configured_beats_unauthorized() {
        assert_eq!(
            hint_for("Admin access is not configured"),
            Some("The server has no admin token. Set DROPPY_ADMIN_TOKEN on the server.")
        );
    }

    #[test]
    fn local_token_errors_carry_their_own_hint() {
        assert_eq!(hint_for("Admin token not set. Export DROPPY_ADMIN_TOKEN."), None);
    }

    #[test]
    fn unknown_errors_have_no_hint() {
        assert_eq!(hint_for("Score does not match the run."), None);
    }
}
