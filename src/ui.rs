//! Centralized UI formatting and color utilities
//!
//! This module provides a unified interface for status colors, icons, and
//! formatting patterns used throughout the stackgate CLI.

use colored::{ColoredString, Colorize};

use crate::registry::UnitStatus;

/// Environment variable enabling quiet mode
pub const QUIET_ENV: &str = "STACKGATE_QUIET";

/// Check if quiet mode is enabled via environment variable or --quiet flag
pub fn is_quiet() -> bool {
    std::env::var(QUIET_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Returns a colored status icon for a unit status.
///
/// Icons:
/// - Create/update complete: ● (green)
/// - In progress: ◐ (yellow)
/// - Failed or rolled back: ✗ (red)
/// - Deleted: ○ (dimmed)
/// - Anything else: ? (normal)
pub fn status_icon(status: &UnitStatus) -> ColoredString {
    let text = status.as_str();
    if status.is_terminal_success() {
        "●".green()
    } else if text.ends_with("IN_PROGRESS") {
        "◐".yellow()
    } else if text.contains("FAILED") || text.contains("ROLLBACK") {
        "✗".red()
    } else if *status == UnitStatus::DeleteComplete {
        "○".dimmed()
    } else {
        "?".normal()
    }
}

/// Color scheme for status-related text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for success/completion
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Yellow for in-progress/warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Red for errors/failures
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for identifiers (unit names, tenants)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary text
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Bold for headings
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }
}

/// Common text formatting patterns
pub mod format {
    /// Format a separator line for sections
    pub fn separator(width: usize) -> String {
        "─".repeat(width)
    }

    /// Join names for a one-line summary, eliding after `max` entries
    pub fn name_list(names: &[String], max: usize) -> String {
        if names.len() <= max {
            names.join(", ")
        } else {
            format!("{}, +{} more", names[..max].join(", "), names.len() - max)
        }
    }
}
