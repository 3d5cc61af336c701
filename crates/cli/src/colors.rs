// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for help output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use crate::env;

/// ANSI 256-color codes for help output
pub mod codes {
    /// Section headers: pastel cyan/steel blue
    pub const HEADER: u8 = 74;
    /// Commands/literals: light grey
    pub const LITERAL: u8 = 250;
    /// Default values/context: medium grey
    pub const CONTEXT: u8 = 245;

    /// Pre-formatted ANSI escape sequences for use in tests
    pub const HEADER_START: &str = "\x1b[38;5;74m";
    pub const LITERAL_START: &str = "\x1b[38;5;250m";
    pub const CONTEXT_START: &str = "\x1b[38;5;245m";
    pub const RESET: &str = "\x1b[0m";
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Format a 256-color ANSI escape sequence for foreground color.
fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

/// ANSI reset sequence.
const RESET: &str = "\x1b[0m";

/// Apply header color (section titles) to text.
pub fn header(text: &str) -> String {
    format!("{}{}{}", fg256(codes::HEADER), text, RESET)
}

/// Apply literal color (commands, options) to text.
pub fn literal(text: &str) -> String {
    format!("{}{}{}", fg256(codes::LITERAL), text, RESET)
}

/// Apply context color (default values, hints) to text.
pub fn context(text: &str) -> String {
    format!("{}{}{}", fg256(codes::CONTEXT), text, RESET)
}

/// Colorize an examples help block.
///
/// Expects format like:
/// ```text
/// Examples:
///   mule enqueue photo wo-42 --data '{"path":"pump.jpg"}'   Queue a photo upload
///   mule sync                                               Deliver queued mutations
///
/// Kinds:
///   Valid: photo, checklist, documentation, work_order_update
/// ```
///
/// Colorizes:
/// - Section headers (lines ending with `:`) as header color
/// - Commands (before `  `) as literal color
/// - Documentation labels (e.g., "Valid:") as plain, values as literal
pub fn examples(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + 256);
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            result.push('\n');
        }
        result.push_str(&render_line(line));
    }
    result
}

/// Colorize a single line of an examples block.
fn render_line(line: &str) -> String {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];

    // Section header, e.g. "Examples:" or "Get started:"
    if trimmed.ends_with(':') && !trimmed.contains("  ") {
        return format!("{}{}", indent, header(trimmed));
    }

    // Example line: command, 2+ spaces, description
    if let Some(cmd_end) = find_description_start(trimmed) {
        let (cmd, desc) = trimmed.split_at(cmd_end);
        return format!("{}{}{}", indent, colorize_command(cmd), desc);
    }

    // Documentation line: "Label: value" keeps the label plain
    if let Some(colon) = trimmed.find(": ") {
        let (label, value) = trimmed.split_at(colon + 2);
        return format!("{}{}{}", indent, label, literal(value));
    }

    line.to_string()
}

/// Colorize a command string, highlighting quoted content, placeholders,
/// and flag values as context.
pub fn colorize_command(cmd: &str) -> String {
    let mut result = String::with_capacity(cmd.len() + 128);
    let mut in_quotes = false;
    let mut flag_value_next = false;

    for (i, token) in cmd.split(' ').enumerate() {
        if i > 0 {
            result.push(' ');
        }
        if token.is_empty() {
            continue;
        }

        // Continuation of a double-quoted span from an earlier token
        if in_quotes {
            result.push_str(&context(token));
            if token.ends_with('"') {
                in_quotes = false;
            }
            continue;
        }

        let quoted = token.starts_with('"') || token.starts_with('\'');
        let placeholder = token.starts_with('<');
        if quoted || placeholder || flag_value_next {
            result.push_str(&context(token));
            flag_value_next = false;
            if token.starts_with('"') && !token[1..].ends_with('"') {
                in_quotes = true;
            }
            continue;
        }

        result.push_str(&literal(token));
        flag_value_next = token.starts_with('-') && !token.contains('=');
    }

    result
}

/// Find where the description starts (after 2+ spaces following the command).
pub fn find_description_start(line: &str) -> Option<usize> {
    let mut run_start: Option<usize> = None;
    for (i, b) in line.bytes().enumerate() {
        if b == b' ' {
            run_start.get_or_insert(i);
        } else if let Some(start) = run_start.take() {
            if i - start >= 2 {
                return Some(start);
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
