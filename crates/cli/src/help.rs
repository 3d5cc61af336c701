// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles for help output.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let header = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::HEADER))));
    let literal = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::LITERAL))));
    let placeholder =
        Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::CONTEXT))));
    let context = Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(colors::codes::CONTEXT))));

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(literal)
        .placeholder(placeholder)
        .valid(context)
}

/// Main help template with colorized Options header.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header_sync}
  {enqueue}     Queue a mutation for delivery
  {status}      Show link, queue, and cache state
  {sync}        Run a sync pass now
  {queue}       Inspect the mutation queue
  {cache}       Manage the offline work-order cache
  {net}         Drive the network link

{header_setup}
  {init}        Initialize the agent work directory
  {daemon}      Manage the background agent
  {completion}  Generate shell completions",
        header_sync = colors::header("Queue & Sync:"),
        header_setup = colors::header("Setup & Agent:"),
        enqueue = colors::literal("enqueue"),
        status = colors::literal("status"),
        sync = colors::literal("sync"),
        queue = colors::literal("queue"),
        cache = colors::literal("cache"),
        net = colors::literal("net"),
        init = colors::literal("init"),
        daemon = colors::literal("daemon"),
        completion = colors::literal("completion"),
    )
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  mule init                                  Initialize the agent
  mule enqueue photo wo-42 --data '{...}'    Queue a photo upload
  mule status                                Show queue and link state
  mule sync                                  Deliver queued mutations
  mule daemon start                          Run the agent in the background",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
