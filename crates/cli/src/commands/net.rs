// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::{Error, Result};

/// Flip the daemon's link state. The link lives in the daemon process,
/// so this command has no direct-store fallback.
pub fn run(online: bool) -> Result<()> {
    let (config, work_dir) = super::load_workspace()?;
    let Some(mut client) = super::daemon_client(&work_dir, &config)? else {
        return Err(Error::DaemonNotRunning);
    };

    let changed = client.set_link(online)?;
    match (online, changed) {
        (true, true) => println!("Link is up."),
        (true, false) => println!("Link is already up."),
        (false, true) => println!("Link is down."),
        (false, false) => println!("Link is already down."),
    }
    Ok(())
}
