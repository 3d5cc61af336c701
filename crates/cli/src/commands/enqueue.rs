// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ml_core::{MutationKind, QueueItem};

use crate::error::Result;

pub fn run(
    kind: MutationKind,
    work_order_id: String,
    data: Option<String>,
    file: Option<String>,
) -> Result<()> {
    let payload = super::read_json_input(data.as_deref(), file.as_deref())?;
    let (config, work_dir) = super::load_workspace()?;

    // A running daemon owns the store and kicks off the drain itself.
    if let Some(mut client) = super::daemon_client(&work_dir, &config)? {
        let item = client.enqueue(kind, &work_order_id, payload)?;
        print_queued(&item);
        return Ok(());
    }

    let mut ctx = super::open_store(&work_dir, &config)?;
    let item = ctx.queue().enqueue(kind, &work_order_id, payload)?;
    print_queued(&item);
    Ok(())
}

fn print_queued(item: &QueueItem) {
    println!(
        "Queued {} ({}) for {}",
        item.id, item.kind, item.work_order_id
    );
}
