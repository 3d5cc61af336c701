// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ml_core::ItemStatus;

use crate::display;
use crate::error::{Error, Result};

pub fn list(failed: bool, json: bool) -> Result<()> {
    let (mut ctx, _config, _work_dir) = super::open_ctx()?;
    let items = if failed {
        ctx.queue().list_with_status(ItemStatus::Failed)?
    } else {
        ctx.queue().list()?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        if failed {
            println!("No failed items.");
        } else {
            println!("Queue is empty.");
        }
        return Ok(());
    }

    for item in &items {
        println!("{}", display::format_item_line(item));
    }
    Ok(())
}

pub fn show(id: &str, json: bool) -> Result<()> {
    let (mut ctx, _config, _work_dir) = super::open_ctx()?;
    let item = ctx.queue().get(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        println!("{}", display::format_item_details(&item));
    }
    Ok(())
}

pub fn rm(id: &str) -> Result<()> {
    let (mut ctx, _config, _work_dir) = super::open_ctx()?;
    if ctx.queue().remove(id)? {
        println!("Removed {}.", id);
        Ok(())
    } else {
        Err(Error::ItemNotFound(id.to_string()))
    }
}
