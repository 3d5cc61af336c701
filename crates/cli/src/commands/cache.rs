// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ml_core::WorkOrder;

use crate::display;
use crate::error::{Error, Result};

pub fn add(data: Option<String>, file: Option<String>) -> Result<()> {
    let snapshot = super::read_json_input(data.as_deref(), file.as_deref())?;
    let work_order = work_order_from_value(snapshot)?;
    let (config, work_dir) = super::load_workspace()?;

    if let Some(mut client) = super::daemon_client(&work_dir, &config)? {
        let expires_at = client.cache_work_order(&work_order)?;
        println!(
            "Cached {} (expires {})",
            work_order.id,
            display::format_timestamp(&expires_at)
        );
        return Ok(());
    }

    let mut ctx = super::open_store(&work_dir, &config)?;
    let entry = ctx.cache().put(&work_order)?;
    println!(
        "Cached {} (expires {})",
        entry.work_order.id,
        display::format_timestamp(&entry.expires_at)
    );
    Ok(())
}

pub fn show(id: &str, json: bool) -> Result<()> {
    let (config, work_dir) = super::load_workspace()?;

    let work_order = if let Some(mut client) = super::daemon_client(&work_dir, &config)? {
        client.cached_work_order(id)?
    } else {
        let mut ctx = super::open_store(&work_dir, &config)?;
        ctx.cache().get(id)?
    };

    let Some(work_order) = work_order else {
        return Err(Error::WorkOrderNotCached(id.to_string()));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&work_order)?);
    } else {
        println!("{}", display::format_work_order(&work_order));
    }
    Ok(())
}

pub fn has(id: &str) -> Result<()> {
    let (config, work_dir) = super::load_workspace()?;

    let cached = if let Some(mut client) = super::daemon_client(&work_dir, &config)? {
        client.is_cached(id)?
    } else {
        let mut ctx = super::open_store(&work_dir, &config)?;
        ctx.cache().contains(id)?
    };

    println!("{}", if cached { "yes" } else { "no" });
    Ok(())
}

pub fn list(json: bool) -> Result<()> {
    let (mut ctx, _config, _work_dir) = super::open_ctx()?;
    let entries = ctx.cache().entries()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Cache is empty.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", display::format_cache_line(entry));
    }
    Ok(())
}

pub fn sweep() -> Result<()> {
    let (config, work_dir) = super::load_workspace()?;

    let evicted = if let Some(mut client) = super::daemon_client(&work_dir, &config)? {
        client.sweep_cache()?
    } else {
        let mut ctx = super::open_store(&work_dir, &config)?;
        ctx.cache().evict_expired()? as u64
    };

    println!("Evicted {} expired entries.", evicted);
    Ok(())
}

pub fn rm(id: &str) -> Result<()> {
    let (mut ctx, _config, _work_dir) = super::open_ctx()?;
    if ctx.cache().remove(id)? {
        println!("Removed {} from cache.", id);
        Ok(())
    } else {
        Err(Error::WorkOrderNotCached(id.to_string()))
    }
}

/// Parse a work-order snapshot, insisting on an `id` field.
fn work_order_from_value(value: serde_json::Value) -> Result<WorkOrder> {
    if !value.is_object() {
        return Err(Error::InvalidInput(
            "work-order snapshot must be a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|_| {
        Error::InvalidInput("work-order snapshot needs a string \"id\" field".to_string())
    })
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
