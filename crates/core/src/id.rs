// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::mutation::MutationKind;

/// Prefix shared by all queue item identifiers.
pub const ITEM_ID_PREFIX: &str = "mu";

/// Generate a queue item ID from kind, work order, and timestamp.
/// Format: mu-{hash} where hash is first 8 hex chars of SHA256(kind + work_order_id + timestamp)
pub fn generate_item_id(
    kind: MutationKind,
    work_order_id: &str,
    enqueued_at: &DateTime<Utc>,
) -> String {
    let input = format!("{}{}{}", kind.as_str(), work_order_id, enqueued_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]); // First 8 hex chars (4 bytes)
    format!("{}-{}", ITEM_ID_PREFIX, short_hash)
}

/// Generate a unique item ID, handling collisions by appending incrementing suffix.
pub fn generate_unique_item_id<F>(
    kind: MutationKind,
    work_order_id: &str,
    enqueued_at: &DateTime<Utc>,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let base_id = generate_item_id(kind, work_order_id, enqueued_at);

    if !exists(&base_id) {
        return base_id;
    }

    // Handle collision with incrementing suffix
    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
