// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod cache;
mod common;
mod enqueue;
mod init;
mod queue;
mod status;
mod sync;
mod version;
