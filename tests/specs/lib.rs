// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end specs for the mule CLI.
//!
//! These tests run the built `mule` binary against throwaway workspaces.
//! Specs that manage a live daemon are wired as separate test targets in
//! the CLI crate so they can run with their own process lifecycle.

#[cfg(test)]
mod cli;
