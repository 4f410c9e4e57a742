// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters for other Understory crates.

#[cfg(feature = "widget_tree_adapter")]
pub mod widget_tree;
