// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_widget_tree --heading-base-level=0

//! Understory Widget Tree: an arena of widgets linked by generational handles.
//!
//! The widget tree is the structural half of event routing.
//! It records which widget contains which, and nothing else: no geometry, no
//! rendering state and no handlers. Routing layers such as `understory_signal`
//! only ever ask it one question, "who is the parent of this widget?".
//!
//! ## Ownership
//!
//! - [`Tree`] exclusively owns its widgets.
//! - Parent and child links are [`WidgetId`] handles, never references.
//! - Removing a widget frees its whole subtree; the returned ids let callers
//!   deregister anything keyed by those widgets before the ids go stale.
//!
//! ## Example
//!
//! ```
//! use understory_widget_tree::{ExecutorFlags, Tree};
//!
//! let mut tree = Tree::new();
//! let window = tree.insert(None, ExecutorFlags::empty());
//! let panel = tree.insert(Some(window), ExecutorFlags::empty());
//! let list = tree.insert(Some(panel), ExecutorFlags::WANTS_LEFT_DOUBLE_CLICK);
//!
//! assert_eq!(tree.parent_of(list), Some(panel));
//! assert_eq!(tree.ancestors(list).collect::<Vec<_>>(), vec![panel, window]);
//!
//! let removed = tree.remove(panel);
//! assert_eq!(removed, vec![list, panel]);
//! assert!(!tree.is_alive(list));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Ancestors, Tree};
pub use types::{ExecutorFlags, WidgetId};
