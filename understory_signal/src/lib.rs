// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_signal --heading-base-level=0

//! Understory Signal: three-phase event dispatch over a widget tree.
//!
//! ## Overview
//!
//! Widgets register handlers for the events they care about in a
//! [`SignalRegistry`]. When an event is fired at a target widget through a
//! dispatcher (usually the window), the firer:
//!
//! 1. builds an [`EventChain`] of the widgets between target and dispatcher
//!    that have pre-child or post-child handlers for the event,
//! 2. runs pre-child handlers from the outermost widget inward,
//! 3. runs the target's child handlers,
//! 4. runs post-child handlers from the target outward,
//!
//! and stops as soon as one widget's phase reports the event as handled.
//!
//! ## Signal kinds
//!
//! Every [`UiEvent`] belongs to exactly one [`QueueKind`], and every queue kind
//! has a marker type in [`kind`] fixing the payload its handlers receive.
//! Connecting or firing an event through the wrong kind is a contract
//! violation.
//!
//! Most kinds bubble. Two do not:
//!
//! - Notifications only reach the receiver's child phase.
//! - Messages are sent by a widget about itself and travel to its ancestors,
//!   root first.
//!
//! ## Click or double-click
//!
//! [`click`] resolves a platform click per tree level: each ancestor says
//! whether it wants the double-click variant, so a list can react to double
//! clicks while the buttons inside it still see plain clicks.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use hashbrown::HashMap;
//! use understory_signal::{dispatcher, kind};
//! use understory_signal::{Outcome, QueuePosition, SignalRegistry, UiEvent};
//!
//! // button (3) → panel (2) → window (1)
//! let tree: HashMap<u32, u32> = [(3, 2), (2, 1)].into_iter().collect();
//! let registry: SignalRegistry<u32> = SignalRegistry::new();
//!
//! let entered = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&entered);
//! registry.connect::<kind::General>(3, UiEvent::MouseEnter, QueuePosition::BackChild, move |_, _| {
//!     flag.set(true);
//!     Outcome::Handled
//! });
//!
//! assert!(dispatcher::fire::<kind::General, _, _>(
//!     &registry,
//!     &tree,
//!     UiEvent::MouseEnter,
//!     1,
//!     3,
//!     &mut (),
//! ));
//! assert!(entered.get());
//! ```
//!
//! ## Adapters
//!
//! The [`adapters`] module integrates with other Understory crates:
//!
//! - **Widget Tree Adapter** (`widget_tree_adapter` feature): parent lookups,
//!   double-click preferences and handler cleanup for `understory_widget_tree`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod chain;
pub mod click;
pub mod dispatcher;
pub mod event;
pub mod kind;
pub mod payload;
pub mod registry;
pub mod signal;
pub mod types;

pub use chain::{ChainEntry, ChainError, ChainStrategy, EventChain};
pub use event::{MouseButton, QueueKind, UiEvent};
pub use registry::{SignalQueue, SignalRegistry};
pub use signal::{Handler, HandlerId, QueuePosition};
pub use types::{Outcome, ParentLookup, Phase, PhaseMask, SignalArgs};
