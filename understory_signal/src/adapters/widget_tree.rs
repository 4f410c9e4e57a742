// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Understory Widget Tree.
//!
//! ## Feature
//!
//! Enable with `widget_tree_adapter` (on by default).
//!
//! ## Notes
//!
//! [`Tree`] implements [`ParentLookup`], so it can be handed to the firers
//! directly. Executor flags stored on each widget answer the double-click
//! question for [`fire_button_click`](crate::click::fire_button_click).
//!
//! ```
//! use understory_signal::adapters::widget_tree::{remove_widget, wants_double_click};
//! use understory_signal::{click, kind};
//! use understory_signal::{MouseButton, Outcome, QueuePosition, SignalRegistry, UiEvent};
//! use understory_widget_tree::{ExecutorFlags, Tree};
//!
//! let mut tree = Tree::new();
//! let window = tree.insert(None, ExecutorFlags::WANTS_LEFT_DOUBLE_CLICK);
//! let button = tree.insert(Some(window), ExecutorFlags::empty());
//!
//! let registry = SignalRegistry::new();
//! registry.connect::<kind::General>(
//!     window,
//!     UiEvent::LeftButtonDoubleClick,
//!     QueuePosition::BackPostChild,
//!     |_, _| Outcome::Handled,
//! );
//!
//! assert!(click::fire_button_click(
//!     &registry,
//!     &tree,
//!     MouseButton::Left,
//!     wants_double_click(&tree),
//!     window,
//!     button,
//! ));
//!
//! assert_eq!(remove_widget(&mut tree, &registry, window), 1);
//! assert!(tree.is_empty());
//! ```

use understory_widget_tree::{ExecutorFlags, Tree, WidgetId};

use crate::event::MouseButton;
use crate::registry::SignalRegistry;
use crate::types::ParentLookup;

impl ParentLookup<WidgetId> for Tree {
    #[inline]
    fn parent_of(&self, node: &WidgetId) -> Option<WidgetId> {
        Tree::parent_of(self, *node)
    }
}

/// The executor flag recording a double-click preference for `button`.
#[must_use]
pub const fn double_click_flag(button: MouseButton) -> ExecutorFlags {
    match button {
        MouseButton::Left => ExecutorFlags::WANTS_LEFT_DOUBLE_CLICK,
        MouseButton::Middle => ExecutorFlags::WANTS_MIDDLE_DOUBLE_CLICK,
        MouseButton::Right => ExecutorFlags::WANTS_RIGHT_DOUBLE_CLICK,
    }
}

/// A double-click predicate reading each widget's executor flags.
///
/// Stale ids never want double clicks.
pub fn wants_double_click(tree: &Tree) -> impl Fn(WidgetId, MouseButton) -> bool + '_ {
    |widget, button| {
        tree.flags(widget)
            .is_some_and(|flags| flags.contains(double_click_flag(button)))
    }
}

/// Remove `id` and its subtree from `tree`, disconnecting every handler the
/// removed widgets had in `registry`.
///
/// Returns the number of handlers disconnected.
pub fn remove_widget(tree: &mut Tree, registry: &SignalRegistry<WidgetId>, id: WidgetId) -> usize {
    tree.remove(id)
        .iter()
        .map(|widget| registry.disconnect_widget(widget))
        .sum()
}
