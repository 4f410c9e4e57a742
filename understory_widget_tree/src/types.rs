// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the widget tree: widget identifiers and executor flags.

/// Identifier for a widget in the tree.
///
/// This is a small, copyable handle that stays stable for the lifetime of the
/// widget but becomes invalid once the widget is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `WidgetId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `WidgetId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `WidgetId` still refers to a live widget.
/// Stale ids never alias a different live widget because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WidgetId(pub(crate) u32, pub(crate) u32);

impl WidgetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Returns the slot index of this id.
    ///
    /// Slot indices are reused after removal; pair with [`WidgetId::generation`]
    /// when a unique key is needed outside the tree.
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// Returns the generation of this id.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Per-widget preferences consulted while resolving clicks.
    ///
    /// A widget that sets `WANTS_LEFT_DOUBLE_CLICK` receives the left
    /// double-click event in place of the plain left click when the
    /// click/double-click resolver walks through it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ExecutorFlags: u8 {
        /// Prefer the left button double-click event.
        const WANTS_LEFT_DOUBLE_CLICK   = 0b0000_0001;
        /// Prefer the middle button double-click event.
        const WANTS_MIDDLE_DOUBLE_CLICK = 0b0000_0010;
        /// Prefer the right button double-click event.
        const WANTS_RIGHT_DOUBLE_CLICK  = 0b0000_0100;
    }
}
