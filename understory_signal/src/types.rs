// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types shared by the registry, the chain builders and the firer.

use core::hash::{BuildHasher, Hash};

use hashbrown::HashMap;

use crate::event::UiEvent;

/// Dispatch phase of a handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Runs on the event chain from the outermost widget inwards, before the target.
    PreChild,
    /// Runs on the target widget only.
    Child,
    /// Runs on the event chain from the innermost widget outwards, after the target.
    PostChild,
}

impl Phase {
    /// The single-phase mask for this phase.
    #[must_use]
    pub const fn mask(self) -> PhaseMask {
        match self {
            Self::PreChild => PhaseMask::PRE,
            Self::Child => PhaseMask::CHILD,
            Self::PostChild => PhaseMask::POST,
        }
    }
}

bitflags::bitflags! {
    /// Set of phases used when asking whether handlers are registered.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PhaseMask: u8 {
        /// Pre-child handlers.
        const PRE   = 0b001;
        /// Child handlers.
        const CHILD = 0b010;
        /// Post-child handlers.
        const POST  = 0b100;
        /// The phases that make a widget part of an event chain.
        const CHAIN = Self::PRE.bits() | Self::POST.bits();
    }
}

/// What a handler did with an event.
///
/// Handlers return this instead of writing shared flags. Halting always
/// implies handling, so a halted but unhandled event cannot be expressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// The event was not handled; keep going.
    #[default]
    Continue,
    /// The event was handled. Remaining handlers of the same widget and phase
    /// still run, then dispatch stops.
    Handled,
    /// The event was handled and no further handler of the same widget and
    /// phase may run. Dispatch stops.
    Halt,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Handled`] and [`Outcome::Halt`].
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled | Self::Halt)
    }
}

/// Context passed to every handler invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SignalArgs<K> {
    /// The widget the event was fired through.
    pub dispatcher: K,
    /// The widget the running handler is registered on.
    pub current: K,
    /// The widget the event was fired at.
    pub target: K,
    /// The event id as seen by this handler.
    ///
    /// For click/double-click resolution this can differ between chain entries.
    pub event: UiEvent,
    /// The phase the handler runs in.
    pub phase: Phase,
}

/// Parent lookup used by the chain builders.
///
/// Implement this for whatever owns your widget hierarchy. Roots return `None`.
pub trait ParentLookup<K> {
    /// Return the parent of `node`, if any.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A plain child → parent map.
impl<K, S> ParentLookup<K> for HashMap<K, K, S>
where
    K: Copy + Eq + Hash,
    S: BuildHasher,
{
    fn parent_of(&self, node: &K) -> Option<K> {
        self.get(node).copied()
    }
}
