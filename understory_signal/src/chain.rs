// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event chain builders.
//!
//! An event chain lists the widgets, besides the target's own child phase,
//! that get a chance to handle an event: every entry has at least one pre-child
//! or post-child handler for its event. Chains are built fresh for every fire
//! and never cached.
//!
//! Given this hierarchy, with every widget holding handlers:
//!
//! ```text
//! window
//! └── dispatcher
//!     └── container 1
//!         └── container 2
//!             └── widget
//! ```
//!
//! - [`ChainStrategy::Bubble`] with `dispatcher` as dispatcher and `widget` as target
//!   yields `widget, container 2, container 1, dispatcher`.
//! - [`ChainStrategy::Notification`] always yields an empty chain.
//! - [`ChainStrategy::Message`] fired by `widget` about itself
//!   yields `window, dispatcher, container 1, container 2`.
//!
//! The firer runs pre-child handlers over the chain back to front, then the
//! target's child handlers, then post-child handlers front to back.

use core::fmt;
use core::hash::Hash;

use smallvec::SmallVec;

use crate::event::{QueueKind, UiEvent};
use crate::registry::SignalRegistry;
use crate::types::{ParentLookup, PhaseMask};

/// How an event chain is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChainStrategy {
    /// Walk from the target up to and including the dispatcher; nearest first.
    Bubble,
    /// No chain: only the receiver's child phase runs.
    Notification,
    /// Walk the target's strict ancestors up to the root; root first.
    Message,
}

/// One widget of an event chain and the event id it receives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChainEntry<K> {
    /// The widget whose pre-child and post-child handlers run.
    pub widget: K,
    /// The event id looked up for this widget.
    pub event: UiEvent,
}

/// Ordered list of widgets with pre-child or post-child handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventChain<K> {
    entries: SmallVec<[ChainEntry<K>; 8]>,
}

impl<K> Default for EventChain<K> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<K: Copy> EventChain<K> {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, widget: K, event: UiEvent) {
        self.entries.push(ChainEntry { widget, event });
    }

    /// The entries in construction order.
    pub fn entries(&self) -> &[ChainEntry<K>] {
        &self.entries
    }

    /// Iterate the widgets in construction order.
    pub fn widgets(&self) -> impl DoubleEndedIterator<Item = K> + '_ {
        self.entries.iter().map(|entry| entry.widget)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the chain has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A violated dispatch precondition.
///
/// These are programming errors in the caller, never a normal outcome:
/// an event nobody handles is reported as `false`, not as an error.
#[derive(Clone, PartialEq, Eq)]
pub enum ChainError<K> {
    /// The dispatcher is not reachable from the target by parent links.
    DispatcherNotAncestor {
        /// The dispatcher passed in.
        dispatcher: K,
        /// The target passed in.
        target: K,
    },
    /// A notification target has pre-child or post-child handlers, which
    /// notifications never run.
    NotificationHasChainHandlers {
        /// The receiver of the notification.
        target: K,
        /// The notification event.
        event: UiEvent,
    },
    /// A message was fired with a dispatcher other than its sender.
    MessageSenderMismatch {
        /// The dispatcher passed in.
        dispatcher: K,
        /// The target (sender) passed in.
        target: K,
    },
    /// The event does not belong to the queue kind being fired.
    WrongQueue {
        /// The event fired.
        event: UiEvent,
        /// The queue kind of the signal kind being fired.
        expected: QueueKind,
    },
}

impl<K: fmt::Debug> fmt::Debug for ChainError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DispatcherNotAncestor { dispatcher, target } => f
                .debug_struct("DispatcherNotAncestor")
                .field("dispatcher", dispatcher)
                .field("target", target)
                .finish(),
            Self::NotificationHasChainHandlers { target, event } => f
                .debug_struct("NotificationHasChainHandlers")
                .field("target", target)
                .field("event", event)
                .finish(),
            Self::MessageSenderMismatch { dispatcher, target } => f
                .debug_struct("MessageSenderMismatch")
                .field("dispatcher", dispatcher)
                .field("target", target)
                .finish(),
            Self::WrongQueue { event, expected } => f
                .debug_struct("WrongQueue")
                .field("event", event)
                .field("expected", expected)
                .finish(),
        }
    }
}

impl<K: fmt::Debug> fmt::Display for ChainError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DispatcherNotAncestor { dispatcher, target } => write!(
                f,
                "dispatcher {dispatcher:?} is not an ancestor of target {target:?}"
            ),
            Self::NotificationHasChainHandlers { target, event } => write!(
                f,
                "notification target {target:?} has pre/post handlers for {event:?}"
            ),
            Self::MessageSenderMismatch { dispatcher, target } => write!(
                f,
                "message sender {target:?} differs from dispatcher {dispatcher:?}"
            ),
            Self::WrongQueue { event, expected } => write!(
                f,
                "{event:?} belongs to {:?}, not {expected:?}",
                event.queue_kind()
            ),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for ChainError<K> {}

/// Build the chain for `event` using `strategy`.
pub fn build_chain<K, T>(
    strategy: ChainStrategy,
    registry: &SignalRegistry<K>,
    tree: &T,
    event: UiEvent,
    dispatcher: K,
    target: K,
) -> Result<EventChain<K>, ChainError<K>>
where
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    T: ParentLookup<K> + ?Sized,
{
    match strategy {
        ChainStrategy::Bubble => build_bubble_chain(registry, tree, event, dispatcher, target),
        ChainStrategy::Notification => build_notification_chain(registry, event, target),
        ChainStrategy::Message => build_message_chain(registry, tree, event, dispatcher, target),
    }
}

/// Walk from `target` up to and including `dispatcher`, keeping widgets with
/// pre-child or post-child handlers for `event`.
///
/// The result is ordered nearest-to-target first, dispatcher last. When
/// `target == dispatcher` the chain holds at most the target itself.
pub fn build_bubble_chain<K, T>(
    registry: &SignalRegistry<K>,
    tree: &T,
    event: UiEvent,
    dispatcher: K,
    target: K,
) -> Result<EventChain<K>, ChainError<K>>
where
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    T: ParentLookup<K> + ?Sized,
{
    let mut chain = EventChain::new();
    let mut widget = target;
    loop {
        if registry.has_event(&widget, event, PhaseMask::CHAIN) {
            chain.push(widget, event);
        }
        if widget == dispatcher {
            return Ok(chain);
        }
        widget = tree
            .parent_of(&widget)
            .ok_or(ChainError::DispatcherNotAncestor { dispatcher, target })?;
    }
}

/// Notifications have no chain; only the receiver's child phase runs.
///
/// Fails if `target` has pre-child or post-child handlers for `event`,
/// since those would silently never run.
pub fn build_notification_chain<K>(
    registry: &SignalRegistry<K>,
    event: UiEvent,
    target: K,
) -> Result<EventChain<K>, ChainError<K>>
where
    K: Copy + Eq + Hash + fmt::Debug + 'static,
{
    if registry.has_event(&target, event, PhaseMask::CHAIN) {
        return Err(ChainError::NotificationHasChainHandlers { target, event });
    }
    Ok(EventChain::new())
}

/// Walk the strict ancestors of a message sender up to the root, keeping
/// widgets with pre-child or post-child handlers for `event`.
///
/// The sender is also the dispatcher and is never part of its own chain.
/// The result is ordered root first, nearest ancestor last.
pub fn build_message_chain<K, T>(
    registry: &SignalRegistry<K>,
    tree: &T,
    event: UiEvent,
    dispatcher: K,
    target: K,
) -> Result<EventChain<K>, ChainError<K>>
where
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    T: ParentLookup<K> + ?Sized,
{
    if dispatcher != target {
        return Err(ChainError::MessageSenderMismatch { dispatcher, target });
    }
    let mut chain = EventChain::new();
    let mut widget = target;
    while let Some(parent) = tree.parent_of(&widget) {
        if registry.has_event(&parent, event, PhaseMask::CHAIN) {
            chain.push(parent, event);
        }
        widget = parent;
    }
    chain.entries.reverse();
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind;
    use crate::signal::QueuePosition;
    use crate::types::{Outcome, SignalArgs};
    use alloc::vec::Vec;
    use hashbrown::HashMap;

    // 5 → 4 → 3 → 2 → 1 (root)
    fn line() -> HashMap<u32, u32> {
        [(5, 4), (4, 3), (3, 2), (2, 1)].into_iter().collect()
    }

    fn noop<P>(_: &SignalArgs<u32>, _: &mut P) -> Outcome {
        Outcome::Continue
    }

    fn post(registry: &SignalRegistry<u32>, widget: u32, event: UiEvent) {
        match event.queue_kind() {
            QueueKind::Message => {
                registry.connect::<kind::Message>(
                    widget,
                    event,
                    QueuePosition::BackPostChild,
                    noop,
                );
            }
            _ => {
                registry.connect::<kind::General>(
                    widget,
                    event,
                    QueuePosition::BackPostChild,
                    noop,
                );
            }
        }
    }

    #[test]
    fn bubble_includes_target_and_dispatcher_nearest_first() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        for w in [5, 4, 3, 2, 1] {
            post(&registry, w, UiEvent::Draw);
        }
        let chain = build_bubble_chain(&registry, &line(), UiEvent::Draw, 2, 5).unwrap();
        assert_eq!(chain.widgets().collect::<Vec<_>>(), [5, 4, 3, 2]);
    }

    #[test]
    fn bubble_skips_widgets_without_chain_handlers() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        post(&registry, 4, UiEvent::Draw);
        registry.connect::<kind::General>(3, UiEvent::Draw, QueuePosition::BackChild, noop);
        post(&registry, 1, UiEvent::Draw);
        let chain = build_bubble_chain(&registry, &line(), UiEvent::Draw, 1, 5).unwrap();
        assert_eq!(chain.widgets().collect::<Vec<_>>(), [4, 1]);
    }

    #[test]
    fn bubble_with_target_as_dispatcher() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        post(&registry, 5, UiEvent::Draw);
        post(&registry, 4, UiEvent::Draw);
        let chain = build_bubble_chain(&registry, &line(), UiEvent::Draw, 5, 5).unwrap();
        assert_eq!(chain.widgets().collect::<Vec<_>>(), [5]);
    }

    #[test]
    fn bubble_reports_unreachable_dispatcher() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        let err = build_bubble_chain(&registry, &line(), UiEvent::Draw, 9, 5).unwrap_err();
        assert_eq!(
            err,
            ChainError::DispatcherNotAncestor {
                dispatcher: 9,
                target: 5
            }
        );
    }

    #[test]
    fn notification_chain_is_empty() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        registry.connect::<kind::Notification>(
            5,
            UiEvent::NotifyModified,
            QueuePosition::BackChild,
            noop,
        );
        let chain = build_chain(
            ChainStrategy::Notification,
            &registry,
            &line(),
            UiEvent::NotifyModified,
            5,
            5,
        )
        .unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn notification_rejects_chain_handlers_on_target() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        registry.connect::<kind::Notification>(
            5,
            UiEvent::NotifyModified,
            QueuePosition::BackPreChild,
            noop,
        );
        let err = build_notification_chain(&registry, UiEvent::NotifyModified, 5).unwrap_err();
        assert!(matches!(
            err,
            ChainError::NotificationHasChainHandlers { target: 5, .. }
        ));
    }

    #[test]
    fn message_chain_is_root_first_and_excludes_sender() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        for w in [5, 4, 2, 1] {
            post(&registry, w, UiEvent::RequestPlacement);
        }
        let chain =
            build_message_chain(&registry, &line(), UiEvent::RequestPlacement, 5, 5).unwrap();
        assert_eq!(chain.widgets().collect::<Vec<_>>(), [1, 2, 4]);
    }

    #[test]
    fn message_requires_sender_as_dispatcher() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        let err =
            build_message_chain(&registry, &line(), UiEvent::RequestPlacement, 1, 5).unwrap_err();
        assert_eq!(
            err,
            ChainError::MessageSenderMismatch {
                dispatcher: 1,
                target: 5
            }
        );
    }

    #[test]
    fn errors_display_the_violation() {
        let err: ChainError<u32> = ChainError::WrongQueue {
            event: UiEvent::Draw,
            expected: QueueKind::Pointer,
        };
        assert_eq!(alloc::format!("{err}"), "Draw belongs to General, not Pointer");
    }
}
