// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signal registry: handlers per widget, per event, per phase.
//!
//! The registry holds one [`SignalQueue`] per [`QueueKind`]. Each queue maps a
//! `(widget, event)` pair to its three ordered handler lists.
//!
//! All methods take `&self`. Handlers may connect or disconnect other handlers
//! while an event is being fired: the firer copies a handler list out before
//! running it, so a change becomes visible from the next lookup on.
//!
//! ```
//! use understory_signal::kind;
//! use understory_signal::{Outcome, PhaseMask, QueuePosition, SignalRegistry, UiEvent};
//!
//! let registry: SignalRegistry<u32> = SignalRegistry::new();
//! let id = registry.connect::<kind::General>(
//!     7,
//!     UiEvent::LeftButtonClick,
//!     QueuePosition::BackPostChild,
//!     |_, _| Outcome::Handled,
//! );
//! assert!(registry.has_handler(&7, PhaseMask::POST, UiEvent::LeftButtonClick));
//! assert!(!registry.has_handler(&7, PhaseMask::PRE, UiEvent::LeftButtonClick));
//!
//! assert!(registry.disconnect::<kind::General>(7, UiEvent::LeftButtonClick, id));
//! assert!(!registry.has_handler(&7, PhaseMask::all(), UiEvent::LeftButtonClick));
//! ```

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;

use crate::event::{QueueKind, UiEvent};
use crate::kind::SignalKind;
use crate::payload;
use crate::signal::{Handler, HandlerId, QueuePosition, Signal};
use crate::types::{Outcome, Phase, PhaseMask, SignalArgs};

/// Handlers of one queue kind, keyed by `(widget, event)`.
pub struct SignalQueue<K, P> {
    signals: RefCell<HashMap<(K, UiEvent), Signal<K, P>>>,
}

impl<K, P> Default for SignalQueue<K, P> {
    fn default() -> Self {
        Self {
            signals: RefCell::new(HashMap::new()),
        }
    }
}

impl<K, P> fmt::Debug for SignalQueue<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signals = self.signals.try_borrow().map(|s| s.len()).ok();
        f.debug_struct("SignalQueue")
            .field("signals", &signals)
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash, P> SignalQueue<K, P> {
    /// Returns `true` if `widget` has a handler for `event` in any phase of `mask`.
    pub fn has_handlers(&self, widget: &K, event: UiEvent, mask: PhaseMask) -> bool {
        self.signals
            .borrow()
            .get(&(*widget, event))
            .is_some_and(|signal| !signal.is_empty(mask))
    }

    /// Number of handlers registered for `widget`/`event` in `phase`.
    pub fn handler_count(&self, widget: &K, event: UiEvent, phase: Phase) -> usize {
        self.signals
            .borrow()
            .get(&(*widget, event))
            .map_or(0, |signal| signal.len(phase))
    }

    /// Number of `(widget, event)` pairs with at least one handler.
    pub fn len(&self) -> usize {
        self.signals.borrow().len()
    }

    /// Returns `true` if no handler is registered at all.
    pub fn is_empty(&self) -> bool {
        self.signals.borrow().is_empty()
    }

    pub(crate) fn snapshot(
        &self,
        widget: &K,
        event: UiEvent,
        phase: Phase,
    ) -> SmallVec<[Handler<K, P>; 4]> {
        self.signals
            .borrow()
            .get(&(*widget, event))
            .map(|signal| signal.snapshot(phase))
            .unwrap_or_default()
    }

    fn insert(
        &self,
        widget: K,
        event: UiEvent,
        position: QueuePosition,
        id: HandlerId,
        handler: Handler<K, P>,
    ) {
        self.signals
            .borrow_mut()
            .entry((widget, event))
            .or_default()
            .insert(position, id, handler);
    }

    fn remove(&self, widget: K, event: UiEvent, id: HandlerId) -> bool {
        let mut signals = self.signals.borrow_mut();
        let Some(signal) = signals.get_mut(&(widget, event)) else {
            return false;
        };
        let removed = signal.remove(id);
        if signal.is_empty(PhaseMask::all()) {
            signals.remove(&(widget, event));
        }
        removed
    }

    fn remove_widget(&self, widget: &K) -> usize {
        let mut removed = 0;
        self.signals.borrow_mut().retain(|(owner, _), signal| {
            if owner != widget {
                return true;
            }
            removed += [Phase::PreChild, Phase::Child, Phase::PostChild]
                .into_iter()
                .map(|phase| signal.len(phase))
                .sum::<usize>();
            false
        });
        removed
    }
}

/// Queue operations that do not depend on the payload type.
trait ErasedQueue<K> {
    fn has_handlers(&self, widget: &K, event: UiEvent, mask: PhaseMask) -> bool;
    fn handler_count(&self, widget: &K, event: UiEvent, phase: Phase) -> usize;
    fn remove_widget(&self, widget: &K) -> usize;
}

impl<K: Copy + Eq + Hash, P> ErasedQueue<K> for SignalQueue<K, P> {
    fn has_handlers(&self, widget: &K, event: UiEvent, mask: PhaseMask) -> bool {
        Self::has_handlers(self, widget, event, mask)
    }

    fn handler_count(&self, widget: &K, event: UiEvent, phase: Phase) -> usize {
        Self::handler_count(self, widget, event, phase)
    }

    fn remove_widget(&self, widget: &K) -> usize {
        Self::remove_widget(self, widget)
    }
}

/// Handlers of every widget, one queue per [`QueueKind`].
///
/// A widget's handlers must be disconnected (see
/// [`SignalRegistry::disconnect_widget`]) before the widget is destroyed;
/// otherwise a reused key would inherit them.
#[derive(Debug)]
pub struct SignalRegistry<K> {
    next_id: Cell<u64>,
    pub(crate) general: SignalQueue<K, ()>,
    pub(crate) pointer: SignalQueue<K, Point>,
    pub(crate) keyboard: SignalQueue<K, payload::KeyInput>,
    pub(crate) touch_motion: SignalQueue<K, payload::TouchMotion>,
    pub(crate) touch_gesture: SignalQueue<K, payload::TouchGesture>,
    pub(crate) notification: SignalQueue<K, ()>,
    pub(crate) message: SignalQueue<K, payload::Message>,
    pub(crate) raw_input: SignalQueue<K, payload::RawEvent>,
    pub(crate) text_input: SignalQueue<K, payload::TextInput>,
}

impl<K> Default for SignalRegistry<K> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(1),
            general: SignalQueue::default(),
            pointer: SignalQueue::default(),
            keyboard: SignalQueue::default(),
            touch_motion: SignalQueue::default(),
            touch_gesture: SignalQueue::default(),
            notification: SignalQueue::default(),
            message: SignalQueue::default(),
            raw_input: SignalQueue::default(),
            text_input: SignalQueue::default(),
        }
    }
}

impl<K: Copy + Eq + Hash + fmt::Debug + 'static> SignalRegistry<K> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event` on `widget`.
    ///
    /// The position chooses the phase and whether the handler runs before or
    /// after the handlers already registered there.
    ///
    /// # Panics
    ///
    /// Panics if `event` does not belong to the queue kind of `S`.
    pub fn connect<S: SignalKind>(
        &self,
        widget: K,
        event: UiEvent,
        position: QueuePosition,
        handler: impl Fn(&SignalArgs<K>, &mut S::Payload) -> Outcome + 'static,
    ) -> HandlerId {
        assert_eq!(
            event.queue_kind(),
            S::QUEUE,
            "{event:?} cannot be connected as a {:?} signal",
            S::QUEUE
        );
        let id = HandlerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        S::queue(self).insert(widget, event, position, id, Rc::new(handler));
        tracing::debug!(?widget, ?event, ?position, ?id, "connected signal handler");
        id
    }

    /// Remove a handler previously returned by [`SignalRegistry::connect`].
    ///
    /// Returns `false` if no such handler is registered for `widget`/`event`.
    pub fn disconnect<S: SignalKind>(&self, widget: K, event: UiEvent, id: HandlerId) -> bool {
        let removed = S::queue(self).remove(widget, event, id);
        if removed {
            tracing::debug!(?widget, ?event, ?id, "disconnected signal handler");
        }
        removed
    }

    /// Remove every handler registered on `widget`, in every queue.
    ///
    /// Returns the number of handlers removed.
    pub fn disconnect_widget(&self, widget: &K) -> usize {
        let removed = QueueKind::ALL
            .into_iter()
            .map(|kind| self.erased(kind).remove_widget(widget))
            .sum::<usize>();
        if removed > 0 {
            tracing::debug!(?widget, removed, "disconnected widget handlers");
        }
        removed
    }

    /// Returns `true` if `widget` has a handler for `event` in any phase of `mask`.
    ///
    /// The event is classified into its queue kind first, so this works
    /// without naming a [`SignalKind`].
    pub fn has_handler(&self, widget: &K, mask: PhaseMask, event: UiEvent) -> bool {
        self.erased(event.queue_kind())
            .has_handlers(widget, event, mask)
    }

    /// Widget-side spelling of [`SignalRegistry::has_handler`].
    pub fn has_event(&self, widget: &K, event: UiEvent, mask: PhaseMask) -> bool {
        self.has_handler(widget, mask, event)
    }

    /// Number of handlers `widget` has for `event` in `phase`.
    pub fn handler_count(&self, widget: &K, event: UiEvent, phase: Phase) -> usize {
        self.erased(event.queue_kind())
            .handler_count(widget, event, phase)
    }

    fn erased(&self, kind: QueueKind) -> &dyn ErasedQueue<K> {
        match kind {
            QueueKind::General => &self.general,
            QueueKind::Pointer => &self.pointer,
            QueueKind::Keyboard => &self.keyboard,
            QueueKind::TouchMotion => &self.touch_motion,
            QueueKind::TouchGesture => &self.touch_gesture,
            QueueKind::Notification => &self.notification,
            QueueKind::Message => &self.message,
            QueueKind::RawInput => &self.raw_input,
            QueueKind::TextInput => &self.text_input,
        }
    }
}
