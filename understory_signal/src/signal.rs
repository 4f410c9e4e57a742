// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A signal: the three ordered handler lists of one (widget, event) pair.

use alloc::rc::Rc;

use smallvec::SmallVec;

use crate::types::{Outcome, Phase, PhaseMask, SignalArgs};

/// A registered handler.
///
/// Handlers are shared (`Rc`) so the firer can snapshot a handler list and
/// release the registry before invoking anything. State a handler mutates
/// lives outside of it, typically behind a `Cell` or `RefCell` it captures.
pub type Handler<K, P> = Rc<dyn Fn(&SignalArgs<K>, &mut P) -> Outcome>;

/// Token returned by [`SignalRegistry::connect`](crate::SignalRegistry::connect),
/// used to disconnect the handler again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub(crate) u64);

/// Where to insert a handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum QueuePosition {
    /// Run before the existing pre-child handlers.
    FrontPreChild,
    /// Run after the existing pre-child handlers.
    BackPreChild,
    /// Run before the existing child handlers.
    FrontChild,
    /// Run after the existing child handlers.
    #[default]
    BackChild,
    /// Run before the existing post-child handlers.
    FrontPostChild,
    /// Run after the existing post-child handlers.
    BackPostChild,
}

impl QueuePosition {
    /// The phase this position inserts into.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            Self::FrontPreChild | Self::BackPreChild => Phase::PreChild,
            Self::FrontChild | Self::BackChild => Phase::Child,
            Self::FrontPostChild | Self::BackPostChild => Phase::PostChild,
        }
    }

    const fn at_front(self) -> bool {
        matches!(
            self,
            Self::FrontPreChild | Self::FrontChild | Self::FrontPostChild
        )
    }
}

pub(crate) struct Slot<K, P> {
    id: HandlerId,
    handler: Handler<K, P>,
}

/// Ordered handler lists of one (widget, event) pair.
pub(crate) struct Signal<K, P> {
    pre_child: SmallVec<[Slot<K, P>; 2]>,
    child: SmallVec<[Slot<K, P>; 2]>,
    post_child: SmallVec<[Slot<K, P>; 2]>,
}

impl<K, P> Default for Signal<K, P> {
    fn default() -> Self {
        Self {
            pre_child: SmallVec::new(),
            child: SmallVec::new(),
            post_child: SmallVec::new(),
        }
    }
}

impl<K, P> Signal<K, P> {
    fn list(&self, phase: Phase) -> &SmallVec<[Slot<K, P>; 2]> {
        match phase {
            Phase::PreChild => &self.pre_child,
            Phase::Child => &self.child,
            Phase::PostChild => &self.post_child,
        }
    }

    fn list_mut(&mut self, phase: Phase) -> &mut SmallVec<[Slot<K, P>; 2]> {
        match phase {
            Phase::PreChild => &mut self.pre_child,
            Phase::Child => &mut self.child,
            Phase::PostChild => &mut self.post_child,
        }
    }

    /// Returns `true` if every phase selected by `mask` has no handlers.
    pub(crate) fn is_empty(&self, mask: PhaseMask) -> bool {
        [Phase::PreChild, Phase::Child, Phase::PostChild]
            .into_iter()
            .filter(|phase| mask.contains(phase.mask()))
            .all(|phase| self.list(phase).is_empty())
    }

    pub(crate) fn len(&self, phase: Phase) -> usize {
        self.list(phase).len()
    }

    pub(crate) fn insert(
        &mut self,
        position: QueuePosition,
        id: HandlerId,
        handler: Handler<K, P>,
    ) {
        let list = self.list_mut(position.phase());
        let slot = Slot { id, handler };
        if position.at_front() {
            list.insert(0, slot);
        } else {
            list.push(slot);
        }
    }

    /// Remove the handler with `id` from whichever phase holds it.
    pub(crate) fn remove(&mut self, id: HandlerId) -> bool {
        for phase in [Phase::PreChild, Phase::Child, Phase::PostChild] {
            let list = self.list_mut(phase);
            if let Some(pos) = list.iter().position(|slot| slot.id == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Copy out the handlers of one phase, in invocation order.
    pub(crate) fn snapshot(&self, phase: Phase) -> SmallVec<[Handler<K, P>; 4]> {
        self.list(phase)
            .iter()
            .map(|slot| Rc::clone(&slot.handler))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::UiEvent;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn tagging(log: &Rc<RefCell<Vec<u32>>>, tag: u32) -> Handler<u32, ()> {
        let log = Rc::clone(log);
        Rc::new(move |_: &SignalArgs<u32>, _: &mut ()| {
            log.borrow_mut().push(tag);
            Outcome::Continue
        })
    }

    fn run(signal: &Signal<u32, ()>, phase: Phase) {
        let args = SignalArgs {
            dispatcher: 0,
            current: 0,
            target: 0,
            event: UiEvent::Draw,
            phase,
        };
        for handler in signal.snapshot(phase) {
            handler(&args, &mut ());
        }
    }

    #[test]
    fn front_and_back_positions_order_handlers() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::default();
        signal.insert(QueuePosition::BackPostChild, HandlerId(1), tagging(&log, 1));
        signal.insert(QueuePosition::BackPostChild, HandlerId(2), tagging(&log, 2));
        signal.insert(QueuePosition::FrontPostChild, HandlerId(3), tagging(&log, 3));
        run(&signal, Phase::PostChild);
        assert_eq!(*log.borrow(), [3, 1, 2]);
        assert_eq!(signal.len(Phase::PostChild), 3);
    }

    #[test]
    fn emptiness_respects_the_mask() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::default();
        assert!(signal.is_empty(PhaseMask::all()));
        signal.insert(QueuePosition::BackChild, HandlerId(1), tagging(&log, 1));
        assert!(signal.is_empty(PhaseMask::CHAIN));
        assert!(!signal.is_empty(PhaseMask::CHILD));
        assert!(!signal.is_empty(PhaseMask::all()));
    }

    #[test]
    fn remove_finds_handler_in_any_phase() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut signal = Signal::default();
        signal.insert(QueuePosition::BackPreChild, HandlerId(1), tagging(&log, 1));
        signal.insert(QueuePosition::BackPostChild, HandlerId(2), tagging(&log, 2));
        assert!(signal.remove(HandlerId(2)));
        assert!(!signal.remove(HandlerId(2)));
        assert!(signal.is_empty(PhaseMask::POST));
        assert!(!signal.is_empty(PhaseMask::PRE));
    }
}
