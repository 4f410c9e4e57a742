// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click or double-click: each tree level picks its own variant.
//!
//! Some widgets want a second click to arrive as a double click, others want
//! two plain clicks. When the platform reports a click that could be either,
//! every ancestor between the target and the dispatcher is asked through a
//! predicate which of the two ids it listens to, and the chain is built from
//! the answers. The target's own answer decides the id of the child phase.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use hashbrown::HashMap;
//! use understory_signal::{click, kind};
//! use understory_signal::{Outcome, QueuePosition, SignalRegistry, UiEvent};
//!
//! // 3 → 2 → 1 (root); widget 2 wants double clicks.
//! let tree: HashMap<u32, u32> = [(3, 2), (2, 1)].into_iter().collect();
//! let registry: SignalRegistry<u32> = SignalRegistry::new();
//! let hits = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&hits);
//! registry.connect::<kind::General>(
//!     2,
//!     UiEvent::LeftButtonDoubleClick,
//!     QueuePosition::BackPostChild,
//!     move |_, _| {
//!         counter.set(counter.get() + 1);
//!         Outcome::Handled
//!     },
//! );
//!
//! let handled = click::fire_click_or_double_click::<kind::General, _, _>(
//!     &registry,
//!     &tree,
//!     UiEvent::LeftButtonClick,
//!     UiEvent::LeftButtonDoubleClick,
//!     |widget| widget == 2,
//!     1,
//!     3,
//!     &mut (),
//! );
//! assert!(handled);
//! assert_eq!(hits.get(), 1);
//! ```

use core::fmt;
use core::hash::Hash;

use crate::chain::{ChainError, EventChain};
use crate::dispatcher::{check_queue, contract_violation, fire_chain};
use crate::event::{MouseButton, UiEvent};
use crate::kind::{self, SignalKind};
use crate::registry::SignalRegistry;
use crate::types::{ParentLookup, PhaseMask};

/// Build the chain for a click that may resolve to a double click.
///
/// Walks the strict ancestors of `target` up to and including `dispatcher`.
/// Each ancestor for which `wants_double_click` holds is entered with
/// `double_click` if it has pre-child or post-child handlers for it; every
/// other ancestor is entered with `click` under the same condition. The
/// target itself is never part of the chain.
pub fn build_click_chain<K, T>(
    registry: &SignalRegistry<K>,
    tree: &T,
    click: UiEvent,
    double_click: UiEvent,
    wants_double_click: impl Fn(K) -> bool,
    dispatcher: K,
    target: K,
) -> Result<EventChain<K>, ChainError<K>>
where
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    T: ParentLookup<K> + ?Sized,
{
    let mut chain = EventChain::new();
    let mut widget = target;
    while widget != dispatcher {
        widget = tree
            .parent_of(&widget)
            .ok_or(ChainError::DispatcherNotAncestor { dispatcher, target })?;
        let event = if wants_double_click(widget) {
            double_click
        } else {
            click
        };
        if registry.has_event(&widget, event, PhaseMask::CHAIN) {
            chain.push(widget, event);
        }
    }
    Ok(chain)
}

/// Fire a click that may resolve to a double click per tree level.
///
/// See [`build_click_chain`] for how ancestors choose. The target's child
/// phase runs `double_click` if `wants_double_click(target)`, else `click`.
///
/// Contract violations are treated as in [`dispatcher::fire`](crate::dispatcher::fire).
pub fn fire_click_or_double_click<S, K, T>(
    registry: &SignalRegistry<K>,
    tree: &T,
    click: UiEvent,
    double_click: UiEvent,
    wants_double_click: impl Fn(K) -> bool,
    dispatcher: K,
    target: K,
    payload: &mut S::Payload,
) -> bool
where
    S: SignalKind,
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    T: ParentLookup<K> + ?Sized,
{
    match try_fire_click_or_double_click::<S, K, T>(
        registry,
        tree,
        click,
        double_click,
        wants_double_click,
        dispatcher,
        target,
        payload,
    ) {
        Ok(handled) => handled,
        Err(err) => contract_violation(&err),
    }
}

/// Like [`fire_click_or_double_click`], but returns a violated precondition
/// as an error.
pub fn try_fire_click_or_double_click<S, K, T>(
    registry: &SignalRegistry<K>,
    tree: &T,
    click: UiEvent,
    double_click: UiEvent,
    wants_double_click: impl Fn(K) -> bool,
    dispatcher: K,
    target: K,
    payload: &mut S::Payload,
) -> Result<bool, ChainError<K>>
where
    S: SignalKind,
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    T: ParentLookup<K> + ?Sized,
{
    check_queue::<S, K>(click)?;
    check_queue::<S, K>(double_click)?;
    let chain = build_click_chain(
        registry,
        tree,
        click,
        double_click,
        &wants_double_click,
        dispatcher,
        target,
    )?;
    let event = if wants_double_click(target) {
        double_click
    } else {
        click
    };
    Ok(fire_chain::<S, K>(
        registry, &chain, dispatcher, target, event, payload,
    ))
}

/// Fire the click of `button`, letting each level opt into its double click.
///
/// `wants_double_click` is asked per widget and button.
pub fn fire_button_click<K, T>(
    registry: &SignalRegistry<K>,
    tree: &T,
    button: MouseButton,
    wants_double_click: impl Fn(K, MouseButton) -> bool,
    dispatcher: K,
    target: K,
) -> bool
where
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    T: ParentLookup<K> + ?Sized,
{
    fire_click_or_double_click::<kind::General, K, T>(
        registry,
        tree,
        button.click_event(),
        button.double_click_event(),
        |widget| wants_double_click(widget, button),
        dispatcher,
        target,
        &mut (),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::QueuePosition;
    use crate::types::{Outcome, Phase};
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use hashbrown::HashMap;

    type Log = Rc<RefCell<Vec<(u32, UiEvent, Phase)>>>;

    // 4 → 3 → 2 → 1 (root)
    fn line() -> HashMap<u32, u32> {
        [(4, 3), (3, 2), (2, 1)].into_iter().collect()
    }

    fn listen(
        registry: &SignalRegistry<u32>,
        log: &Log,
        widget: u32,
        event: UiEvent,
        position: QueuePosition,
        outcome: Outcome,
    ) {
        let log = Rc::clone(log);
        registry.connect::<kind::General>(widget, event, position, move |args, _| {
            log.borrow_mut().push((args.current, args.event, args.phase));
            outcome
        });
    }

    #[test]
    fn ancestor_wanting_double_click_gets_the_double_click() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        let log = Log::default();
        listen(
            &registry,
            &log,
            2,
            UiEvent::LeftButtonClick,
            QueuePosition::BackPostChild,
            Outcome::Handled,
        );
        listen(
            &registry,
            &log,
            2,
            UiEvent::LeftButtonDoubleClick,
            QueuePosition::BackPostChild,
            Outcome::Handled,
        );

        let handled = fire_click_or_double_click::<kind::General, _, _>(
            &registry,
            &line(),
            UiEvent::LeftButtonClick,
            UiEvent::LeftButtonDoubleClick,
            |w| w == 2,
            1,
            4,
            &mut (),
        );
        assert!(handled);
        assert_eq!(
            *log.borrow(),
            [(2, UiEvent::LeftButtonDoubleClick, Phase::PostChild)]
        );
    }

    #[test]
    fn each_level_chooses_independently() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        for w in [1, 2, 3] {
            for event in [UiEvent::LeftButtonClick, UiEvent::LeftButtonDoubleClick] {
                registry.connect::<kind::General>(w, event, QueuePosition::BackPreChild, |_, _| {
                    Outcome::Continue
                });
            }
        }
        let chain = build_click_chain(
            &registry,
            &line(),
            UiEvent::LeftButtonClick,
            UiEvent::LeftButtonDoubleClick,
            |w| w % 2 == 1,
            1,
            4,
        )
        .unwrap();
        let entries: Vec<_> = chain.entries().iter().map(|e| (e.widget, e.event)).collect();
        assert_eq!(
            entries,
            [
                (3, UiEvent::LeftButtonDoubleClick),
                (2, UiEvent::LeftButtonClick),
                (1, UiEvent::LeftButtonDoubleClick),
            ]
        );
    }

    #[test]
    fn target_is_not_in_its_own_click_chain() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        registry.connect::<kind::General>(
            4,
            UiEvent::LeftButtonClick,
            QueuePosition::BackPostChild,
            |_, _| Outcome::Continue,
        );
        let chain = build_click_chain(
            &registry,
            &line(),
            UiEvent::LeftButtonClick,
            UiEvent::LeftButtonDoubleClick,
            |_| false,
            4,
            4,
        )
        .unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn target_preference_picks_the_child_event() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        let log = Log::default();
        listen(
            &registry,
            &log,
            4,
            UiEvent::RightButtonClick,
            QueuePosition::BackChild,
            Outcome::Continue,
        );
        listen(
            &registry,
            &log,
            4,
            UiEvent::RightButtonDoubleClick,
            QueuePosition::BackChild,
            Outcome::Continue,
        );

        fire_button_click(&registry, &line(), MouseButton::Right, |w, _| w == 4, 1, 4);
        fire_button_click(&registry, &line(), MouseButton::Right, |_, _| false, 1, 4);
        assert_eq!(
            *log.borrow(),
            [
                (4, UiEvent::RightButtonDoubleClick, Phase::Child),
                (4, UiEvent::RightButtonClick, Phase::Child),
            ]
        );
    }

    #[test]
    fn button_is_passed_to_the_predicate() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        let log = Log::default();
        listen(
            &registry,
            &log,
            1,
            UiEvent::MiddleButtonDoubleClick,
            QueuePosition::BackPreChild,
            Outcome::Handled,
        );

        let wants = |_: u32, button: MouseButton| button == MouseButton::Middle;
        assert!(fire_button_click(&registry, &line(), MouseButton::Middle, wants, 1, 4));
        assert!(!fire_button_click(&registry, &line(), MouseButton::Left, wants, 1, 4));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn wrong_queue_is_reported() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        let err = try_fire_click_or_double_click::<kind::General, _, _>(
            &registry,
            &line(),
            UiEvent::LeftButtonClick,
            UiEvent::NotifyModified,
            |_| true,
            1,
            4,
            &mut (),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ChainError::WrongQueue {
                event: UiEvent::NotifyModified,
                ..
            }
        ));
    }

    #[test]
    fn unreachable_dispatcher_is_reported() {
        let registry: SignalRegistry<u32> = SignalRegistry::new();
        let err = build_click_chain(
            &registry,
            &line(),
            UiEvent::LeftButtonClick,
            UiEvent::LeftButtonDoubleClick,
            |_| false,
            9,
            4,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ChainError::DispatcherNotAncestor {
                dispatcher: 9,
                target: 4
            }
        );
    }
}
