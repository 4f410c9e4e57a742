// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: run the pre-child → child → post-child protocol over an event chain.
//!
//! The firer applies simple propagation rules:
//!
//! - Pre-child handlers run over the chain back to front (outermost widget first).
//! - Child handlers run on the target only.
//! - Post-child handlers run over the chain front to back (innermost widget first).
//! - Within one widget and phase, handlers run in registration order.
//!   [`Outcome::Halt`] skips the rest of that list.
//! - As soon as a widget's phase ends with the event handled, firing stops
//!   and returns `true`. Nothing scheduled after that point runs.
//! - Returns `false` if no handler handled the event.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use hashbrown::HashMap;
//! use understory_signal::{dispatcher, kind};
//! use understory_signal::{Outcome, Phase, QueuePosition, SignalRegistry, UiEvent};
//!
//! // 3 → 2 → 1 (root)
//! let tree: HashMap<u32, u32> = [(3, 2), (2, 1)].into_iter().collect();
//! let registry: SignalRegistry<u32> = SignalRegistry::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! for (widget, position) in [
//!     (1, QueuePosition::BackPreChild),
//!     (2, QueuePosition::BackPreChild),
//!     (3, QueuePosition::BackChild),
//!     (2, QueuePosition::BackPostChild),
//!     (1, QueuePosition::BackPostChild),
//! ] {
//!     let seen = Rc::clone(&seen);
//!     registry.connect::<kind::General>(widget, UiEvent::Draw, position, move |args, _| {
//!         seen.borrow_mut().push((args.phase, args.current));
//!         Outcome::Continue
//!     });
//! }
//!
//! let handled =
//!     dispatcher::fire::<kind::General, _, _>(&registry, &tree, UiEvent::Draw, 1, 3, &mut ());
//! assert!(!handled);
//! assert_eq!(*seen.borrow(), vec![
//!     (Phase::PreChild, 1), (Phase::PreChild, 2),
//!     (Phase::Child, 3),
//!     (Phase::PostChild, 2), (Phase::PostChild, 1),
//! ]);
//! ```

use core::fmt;
use core::hash::Hash;

use crate::chain::{ChainError, EventChain, build_chain};
use crate::event::UiEvent;
use crate::kind::SignalKind;
use crate::registry::SignalRegistry;
use crate::types::{Outcome, ParentLookup, Phase, PhaseMask, SignalArgs};

/// Fire `event` at `target` through `dispatcher`.
///
/// The chain is built with the strategy of `S`, then run with [`fire_chain`].
/// Returns whether a handler handled the event.
///
/// A violated precondition (see [`ChainError`]) is a bug in the caller: it
/// panics in debug builds; release builds log it and report the event as
/// unhandled. Use [`try_fire`] to get the error instead.
pub fn fire<S, K, T>(
    registry: &SignalRegistry<K>,
    tree: &T,
    event: UiEvent,
    dispatcher: K,
    target: K,
    payload: &mut S::Payload,
) -> bool
where
    S: SignalKind,
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    T: ParentLookup<K> + ?Sized,
{
    match try_fire::<S, K, T>(registry, tree, event, dispatcher, target, payload) {
        Ok(handled) => handled,
        Err(err) => contract_violation(&err),
    }
}

/// Like [`fire`], but returns a violated precondition as an error.
pub fn try_fire<S, K, T>(
    registry: &SignalRegistry<K>,
    tree: &T,
    event: UiEvent,
    dispatcher: K,
    target: K,
    payload: &mut S::Payload,
) -> Result<bool, ChainError<K>>
where
    S: SignalKind,
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    T: ParentLookup<K> + ?Sized,
{
    check_queue::<S, K>(event)?;
    let chain = build_chain(S::CHAIN, registry, tree, event, dispatcher, target)?;
    Ok(fire_chain::<S, K>(
        registry, &chain, dispatcher, target, event, payload,
    ))
}

/// Run the three phases over a prebuilt chain.
///
/// `event` is the id used for the target's child phase; chain entries carry
/// their own ids.
pub fn fire_chain<S, K>(
    registry: &SignalRegistry<K>,
    chain: &EventChain<K>,
    dispatcher: K,
    target: K,
    event: UiEvent,
    payload: &mut S::Payload,
) -> bool
where
    S: SignalKind,
    K: Copy + Eq + Hash + fmt::Debug + 'static,
{
    let handled = fire_phases::<S, K>(registry, chain, dispatcher, target, event, payload);
    tracing::trace!(?event, ?dispatcher, ?target, chain = chain.len(), handled, "fired signal");
    handled
}

fn fire_phases<S, K>(
    registry: &SignalRegistry<K>,
    chain: &EventChain<K>,
    dispatcher: K,
    target: K,
    event: UiEvent,
    payload: &mut S::Payload,
) -> bool
where
    S: SignalKind,
    K: Copy + Eq + Hash + fmt::Debug + 'static,
{
    let args_for = |current: K, event: UiEvent, phase: Phase| SignalArgs {
        dispatcher,
        current,
        target,
        event,
        phase,
    };

    for entry in chain.entries().iter().rev() {
        let args = args_for(entry.widget, entry.event, Phase::PreChild);
        if run_handlers::<S, K>(registry, &args, payload) {
            return true;
        }
    }

    if registry.has_event(&target, event, PhaseMask::CHILD)
        && run_handlers::<S, K>(registry, &args_for(target, event, Phase::Child), payload)
    {
        return true;
    }

    for entry in chain.entries() {
        let args = args_for(entry.widget, entry.event, Phase::PostChild);
        if run_handlers::<S, K>(registry, &args, payload) {
            return true;
        }
    }

    false
}

/// Run one widget's handlers for one phase; returns whether any handled the event.
fn run_handlers<S, K>(
    registry: &SignalRegistry<K>,
    args: &SignalArgs<K>,
    payload: &mut S::Payload,
) -> bool
where
    S: SignalKind,
    K: Copy + Eq + Hash + fmt::Debug + 'static,
{
    let handlers = S::queue(registry).snapshot(&args.current, args.event, args.phase);
    let mut handled = false;
    for handler in &handlers {
        match handler(args, payload) {
            Outcome::Continue => {}
            Outcome::Handled => handled = true,
            Outcome::Halt => {
                handled = true;
                break;
            }
        }
    }
    handled
}

pub(crate) fn check_queue<S, K>(event: UiEvent) -> Result<(), ChainError<K>>
where
    S: SignalKind,
{
    if event.queue_kind() == S::QUEUE {
        Ok(())
    } else {
        Err(ChainError::WrongQueue {
            event,
            expected: S::QUEUE,
        })
    }
}

pub(crate) fn contract_violation<K: fmt::Debug>(err: &ChainError<K>) -> bool {
    debug_assert!(false, "signal dispatch contract violated: {err}");
    tracing::error!(%err, "signal dispatch contract violated");
    false
}
