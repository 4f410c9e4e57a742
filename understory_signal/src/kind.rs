// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signal kinds: one marker type per [`QueueKind`].
//!
//! A signal kind ties together the payload handlers receive, the registry
//! queue they are stored in and the chain strategy used when firing.
//!
//! ```
//! use understory_signal::kind::{self, SignalKind};
//! use understory_signal::{ChainStrategy, QueueKind};
//!
//! assert_eq!(kind::Pointer::QUEUE, QueueKind::Pointer);
//! assert_eq!(kind::Pointer::CHAIN, ChainStrategy::Bubble);
//! assert_eq!(kind::Message::CHAIN, ChainStrategy::Message);
//! assert_eq!(kind::Notification::CHAIN, ChainStrategy::Notification);
//! ```

use kurbo::Point;

use crate::chain::ChainStrategy;
use crate::event::QueueKind;
use crate::payload;
use crate::registry::{SignalQueue, SignalRegistry};

/// A family of events sharing a payload type and a registry queue.
pub trait SignalKind: 'static {
    /// Payload handed to handlers of this kind.
    type Payload: 'static;
    /// The queue kind every event of this family belongs to.
    const QUEUE: QueueKind;
    /// How the event chain is built when firing this kind.
    const CHAIN: ChainStrategy;

    /// The registry queue holding handlers of this kind.
    fn queue<K>(registry: &SignalRegistry<K>) -> &SignalQueue<K, Self::Payload>;
}

macro_rules! signal_kinds {
    ($(
        $(#[$meta:meta])*
        $name:ident => $field:ident: $payload:ty, $queue:ident, $chain:ident;
    )*) => {$(
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl SignalKind for $name {
            type Payload = $payload;
            const QUEUE: QueueKind = QueueKind::$queue;
            const CHAIN: ChainStrategy = ChainStrategy::$chain;

            #[inline]
            fn queue<K>(registry: &SignalRegistry<K>) -> &SignalQueue<K, Self::Payload> {
                &registry.$field
            }
        }
    )*};
}

signal_kinds! {
    /// Events without extra parameters (drawing, clicks, enter/leave).
    General => general: (), General, Bubble;
    /// Pointer events; handlers receive the pointer position.
    Pointer => pointer: Point, Pointer, Bubble;
    /// Key presses.
    Keyboard => keyboard: payload::KeyInput, Keyboard, Bubble;
    /// Single-finger touch motion.
    TouchMotion => touch_motion: payload::TouchMotion, TouchMotion, Bubble;
    /// Multi-finger gestures.
    TouchGesture => touch_gesture: payload::TouchGesture, TouchGesture, Bubble;
    /// Notifications, delivered only to the child phase of the receiver.
    Notification => notification: (), Notification, Notification;
    /// Messages a widget sends about itself to its ancestors.
    Message => message: payload::Message, Message, Message;
    /// Unprocessed backend events.
    RawInput => raw_input: payload::RawEvent, RawInput, Bubble;
    /// Text input and composition.
    TextInput => text_input: payload::TextInput, TextInput, Bubble;
}
