// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler payloads, one type per queue kind.
//!
//! Handlers receive their payload by `&mut`. Most handlers only read it;
//! message handlers use the mutability to answer the sender.

use alloc::string::String;

use kurbo::{Point, Rect, Vec2};

bitflags::bitflags! {
    /// Keyboard modifiers held during a key press.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT = 0b0000_0001;
        /// Either control key.
        const CTRL  = 0b0000_0010;
        /// Either alt key.
        const ALT   = 0b0000_0100;
        /// Either logo (command/windows) key.
        const META  = 0b0000_1000;
    }
}

/// Payload of [`Keyboard`](crate::kind::Keyboard) handlers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyInput {
    /// Backend key code.
    pub key: u32,
    /// Modifiers held while the key was pressed.
    pub modifiers: Modifiers,
    /// Text produced by the key press, if any.
    pub text: String,
}

/// Payload of [`TouchMotion`](crate::kind::TouchMotion) handlers.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TouchMotion {
    /// Current finger position.
    pub position: Point,
    /// Movement since the previous motion event.
    pub delta: Vec2,
}

/// Payload of [`TouchGesture`](crate::kind::TouchGesture) handlers.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TouchGesture {
    /// Center of the gesture.
    pub center: Point,
    /// Rotation since the previous gesture event, in radians.
    pub rotation: f64,
    /// Pinch distance change since the previous gesture event.
    pub pinch: f64,
    /// Number of fingers involved.
    pub fingers: u8,
}

/// A request to show a tooltip or helptip for a widget.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TipRequest {
    /// Text to show.
    pub text: String,
    /// Where the pointer was when the tip was requested.
    pub location: Point,
    /// Bounds of the widget asking for the tip.
    pub source: Rect,
}

/// Payload of [`Message`](crate::kind::Message) handlers.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Message {
    /// Message without content, such as a placement request.
    #[default]
    Empty,
    /// Show a tooltip; sent with [`UiEvent::MessageShowTooltip`](crate::UiEvent::MessageShowTooltip).
    ShowTooltip(TipRequest),
    /// Show a helptip; sent with [`UiEvent::MessageShowHelptip`](crate::UiEvent::MessageShowHelptip).
    ShowHelptip(TipRequest),
}

/// Payload of [`RawInput`](crate::kind::RawInput) handlers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawEvent {
    /// Backend event type code.
    pub code: u32,
    /// Backend timestamp in milliseconds.
    pub timestamp: u64,
}

/// Payload of [`TextInput`](crate::kind::TextInput) handlers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    /// Committed or composed text.
    pub text: String,
    /// Cursor start within the composition, in characters.
    pub start: i32,
    /// Selection length within the composition, in characters.
    pub len: i32,
}
