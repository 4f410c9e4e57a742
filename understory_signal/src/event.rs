// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event ids and their partition into queue kinds.
//!
//! Every [`UiEvent`] belongs to exactly one [`QueueKind`]. The kind decides
//! which registry queue holds the event's handlers and therefore which payload
//! type those handlers receive.
//!
//! Events prefixed with `Native` come straight from the windowing backend;
//! the others are synthesized by the toolkit (for example a click is
//! synthesized from a native button down/up pair).

/// Identifier of an event that can be fired at a widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UiEvent {
    /// Periodic redraw request.
    Draw,
    /// The window is asked to close.
    CloseWindow,
    /// The pointer entered the widget.
    MouseEnter,
    /// The pointer left the widget.
    MouseLeave,
    /// Left button pressed on the widget.
    LeftButtonDown,
    /// Left button released on the widget.
    LeftButtonUp,
    /// Left button pressed and released on the same widget.
    LeftButtonClick,
    /// Two left clicks in quick succession.
    LeftButtonDoubleClick,
    /// Middle button pressed on the widget.
    MiddleButtonDown,
    /// Middle button released on the widget.
    MiddleButtonUp,
    /// Middle button pressed and released on the same widget.
    MiddleButtonClick,
    /// Two middle clicks in quick succession.
    MiddleButtonDoubleClick,
    /// Right button pressed on the widget.
    RightButtonDown,
    /// Right button released on the widget.
    RightButtonUp,
    /// Right button pressed and released on the same widget.
    RightButtonClick,
    /// Two right clicks in quick succession.
    RightButtonDoubleClick,

    /// The pointer moved over the widget.
    MouseMotion,
    /// The pointer rested long enough to show a tooltip.
    ShowTooltip,
    /// Help was requested for the widget under the pointer.
    ShowHelptip,
    /// Backend pointer motion.
    NativeMouseMotion,
    /// Backend left button press.
    NativeLeftButtonDown,
    /// Backend left button release.
    NativeLeftButtonUp,
    /// Backend middle button press.
    NativeMiddleButtonDown,
    /// Backend middle button release.
    NativeMiddleButtonUp,
    /// Backend right button press.
    NativeRightButtonDown,
    /// Backend right button release.
    NativeRightButtonUp,
    /// Backend wheel scrolled up.
    NativeWheelUp,
    /// Backend wheel scrolled down.
    NativeWheelDown,
    /// Backend wheel scrolled left.
    NativeWheelLeft,
    /// Backend wheel scrolled right.
    NativeWheelRight,
    /// Backend finger lifted.
    NativeTouchUp,
    /// Backend finger placed.
    NativeTouchDown,
    /// The window was resized; the pointer payload carries the new size.
    NativeVideoResize,

    /// Backend key press.
    NativeKeyDown,

    /// Backend finger moved.
    NativeTouchMotion,

    /// Backend multi-finger gesture.
    NativeTouchMultiGesture,

    /// The widget is about to be removed.
    NotifyRemoval,
    /// The widget's value was modified.
    NotifyModified,
    /// The widget received keyboard focus.
    ReceiveKeyboardFocus,
    /// The widget lost keyboard focus.
    LoseKeyboardFocus,
    /// A tooltip shown for the widget should be removed.
    NotifyRemoveTooltip,
    /// The window was activated.
    NativeActivate,

    /// A widget asks its ancestors to show a tooltip.
    MessageShowTooltip,
    /// A widget asks its ancestors to show a helptip.
    MessageShowHelptip,
    /// A widget asks its ancestors to redo placement after a size change.
    RequestPlacement,

    /// Unprocessed backend event.
    NativeRawEvent,

    /// Backend committed text input.
    NativeTextInput,
    /// Backend in-progress text composition.
    NativeTextEditing,
}

impl UiEvent {
    /// Every event id, in declaration order.
    pub const ALL: [Self; 48] = [
        Self::Draw,
        Self::CloseWindow,
        Self::MouseEnter,
        Self::MouseLeave,
        Self::LeftButtonDown,
        Self::LeftButtonUp,
        Self::LeftButtonClick,
        Self::LeftButtonDoubleClick,
        Self::MiddleButtonDown,
        Self::MiddleButtonUp,
        Self::MiddleButtonClick,
        Self::MiddleButtonDoubleClick,
        Self::RightButtonDown,
        Self::RightButtonUp,
        Self::RightButtonClick,
        Self::RightButtonDoubleClick,
        Self::MouseMotion,
        Self::ShowTooltip,
        Self::ShowHelptip,
        Self::NativeMouseMotion,
        Self::NativeLeftButtonDown,
        Self::NativeLeftButtonUp,
        Self::NativeMiddleButtonDown,
        Self::NativeMiddleButtonUp,
        Self::NativeRightButtonDown,
        Self::NativeRightButtonUp,
        Self::NativeWheelUp,
        Self::NativeWheelDown,
        Self::NativeWheelLeft,
        Self::NativeWheelRight,
        Self::NativeTouchUp,
        Self::NativeTouchDown,
        Self::NativeVideoResize,
        Self::NativeKeyDown,
        Self::NativeTouchMotion,
        Self::NativeTouchMultiGesture,
        Self::NotifyRemoval,
        Self::NotifyModified,
        Self::ReceiveKeyboardFocus,
        Self::LoseKeyboardFocus,
        Self::NotifyRemoveTooltip,
        Self::NativeActivate,
        Self::MessageShowTooltip,
        Self::MessageShowHelptip,
        Self::RequestPlacement,
        Self::NativeRawEvent,
        Self::NativeTextInput,
        Self::NativeTextEditing,
    ];

    /// The queue kind this event belongs to.
    #[must_use]
    pub const fn queue_kind(self) -> QueueKind {
        QueueKind::of(self)
    }
}

/// Disjoint classification of every [`UiEvent`].
///
/// Each kind has its own registry queue and its own handler payload type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueueKind {
    /// Events without extra parameters.
    General,
    /// Pointer events carrying a position.
    Pointer,
    /// Key presses.
    Keyboard,
    /// Single-finger touch motion.
    TouchMotion,
    /// Multi-finger gestures.
    TouchGesture,
    /// Events delivered only to the child phase of their receiver.
    Notification,
    /// Events a widget sends about itself to its ancestors.
    Message,
    /// Unprocessed backend events.
    RawInput,
    /// Text input and composition.
    TextInput,
}

impl QueueKind {
    /// All queue kinds.
    pub const ALL: [Self; 9] = [
        Self::General,
        Self::Pointer,
        Self::Keyboard,
        Self::TouchMotion,
        Self::TouchGesture,
        Self::Notification,
        Self::Message,
        Self::RawInput,
        Self::TextInput,
    ];

    /// Classify an event.
    #[must_use]
    pub const fn of(event: UiEvent) -> Self {
        use UiEvent as E;
        match event {
            E::Draw
            | E::CloseWindow
            | E::MouseEnter
            | E::MouseLeave
            | E::LeftButtonDown
            | E::LeftButtonUp
            | E::LeftButtonClick
            | E::LeftButtonDoubleClick
            | E::MiddleButtonDown
            | E::MiddleButtonUp
            | E::MiddleButtonClick
            | E::MiddleButtonDoubleClick
            | E::RightButtonDown
            | E::RightButtonUp
            | E::RightButtonClick
            | E::RightButtonDoubleClick => Self::General,
            E::MouseMotion
            | E::ShowTooltip
            | E::ShowHelptip
            | E::NativeMouseMotion
            | E::NativeLeftButtonDown
            | E::NativeLeftButtonUp
            | E::NativeMiddleButtonDown
            | E::NativeMiddleButtonUp
            | E::NativeRightButtonDown
            | E::NativeRightButtonUp
            | E::NativeWheelUp
            | E::NativeWheelDown
            | E::NativeWheelLeft
            | E::NativeWheelRight
            | E::NativeTouchUp
            | E::NativeTouchDown
            | E::NativeVideoResize => Self::Pointer,
            E::NativeKeyDown => Self::Keyboard,
            E::NativeTouchMotion => Self::TouchMotion,
            E::NativeTouchMultiGesture => Self::TouchGesture,
            E::NotifyRemoval
            | E::NotifyModified
            | E::ReceiveKeyboardFocus
            | E::LoseKeyboardFocus
            | E::NotifyRemoveTooltip
            | E::NativeActivate => Self::Notification,
            E::MessageShowTooltip | E::MessageShowHelptip | E::RequestPlacement => Self::Message,
            E::NativeRawEvent => Self::RawInput,
            E::NativeTextInput | E::NativeTextEditing => Self::TextInput,
        }
    }
}

/// A mouse button with a click/double-click event pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left (primary) button.
    Left,
    /// Middle button.
    Middle,
    /// Right (secondary) button.
    Right,
}

impl MouseButton {
    /// All buttons.
    pub const ALL: [Self; 3] = [Self::Left, Self::Middle, Self::Right];

    /// The synthesized button-down event.
    #[must_use]
    pub const fn down_event(self) -> UiEvent {
        match self {
            Self::Left => UiEvent::LeftButtonDown,
            Self::Middle => UiEvent::MiddleButtonDown,
            Self::Right => UiEvent::RightButtonDown,
        }
    }

    /// The synthesized button-up event.
    #[must_use]
    pub const fn up_event(self) -> UiEvent {
        match self {
            Self::Left => UiEvent::LeftButtonUp,
            Self::Middle => UiEvent::MiddleButtonUp,
            Self::Right => UiEvent::RightButtonUp,
        }
    }

    /// The single click event.
    #[must_use]
    pub const fn click_event(self) -> UiEvent {
        match self {
            Self::Left => UiEvent::LeftButtonClick,
            Self::Middle => UiEvent::MiddleButtonClick,
            Self::Right => UiEvent::RightButtonClick,
        }
    }

    /// The double-click event.
    #[must_use]
    pub const fn double_click_event(self) -> UiEvent {
        match self {
            Self::Left => UiEvent::LeftButtonDoubleClick,
            Self::Middle => UiEvent::MiddleButtonDoubleClick,
            Self::Right => UiEvent::RightButtonDoubleClick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn every_kind_has_events() {
        for kind in QueueKind::ALL {
            assert!(
                UiEvent::ALL.iter().any(|e| e.queue_kind() == kind),
                "{kind:?} has no events"
            );
        }
    }

    #[test]
    fn button_events_are_general() {
        for button in MouseButton::ALL {
            assert_eq!(button.click_event().queue_kind(), QueueKind::General);
            assert_eq!(
                button.double_click_event().queue_kind(),
                QueueKind::General
            );
            assert_eq!(button.down_event().queue_kind(), QueueKind::General);
            assert_eq!(button.up_event().queue_kind(), QueueKind::General);
        }
    }

    #[test]
    fn notable_classifications() {
        assert_eq!(QueueKind::of(UiEvent::NativeKeyDown), QueueKind::Keyboard);
        assert_eq!(
            QueueKind::of(UiEvent::RequestPlacement),
            QueueKind::Message
        );
        assert_eq!(
            QueueKind::of(UiEvent::NotifyModified),
            QueueKind::Notification
        );
        assert_eq!(QueueKind::of(UiEvent::NativeWheelUp), QueueKind::Pointer);
        assert_eq!(
            QueueKind::of(UiEvent::NativeTextEditing),
            QueueKind::TextInput
        );
    }

    #[test]
    fn all_has_no_duplicates() {
        let mut seen: Vec<UiEvent> = UiEvent::ALL.to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), UiEvent::ALL.len());
    }
}
