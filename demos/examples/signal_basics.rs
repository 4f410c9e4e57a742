// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Three-phase signals over a small widget tree.
//!
//! Builds `window → list → row → label`, connects handlers in every phase and
//! fires a pointer event, a click that the list resolves as a double click,
//! a tooltip message and a notification. Dispatch is traced through
//! `tracing`; set `RUST_LOG` to change the level.
//!
//! Run:
//! - `cargo run -p understory_demos --example signal_basics`

use kurbo::{Point, Rect};
use understory_signal::adapters::widget_tree::{remove_widget, wants_double_click};
use understory_signal::payload::{Message, TipRequest};
use understory_signal::{MouseButton, Outcome, QueuePosition, SignalRegistry, UiEvent};
use understory_signal::{click, dispatcher, kind};
use understory_widget_tree::{ExecutorFlags, Tree, WidgetId};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "understory_signal=trace".into()),
        )
        .init();

    let mut tree = Tree::new();
    let window = tree.insert(None, ExecutorFlags::empty());
    let list = tree.insert(Some(window), ExecutorFlags::WANTS_LEFT_DOUBLE_CLICK);
    let row = tree.insert(Some(list), ExecutorFlags::empty());
    let label = tree.insert(Some(row), ExecutorFlags::empty());

    let names = [(window, "window"), (list, "list"), (row, "row"), (label, "label")];
    let name = move |id: WidgetId| {
        names
            .iter()
            .find_map(|&(w, n)| (w == id).then_some(n))
            .unwrap_or("?")
    };

    let registry = SignalRegistry::new();

    // Pointer motion: the window sees it first and last.
    registry.connect::<kind::Pointer>(
        window,
        UiEvent::MouseMotion,
        QueuePosition::BackPreChild,
        move |args, p: &mut Point| {
            println!("  pre   {:<6} at {p:?}", name(args.current));
            Outcome::Continue
        },
    );
    registry.connect::<kind::Pointer>(
        label,
        UiEvent::MouseMotion,
        QueuePosition::BackChild,
        move |args, _| {
            println!("  child {:<6}", name(args.current));
            Outcome::Continue
        },
    );
    registry.connect::<kind::Pointer>(
        window,
        UiEvent::MouseMotion,
        QueuePosition::BackPostChild,
        move |args, _| {
            println!("  post  {:<6}", name(args.current));
            Outcome::Continue
        },
    );

    // Clicks: the list wants double clicks, the row takes plain clicks.
    registry.connect::<kind::General>(
        list,
        UiEvent::LeftButtonDoubleClick,
        QueuePosition::BackPostChild,
        move |args, _| {
            println!("  {} opens the row ({:?})", name(args.current), args.event);
            Outcome::Handled
        },
    );
    registry.connect::<kind::General>(
        row,
        UiEvent::LeftButtonClick,
        QueuePosition::BackPostChild,
        move |args, _| {
            println!("  {} selects itself ({:?})", name(args.current), args.event);
            Outcome::Continue
        },
    );

    // Tooltips: the window shows whatever its descendants ask for.
    registry.connect::<kind::Message>(
        window,
        UiEvent::MessageShowTooltip,
        QueuePosition::BackPostChild,
        move |args, message: &mut Message| {
            if let Message::ShowTooltip(tip) = message {
                println!("  {} shows {:?} at {:?}", name(args.current), tip.text, tip.location);
                return Outcome::Handled;
            }
            Outcome::Continue
        },
    );

    registry.connect::<kind::Notification>(
        label,
        UiEvent::NotifyModified,
        QueuePosition::BackChild,
        move |args, _| {
            println!("  {} was modified", name(args.current));
            Outcome::Handled
        },
    );

    println!("mouse motion:");
    let mut at = Point::new(12.0, 3.0);
    let handled = dispatcher::fire::<kind::Pointer, _, _>(
        &registry,
        &tree,
        UiEvent::MouseMotion,
        window,
        label,
        &mut at,
    );
    println!("  handled: {handled}");

    println!("left click:");
    let handled = click::fire_button_click(
        &registry,
        &tree,
        MouseButton::Left,
        wants_double_click(&tree),
        window,
        label,
    );
    println!("  handled: {handled}");

    println!("tooltip:");
    let mut tip = Message::ShowTooltip(TipRequest {
        text: "Double-click to open".into(),
        location: Point::new(12.0, 18.0),
        source: Rect::new(0.0, 0.0, 80.0, 16.0),
    });
    dispatcher::fire::<kind::Message, _, _>(
        &registry,
        &tree,
        UiEvent::MessageShowTooltip,
        label,
        label,
        &mut tip,
    );

    println!("notification:");
    dispatcher::fire::<kind::Notification, _, _>(
        &registry,
        &tree,
        UiEvent::NotifyModified,
        window,
        label,
        &mut (),
    );

    let dropped = remove_widget(&mut tree, &registry, row);
    println!("removed row subtree, {dropped} handlers disconnected");
}
