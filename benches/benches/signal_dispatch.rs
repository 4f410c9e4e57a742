// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_signal::adapters::widget_tree::wants_double_click;
use understory_signal::{MouseButton, Outcome, QueuePosition, SignalRegistry, UiEvent};
use understory_signal::{click, dispatcher, kind};
use understory_widget_tree::{ExecutorFlags, Tree, WidgetId};

/// A single path of `depth` widgets; returns the tree and ids root first.
fn build_line(depth: usize) -> (Tree, Vec<WidgetId>) {
    let mut tree = Tree::new();
    let mut ids = Vec::with_capacity(depth);
    let mut parent = None;
    for i in 0..depth {
        let flags = if i % 3 == 0 {
            ExecutorFlags::WANTS_LEFT_DOUBLE_CLICK
        } else {
            ExecutorFlags::empty()
        };
        let id = tree.insert(parent, flags);
        ids.push(id);
        parent = Some(id);
    }
    (tree, ids)
}

/// Connect pre and post pointer handlers on every `stride`-th widget.
fn populate(ids: &[WidgetId], stride: usize) -> SignalRegistry<WidgetId> {
    let registry = SignalRegistry::new();
    for &id in ids.iter().step_by(stride) {
        registry.connect::<kind::Pointer>(
            id,
            UiEvent::MouseMotion,
            QueuePosition::BackPreChild,
            |_, p: &mut Point| {
                p.x += 1.0;
                Outcome::Continue
            },
        );
        registry.connect::<kind::Pointer>(
            id,
            UiEvent::MouseMotion,
            QueuePosition::BackPostChild,
            |_, _| Outcome::Continue,
        );
        registry.connect::<kind::General>(
            id,
            UiEvent::LeftButtonClick,
            QueuePosition::BackPostChild,
            |_, _| Outcome::Continue,
        );
        registry.connect::<kind::General>(
            id,
            UiEvent::LeftButtonDoubleClick,
            QueuePosition::BackPostChild,
            |_, _| Outcome::Continue,
        );
    }
    registry
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_signal");
    group.sample_size(50);

    for &(depth, stride) in &[(8_usize, 1_usize), (32, 1), (32, 4), (256, 8)] {
        let (tree, ids) = build_line(depth);
        let registry = populate(&ids, stride);
        let root = ids[0];
        let leaf = ids[depth - 1];

        group.bench_function(format!("fire_pointer(depth={depth},stride={stride})"), |b| {
            b.iter(|| {
                let mut point = Point::ZERO;
                let handled = dispatcher::fire::<kind::Pointer, _, _>(
                    &registry,
                    &tree,
                    UiEvent::MouseMotion,
                    root,
                    leaf,
                    &mut point,
                );
                black_box((handled, point))
            });
        });

        group.bench_function(format!("fire_button_click(depth={depth},stride={stride})"), |b| {
            b.iter(|| {
                black_box(click::fire_button_click(
                    &registry,
                    &tree,
                    MouseButton::Left,
                    wants_double_click(&tree),
                    root,
                    leaf,
                ))
            });
        });
    }

    group.bench_function("connect_disconnect_widget(n=1024)", |b| {
        let (_, ids) = build_line(1024);
        b.iter_batched(
            SignalRegistry::new,
            |registry| {
                for &id in &ids {
                    registry.connect::<kind::General>(
                        id,
                        UiEvent::Draw,
                        QueuePosition::BackChild,
                        |_, _| Outcome::Continue,
                    );
                }
                let removed: usize = ids.iter().map(|id| registry.disconnect_widget(id)).sum();
                black_box(removed)
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
