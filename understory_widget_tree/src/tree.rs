// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena storage for widgets and their parent/child links.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::types::{ExecutorFlags, WidgetId};

#[derive(Clone, Debug)]
struct Node {
    parent: Option<WidgetId>,
    children: SmallVec<[WidgetId; 4]>,
    flags: ExecutorFlags,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A tree of widgets addressed by generational [`WidgetId`]s.
///
/// The tree owns every widget. Parent links are stored as ids, so a widget
/// never holds a reference into its parent and removal cannot leave a
/// dangling link behind: a stale id simply stops resolving.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a widget under `parent` (or as a new root when `None`).
    ///
    /// The new widget is appended after its existing siblings.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn insert(&mut self, parent: Option<WidgetId>, flags: ExecutorFlags) -> WidgetId {
        if let Some(p) = parent {
            assert!(self.is_alive(p), "parent {p:?} is not alive");
        }
        let node = Node {
            parent,
            children: SmallVec::new(),
            flags,
        };
        let id = if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.node = Some(node);
            WidgetId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).expect("widget slot index overflow");
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            WidgetId::new(idx, 1)
        };
        if let Some(p) = parent
            && let Some(parent_node) = self.node_mut(p)
        {
            parent_node.children.push(id);
        }
        self.len += 1;
        id
    }

    /// Remove a widget and its whole subtree.
    ///
    /// Returns the removed ids, children before their parents. A stale id
    /// removes nothing and returns an empty list.
    pub fn remove(&mut self, id: WidgetId) -> Vec<WidgetId> {
        if !self.is_alive(id) {
            return Vec::new();
        }
        if let Some(parent) = self.parent_of(id)
            && let Some(parent_node) = self.node_mut(parent)
        {
            parent_node.children.retain(|c| *c != id);
        }

        let mut removed = Vec::new();
        let mut stack = alloc::vec![(id, false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                self.free_slot(current);
                removed.push(current);
                continue;
            }
            stack.push((current, true));
            for &child in self.children_of(current).iter().rev() {
                stack.push((child, false));
            }
        }
        tracing::trace!(?id, removed = removed.len(), "removed widget subtree");
        removed
    }

    /// Returns `true` if `id` refers to a live widget.
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.node(id).is_some()
    }

    /// Parent of a live widget; `None` for roots and stale ids.
    pub fn parent_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.node(id)?.parent
    }

    /// Children of a live widget in insertion order; empty for stale ids.
    pub fn children_of(&self, id: WidgetId) -> &[WidgetId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Executor flags of a live widget.
    pub fn flags(&self, id: WidgetId) -> Option<ExecutorFlags> {
        self.node(id).map(|n| n.flags)
    }

    /// Replace the executor flags of a live widget. Stale ids are ignored.
    pub fn set_flags(&mut self, id: WidgetId, flags: ExecutorFlags) {
        if let Some(node) = self.node_mut(id) {
            node.flags = flags;
        }
    }

    /// Iterate the strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: WidgetId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent_of(id),
        }
    }

    /// The root of the tree containing `id`, or `None` for a stale id.
    pub fn root_of(&self, id: WidgetId) -> Option<WidgetId> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.ancestors(id).last().unwrap_or(id))
    }

    /// Returns `true` if `ancestor` is `id` itself or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        self.is_alive(id) && (ancestor == id || self.ancestors(id).any(|a| a == ancestor))
    }

    fn node(&self, id: WidgetId) -> Option<&Node> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_mut()
    }

    fn free_slot(&mut self, id: WidgetId) {
        if let Some(slot) = self.slots.get_mut(id.idx())
            && slot.generation == id.generation()
            && slot.node.take().is_some()
        {
            self.free.push(id.slot());
            self.len -= 1;
        }
    }
}

/// Iterator over the strict ancestors of a widget, nearest first.
///
/// Created by [`Tree::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<WidgetId>,
}

impl Iterator for Ancestors<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent_of(current);
        Some(current)
    }
}
