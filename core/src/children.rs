//! Child-list reconciliation strategies.
//!
//! Containers differ only in how children are addressed: a single slot, an
//! ordered list, a keyed map, or grid regions. Each strategy owns the
//! child state in the matching shape and converges it toward the described
//! children with the fewest native attach and detach calls it can prove
//! correct. A child whose description is identical to its state costs no
//! native call at all.

use core::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::environment::Environment;
use crate::error::Error;
use crate::layout::Region;
use crate::toolkit::{NativeWidget, RawWidget};
use crate::widget::{AnyState, AnyWidget};

/// A described child paired with container-specific metadata.
#[derive(Debug)]
pub struct Child<M> {
    /// The child description.
    pub widget: AnyWidget,
    /// Attachment metadata, such as layout or a grid region.
    pub meta: M,
}

impl<M> Child<M> {
    /// Pairs a child description with its metadata.
    pub fn new(widget: impl Into<AnyWidget>, meta: M) -> Self {
        Self {
            widget: widget.into(),
            meta,
        }
    }
}

/// State of a single-child slot.
#[derive(Debug, Default)]
pub struct Slot {
    state: Option<AnyState>,
}

impl Slot {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// The child state, if present.
    #[must_use]
    pub const fn state(&self) -> Option<&AnyState> {
        self.state.as_ref()
    }

    /// Converges the slot toward the described child.
    ///
    /// Setting a new child detaches the previous one natively; the old
    /// state is torn down only after the replacement is attached.
    ///
    /// # Errors
    ///
    /// Propagates child build and update errors.
    pub fn reconcile(
        &mut self,
        desc: Option<&AnyWidget>,
        parent: &NativeWidget,
        env: &Environment,
    ) -> Result<(), Error> {
        let toolkit = Rc::clone(parent.toolkit());
        match (desc, self.state.as_mut()) {
            (None, Some(_)) => {
                toolkit.set_child(parent.raw(), None);
                self.state = None;
            }
            (Some(desc), None) => {
                let fresh = desc.build(env)?;
                toolkit.set_child(parent.raw(), Some(fresh.widget().raw()));
                self.state = Some(fresh);
            }
            (Some(desc), Some(existing)) => {
                if let Some(fresh) = desc.reconcile(Some(existing), env)? {
                    toolkit.set_child(parent.raw(), Some(fresh.widget().raw()));
                    let old = core::mem::replace(existing, fresh);
                    drop(old);
                }
            }
            (None, None) => {}
        }
        Ok(())
    }

    /// Recursively pulls read-back values.
    pub fn read(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.read();
        }
    }
}

struct OrderedEntry<M> {
    state: AnyState,
    meta: M,
}

impl<M: fmt::Debug> fmt::Debug for OrderedEntry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedEntry")
            .field("state", &self.state)
            .field("meta", &self.meta)
            .finish()
    }
}

/// State of an ordered child list, diffed index by index.
#[derive(Debug)]
pub struct OrderedChildren<M> {
    entries: Vec<OrderedEntry<M>>,
}

impl<M> Default for OrderedChildren<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> OrderedChildren<M> {
    /// An empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of live children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recursively pulls read-back values.
    pub fn read(&mut self) {
        for entry in &mut self.entries {
            entry.state.read();
        }
    }
}

impl<M: Clone + PartialEq> OrderedChildren<M> {
    /// Converges the list toward the described children.
    ///
    /// Children are matched index by index. A child rebuilt at an index
    /// is spliced in after its previous sibling, keeping the visual
    /// position; surplus described children are appended at the tail and
    /// surplus live children are detached from it. `apply` pushes
    /// metadata onto a child's widget; it runs for every attached child
    /// and again whenever the metadata changes.
    ///
    /// # Errors
    ///
    /// Propagates child build and update errors.
    pub fn reconcile(
        &mut self,
        desc: &[Child<M>],
        parent: &NativeWidget,
        env: &Environment,
        apply: impl Fn(&NativeWidget, &M),
    ) -> Result<(), Error> {
        let toolkit = Rc::clone(parent.toolkit());
        let shared = desc.len().min(self.entries.len());
        let mut prev: Option<RawWidget> = None;

        for (index, d) in desc.iter().take(shared).enumerate() {
            let entry = &mut self.entries[index];
            match d.widget.reconcile(Some(&mut entry.state), env)? {
                None => {
                    if entry.meta != d.meta {
                        apply(entry.state.widget(), &d.meta);
                        entry.meta = d.meta.clone();
                    }
                }
                Some(fresh) => {
                    toolkit.insert_after(parent.raw(), fresh.widget().raw(), prev);
                    toolkit.remove_child(parent.raw(), entry.state.widget().raw());
                    apply(fresh.widget(), &d.meta);
                    let old = core::mem::replace(&mut entry.state, fresh);
                    entry.meta = d.meta.clone();
                    drop(old);
                }
            }
            prev = Some(self.entries[index].state.widget().raw());
        }

        for d in &desc[shared..] {
            let fresh = d.widget.build(env)?;
            toolkit.append(parent.raw(), fresh.widget().raw());
            apply(fresh.widget(), &d.meta);
            self.entries.push(OrderedEntry {
                state: fresh,
                meta: d.meta.clone(),
            });
        }

        if self.entries.len() > desc.len() {
            for entry in self.entries.drain(desc.len()..) {
                toolkit.remove_child(parent.raw(), entry.state.widget().raw());
                drop(entry);
            }
        }
        Ok(())
    }
}

/// State of a keyed child map.
#[derive(Debug, Default)]
pub struct KeyedChildren {
    entries: IndexMap<String, AnyState>,
}

impl KeyedChildren {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Number of live children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The child state stored under `key`, if any.
    #[must_use]
    pub fn state(&self, key: &str) -> Option<&AnyState> {
        self.entries.get(key)
    }

    /// Converges the map toward the described children.
    ///
    /// Keys absent from the description are detached and torn down first,
    /// so a key that moved between passes never collides with its old
    /// widget. Surviving keys are reconciled in place; new keys are built
    /// and attached in the description's insertion order. A surviving
    /// child with an unchanged description costs no native call.
    ///
    /// # Errors
    ///
    /// Propagates child build and update errors.
    pub fn reconcile(
        &mut self,
        desc: &IndexMap<String, AnyWidget>,
        parent: &NativeWidget,
        env: &Environment,
    ) -> Result<(), Error> {
        let toolkit = Rc::clone(parent.toolkit());

        let gone: Vec<String> = self
            .entries
            .keys()
            .filter(|key| !desc.contains_key(key.as_str()))
            .cloned()
            .collect();
        for key in gone {
            if let Some(state) = self.entries.shift_remove(&key) {
                debug!(key, "keyed child removed");
                toolkit.remove_child(parent.raw(), state.widget().raw());
                drop(state);
            }
        }

        for (key, widget) in desc {
            if let Some(existing) = self.entries.get_mut(key) {
                if let Some(fresh) = widget.reconcile(Some(existing), env)? {
                    // Detach before attach: two children cannot share a key.
                    toolkit.remove_child(parent.raw(), existing.widget().raw());
                    toolkit.add_keyed(parent.raw(), fresh.widget().raw(), key);
                    let old = core::mem::replace(existing, fresh);
                    drop(old);
                }
            } else {
                let fresh = widget.build(env)?;
                toolkit.add_keyed(parent.raw(), fresh.widget().raw(), key);
                self.entries.insert(key.clone(), fresh);
            }
        }
        Ok(())
    }

    /// Recursively pulls read-back values.
    pub fn read(&mut self) {
        for state in self.entries.values_mut() {
            state.read();
        }
    }
}

#[derive(Debug)]
struct GridEntry {
    state: AnyState,
    region: Region,
}

/// State of a grid child list with region bookkeeping.
#[derive(Debug, Default)]
pub struct GridChildren {
    entries: Vec<GridEntry>,
}

impl GridChildren {
    /// An empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of live children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the grid is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converges the grid toward the described children.
    ///
    /// Like the ordered strategy, children match by index, but the cell
    /// region takes part in the comparison: a child whose region changed
    /// is detached and re-attached at the new region with its native
    /// widget and state untouched.
    ///
    /// # Errors
    ///
    /// Propagates child build and update errors.
    pub fn reconcile(
        &mut self,
        desc: &[Child<Region>],
        parent: &NativeWidget,
        env: &Environment,
    ) -> Result<(), Error> {
        let toolkit = Rc::clone(parent.toolkit());
        let shared = desc.len().min(self.entries.len());

        for (index, d) in desc.iter().take(shared).enumerate() {
            let entry = &mut self.entries[index];
            match d.widget.reconcile(Some(&mut entry.state), env)? {
                None => {
                    if entry.region != d.meta {
                        debug!(from = ?entry.region, to = ?d.meta, "grid child moved");
                        toolkit.remove_child(parent.raw(), entry.state.widget().raw());
                        toolkit.attach_grid(parent.raw(), entry.state.widget().raw(), d.meta);
                        entry.region = d.meta;
                    }
                }
                Some(fresh) => {
                    toolkit.remove_child(parent.raw(), entry.state.widget().raw());
                    toolkit.attach_grid(parent.raw(), fresh.widget().raw(), d.meta);
                    let old = core::mem::replace(&mut entry.state, fresh);
                    entry.region = d.meta;
                    drop(old);
                }
            }
        }

        for d in &desc[shared..] {
            let fresh = d.widget.build(env)?;
            toolkit.attach_grid(parent.raw(), fresh.widget().raw(), d.meta);
            self.entries.push(GridEntry {
                state: fresh,
                region: d.meta,
            });
        }

        if self.entries.len() > desc.len() {
            for entry in self.entries.drain(desc.len()..) {
                toolkit.remove_child(parent.raw(), entry.state.widget().raw());
                drop(entry);
            }
        }
        Ok(())
    }

    /// Recursively pulls read-back values.
    pub fn read(&mut self) {
        for entry in &mut self.entries {
            entry.state.read();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ChildLayout;
    use crate::testkit::{MockOp, MockToolkit, block, probe, test_env};

    fn no_meta(_: &NativeWidget, (): &()) {}

    #[test]
    fn test_ordered_identical_second_pass_is_silent() {
        let mock = MockToolkit::new();
        let env = test_env(&mock);
        let parent = env.create("flex");
        let mut children = OrderedChildren::new();

        let desc = vec![Child::new(probe("a"), ()), Child::new(probe("b"), ())];
        children.reconcile(&desc, &parent, &env, no_meta).unwrap();

        mock.take_ops();
        children.reconcile(&desc, &parent, &env, no_meta).unwrap();
        assert!(mock.take_ops().is_empty(), "second pass must be a no-op");
    }

    #[test]
    fn test_ordered_tail_removal_detaches_once() {
        let mock = MockToolkit::new();
        let env = test_env(&mock);
        let parent = env.create("flex");
        let mut children = OrderedChildren::new();

        let three = vec![
            Child::new(probe("a"), ()),
            Child::new(probe("b"), ()),
            Child::new(probe("c"), ()),
        ];
        children.reconcile(&three, &parent, &env, no_meta).unwrap();
        mock.take_ops();

        let two = vec![Child::new(probe("a"), ()), Child::new(probe("c"), ())];
        children.reconcile(&two, &parent, &env, no_meta).unwrap();

        let ops = mock.take_ops();
        let removes = ops
            .iter()
            .filter(|op| matches!(op, MockOp::RemoveChild { .. }))
            .count();
        let creates = ops
            .iter()
            .filter(|op| matches!(op, MockOp::Create { .. }))
            .count();
        assert_eq!(removes, 1, "one surplus child, one detach: {ops:?}");
        assert_eq!(creates, 0, "same kinds must not rebuild: {ops:?}");
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_ordered_rebuild_splices_at_anchor() {
        let mock = MockToolkit::new();
        let env = test_env(&mock);
        let parent = env.create("flex");
        let mut children = OrderedChildren::new();

        let before = vec![Child::new(probe("a"), ()), Child::new(probe("b"), ())];
        children.reconcile(&before, &parent, &env, no_meta).unwrap();
        let anchor = mock.created("probe")[0];
        let replaced = mock.created("probe")[1];
        mock.take_ops();

        let after = vec![Child::new(probe("a"), ()), Child::new(block(), ())];
        children.reconcile(&after, &parent, &env, no_meta).unwrap();

        let ops = mock.take_ops();
        let insert_at = ops
            .iter()
            .position(|op| matches!(op, MockOp::InsertAfter { sibling, .. } if *sibling == Some(anchor)))
            .expect("replacement inserted after the anchor");
        let release_at = ops
            .iter()
            .position(|op| matches!(op, MockOp::Release { widget } if *widget == replaced))
            .expect("old widget released");
        assert!(
            insert_at < release_at,
            "teardown must follow re-attach: {ops:?}"
        );
    }

    #[test]
    fn test_ordered_metadata_reapplied_on_change() {
        let mock = MockToolkit::new();
        let env = test_env(&mock);
        let parent = env.create("flex");
        let mut children = OrderedChildren::new();

        let apply = |widget: &NativeWidget, layout: &ChildLayout| layout.apply(widget);
        let plain = vec![Child::new(probe("a"), ChildLayout::new())];
        children.reconcile(&plain, &parent, &env, apply).unwrap();
        mock.take_ops();

        children.reconcile(&plain, &parent, &env, apply).unwrap();
        assert!(
            mock.take_ops().is_empty(),
            "unchanged metadata must not be re-pushed"
        );

        let expanded = vec![Child::new(probe("a"), ChildLayout::new().expand())];
        children.reconcile(&expanded, &parent, &env, apply).unwrap();
        let ops = mock.take_ops();
        assert!(
            ops.iter()
                .any(|op| matches!(op, MockOp::SetProperty { name, .. } if name == "expand")),
            "changed metadata must be re-applied: {ops:?}"
        );
    }

    #[test]
    fn test_keyed_removal_before_addition() {
        let mock = MockToolkit::new();
        let env = test_env(&mock);
        let parent = env.create("deck");
        let mut children = KeyedChildren::new();

        let mut first = IndexMap::new();
        first.insert("x".to_owned(), AnyWidget::from(probe("x")));
        first.insert("y".to_owned(), AnyWidget::from(probe("y")));
        children.reconcile(&first, &parent, &env).unwrap();
        let x_widget = mock.created("probe")[0];
        let y_widget = mock.created("probe")[1];
        mock.take_ops();

        let mut second = IndexMap::new();
        second.insert("y".to_owned(), AnyWidget::from(probe("y")));
        second.insert("z".to_owned(), AnyWidget::from(probe("z")));
        children.reconcile(&second, &parent, &env).unwrap();

        let ops = mock.take_ops();
        let remove_at = ops
            .iter()
            .position(|op| matches!(op, MockOp::RemoveChild { child, .. } if *child == x_widget))
            .expect("x detached");
        let add_at = ops
            .iter()
            .position(|op| matches!(op, MockOp::AddKeyed { key, .. } if key == "z"))
            .expect("z attached");
        assert!(remove_at < add_at, "removals precede additions: {ops:?}");
        assert!(
            !ops.iter().any(|op| op.touches(y_widget)),
            "survivor y must be untouched: {ops:?}"
        );
    }

    #[test]
    fn test_grid_region_change_reuses_widget() {
        let mock = MockToolkit::new();
        let env = test_env(&mock);
        let parent = env.create("grid");
        let mut children = GridChildren::new();

        let at_origin = vec![Child::new(probe("a"), Region::at(0, 0))];
        children.reconcile(&at_origin, &parent, &env).unwrap();
        let widget = mock.created("probe")[0];
        mock.take_ops();

        let moved = vec![Child::new(probe("a"), Region::at(2, 1))];
        children.reconcile(&moved, &parent, &env).unwrap();

        let ops = mock.take_ops();
        assert_eq!(
            ops,
            vec![
                MockOp::RemoveChild {
                    parent: parent.raw(),
                    child: widget,
                },
                MockOp::AttachGrid {
                    parent: parent.raw(),
                    child: widget,
                    region: Region::at(2, 1),
                },
            ],
            "region move is one detach plus one attach of the same widget"
        );
    }

    #[test]
    fn test_slot_clears_child() {
        let mock = MockToolkit::new();
        let env = test_env(&mock);
        let parent = env.create("frame");
        let mut slot = Slot::new();

        let child = AnyWidget::from(probe("a"));
        slot.reconcile(Some(&child), &parent, &env).unwrap();
        assert!(slot.state().is_some());
        mock.take_ops();

        slot.reconcile(None, &parent, &env).unwrap();
        let ops = mock.take_ops();
        assert!(
            ops.iter()
                .any(|op| matches!(op, MockOp::SetChild { child: None, .. })),
            "clearing the slot must clear the native child: {ops:?}"
        );
        assert!(slot.state().is_none());
    }
}
