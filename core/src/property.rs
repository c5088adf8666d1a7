//! Last-applied property tracking.
//!
//! Pure properties flow one way: the description proposes a value, the
//! state remembers what was last pushed, and the push is skipped when the
//! two already agree. Read-back properties flow both ways and live in a
//! shared [`Live`] cell so the signal trampoline can store values the user
//! changed on the native side.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use crate::toolkit::{FromValue, NativeWidget};

/// Last-applied wrapper for one pure property.
///
/// An absent desired value means "do not touch": the property keeps
/// whatever the toolkit default or the last push left behind.
#[derive(Debug, Clone, Default)]
pub struct Tracked<T> {
    value: Option<T>,
}

impl<T> Tracked<T> {
    /// A cell that has never pushed a value.
    #[must_use]
    pub const fn new() -> Self {
        Self { value: None }
    }

    /// The last value pushed or stored, if any.
    #[must_use]
    pub const fn last(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Overwrites the cached value without touching the toolkit.
    ///
    /// Used when a value is read back from the native side, so the next
    /// sync does not re-push what the toolkit already has.
    pub fn store(&mut self, value: T) {
        self.value = Some(value);
    }
}

impl<T: Clone + PartialEq> Tracked<T> {
    /// Pushes `desired` through `push` unless it equals the last-applied
    /// value. Does nothing when `desired` is absent.
    pub fn sync(&mut self, desired: Option<&T>, mut push: impl FnMut(&T)) {
        let Some(desired) = desired else { return };
        if self.value.as_ref() != Some(desired) {
            push(desired);
            self.value = Some(desired.clone());
        }
    }

    /// Clones out the cached value.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.value.clone()
    }
}

/// Shared read-back cell for a property the native side can change.
///
/// Clones share one cell. A state node keeps one clone; its trampolines
/// keep others; application code may keep a clone to harvest values after
/// a modal dialog concludes.
pub struct Live<T> {
    inner: Rc<RefCell<Tracked<T>>>,
}

impl<T> Live<T> {
    /// A fresh, empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Tracked::new())),
        }
    }

    /// Stores a value without touching the toolkit.
    pub fn store(&self, value: T) {
        self.inner.borrow_mut().store(value);
    }
}

impl<T: Clone + PartialEq> Live<T> {
    /// Pushes `desired` through `push` unless it equals the cell's value.
    pub fn sync(&self, desired: Option<&T>, push: impl FnMut(&T)) {
        self.inner.borrow_mut().sync(desired, push);
    }

    /// The latest known value, pushed or read back.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.inner.borrow().get()
    }
}

impl<T: FromValue + Clone + PartialEq + fmt::Debug> Live<T> {
    /// Pulls the named property from the toolkit into this cell.
    ///
    /// A payload of the wrong shape is logged and ignored; the cell keeps
    /// its previous value.
    pub fn pull(&self, widget: &NativeWidget, property: &str) -> Option<T> {
        let value = widget.get(property);
        match T::from_value(&value) {
            Some(pulled) => {
                self.store(pulled.clone());
                Some(pulled)
            }
            None => {
                tracing::warn!(property, ?value, "read-back value has unexpected shape");
                None
            }
        }
    }
}

impl<T> Clone for Live<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Live<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Live<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Live").field(&self.inner.borrow().value).finish()
    }
}
