//! Widget descriptions, live state, and type erasure.
//!
//! A widget kind is a pair of types: an immutable description implementing
//! [`Widget`] and the mutable state it builds, implementing
//! [`WidgetState`]. Containers and the application hold them type-erased
//! as [`AnyWidget`] and [`AnyState`]; kind identity is recovered by
//! downcasting the state, which is what decides between updating in place
//! and rebuilding.

use core::any::Any;
use core::fmt;

use crate::environment::Environment;
use crate::error::Error;
use crate::toolkit::NativeWidget;

/// An immutable description of one widget.
///
/// Descriptions carry explicitly-set properties as `Option` fields: an
/// absent field means "do not touch". Building and updating must apply
/// properties in the same order, so a rebuilt widget converges to the same
/// native state an updated one would have.
pub trait Widget: 'static {
    /// Class tag passed to the toolkit; also names the kind in errors
    /// and logs.
    const NAME: &'static str;

    /// The live state this description builds.
    type State: WidgetState;

    /// Builds fresh native state for this description.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when a child description is structurally
    /// invalid or a native operation fails.
    fn build(&self, env: &Environment) -> Result<Self::State, Error>;

    /// Converges existing state of the same kind toward this description.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when a child description is structurally
    /// invalid or a native operation fails; the state keeps the values
    /// applied before the failure.
    fn update(&self, state: &mut Self::State, env: &Environment) -> Result<(), Error>;
}

/// A live tree node owning one native widget.
pub trait WidgetState: Any {
    /// The native widget this node owns.
    fn widget(&self) -> &NativeWidget;

    /// Pulls current native values into read-back cells, recursively.
    ///
    /// Called when a modal dialog concludes, so values the user edited
    /// are harvested before the subtree is torn down.
    fn read(&mut self) {}
}

trait DynWidget {
    fn name(&self) -> &'static str;
    fn build_state(&self, env: &Environment) -> Result<AnyState, Error>;
    /// `Ok(false)` when the state is of a different kind.
    fn update_state(&self, state: &mut AnyState, env: &Environment) -> Result<bool, Error>;
}

struct Erased<W>(W);

impl<W: Widget> DynWidget for Erased<W> {
    fn name(&self) -> &'static str {
        W::NAME
    }

    fn build_state(&self, env: &Environment) -> Result<AnyState, Error> {
        Ok(AnyState::new(self.0.build(env)?))
    }

    fn update_state(&self, state: &mut AnyState, env: &Environment) -> Result<bool, Error> {
        match state.downcast_mut::<W::State>() {
            Some(state) => {
                self.0.update(state, env)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// A type-erased widget description.
pub struct AnyWidget(Box<dyn DynWidget>);

impl AnyWidget {
    /// Erases a description.
    pub fn new<W: Widget>(widget: W) -> Self {
        Self(Box::new(Erased(widget)))
    }

    /// The kind tag of the erased description.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub(crate) fn build_state(&self, env: &Environment) -> Result<AnyState, Error> {
        self.0.build_state(env)
    }

    pub(crate) fn update_state(
        &self,
        state: &mut AnyState,
        env: &Environment,
    ) -> Result<bool, Error> {
        self.0.update_state(state, env)
    }
}

impl<W: Widget> From<W> for AnyWidget {
    fn from(widget: W) -> Self {
        Self::new(widget)
    }
}

impl fmt::Debug for AnyWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyWidget({})", self.name())
    }
}

/// A type-erased live state node.
pub struct AnyState(Box<dyn WidgetState>);

impl AnyState {
    /// Erases a state node.
    pub fn new<S: WidgetState>(state: S) -> Self {
        Self(Box::new(state))
    }

    /// The native widget owned by this node.
    #[must_use]
    pub fn widget(&self) -> &NativeWidget {
        self.0.widget()
    }

    /// The class tag of the owned native widget.
    #[must_use]
    pub fn class(&self) -> &'static str {
        self.0.widget().class()
    }

    /// Pulls current native values into read-back cells, recursively.
    pub fn read(&mut self) {
        self.0.read();
    }

    /// Whether this node holds state of kind `S`.
    #[must_use]
    pub fn is<S: WidgetState>(&self) -> bool {
        (&*self.0 as &dyn Any).is::<S>()
    }

    /// Borrows the node as concrete state of kind `S`.
    #[must_use]
    pub fn downcast_ref<S: WidgetState>(&self) -> Option<&S> {
        (&*self.0 as &dyn Any).downcast_ref()
    }

    /// Mutably borrows the node as concrete state of kind `S`.
    pub fn downcast_mut<S: WidgetState>(&mut self) -> Option<&mut S> {
        (&mut *self.0 as &mut dyn Any).downcast_mut()
    }
}

impl fmt::Debug for AnyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyState({:?})", self.0.widget())
    }
}
