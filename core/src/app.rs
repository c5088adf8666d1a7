//! The application object: owns the root state, collapses redraw
//! requests, and runs the modal dialog flow.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::environment::Environment;
use crate::error::Error;
use crate::toolkit::{Response, Toolkit};
use crate::widget::{AnyState, AnyWidget};

struct Shared {
    environment: Environment,
    view: RefCell<Box<dyn FnMut() -> AnyWidget>>,
    root: RefCell<Option<AnyState>>,
    pending: Cell<bool>,
    rendering: Cell<bool>,
}

/// A running application.
///
/// Owns the view function and the root live state. Each render pass calls
/// the view function for a fresh description and reconciles it against the
/// root state; the first pass builds and presents the root.
pub struct App {
    shared: Rc<Shared>,
}

impl App {
    /// Creates an application over a toolkit and a root view function.
    ///
    /// The view function is called once per render pass and returns the
    /// root description, typically a window kind.
    pub fn new(
        toolkit: impl Toolkit + 'static,
        view: impl FnMut() -> AnyWidget + 'static,
    ) -> Self {
        let toolkit: Rc<dyn Toolkit> = Rc::new(toolkit);
        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| Shared {
            environment: Environment::new(toolkit, AppHandle {
                shared: weak.clone(),
            }),
            view: RefCell::new(Box::new(view)),
            root: RefCell::new(None),
            pending: Cell::new(false),
            rendering: Cell::new(false),
        });
        Self { shared }
    }

    /// A weak handle for requesting redraws from trampolines and tests.
    #[must_use]
    pub fn handle(&self) -> AppHandle {
        AppHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// The environment passes run in.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.shared.environment
    }

    /// Builds and presents the root, then runs the toolkit's event loop
    /// until the application quits.
    ///
    /// # Errors
    ///
    /// Returns the error of the initial build pass; a root that cannot be
    /// built leaves nothing to run.
    pub fn run(&self) -> Result<(), Error> {
        debug!("starting application");
        let handle = self.handle();
        handle.request_redraw()?;
        handle.flush()?;
        self.shared.environment.toolkit().run();
        Ok(())
    }

    /// Asks the toolkit's outer event loop to stop.
    pub fn quit(&self) {
        self.shared.environment.toolkit().quit();
    }

    /// Opens a modal dialog and blocks on a nested event loop until it
    /// concludes.
    ///
    /// The dialog subtree is built fresh, presented, and pumped by the
    /// toolkit. On conclusion its read-back cells are harvested and the
    /// subtree is torn down; values survive in [`Live`] cells the caller
    /// bound into the description.
    ///
    /// [`Live`]: crate::property::Live
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when building the dialog fails.
    pub fn open(&self, dialog: impl Into<AnyWidget>) -> Result<Response, Error> {
        let dialog = dialog.into();
        debug!(kind = dialog.name(), "opening modal dialog");
        let toolkit = Rc::clone(self.shared.environment.toolkit());
        let mut state = dialog.build(&self.shared.environment)?;
        toolkit.present(state.widget().raw());
        let response = toolkit.run_modal(state.widget().raw());
        state.read();
        drop(state);
        debug!(?response, "modal dialog concluded");
        // Events inside the nested loop may have left a redraw pending.
        self.handle().flush()?;
        Ok(response)
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("pending", &self.shared.pending.get())
            .finish_non_exhaustive()
    }
}

/// Non-owning handle to a running application.
///
/// Held by every state node and every trampoline. Requests made after the
/// application is gone fail with [`Error::MissingApplication`].
#[derive(Clone)]
pub struct AppHandle {
    shared: Weak<Shared>,
}

impl AppHandle {
    /// A handle attached to no application; every request fails.
    ///
    /// Useful for building widget trees in tests without an [`App`].
    #[must_use]
    pub fn detached() -> Self {
        Self {
            shared: Weak::new(),
        }
    }

    /// Marks the tree dirty. Collapses with other pending requests.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingApplication`] when the application is
    /// gone.
    pub fn request_redraw(&self) -> Result<(), Error> {
        let shared = self.shared.upgrade().ok_or(Error::MissingApplication)?;
        trace!("redraw requested");
        shared.pending.set(true);
        Ok(())
    }

    /// Runs at most one render pass if a request is pending.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingApplication`] when the application is
    /// gone, or with the render pass error.
    pub fn flush(&self) -> Result<(), Error> {
        let shared = self.shared.upgrade().ok_or(Error::MissingApplication)?;
        if shared.rendering.get() {
            // A pass is on the stack; it will see the pending flag.
            return Ok(());
        }
        if !shared.pending.replace(false) {
            return Ok(());
        }
        shared.rendering.set(true);
        let result = render(&shared);
        shared.rendering.set(false);
        result
    }

    /// Requests a redraw and flushes it: the tail of every trampoline.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`request_redraw`](Self::request_redraw) and
    /// [`flush`](Self::flush).
    pub fn redraw(&self) -> Result<(), Error> {
        self.request_redraw()?;
        self.flush()
    }
}

impl fmt::Debug for AppHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alive = self.shared.strong_count() > 0;
        f.debug_struct("AppHandle").field("alive", &alive).finish()
    }
}

fn render(shared: &Shared) -> Result<(), Error> {
    trace!("render pass starting");
    let description = (shared.view.borrow_mut())();
    let mut root = shared.root.borrow_mut();
    match root.as_mut() {
        Some(state) => {
            if let Some(fresh) = description.reconcile(Some(state), &shared.environment)? {
                shared.environment.toolkit().present(fresh.widget().raw());
                let old = core::mem::replace(state, fresh);
                drop(old);
            }
        }
        None => {
            let fresh = description.build(&shared.environment)?;
            shared.environment.toolkit().present(fresh.widget().raw());
            *root = Some(fresh);
        }
    }
    Ok(())
}
