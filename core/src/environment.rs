//! Context threaded through build and update passes.

use core::fmt;
use std::rc::Rc;

use crate::app::AppHandle;
use crate::toolkit::{Capabilities, NativeWidget, Toolkit};

/// Everything a widget needs while building or updating.
///
/// Carries the toolkit, the application back-reference handed to
/// trampolines, and the toolkit feature level resolved once at
/// construction.
#[derive(Clone)]
pub struct Environment {
    toolkit: Rc<dyn Toolkit>,
    capabilities: Capabilities,
    app: AppHandle,
}

impl Environment {
    /// Creates an environment over a toolkit, resolving its capabilities.
    #[must_use]
    pub fn new(toolkit: Rc<dyn Toolkit>, app: AppHandle) -> Self {
        let capabilities = toolkit.capabilities();
        Self {
            toolkit,
            capabilities,
            app,
        }
    }

    /// The toolkit widgets are built against.
    #[must_use]
    pub fn toolkit(&self) -> &Rc<dyn Toolkit> {
        &self.toolkit
    }

    /// Creates a native widget of `class` in this environment's toolkit.
    #[must_use]
    pub fn create(&self, class: &'static str) -> NativeWidget {
        NativeWidget::create(&self.toolkit, class)
    }

    /// The toolkit feature level.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The application this pass belongs to.
    #[must_use]
    pub const fn handle(&self) -> &AppHandle {
        &self.app
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
