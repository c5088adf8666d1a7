//! The boundary between the framework and the native widget toolkit.
//!
//! Everything the framework does to real widgets goes through the
//! [`Toolkit`] trait: an object-safe, side-effecting API modeled on the C
//! surface of retained-mode toolkits (create, set property, connect signal,
//! attach child, present window). The framework never inspects native
//! widgets directly; it only holds opaque [`RawWidget`] ids wrapped in
//! reference-counted [`NativeWidget`] handles.

use core::fmt;
use core::num::NonZeroU64;
use std::rc::Rc;

use crate::error::ToolkitError;
use crate::event::Connection;
use crate::layout::Region;

/// Opaque identifier of a widget inside the native toolkit.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawWidget(NonZeroU64);

impl RawWidget {
    /// Wraps a toolkit-issued id.
    #[must_use]
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// The numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for RawWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawWidget(#{})", self.0)
    }
}

/// Identifier of a live signal connection, issued by [`Toolkit::connect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u64);

/// Identifier of a texture uploaded through [`Toolkit::load_image`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// A property value crossing the toolkit boundary.
///
/// The framework pushes values with [`Toolkit::set_property`] and pulls them
/// back with [`Toolkit::property`]; signals deliver their payload in the
/// same shape.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// No payload.
    #[default]
    Unit,
    /// A boolean property such as `sensitive`.
    Bool(bool),
    /// An integral property such as `margin`.
    Int(i64),
    /// A floating-point property such as a slider position.
    Float(f64),
    /// A textual property such as a label.
    Text(String),
    /// A texture reference produced by resource loading.
    Texture(TextureId),
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Unit
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<TextureId> for Value {
    fn from(value: TextureId) -> Self {
        Self::Texture(value)
    }
}

/// Conversion out of a toolkit [`Value`].
///
/// Used by read-back cells to translate pulled property values; a shape
/// mismatch yields `None` and the cell keeps its previous value.
pub trait FromValue: Sized {
    /// Extracts `Self` when the value carries the matching shape.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as Self),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Toolkit feature level, resolved once at application start.
///
/// Widget kinds consult this for properties that only newer toolkit
/// releases understand, instead of branching at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Major toolkit version.
    pub major: u32,
    /// Minor toolkit version.
    pub minor: u32,
}

impl Capabilities {
    /// Creates a capability descriptor for the given toolkit version.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Whether the toolkit is at least the given version.
    #[must_use]
    pub const fn at_least(self, major: u32, minor: u32) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }
}

/// Answer of a concluded modal dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    /// The affirmative dialog button.
    Accept,
    /// The negative dialog button.
    Reject,
    /// The dialog was dismissed without choosing a button.
    Close,
    /// A toolkit- or application-defined response code.
    Other(i32),
}

/// Handler installed on a native signal.
///
/// Receives the signal payload and answers the toolkit; most signals ignore
/// the answer, veto-style signals such as window close requests read it as
/// a boolean.
pub type SignalHandler = Box<dyn Fn(&Value) -> Value>;

/// The native toolkit as seen by the framework.
///
/// All methods take `&self`; implementations use interior mutability. The
/// whole API is single-threaded by contract.
pub trait Toolkit {
    /// Reports the toolkit feature level.
    fn capabilities(&self) -> Capabilities;

    /// Creates a native widget of the given class.
    fn create(&self, class: &str) -> RawWidget;

    /// Drops the framework's reference to a widget. The toolkit frees the
    /// widget once it is unreferenced and detached.
    fn release(&self, widget: RawWidget);

    /// Writes a property.
    fn set_property(&self, widget: RawWidget, name: &str, value: Value);

    /// Reads a property back.
    fn property(&self, widget: RawWidget, name: &str) -> Value;

    /// Installs a signal handler and returns the id that disconnects it.
    fn connect(&self, widget: RawWidget, signal: &str, handler: SignalHandler) -> ConnectionId;

    /// Removes a previously installed signal handler.
    fn disconnect(&self, widget: RawWidget, id: ConnectionId);

    /// Sets or clears the single child of a one-child widget.
    fn set_child(&self, parent: RawWidget, child: Option<RawWidget>);

    /// Appends a child at the end of an ordered container.
    fn append(&self, parent: RawWidget, child: RawWidget);

    /// Inserts a child directly after `sibling`, or first when `sibling`
    /// is `None`.
    fn insert_after(&self, parent: RawWidget, child: RawWidget, sibling: Option<RawWidget>);

    /// Detaches a child from its parent without releasing it.
    fn remove_child(&self, parent: RawWidget, child: RawWidget);

    /// Attaches a child to a cell region of a grid container.
    fn attach_grid(&self, parent: RawWidget, child: RawWidget, region: Region);

    /// Adds a child under a key in a keyed container.
    fn add_keyed(&self, parent: RawWidget, child: RawWidget, key: &str);

    /// Adds a response button to a dialog.
    fn add_button(&self, dialog: RawWidget, label: &str, response: Response);

    /// Loads an external image resource into a texture.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolkitError`] when the resource cannot be loaded.
    fn load_image(&self, source: &str) -> Result<TextureId, ToolkitError>;

    /// Presents a top-level window.
    fn present(&self, window: RawWidget);

    /// Runs a nested event loop until the dialog concludes.
    fn run_modal(&self, dialog: RawWidget) -> Response;

    /// Runs the outer event loop until the application quits.
    fn run(&self);

    /// Asks the outer event loop to stop.
    fn quit(&self);
}

struct Handle {
    raw: RawWidget,
    class: &'static str,
    toolkit: Rc<dyn Toolkit>,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.toolkit.release(self.raw);
    }
}

/// Shared handle to one native widget.
///
/// Clones share the same underlying widget; the framework's toolkit
/// reference is released when the last clone drops. State nodes own exactly
/// one handle each, with extra clones existing only transiently while a
/// widget is re-parented or referenced by its own signal connections.
#[derive(Clone)]
pub struct NativeWidget(Rc<Handle>);

impl NativeWidget {
    /// Creates a native widget of `class` and wraps it in a fresh handle.
    #[must_use]
    pub fn create(toolkit: &Rc<dyn Toolkit>, class: &'static str) -> Self {
        let raw = toolkit.create(class);
        Self(Rc::new(Handle {
            raw,
            class,
            toolkit: Rc::clone(toolkit),
        }))
    }

    /// The toolkit id of this widget.
    #[must_use]
    pub fn raw(&self) -> RawWidget {
        self.0.raw
    }

    /// The class tag the widget was created with.
    #[must_use]
    pub fn class(&self) -> &'static str {
        self.0.class
    }

    /// The toolkit this widget lives in.
    #[must_use]
    pub fn toolkit(&self) -> &Rc<dyn Toolkit> {
        &self.0.toolkit
    }

    /// Writes a property on this widget.
    pub fn set(&self, property: &str, value: impl Into<Value>) {
        self.0.toolkit.set_property(self.0.raw, property, value.into());
    }

    /// Reads a property back from this widget.
    #[must_use]
    pub fn get(&self, property: &str) -> Value {
        self.0.toolkit.property(self.0.raw, property)
    }

    /// Installs a signal handler, returning the connection that owns it.
    ///
    /// Dropping the returned [`Connection`] disconnects the handler.
    #[must_use]
    pub fn connect(&self, signal: &str, handler: SignalHandler) -> Connection {
        let id = self.0.toolkit.connect(self.0.raw, signal, handler);
        Connection::new(self.clone(), id)
    }

    /// Whether two handles refer to the same native widget.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NativeWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeWidget({} {:?})", self.0.class, self.0.raw)
    }
}
