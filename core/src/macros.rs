/// Generates `#[must_use]` builder methods that fill `Option` fields.
///
/// Widget descriptions carry explicitly-set properties as `Option` fields;
/// this macro writes the one builder method per field that every kind
/// repeats.
///
/// # Usage
///
/// ```ignore
/// impl Label {
///     setters! {
///         /// Sets the displayed text.
///         text: String,
///         /// Enables line wrapping.
///         wrap: bool,
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    ($($(#[$doc:meta])* $name:ident: $ty:ty),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(mut self, value: impl Into<$ty>) -> Self {
                self.$name = Some(value.into());
                self
            }
        )+
    };
}

/// Generates the builder methods for the common property block.
///
/// Expects the surrounding type to have a `common` field of type
/// [`Common`](crate::common::Common).
///
/// # Usage
///
/// ```ignore
/// impl Button {
///     common_setters!();
/// }
/// ```
#[macro_export]
macro_rules! common_setters {
    () => {
        /// Enables or disables user interaction.
        #[must_use]
        pub fn sensitive(mut self, sensitive: bool) -> Self {
            self.common.sensitive = Some(sensitive);
            self
        }

        /// Sets the hover tooltip text.
        #[must_use]
        pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
            self.common.tooltip = Some(tooltip.into());
            self
        }

        /// Sets a uniform margin around the widget, in logical pixels.
        #[must_use]
        pub fn margin(mut self, margin: i32) -> Self {
            self.common.margin = Some(margin);
            self
        }

        /// Requests a minimum size, in logical pixels.
        #[must_use]
        pub fn size_request(mut self, width: i32, height: i32) -> Self {
            self.common.size_request = Some((width, height));
            self
        }
    };
}
