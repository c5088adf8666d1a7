//! A widget showing an image loaded from an external source.

use estuary_core::common::{Common, CommonState};
use estuary_core::environment::Environment;
use estuary_core::error::Error;
use estuary_core::property::Tracked;
use estuary_core::toolkit::NativeWidget;
use estuary_core::widget::{Widget, WidgetState};
use estuary_core::{common_setters, setters};
use tracing::debug;

/// Displays an image resource.
///
/// The source is resolved through the toolkit's resource loader when the
/// description first names it and again whenever it changes. A failed load
/// surfaces as an error from the pass; the widget keeps showing the last
/// texture that loaded successfully, and the next pass retries.
///
/// # Usage
///
/// ```ignore
/// image("assets/logo.png")
/// image(avatar_url).size_request(48, 48)
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    common: Common,
    source: Option<String>,
}

impl Image {
    /// An image with no source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    setters! {
        /// Sets the path or URL the texture is loaded from.
        source: String,
    }

    common_setters!();

    fn apply_source(&self, state: &mut ImageState, env: &Environment) -> Result<(), Error> {
        let Some(source) = self.source.as_ref() else {
            return Ok(());
        };
        if state.source.last() == Some(source) {
            return Ok(());
        }
        debug!(source, "loading image texture");
        let texture = env.toolkit().load_image(source)?;
        state.widget.set("texture", texture);
        state.source.store(source.clone());
        Ok(())
    }
}

/// Creates an image loaded from the given source.
#[must_use]
pub fn image(source: impl Into<String>) -> Image {
    Image::new().source(source)
}

/// Live state for [`Image`].
#[derive(Debug)]
pub struct ImageState {
    common: CommonState,
    source: Tracked<String>,
    widget: NativeWidget,
}

impl Widget for Image {
    const NAME: &'static str = "image";
    type State = ImageState;

    fn build(&self, env: &Environment) -> Result<ImageState, Error> {
        let mut state = ImageState {
            common: CommonState::default(),
            source: Tracked::new(),
            widget: env.create(Self::NAME),
        };
        state.common.sync(&self.common, &state.widget);
        self.apply_source(&mut state, env)?;
        Ok(state)
    }

    fn update(&self, state: &mut ImageState, env: &Environment) -> Result<(), Error> {
        state.common.sync(&self.common, &state.widget);
        self.apply_source(state, env)
    }
}

impl WidgetState for ImageState {
    fn widget(&self) -> &NativeWidget {
        &self.widget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estuary_core::app::AppHandle;
    use estuary_core::toolkit::{TextureId, Value};
    use estuary_core::widget::AnyWidget;
    use estuary_headless::{Headless, Op};
    use std::rc::Rc;

    fn test_env(toolkit: &Headless) -> Environment {
        Environment::new(Rc::new(toolkit.clone()), AppHandle::detached())
    }

    #[test]
    fn test_source_loads_once() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        let mut state = AnyWidget::from(image("logo.png")).build(&env).unwrap();
        toolkit.take_ops();

        AnyWidget::from(image("logo.png"))
            .reconcile(Some(&mut state), &env)
            .unwrap();
        assert!(toolkit.take_ops().is_empty(), "unchanged source must not reload");
    }

    #[test]
    fn test_changed_source_reloads() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        let mut state = AnyWidget::from(image("a.png")).build(&env).unwrap();
        toolkit.take_ops();

        AnyWidget::from(image("b.png"))
            .reconcile(Some(&mut state), &env)
            .unwrap();
        let loads = toolkit
            .take_ops()
            .into_iter()
            .filter(|op| matches!(op, Op::LoadImage { .. }))
            .count();
        assert_eq!(loads, 1);
    }

    #[test]
    fn test_failed_load_keeps_last_texture() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        let mut state = AnyWidget::from(image("good.png")).build(&env).unwrap();
        let widget = toolkit.find("image").unwrap();
        let shown = toolkit.value(widget, "texture");
        assert_eq!(shown, Some(Value::Texture(TextureId(1))));

        toolkit.fail_image("broken.png");
        let result = AnyWidget::from(image("broken.png")).reconcile(Some(&mut state), &env);
        assert!(result.is_err());
        assert_eq!(toolkit.value(widget, "texture"), shown, "texture unchanged");
    }

    #[test]
    fn test_failed_load_retries_on_next_pass() {
        let toolkit = Headless::new();
        let env = test_env(&toolkit);
        toolkit.fail_image("flaky.png");
        let mut state = AnyWidget::from(image("ok.png")).build(&env).unwrap();

        assert!(
            AnyWidget::from(image("flaky.png"))
                .reconcile(Some(&mut state), &env)
                .is_err()
        );
        toolkit.take_ops();

        AnyWidget::from(image("flaky.png"))
            .reconcile(Some(&mut state), &env)
            .unwrap_err();
        let loads = toolkit
            .take_ops()
            .into_iter()
            .filter(|op| matches!(op, Op::LoadImage { .. }))
            .count();
        assert_eq!(loads, 1, "a failed source is retried, not cached");
    }
}
