//! The reconciliation entry point.
//!
//! One rule decides everything: if the existing state is of the same kind
//! as the description, update it in place; otherwise build fresh state and
//! hand it back to the caller. The caller attaches the fresh native widget
//! where the old one was and tears the old state down only afterwards, so
//! the subtree never disappears from screen between detach and re-attach.

use tracing::{debug, trace};

use crate::environment::Environment;
use crate::error::Error;
use crate::widget::{AnyState, AnyWidget};

impl AnyWidget {
    /// Reconciles this description against existing state.
    ///
    /// Returns `Ok(None)` when the state was updated in place. Returns
    /// `Ok(Some(fresh))` when new state was built, either because there
    /// was no existing state or because the kinds differ; the caller must
    /// splice `fresh`'s native widget into the tree and then drop the old
    /// state.
    ///
    /// # Errors
    ///
    /// Propagates build and update errors; on error no replacement
    /// happened and the existing state is still attached.
    pub fn reconcile(
        &self,
        state: Option<&mut AnyState>,
        env: &Environment,
    ) -> Result<Option<AnyState>, Error> {
        if let Some(state) = state {
            if self.update_state(state, env)? {
                trace!(kind = self.name(), "updated in place");
                return Ok(None);
            }
            debug!(
                from = state.class(),
                to = self.name(),
                "widget kind changed; building replacement"
            );
        }
        self.build(env).map(Some)
    }

    /// Builds fresh state for this description.
    ///
    /// # Errors
    ///
    /// Propagates the kind's build error.
    pub fn build(&self, env: &Environment) -> Result<AnyState, Error> {
        trace!(kind = self.name(), "building");
        self.build_state(env)
    }
}

#[cfg(test)]
mod tests {
    use crate::testkit::{MockOp, MockToolkit, block, probe, test_env};
    use crate::toolkit::Value;
    use crate::widget::AnyWidget;

    #[test]
    fn test_same_kind_updates_in_place() {
        let mock = MockToolkit::new();
        let env = test_env(&mock);
        let mut state = AnyWidget::from(probe("a")).build(&env).unwrap();
        mock.take_ops();

        let outcome = AnyWidget::from(probe("b"))
            .reconcile(Some(&mut state), &env)
            .unwrap();
        assert!(outcome.is_none(), "same kind must not rebuild");

        let ops = mock.take_ops();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            MockOp::SetProperty { name, value: Value::Text(tag), .. }
                if name == "tag" && tag == "b"
        ));
    }

    #[test]
    fn test_kind_mismatch_builds_replacement() {
        let mock = MockToolkit::new();
        let env = test_env(&mock);
        let mut state = AnyWidget::from(probe("a")).build(&env).unwrap();

        let outcome = AnyWidget::from(block())
            .reconcile(Some(&mut state), &env)
            .unwrap();
        let fresh = outcome.expect("different kind must build fresh state");
        assert_eq!(fresh.class(), "block");
        assert_eq!(state.class(), "probe", "caller still owns the old state");
    }

    #[test]
    fn test_missing_state_always_builds() {
        let mock = MockToolkit::new();
        let env = test_env(&mock);
        let outcome = AnyWidget::from(probe("a")).reconcile(None, &env).unwrap();
        assert!(outcome.is_some());
    }
}
