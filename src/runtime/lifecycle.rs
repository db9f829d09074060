use parking_lot::Mutex;

use crate::foundation::error::VizResult;
use crate::model::options::OptionsMapping;
use crate::runtime::backend::RenderRuntime;

/// State of a [`BackendLifecycle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// Runtime not bootstrapped yet.
    Uninitialized,
    /// Bootstrap done; terminal for the life of the lifecycle object.
    Initialized,
}

/// Tracks the one-time bootstrap of a rendering runtime.
///
/// The `Uninitialized -> Initialized` transition happens under a lock, so concurrent first
/// callers bootstrap exactly once. A failed bootstrap leaves the state untouched.
#[derive(Debug)]
pub struct BackendLifecycle {
    state: Mutex<LifecycleState>,
}

impl Default for BackendLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendLifecycle {
    /// Fresh lifecycle in [`LifecycleState::Uninitialized`].
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LifecycleState::Uninitialized),
        }
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        *self.state.lock()
    }

    /// Whether the bootstrap already ran.
    pub fn is_initialized(&self) -> bool {
        self.state() == LifecycleState::Initialized
    }

    /// Resolve `runtime` and bootstrap it on first use.
    ///
    /// Resolution runs on every call; the bootstrap only runs once.
    pub fn validate(&self, runtime: &dyn RenderRuntime, options: &OptionsMapping) -> VizResult<()> {
        runtime.probe()?;

        let mut state = self.state.lock();
        if *state == LifecycleState::Initialized {
            return Ok(());
        }
        runtime.bootstrap(options)?;
        *state = LifecycleState::Initialized;
        tracing::debug!(backend = runtime.name(), "rendering runtime initialized");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/lifecycle.rs"]
mod tests;
