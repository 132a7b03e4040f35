//! Active-screen session state — which UI screen is currently foregrounded,
//! and the observer that clears the reference when that screen is destroyed.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::host::ScreenObserver;

/// Handle to a foregrounded UI screen.
///
/// Identity is reference equality: two handles are the same screen only if
/// they are clones of one `new` call, so a fresh screen reusing a name never
/// matches a stale handle.
#[derive(Clone)]
pub struct ScreenHandle {
    inner: Arc<ScreenInner>,
}

struct ScreenInner {
    name: String,
}

impl ScreenHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ScreenInner { name: name.into() }),
        }
    }

    /// Display name of the screen, for diagnostics only.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Reference equality: true only for clones of the same handle.
    pub fn same_screen(&self, other: &ScreenHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for ScreenHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_screen(other)
    }
}

impl Eq for ScreenHandle {}

impl fmt::Debug for ScreenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenHandle")
            .field("name", &self.inner.name)
            .finish()
    }
}

/// Shared reference to the currently foregrounded screen. Written from the
/// host's lifecycle path and read at dispatch time, so access is
/// mutex-synchronized rather than ambient global state.
#[derive(Clone, Default)]
pub struct ActiveScreen {
    current: Arc<Mutex<Option<ScreenHandle>>>,
}

impl ActiveScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, screen: Option<ScreenHandle>) {
        *self.current.lock() = screen;
    }

    pub fn current(&self) -> Option<ScreenHandle> {
        self.current.lock().clone()
    }

    pub fn is_set(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Clear the reference only when `screen` is the tracked one. Returns
    /// whether anything was cleared.
    pub fn clear_if(&self, screen: &ScreenHandle) -> bool {
        let mut current = self.current.lock();
        match current.as_ref() {
            Some(active) if active.same_screen(screen) => {
                *current = None;
                true
            }
            _ => false,
        }
    }
}

/// Screen observer that drops the active reference when the tracked screen
/// is destroyed.
pub(crate) struct ClearOnDestroy {
    active: ActiveScreen,
}

impl ClearOnDestroy {
    pub(crate) fn new(active: ActiveScreen) -> Self {
        Self { active }
    }
}

impl ScreenObserver for ClearOnDestroy {
    fn screen_created(&self, _screen: &ScreenHandle) {}

    fn screen_destroyed(&self, screen: &ScreenHandle) {
        if self.active.clear_if(screen) {
            debug!(screen = screen.name(), "cleared active screen on destroy");
        }
    }
}
