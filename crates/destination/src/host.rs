//! Host collaborator traits — the application surface the host analytics
//! client exposes to destination adapters.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::screen::ScreenHandle;

/// Application context handed to the engagement SDK at configure time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    /// Host application identifier (package/bundle id).
    pub application_id: String,
}

/// Lifecycle notifications for foregrounded UI screens.
pub trait ScreenObserver: Send + Sync {
    fn screen_created(&self, screen: &ScreenHandle);
    fn screen_destroyed(&self, screen: &ScreenHandle);
}

/// Host application surface consumed by destination adapters.
pub trait HostApplication: Send + Sync {
    /// Current application context; `None` until the host client is fully
    /// initialized.
    fn application_context(&self) -> Option<AppContext>;

    /// Register an observer for screen lifecycle notifications.
    fn register_screen_observer(&self, observer: Arc<dyn ScreenObserver>);
}

/// Embeddable host implementation: stores registered observers and lets the
/// embedder fire lifecycle notifications. Used by tests and sample hosts.
pub struct InProcessHost {
    context: Option<AppContext>,
    observers: Mutex<Vec<Arc<dyn ScreenObserver>>>,
}

impl InProcessHost {
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            context: Some(AppContext {
                application_id: application_id.into(),
            }),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Host with no application context, for exercising aborted
    /// initialization.
    pub fn uninitialized() -> Self {
        Self {
            context: None,
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.lock().len()
    }

    /// Notify every registered observer that a screen was created.
    pub fn notify_screen_created(&self, screen: &ScreenHandle) {
        let observers = self.observers.lock().clone();
        for observer in observers {
            observer.screen_created(screen);
        }
    }

    /// Notify every registered observer that a screen was destroyed.
    pub fn notify_screen_destroyed(&self, screen: &ScreenHandle) {
        let observers = self.observers.lock().clone();
        for observer in observers {
            observer.screen_destroyed(screen);
        }
    }
}

impl HostApplication for InProcessHost {
    fn application_context(&self) -> Option<AppContext> {
        self.context.clone()
    }

    fn register_screen_observer(&self, observer: Arc<dyn ScreenObserver>) {
        self.observers.lock().push(observer);
    }
}
