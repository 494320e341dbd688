pub mod app;
pub mod auth;
pub mod dashboard;
pub mod fleet;
pub mod modal;

use leptos::*;

/// Raises a busy flag and lowers it again when dropped, whether the
/// operation finished, failed or was abandoned mid-await.
pub(crate) struct BusyGuard(RwSignal<bool>);

impl BusyGuard {
    pub(crate) fn hold(flag: RwSignal<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let _ = self.0.try_set(false);
    }
}
