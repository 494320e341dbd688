//! Client-side data layer of the investor dashboard: authentication, fleet
//! and dashboard stores, the vehicle modal and the pt-BR view helpers the
//! pages bind to.

pub mod api;
pub mod config;
pub mod demo;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, ApiError};
pub use state::{
    app::{
        provide_app_context, use_app_context, use_auth, use_dashboard, use_fleet, use_modal,
        AppContext,
    },
    auth::AuthStore,
    dashboard::DashboardStore,
    fleet::FleetStore,
    modal::{ModalPhase, ModalState},
};

/// Routes `log` records to the browser console and installs the panic hook.
/// A no-op off the browser, where the host application owns logging.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Debug).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    init_logging();
    log::info!("starting capital dashboard client");

    // window.__DASHBOARD_ENV wins over ./config.json when both exist.
    leptos::spawn_local(config::init());
}
