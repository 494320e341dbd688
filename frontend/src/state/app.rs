use crate::{
    api::ApiClient,
    state::{auth::AuthStore, dashboard::DashboardStore, fleet::FleetStore, modal::ModalState},
    utils::storage::ClientStorage,
};
use leptos::*;

/// Every store the dashboard shares between components, handed out through
/// Leptos context instead of module-level globals.
#[derive(Clone)]
pub struct AppContext {
    pub api: ApiClient,
    pub storage: ClientStorage,
    pub auth: AuthStore,
    pub fleet: FleetStore,
    pub dashboard: DashboardStore,
    pub modal: ModalState,
}

impl AppContext {
    pub fn new(api: ApiClient, storage: ClientStorage) -> Self {
        let api = api.with_durable_storage(storage.durable.clone());
        Self {
            auth: AuthStore::new(api.clone(), storage.durable.clone()),
            fleet: FleetStore::new(api.clone(), storage.session.clone()),
            dashboard: DashboardStore::new(api.clone()),
            modal: ModalState::new(),
            api,
            storage,
        }
    }

    pub fn browser() -> Self {
        Self::new(ApiClient::new(), ClientStorage::browser())
    }

    /// App start: adopt the session persisted by a previous visit.
    pub fn restore_session(&self) {
        self.auth.check_auth();
    }

    /// Logout plus teardown of every cached snapshot.
    pub async fn sign_out(&self) {
        self.auth.logout().await;
        self.fleet.clear_fleet();
        self.dashboard.clear_dashboard();
    }
}

/// Call once at the application root so every component shares one context.
pub fn provide_app_context(ctx: AppContext) {
    provide_context(ctx);
}

/// Without a root provider, a browser-backed context is created and provided
/// in the caller's scope only; sibling scopes each get their own.
pub fn use_app_context() -> AppContext {
    match use_context::<AppContext>() {
        Some(ctx) => ctx,
        None => {
            log::warn!("no AppContext provided at the root; creating a scoped one");
            let ctx = AppContext::browser();
            ctx.restore_session();
            provide_context(ctx.clone());
            ctx
        }
    }
}

pub fn use_auth() -> AuthStore {
    use_app_context().auth
}

pub fn use_fleet() -> FleetStore {
    use_app_context().fleet
}

pub fn use_dashboard() -> DashboardStore {
    use_app_context().dashboard
}

pub fn use_modal() -> ModalState {
    use_app_context().modal
}
