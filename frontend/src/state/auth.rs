use crate::{
    api::{
        auth::{clear_session, persist_session, read_session},
        ApiClient, ApiError, AuthenticatedUser, LoginRequest,
    },
    config::LOGOUT_ANIMATION_DELAY,
    state::BusyGuard,
    utils::{storage::SharedStore, time::sleep},
};
use leptos::*;

pub const LOGIN_ERROR_FALLBACK: &str = "Erro ao fazer login";

/// Session lifecycle: login, logout and restoring a persisted session.
#[derive(Clone)]
pub struct AuthStore {
    api: ApiClient,
    durable: Option<SharedStore>,
    is_authenticated: RwSignal<bool>,
    is_logging_in: RwSignal<bool>,
    is_logging_out: RwSignal<bool>,
    user: RwSignal<Option<AuthenticatedUser>>,
    login_error: RwSignal<Option<String>>,
}

impl AuthStore {
    pub fn new(api: ApiClient, durable: Option<SharedStore>) -> Self {
        Self {
            api,
            durable,
            is_authenticated: create_rw_signal(false),
            is_logging_in: create_rw_signal(false),
            is_logging_out: create_rw_signal(false),
            user: create_rw_signal(None),
            login_error: create_rw_signal(None),
        }
    }

    pub fn is_authenticated(&self) -> ReadSignal<bool> {
        self.is_authenticated.read_only()
    }

    pub fn is_logging_in(&self) -> ReadSignal<bool> {
        self.is_logging_in.read_only()
    }

    pub fn is_logging_out(&self) -> ReadSignal<bool> {
        self.is_logging_out.read_only()
    }

    pub fn user(&self) -> ReadSignal<Option<AuthenticatedUser>> {
        self.user.read_only()
    }

    pub fn login_error(&self) -> ReadSignal<Option<String>> {
        self.login_error.read_only()
    }

    /// Adopts the persisted session, if both token and user are stored.
    /// Leaves state untouched otherwise, so repeated calls agree.
    pub fn check_auth(&self) {
        let Some(storage) = self.durable.as_deref() else {
            return;
        };
        if let Some((_token, user)) = read_session(storage) {
            log::debug!("restored session for user {}", user.id);
            self.user.set(Some(user));
            self.is_authenticated.set(true);
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), String> {
        let _busy = BusyGuard::hold(self.is_logging_in);
        self.login_error.set(None);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.authenticate(&request).await {
            Ok(user) => {
                log::info!("user {} signed in", user.id);
                self.user.set(Some(user));
                self.is_authenticated.set(true);
                Ok(())
            }
            Err(err) => {
                log::warn!("login failed (status {:?}): {err}", err.status());
                let message = err.user_message(LOGIN_ERROR_FALLBACK);
                self.login_error.set(Some(message.clone()));
                Err(message)
            }
        }
    }

    async fn authenticate(&self, request: &LoginRequest) -> Result<AuthenticatedUser, ApiError> {
        let response = self.api.login(request).await?;
        if let Some(storage) = self.durable.as_deref() {
            persist_session(storage, &response)?;
        }
        Ok(response.user)
    }

    pub async fn logout(&self) {
        let _busy = BusyGuard::hold(self.is_logging_out);
        sleep(LOGOUT_ANIMATION_DELAY).await;

        if let Some(storage) = self.durable.as_deref() {
            clear_session(storage);
        }
        self.user.set(None);
        self.is_authenticated.set(false);
        log::info!("signed out");
    }
}
