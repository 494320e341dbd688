use std::cell::OnceCell;

use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, RequestBuilder, Response, StatusCode,
};
use serde::de::DeserializeOwned;

use crate::{
    api::types::{ApiError, ErrorBody},
    config,
    utils::storage::{ClientStorage, SharedStore, ACCESS_TOKEN_KEY},
};

thread_local! {
    static HTTP_CLIENT: OnceCell<Client> = const { OnceCell::new() };
}

fn build_http_client() -> Client {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Client::builder()
        .default_headers(headers)
        .build()
        .unwrap_or_else(|err| {
            log::warn!("falling back to a default http client: {err}");
            Client::new()
        })
}

/// The one `reqwest::Client` for this thread, built on first use.
pub fn shared_http_client() -> Client {
    HTTP_CLIENT.with(|cell| cell.get_or_init(build_http_client).clone())
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    durable: Option<SharedStore>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: shared_http_client(),
            base_url: None,
            durable: ClientStorage::browser().durable,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: shared_http_client(),
            base_url: Some(base_url.into()),
            durable: ClientStorage::browser().durable,
        }
    }

    /// Reads the bearer token from `durable` instead of the browser's
    /// `localStorage`.
    pub fn with_durable_storage(mut self, durable: Option<SharedStore>) -> Self {
        self.durable = durable;
        self
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.trim_end_matches('/').to_string()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) async fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url().await, path)
    }

    fn bearer_token(&self) -> Option<String> {
        self.durable
            .as_ref()?
            .get_item(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// Request interceptor: attaches `Authorization: Bearer <token>` when a
    /// token is persisted, otherwise leaves the request untouched.
    pub fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => {
                log::warn!("no access token stored, sending request unauthenticated");
                builder
            }
        }
    }

    pub(crate) async fn get_authorized<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path).await;
        log::debug!("GET {url}");
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await?;
        parse_response(response).await
    }
}

pub(crate) async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    if status == StatusCode::UNAUTHORIZED {
        log::warn!("backend rejected the session ({status})");
    }
    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    Err(ApiError::Application {
        status: status.as_u16(),
        message: body.message,
    })
}
