use super::{
    client::{parse_response, ApiClient},
    types::{ApiEnvelope, ApiError, AuthenticatedUser, LoginRequest, LoginResponse},
};
use crate::utils::storage::{KeyValueStore, ACCESS_TOKEN_KEY, USER_KEY};

impl ApiClient {
    /// Exchanges credentials for a token. Sent without the bearer interceptor.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint("/investors/login").await;
        log::debug!("POST {url}");
        let response = self
            .http_client()
            .post(&url)
            .json(request)
            .send()
            .await?;

        let envelope: ApiEnvelope<LoginResponse> = parse_response(response).await?;
        Ok(envelope.data)
    }
}

pub fn persist_session(
    storage: &dyn KeyValueStore,
    response: &LoginResponse,
) -> Result<(), ApiError> {
    let user_json = serde_json::to_string(&response.user)
        .map_err(|e| ApiError::Decode(format!("Failed to serialize user: {e}")))?;
    storage.set_item(ACCESS_TOKEN_KEY, &response.access_token)?;
    if let Err(err) = storage.set_item(USER_KEY, &user_json) {
        storage.remove_item(ACCESS_TOKEN_KEY);
        return Err(err.into());
    }
    Ok(())
}

/// Token and user as persisted by [`persist_session`]. `None` unless both
/// entries exist and the user record parses.
pub fn read_session(storage: &dyn KeyValueStore) -> Option<(String, AuthenticatedUser)> {
    let token = storage
        .get_item(ACCESS_TOKEN_KEY)
        .filter(|token| !token.is_empty())?;
    let raw_user = storage.get_item(USER_KEY)?;
    match serde_json::from_str::<AuthenticatedUser>(&raw_user) {
        Ok(user) => Some((token, user)),
        Err(err) => {
            log::warn!("ignoring unreadable persisted user: {err}");
            None
        }
    }
}

pub fn clear_session(storage: &dyn KeyValueStore) {
    storage.remove_item(ACCESS_TOKEN_KEY);
    storage.remove_item(USER_KEY);
}
