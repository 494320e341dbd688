use std::{cell::RefCell, collections::HashMap, rc::Rc};

use thiserror::Error;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USER_KEY: &str = "user";
pub const FLEET_CACHE_KEY: &str = "fleetData";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write `{0}`")]
    Write(String),
}

/// Minimal string key/value contract shared by `localStorage`,
/// `sessionStorage` and the in-memory store used off the browser.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str);
}

pub type SharedStore = Rc<dyn KeyValueStore>;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Rc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::*;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{KeyValueStore, StorageError};
    use web_sys::{Storage, Window};

    pub fn window() -> Result<Window, StorageError> {
        web_sys::window().ok_or_else(|| StorageError::Unavailable("No window object".into()))
    }

    pub fn local_storage() -> Result<Storage, StorageError> {
        window()?
            .local_storage()
            .map_err(|_| StorageError::Unavailable("No localStorage".into()))?
            .ok_or_else(|| StorageError::Unavailable("No localStorage".into()))
    }

    pub fn session_storage() -> Result<Storage, StorageError> {
        window()?
            .session_storage()
            .map_err(|_| StorageError::Unavailable("No sessionStorage".into()))?
            .ok_or_else(|| StorageError::Unavailable("No sessionStorage".into()))
    }

    pub struct BrowserStorage(Storage);

    impl BrowserStorage {
        pub fn new(storage: Storage) -> Self {
            Self(storage)
        }
    }

    impl KeyValueStore for BrowserStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.0.get_item(key).ok().flatten()
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0
                .set_item(key, value)
                .map_err(|_| StorageError::Write(key.to_string()))
        }

        fn remove_item(&self, key: &str) {
            let _ = self.0.remove_item(key);
        }
    }
}

/// Durable and session-scoped stores. Either side is `None` when the code
/// runs outside a browser tab, in which case reads miss and writes are skipped.
#[derive(Clone, Default)]
pub struct ClientStorage {
    pub durable: Option<SharedStore>,
    pub session: Option<SharedStore>,
}

impl ClientStorage {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn in_memory() -> Self {
        Self {
            durable: Some(MemoryStorage::shared()),
            session: Some(MemoryStorage::shared()),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        let durable = match local_storage() {
            Ok(storage) => Some(Rc::new(BrowserStorage::new(storage)) as SharedStore),
            Err(err) => {
                log::warn!("durable storage disabled: {err}");
                None
            }
        };
        let session = match session_storage() {
            Ok(storage) => Some(Rc::new(BrowserStorage::new(storage)) as SharedStore),
            Err(err) => {
                log::warn!("session storage disabled: {err}");
                None
            }
        };
        Self { durable, session }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn browser() -> Self {
        Self::none()
    }
}
