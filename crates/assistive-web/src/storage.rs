use assistive_engine::{StorageBackend, StoreError};
use wasm_bindgen::JsValue;

/// `window.localStorage` as a `StorageBackend`.
/// The handle is looked up on every call; a missing one is `Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageBackend;

impl LocalStorageBackend {
    pub fn new() -> Self {
        Self
    }
}

fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .ok_or(StoreError::Unavailable)?
        .local_storage()
        .map_err(js_error)?
        .ok_or(StoreError::Unavailable)
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Backend(format!("{:?}", value))
}

impl StorageBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        local_storage()?.remove_item(key).map_err(js_error)
    }
}
