//! `window.localStorage` as a [`BlobStore`].

use vs_editor::{BlobStore, StoreError};
use web_sys::Storage;

pub struct LocalStore;

fn local_storage() -> Result<Storage, StoreError> {
    let window =
        web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
    window
        .local_storage()
        .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
}

impl BlobStore for LocalStore {
    fn save(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        local_storage()?
            .set_item(key, blob)
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }

    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}
