use auction_client::config::TOKEN_KEY;
use auction_client::{AuctionClientError, TokenStore};
use gloo_storage::{LocalStorage, Storage};

/// Token kept as a raw string in `localStorage` under [`TOKEN_KEY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokenStore;

fn storage_error(e: wasm_bindgen::JsValue) -> AuctionClientError {
    AuctionClientError::TokenStore(format!("{:?}", e))
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Result<Option<String>, AuctionClientError> {
        let token = LocalStorage::raw().get_item(TOKEN_KEY).map_err(storage_error)?;
        Ok(token.filter(|t| !t.trim().is_empty()))
    }

    fn save(&mut self, token: &str) -> Result<(), AuctionClientError> {
        LocalStorage::raw()
            .set_item(TOKEN_KEY, token)
            .map_err(storage_error)
    }

    fn clear(&mut self) -> Result<(), AuctionClientError> {
        LocalStorage::raw()
            .remove_item(TOKEN_KEY)
            .map_err(storage_error)
    }
}
