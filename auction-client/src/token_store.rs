use crate::error::AuctionClientError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Synchronous persistence for the single opaque access token.
///
/// `load` returns `None` for a missing or blank token.
pub trait TokenStore {
    fn load(&self) -> Result<Option<String>, AuctionClientError>;

    fn save(&mut self, token: &str) -> Result<(), AuctionClientError>;

    fn clear(&mut self) -> Result<(), AuctionClientError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, AuctionClientError> {
        Ok(self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string))
    }

    fn save(&mut self, token: &str) -> Result<(), AuctionClientError> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), AuctionClientError> {
        self.token = None;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, AuctionClientError> {
        match fs::read_to_string(&self.path) {
            Ok(token) => {
                let token = token.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuctionClientError::TokenStore(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&mut self, token: &str) -> Result<(), AuctionClientError> {
        fs::write(&self.path, token).map_err(|e| {
            AuctionClientError::TokenStore(format!(
                "failed to save token to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        tracing::debug!(path = %self.path.display(), "Token saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), AuctionClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Token file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuctionClientError::TokenStore(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_treats_blank_as_absent() {
        let mut store = MemoryTokenStore::with_token("   ");
        assert_eq!(store.load().unwrap(), None);

        store.save("abc").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileTokenStore::new(dir.path().join("token"));

        assert_eq!(store.load().unwrap(), None);

        store.save("secret-token").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("secret-token"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_trims_and_ignores_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");

        fs::write(&path, "\n").unwrap();
        assert_eq!(FileTokenStore::new(&path).load().unwrap(), None);

        fs::write(&path, "tok\n").unwrap();
        assert_eq!(FileTokenStore::new(&path).load().unwrap().as_deref(), Some("tok"));
    }

    #[test]
    fn clearing_missing_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileTokenStore::new(dir.path().join("nope"));
        assert!(store.clear().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut store = FileTokenStore::new(dir.path().join("token"));
        store.save("x").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
