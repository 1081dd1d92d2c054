//! File-backed token store scoped to a single directory.

use crate::session::{
    domain::SessionToken,
    ports::{TOKEN_KEY, TokenStore, TokenStoreError, TokenStoreResult},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;

/// Persists the token as a file named [`TOKEN_KEY`] inside one directory.
///
/// All file access goes through a capability handle for that directory, so
/// the store can never touch paths outside it.
#[derive(Debug)]
pub struct FileTokenStore {
    dir: Dir,
    path: Utf8PathBuf,
}

impl FileTokenStore {
    /// Opens the store, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError::Storage`] when the directory cannot be
    /// created or opened.
    pub fn open(path: impl AsRef<Utf8Path>) -> TokenStoreResult<Self> {
        let dir_path = path.as_ref();
        Dir::create_ambient_dir_all(dir_path, ambient_authority())
            .map_err(TokenStoreError::storage)?;
        let dir =
            Dir::open_ambient_dir(dir_path, ambient_authority()).map_err(TokenStoreError::storage)?;
        Ok(Self {
            dir,
            path: dir_path.to_owned(),
        })
    }

    /// Returns the directory holding the token file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> TokenStoreResult<Option<SessionToken>> {
        let contents = match self.dir.read_to_string(TOKEN_KEY) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(TokenStoreError::storage(err)),
        };
        // A blank file is an absent token rather than a corrupt one.
        Ok(SessionToken::new(contents).ok())
    }

    fn save(&self, token: &SessionToken) -> TokenStoreResult<()> {
        self.dir
            .write(TOKEN_KEY, token.expose())
            .map_err(TokenStoreError::storage)
    }

    fn clear(&self) -> TokenStoreResult<()> {
        match self.dir.remove_file(TOKEN_KEY) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(TokenStoreError::storage(err)),
        }
    }
}
