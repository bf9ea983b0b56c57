//! On-disk token storage
//!
//! One plaintext file per token under `~/.hlo-api/`: `user_token` and
//! `access_token`. Files are trimmed on read and an empty file reads as
//! absent. Writes go through a temp file and a rename so a crash never
//! leaves a half-written token behind.

use std::path::{Path, PathBuf};

use common::Secret;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Directory under the home directory holding the token files
pub const TOKEN_DIR_NAME: &str = ".hlo-api";
pub const ACCESS_TOKEN_FILE: &str = "access_token";
pub const USER_TOKEN_FILE: &str = "user_token";

/// Plaintext token files in a single directory.
#[derive(Debug, Clone)]
pub struct TokenStore {
    dir: PathBuf,
}

impl TokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.hlo-api`, or `None` when no home directory can be determined.
    pub fn default_location() -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home.join(TOKEN_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn read_access_token(&self) -> Result<Option<Secret<String>>> {
        self.read(ACCESS_TOKEN_FILE).await
    }

    pub async fn read_user_token(&self) -> Result<Option<Secret<String>>> {
        self.read(USER_TOKEN_FILE).await
    }

    pub async fn save_access_token(&self, token: &str) -> Result<()> {
        self.write(ACCESS_TOKEN_FILE, token).await
    }

    pub async fn save_user_token(&self, token: &str) -> Result<()> {
        self.write(USER_TOKEN_FILE, token).await
    }

    async fn read(&self, name: &str) -> Result<Option<Secret<String>>> {
        let path = self.dir.join(name);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "token file not found");
                return Ok(None);
            }
            Err(e) => return Err(io_error(&path)(e)),
        };

        let token = contents.trim();
        if token.is_empty() {
            debug!(path = %path.display(), "token file is empty");
            return Ok(None);
        }
        Ok(Some(Secret::new(token.to_string())))
    }

    async fn write(&self, name: &str, token: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(io_error(&self.dir))?;

        let path = self.dir.join(name);
        write_atomic(&path, token.trim()).await?;
        info!(path = %path.display(), "stored token");
        Ok(())
    }
}

/// Write to a temp file beside `path`, restrict it to 0600, rename over.
async fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        io_error(path)(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "token path has no parent directory",
        ))
    })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("token");
    let tmp_path = dir.join(format!(".{file_name}.tmp.{}", std::process::id()));

    tokio::fs::write(&tmp_path, contents.as_bytes())
        .await
        .map_err(io_error(&tmp_path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        tokio::fs::set_permissions(&tmp_path, perms)
            .await
            .map_err(io_error(&tmp_path))?;
    }

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(io_error(path))?;
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}
