//! Static asset lookup.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("unable to read asset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub trait AssetStore: Send + Sync {
    /// Load the asset at request path `path`, e.g. `/css/board.css`
    fn load(&self, path: &str) -> Result<Asset, AssetError>;
}

/// Serves files below a root directory
pub struct DirAssetStore {
    root: PathBuf,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> DirAssetStore {
        DirAssetStore { root: root.into() }
    }

    /// Map a request path onto the root, refusing anything that is not a
    /// plain file name component
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut full = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => full.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        if full == self.root {
            return None;
        }
        Some(full)
    }
}

impl AssetStore for DirAssetStore {
    fn load(&self, path: &str) -> Result<Asset, AssetError> {
        let full = self
            .resolve(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        match std::fs::read(&full) {
            Ok(bytes) => Ok(Asset {
                content_type: content_type(&full),
                bytes,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AssetError::NotFound(path.to_string())),
            Err(e) if full.is_dir() => {
                log::debug!("{} is a directory: {}", full.display(), e);
                Err(AssetError::NotFound(path.to_string()))
            }
            Err(e) => Err(AssetError::Io {
                path: path.to_string(),
                source: e,
            }),
        }
    }
}

/// Infer the content type from the file extension
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
