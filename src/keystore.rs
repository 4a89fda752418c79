use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read key store: {0}")]
    Io(#[from] std::io::Error),
}

/// Lookup of optional string settings, absence is a valid answer
pub trait KeyStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;
}

/// `KEY="value"` text file, read again on every lookup so edits are picked up
/// without a restart. A missing file means every key is absent.
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> FileKeyStore {
        FileKeyStore { path: path.into() }
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(lookup(&content, key)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, mostly useful to wire a fixed credential
pub struct StaticKeyStore {
    entries: Vec<(String, String)>,
}

impl StaticKeyStore {
    pub fn new(entries: Vec<(String, String)>) -> StaticKeyStore {
        StaticKeyStore { entries }
    }

    pub fn empty() -> StaticKeyStore {
        StaticKeyStore::new(Vec::new())
    }
}

impl KeyStore for StaticKeyStore {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }
}

/// Scan `KEY=value` lines for `key`. Blank lines and `#` comments are skipped,
/// surrounding quotes are stripped and an empty value counts as absent.
pub fn lookup(content: &str, key: &str) -> Option<String> {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut kv = line.splitn(2, '=');
        let k = kv.next().unwrap_or("").trim();
        if k != key {
            continue;
        }
        let v = kv.next().unwrap_or("").trim();
        let v = v
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(v);
        if v.is_empty() {
            return None;
        }
        return Some(v.to_string());
    }
    None
}
