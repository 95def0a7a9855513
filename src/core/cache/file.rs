use crate::core::cache::kv::{KeyValueStore, check_quota};
use anyhow::{Context, Error};
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key-value store holding one file per key under a directory, so
/// values survive restarts. Writes go to a temp file first and are
/// renamed into place, a crash never leaves a half written value
pub struct FileKeyValueStore {
    dir: PathBuf,
    max_entry_bytes: Option<usize>,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>, max_entry_bytes: Option<usize>) -> Result<Self, Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache dir {}", dir.display()))?;

        Ok(Self {
            dir,
            max_entry_bytes,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

/// Keys carry user ids, escape anything that isn't safe in a file name
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());

    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{:02X}", b);
        }
    }

    out
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::new(e).context(format!("Failed to read cache key {}", key))),
        }
    }

    fn set(&self, key: &str, value: String) -> Result<(), Error> {
        check_quota(self.max_entry_bytes, key, &value)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value.as_bytes())
            .with_context(|| format!("Failed to write cache key {}", key))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to commit cache key {}", key))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::new(e).context(format!("Failed to remove cache key {}", key))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("likedPosts_u1"), "likedPosts_u1");
        assert_eq!(encode_key("likedPosts_a/b"), "likedPosts_a%2Fb");
        assert_eq!(encode_key("../x"), "%2E%2E%2Fx");
    }

    #[test]
    fn test_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();

        let kv = FileKeyValueStore::new(tmp.path(), None).unwrap();
        kv.set("likedPosts_u1", r#"{"p1":true}"#.to_string()).unwrap();
        drop(kv);

        let reopened = FileKeyValueStore::new(tmp.path(), None).unwrap();
        assert_eq!(
            reopened.get("likedPosts_u1").unwrap(),
            Some(r#"{"p1":true}"#.to_string())
        );

        reopened.remove("likedPosts_u1").unwrap();
        reopened.remove("likedPosts_u1").unwrap();
        assert_eq!(reopened.get("likedPosts_u1").unwrap(), None);
    }

    #[test]
    fn test_quota_keeps_previous_value() {
        let tmp = tempfile::tempdir().unwrap();
        let kv = FileKeyValueStore::new(tmp.path().join("nested"), Some(8)).unwrap();

        kv.set("k", "small".to_string()).unwrap();
        assert!(kv.set("k", "far too large".to_string()).is_err());
        assert_eq!(kv.get("k").unwrap(), Some("small".to_string()));
    }
}
