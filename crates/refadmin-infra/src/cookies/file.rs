//! File-backed cookie jar.
//!
//! Cookies with an expiry are written to a JSON file on every change so the
//! admin stays logged in across restarts until the token lapses. Session
//! cookies are never written out and vanish at [`CookieStore::end_session`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use refadmin_core::CookieStoreError;
use refadmin_core::ports::{CookieOptions, CookieStore};

use super::StoredCookie;

#[derive(Debug, Default, Serialize, Deserialize)]
struct JarFile {
    #[serde(default)]
    cookies: HashMap<String, StoredCookie>,
}

#[derive(Default)]
struct Jar {
    persistent: HashMap<String, StoredCookie>,
    session: HashMap<String, StoredCookie>,
}

/// Cookie jar persisted at `path`.
pub struct FileCookieStore {
    path: PathBuf,
    jar: RwLock<Jar>,
}

impl FileCookieStore {
    /// Load the jar at `path`. A missing file is an empty jar; expired
    /// entries are dropped on load.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CookieStoreError> {
        let path = path.into();
        let persistent = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let file: JarFile = serde_json::from_slice(&bytes)
                    .map_err(|e| CookieStoreError::Serialization(e.to_string()))?;
                file.cookies
                    .into_iter()
                    .filter(|(_, cookie)| !cookie.is_expired())
                    .collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(CookieStoreError::Io(e.to_string())),
        };

        tracing::debug!(path = %path.display(), cookies = persistent.len(), "Cookie jar loaded");

        Ok(Self {
            path,
            jar: RwLock::new(Jar {
                persistent,
                session: HashMap::new(),
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the persistent cookies through a temp file and rename.
    async fn flush(&self, persistent: &HashMap<String, StoredCookie>) -> Result<(), CookieStoreError> {
        let file = JarFile {
            cookies: persistent.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&file)
            .map_err(|e| CookieStoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CookieStoreError::Io(e.to_string()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| CookieStoreError::Io(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| CookieStoreError::Io(e.to_string()))?;
        }

        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| CookieStoreError::Io(e.to_string()))
    }
}

#[async_trait]
impl CookieStore for FileCookieStore {
    async fn get(&self, name: &str) -> Option<String> {
        let jar = self.jar.read().await;
        let cookie = jar.session.get(name).or_else(|| jar.persistent.get(name))?;
        if !cookie.is_expired() {
            return Some(cookie.value.clone());
        }
        drop(jar);

        let mut jar = self.jar.write().await;
        jar.session.remove(name);
        if jar.persistent.remove(name).is_some() {
            if let Err(e) = self.flush(&jar.persistent).await {
                tracing::warn!(cookie = name, error = %e, "Failed to evict expired cookie");
            }
        }
        None
    }

    async fn set(
        &self,
        name: &str,
        value: &str,
        options: CookieOptions,
    ) -> Result<(), CookieStoreError> {
        let cookie = StoredCookie::new(value, options);
        let mut jar = self.jar.write().await;
        if cookie.is_persistent() {
            jar.session.remove(name);
            jar.persistent.insert(name.to_string(), cookie);
            self.flush(&jar.persistent).await
        } else {
            jar.session.insert(name.to_string(), cookie);
            if jar.persistent.remove(name).is_some() {
                self.flush(&jar.persistent).await?;
            }
            Ok(())
        }
    }

    async fn remove(&self, name: &str) -> Result<(), CookieStoreError> {
        let mut jar = self.jar.write().await;
        jar.session.remove(name);
        if jar.persistent.remove(name).is_some() {
            self.flush(&jar.persistent).await?;
        }
        Ok(())
    }

    async fn end_session(&self) -> Result<(), CookieStoreError> {
        let mut jar = self.jar.write().await;
        jar.session.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};

    fn expiring() -> CookieOptions {
        CookieOptions::strict(Some(Utc::now() + TimeDelta::hours(1)))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_jar() {
        let dir = tempfile::tempdir().unwrap();
        let jar = FileCookieStore::open(dir.path().join("cookies.json"))
            .await
            .unwrap();
        assert_eq!(jar.get("token").await, None);
    }

    #[tokio::test]
    async fn test_expiring_cookie_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cookies.json");

        let jar = FileCookieStore::open(&path).await.unwrap();
        jar.set("token", "abc", expiring()).await.unwrap();
        drop(jar);

        let reopened = FileCookieStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("token").await, Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_session_cookie_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let jar = FileCookieStore::open(&path).await.unwrap();
        jar.set("token", "abc", CookieOptions::strict(None))
            .await
            .unwrap();
        assert_eq!(jar.get("token").await, Some("abc".to_string()));

        let reopened = FileCookieStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("token").await, None);

        jar.end_session().await.unwrap();
        assert_eq!(jar.get("token").await, None);
    }

    #[tokio::test]
    async fn test_remove_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let jar = FileCookieStore::open(&path).await.unwrap();
        jar.set("token", "abc", expiring()).await.unwrap();
        jar.remove("token").await.unwrap();

        let reopened = FileCookieStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("token").await, None);
    }

    #[tokio::test]
    async fn test_expired_entries_dropped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        let stale = CookieOptions::strict(Some(Utc::now() - TimeDelta::minutes(5)));
        let file = JarFile {
            cookies: HashMap::from([("token".to_string(), StoredCookie::new("old", stale))]),
        };
        std::fs::write(&path, serde_json::to_vec(&file).unwrap()).unwrap();

        let jar = FileCookieStore::open(&path).await.unwrap();
        assert_eq!(jar.get("token").await, None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, b"not json").unwrap();

        let result = FileCookieStore::open(&path).await;
        assert!(matches!(result, Err(CookieStoreError::Serialization(_))));
    }
}
