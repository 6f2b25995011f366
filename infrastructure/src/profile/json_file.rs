//! Profile store backed by a local JSON file.
//!
//! The file holds one object keyed by display name:
//!
//! ```json
//! { "A": { "emp_state": 1, "ase_state": 2, "int_state": 1,
//!          "last_updated": "2025-01-01T09:00:00.000Z" } }
//! ```
//!
//! Saving upserts the entry and rewrites the file through a temporary
//! sibling so a crash never leaves it half written.

use crate::tutor::wire::WireLevels;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;
use tutor_application::ports::profile_store::{ProfileStore, ProfileStoreError};
use tutor_domain::{Profile, SkillLevels};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredProfile {
    #[serde(flatten)]
    levels: WireLevels,
    last_updated: String,
}

type ProfileFile = BTreeMap<String, StoredProfile>;

pub struct JsonFileProfileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<ProfileFile, ProfileStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(ProfileFile::new()),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| ProfileStoreError::Serialization(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ProfileFile::new()),
            Err(e) => Err(io_error(&self.path, e)),
        }
    }

    async fn write(&self, profiles: &ProfileFile) -> Result<(), ProfileStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let json = serde_json::to_string_pretty(profiles)
            .map_err(|e| ProfileStoreError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))
    }
}

fn io_error(path: &Path, e: std::io::Error) -> ProfileStoreError {
    ProfileStoreError::Io(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl ProfileStore for JsonFileProfileStore {
    async fn save(&self, profile: &Profile) -> Result<(), ProfileStoreError> {
        let _guard = self.lock.lock().await;
        let mut profiles = self.read().await?;
        profiles.insert(
            profile.display_name().to_string(),
            StoredProfile {
                levels: WireLevels::from(profile.levels()),
                last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        );
        self.write(&profiles).await?;
        debug!(
            "Saved profile {} to {}",
            profile.display_name(),
            self.path.display()
        );
        Ok(())
    }

    async fn load(&self, display_name: &str) -> Result<Option<Profile>, ProfileStoreError> {
        let _guard = self.lock.lock().await;
        let profiles = self.read().await?;
        let Some(stored) = profiles.get(display_name.trim()) else {
            return Ok(None);
        };
        let levels = SkillLevels::try_from(stored.levels)
            .map_err(|e| ProfileStoreError::Serialization(e.to_string()))?;
        Ok(Some(Profile::new(display_name, levels)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, e: u8, a: u8, i: u8) -> Profile {
        Profile::new(name, SkillLevels::from_values(e, a, i).unwrap())
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileProfileStore::new(dir.path().join("profiles.json"));

        store.save(&profile("A", 1, 2, 3)).await.unwrap();
        assert_eq!(store.load("A").await.unwrap(), Some(profile("A", 1, 2, 3)));
        assert_eq!(store.load("B").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_upserts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profiles.json");
        let store = JsonFileProfileStore::new(&path);

        store.save(&profile("A", 1, 1, 1)).await.unwrap();
        store.save(&profile("B", 2, 2, 2)).await.unwrap();
        store.save(&profile("A", 4, 5, 6)).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.as_object().unwrap().len(), 2);
        assert_eq!(raw["A"]["emp_state"], 4);
        assert!(raw["A"]["last_updated"].as_str().unwrap().ends_with('Z'));
        assert_eq!(store.load("A").await.unwrap(), Some(profile("A", 4, 5, 6)));
    }

    #[tokio::test]
    async fn test_missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileProfileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load("A").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileProfileStore::new(&path);
        assert!(matches!(
            store.load("A").await,
            Err(ProfileStoreError::Serialization(_))
        ));
    }
}
