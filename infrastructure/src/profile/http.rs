//! Profile store on the tutor backend (`/api/profile/...`).

use crate::http::{ApiClient, ApiError};
use crate::tutor::wire::{ProfileBody, ProfilePayload};
use async_trait::async_trait;
use tutor_application::ports::profile_store::{ProfileStore, ProfileStoreError};
use tutor_domain::{Profile, SkillLevels};

pub struct HttpProfileStore {
    api: ApiClient,
}

impl HttpProfileStore {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl From<ApiError> for ProfileStoreError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Decode(msg) => ProfileStoreError::Serialization(msg),
            other => ProfileStoreError::Http(other.to_string()),
        }
    }
}

#[async_trait]
impl ProfileStore for HttpProfileStore {
    async fn save(&self, profile: &Profile) -> Result<(), ProfileStoreError> {
        let _: serde_json::Value = self
            .api
            .post_json("/api/profile/save", &ProfilePayload::from(profile))
            .await?;
        Ok(())
    }

    async fn load(&self, display_name: &str) -> Result<Option<Profile>, ProfileStoreError> {
        let body: ProfileBody = self
            .api
            .get_json(&format!("/api/profile/{}", display_name.trim()))
            .await?;
        if body.is_new {
            return Ok(None);
        }
        let levels = SkillLevels::try_from(body.states)
            .map_err(|e| ProfileStoreError::Serialization(e.to_string()))?;
        Ok(Some(Profile::new(body.user_name, levels)))
    }
}
