use crate::client::Client;
use anyhow::Context;
use async_trait::async_trait;
use entities::users::{UserId, UserProfile};
use use_cases::profile::ProfileRepo;

fn profile_key(user: &UserId) -> String {
    format!("profile:{user}")
}

#[async_trait]
impl ProfileRepo for Client {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_profile(&self, user: &UserId) -> anyhow::Result<Option<UserProfile>> {
        let mut conn = self.connection();
        let key = profile_key(user);
        let blob: Option<String> = redis::Cmd::get(&key)
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to get profile for key {key}"))?;

        blob.map(|blob| serde_json::from_str(&blob))
            .transpose()
            .with_context(|| format!("Stored profile for {user} is unreadable"))
    }

    #[tracing::instrument(err, skip(self, profile), fields(user = %profile.user_id), level = "info")]
    async fn save_profile(&self, profile: &UserProfile) -> anyhow::Result<()> {
        let mut conn = self.connection();
        let blob = serde_json::to_string(profile)?;
        redis::Cmd::set(profile_key(&profile.user_id), blob)
            .query_async(&mut conn)
            .await
            .context("Failed to save profile")
    }
}
