use crate::repository::Repository;
use anyhow::Context;
use async_trait::async_trait;
use entities::cities::CityId;
use entities::trips::TripId;
use entities::users::{TravelPreferences, UserEmail, UserId, UserProfile};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use use_cases::profile::ProfileRepo;
use uuid::Uuid;

#[derive(FromRow)]
struct ProfileRow {
    user_id: String,
    email: String,
    home_city: Option<String>,
    travel_preferences: Json<TravelPreferences>,
    interrail_pass: String,
    language: String,
    notifications_enabled: bool,
    saved_routes: Vec<Uuid>,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = anyhow::Error;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(UserProfile {
            user_id: UserId::from(row.user_id),
            email: UserEmail::try_from(row.email).map_err(anyhow::Error::msg)?,
            home_city: row.home_city.map(CityId::from),
            travel_preferences: row.travel_preferences.0,
            interrail_pass: serde_json::from_value(Value::String(row.interrail_pass))
                .context("Unknown interrail pass")?,
            language: serde_json::from_value(Value::String(row.language))
                .context("Unknown language")?,
            notifications_enabled: row.notifications_enabled,
            saved_routes: row.saved_routes.into_iter().map(TripId::from).collect(),
        })
    }
}

fn as_text<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::String(text) => Ok(text),
        other => anyhow::bail!("Expected a string value, got {other}"),
    }
}

#[async_trait]
impl ProfileRepo for Repository {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_profile(&self, user: &UserId) -> anyhow::Result<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, email, home_city, travel_preferences, interrail_pass, language, notifications_enabled, saved_routes
            FROM public.user_profile WHERE user_id = $1
            "#,
        )
        .bind(user.as_str())
        .fetch_optional(self.pool())
        .await
        .context("Failed to fetch profile")?;

        row.map(UserProfile::try_from).transpose()
    }

    #[tracing::instrument(err, skip(self, profile), fields(user = %profile.user_id), level = "info")]
    async fn save_profile(&self, profile: &UserProfile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO public.user_profile
                (user_id, email, home_city, travel_preferences, interrail_pass, language, notifications_enabled, saved_routes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id)
            DO UPDATE SET email = EXCLUDED.email, home_city = EXCLUDED.home_city,
                travel_preferences = EXCLUDED.travel_preferences, interrail_pass = EXCLUDED.interrail_pass,
                language = EXCLUDED.language, notifications_enabled = EXCLUDED.notifications_enabled,
                saved_routes = EXCLUDED.saved_routes,
                last_login = now();
            "#,
        )
        .bind(profile.user_id.as_str())
        .bind(profile.email.to_string())
        .bind(profile.home_city.as_ref().map(CityId::as_str))
        .bind(Json(profile.travel_preferences))
        .bind(as_text(&profile.interrail_pass)?)
        .bind(as_text(&profile.language)?)
        .bind(profile.notifications_enabled)
        .bind(
            profile
                .saved_routes
                .iter()
                .map(TripId::inner)
                .collect::<Vec<_>>(),
        )
        .execute(self.pool())
        .await
        .context("Failed to create or update profile")
        .map(|_| ())
    }
}
