use crate::repository::Repository;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use entities::trips::{ShareToken, Trip};
use entities::users::UserId;
use shared_kernel::date_time::calendar::to_iso_string;
use sqlx::types::Json;
use sqlx::FromRow;
use use_cases::trip_store::document::{decode_document, StopDocument, TripDocument};
use use_cases::trip_store::{PublicTripFinder, TripStore};
use uuid::Uuid;

const TRIP_COLUMNS: &str = "id, name, start_date, end_date, notes, travelers, budget, stops, is_public, share_token";

#[derive(FromRow)]
struct TripRow {
    id: Uuid,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    notes: Option<String>,
    travelers: Option<i64>,
    budget: Option<f64>,
    stops: Json<Vec<StopDocument>>,
    is_public: bool,
    share_token: Option<String>,
}

impl From<TripRow> for TripDocument {
    fn from(row: TripRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name,
            start_date: to_iso_string(row.start_date),
            end_date: to_iso_string(row.end_date),
            notes: row.notes,
            travelers: row.travelers.and_then(|count| u32::try_from(count).ok()),
            budget: row.budget,
            stops: row.stops.0,
            is_public: row.is_public,
            share_token: row.share_token,
        }
    }
}

#[async_trait]
impl TripStore for Repository {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn load_trips(&self, owner: &UserId) -> anyhow::Result<Vec<Trip>> {
        let rows = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {TRIP_COLUMNS} FROM public.trip WHERE user_id = $1 ORDER BY position"
        ))
        .bind(owner.as_str())
        .fetch_all(self.pool())
        .await
        .context("Failed to fetch trips")?;

        Ok(rows
            .into_iter()
            .filter_map(|row| decode_document(row.into()))
            .collect())
    }

    #[tracing::instrument(err, skip(self, trips), fields(count = trips.len()), level = "info")]
    async fn save_trips(&self, owner: &UserId, trips: &[Trip]) -> anyhow::Result<()> {
        let mut transaction = self
            .pool()
            .begin()
            .await
            .context("Failed to start transaction")?;

        sqlx::query("DELETE FROM public.trip WHERE user_id = $1")
            .bind(owner.as_str())
            .execute(&mut transaction)
            .await
            .context("Failed to clear trips")?;

        for (position, trip) in trips.iter().enumerate() {
            let position = i32::try_from(position).context("Too many trips to store")?;
            let stops = trip.stops.iter().map(StopDocument::from).collect::<Vec<_>>();
            sqlx::query(
                r#"
                INSERT INTO public.trip
                    (id, user_id, position, name, start_date, end_date, notes, travelers, budget, stops, is_public, share_token, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, now())
                "#,
            )
            .bind(trip.id.inner())
            .bind(owner.as_str())
            .bind(position)
            .bind(trip.name.inner())
            .bind(trip.start_date())
            .bind(trip.end_date())
            .bind(trip.notes.as_deref())
            .bind(trip.travelers.map(i64::from))
            .bind(trip.budget)
            .bind(Json(stops))
            .bind(trip.is_public)
            .bind(trip.share_token.as_ref().map(ShareToken::as_str))
            .execute(&mut transaction)
            .await
            .with_context(|| format!("Failed to insert trip {}", trip.id))?;
        }

        transaction
            .commit()
            .await
            .context("Failed to commit trips")
    }
}

#[async_trait]
impl PublicTripFinder for Repository {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_by_share_token(&self, token: &ShareToken) -> anyhow::Result<Option<Trip>> {
        let row = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {TRIP_COLUMNS} FROM public.trip WHERE share_token = $1 AND is_public"
        ))
        .bind(token.as_str())
        .fetch_optional(self.pool())
        .await
        .context("Failed to fetch shared trip")?;

        Ok(row.and_then(|row| decode_document(row.into())))
    }
}
