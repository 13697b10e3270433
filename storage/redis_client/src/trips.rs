//! Trips live as one JSON blob per owner, the server-side twin of the
//! browser's local storage. Published trips get a `share:{token}` entry
//! pointing at their owner.

use crate::client::Client;
use anyhow::Context;
use async_trait::async_trait;
use entities::trips::{ShareToken, Trip};
use entities::users::UserId;
use std::collections::HashSet;
use use_cases::trip_store::document::{decode_trips, encode_trips};
use use_cases::trip_store::{PublicTripFinder, TripStore};

fn trips_key(owner: &UserId) -> String {
    format!("trips:{owner}")
}

fn share_key(token: &ShareToken) -> String {
    format!("share:{token}")
}

fn public_tokens(trips: &[Trip]) -> HashSet<ShareToken> {
    trips
        .iter()
        .filter_map(Trip::public_token)
        .cloned()
        .collect()
}

impl Client {
    async fn read_trips(&self, owner: &UserId) -> anyhow::Result<Vec<Trip>> {
        let mut conn = self.connection();
        let key = trips_key(owner);
        let blob: Option<String> = redis::Cmd::get(&key)
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to get trips for key {key}"))?;

        Ok(blob.map(|blob| decode_trips(&blob)).unwrap_or_default())
    }
}

#[async_trait]
impl TripStore for Client {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn load_trips(&self, owner: &UserId) -> anyhow::Result<Vec<Trip>> {
        self.read_trips(owner).await
    }

    #[tracing::instrument(err, skip(self, trips), fields(count = trips.len()), level = "info")]
    async fn save_trips(&self, owner: &UserId, trips: &[Trip]) -> anyhow::Result<()> {
        let blob = encode_trips(trips)?;
        let published = public_tokens(trips);
        let withdrawn = public_tokens(&self.read_trips(owner).await?)
            .into_iter()
            .filter(|token| !published.contains(token))
            .collect::<Vec<_>>();

        let mut pipe = redis::pipe();
        pipe.atomic().set(trips_key(owner), blob).ignore();
        for token in &published {
            pipe.set(share_key(token), owner.as_str()).ignore();
        }
        for token in &withdrawn {
            pipe.del(share_key(token)).ignore();
        }

        let mut conn = self.connection();
        pipe.query_async::<_, ()>(&mut conn)
            .await
            .with_context(|| format!("Failed to save trips for {owner}"))
    }
}

#[async_trait]
impl PublicTripFinder for Client {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_by_share_token(&self, token: &ShareToken) -> anyhow::Result<Option<Trip>> {
        let mut conn = self.connection();
        let owner: Option<String> = redis::Cmd::get(share_key(token))
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to resolve share token {token}"))?;

        let Some(owner) = owner else {
            return Ok(None);
        };
        let trips = self.read_trips(&UserId::from(owner)).await?;
        Ok(trips
            .into_iter()
            .find(|trip| trip.public_token() == Some(token)))
    }
}
