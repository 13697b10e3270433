//! Process-local key/value store. Trips are kept as the same JSON blob the
//! redis adapter writes, so both share the decoding rules.

use crate::profile::ProfileRepo;
use crate::trip_store::document::{decode_trips, encode_trips};
use crate::trip_store::{PublicTripFinder, TripStore};
use async_trait::async_trait;
use entities::trips::{ShareToken, Trip};
use entities::users::{UserId, UserProfile};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const TRIPS_PREFIX: &str = "trips:";
const PROFILE_PREFIX: &str = "profile:";

#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a raw value, bypassing encoding. Used to seed data in tests.
    pub async fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().await.insert(key.into(), value.into());
    }

    pub fn trips_key(owner: &UserId) -> String {
        format!("{TRIPS_PREFIX}{owner}")
    }

    fn profile_key(user: &UserId) -> String {
        format!("{PROFILE_PREFIX}{user}")
    }
}

#[async_trait]
impl TripStore for InMemoryStore {
    async fn load_trips(&self, owner: &UserId) -> anyhow::Result<Vec<Trip>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&Self::trips_key(owner))
            .map(|blob| decode_trips(blob))
            .unwrap_or_default())
    }

    async fn save_trips(&self, owner: &UserId, trips: &[Trip]) -> anyhow::Result<()> {
        let blob = encode_trips(trips)?;
        self.entries
            .write()
            .await
            .insert(Self::trips_key(owner), blob);
        Ok(())
    }
}

#[async_trait]
impl PublicTripFinder for InMemoryStore {
    async fn find_by_share_token(&self, token: &ShareToken) -> anyhow::Result<Option<Trip>> {
        let entries = self.entries.read().await;
        let trip = entries
            .iter()
            .filter(|(key, _)| key.starts_with(TRIPS_PREFIX))
            .flat_map(|(_, blob)| decode_trips(blob))
            .find(|trip| trip.public_token() == Some(token));
        Ok(trip)
    }
}

#[async_trait]
impl ProfileRepo for InMemoryStore {
    async fn find_profile(&self, user: &UserId) -> anyhow::Result<Option<UserProfile>> {
        let entries = self.entries.read().await;
        entries
            .get(&Self::profile_key(user))
            .map(|blob| serde_json::from_str(blob))
            .transpose()
            .map_err(anyhow::Error::from)
    }

    async fn save_profile(&self, profile: &UserProfile) -> anyhow::Result<()> {
        let blob = serde_json::to_string(profile)?;
        self.entries
            .write()
            .await
            .insert(Self::profile_key(&profile.user_id), blob);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use entities::cities::City;
    use entities::trips::{TripName, TripStop};
    use entities::users::UserEmail;
    use shared_kernel::date_time::TimeFrame;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn trip(name: &str) -> Trip {
        let mut trip = Trip::new(
            TripName::try_from(name).unwrap(),
            TimeFrame::new(date(1), date(10)),
        );
        trip.stops.push(TripStop::scheduled(
            City::new("paris", "Paris", "France", 48.8566, 2.3522),
            date(1),
            date(3),
        ));
        trip
    }

    #[tokio::test]
    async fn test_owner_without_trips_gets_an_empty_list() {
        let store = InMemoryStore::new();
        let trips = store.load_trips(&UserId::from("nobody")).await.unwrap();
        assert!(trips.is_empty());
    }

    #[tokio::test]
    async fn test_saved_trips_are_loaded_in_order() {
        let store = InMemoryStore::new();
        let owner = UserId::from("owner");
        let trips = vec![trip("First"), trip("Second")];

        store.save_trips(&owner, &trips).await.unwrap();

        assert_eq!(store.load_trips(&owner).await.unwrap(), trips);
        assert!(store
            .load_trips(&UserId::from("someone-else"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_blob_reads_as_no_trips() {
        let store = InMemoryStore::new();
        let owner = UserId::from("owner");
        store
            .insert_raw(InMemoryStore::trips_key(&owner), "definitely not json")
            .await;

        assert!(store.load_trips(&owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_only_published_trips_are_found_by_token() {
        let store = InMemoryStore::new();
        let mut shared = trip("Shared");
        let token = shared.publish();
        let mut withdrawn = trip("Withdrawn");
        let withdrawn_token = withdrawn.publish();
        withdrawn.unpublish();

        store
            .save_trips(&UserId::from("a"), &[shared.clone()])
            .await
            .unwrap();
        store
            .save_trips(&UserId::from("b"), &[withdrawn])
            .await
            .unwrap();

        let found = store.find_by_share_token(&token).await.unwrap();
        assert_eq!(found, Some(shared));
        let hidden = store.find_by_share_token(&withdrawn_token).await.unwrap();
        assert_eq!(hidden, None);
    }

    #[tokio::test]
    async fn test_profiles_round_trip() {
        let store = InMemoryStore::new();
        let profile = UserProfile::new(
            UserId::from("traveller"),
            UserEmail::try_from("traveller@example.com".to_string()).unwrap(),
        );

        store.save_profile(&profile).await.unwrap();

        let found = store.find_profile(&profile.user_id).await.unwrap();
        assert_eq!(found, Some(profile));
    }
}
