use crate::actor::Actor;
use crate::cities::CityCatalog;
use async_trait::async_trait;
use entities::cities::CityId;
use entities::trips::TripId;
use entities::users::{
    InterrailPass, Language, TravelPreferences, UserEmail, UserId, UserProfile,
};
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("User not found")]
    NotFound,
    #[error("{0}")]
    InvalidInput(String),
    #[error("City with ID {0} not found")]
    UnknownCity(CityId),
    #[error("Route already saved")]
    RouteAlreadySaved(TripId),
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileRepo: Send + Sync {
    async fn find_profile(&self, user: &UserId) -> anyhow::Result<Option<UserProfile>>;

    async fn save_profile(&self, profile: &UserProfile) -> anyhow::Result<()>;
}

/// Partial profile edit; `None` leaves a field untouched.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    /// An empty id clears the home city.
    pub home_city: Option<String>,
    pub travel_preferences: Option<TravelPreferences>,
    pub interrail_pass: Option<InterrailPass>,
    pub language: Option<Language>,
    pub notifications_enabled: Option<bool>,
}

#[async_trait]
pub trait ProfileInteractor: Send + Sync {
    /// Creates the caller's profile on first sign-in, refreshes the e-mail afterwards.
    async fn authenticate(
        &self,
        actor: &dyn Actor,
        email: Option<String>,
    ) -> Result<UserProfile, ProfileError>;

    async fn get(&self, actor: &dyn Actor) -> Result<UserProfile, ProfileError>;

    async fn update(
        &self,
        actor: &dyn Actor,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ProfileError>;

    async fn save_route(
        &self,
        actor: &dyn Actor,
        trip: TripId,
    ) -> Result<Vec<TripId>, ProfileError>;

    /// Removing a route that was never saved is a no-op.
    async fn remove_route(
        &self,
        actor: &dyn Actor,
        trip: TripId,
    ) -> Result<Vec<TripId>, ProfileError>;
}

pub struct ProfileInteractorImpl {
    repo: Arc<dyn ProfileRepo>,
    catalog: Arc<dyn CityCatalog>,
}

impl ProfileInteractorImpl {
    pub fn new(repo: Arc<dyn ProfileRepo>, catalog: Arc<dyn CityCatalog>) -> Self {
        Self { repo, catalog }
    }
}

fn parse_email(email: String) -> Result<UserEmail, ProfileError> {
    UserEmail::try_from(email).map_err(ProfileError::InvalidInput)
}

#[async_trait]
impl ProfileInteractor for ProfileInteractorImpl {
    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn authenticate(
        &self,
        actor: &dyn Actor,
        email: Option<String>,
    ) -> Result<UserProfile, ProfileError> {
        let email = match email {
            Some(email) => parse_email(email)?,
            None => actor.email().ok_or_else(|| {
                ProfileError::InvalidInput("An email is required to authenticate".to_string())
            })?,
        };

        let user_id = actor.user_id();
        let profile = match self.repo.find_profile(&user_id).await? {
            Some(existing) => UserProfile { email, ..existing },
            None => UserProfile::new(user_id, email),
        };
        self.repo.save_profile(&profile).await?;
        Ok(profile)
    }

    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn get(&self, actor: &dyn Actor) -> Result<UserProfile, ProfileError> {
        self.repo
            .find_profile(&actor.user_id())
            .await?
            .ok_or(ProfileError::NotFound)
    }

    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn update(
        &self,
        actor: &dyn Actor,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ProfileError> {
        let mut profile = self.get(actor).await?;

        if let Some(email) = update.email {
            profile.email = parse_email(email)?;
        }
        if let Some(home_city) = update.home_city {
            profile.home_city = match home_city.trim() {
                "" => None,
                id => {
                    let id = CityId::from(id);
                    let city = self
                        .catalog
                        .get_city_by_id(&id)
                        .ok_or(ProfileError::UnknownCity(id))?;
                    Some(city.id)
                }
            };
        }
        if let Some(preferences) = update.travel_preferences {
            profile.travel_preferences = preferences;
        }
        if let Some(pass) = update.interrail_pass {
            profile.interrail_pass = pass;
        }
        if let Some(language) = update.language {
            profile.language = language;
        }
        if let Some(enabled) = update.notifications_enabled {
            profile.notifications_enabled = enabled;
        }

        self.repo.save_profile(&profile).await?;
        Ok(profile)
    }

    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn save_route(
        &self,
        actor: &dyn Actor,
        trip: TripId,
    ) -> Result<Vec<TripId>, ProfileError> {
        let mut profile = self.get(actor).await?;
        if !profile.save_route(trip) {
            return Err(ProfileError::RouteAlreadySaved(trip));
        }

        self.repo.save_profile(&profile).await?;
        Ok(profile.saved_routes)
    }

    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn remove_route(
        &self,
        actor: &dyn Actor,
        trip: TripId,
    ) -> Result<Vec<TripId>, ProfileError> {
        let mut profile = self.get(actor).await?;
        profile.remove_route(trip);

        self.repo.save_profile(&profile).await?;
        Ok(profile.saved_routes)
    }
}
