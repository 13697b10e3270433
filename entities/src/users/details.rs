use crate::cities::CityId;
use crate::trips::TripId;
use serde::{Deserialize, Serialize};
use shared_kernel::{non_empty_string, string_key};

string_key!(UserId);
non_empty_string!(UserEmailInner);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserEmail(UserEmailInner);

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl std::fmt::Display for UserEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserEmail> for String {
    fn from(value: UserEmail) -> Self {
        value.0.into()
    }
}

impl TryFrom<String> for UserEmail {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        use validator::validate_email;
        let lowercase = UserEmailInner::try_from(value.to_lowercase())?;
        let address: &str = lowercase.as_ref();

        if validate_email(address) {
            return Ok(UserEmail(lowercase));
        }
        Err(format!("{address} is an invalid email"))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TravelPreferences {
    pub prefer_night_trains: bool,
    pub scenic_routes: bool,
    pub low_budget: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterrailPass {
    Continuous,
    Flexi,
    #[default]
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
    Fr,
    Es,
    It,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: UserEmail,
    #[serde(default)]
    pub home_city: Option<CityId>,
    #[serde(default)]
    pub travel_preferences: TravelPreferences,
    #[serde(default)]
    pub interrail_pass: InterrailPass,
    #[serde(default)]
    pub language: Language,
    #[serde(default = "notifications_default")]
    pub notifications_enabled: bool,
    /// Bookmarked trips, oldest first.
    #[serde(default)]
    pub saved_routes: Vec<TripId>,
}

fn notifications_default() -> bool {
    true
}

impl UserProfile {
    pub fn new(user_id: UserId, email: UserEmail) -> Self {
        Self {
            user_id,
            email,
            home_city: None,
            travel_preferences: TravelPreferences::default(),
            interrail_pass: InterrailPass::default(),
            language: Language::default(),
            notifications_enabled: notifications_default(),
            saved_routes: vec![],
        }
    }

    /// Bookmarks `trip`; `false` when it was already saved.
    pub fn save_route(&mut self, trip: TripId) -> bool {
        if self.saved_routes.contains(&trip) {
            return false;
        }
        self.saved_routes.push(trip);
        true
    }

    pub fn remove_route(&mut self, trip: TripId) {
        self.saved_routes.retain(|saved| *saved != trip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("traveller@example.com")]
    #[case("Traveller@Example.COM")]
    fn test_valid_emails_are_accepted_and_lowercased(#[case] input: &str) {
        let email = UserEmail::try_from(input.to_string()).unwrap();
        assert_eq!(email.as_ref(), "traveller@example.com");
    }

    #[rstest]
    #[case("")]
    #[case("just-an-email.com")]
    #[case("two@@example.com")]
    fn test_invalid_emails_are_rejected(#[case] input: &str) {
        assert!(UserEmail::try_from(input.to_string()).is_err());
    }

    #[test]
    fn test_profile_defaults_match_a_new_account() {
        let profile = UserProfile::new(
            UserId::from("user-1"),
            UserEmail::try_from("a@b.com".to_string()).unwrap(),
        );
        assert_eq!(profile.interrail_pass, InterrailPass::None);
        assert_eq!(profile.language, Language::En);
        assert!(profile.notifications_enabled);
        assert_eq!(profile.travel_preferences, TravelPreferences::default());
    }

    #[test]
    fn test_profile_deserializes_with_missing_optional_fields() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"userId":"u","email":"a@b.com"}"#).unwrap();
        assert!(profile.notifications_enabled);
        assert_eq!(profile.home_city, None);
        assert!(profile.saved_routes.is_empty());
    }

    #[test]
    fn test_routes_are_saved_once() {
        let mut profile = UserProfile::new(
            UserId::from("user-1"),
            UserEmail::try_from("a@b.com".to_string()).unwrap(),
        );
        let (first, second) = (TripId::new(), TripId::new());

        assert!(profile.save_route(first));
        assert!(profile.save_route(second));
        assert!(!profile.save_route(first));
        assert_eq!(profile.saved_routes, vec![first, second]);

        profile.remove_route(first);
        profile.remove_route(first);
        assert_eq!(profile.saved_routes, vec![second]);
    }

    #[rstest]
    #[case("{}", TravelPreferences::default())]
    #[case(
        r#"{"scenicRoutes":true}"#,
        TravelPreferences { scenic_routes: true, ..TravelPreferences::default() }
    )]
    fn test_missing_travel_preferences_fall_back_to_defaults(
        #[case] raw: &str,
        #[case] expected: TravelPreferences,
    ) {
        let preferences: TravelPreferences = serde_json::from_str(raw).unwrap();
        assert_eq!(preferences, expected);
    }
}
