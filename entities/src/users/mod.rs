pub mod details;

pub use details::{
    InterrailPass, Language, TravelPreferences, UserEmail, UserId, UserProfile,
};
