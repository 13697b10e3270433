use entities::users::{UserEmail, UserId};
#[cfg(test)]
use mockall::automock;

/// The authenticated caller of an interactor.
#[cfg_attr(test, automock)]
pub trait Actor: Send + Sync {
    fn user_id(&self) -> UserId;

    /// E-mail claim carried by the token, when the issuer provides one.
    fn email(&self) -> Option<UserEmail>;
}
