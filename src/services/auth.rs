//! Signed-in state of the client.

use crate::repository::backend::{IdentityProvider, UserSession};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<UserSession>,
}

impl Session {
    pub fn user(&self) -> Option<&UserSession> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Picks up an existing session from the provider.
    pub async fn restore<P>(provider: &P) -> ServiceResult<Self>
    where
        P: IdentityProvider + ?Sized,
    {
        let user = provider.restore_session().await.map_err(|err| {
            log::error!("Failed to restore session: {err}");
            ServiceError::from(err)
        })?;
        match &user {
            Some(user) => log::info!("Signed in as {}", user.email),
            None => log::info!("No active session"),
        }
        Ok(Self { user })
    }

    /// Signs out. The local state is cleared only once the provider agreed.
    pub async fn logout<P>(&mut self, provider: &P) -> ServiceResult<()>
    where
        P: IdentityProvider + ?Sized,
    {
        if !self.is_authenticated() {
            return Err(ServiceError::Unauthorized);
        }
        provider.logout().await?;
        self.user = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockIdentity;

    fn user() -> UserSession {
        UserSession {
            user_id: "u-1".to_string(),
            email: "jane@acme.com".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn restore_and_logout() {
        let mut provider = MockIdentity::new();
        provider
            .expect_restore_session()
            .returning(|| Ok(Some(user())));
        provider.expect_logout().times(1).returning(|| Ok(()));

        let mut session = Session::restore(&provider).await.unwrap();
        assert!(session.is_authenticated());
        assert_eq!(
            session.user().map(UserSession::display_name).as_deref(),
            Some("Jane")
        );

        session.logout(&provider).await.unwrap();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn failed_logout_keeps_the_session() {
        let mut provider = MockIdentity::new();
        provider
            .expect_restore_session()
            .returning(|| Ok(Some(user())));
        provider
            .expect_logout()
            .returning(|| Err(RepositoryError::Transport("offline".to_string())));

        let mut session = Session::restore(&provider).await.unwrap();

        assert!(session.logout(&provider).await.is_err());
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn logout_without_session() {
        let mut provider = MockIdentity::new();
        provider.expect_restore_session().returning(|| Ok(None));
        provider.expect_logout().never();

        let mut session = Session::restore(&provider).await.unwrap();

        assert!(matches!(
            session.logout(&provider).await,
            Err(ServiceError::Unauthorized)
        ));
    }
}
