//! Registration, login and guest entry

use validator::Validate;

use crate::{
    client::{ClientError, ClientResult, UserStore, VisitorCounter},
    models::{
        user::{LoginRequest, RegisterRequest},
        validation_message,
    },
    session::AppSession,
};

/// Shown after a registration was accepted
pub const REGISTERED_MESSAGE: &str =
    "Your registration has been submitted. Please wait for an administrator to approve it.";

fn check(form: &impl Validate) -> ClientResult<()> {
    form.validate()
        .map_err(|errors| ClientError::Validation(validation_message(&errors)))
}

/// Submit a registration.
///
/// Invalid input is rejected before any request. On success the session
/// returns to the home screen without logging anyone in.
pub async fn register<S>(store: &S, session: &AppSession, form: &RegisterRequest) -> ClientResult<(AppSession, &'static str)>
where
    S: UserStore + ?Sized,
{
    check(form)?;
    let user = store.register(form).await?;
    tracing::info!(nickname = %user.nickname, "registration submitted");
    Ok((session.registered(), REGISTERED_MESSAGE))
}

/// Log in and route to the screen matching the user's role
pub async fn login<S>(store: &S, session: &AppSession, form: &LoginRequest) -> ClientResult<AppSession>
where
    S: UserStore + ?Sized,
{
    check(form)?;
    let user = store.login(form).await?;
    tracing::info!(nickname = %user.nickname, admin = user.is_admin, "logged in");
    Ok(session.logged_in(user))
}

/// Enter as a guest; purely local
pub fn enter_as_guest(session: &AppSession) -> AppSession {
    session.enter_as_guest()
}

/// Count this page load; returns today's visitor count
pub async fn record_visit<C>(counter: &C) -> ClientResult<i64>
where
    C: VisitorCounter + ?Sized,
{
    counter.increment_visitor_count().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::MockUserStore,
        models::user::User,
        session::{Actor, View},
    };

    fn user(nickname: &str, is_admin: bool) -> User {
        User {
            id: 3,
            nickname: nickname.to_string(),
            password: None,
            note: String::new(),
            approved: true,
            is_admin,
        }
    }

    #[tokio::test]
    async fn note_of_101_chars_never_reaches_the_store() {
        let mut store = MockUserStore::new();
        store.expect_register().never();

        let form = RegisterRequest::new("abc", "pw", "x".repeat(101));
        let err = register(&store, &AppSession::new(), &form).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn note_of_100_chars_is_submitted() {
        let mut store = MockUserStore::new();
        store
            .expect_register()
            .withf(|form| form.note.chars().count() == 100)
            .times(1)
            .returning(|form| {
                let mut created = user(&form.nickname, false);
                created.approved = false;
                Ok(created)
            });

        // Multi-byte characters count once each.
        let form = RegisterRequest::new("abc", "pw", "가".repeat(100));
        let (session, message) = register(&store, &AppSession::new(), &form).await.unwrap();
        assert_eq!(session.view(), View::Home);
        assert!(session.actor().is_none());
        assert_eq!(message, REGISTERED_MESSAGE);
    }

    #[tokio::test]
    async fn empty_fields_are_rejected_locally() {
        let mut store = MockUserStore::new();
        store.expect_register().never();
        store.expect_login().never();
        let session = AppSession::new();

        let no_nick = RegisterRequest::new("", "pw", "");
        assert!(matches!(register(&store, &session, &no_nick).await, Err(ClientError::Validation(_))));
        let no_password = RegisterRequest::new("abc", "", "");
        assert!(matches!(register(&store, &session, &no_password).await, Err(ClientError::Validation(_))));

        let no_password = LoginRequest::new("abc", "");
        assert!(matches!(login(&store, &session, &no_password).await, Err(ClientError::Validation(_))));
    }

    #[tokio::test]
    async fn login_routes_members_to_the_calendar() {
        let mut store = MockUserStore::new();
        store
            .expect_login()
            .returning(|form| Ok(user(&form.nickname, false)));

        let session = login(&store, &AppSession::new(), &LoginRequest::new("abc", "pw"))
            .await
            .unwrap();
        assert_eq!(session.view(), View::Calendar);
        assert!(matches!(session.actor(), Some(Actor::Member(_))));
    }

    #[tokio::test]
    async fn login_routes_admins_to_the_dashboard() {
        let mut store = MockUserStore::new();
        store.expect_login().returning(|form| Ok(user(&form.nickname, true)));

        let session = login(&store, &AppSession::new(), &LoginRequest::new("root", "pw"))
            .await
            .unwrap();
        assert_eq!(session.view(), View::Admin);
    }

    #[tokio::test]
    async fn server_message_is_passed_through() {
        let mut store = MockUserStore::new();
        store.expect_login().returning(|_| {
            Err(ClientError::PendingApproval(
                "Registration is awaiting admin approval".to_string(),
            ))
        });

        let before = AppSession::new();
        let err = login(&store, &before, &LoginRequest::new("abc", "pw"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Registration is awaiting admin approval");
    }

    #[test]
    fn guest_entry_needs_no_store() {
        let session = enter_as_guest(&AppSession::new());
        assert_eq!(session.actor(), Some(&Actor::Guest));
        assert_eq!(session.view(), View::Calendar);
    }
}
