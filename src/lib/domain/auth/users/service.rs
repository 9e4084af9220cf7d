//! User service module

use std::sync::Arc;

use askama::Template;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use uuid::Uuid;

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    auth::{
        emails::verification_code::VerificationCodeTemplate,
        users::{
            errors::{GetUserError, RegisterUserError, UpdateUserError, VerifyCodeError},
            NewRegistration, UserRepository, Username, VerifyCode,
        },
    },
    communication::mailer::Mailer,
};

/// Subject line of the verification email
const VERIFICATION_EMAIL_SUBJECT: &str = "Verification Code | Anon Messenger";

/// User service: registration, verification and the acceptance gate.
#[async_trait]
pub trait UserService: Clone + Send + Sync + 'static {
    /// Registers a user and emails them a one-time verification code.
    ///
    /// A registration against an unverified email overwrites that record and
    /// issues a fresh code with a new 1-hour window. The stored record is not
    /// rolled back when email delivery fails.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] containing the user's UUID, or an [`Err`]
    /// containing a [`RegisterUserError`] if the user cannot be registered.
    async fn register(&self, registration: &NewRegistration) -> Result<Uuid, RegisterUserError>;

    /// Validates a submitted verification code for the named user and, on
    /// success, completes the one-way transition to verified.
    async fn verify_code(&self, username: &Username, code: &str) -> Result<(), VerifyCodeError>;

    /// Whether the username is still free among verified users.
    async fn username_available(&self, username: &Username) -> Result<bool, GetUserError>;

    /// The current value of the user's acceptance gate.
    async fn is_accepting_messages(&self, user_id: &Uuid) -> Result<bool, GetUserError>;

    /// Sets the user's acceptance gate. No transition restrictions.
    async fn set_accepting_messages(
        &self,
        user_id: &Uuid,
        accepting: bool,
    ) -> Result<(), UpdateUserError>;
}

#[cfg(test)]
mock! {
    pub UserService {}

    impl Clone for UserService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl UserService for UserService {
        async fn register(&self, registration: &NewRegistration) -> Result<Uuid, RegisterUserError>;
        async fn verify_code(&self, username: &Username, code: &str) -> Result<(), VerifyCodeError>;
        async fn username_available(&self, username: &Username) -> Result<bool, GetUserError>;
        async fn is_accepting_messages(&self, user_id: &Uuid) -> Result<bool, GetUserError>;
        async fn set_accepting_messages(&self, user_id: &Uuid, accepting: bool) -> Result<(), UpdateUserError>;
    }
}

/// User service implementation
#[derive(Debug, Clone)]
pub struct UserServiceImpl<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
}

impl<R, M> UserServiceImpl<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    /// Create a new user service
    pub fn new(repo: Arc<R>, mailer: Arc<M>) -> Self {
        Self { repo, mailer }
    }
}

#[async_trait]
impl<R, M> UserService for UserServiceImpl<R, M>
where
    R: UserRepository,
    M: Mailer,
{
    async fn register(&self, registration: &NewRegistration) -> Result<Uuid, RegisterUserError> {
        let code = VerifyCode::generate();
        let code_expires_at = Utc::now() + Duration::hours(1);

        let user_id = self
            .repo
            .upsert_unverified(registration, &code, code_expires_at)
            .await?;

        let template = VerificationCodeTemplate::new(registration.username(), &code);
        let html = template.render().map_err(anyhow::Error::new)?;
        let html = css_inline::inline(&html).map_err(anyhow::Error::new)?;
        let plain = template.render_plain();

        self.mailer
            .send_email(
                registration.email(),
                VERIFICATION_EMAIL_SUBJECT,
                &html,
                &plain,
            )
            .await?;

        Ok(user_id)
    }

    async fn verify_code(&self, username: &Username, code: &str) -> Result<(), VerifyCodeError> {
        let user = self.repo.get_user_by_username(username).await?;

        if user.is_verified {
            return Err(VerifyCodeError::AlreadyVerified);
        }

        // An unverified user without a pending code cannot match anything.
        let stored = user
            .verify_code
            .as_ref()
            .ok_or(VerifyCodeError::InvalidCode)?;

        if !constant_time_eq(code.as_bytes(), stored.as_str().as_bytes()) {
            return Err(VerifyCodeError::InvalidCode);
        }

        let expires_at = user
            .verify_code_expires_at
            .ok_or(VerifyCodeError::InvalidCode)?;

        if Utc::now() >= expires_at {
            return Err(VerifyCodeError::CodeExpired);
        }

        self.repo.mark_verified(&user.id).await?;

        Ok(())
    }

    async fn username_available(&self, username: &Username) -> Result<bool, GetUserError> {
        let taken = self.repo.verified_username_exists(username).await?;

        Ok(!taken)
    }

    async fn is_accepting_messages(&self, user_id: &Uuid) -> Result<bool, GetUserError> {
        let user = self.repo.get_user_by_id(user_id).await?;

        Ok(user.is_accepting_messages)
    }

    async fn set_accepting_messages(
        &self,
        user_id: &Uuid,
        accepting: bool,
    ) -> Result<(), UpdateUserError> {
        self.repo.set_accepting_messages(user_id, accepting).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;
    use chrono::{DateTime, Utc};
    use mockall::predicate::eq;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::domain::{
        auth::users::{tests::MockUserRepository, Password, User},
        communication::{
            email_addresses::EmailAddress,
            mailer::{tests::MockMailer, MailerError},
        },
    };

    use super::*;

    fn registration(username: &str) -> NewRegistration {
        NewRegistration::new(
            Uuid::now_v7(),
            Username::new(username).expect("valid username"),
            EmailAddress::new("email@example.com").expect("valid email"),
            Password::new("correcthorsebatterystaple").expect("valid password"),
        )
    }

    fn unverified_user(username: &str, code: &str, expires_at: DateTime<Utc>) -> User {
        User {
            id: Uuid::now_v7(),
            username: Username::new(username).expect("valid username"),
            email: EmailAddress::new_unchecked("email@example.com"),
            verify_code: Some(VerifyCode::new(code).expect("valid code")),
            verify_code_expires_at: Some(expires_at),
            is_verified: false,
            is_accepting_messages: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_user_and_sends_code() -> TestResult {
        let registration = registration("alice");
        let expected_id = registration.id().clone();

        let mut repo = MockUserRepository::new();

        repo.expect_upsert_unverified()
            .times(1)
            .withf(move |req, code, expires_at| {
                req.username().as_str() == "alice"
                    && code.as_str().len() == 6
                    && *expires_at > Utc::now()
            })
            .returning(move |_, _, _| Ok(expected_id));

        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .times(1)
            .withf(|to, subject, html, plain| {
                to.as_str() == "email@example.com"
                    && subject.contains("Verification Code")
                    && html.contains("alice")
                    && plain.contains("alice")
            })
            .returning(|_, _, _, _| Ok(()));

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(mailer));

        let user_id = service.register(&registration).await?;

        assert_eq!(&user_id, registration.id());

        Ok(())
    }

    #[tokio::test]
    async fn test_register_username_taken() -> TestResult {
        let registration = registration("alice");

        let mut repo = MockUserRepository::new();

        repo.expect_upsert_unverified()
            .times(1)
            .returning(|_, _, _| Err(RegisterUserError::UsernameTaken));

        let mut mailer = MockMailer::new();
        mailer.expect_send_email().times(0);

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(mailer));

        let result = service.register(&registration).await;

        assert!(matches!(result, Err(RegisterUserError::UsernameTaken)));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_reports_delivery_failure_without_rollback() -> TestResult {
        let registration = registration("alice");
        let user_id = registration.id().clone();

        let mut repo = MockUserRepository::new();

        repo.expect_upsert_unverified()
            .times(1)
            .returning(move |_, _, _| Ok(user_id));

        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .times(1)
            .returning(|_, _, _, _| Err(MailerError::SendError));

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(mailer));

        let result = service.register(&registration).await;

        assert!(matches!(result, Err(RegisterUserError::EmailDelivery(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_code_success_marks_user_verified() -> TestResult {
        let user = unverified_user("alice", "123456", Utc::now() + Duration::minutes(30));
        let user_id = user.id.clone();
        let username = user.username.clone();

        let mut repo = MockUserRepository::new();

        repo.expect_get_user_by_username()
            .times(1)
            .with(eq(username.clone()))
            .returning(move |_| Ok(user.clone()));

        repo.expect_mark_verified()
            .times(1)
            .with(eq(user_id.clone()))
            .returning(|_| Ok(()));

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(MockMailer::new()));

        service.verify_code(&username, "123456").await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_code_wrong_code_leaves_state_unchanged() -> TestResult {
        let user = unverified_user("alice", "123456", Utc::now() + Duration::minutes(30));
        let username = user.username.clone();

        let mut repo = MockUserRepository::new();

        repo.expect_get_user_by_username()
            .times(1)
            .returning(move |_| Ok(user.clone()));

        repo.expect_mark_verified().times(0);

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(MockMailer::new()));

        let result = service.verify_code(&username, "654321").await;

        assert!(matches!(result, Err(VerifyCodeError::InvalidCode)));

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_code_expired_even_when_code_matches() -> TestResult {
        let user = unverified_user("alice", "123456", Utc::now() - Duration::minutes(1));
        let username = user.username.clone();

        let mut repo = MockUserRepository::new();

        repo.expect_get_user_by_username()
            .times(1)
            .returning(move |_| Ok(user.clone()));

        repo.expect_mark_verified().times(0);

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(MockMailer::new()));

        let result = service.verify_code(&username, "123456").await;

        assert!(matches!(result, Err(VerifyCodeError::CodeExpired)));

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_code_already_verified() -> TestResult {
        let mut user = unverified_user("alice", "123456", Utc::now() + Duration::minutes(30));
        user.is_verified = true;
        let username = user.username.clone();

        let mut repo = MockUserRepository::new();

        repo.expect_get_user_by_username()
            .times(1)
            .returning(move |_| Ok(user.clone()));

        repo.expect_mark_verified().times(0);

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(MockMailer::new()));

        let result = service.verify_code(&username, "123456").await;

        assert!(matches!(result, Err(VerifyCodeError::AlreadyVerified)));

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_code_unknown_user() -> TestResult {
        let username = Username::new("ghost")?;

        let mut repo = MockUserRepository::new();

        repo.expect_get_user_by_username()
            .times(1)
            .returning(|_| Err(GetUserError::UserNotFound));

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(MockMailer::new()));

        let result = service.verify_code(&username, "123456").await;

        assert!(matches!(result, Err(VerifyCodeError::UserNotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn test_username_available_when_no_verified_owner() -> TestResult {
        let username = Username::new("alice")?;

        let mut repo = MockUserRepository::new();

        repo.expect_verified_username_exists()
            .times(1)
            .with(eq(username.clone()))
            .returning(|_| Ok(false));

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(MockMailer::new()));

        assert!(service.username_available(&username).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_username_not_available_when_taken() -> TestResult {
        let username = Username::new("alice")?;

        let mut repo = MockUserRepository::new();

        repo.expect_verified_username_exists()
            .times(1)
            .returning(|_| Ok(true));

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(MockMailer::new()));

        assert!(!service.username_available(&username).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_is_accepting_messages_reads_gate() -> TestResult {
        let mut user = unverified_user("alice", "123456", Utc::now() + Duration::minutes(30));
        user.is_accepting_messages = false;
        let user_id = user.id.clone();

        let mut repo = MockUserRepository::new();

        repo.expect_get_user_by_id()
            .times(1)
            .with(eq(user_id.clone()))
            .returning(move |_| Ok(user.clone()));

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(MockMailer::new()));

        assert!(!service.is_accepting_messages(&user_id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_accepting_messages_persists() -> TestResult {
        let user_id = Uuid::now_v7();

        let mut repo = MockUserRepository::new();

        repo.expect_set_accepting_messages()
            .times(1)
            .with(eq(user_id.clone()), eq(false))
            .returning(|_, _| Ok(()));

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(MockMailer::new()));

        service.set_accepting_messages(&user_id, false).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_register_unknown_repository_error() -> TestResult {
        let registration = registration("alice");

        let mut repo = MockUserRepository::new();

        repo.expect_upsert_unverified()
            .times(1)
            .returning(|_, _, _| Err(RegisterUserError::UnknownError(anyhow!("boom"))));

        let service = UserServiceImpl::new(Arc::new(repo), Arc::new(MockMailer::new()));

        let result = service.register(&registration).await;

        assert!(matches!(result, Err(RegisterUserError::UnknownError(_))));

        Ok(())
    }
}
