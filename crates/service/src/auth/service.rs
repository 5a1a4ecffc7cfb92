use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{
    normalize_email, HashedPassword, LoginInput, LoginResult, NewUser, PasswordAlgorithm, RegisterInput,
    RegistrationPolicy, User, UserView,
};
use super::errors::AuthError;
use super::hasher::{verify_tagged, PasswordHasher};
use super::repository::UserRepository;
use super::system::{Clock, IdGenerator};
use super::token::TokenSigner;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Auth business service independent of web framework
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    signer: Arc<dyn TokenSigner>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    policy: RegistrationPolicy,
}

fn looks_like_email(email: &str) -> bool {
    !email.is_empty() && email.contains('@')
}

impl AuthService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn TokenSigner>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { repo, hasher, signer, clock, ids, policy: RegistrationPolicy::default() }
    }

    pub fn with_policy(mut self, policy: RegistrationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RegistrationPolicy {
        &self.policy
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::AuthService;
    /// use service::auth::domain::{RegisterInput, UserStatus};
    /// use service::auth::hasher::{Argon2PasswordHasher, HashCost};
    /// use service::auth::repository::mock::MockUserRepository;
    /// use service::auth::system::{SystemClock, UuidV4Generator};
    /// use service::auth::token::JwtSigner;
    ///
    /// let clock = Arc::new(SystemClock);
    /// let hasher = Arc::new(Argon2PasswordHasher::new(HashCost::minimal(), clock.clone()).unwrap());
    /// let svc = AuthService::new(
    ///     Arc::new(MockUserRepository::default()),
    ///     hasher,
    ///     Arc::new(JwtSigner::new("secret", 900)),
    ///     clock,
    ///     Arc::new(UuidV4Generator),
    /// );
    /// let input = RegisterInput { email: "User@Example.com".into(), password: "Secret123".into(), ..Default::default() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// assert_eq!(user.status, UserStatus::Active);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<User, AuthError> {
        let email = normalize_email(&input.email);
        if !looks_like_email(&email) {
            return Err(AuthError::Validation("invalid email".into()));
        }
        if input.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::Validation(format!("password min {MIN_PASSWORD_CHARS} chars")));
        }
        if self.repo.get_by_email(&email).await?.is_some() {
            debug!("email already taken");
            return Err(AuthError::Conflict);
        }

        let new = NewUser {
            email,
            display_name: input.display_name,
            phone_e164: input.phone_e164,
            locale: input.locale,
            timezone: input.timezone,
            is_service_account: input.is_service_account,
            created_by: input.created_by.filter(|id| !id.is_nil()),
        };
        User::validate_new(&new)?;

        let credential = self.hash_password(input.password).await?;
        let user = User::register(new, Some(credential), &self.policy, self.ids.new_id(), self.clock.now())?;

        // a concurrent registration that slipped past the lookup fails here as Conflict
        let created = self.repo.create(user).await?;
        info!(user_id = %created.id, status = %created.status, "user_registered");
        Ok(created)
    }

    /// Check credentials and issue an access token.
    ///
    /// Every rejection is the same [`AuthError::InvalidCredential`], whatever
    /// the cause.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::AuthService;
    /// use service::auth::domain::{LoginInput, RegisterInput};
    /// use service::auth::hasher::{Argon2PasswordHasher, HashCost};
    /// use service::auth::repository::mock::MockUserRepository;
    /// use service::auth::system::{SystemClock, UuidV4Generator};
    /// use service::auth::token::JwtSigner;
    ///
    /// let clock = Arc::new(SystemClock);
    /// let hasher = Arc::new(Argon2PasswordHasher::new(HashCost::minimal(), clock.clone()).unwrap());
    /// let svc = AuthService::new(
    ///     Arc::new(MockUserRepository::default()),
    ///     hasher,
    ///     Arc::new(JwtSigner::new("secret", 900)),
    ///     clock,
    ///     Arc::new(UuidV4Generator),
    /// );
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), password: "Passw0rd".into(), ..Default::default() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.access_token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<LoginResult, AuthError> {
        let email = normalize_email(&input.email);
        if !looks_like_email(&email) || input.password.is_empty() {
            return Err(AuthError::InvalidCredential);
        }

        let user = self.repo.get_by_email(&email).await?.ok_or(AuthError::InvalidCredential)?;
        let algorithm = user.password_algorithm;
        let stored = match &user.password_hash {
            Some(hash) if algorithm == self.hasher.algorithm() || algorithm == PasswordAlgorithm::Bcrypt => {
                hash.clone()
            }
            Some(_) => {
                debug!(%algorithm, "no verifier for stored hash algorithm");
                return Err(AuthError::InvalidCredential);
            }
            None => return Err(AuthError::InvalidCredential),
        };
        if !self.verify_password(algorithm, input.password, stored).await? {
            return Err(AuthError::InvalidCredential);
        }

        let access_token = self.signer.sign(user.id, &user.email, self.clock.now())?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(LoginResult { access_token, user: UserView::from(&user) })
    }

    async fn hash_password(&self, plain: String) -> Result<HashedPassword, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| AuthError::HashError(format!("hashing task failed: {e}")))?
    }

    async fn verify_password(&self, algorithm: PasswordAlgorithm, plain: String, hash: String) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || verify_tagged(hasher.as_ref(), algorithm, &plain, &hash))
            .await
            .map_err(|e| AuthError::HashError(format!("verify task failed: {e}")))
    }
}
