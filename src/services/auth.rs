//! Authentication service: credential checks behind the login throttle

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::account::{Account, LoginResponse, UserClaims},
    repository::Repository,
};

use super::redis::RedisService;

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    redis: RedisService,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig, redis: RedisService) -> Self {
        Self {
            repository,
            config,
            redis,
        }
    }

    /// Authenticate and establish a session, serialized per client origin.
    ///
    /// The throttle lock is taken before any credential work and released on
    /// every outcome, success or failure, so one failed attempt never blocks
    /// a legitimate retry. If a request dies mid-flight the lock expires on
    /// its own after the configured TTL.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        origin: &str,
    ) -> AppResult<LoginResponse> {
        let acquired = self
            .redis
            .acquire_login_lock(origin, self.config.login_lock_ttl_seconds)
            .await?;
        if !acquired {
            return Err(AppError::RateLimited(format!(
                "Another login attempt from this origin is in progress; retry in up to {} seconds",
                self.config.login_lock_ttl_seconds
            )));
        }

        let result = self.authenticate(username, password).await;

        if let Err(e) = self.redis.release_login_lock(origin).await {
            // The lock still self-expires; losing the early release only
            // delays the next attempt.
            tracing::warn!("Failed to release login lock for {}: {}", origin, e);
        }

        result
    }

    async fn authenticate(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let account = self
            .repository
            .accounts
            .get_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid username or password".to_string())
            })?;

        if !verify_password(&account, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.create_token(&account).await?;

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            username: account.username,
            is_admin: account.is_admin,
        })
    }

    /// Create the default administrator account on an empty database.
    ///
    /// The password comes from `ASSETDESK_ADMIN_PASSWORD`, defaulting to
    /// "admin" for local setups.
    pub async fn ensure_default_admin(&self) -> AppResult<()> {
        if !self.repository.accounts.is_empty().await? {
            return Ok(());
        }

        let password =
            std::env::var("ASSETDESK_ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
        let password_hash = hash_password(&password)?;

        let mut tx = self.repository.pool.begin().await?;
        self.repository
            .accounts
            .create(&mut tx, "admin", &password_hash, true)
            .await?;
        tx.commit().await?;

        tracing::warn!("Created default admin account; change its password");
        Ok(())
    }

    /// Create a JWT for an authenticated account
    async fn create_token(&self, account: &Account) -> AppResult<String> {
        let employee = self
            .repository
            .employees
            .get_by_account_id(account.id)
            .await?;

        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: account.username.clone(),
            account_id: account.id,
            employee_id: employee.map(|e| e.id),
            is_admin: account.is_admin,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}

/// Verify a password against an account's Argon2 hash
pub fn verify_password(account: &Account, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(&account.password_hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}
