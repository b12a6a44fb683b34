use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::user::{Principal, User, UserRole};
use crate::store::{NewAccount, NewProfile, PortalStore, DUPLICATE_USERNAME};
use crate::utils::crypto::{hash_password, password_matches, verify_against_decoy};
use crate::utils::token::{decode_session_token, issue_session_token, IssuedToken};
use crate::utils::validation::required;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn PortalStore>,
    config: Arc<Config>,
}

impl AuthService {
    pub fn new(store: Arc<dyn PortalStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// Creates a user together with its role profile.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
        profile: NewProfile,
    ) -> Result<User> {
        let username = required(username, "username")?;
        if password.is_empty() {
            return Err(Error::BadRequest("password is required".to_string()));
        }
        let profile_matches_role = matches!(
            (&role, &profile),
            (UserRole::Candidate, NewProfile::Candidate(_))
                | (UserRole::Employer, NewProfile::Employer(_))
                | (UserRole::Admin, NewProfile::None)
        );
        if !profile_matches_role {
            return Err(Error::BadRequest(format!(
                "profile does not match role '{}'",
                role
            )));
        }

        if self.store.find_user_by_username(&username).await?.is_some() {
            tracing::warn!(username = %username, "Registration rejected: username taken");
            return Err(Error::Conflict(DUPLICATE_USERNAME.to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .store
            .create_account(NewAccount {
                username,
                password_hash,
                role,
                profile,
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Returns the user only when the credentials match an active account.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.store.find_user_by_username(username.trim()).await? else {
            verify_against_decoy(password);
            return Ok(None);
        };
        let matches = password_matches(password, &user.password);
        if !matches || !user.is_active {
            return Ok(None);
        }
        Ok(Some(user))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(User, IssuedToken)> {
        let Some(user) = self.authenticate(username, password).await? else {
            tracing::warn!(username = %username.trim(), "Login failed");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };
        let issued = issue_session_token(
            user.id,
            &self.config.jwt_secret,
            self.config.token_ttl_minutes,
        )?;
        tracing::info!(user_id = user.id, "Session issued");
        Ok((user, issued))
    }

    /// Resolves a bearer token to the caller, re-reading the role from the
    /// user row.
    pub async fn resolve_session(&self, token: &str) -> Result<Principal> {
        let user_id = decode_session_token(token, &self.config.jwt_secret)
            .ok_or_else(|| Error::Unauthorized("invalid_token".to_string()))?;
        match self.store.find_user(user_id).await? {
            Some(user) if user.is_active => Ok(Principal::from_user(&user)),
            Some(_) => Err(Error::Unauthorized("account disabled".to_string())),
            None => Err(Error::Unauthorized("invalid_token".to_string())),
        }
    }

    pub async fn current_user(&self, principal: &Principal) -> Result<User> {
        self.store
            .find_user(principal.user_id)
            .await?
            .ok_or_else(|| Error::Unauthorized("invalid_token".to_string()))
    }

    /// Creates the configured admin account when it does not exist yet.
    pub async fn ensure_admin(&self) -> Result<Option<User>> {
        let (Some(username), Some(password)) = (
            self.config.admin_username.as_deref(),
            self.config.admin_password.as_deref(),
        ) else {
            return Ok(None);
        };

        if self.store.find_user_by_username(username).await?.is_some() {
            tracing::debug!(username = %username, "Admin account already present");
            return Ok(None);
        }

        let user = self
            .register(username, password, UserRole::Admin, NewProfile::None)
            .await?;
        tracing::info!(user_id = user.id, "Admin account bootstrapped");
        Ok(Some(user))
    }
}
