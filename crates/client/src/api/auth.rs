//! Account endpoints and the login/logout lifecycle.
//!
//! A successful login or registration writes the returned token into the
//! [`Session`](crate::Session); logout clears it locally without calling the
//! backend.

use black_excellence_core::Email;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{info, instrument};

use super::ApiClient;
use super::types::{TokenResponse, UserProfile};
use crate::error::{ApiError, ValidationError};

/// Username and password for `/api/auth/login`.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Raw sign-up form input, before client-side checks.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// A checked registration request.
///
/// Only obtainable through [`Registration::from_form`], so the password
/// confirmation has always been compared before anything is sent.
#[derive(Clone)]
pub struct Registration {
    full_name: Option<String>,
    email: Email,
    username: String,
    password: SecretString,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Registration {
    /// Validate a sign-up form.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the passwords differ, a required
    /// field is blank, or the email is malformed.
    pub fn from_form(form: RegistrationForm) -> Result<Self, ValidationError> {
        if form.password != form.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if form.username.trim().is_empty() {
            return Err(ValidationError::Required("Username"));
        }
        if form.password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        let email = Email::parse(&form.email)?;
        let full_name = Some(form.full_name.trim().to_string()).filter(|n| !n.is_empty());

        Ok(Self {
            full_name,
            email,
            username: form.username.trim().to_string(),
            password: SecretString::from(form.password),
        })
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<&'a str>,
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Log in and store the returned token.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected, the request fails,
    /// or the response carries no token.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<SecretString, ApiError> {
        let body = LoginBody {
            username: &credentials.username,
            password: credentials.password.expose_secret(),
        };
        let response: TokenResponse = self
            .send(self.request(Method::POST, "/api/auth/login")?.json(&body))
            .await?;

        let token = self.adopt_token(response)?;
        info!("Logged in");
        Ok(token)
    }

    /// Create an account and store the returned token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the registration (e.g. the
    /// email or username is taken), the request fails, or the response
    /// carries no token.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &Registration) -> Result<SecretString, ApiError> {
        let body = RegisterBody {
            full_name: registration.full_name.as_deref(),
            email: registration.email.as_str(),
            username: &registration.username,
            password: registration.password.expose_secret(),
        };
        let response: TokenResponse = self
            .send(self.request(Method::POST, "/api/auth/register")?.json(&body))
            .await?;

        let token = self.adopt_token(response)?;
        info!("Registered");
        Ok(token)
    }

    /// Forget the session token. No request is sent.
    pub fn logout(&self) {
        self.session().clear();
        info!("Logged out");
    }

    /// Whether a session token is present. Does not check expiry.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Fetch the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; a missing or stale token
    /// surfaces as a 401 status.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get("/api/auth/me").await
    }

    fn adopt_token(&self, response: TokenResponse) -> Result<SecretString, ApiError> {
        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
            .ok_or(ApiError::MissingToken)?;
        self.session().store_token(&token)?;
        Ok(token)
    }
}
