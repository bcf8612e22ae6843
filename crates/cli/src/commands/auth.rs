//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! bxh register -u ida -e ida@example.org --full-name "Ida B. Wells"
//! bxh login -u ida
//! bxh whoami
//! bxh logout
//! ```

use black_excellence_client::{ApiClient, Credentials, Registration, RegistrationForm};
use dialoguer::Password;

use super::CliError;

const PASSWORD_MISMATCH: &str = "Passwords do not match.";

/// Ask for a password on the terminal without echoing it.
fn password_or_prompt(password: Option<String>, label: &str) -> Result<String, CliError> {
    match password {
        Some(password) => Ok(password),
        None => Ok(Password::new().with_prompt(label).interact()?),
    }
}

#[allow(clippy::print_stdout)]
pub async fn login(
    api: &ApiClient,
    username: String,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = password_or_prompt(password, "Password")?;
    let credentials = Credentials::new(username, password);

    api.login(&credentials)
        .await
        .map_err(|e| CliError::inline(&e, "Login failed."))?;

    println!("Logged in as {}", credentials.username);
    Ok(())
}

/// Assemble the sign-up form, prompting for any missing password.
///
/// With neither flag given the terminal prompt asks twice and repeats until
/// both entries agree. Flag input is compared later by
/// [`Registration::from_form`].
pub fn registration_form(
    full_name: String,
    email: String,
    username: String,
    password: Option<String>,
    confirm_password: Option<String>,
) -> Result<RegistrationForm, CliError> {
    let (password, confirm_password) = match (password, confirm_password) {
        (None, None) => {
            let password = Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", PASSWORD_MISMATCH)
                .interact()?;
            (password.clone(), password)
        }
        (password, confirm_password) => (
            password_or_prompt(password, "Password")?,
            password_or_prompt(confirm_password, "Confirm password")?,
        ),
    };
    Ok(RegistrationForm {
        full_name,
        email,
        username,
        password,
        confirm_password,
    })
}

#[allow(clippy::print_stdout)]
pub async fn register(api: &ApiClient, form: RegistrationForm) -> Result<(), CliError> {
    let registration = Registration::from_form(form)?;

    api.register(&registration)
        .await
        .map_err(|e| CliError::inline(&e, "Registration failed."))?;

    println!("Account created for {}", registration.username());
    Ok(())
}

#[allow(clippy::print_stdout)]
pub fn logout(api: &ApiClient) {
    api.logout();
    println!("Logged out");
}

#[allow(clippy::print_stdout)]
pub async fn whoami(api: &ApiClient) -> Result<(), CliError> {
    if !api.is_authenticated() {
        return Err(CliError::Failed("Not logged in.".to_string()));
    }

    let user = api.current_user().await?;
    println!("{} <{}>", user.display_name(), user.email);
    println!("username: {}", user.username);
    println!("plan:     {}", user.subscription_tier);
    Ok(())
}
