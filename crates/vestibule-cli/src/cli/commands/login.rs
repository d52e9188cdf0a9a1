//! The `login` subcommand: one full submission lifecycle.

use anyhow::{Result, bail};
use vestibule_core::config::{Config, validate_backend_url};
use vestibule_core::form::Field;
use vestibule_core::session::{SessionController, SubmissionState};
use vestibule_core::transport::AuthClient;

/// Runs a login attempt and renders the resulting state.
///
/// # Errors
/// Returns an error when the form is gated, the backend rejects the
/// credentials, or the transport fails.
pub async fn run(
    config: &Config,
    backend_override: Option<&str>,
    username: &str,
    password: &str,
) -> Result<()> {
    let base_url = match backend_override {
        Some(url) => {
            validate_backend_url(url)?;
            url.trim_end_matches('/').to_string()
        }
        None => config.resolve_backend_url()?,
    };

    let client = match config.timeout() {
        Some(timeout) => AuthClient::with_timeout(base_url.as_str(), timeout)?,
        None => AuthClient::new(base_url.as_str()),
    };

    let mut controller = SessionController::default();
    controller.form_mut().set_value(Field::Username, username);
    controller.form_mut().set_value(Field::Password, password);

    let state = controller.submit_with(&client).await.clone();
    match state {
        SubmissionState::Succeeded(identity) => {
            println!("Logged in as {} <{}>", identity.username, identity.email);
            if !identity.roles.is_empty() {
                let names: Vec<&str> = identity.roles.iter().map(|r| r.name.as_str()).collect();
                println!("Roles: {}", names.join(", "));
            }
            Ok(())
        }
        SubmissionState::Failed(category) => bail!("{}", category.message()),
        SubmissionState::Idle | SubmissionState::Loading => {
            // Submission was gated locally; report the per-field problems.
            let mut lines = Vec::new();
            for field in [Field::Username, Field::Password] {
                for violation in controller.form().visible_violations(field) {
                    lines.push(format!("{}: {}", field_name(field), violation.message()));
                }
            }
            bail!("invalid login form\n{}", lines.join("\n"))
        }
    }
}

fn field_name(field: Field) -> &'static str {
    match field {
        Field::Username => "username",
        Field::Password => "password",
    }
}
