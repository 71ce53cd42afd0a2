//! Newsletter subscription route handlers.
//!
//! The footer form posts here and gets back a fragment that replaces the
//! form in place. Signup goes through the mesh's anonymous signup mutation
//! against the configured default list.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use driftwear_core::Email;

use crate::state::AppState;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Success fragment template (replaces the form).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_success.html")]
pub struct SubscribeSuccessTemplate {
    pub email: String,
}

/// Error fragment template (replaces the form).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_error.html")]
pub struct SubscribeErrorTemplate {
    pub message: String,
    pub email: String,
}

/// Whether an upstream failure means the address is already on the list.
///
/// The mesh (and the marketing provider behind it) phrase this a couple of
/// ways; all of them are a success from the subscriber's point of view.
fn is_already_subscribed(error_message: &str) -> bool {
    let lower = error_message.to_lowercase();
    lower.contains("already been taken")
        || lower.contains("already exists")
        || lower.contains("already subscribed")
        || lower.contains("already a list member")
}

/// Subscribe to the newsletter.
///
/// Validates and normalizes the email, then calls the signup mutation.
/// Duplicate signups render as success.
#[instrument(skip(state, form))]
pub async fn subscribe(
    State(state): State<AppState>,
    Form(form): Form<SubscribeForm>,
) -> impl IntoResponse {
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(_) => {
            return SubscribeErrorTemplate {
                message: "Please enter a valid email address.".to_string(),
                email: form.email,
            }
            .into_response();
        }
    };

    let list_id = state.config().newsletter_list_id.clone();

    match state
        .catalog()
        .newsletter_signup(&list_id, email.as_str())
        .await
    {
        Ok(result) if result.subscribed => {
            tracing::info!("Newsletter subscription successful");
            SubscribeSuccessTemplate {
                email: email.to_string(),
            }
            .into_response()
        }
        Ok(result) => {
            tracing::warn!(message = ?result.message, "Newsletter signup not confirmed");
            SubscribeErrorTemplate {
                message: result
                    .message
                    .unwrap_or_else(|| "Something went wrong. Please try again.".to_string()),
                email: email.to_string(),
            }
            .into_response()
        }
        Err(e) if is_already_subscribed(&e.to_string()) => {
            // Treat as success - they're already in the system
            tracing::info!("Email already subscribed - treating as success");
            SubscribeSuccessTemplate {
                email: email.to_string(),
            }
            .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Newsletter subscription failed");
            SubscribeErrorTemplate {
                message: "Something went wrong. Please try again.".to_string(),
                email: email.to_string(),
            }
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_already_subscribed() {
        assert!(is_already_subscribed("Email has already been taken"));
        assert!(is_already_subscribed(
            "User error: profile already exists for this list"
        ));
        assert!(is_already_subscribed("ALREADY SUBSCRIBED"));
        assert!(is_already_subscribed("they are already a list member"));

        assert!(!is_already_subscribed("rate limited"));
        assert!(!is_already_subscribed("invalid email"));
        assert!(!is_already_subscribed(""));
    }
}
