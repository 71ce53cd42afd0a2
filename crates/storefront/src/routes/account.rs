//! Account route handlers.
//!
//! The account page is three sections - profile form, newsletter
//! subscription toggles, referrals - each fed by its own upstream call.
//! Section-level failures render section-level alerts instead of failing
//! the whole page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use driftwear_core::Email;

use crate::db::{RepositoryError, referrals::ReferralRepository};
use crate::filters;
use crate::middleware::RequireShopIdentity;
use crate::models::Referral;
use crate::state::AppState;
use crate::upstream::UpstreamError;
use crate::upstream::types::{NewsletterSubscription, Profile, ProfileUpdateInput};

// =============================================================================
// View Models
// =============================================================================

/// Profile form values.
#[derive(Clone, Default)]
pub struct ProfileFormView {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Profile> for ProfileFormView {
    fn from(profile: &Profile) -> Self {
        Self {
            first_name: profile.first_name.clone().unwrap_or_default(),
            last_name: profile.last_name.clone().unwrap_or_default(),
            email: profile.email.clone().unwrap_or_default(),
            phone: profile.phone.clone().unwrap_or_default(),
        }
    }
}

/// Newsletter toggle row.
#[derive(Clone)]
pub struct NewsletterToggleView {
    pub list_id: String,
    pub name: String,
    pub subscribed: bool,
}

impl From<&NewsletterSubscription> for NewsletterToggleView {
    fn from(sub: &NewsletterSubscription) -> Self {
        Self {
            list_id: sub.list_id.clone(),
            name: sub.name.clone(),
            subscribed: sub.subscribed,
        }
    }
}

/// Referral row.
#[derive(Clone)]
pub struct ReferralView {
    pub email: String,
    pub sent: String,
    pub earned: bool,
}

impl From<&Referral> for ReferralView {
    fn from(referral: &Referral) -> Self {
        Self {
            email: referral.email.to_string(),
            sent: referral.created_at.format("%b %-d, %Y").to_string(),
            earned: referral.earned,
        }
    }
}

// =============================================================================
// Templates & Query Types
// =============================================================================

/// Query parameters for flash-style notices.
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub shop_name: String,
    pub notice: Option<String>,
    pub alert: Option<String>,
    pub profile: Option<ProfileFormView>,
    pub profile_error: Option<String>,
    pub newsletters: Vec<NewsletterToggleView>,
    pub newsletter_error: Option<String>,
    pub referrals: Vec<ReferralView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the account page.
#[instrument(skip(state, identity, token, query), fields(shop_id = %identity.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireShopIdentity(identity, token): RequireShopIdentity,
    Query(query): Query<NoticeQuery>,
) -> impl IntoResponse {
    let (profile, profile_error) = match state.profile().get_profile(&token.access_token).await {
        Ok(profile) => (Some(ProfileFormView::from(&profile)), None),
        Err(e) => {
            tracing::error!("Failed to load profile: {e}");
            (None, Some(e.to_string()))
        }
    };

    let (newsletters, newsletter_error) = match state
        .profile()
        .get_newsletter_subscriptions(&token.access_token)
        .await
    {
        Ok(subs) => (
            subs.iter().map(NewsletterToggleView::from).collect(),
            None,
        ),
        Err(e) => {
            tracing::error!("Failed to load newsletter subscriptions: {e}");
            (Vec::new(), Some(e.to_string()))
        }
    };

    let referrals = match ReferralRepository::new(state.pool())
        .list_for_shop(&identity.id)
        .await
    {
        Ok(referrals) => referrals.iter().map(ReferralView::from).collect(),
        Err(e) => {
            tracing::error!("Failed to load referrals: {e}");
            Vec::new()
        }
    };

    AccountTemplate {
        shop_name: identity.name,
        notice: query.success,
        alert: query.error,
        profile,
        profile_error,
        newsletters,
        newsletter_error,
        referrals,
    }
}

/// Profile update form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

fn redirect_success(message: &str) -> Response {
    Redirect::to(&format!(
        "/account?success={}",
        urlencoding::encode(message)
    ))
    .into_response()
}

fn redirect_error(message: &str) -> Response {
    Redirect::to(&format!("/account?error={}", urlencoding::encode(message))).into_response()
}

/// Update the profile.
///
/// # Route
///
/// `POST /account/profile`
#[instrument(skip(state, _identity, token, form), fields(shop_id = %_identity.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireShopIdentity(_identity, token): RequireShopIdentity,
    Form(form): Form<ProfileForm>,
) -> Response {
    let Ok(email) = Email::parse(&form.email) else {
        return redirect_error("Please enter a valid email.");
    };

    let non_empty = |s: String| {
        let trimmed = s.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    };

    let input = ProfileUpdateInput {
        first_name: non_empty(form.first_name),
        last_name: non_empty(form.last_name),
        email: Some(email.to_string()),
        phone: non_empty(form.phone),
    };

    match state.profile().update_profile(&token.access_token, input).await {
        Ok(_) => redirect_success("Profile saved."),
        Err(UpstreamError::UserError(message)) => redirect_error(&message),
        Err(e) => {
            tracing::error!("Profile update failed: {e}");
            redirect_error("Could not save your profile. Please try again.")
        }
    }
}

/// Newsletter toggle form data.
///
/// Checkboxes only submit when checked, so `subscribed` arrives as
/// `Some(..)` for subscribe and `None` for unsubscribe.
#[derive(Debug, Deserialize)]
pub struct NewsletterToggleForm {
    pub list_id: String,
    pub subscribed: Option<String>,
}

/// Toggle a newsletter subscription.
///
/// # Route
///
/// `POST /account/newsletter`
#[instrument(skip(state, _identity, token, form), fields(shop_id = %_identity.id))]
pub async fn toggle_newsletter(
    State(state): State<AppState>,
    RequireShopIdentity(_identity, token): RequireShopIdentity,
    Form(form): Form<NewsletterToggleForm>,
) -> Response {
    let subscribe = form.subscribed.is_some();

    match state
        .profile()
        .set_newsletter_subscription(&token.access_token, &form.list_id, subscribe)
        .await
    {
        Ok(sub) if sub.subscribed => redirect_success(&format!("Subscribed to {}.", sub.name)),
        Ok(sub) => redirect_success(&format!("Unsubscribed from {}.", sub.name)),
        Err(UpstreamError::UserError(message)) => redirect_error(&message),
        Err(e) => {
            tracing::error!("Newsletter toggle failed: {e}");
            redirect_error("Could not update your subscription. Please try again.")
        }
    }
}

/// Referral form data.
#[derive(Debug, Deserialize)]
pub struct ReferralForm {
    pub email: String,
}

/// Send a referral invitation.
///
/// # Route
///
/// `POST /account/referrals`
#[instrument(skip(state, identity, _token, form), fields(shop_id = %identity.id))]
pub async fn create_referral(
    State(state): State<AppState>,
    RequireShopIdentity(identity, _token): RequireShopIdentity,
    Form(form): Form<ReferralForm>,
) -> Response {
    let Ok(email) = Email::parse(&form.email) else {
        return redirect_error("Please enter a valid email to refer.");
    };

    match ReferralRepository::new(state.pool())
        .create(&identity.id, &email)
        .await
    {
        Ok(_) => redirect_success("Referral sent."),
        Err(RepositoryError::Conflict(_)) => {
            redirect_error("You already referred that address.")
        }
        Err(e) => {
            tracing::error!("Referral creation failed: {e}");
            redirect_error("Could not send the referral. Please try again.")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn profile_form_view_defaults_missing_fields() {
        let profile = Profile {
            id: "p1".to_string(),
            email: Some("a@b.com".to_string()),
            first_name: None,
            last_name: Some("Lee".to_string()),
            phone: None,
        };
        let view = ProfileFormView::from(&profile);
        assert_eq!(view.first_name, "");
        assert_eq!(view.last_name, "Lee");
        assert_eq!(view.email, "a@b.com");
        assert_eq!(view.phone, "");
    }

    #[test]
    fn referral_view_formats_sent_date() {
        use chrono::TimeZone;

        let referral = Referral {
            id: driftwear_core::ReferralId::new(1),
            shop_id: "4810553".to_string(),
            email: Email::parse("friend@example.com").expect("valid"),
            earned: true,
            created_at: chrono::Utc.with_ymd_and_hms(2022, 2, 23, 9, 0, 0).unwrap(),
        };
        let view = ReferralView::from(&referral);
        assert_eq!(view.sent, "Feb 23, 2022");
        assert!(view.earned);
    }
}
