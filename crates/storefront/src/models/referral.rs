//! Referral domain type.
//!
//! A referral is an invitation the signed-in customer sent to a friend's
//! email address. Referrals are the one entity the storefront owns locally;
//! everything else lives upstream.

use chrono::{DateTime, Utc};

use driftwear_core::{Email, ReferralId};

/// A referral invitation (domain type).
#[derive(Debug, Clone)]
pub struct Referral {
    /// Database ID.
    pub id: ReferralId,
    /// The shop identity that sent the referral.
    pub shop_id: String,
    /// The invitee's email address.
    pub email: Email,
    /// Whether the referral converted and earned its reward.
    pub earned: bool,
    /// When the referral was sent.
    pub created_at: DateTime<Utc>,
}
