//! Referral repository for database operations.
//!
//! Queries are runtime-checked (`query_as` + `FromRow`) so the crate builds
//! without a live database.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use driftwear_core::{Email, ReferralId};

use super::RepositoryError;
use crate::models::Referral;

/// Database row for the `referral` table.
#[derive(Debug, sqlx::FromRow)]
struct ReferralRow {
    id: i64,
    shop_id: String,
    email: String,
    earned: bool,
    created_at: DateTime<Utc>,
}

impl ReferralRow {
    fn into_domain(self) -> Result<Referral, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Referral {
            id: ReferralId::new(self.id),
            shop_id: self.shop_id,
            email,
            earned: self.earned,
            created_at: self.created_at,
        })
    }
}

/// Repository for referral database operations.
pub struct ReferralRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReferralRepository<'a> {
    /// Create a new referral repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the referrals a shop identity has sent, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::DataCorruption` if a stored email is invalid.
    pub async fn list_for_shop(&self, shop_id: &str) -> Result<Vec<Referral>, RepositoryError> {
        let rows: Vec<ReferralRow> = sqlx::query_as(
            r"
            SELECT id, shop_id, email, earned, created_at
            FROM referral
            WHERE shop_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(shop_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ReferralRow::into_domain).collect()
    }

    /// Create a new referral.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the shop already referred this
    /// email and `RepositoryError::Database` for other database errors.
    pub async fn create(&self, shop_id: &str, email: &Email) -> Result<Referral, RepositoryError> {
        let row: ReferralRow = sqlx::query_as(
            r"
            INSERT INTO referral (shop_id, email)
            VALUES ($1, $2)
            RETURNING id, shop_id, email, earned, created_at
            ",
        )
        .bind(shop_id)
        .bind(email.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("referral already sent".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.into_domain()
    }

    /// Mark a referral as earned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn mark_earned(&self, id: ReferralId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE referral
            SET earned = TRUE
            WHERE id = $1
            ",
        )
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
