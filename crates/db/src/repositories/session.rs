//! Session repository for refresh-token sessions.
//!
//! Only the SHA-256 hex digest of a refresh token is stored.

use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entities::sessions;

/// Session repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    /// Creates a new session repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Hashes a refresh token for storage.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Creates a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        refresh_token: &str,
        expires_at: DateTime<Utc>,
        user_agent: Option<&str>,
    ) -> Result<sessions::Model, DbErr> {
        insert_session(&self.db, user_id, refresh_token, expires_at, user_agent).await
    }

    /// Finds a live session (not revoked, not expired) by refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active_by_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<sessions::Model>, DbErr> {
        sessions::Entity::find()
            .filter(sessions::Column::RefreshTokenHash.eq(Self::hash_token(refresh_token)))
            .filter(sessions::Column::RevokedAt.is_null())
            .filter(sessions::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.db)
            .await
    }

    /// Revokes the old session and opens a new one in a single transaction.
    ///
    /// Returns `None` without opening a session when the old one was already
    /// revoked, so a refresh token can be rotated at most once even under
    /// concurrent requests.
    ///
    /// # Errors
    ///
    /// Returns an error if either statement fails; nothing is committed then.
    pub async fn rotate(
        &self,
        old_session_id: Uuid,
        user_id: Uuid,
        new_refresh_token: &str,
        expires_at: DateTime<Utc>,
        user_agent: Option<&str>,
    ) -> Result<Option<sessions::Model>, DbErr> {
        let txn = self.db.begin().await?;
        let revoked = revoke_unrevoked(&txn, sessions::Column::Id.eq(old_session_id)).await?;
        if revoked != 1 {
            txn.rollback().await?;
            return Ok(None);
        }
        let session =
            insert_session(&txn, user_id, new_refresh_token, expires_at, user_agent).await?;
        txn.commit().await?;
        Ok(Some(session))
    }

    /// Revokes a session by refresh token. Returns false if no live session matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn revoke_by_token(&self, refresh_token: &str) -> Result<bool, DbErr> {
        let revoked = revoke_unrevoked(
            &self.db,
            sessions::Column::RefreshTokenHash
                .eq(Self::hash_token(refresh_token))
                .and(sessions::Column::ExpiresAt.gt(Utc::now())),
        )
        .await?;
        Ok(revoked > 0)
    }

    /// Counts live sessions for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_active_sessions(&self, user_id: Uuid) -> Result<u64, DbErr> {
        sessions::Entity::find()
            .filter(sessions::Column::UserId.eq(user_id))
            .filter(sessions::Column::RevokedAt.is_null())
            .filter(sessions::Column::ExpiresAt.gt(Utc::now()))
            .count(&self.db)
            .await
    }
}

async fn insert_session<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    refresh_token: &str,
    expires_at: DateTime<Utc>,
    user_agent: Option<&str>,
) -> Result<sessions::Model, DbErr> {
    let now = Utc::now().into();
    sessions::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(user_id),
        refresh_token_hash: Set(SessionRepository::hash_token(refresh_token)),
        user_agent: Set(user_agent.map(String::from)),
        expires_at: Set(expires_at.into()),
        revoked_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

/// Stamps `revoked_at` on matching sessions that are not revoked yet.
///
/// The `revoked_at IS NULL` filter is part of the update itself, so of two
/// racing callers only one sees the row affected.
async fn revoke_unrevoked<C: ConnectionTrait>(
    db: &C,
    filter: SimpleExpr,
) -> Result<u64, DbErr> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let result = sessions::Entity::update_many()
        .col_expr(sessions::Column::RevokedAt, Expr::value(now))
        .col_expr(sessions::Column::UpdatedAt, Expr::value(now))
        .filter(filter)
        .filter(sessions::Column::RevokedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
