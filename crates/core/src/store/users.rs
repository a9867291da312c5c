//! SQLite-backed user accounts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, ErrorCode, OptionalExtension};

use super::{Database, StoreError, UserStore};
use crate::recipe::DocumentId;

/// A registered user. The password is only ever held as a bcrypt hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: DocumentId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub struct SqliteUserStore {
    db: Arc<Database>,
}

impl SqliteUserStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Only UNIQUE failures count; NOT NULL and primary key failures are
    /// storage errors, not duplicates.
    fn is_unique_violation(e: &rusqlite::Error) -> bool {
        matches!(
            e,
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == ErrorCode::ConstraintViolation
                    && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }
}

impl UserStore for SqliteUserStore {
    fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let user = User {
            id: DocumentId::generate(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };

        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
                params![
                    user.id.as_str(),
                    user.email,
                    user.password_hash,
                    user.created_at.to_rfc3339()
                ],
            )
            .map_err(|e| {
                if Self::is_unique_violation(&e) {
                    StoreError::Conflict(format!("user {}", email))
                } else {
                    StoreError::from(e)
                }
            })?;
            Ok(())
        })?;

        Ok(user)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = self.db.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
                    params![email],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                        ))
                    },
                )
                .optional()?)
        })?;

        let Some((id, email, password_hash, created_at)) = row else {
            return Ok(None);
        };

        let corrupt = |reason: String| StoreError::Corrupt {
            id: id.clone(),
            reason,
        };
        let user_id: DocumentId = id.parse().map_err(|e| corrupt(format!("{}", e)))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| corrupt(e.to_string()))?;

        Ok(Some(User {
            id: user_id,
            email,
            password_hash,
            created_at,
        }))
    }
}
