use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

// SQLITE_CONSTRAINT_UNIQUE
const UNIQUE_VIOLATION: &str = "2067";

/// bcrypt reads 72 bytes including its NUL terminator.
pub const MAX_PASSWORD_BYTES: usize = 71;

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(e) => e.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Account persistence over an explicitly owned SQLite pool.
#[derive(Clone)]
pub struct AccountStore {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl AccountStore {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(existing > 0)
    }

    /// Emails are matched exactly as entered (case-sensitive).
    pub async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if self.email_exists(email).await? {
            return Err(AppError::DuplicateEmail);
        }

        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::PasswordTooLong(MAX_PASSWORD_BYTES));
        }
        let hashed_password = bcrypt::non_truncating_hash(password, self.bcrypt_cost)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: hashed_password,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.insert_user(&user).await?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let inserted = sqlx::query(
            "INSERT INTO users (id, name, email, password, created_at) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.created_at)
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => Ok(()),
            // lost a race with a concurrent signup for the same email
            Err(e) if is_unique_violation(&e) => Err(AppError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let row = sqlx::query(
            "SELECT id, name, email, password, created_at FROM users WHERE email = ? LIMIT 1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let row = match row {
            Some(r) => r,
            None => return Err(AppError::InvalidCredentials),
        };

        let user = User {
            id: row.get::<String, _>("id"),
            name: row.get::<String, _>("name"),
            email: row.get::<String, _>("email"),
            password: row.get::<String, _>("password"),
            created_at: row.get::<String, _>("created_at"),
        };

        // over-long input errors out instead of being compared on its prefix
        let is_valid = bcrypt::non_truncating_verify(password, &user.password).unwrap_or(false);
        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}
