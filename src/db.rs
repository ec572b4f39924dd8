use sqlx::{sqlite::{SqlitePoolOptions, SqliteConnectOptions}, SqlitePool};
use std::str::FromStr;

pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_opts)
        .await?;

    // email uniqueness is enforced here as well as in AccountStore
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}

// lowest cost bcrypt accepts
#[cfg(test)]
pub const TEST_BCRYPT_COST: u32 = 4;

#[cfg(test)]
pub async fn test_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let url = format!("sqlite://{}", dir.path().join("test.db").display());
    init_pool(&url).await.unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn init_pool_creates_users_table() {
        let dir = tempdir().unwrap();
        let pool = test_pool(&dir).await;

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert!(tables.contains(&"users".to_string()));
    }

    #[tokio::test]
    async fn init_pool_is_idempotent() {
        let dir = tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("twice.db").display());
        init_pool(&url).await.unwrap();
        assert!(init_pool(&url).await.is_ok());
    }
}
