use sqlx::{migrate::MigrateDatabase, query, query_scalar, sqlite::SqlitePoolOptions, Pool, Sqlite};

/// Key-value store over a single SQLite table. Values are opaque strings and
/// every write replaces the previous value in full.
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn initialize(database_url: &str) -> sqlx::Result<Self> {
        if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
            Sqlite::create_database(database_url).await?;
            tracing::info!(database_url, "created database");
        }
        let pool = SqlitePoolOptions::new().connect(database_url).await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool })
    }

    /// A private in-memory database. Pinned to one connection that never
    /// expires, otherwise each pooled connection would see its own empty db.
    #[cfg(test)]
    pub async fn in_memory() -> sqlx::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self { pool })
    }
}

impl Storage {
    pub async fn get_item(&self, key: &str) -> sqlx::Result<Option<String>> {
        query_scalar::<_, String>("SELECT value FROM items WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn set_item(&self, key: &str, value: &str) -> sqlx::Result<()> {
        query(
            "
            INSERT INTO items(key, value) VALUES(?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP;
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map(|_| ())
    }
}
