use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use uuid::Uuid;

/// A throwaway schema on the database named by `DATABASE_URL`. Tests that need
/// Postgres return early when the variable is unset.
pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    pub async fn open() -> Option<TestDb> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL unset; skipping Postgres test");
            return None;
        };
        let base: PgConnectOptions = url.parse().expect("valid DATABASE_URL");
        let admin = PgPoolOptions::new().max_connections(1).connect_with(base.clone()).await.expect("connect");
        let schema = format!("planner_test_{}", Uuid::new_v4().simple());
        sqlx::query(&format!("CREATE SCHEMA {schema}")).execute(&admin).await.expect("create schema");

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(base.options([("search_path", schema.as_str())]))
            .await
            .expect("connect to test schema");
        Some(TestDb { pool, admin, schema })
    }

    /// Freshly migrated schema.
    pub async fn migrated() -> Option<TestDb> {
        let db = Self::open().await?;
        crate::init::migrate(&db.pool).await.expect("migrate");
        Some(db)
    }

    pub async fn exec(&self, sql: &str) {
        sqlx::query(sql).execute(&self.pool).await.unwrap_or_else(|e| panic!("{sql}: {e}"));
    }

    pub async fn count(&self, sql: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql).fetch_one(&self.pool).await.unwrap_or_else(|e| panic!("{sql}: {e}"))
    }

    pub async fn close(self) {
        self.pool.close().await;
        let _ = sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema)).execute(&self.admin).await;
        self.admin.close().await;
    }
}
