//! Shared persistence session handle.

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};

use crate::Result;

/// Handle to the persistence session shared by repository implementations.
///
/// One session is created per request-scoped resolution graph and handed
/// to every repository constructed within it. The handle itself is a thin
/// wrapper over a connection pool; cloning it shares the pool.
#[derive(Clone)]
pub struct DbSession {
    pool: PgPool,
}

impl DbSession {
    /// Creates a session over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a session whose pool connects on first use.
    ///
    /// Useful in tests that need a session handle without a reachable
    /// database.
    pub fn connect_lazy(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().connect_lazy(url)?;
        Ok(Self { pool })
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begins a database transaction.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }
}

impl std::fmt::Debug for DbSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSession").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_lazy_does_not_touch_the_network() {
        let session = DbSession::connect_lazy("postgres://nobody@localhost:1/void");
        assert!(session.is_ok());
    }
}
