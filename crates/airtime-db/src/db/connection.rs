//! Postgres connection pool shared by the request handlers.

use std::time::Duration;

use airtime_core::config::DatabaseConfig;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::db::DbProvider;
use crate::error::DbResult;

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection<'pool> = PooledConnection<'pool, AsyncPgConnection>;

/// ## Summary
/// Creates the pool described by the `[database]` settings.
///
/// Every connection is opened up front, so an unreachable database fails here
/// rather than on the first request.
///
/// ## Errors
/// Returns an error if the database cannot be reached within the connect timeout.
#[tracing::instrument(skip(config), fields(
    max_connections = config.max_connections,
    connect_timeout_secs = config.connect_timeout_secs
))]
pub async fn create_pool(config: &DatabaseConfig) -> anyhow::Result<DbPool> {
    let size = u32::from(config.max_connections);
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.url);

    let pool = Pool::builder()
        .max_size(size)
        .min_idle(Some(size))
        .connection_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(None)
        .build(manager)
        .await?;

    tracing::info!(
        connections = pool.state().connections,
        "Database connection pool ready"
    );

    Ok(pool)
}

impl DbProvider for DbPool {
    fn get_connection<'a>(
        &'a self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>>
    {
        Box::pin(async move {
            self.get().await.map_err(|err| {
                tracing::warn!(
                    error = %err,
                    idle = self.state().idle_connections,
                    "No database connection available"
                );
                err.into()
            })
        })
    }
}
