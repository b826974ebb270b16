use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;

/// Deadpool-backed async PostgreSQL connection pool.
pub type DbPool = Pool<AsyncPgConnection>;

/// Build a connection pool for the given database URL.
///
/// Panics on a malformed pool configuration; connections themselves are
/// established lazily.
pub fn connect(database_url: &str) -> DbPool {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder(manager)
        .build()
        .expect("failed to build connection pool")
}
