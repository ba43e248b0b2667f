//! Opt-in process-wide [`Database`].
//!
//! Prefer passing a [`Database`] around explicitly. This exists for code that
//! wants one pool per process without threading a handle through.

use crate::config::DatabaseConfig;
use crate::database::Database;
use crate::error::DbResult;
use std::future::Future;
use tokio::sync::OnceCell;

static DATABASE: OnceCell<Database> = OnceCell::const_new();

/// The shared database, connecting on first use.
///
/// Only the first successful call connects. Later calls return the same
/// instance and ignore their arguments. A failed first attempt leaves the
/// slot empty so a later call can retry.
pub async fn database(dsn: &str, config: DatabaseConfig) -> DbResult<&'static Database> {
    let wanted = config.clone();
    first_wins(
        &DATABASE,
        || Database::connect(dsn, config),
        |db| db.config() == &wanted,
    )
    .await
}

/// The shared database if it has been initialised.
pub fn get() -> Option<&'static Database> {
    DATABASE.get()
}

async fn first_wins<'a, T, F, Fut>(
    cell: &'a OnceCell<T>,
    init: F,
    same_config: impl FnOnce(&T) -> bool,
) -> DbResult<&'a T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DbResult<T>>,
{
    let initialised = cell.initialized();
    let value = cell.get_or_try_init(init).await?;
    if initialised && !same_config(value) {
        tracing::debug!(
            target: "mysqlx.sql",
            "shared database already initialised; ignoring new configuration"
        );
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;

    #[tokio::test]
    async fn first_initialisation_wins() {
        let cell = OnceCell::new();

        let first = first_wins(&cell, || async { Ok(1) }, |_| true).await.unwrap();
        let second = first_wins(&cell, || async { Ok(2) }, |v| *v == 2)
            .await
            .unwrap();

        assert_eq!(*first, 1);
        assert!(std::ptr::eq(first, second));
    }

    #[tokio::test]
    async fn failed_initialisation_can_be_retried() {
        let cell = OnceCell::new();

        let err = first_wins(
            &cell,
            || async { Err(DbError::Connection("refused".into())) },
            |_: &u8| true,
        )
        .await;
        assert!(err.is_err());
        assert!(cell.get().is_none());

        let ok = first_wins(&cell, || async { Ok(7u8) }, |_| true).await.unwrap();
        assert_eq!(*ok, 7);
    }
}
