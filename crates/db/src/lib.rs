//! Persistence layer: pool creation, migrations, models and repositories.
//!
//! The pool uses sqlx's `Any` driver so the same repositories run against
//! PostgreSQL (when `DATABASE_URL` is set) and a local SQLite file otherwise.

pub mod models;
pub mod repositories;

use std::path::Path;

use sqlx::any::AnyPoolOptions;
use sqlx::migrate::Migrator;

pub type DbPool = sqlx::AnyPool;

/// File name of the SQLite fallback database inside the data directory.
pub const SQLITE_FILE_NAME: &str = "photos.db";

static POSTGRES_MIGRATOR: Migrator = sqlx::migrate!("./migrations/postgres");
static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");

/// Database engine behind a pool, decided by the connection URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackend {
    Postgres,
    Sqlite,
}

impl DbBackend {
    /// Detect the backend from a connection URL. Returns `None` for unknown schemes.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Pick the connection URL for this process.
///
/// A non-empty `DATABASE_URL` wins; a leading `postgres://` is rewritten once
/// to `postgresql://` (hosting providers hand out the short form). Without
/// it, a SQLite file named [`SQLITE_FILE_NAME`] inside `data_dir` is used and
/// created on first connect.
pub fn resolve_database_url(database_url: Option<&str>, data_dir: &Path) -> String {
    match database_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => match url.strip_prefix("postgres://") {
            Some(rest) => format!("postgresql://{rest}"),
            None => url.to_string(),
        },
        None => format!(
            "sqlite://{}?mode=rwc",
            data_dir.join(SQLITE_FILE_NAME).display()
        ),
    }
}

/// Create a connection pool for `database_url`.
///
/// In-memory SQLite databases are private to one connection, so they get a
/// single connection that is never recycled.
pub async fn create_pool(database_url: &str) -> Result<(DbPool, DbBackend), sqlx::Error> {
    sqlx::any::install_default_drivers();

    let backend = DbBackend::from_url(database_url).ok_or_else(|| {
        sqlx::Error::Configuration("DATABASE_URL must be a postgres or sqlite URL".into())
    })?;

    let options = if database_url.contains(":memory:") {
        AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        let max = match backend {
            DbBackend::Postgres => 20,
            DbBackend::Sqlite => 5,
        };
        AnyPoolOptions::new().max_connections(max)
    };

    let pool = options.connect(database_url).await?;
    Ok((pool, backend))
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations for `backend`.
pub async fn run_migrations(
    pool: &DbPool,
    backend: DbBackend,
) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::debug!(backend = backend.as_str(), "Running migrations");
    match backend {
        DbBackend::Postgres => POSTGRES_MIGRATOR.run(pool).await,
        DbBackend::Sqlite => SQLITE_MIGRATOR.run(pool).await,
    }
}

/// Names of the tables in the application schema, sorted.
pub async fn list_tables(pool: &DbPool, backend: DbBackend) -> Result<Vec<String>, sqlx::Error> {
    let query = match backend {
        DbBackend::Postgres => {
            "SELECT table_name::text FROM information_schema.tables
             WHERE table_schema = 'public' ORDER BY table_name"
        }
        DbBackend::Sqlite => {
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name"
        }
    };
    sqlx::query_scalar::<_, String>(query).fetch_all(pool).await
}

/// Whether `err` is a unique-constraint violation on either backend.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// `$start, $start+1, ...` for `count` bind parameters.
///
/// Both backends accept numbered placeholders, which keeps `IN (...)` lists
/// portable.
pub(crate) fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn postgres_scheme_is_rewritten_once() {
        let url = resolve_database_url(
            Some("postgres://u:p@db.example.com:5432/trips?x=postgres://"),
            Path::new("instance"),
        );
        assert_eq!(
            url,
            "postgresql://u:p@db.example.com:5432/trips?x=postgres://"
        );
    }

    #[test]
    fn other_urls_pass_through() {
        let url = resolve_database_url(Some("postgresql://u@h/db"), Path::new("instance"));
        assert_eq!(url, "postgresql://u@h/db");

        let url = resolve_database_url(Some("sqlite://custom.db"), Path::new("instance"));
        assert_eq!(url, "sqlite://custom.db");
    }

    #[test]
    fn missing_or_blank_url_falls_back_to_sqlite_file() {
        let dir = PathBuf::from("/srv/app/instance");
        assert_eq!(
            resolve_database_url(None, &dir),
            "sqlite:///srv/app/instance/photos.db?mode=rwc"
        );
        assert_eq!(
            resolve_database_url(Some("   "), &dir),
            "sqlite:///srv/app/instance/photos.db?mode=rwc"
        );
    }

    #[test]
    fn backend_detection() {
        assert_eq!(DbBackend::from_url("postgres://h/db"), Some(DbBackend::Postgres));
        assert_eq!(DbBackend::from_url("postgresql://h/db"), Some(DbBackend::Postgres));
        assert_eq!(DbBackend::from_url("sqlite::memory:"), Some(DbBackend::Sqlite));
        assert_eq!(DbBackend::from_url("mysql://h/db"), None);
    }

    #[test]
    fn placeholder_lists() {
        assert_eq!(placeholders(1, 3), "$1, $2, $3");
        assert_eq!(placeholders(2, 1), "$2");
        assert_eq!(placeholders(1, 0), "");
    }
}
