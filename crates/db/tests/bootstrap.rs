use friendtrip_db::{create_pool, health_check, list_tables, run_migrations, DbBackend};

/// Full bootstrap test: connect, migrate, verify schema.
#[tokio::test]
async fn test_full_bootstrap() {
    let (pool, backend) = create_pool("sqlite::memory:").await.unwrap();
    assert_eq!(backend, DbBackend::Sqlite);

    run_migrations(&pool, backend).await.unwrap();
    health_check(&pool).await.unwrap();

    let tables = list_tables(&pool, backend).await.unwrap();
    for table in ["albums", "photos", "trip_members", "trips", "user_sessions", "users"] {
        assert!(
            tables.iter().any(|t| t == table),
            "{table} should exist after migrations, got {tables:?}"
        );
    }
}

/// Running migrations twice is a no-op.
#[tokio::test]
async fn test_migrations_are_idempotent() {
    let (pool, backend) = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool, backend).await.unwrap();
    run_migrations(&pool, backend).await.unwrap();
}

/// The file fallback creates its database on first connect and keeps rows
/// across pools, which is what a process restart looks like.
#[tokio::test]
async fn test_sqlite_file_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = friendtrip_db::resolve_database_url(None, dir.path());

    {
        let (pool, backend) = create_pool(&url).await.unwrap();
        run_migrations(&pool, backend).await.unwrap();
        sqlx::query(
            "INSERT INTO users (mobile, username, password_hash, created_at)
             VALUES ('555', 'kept', 'x', 0)",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool.close().await;
    }

    let (pool, backend) = create_pool(&url).await.unwrap();
    run_migrations(&pool, backend).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = 'kept'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

/// Unknown URL schemes are rejected before any connection attempt.
#[tokio::test]
async fn test_unknown_scheme_is_rejected() {
    let err = create_pool("mysql://localhost/db").await.unwrap_err();
    assert!(matches!(err, sqlx::Error::Configuration(_)));
}
