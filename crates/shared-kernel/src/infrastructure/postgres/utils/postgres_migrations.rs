// crates/shared-kernel/src/infrastructure/postgres/utils/postgres_migrations.rs

use sqlx::Executor;

// Scripts embarqués via include_str!, listés triés par nom de fichier.
// Chaque script est multi-statements et entièrement en IF NOT EXISTS :
// une ré-application est un no-op.
const MIGRATIONS: &[(&str, &str)] = &[(
    "202602010000_orders_foundation.sql",
    include_str!("../../../../migrations/postgres/202602010000_orders_foundation.sql"),
)];

pub async fn run_postgres_migrations(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for (name, script) in MIGRATIONS {
        pool.execute(*script).await?;
        tracing::info!("Migration applied: {}", name);
    }
    Ok(())
}
