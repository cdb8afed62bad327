use crate::config::AppConfig;
use crate::entities::{ad_stats, ads, companies, media_items};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::info;

pub async fn setup_database(config: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    info!("📂 Database: {}", config.database_url);

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.max_connections(config.db_max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;

    info!("✅ Database connected successfully");

    run_migrations(&db).await?;

    Ok(db)
}

pub async fn run_migrations(db: &DatabaseConnection) -> anyhow::Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    info!("🔄 Running auto-migrations...");

    let stmts = vec![
        (
            "companies",
            schema
                .create_table_from_entity(companies::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "media_items",
            schema
                .create_table_from_entity(media_items::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "ads",
            schema
                .create_table_from_entity(ads::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "ad_stats",
            schema
                .create_table_from_entity(ad_stats::Entity)
                .if_not_exists()
                .to_owned(),
        ),
    ];

    for (name, stmt) in stmts {
        db.execute(builder.build(&stmt)).await?;
        info!("   - Table '{}' checked/created", name);
    }

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_media_items_company_id ON media_items(company_id)",
        "CREATE INDEX IF NOT EXISTS idx_ads_company_id ON ads(company_id)",
        "CREATE INDEX IF NOT EXISTS idx_ad_stats_ad_id ON ad_stats(ad_id)",
    ];

    for query in indexes {
        match db
            .execute(sea_orm::Statement::from_string(builder, query.to_owned()))
            .await
        {
            Ok(_) => tracing::debug!("   - Executed schema update: {}", query),
            Err(e) => tracing::warn!("   - Schema update warning: {} -> {}", query, e),
        }
    }

    Ok(())
}
