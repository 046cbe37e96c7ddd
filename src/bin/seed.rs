use vntq::config::AppConfig;
use vntq::repositories::{PgCatalogRepository, PgEventRepository};
use vntq::seed;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vntq=info,seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let pool = vntq::connect(&config).await?;
    let repository = PgEventRepository::new(pool.clone());
    let catalog = PgCatalogRepository::new(pool);

    for user in seed::users() {
        catalog.upsert_user(&user).await?;
    }
    for venue in seed::venues() {
        repository.upsert_venue(&venue).await?;
    }
    for artist in seed::artists() {
        catalog.upsert_artist(&artist).await?;
    }
    for genre in seed::genres() {
        catalog.upsert_genre(&genre).await?;
    }
    for vibe in seed::vibes() {
        catalog.upsert_vibe(&vibe).await?;
    }

    let events = seed::events();
    for event in &events {
        repository.upsert_event(event).await?;
    }
    for links in seed::event_links() {
        catalog.replace_event_links(&links).await?;
    }

    info!("Seed complete: {} events", events.len());
    Ok(())
}
