use sqlx::PgPool;

use vntq::error::StoreError;
use vntq::models::EventLinks;
use vntq::repositories::{PgCatalogRepository, PgEventRepository};
use vntq::seed;

async fn seeded_catalog(pool: PgPool) -> PgCatalogRepository {
    let events = PgEventRepository::new(pool.clone());
    let catalog = PgCatalogRepository::new(pool);

    for user in seed::users() {
        catalog.upsert_user(&user).await.unwrap();
    }
    for venue in seed::venues() {
        events.upsert_venue(&venue).await.unwrap();
    }
    for artist in seed::artists() {
        catalog.upsert_artist(&artist).await.unwrap();
    }
    for genre in seed::genres() {
        catalog.upsert_genre(&genre).await.unwrap();
    }
    for vibe in seed::vibes() {
        catalog.upsert_vibe(&vibe).await.unwrap();
    }
    for event in seed::events() {
        events.upsert_event(&event).await.unwrap();
    }
    for links in seed::event_links() {
        catalog.replace_event_links(&links).await.unwrap();
    }

    catalog
}

fn sorted(mut links: EventLinks) -> EventLinks {
    links.artist_ids.sort();
    links.genre_codes.sort();
    links.vibe_codes.sort();
    links
}

#[sqlx::test(migrator = "vntq::MIGRATOR")]
async fn test_seeded_links_round_trip(pool: PgPool) {
    let catalog = seeded_catalog(pool).await;

    for expected in seed::event_links() {
        let stored = catalog.event_links(expected.event_id).await.unwrap();
        assert_eq!(stored, sorted(expected));
    }
}

#[sqlx::test(migrator = "vntq::MIGRATOR")]
async fn test_replacing_links_is_idempotent(pool: PgPool) {
    let catalog = seeded_catalog(pool).await;
    let links = seed::event_links().remove(2);

    catalog.replace_event_links(&links).await.unwrap();
    catalog.replace_event_links(&links).await.unwrap();

    let names: Vec<String> = catalog
        .artists_for_event(links.event_id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Ali Wong", "Dave Chappelle"]);
}

#[sqlx::test(migrator = "vntq::MIGRATOR")]
async fn test_unknown_genre_rolls_back_replacement(pool: PgPool) {
    let catalog = seeded_catalog(pool).await;
    let original = seed::event_links().remove(0);

    let broken = EventLinks {
        genre_codes: vec!["polka".to_string()],
        ..original.clone()
    };
    let err = catalog.replace_event_links(&broken).await.unwrap_err();

    assert!(
        matches!(err, StoreError::Constraint(ref name) if name == "event_genres_genre_code_fkey"),
        "{}",
        err
    );
    let stored = catalog.event_links(original.event_id).await.unwrap();
    assert_eq!(stored, sorted(original));
}

#[sqlx::test(migrator = "vntq::MIGRATOR")]
async fn test_user_round_trip(pool: PgPool) {
    let catalog = seeded_catalog(pool).await;
    let expected = seed::users().remove(0);

    let user = catalog.user_by_id(expected.id).await.unwrap().unwrap();

    assert_eq!(user.display_name, "Alex Carter");
    assert_eq!(user.home_city.as_deref(), Some("Boston"));
    assert_eq!(user.relevant_cities, vec!["Boston", "Cambridge", "New York"]);
}
