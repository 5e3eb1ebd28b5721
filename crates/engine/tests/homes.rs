use engine::{Engine, EngineError, HomeEdit, NewHome};
use migration::MigratorTrait;
use sea_orm::Database;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

fn opening_home() -> NewHome {
    NewHome {
        title: "Grand opening".to_string(),
        description1: "The collector now keeps your change safe.".to_string(),
        description2: None,
        image_link: "https://example.com/banner.png".to_string(),
    }
}

#[tokio::test]
async fn create_home_starts_unpublished() {
    let engine = engine_with_db().await;

    let home = engine.create_home(opening_home()).await.unwrap();
    assert!(!home.is_published);

    assert!(engine.published_homes().await.unwrap().is_empty());
    assert_eq!(engine.unpublished_homes().await.unwrap().len(), 1);
    assert!(engine.latest_published_home().await.unwrap().is_none());
}

#[tokio::test]
async fn create_home_validates_title_bounds() {
    let engine = engine_with_db().await;

    let mut short = opening_home();
    short.title = "Hi".to_string();
    let err = engine.create_home(short).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let mut long = opening_home();
    long.title = "A title far too long for the landing page".to_string();
    let err = engine.create_home(long).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn publish_freezes_content() {
    let engine = engine_with_db().await;
    let home = engine.create_home(opening_home()).await.unwrap();

    // unpublished documents accept edits
    let edited = engine
        .edit_home(
            &home.id,
            HomeEdit {
                title: Some("Now open".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.title, "Now open");

    let published = engine.publish_home(&home.id).await.unwrap();
    assert!(published.is_published);

    let err = engine
        .edit_home(
            &home.id,
            HomeEdit {
                title: Some("Too late".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
    assert_eq!(engine.home(&home.id).await.unwrap().title, "Now open");
}

#[tokio::test]
async fn publish_is_one_way() {
    let engine = engine_with_db().await;
    let home = engine.create_home(opening_home()).await.unwrap();

    engine.publish_home(&home.id).await.unwrap();
    // publishing again keeps the flag set
    let again = engine.publish_home(&home.id).await.unwrap();
    assert!(again.is_published);
}

#[tokio::test]
async fn landing_serves_the_latest_published_document() {
    let engine = engine_with_db().await;

    let first = engine.create_home(opening_home()).await.unwrap();
    engine.publish_home(&first.id).await.unwrap();
    assert_eq!(
        engine.latest_published_home().await.unwrap().unwrap().id,
        first.id
    );

    let mut later = opening_home();
    later.title = "Fresh news".to_string();
    let second = engine.create_home(later).await.unwrap();
    engine.publish_home(&second.id).await.unwrap();

    assert_eq!(
        engine.latest_published_home().await.unwrap().unwrap().id,
        second.id
    );
    assert_eq!(engine.published_homes().await.unwrap().len(), 2);
    assert!(engine.unpublished_homes().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_and_malformed_ids_are_rejected() {
    let engine = engine_with_db().await;

    let err = engine.home("not-a-uuid").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidId(_)));

    let err = engine
        .home("7b1c7a39-5cde-4c44-9462-0f4fb811a3b6")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn delete_home_removes_the_document() {
    let engine = engine_with_db().await;
    let home = engine.create_home(opening_home()).await.unwrap();

    engine.delete_home(&home.id).await.unwrap();

    let err = engine.home(&home.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}
